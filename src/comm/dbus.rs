// This file is part of openrazer_client, a library to control peripheral devices through the OpenRazer daemon.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// openrazer_client is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// openrazer_client is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! Transport over a real D-Bus connection.
//!
//! zbus is asynchronous while the client API is blocking, so [`ZbusTransport`] owns a small tokio
//! runtime. Calls block on it and signal streams are polled by tasks spawned on it. Each
//! subscription gets a plain dispatcher thread fed through a channel, so handlers run outside the
//! runtime and may call back into the client. Blocking calls must not be made from inside a tokio
//! runtime.

use crate::codec::WireValue;
use crate::comm::transport::{SignalHandler, Transport};
use crate::config;
use crate::error::RazerError;
use futures::StreamExt;
use log::{debug, trace, warn};
use std::fmt;
use std::str::FromStr;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use zbus::message::Message;
use zbus::zvariant::{ObjectPath, Structure, StructureBuilder, Value};
use zbus::{Connection, DBusError};

/// Which message bus the daemon is reached on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bus {
    /// The per-user session bus, where the daemon normally runs.
    #[default]
    Session,
    System,
}

impl FromStr for Bus {
    type Err = RazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "session" => Ok(Bus::Session),
            "system" => Ok(Bus::System),
            _ => Err(RazerError::InvalidArgument(format!("unknown bus '{s}'"))),
        }
    }
}

pub struct ZbusTransport {
    runtime: Runtime,
    connection: Connection,
}

impl fmt::Debug for ZbusTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZbusTransport")
            .field("unique_name", &self.connection.unique_name())
            .finish()
    }
}

impl ZbusTransport {
    /// Opens a connection to `bus`.
    ///
    /// # Returns: `Result<ZbusTransport, RazerError>`
    /// * `Ok(ZbusTransport)` - connected
    /// * `Err(RazerError::TransportFailure)` - the runtime could not be started or the bus is not
    ///   reachable
    pub fn connect(bus: Bus) -> Result<Self, RazerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("razer-bus")
            .enable_all()
            .build()
            .map_err(|e| RazerError::TransportFailure(format!("cannot start bus runtime: {e}")))?;
        let connection = runtime
            .block_on(async {
                match bus {
                    Bus::Session => Connection::session().await,
                    Bus::System => Connection::system().await,
                }
            })
            .map_err(classify)?;
        debug!(
            "connected to the {bus:?} bus as {:?}",
            connection.unique_name(),
        );
        Ok(ZbusTransport {
            runtime,
            connection,
        })
    }
}

impl Transport for ZbusTransport {
    fn call(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, RazerError> {
        let fields = args.iter().map(to_zvalue).collect::<Result<Vec<_>, _>>()?;
        let body = if fields.is_empty() {
            None
        } else {
            let structure = fields
                .into_iter()
                .fold(StructureBuilder::new(), |builder, field| {
                    builder.append_field(field)
                })
                .build()
                .map_err(|e| RazerError::InvalidArgument(format!("cannot build arguments: {e}")))?;
            Some(structure)
        };
        let reply = self.runtime.block_on(async {
            let destination = Some(config::SERVICE_NAME);
            match &body {
                Some(body) => {
                    self.connection
                        .call_method(destination, target, Some(interface), method, body)
                        .await
                }
                None => {
                    self.connection
                        .call_method(destination, target, Some(interface), method, &())
                        .await
                }
            }
        });
        decode_body(&reply.map_err(classify)?)
    }

    fn read_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
    ) -> Result<WireValue, RazerError> {
        let reply = self.call(
            target,
            config::PROPERTIES_INTERFACE,
            "Get",
            &[interface.into(), name.into()],
        )?;
        match <[WireValue; 1]>::try_from(reply) {
            Ok([WireValue::Variant(value)]) => Ok(*value),
            Ok([other]) => Ok(other),
            Err(reply) => Err(RazerError::MalformedReply(format!(
                "property {interface}.{name} came back with {} values",
                reply.len()
            ))),
        }
    }

    fn write_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
        value: WireValue,
    ) -> Result<(), RazerError> {
        self.call(
            target,
            config::PROPERTIES_INTERFACE,
            "Set",
            &[
                interface.into(),
                name.into(),
                WireValue::Variant(Box::new(value)),
            ],
        )
        .map(|_| ())
    }

    fn subscribe(
        &self,
        target: &str,
        interface: &str,
        signal: &str,
        handler: SignalHandler,
    ) -> Result<(), RazerError> {
        let (target, interface, signal) =
            (target.to_string(), interface.to_string(), signal.to_string());
        let label = format!("{interface}.{signal}");
        let mut stream = self
            .runtime
            .block_on(async {
                let proxy = zbus::Proxy::new(
                    &self.connection,
                    config::SERVICE_NAME,
                    target,
                    interface,
                )
                .await?;
                proxy.receive_signal(signal).await
            })
            .map_err(classify)?;
        let dispatch = spawn_dispatcher(label.clone(), handler)?;
        self.runtime.spawn(async move {
            while let Some(message) = stream.next().await {
                match decode_body(&message) {
                    Ok(args) => {
                        if dispatch.send(args).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("dropping undecodable {label} signal: {e}"),
                }
            }
            debug!("signal stream for {label} ended");
        });
        Ok(())
    }
}

/// Starts the thread that runs `handler` for every argument list sent to the returned channel.
/// The thread exits once the sender is dropped.
fn spawn_dispatcher(
    label: String,
    handler: SignalHandler,
) -> Result<UnboundedSender<Vec<WireValue>>, RazerError> {
    let (sender, mut receiver) = unbounded_channel::<Vec<WireValue>>();
    std::thread::Builder::new()
        .name("razer-signal".to_string())
        .spawn(move || {
            while let Some(args) = receiver.blocking_recv() {
                trace!("signal {label}: {args:?}");
                handler(args);
            }
            debug!("dispatcher for {label} stopped");
        })
        .map_err(|e| RazerError::TransportFailure(format!("cannot start signal dispatcher: {e}")))?;
    Ok(sender)
}

/// Maps a zbus failure to the client's error classes. Error replies from the daemon keep their
/// name and message; everything else is a transport failure.
fn classify(err: zbus::Error) -> RazerError {
    match err {
        zbus::Error::MethodError(name, message, _) => RazerError::RemoteFault {
            name: name.to_string(),
            message: message.unwrap_or_default(),
        },
        zbus::Error::FDO(e) => RazerError::RemoteFault {
            name: e.name().to_string(),
            message: e.description().unwrap_or_default().to_string(),
        },
        other => RazerError::TransportFailure(other.to_string()),
    }
}

fn decode_body(message: &Message) -> Result<Vec<WireValue>, RazerError> {
    let body = message.body();
    if body.signature().to_string().is_empty() {
        return Ok(Vec::new());
    }
    let fields: Structure = body
        .deserialize()
        .map_err(|e| RazerError::MalformedReply(format!("cannot read reply body: {e}")))?;
    fields.fields().iter().map(from_zvalue).collect()
}

pub(crate) fn to_zvalue(value: &WireValue) -> Result<Value<'static>, RazerError> {
    Ok(match value {
        WireValue::Byte(v) => Value::U8(*v),
        WireValue::Bool(v) => Value::Bool(*v),
        WireValue::Int16(v) => Value::I16(*v),
        WireValue::UInt16(v) => Value::U16(*v),
        WireValue::Int32(v) => Value::I32(*v),
        WireValue::UInt32(v) => Value::U32(*v),
        WireValue::Int64(v) => Value::I64(*v),
        WireValue::UInt64(v) => Value::U64(*v),
        WireValue::Double(v) => Value::F64(*v),
        WireValue::Str(s) => Value::from(s.clone()),
        WireValue::ObjectPath(p) => ObjectPath::try_from(p.clone())
            .map(Value::from)
            .map_err(|e| RazerError::InvalidArgument(format!("'{p}' is not an object path: {e}")))?,
        WireValue::Bytes(bytes) => Value::from(bytes.clone()),
        WireValue::Variant(inner) => Value::Value(Box::new(to_zvalue(inner)?)),
        WireValue::Array(_) | WireValue::Struct(_) => {
            return Err(RazerError::InvalidArgument(format!(
                "{} arguments are not sent to the daemon",
                value.type_name()
            )));
        }
    })
}

pub(crate) fn from_zvalue(value: &Value<'_>) -> Result<WireValue, RazerError> {
    Ok(match value {
        Value::U8(v) => WireValue::Byte(*v),
        Value::Bool(v) => WireValue::Bool(*v),
        Value::I16(v) => WireValue::Int16(*v),
        Value::U16(v) => WireValue::UInt16(*v),
        Value::I32(v) => WireValue::Int32(*v),
        Value::U32(v) => WireValue::UInt32(*v),
        Value::I64(v) => WireValue::Int64(*v),
        Value::U64(v) => WireValue::UInt64(*v),
        Value::F64(v) => WireValue::Double(*v),
        Value::Str(s) => WireValue::Str(s.to_string()),
        Value::Signature(s) => WireValue::Str(s.to_string()),
        Value::ObjectPath(p) => WireValue::ObjectPath(p.to_string()),
        Value::Value(inner) => WireValue::Variant(Box::new(from_zvalue(inner)?)),
        Value::Array(array) => {
            let items = array.iter().map(from_zvalue).collect::<Result<Vec<_>, _>>()?;
            if array.element_signature().to_string() == "y" {
                WireValue::Bytes(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            WireValue::Byte(b) => Some(b),
                            _ => None,
                        })
                        .collect(),
                )
            } else {
                WireValue::Array(items)
            }
        }
        Value::Structure(s) => {
            WireValue::Struct(s.fields().iter().map(from_zvalue).collect::<Result<_, _>>()?)
        }
        other => {
            return Err(RazerError::MalformedReply(format!(
                "unsupported value in reply: {other:?}"
            )));
        }
    })
}
