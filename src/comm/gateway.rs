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

//! The single choke point between the facades and the transport.
//!
//! Every request is logged at `trace` level together with its outcome, and every reply is checked
//! against the shape the caller asked for before it is handed back.

use crate::codec::{FromWire, WireValue};
use crate::comm::transport::{SignalHandler, Transport};
use crate::config;
use crate::error::RazerError;
use log::{trace, warn};
use std::sync::Arc;

#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Gateway { transport }
    }

    /// Calls a remote method and returns the raw reply arguments.
    ///
    /// # Arguments
    ///
    /// * `target`: object path of the remote object
    /// * `interface`: interface the method belongs to
    /// * `method`: method name
    /// * `args`: the argument tuple
    ///
    /// # Returns: `Result<Vec<WireValue>, RazerError>`
    /// * `Ok(Vec<WireValue>)` - the reply arguments
    /// * `Err(RazerError::TransportFailure)` - the bus failed
    /// * `Err(RazerError::RemoteFault)` - the daemon replied with an error, name and message
    ///   unaltered
    pub fn invoke(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, RazerError> {
        trace!("-> {target} {interface}.{method}({args:?})");
        match self.transport.call(target, interface, method, args) {
            Ok(reply) => {
                trace!("<- {interface}.{method}: {reply:?}");
                Ok(reply)
            }
            Err(e) => {
                warn!("{interface}.{method} on {target} failed: {e}");
                Err(e)
            }
        }
    }

    /// Calls a remote method that returns exactly one value and decodes it as `T`.
    pub fn call<T: FromWire>(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<T, RazerError> {
        let reply = self.invoke(target, interface, method, args)?;
        decode_reply(&reply)
    }

    /// Calls a setter and checks its acknowledgement.
    pub fn call_setter(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<(), RazerError> {
        let reply = self.invoke(target, interface, method, args)?;
        acknowledge(interface, method, &reply)
    }

    /// Reads a property and decodes it as `T`.
    ///
    /// An empty string value is reported as [`RazerError::EmptyProperty`] rather than handed back
    /// as a valid empty result. Empty arrays and dictionaries are valid values.
    pub fn read_property<T: FromWire>(
        &self,
        target: &str,
        interface: &str,
        name: &str,
    ) -> Result<T, RazerError> {
        trace!("-> {target} get {interface}.{name}");
        let value = self
            .transport
            .read_property(target, interface, name)
            .inspect_err(|e| warn!("reading {interface}.{name} on {target} failed: {e}"))?;
        trace!("<- {interface}.{name} = {value:?}");
        if value.is_empty_string() {
            return Err(RazerError::EmptyProperty {
                interface: interface.to_string(),
                name: name.to_string(),
            });
        }
        T::from_wire(&value)
    }

    pub fn write_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
        value: WireValue,
    ) -> Result<(), RazerError> {
        trace!("-> {target} set {interface}.{name} = {value:?}");
        self.transport
            .write_property(target, interface, name, value)
            .inspect_err(|e| warn!("writing {interface}.{name} on {target} failed: {e}"))
    }

    pub fn subscribe(
        &self,
        target: &str,
        interface: &str,
        signal: &str,
        handler: SignalHandler,
    ) -> Result<(), RazerError> {
        trace!("subscribing to {interface}.{signal} on {target}");
        self.transport.subscribe(target, interface, signal, handler)
    }
}

/// Decodes a reply that must consist of exactly one argument.
///
/// # Returns: `Result<T, RazerError>`
/// * `Ok(T)` - the decoded argument
/// * `Err(RazerError::MalformedReply)` - the reply had no arguments, more than one, or one of the
///   wrong type
pub fn decode_reply<T: FromWire>(reply: &[WireValue]) -> Result<T, RazerError> {
    match reply {
        [value] => T::from_wire(value),
        _ => Err(RazerError::MalformedReply(format!(
            "expected a single {} but the reply had {} arguments",
            T::SHAPE,
            reply.len()
        ))),
    }
}

/// Interprets a setter reply.
///
/// Setters either return nothing or a single boolean success flag. `false` is the daemon refusing
/// the request and is reported as a remote fault.
pub fn acknowledge(interface: &str, method: &str, reply: &[WireValue]) -> Result<(), RazerError> {
    match reply {
        [] => Ok(()),
        [value] => match bool::from_wire(value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(RazerError::RemoteFault {
                name: config::REJECTED_ERROR_NAME.to_string(),
                message: format!("{interface}.{method} reported failure"),
            }),
            Err(_) => Err(RazerError::MalformedReply(format!(
                "{interface}.{method} acknowledged with a {}",
                value.unwrap_variant().type_name()
            ))),
        },
        _ => Err(RazerError::MalformedReply(format!(
            "{interface}.{method} acknowledged with {} arguments",
            reply.len()
        ))),
    }
}
