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

use openrazer_client::codec::WireValue;
use openrazer_client::config;
use openrazer_client::{RazerError, SignalHandler, Transport};
use std::collections::HashMap;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&[WireValue]) -> Result<Vec<WireValue>, RazerError> + Send + Sync>;

/// One request the client sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub target: String,
    pub interface: String,
    pub method: String,
    pub args: Vec<WireValue>,
}

/// Stand-in for the bus. Records every request, answers introspection from registered
/// interface lists, answers methods from registered responders (an empty reply otherwise) and
/// keeps properties in a map.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<Call>>,
    introspection: Mutex<HashMap<String, String>>,
    responders: Mutex<HashMap<String, Responder>>,
    properties: Mutex<HashMap<(String, String), WireValue>>,
    handlers: Mutex<Vec<(String, SignalHandler)>>,
}

impl MockTransport {
    /// Exports a device at `path` with the given interfaces and their methods.
    pub fn add_device(&self, path: &str, interfaces: &[(&str, &[&str])]) {
        self.introspection
            .lock()
            .unwrap()
            .insert(path.to_string(), introspection_xml(interfaces));
    }

    /// Answers `interface.method` with `respond(args)`.
    pub fn respond<F>(&self, interface: &str, method: &str, respond: F)
    where
        F: Fn(&[WireValue]) -> Result<Vec<WireValue>, RazerError> + Send + Sync + 'static,
    {
        self.responders
            .lock()
            .unwrap()
            .insert(format!("{interface}.{method}"), Box::new(respond));
    }

    /// Answers `interface.method` with `reply` every time.
    pub fn reply(&self, interface: &str, method: &str, reply: Vec<WireValue>) {
        self.respond(interface, method, move |_| Ok(reply.clone()));
    }

    /// Fails `interface.method` with a daemon error reply.
    pub fn fail(&self, interface: &str, method: &str, name: &str, message: &str) {
        let (name, message) = (name.to_string(), message.to_string());
        self.respond(interface, method, move |_| {
            Err(RazerError::RemoteFault {
                name: name.clone(),
                message: message.clone(),
            })
        });
    }

    pub fn set_property(&self, interface: &str, name: &str, value: WireValue) {
        self.properties
            .lock()
            .unwrap()
            .insert((interface.to_string(), name.to_string()), value);
    }

    /// Delivers `signal` with `args` to every handler subscribed to it.
    pub fn emit(&self, signal: &str, args: Vec<WireValue>) {
        for (subscribed, handler) in self.handlers.lock().unwrap().iter() {
            if subscribed == signal {
                handler(args.clone());
            }
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than introspection.
    pub fn operation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.interface != config::INTROSPECTABLE_INTERFACE)
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls().pop()
    }

    fn record(&self, target: &str, interface: &str, method: &str, args: &[WireValue]) {
        self.calls.lock().unwrap().push(Call {
            target: target.to_string(),
            interface: interface.to_string(),
            method: method.to_string(),
            args: args.to_vec(),
        });
    }
}

impl Transport for MockTransport {
    fn call(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, RazerError> {
        self.record(target, interface, method, args);
        if interface == config::INTROSPECTABLE_INTERFACE {
            return match self.introspection.lock().unwrap().get(target) {
                Some(xml) => Ok(vec![WireValue::Str(xml.clone())]),
                None => Err(RazerError::RemoteFault {
                    name: "org.freedesktop.DBus.Error.UnknownObject".into(),
                    message: format!("no object at {target}"),
                }),
            };
        }
        match self
            .responders
            .lock()
            .unwrap()
            .get(&format!("{interface}.{method}"))
        {
            Some(respond) => respond(args),
            None => Ok(Vec::new()),
        }
    }

    fn read_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
    ) -> Result<WireValue, RazerError> {
        self.record(
            target,
            config::PROPERTIES_INTERFACE,
            "Get",
            &[interface.into(), name.into()],
        );
        self.properties
            .lock()
            .unwrap()
            .get(&(interface.to_string(), name.to_string()))
            .cloned()
            .map(|value| WireValue::Variant(Box::new(value)))
            .ok_or_else(|| RazerError::TransportFailure("The name is not activatable".into()))
    }

    fn write_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
        value: WireValue,
    ) -> Result<(), RazerError> {
        self.record(
            target,
            config::PROPERTIES_INTERFACE,
            "Set",
            &[interface.into(), name.into(), value.clone()],
        );
        self.set_property(interface, name, value);
        Ok(())
    }

    fn subscribe(
        &self,
        _target: &str,
        _interface: &str,
        signal: &str,
        handler: SignalHandler,
    ) -> Result<(), RazerError> {
        self.handlers
            .lock()
            .unwrap()
            .push((signal.to_string(), handler));
        Ok(())
    }
}

/// Builds the document `Introspect` returns for an object with these interfaces.
pub fn introspection_xml(interfaces: &[(&str, &[&str])]) -> String {
    let mut xml = String::from(
        "<!DOCTYPE node PUBLIC \"-//freedesktop//DTD D-BUS Object Introspection 1.0//EN\"\n\
         \"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd\">\n<node>\n",
    );
    for (interface, methods) in interfaces {
        xml.push_str(&format!("  <interface name=\"{interface}\">\n"));
        for method in *methods {
            xml.push_str(&format!("    <method name=\"{method}\"/>\n"));
        }
        xml.push_str("  </interface>\n");
    }
    xml.push_str("</node>\n");
    xml
}
