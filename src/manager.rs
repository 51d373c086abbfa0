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

//! Entry point to the daemon: device enumeration and daemon-wide settings.

use crate::codec::WireValue;
use crate::comm::dbus::{Bus, ZbusTransport};
use crate::comm::gateway::Gateway;
use crate::comm::transport::Transport;
use crate::config;
use crate::device::Device;
use crate::error::RazerError;
use crate::service::{self, DaemonStatus};
use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Manager {
    gateway: Gateway,
}

impl Manager {
    /// Connects to the daemon on `bus` through zbus.
    pub fn connect(bus: Bus) -> Result<Self, RazerError> {
        Ok(Manager::new(Arc::new(ZbusTransport::connect(bus)?)))
    }

    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Manager {
            gateway: Gateway::new(transport),
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Object paths of the devices the daemon currently manages. A snapshot, not kept up to date.
    pub fn device_paths(&self) -> Result<Vec<String>, RazerError> {
        self.gateway
            .read_property(config::MANAGER_PATH, config::MANAGER_INTERFACE, "Devices")
    }

    /// Handles for the devices the daemon currently manages.
    pub fn devices(&self) -> Result<Vec<Device>, RazerError> {
        let paths = self.device_paths()?;
        debug!("daemon reports {} devices", paths.len());
        Ok(paths
            .into_iter()
            .map(|path| Device::new(self.gateway.clone(), path))
            .collect())
    }

    /// A handle for the device at `path`. Nothing is checked until the handle is used.
    pub fn device(&self, path: &str) -> Device {
        Device::new(self.gateway.clone(), path)
    }

    pub fn daemon_version(&self) -> Result<String, RazerError> {
        self.gateway
            .read_property(config::MANAGER_PATH, config::MANAGER_INTERFACE, "Version")
    }

    /// True when the daemon answers a read of its `Version` property.
    pub fn is_daemon_reachable(&self) -> bool {
        match self.daemon_version() {
            Ok(version) => {
                debug!("daemon {version} is reachable");
                true
            }
            Err(e) => {
                info!("daemon is not reachable: {e}");
                false
            }
        }
    }

    /// Devices the daemon has drivers for, as name to `(vendor id, product id)`.
    pub fn supported_devices(&self) -> Result<BTreeMap<String, (u16, u16)>, RazerError> {
        let raw: String = self.gateway.call(
            config::MANAGER_PATH,
            config::DEVICES_INTERFACE,
            "supportedDevices",
            &[],
        )?;
        let parsed: BTreeMap<String, [u16; 2]> = serde_json::from_str(&raw)
            .map_err(|e| RazerError::MalformedReply(format!("invalid device list: {e}")))?;
        Ok(parsed
            .into_iter()
            .map(|(name, [vid, pid])| (name, (vid, pid)))
            .collect())
    }

    /// Whether an effect set on one device is mirrored to the others.
    pub fn sync_effects(&self) -> Result<bool, RazerError> {
        self.gateway.call(
            config::MANAGER_PATH,
            config::DEVICES_INTERFACE,
            "getSyncEffects",
            &[],
        )
    }

    pub fn set_sync_effects(&self, sync: bool) -> Result<(), RazerError> {
        self.gateway.call_setter(
            config::MANAGER_PATH,
            config::DEVICES_INTERFACE,
            "syncEffects",
            &[sync.into()],
        )
    }

    /// Whether lighting turns off while the screensaver is active.
    pub fn turn_off_on_screensaver(&self) -> Result<bool, RazerError> {
        self.gateway.call(
            config::MANAGER_PATH,
            config::DEVICES_INTERFACE,
            "getOffOnScreensaver",
            &[],
        )
    }

    pub fn set_turn_off_on_screensaver(&self, enabled: bool) -> Result<(), RazerError> {
        self.gateway.call_setter(
            config::MANAGER_PATH,
            config::DEVICES_INTERFACE,
            "enableTurnOffOnScreensaver",
            &[enabled.into()],
        )
    }

    /// Calls `handler` whenever a device is plugged in.
    ///
    /// The handler receives the new device's object path when the daemon includes one in the
    /// signal. It runs on a dispatcher thread of the transport, outside any async runtime, so it
    /// may call back into the client, e.g. to enumerate devices again.
    pub fn on_device_added<F>(&self, handler: F) -> Result<(), RazerError>
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        self.subscribe_device_signal("device_added", handler)
    }

    /// Calls `handler` whenever a device is unplugged. See [`Manager::on_device_added`].
    pub fn on_device_removed<F>(&self, handler: F) -> Result<(), RazerError>
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        self.subscribe_device_signal("device_removed", handler)
    }

    fn subscribe_device_signal<F>(&self, signal: &str, handler: F) -> Result<(), RazerError>
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        self.gateway.subscribe(
            config::MANAGER_PATH,
            config::DEVICES_INTERFACE,
            signal,
            Box::new(move |args: Vec<WireValue>| handler(device_path_of(&args))),
        )
    }

    pub fn daemon_status(&self) -> DaemonStatus {
        service::daemon_status()
    }

    pub fn daemon_status_output(&self) -> Result<String, RazerError> {
        service::daemon_status_output()
    }

    pub fn enable_daemon(&self) -> Result<bool, RazerError> {
        service::enable_daemon()
    }
}

fn device_path_of(args: &[WireValue]) -> Option<String> {
    match args.first().map(WireValue::unwrap_variant) {
        Some(WireValue::ObjectPath(path) | WireValue::Str(path)) => Some(path.clone()),
        _ => None,
    }
}
