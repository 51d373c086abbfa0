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


use log::debug;
use openrazer_client::{Device, Manager, RazerError, service};

/// Resolves a device selector to a device.
///
/// A selector starting with `/` is an object path, a plain number is an index into the device
/// list, and anything else is matched against serial numbers.
pub fn find_device(manager: &Manager, selector: &str) -> Result<Device, RazerError> {
    if selector.starts_with('/') {
        return Ok(manager.device(selector));
    }
    let mut devices = manager.devices()?;
    if let Ok(index) = selector.parse::<usize>() {
        if index >= devices.len() {
            return Err(RazerError::InvalidArgument(format!(
                "device index {index} out of range, {} device(s) connected",
                devices.len()
            )));
        }
        return Ok(devices.swap_remove(index));
    }
    for device in devices {
        match device.serial() {
            Ok(serial) if serial == selector => return Ok(device),
            Ok(_) => {}
            Err(e) => debug!("skipping {} while matching serials: {e}", device.path()),
        }
    }
    Err(RazerError::InvalidArgument(format!(
        "no device matches '{selector}'"
    )))
}

/// Reachability, version and service state as an ascii table.
pub fn status_handler(manager: &Manager) -> Result<String, RazerError> {
    let reachable = manager.is_daemon_reachable();
    let version = if reachable {
        manager.daemon_version()?
    } else {
        "-".to_string()
    };
    Ok(format!(
        "---- DAEMON ----\n\
        | reachable | version | service |\n\
        | {reachable} | {version} | {} |",
        manager.daemon_status()
    ))
}

/// Every connected device with its type and lighting zones.
pub fn list_handler(manager: &Manager) -> Result<String, RazerError> {
    let mut ret_string = String::from(
        "---- DEVICES ----\n\
        | # | name | type | serial | zones |\n",
    );
    for (index, device) in manager.devices()?.iter().enumerate() {
        let zones = device
            .leds()?
            .iter()
            .map(|led| led.zone().name())
            .collect::<Vec<_>>()
            .join(",");
        ret_string += format!(
            "| {index} | {} | {} | {} | {zones} |\n",
            device.name()?,
            device.device_type()?,
            device.serial()?
        )
        .as_str();
    }
    Ok(ret_string)
}

/// The capability ids a device advertises, followed by the effects of each zone.
pub fn caps_handler(manager: &Manager, selector: &str) -> Result<String, RazerError> {
    let device = find_device(manager, selector)?;
    let mut ret_string = format!("---- CAPABILITIES ({}) ----\n", device.path());
    for capability in device.capabilities()?.iter() {
        ret_string.push_str(format!("{}\n", capability.id).as_str());
    }
    ret_string += "\n---- EFFECTS ----\n| zone | effects |\n";
    for led in device.leds()? {
        let effects = led
            .supported_effects()?
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(",");
        ret_string += format!("| {} | {effects} |\n", led.zone().name()).as_str();
    }
    Ok(ret_string)
}

/// Enables the daemon's systemd user unit.
pub fn enable_daemon_handler() -> Result<String, RazerError> {
    if service::enable_daemon()? {
        Ok("openrazer-daemon enabled".to_string())
    } else {
        Ok(format!(
            "systemctl could not enable openrazer-daemon, service is {}",
            service::daemon_status()
        ))
    }
}
