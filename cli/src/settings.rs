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


use crate::status::find_device;
use openrazer_client::{Manager, RazerError};

/// Prints the DPI, or sets it when both axes are given.
pub fn dpi_handler(
    manager: &Manager,
    selector: &str,
    x: Option<u16>,
    y: Option<u16>,
) -> Result<String, RazerError> {
    let device = find_device(manager, selector)?;
    match (x, y) {
        (Some(x), Some(y)) => {
            device.set_dpi(x, y)?;
            Ok(format!("dpi set to {x}x{y}"))
        }
        (None, None) => {
            let (x, y) = device.dpi()?;
            if device.has_capability("max_dpi")? {
                Ok(format!("dpi: {x}x{y} (max {})", device.max_dpi()?))
            } else {
                Ok(format!("dpi: {x}x{y}"))
            }
        }
        _ => Err(RazerError::InvalidArgument(
            "dpi needs both an x and a y value".to_string(),
        )),
    }
}

pub fn poll_rate_handler(
    manager: &Manager,
    selector: &str,
    hz: Option<u16>,
) -> Result<String, RazerError> {
    let device = find_device(manager, selector)?;
    match hz {
        Some(hz) => {
            device.set_poll_rate(hz)?;
            Ok(format!("poll rate set to {hz} Hz"))
        }
        None => Ok(format!("poll rate: {} Hz", device.poll_rate()?)),
    }
}

pub fn battery_handler(manager: &Manager, selector: &str) -> Result<String, RazerError> {
    let device = find_device(manager, selector)?;
    let level = device.battery_level()?;
    let state = if device.is_charging()? {
        "charging"
    } else {
        "discharging"
    };
    Ok(format!("battery: {level:.0}% ({state})"))
}
