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


use log::info;
use openrazer_client::{Manager, RazerError};

/// Subscribes to device hot-plug notifications and prints them until the process is killed.
pub fn watch_handler(manager: &Manager) -> Result<String, RazerError> {
    manager.on_device_added(|path| {
        println!("added: {}", path.as_deref().unwrap_or("<unknown>"));
    })?;
    manager.on_device_removed(|path| {
        println!("removed: {}", path.as_deref().unwrap_or("<unknown>"));
    })?;
    info!("watching for devices, press ctrl-c to stop");
    loop {
        std::thread::park();
    }
}
