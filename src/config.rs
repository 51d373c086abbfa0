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

//! Names that make up the daemon's wire contract.

/// Well-known bus name the daemon owns.
pub static SERVICE_NAME: &str = "io.github.openrazer1";

/// Object path of the daemon's manager object.
pub static MANAGER_PATH: &str = "/io/github/openrazer1";

/// Interface carrying the manager's `Version` and `Devices` properties.
pub static MANAGER_INTERFACE: &str = "io.github.openrazer1.Manager";

/// Interface carrying the daemon-wide methods (sync, screensaver, supported devices) and the
/// `device_added`/`device_removed` signals.
pub static DEVICES_INTERFACE: &str = "razer.devices";

/// Interface carrying the identity of a device: `Name`, `Type`, serial, firmware, poll rate.
pub static DEVICE_INTERFACE: &str = "io.github.openrazer1.Device";

pub static MISC_INTERFACE: &str = "razer.device.misc";
pub static DPI_INTERFACE: &str = "razer.device.dpi";
pub static POWER_INTERFACE: &str = "razer.device.power";
pub static MUG_INTERFACE: &str = "razer.device.misc.mug";
pub static CHROMA_INTERFACE: &str = "razer.device.lighting.chroma";
pub static CUSTOM_INTERFACE: &str = "razer.device.lighting.custom";
pub static BW2013_INTERFACE: &str = "razer.device.lighting.bw2013";
pub static BRIGHTNESS_INTERFACE: &str = "razer.device.lighting.brightness";
pub static LOGO_INTERFACE: &str = "razer.device.lighting.logo";
pub static SCROLL_INTERFACE: &str = "razer.device.lighting.scroll";
pub static BACKLIGHT_INTERFACE: &str = "razer.device.lighting.backlight";
pub static PROFILE_LED_INTERFACE: &str = "razer.device.lighting.profile_led";

/// Standard interface used to discover which interfaces and methods a device object exposes.
pub static INTROSPECTABLE_INTERFACE: &str = "org.freedesktop.DBus.Introspectable";

/// Standard interface used for property reads and writes.
pub static PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Error name reported when a setter replies with a `false` acknowledgement.
pub static REJECTED_ERROR_NAME: &str = "io.github.openrazer1.Error.Rejected";

/// The systemd user unit that runs the daemon.
pub static DAEMON_UNIT: &str = "openrazer-daemon.service";

/// Install location of the daemon binary. Used to tell "not installed" apart from "no service
/// manager" when `systemctl` cannot be run.
pub static DAEMON_BINARY: &str = "/usr/bin/openrazer-daemon";

/// Binary used to query and control the daemon's unit.
pub static SYSTEMCTL: &str = "systemctl";

/// Key of the top image url in the map returned by `getRazerUrls`.
pub static PNG_URL_KEY: &str = "top_img";
