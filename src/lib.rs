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

//! Client library for the OpenRazer peripheral daemon.
//!
//! The daemon publishes one object per connected device and groups each device's features into
//! D-Bus interfaces. This crate hides the object paths, interface names and argument encoding
//! behind typed handles:
//! - [`Manager`] enumerates devices and reads daemon-wide settings
//! - [`Device`] exposes per-device operations (DPI, poll rate, battery, matrix frames, ...)
//! - [`Led`] exposes one lighting zone of a device (matrix, logo, scroll wheel, backlight)
//!
//! Every operation is gated by the device's capability set, resolved once by introspecting the
//! device object. An operation the device does not advertise fails with
//! [`ErrorKind::NotSupported`] before anything is sent to the daemon.
//!
//! # Layers
//!
//! - [`codec`] - conversion between domain values and wire arguments
//! - [`comm`] - the transport seam, the call gateway and the zbus transport
//! - [`capabilities`] - the compiled-in capability table and introspection resolution
//! - [`service`] - systemd user unit status for the daemon
//!
//! # Example
//!
//! ```rust,no_run
//! use openrazer_client::{Bus, Manager, codec::Rgb};
//!
//! # fn main() -> Result<(), openrazer_client::RazerError> {
//! let manager = Manager::connect(Bus::Session)?;
//! for device in manager.devices()? {
//!     if let Some(led) = device.led(openrazer_client::LightingZone::Logo)? {
//!         led.set_static(Rgb::new(0, 255, 0))?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

extern crate self as openrazer_client;

pub mod capabilities;
pub mod codec;
pub mod comm;
pub mod config;
pub mod device;
pub mod error;
pub mod led;
pub mod manager;
pub mod service;

pub use capabilities::{Capability, CapabilityKind, CapabilitySet, LightingZone};
pub use comm::dbus::{Bus, ZbusTransport};
pub use comm::gateway::Gateway;
pub use comm::transport::{SignalHandler, Transport};
pub use device::{Device, ProfileLed};
pub use error::{ErrorKind, RazerError};
pub use led::Led;
pub use manager::Manager;
pub use razer_macros::WireEnum;
pub use service::DaemonStatus;
