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

//! Handle for one device object exported by the daemon.

use crate::capabilities::{self, Capability, CapabilitySet, LightingZone};
use crate::codec::{CustomFrame, FromWire, LedId, WireValue};
use crate::comm::gateway::Gateway;
use crate::config;
use crate::error::RazerError;
use crate::led::Led;
use log::debug;
use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock, PoisonError};

/// One of the three profile indicator LEDs found on some keyboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileLed {
    Red,
    Green,
    Blue,
}

impl ProfileLed {
    fn capability_id(self) -> &'static str {
        match self {
            ProfileLed::Red => "lighting_profile_led_red",
            ProfileLed::Green => "lighting_profile_led_green",
            ProfileLed::Blue => "lighting_profile_led_blue",
        }
    }
}

/// A device known to the daemon, addressed by its object path.
///
/// The capability set is resolved on first use by introspecting the object and kept for the
/// lifetime of the handle. Every operation that depends on a capability checks it first and fails
/// with [`RazerError::NotSupported`] without contacting the daemon when it is missing. Identity
/// getters (name, type, serial, firmware) are always available.
#[derive(Debug)]
pub struct Device {
    gateway: Gateway,
    path: String,
    capabilities: OnceLock<CapabilitySet>,
    // Held while introspecting so concurrent first calls resolve once.
    resolving: Mutex<()>,
}

impl Device {
    pub fn new(gateway: Gateway, path: impl Into<String>) -> Self {
        Device {
            gateway,
            path: path.into(),
            capabilities: OnceLock::new(),
            resolving: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The capabilities this device advertises, introspecting it on the first call.
    ///
    /// # Returns: `Result<&CapabilitySet, RazerError>`
    /// * `Ok(&CapabilitySet)` - the resolved set, identical on every later call
    /// * `Err(RazerError)` - introspection failed; the next call tries again
    pub fn capabilities(&self) -> Result<&CapabilitySet, RazerError> {
        if let Some(set) = self.capabilities.get() {
            return Ok(set);
        }
        let _resolving = self
            .resolving
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = self.capabilities.get() {
            return Ok(set);
        }
        let xml: String = self.gateway.call(
            &self.path,
            config::INTROSPECTABLE_INTERFACE,
            "Introspect",
            &[],
        )?;
        let interfaces = capabilities::parse_introspection(&xml)?;
        debug!("{} exports {} interfaces", self.path, interfaces.len());
        Ok(self
            .capabilities
            .get_or_init(|| CapabilitySet::from_interfaces(&interfaces)))
    }

    pub fn has_capability(&self, id: &str) -> Result<bool, RazerError> {
        Ok(self.capabilities()?.contains(id))
    }

    /// Looks up `id` and checks that the device advertises it.
    pub(crate) fn require(&self, id: &str) -> Result<&'static Capability, RazerError> {
        match capabilities::lookup(id) {
            Some(capability) if self.capabilities()?.contains(id) => Ok(capability),
            _ => Err(self.unsupported(id.to_string())),
        }
    }

    pub(crate) fn get_capability<T: FromWire>(&self, id: &str) -> Result<T, RazerError> {
        let capability = self.require(id)?;
        match capability.getter {
            Some(getter) if self.capabilities()?.can_read(id) => {
                self.gateway
                    .call(&self.path, capability.interface, getter, &[])
            }
            _ => Err(self.unsupported(format!("reading {id}"))),
        }
    }

    pub(crate) fn set_capability(&self, id: &str, args: &[WireValue]) -> Result<(), RazerError> {
        let capability = self.require(id)?;
        match capability.setter {
            Some(setter) if self.capabilities()?.can_write(id) => {
                self.gateway
                    .call_setter(&self.path, capability.interface, setter, args)
            }
            _ => Err(self.unsupported(format!("writing {id}"))),
        }
    }

    fn unsupported(&self, capability: String) -> RazerError {
        RazerError::NotSupported {
            capability,
            target: self.path.clone(),
        }
    }

    fn identity<T: FromWire>(&self, method: &str) -> Result<T, RazerError> {
        self.gateway
            .call(&self.path, config::DEVICE_INTERFACE, method, &[])
    }

    pub fn name(&self) -> Result<String, RazerError> {
        self.gateway
            .read_property(&self.path, config::DEVICE_INTERFACE, "Name")
    }

    /// Device class as reported by the daemon, e.g. `keyboard` or `mouse`.
    pub fn device_type(&self) -> Result<String, RazerError> {
        self.gateway
            .read_property(&self.path, config::DEVICE_INTERFACE, "Type")
    }

    pub fn serial(&self) -> Result<String, RazerError> {
        self.identity("getSerial")
    }

    pub fn firmware_version(&self) -> Result<String, RazerError> {
        self.identity("getFirmwareVersion")
    }

    pub fn keyboard_layout(&self) -> Result<String, RazerError> {
        self.get_capability("keyboard_layout")
    }

    /// The device mode as `(mode, param)`. Mode `0` is normal mode and `3` driver mode.
    pub fn device_mode(&self) -> Result<(u8, u8), RazerError> {
        let raw: String = self.get_capability("device_mode")?;
        parse_device_mode(&raw)
    }

    pub fn set_device_mode(&self, mode: u8, param: u8) -> Result<(), RazerError> {
        self.set_capability("device_mode", &[mode.into(), param.into()])
    }

    /// Store and image urls of the device, keyed by kind (`top_img`, `side_img`, `store`, ...).
    pub fn razer_urls(&self) -> Result<BTreeMap<String, String>, RazerError> {
        let raw: String = self.get_capability("razer_urls")?;
        serde_json::from_str(&raw)
            .map_err(|e| RazerError::MalformedReply(format!("invalid url list: {e}")))
    }

    pub fn png_url(&self) -> Result<Option<String>, RazerError> {
        Ok(self.razer_urls()?.remove(config::PNG_URL_KEY))
    }

    /// File name part of [`Device::png_url`], e.g. `razer-naga-hex-gallery-12.png`.
    pub fn png_filename(&self) -> Result<Option<String>, RazerError> {
        Ok(self.png_url()?.and_then(|url| {
            url.rsplit('/')
                .next()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        }))
    }

    /// USB vendor and product id.
    pub fn vid_pid(&self) -> Result<(u16, u16), RazerError> {
        let ids: Vec<u16> = self.get_capability("vid_pid")?;
        pair("vid/pid", &ids)
    }

    pub fn has_dedicated_macro_keys(&self) -> Result<bool, RazerError> {
        self.get_capability("dedicated_macro_keys")
    }

    pub fn has_matrix(&self) -> Result<bool, RazerError> {
        self.get_capability("has_matrix")
    }

    /// Rows and columns of the lighting matrix.
    pub fn matrix_dimensions(&self) -> Result<(u16, u16), RazerError> {
        let dims: Vec<u16> = self.get_capability("matrix_dimensions")?;
        pair("matrix dimensions", &dims)
    }

    /// Poll rate in Hz.
    pub fn poll_rate(&self) -> Result<u16, RazerError> {
        self.get_capability("poll_rate")
    }

    /// Sets the poll rate in Hz. Devices usually accept 125, 500 and 1000.
    pub fn set_poll_rate(&self, hz: u16) -> Result<(), RazerError> {
        self.set_capability("poll_rate", &[hz.into()])
    }

    pub fn dpi(&self) -> Result<(u16, u16), RazerError> {
        let dpi: Vec<u16> = self.get_capability("dpi")?;
        pair("dpi", &dpi)
    }

    pub fn set_dpi(&self, x: u16, y: u16) -> Result<(), RazerError> {
        self.set_capability("dpi", &[x.into(), y.into()])
    }

    pub fn max_dpi(&self) -> Result<u16, RazerError> {
        self.get_capability("max_dpi")
    }

    /// Battery charge in percent.
    pub fn battery_level(&self) -> Result<f64, RazerError> {
        self.get_capability("battery")
    }

    pub fn is_charging(&self) -> Result<bool, RazerError> {
        self.get_capability("charging")
    }

    /// Seconds of inactivity before a wireless device goes to sleep.
    pub fn set_idle_time(&self, seconds: u16) -> Result<(), RazerError> {
        self.set_capability("idle_time", &[seconds.into()])
    }

    pub fn set_low_battery_threshold(&self, percent: u8) -> Result<(), RazerError> {
        self.set_capability("low_battery_threshold", &[percent.into()])
    }

    pub fn is_mug_present(&self) -> Result<bool, RazerError> {
        self.get_capability("mug")
    }

    /// Switches the matrix to custom mode, showing the rows sent with [`Device::set_key_row`].
    pub fn set_custom(&self) -> Result<(), RazerError> {
        self.set_capability("lighting_custom", &[])
    }

    /// Uploads one row segment of a custom frame. The frame is validated before anything is sent.
    /// Call [`Device::set_custom`] afterwards to display it.
    pub fn set_key_row(&self, frame: &CustomFrame) -> Result<(), RazerError> {
        let buffer = frame.encode()?;
        self.set_capability("lighting_led_matrix", &[buffer])
    }

    pub fn set_static_bw2013(&self) -> Result<(), RazerError> {
        self.set_capability("lighting_static_bw2013", &[])
    }

    pub fn set_pulsate(&self) -> Result<(), RazerError> {
        self.set_capability("lighting_pulsate", &[])
    }

    pub fn profile_led(&self, led: ProfileLed) -> Result<bool, RazerError> {
        self.get_capability(led.capability_id())
    }

    pub fn set_profile_led(&self, led: ProfileLed, on: bool) -> Result<(), RazerError> {
        self.set_capability(led.capability_id(), &[on.into()])
    }

    /// Name of the zone driving hardware LED `led`, if the device has one.
    pub fn led_name_for(&self, led: LedId) -> Result<Option<&'static str>, RazerError> {
        Ok(self.capabilities()?.led_name_for(led))
    }

    /// Handles for every lighting zone the device advertises.
    pub fn leds(&self) -> Result<Vec<Led<'_>>, RazerError> {
        Ok(self
            .capabilities()?
            .zones()
            .into_iter()
            .map(|zone| Led::new(self, zone))
            .collect())
    }

    pub fn led(&self, zone: LightingZone) -> Result<Option<Led<'_>>, RazerError> {
        Ok(self
            .capabilities()?
            .zones()
            .contains(&zone)
            .then(|| Led::new(self, zone)))
    }
}

fn pair(what: &str, values: &[u16]) -> Result<(u16, u16), RazerError> {
    match values {
        [a, b] => Ok((*a, *b)),
        _ => Err(RazerError::MalformedReply(format!(
            "{what} needs 2 values, got {}",
            values.len()
        ))),
    }
}

fn parse_device_mode(raw: &str) -> Result<(u8, u8), RazerError> {
    let malformed = || RazerError::MalformedReply(format!("'{raw}' is not a device mode"));
    let (mode, param) = raw.split_once(':').ok_or_else(malformed)?;
    Ok((
        mode.trim().parse().map_err(|_| malformed())?,
        param.trim().parse().map_err(|_| malformed())?,
    ))
}
