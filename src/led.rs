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

//! Handle for one lighting zone of a device.

use crate::capabilities::{self, LightingZone, ZoneProperty};
use crate::codec::{
    Effect, EffectParams, LedEffect, LedId, ReactiveSpeed, Rgb, StarlightSpeed, WaveDirection,
};
use crate::device::Device;
use crate::error::RazerError;

/// A lighting zone borrowed from its [`Device`].
///
/// The handle is a view: it holds no state of its own and checks every operation against the
/// device's capability set.
#[derive(Debug, Clone, Copy)]
pub struct Led<'d> {
    device: &'d Device,
    zone: LightingZone,
}

impl<'d> Led<'d> {
    pub(crate) fn new(device: &'d Device, zone: LightingZone) -> Self {
        Led { device, zone }
    }

    pub fn device(&self) -> &'d Device {
        self.device
    }

    pub fn zone(&self) -> LightingZone {
        self.zone
    }

    pub fn led_id(&self) -> LedId {
        self.zone.led_id()
    }

    pub fn name(&self) -> &'static str {
        self.zone.name()
    }

    fn unsupported(&self, what: impl std::fmt::Display) -> RazerError {
        RazerError::NotSupported {
            capability: format!("{} {what}", self.zone),
            target: self.device.path().to_string(),
        }
    }

    pub fn has_effect(&self, effect: Effect) -> Result<bool, RazerError> {
        match capabilities::effect_capability(self.zone, effect) {
            Some(capability) => self.device.has_capability(capability.id),
            None => Ok(false),
        }
    }

    pub fn supported_effects(&self) -> Result<Vec<Effect>, RazerError> {
        Ok(self.device.capabilities()?.effects(self.zone))
    }

    /// Applies an effect with its parameters.
    ///
    /// # Arguments
    ///
    /// * `params`: the effect and its colours, speed, direction or refresh rate
    ///
    /// # Returns: `Result<(), RazerError>`
    /// * `Ok(())` - the daemon accepted the effect
    /// * `Err(RazerError::NotSupported)` - the zone does not have the effect; nothing was sent
    /// * `Err(RazerError)` - the call failed or was rejected
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use openrazer_client::{Device, LightingZone, RazerError};
    /// # use openrazer_client::codec::{EffectParams, Rgb, WaveDirection};
    /// # fn demo(device: &Device) -> Result<(), RazerError> {
    /// if let Some(led) = device.led(LightingZone::Chroma)? {
    ///     led.set_effect(&EffectParams::Wave(WaveDirection::Left))?;
    ///     led.set_effect(&EffectParams::BreathDual(Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)))?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_effect(&self, params: &EffectParams) -> Result<(), RazerError> {
        let effect = params.effect();
        let capability = capabilities::effect_capability(self.zone, effect)
            .ok_or_else(|| self.unsupported(effect))?;
        self.device.set_capability(capability.id, &params.encode())
    }

    pub fn set_none(&self) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::None)
    }

    pub fn set_static(&self, color: Rgb) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Static(color))
    }

    pub fn set_breath_single(&self, color: Rgb) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::BreathSingle(color))
    }

    pub fn set_breath_dual(&self, color: Rgb, color2: Rgb) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::BreathDual(color, color2))
    }

    pub fn set_breath_triple(
        &self,
        color: Rgb,
        color2: Rgb,
        color3: Rgb,
    ) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::BreathTriple(color, color2, color3))
    }

    pub fn set_breath_random(&self) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::BreathRandom)
    }

    pub fn set_blinking(&self, color: Rgb) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Blinking(color))
    }

    pub fn set_pulsate(&self, color: Rgb) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Pulsate(color))
    }

    pub fn set_spectrum(&self) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Spectrum)
    }

    pub fn set_wave(&self, direction: WaveDirection) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Wave(direction))
    }

    pub fn set_reactive(&self, color: Rgb, speed: ReactiveSpeed) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Reactive(color, speed))
    }

    pub fn set_starlight_single(
        &self,
        color: Rgb,
        speed: StarlightSpeed,
    ) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::StarlightSingle(color, speed))
    }

    pub fn set_starlight_dual(
        &self,
        color: Rgb,
        color2: Rgb,
        speed: StarlightSpeed,
    ) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::StarlightDual(color, color2, speed))
    }

    pub fn set_starlight_random(&self, speed: StarlightSpeed) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::StarlightRandom(speed))
    }

    /// Ripple in `color`, redrawn every `refresh_rate` seconds
    /// (see [`crate::codec::RIPPLE_REFRESH_RATE`]).
    pub fn set_ripple(&self, color: Rgb, refresh_rate: f64) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::Ripple(color, refresh_rate))
    }

    pub fn set_ripple_random(&self, refresh_rate: f64) -> Result<(), RazerError> {
        self.set_effect(&EffectParams::RippleRandom(refresh_rate))
    }

    fn property_id(&self, property: ZoneProperty) -> Result<&'static str, RazerError> {
        capabilities::zone_property_capability(self.zone, property)
            .map(|c| c.id)
            .ok_or_else(|| self.unsupported(format!("{property:?}").to_lowercase()))
    }

    pub fn is_active(&self) -> Result<bool, RazerError> {
        self.device
            .get_capability(self.property_id(ZoneProperty::Active)?)
    }

    pub fn set_active(&self, active: bool) -> Result<(), RazerError> {
        self.device
            .set_capability(self.property_id(ZoneProperty::Active)?, &[active.into()])
    }

    /// Brightness in percent, forwarded without clamping.
    pub fn brightness(&self) -> Result<f64, RazerError> {
        self.device
            .get_capability(self.property_id(ZoneProperty::Brightness)?)
    }

    pub fn set_brightness(&self, brightness: f64) -> Result<(), RazerError> {
        self.device.set_capability(
            self.property_id(ZoneProperty::Brightness)?,
            &[brightness.into()],
        )
    }

    /// The effect the zone currently shows, as reported by the firmware.
    pub fn current_effect(&self) -> Result<LedEffect, RazerError> {
        self.device
            .get_capability(self.property_id(ZoneProperty::CurrentEffect)?)
    }
}
