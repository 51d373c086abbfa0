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


use crate::Direction;
use crate::status::find_device;
use openrazer_client::codec::{
    Effect, EffectParams, RIPPLE_REFRESH_RATE, ReactiveSpeed, Rgb, StarlightSpeed, WaveDirection,
    WireEnum,
};
use openrazer_client::{LightingZone, Manager, RazerError};

fn speed_or<E: WireEnum>(speed: Option<u8>, default: E) -> Result<E, RazerError> {
    match speed {
        None => Ok(default),
        Some(code) => E::from_code(code).ok_or_else(|| {
            RazerError::InvalidArgument(format!("{code} is not a valid {}", E::TYPE_NAME))
        }),
    }
}

/// Turns command line arguments into effect parameters.
///
/// The number of colours must match what the effect takes. Speeds default to the middle
/// setting and the ripple refresh rate to [`RIPPLE_REFRESH_RATE`].
pub fn build_params(
    effect: Effect,
    colors: &[Rgb],
    direction: Direction,
    speed: Option<u8>,
    refresh_rate: Option<f64>,
) -> Result<EffectParams, RazerError> {
    if colors.len() != effect.color_count() {
        return Err(RazerError::InvalidArgument(format!(
            "{effect} takes {} colour(s), got {}",
            effect.color_count(),
            colors.len()
        )));
    }
    let refresh_rate = refresh_rate.unwrap_or(RIPPLE_REFRESH_RATE);
    let color = |i: usize| colors[i];
    let params = match effect {
        Effect::None => EffectParams::None,
        Effect::Static => EffectParams::Static(color(0)),
        Effect::BreathSingle => EffectParams::BreathSingle(color(0)),
        Effect::BreathDual => EffectParams::BreathDual(color(0), color(1)),
        Effect::BreathTriple => EffectParams::BreathTriple(color(0), color(1), color(2)),
        Effect::BreathRandom => EffectParams::BreathRandom,
        Effect::Blinking => EffectParams::Blinking(color(0)),
        Effect::Pulsate => EffectParams::Pulsate(color(0)),
        Effect::Spectrum => EffectParams::Spectrum,
        Effect::Wave => EffectParams::Wave(match direction {
            Direction::Left => WaveDirection::Left,
            Direction::Right => WaveDirection::Right,
        }),
        Effect::Reactive => {
            EffectParams::Reactive(color(0), speed_or(speed, ReactiveSpeed::Ms1000)?)
        }
        Effect::StarlightSingle => {
            EffectParams::StarlightSingle(color(0), speed_or(speed, StarlightSpeed::Normal)?)
        }
        Effect::StarlightDual => EffectParams::StarlightDual(
            color(0),
            color(1),
            speed_or(speed, StarlightSpeed::Normal)?,
        ),
        Effect::StarlightRandom => {
            EffectParams::StarlightRandom(speed_or(speed, StarlightSpeed::Normal)?)
        }
        Effect::Ripple => EffectParams::Ripple(color(0), refresh_rate),
        Effect::RippleRandom => EffectParams::RippleRandom(refresh_rate),
    };
    Ok(params)
}

#[allow(clippy::too_many_arguments)]
pub fn effect_handler(
    manager: &Manager,
    selector: &str,
    zone: LightingZone,
    effect: Effect,
    colors: &[Rgb],
    direction: Direction,
    speed: Option<u8>,
    refresh_rate: Option<f64>,
) -> Result<String, RazerError> {
    let params = build_params(effect, colors, direction, speed, refresh_rate)?;
    let device = find_device(manager, selector)?;
    let led = device.led(zone)?.ok_or_else(|| RazerError::NotSupported {
        capability: zone.name().to_string(),
        target: device.path().to_string(),
    })?;
    led.set_effect(&params)?;
    Ok(format!("{effect} applied to {} on {}", zone.name(), device.path()))
}
