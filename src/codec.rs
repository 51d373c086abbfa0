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

//! Conversion between domain values and the daemon's wire arguments.
//!
//! [`WireValue`] is a bus-independent image of a D-Bus value. Domain types encode into one or more
//! wire arguments and decode back through [`FromWire`], which validates the shape of what the
//! daemon sent instead of indexing blindly into a reply. A reply that does not have the expected
//! shape is a [`RazerError::MalformedReply`].
//!
//! Numeric settings (brightness, DPI, poll rate) are forwarded exactly as given. Range checking is
//! left to the daemon, which knows the limits of each device.

use crate::error::RazerError;
use crate::WireEnum;
use std::fmt;
use std::str::FromStr;

/// Default refresh rate of the ripple effects, in seconds. Lower is smoother but costs the daemon
/// more CPU.
pub const RIPPLE_REFRESH_RATE: f64 = 0.05;

/// A single argument as it travels over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Byte(u8),
    Bool(bool),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Str(String),
    ObjectPath(String),
    /// A byte array (`ay`), kept apart from [`WireValue::Array`] since the daemon uses it for
    /// packed frame buffers.
    Bytes(Vec<u8>),
    Array(Vec<WireValue>),
    Struct(Vec<WireValue>),
    Variant(Box<WireValue>),
}

impl WireValue {
    /// Short name of the wire type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::Byte(_) => "byte",
            WireValue::Bool(_) => "boolean",
            WireValue::Int16(_) => "int16",
            WireValue::UInt16(_) => "uint16",
            WireValue::Int32(_) => "int32",
            WireValue::UInt32(_) => "uint32",
            WireValue::Int64(_) => "int64",
            WireValue::UInt64(_) => "uint64",
            WireValue::Double(_) => "double",
            WireValue::Str(_) => "string",
            WireValue::ObjectPath(_) => "object path",
            WireValue::Bytes(_) => "byte array",
            WireValue::Array(_) => "array",
            WireValue::Struct(_) => "struct",
            WireValue::Variant(_) => "variant",
        }
    }

    /// Strips any number of variant wrappers.
    pub fn unwrap_variant(&self) -> &WireValue {
        let mut value = self;
        while let WireValue::Variant(inner) = value {
            value = inner;
        }
        value
    }

    fn as_integer(&self) -> Option<i128> {
        Some(match self.unwrap_variant() {
            WireValue::Byte(v) => i128::from(*v),
            WireValue::Int16(v) => i128::from(*v),
            WireValue::UInt16(v) => i128::from(*v),
            WireValue::Int32(v) => i128::from(*v),
            WireValue::UInt32(v) => i128::from(*v),
            WireValue::Int64(v) => i128::from(*v),
            WireValue::UInt64(v) => i128::from(*v),
            _ => return None,
        })
    }

    /// True for the values a property read reports when the daemon had nothing to give.
    pub fn is_empty_string(&self) -> bool {
        matches!(self.unwrap_variant(), WireValue::Str(s) if s.is_empty())
    }
}

impl From<u8> for WireValue {
    fn from(value: u8) -> Self {
        WireValue::Byte(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

impl From<u16> for WireValue {
    fn from(value: u16) -> Self {
        WireValue::UInt16(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        WireValue::Int32(value)
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::Double(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::Str(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::Str(value)
    }
}

fn unexpected(expected: &str, value: &WireValue) -> RazerError {
    RazerError::MalformedReply(format!(
        "expected {expected} but the daemon sent {}",
        value.unwrap_variant().type_name()
    ))
}

/// A domain type that can be read back out of a single wire value.
pub trait FromWire: Sized {
    /// Human readable name of the expected shape.
    const SHAPE: &'static str;

    fn from_wire(value: &WireValue) -> Result<Self, RazerError>;
}

impl FromWire for bool {
    const SHAPE: &'static str = "boolean";

    fn from_wire(value: &WireValue) -> Result<Self, RazerError> {
        match value.unwrap_variant() {
            WireValue::Bool(b) => Ok(*b),
            _ => Err(unexpected(Self::SHAPE, value)),
        }
    }
}

macro_rules! integer_from_wire {
    ($($t:ty),*) => {
        $(
            impl FromWire for $t {
                const SHAPE: &'static str = stringify!($t);

                fn from_wire(value: &WireValue) -> Result<Self, RazerError> {
                    let raw = value.as_integer().ok_or_else(|| unexpected(Self::SHAPE, value))?;
                    <$t>::try_from(raw).map_err(|_| {
                        RazerError::MalformedReply(format!(
                            "{raw} does not fit in {}",
                            Self::SHAPE
                        ))
                    })
                }
            }
        )*
    };
}

integer_from_wire!(u8, i16, u16, i32, u32, i64, u64);

impl FromWire for f64 {
    const SHAPE: &'static str = "double";

    fn from_wire(value: &WireValue) -> Result<Self, RazerError> {
        match value.unwrap_variant() {
            WireValue::Double(d) => Ok(*d),
            _ => Err(unexpected(Self::SHAPE, value)),
        }
    }
}

impl FromWire for String {
    const SHAPE: &'static str = "string";

    fn from_wire(value: &WireValue) -> Result<Self, RazerError> {
        match value.unwrap_variant() {
            WireValue::Str(s) | WireValue::ObjectPath(s) => Ok(s.clone()),
            _ => Err(unexpected(Self::SHAPE, value)),
        }
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    const SHAPE: &'static str = "array";

    fn from_wire(value: &WireValue) -> Result<Self, RazerError> {
        match value.unwrap_variant() {
            WireValue::Array(items) => items.iter().map(T::from_wire).collect(),
            WireValue::Bytes(bytes) => bytes
                .iter()
                .map(|b| T::from_wire(&WireValue::Byte(*b)))
                .collect(),
            _ => Err(unexpected(Self::SHAPE, value)),
        }
    }
}

/// An enumeration that travels as its integral identifier.
///
/// Implemented with `#[derive(WireEnum)]` on fieldless enums with explicit discriminants.
pub trait WireEnum: Copy + Sized {
    const TYPE_NAME: &'static str;

    fn code(self) -> u8;

    fn from_code(code: u8) -> Option<Self>;
}

/// Decodes an enumeration from any integral wire value.
///
/// # Arguments
///
/// * `value`: the wire value, optionally variant-wrapped
///
/// # Returns: `Result<E, RazerError>`
/// * `Ok(E)` - the variant whose discriminant matches
/// * `Err(RazerError::MalformedReply)` - not an integer, or no variant has that discriminant
pub fn decode_enum<E: WireEnum>(value: &WireValue) -> Result<E, RazerError> {
    let raw = value
        .as_integer()
        .ok_or_else(|| unexpected(E::TYPE_NAME, value))?;
    u8::try_from(raw)
        .ok()
        .and_then(E::from_code)
        .ok_or_else(|| {
            RazerError::MalformedReply(format!("{raw} is not a valid {}", E::TYPE_NAME))
        })
}

/// An RGB colour, sent as three byte arguments in R, G, B order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn to_args(self) -> [WireValue; 3] {
        [self.r.into(), self.g.into(), self.b.into()]
    }

    /// Rebuilds a colour from exactly three channel values.
    pub fn from_channels(channels: &[WireValue]) -> Result<Self, RazerError> {
        let [r, g, b] = channels else {
            return Err(RazerError::MalformedReply(format!(
                "a colour needs 3 channels, got {}",
                channels.len()
            )));
        };
        Ok(Rgb {
            r: u8::from_wire(r)?,
            g: u8::from_wire(g)?,
            b: u8::from_wire(b)?,
        })
    }
}

impl FromWire for Rgb {
    const SHAPE: &'static str = "colour";

    fn from_wire(value: &WireValue) -> Result<Self, RazerError> {
        match value.unwrap_variant() {
            WireValue::Bytes(bytes) => {
                let channels: Vec<WireValue> = bytes.iter().map(|b| WireValue::Byte(*b)).collect();
                Rgb::from_channels(&channels)
            }
            WireValue::Array(items) | WireValue::Struct(items) => Rgb::from_channels(items),
            _ => Err(unexpected(Self::SHAPE, value)),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = RazerError;

    /// Accepts `#rrggbb`, `rrggbb` or `r,g,b`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RazerError::InvalidArgument(format!("'{s}' is not a colour"));
        if s.contains(',') {
            let parts: Vec<u8> = s
                .split(',')
                .map(|p| decimal_channel(p.trim()))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            let [r, g, b] = parts[..] else {
                return Err(invalid());
            };
            return Ok(Rgb { r, g, b });
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

// `u8::from_str` also takes a leading `+`.
fn decimal_channel(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// One row segment of a custom lighting frame.
///
/// `colors` must hold exactly one colour per column in `start_column..=end_column`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFrame {
    pub row: u8,
    pub start_column: u8,
    pub end_column: u8,
    pub colors: Vec<Rgb>,
}

impl CustomFrame {
    pub fn new(row: u8, start_column: u8, end_column: u8, colors: Vec<Rgb>) -> Self {
        CustomFrame {
            row,
            start_column,
            end_column,
            colors,
        }
    }

    pub fn column_count(&self) -> Option<usize> {
        (self.end_column >= self.start_column)
            .then(|| usize::from(self.end_column - self.start_column) + 1)
    }

    /// Packs the frame into the single byte array argument `[row, start, end, r, g, b, ...]`.
    ///
    /// # Returns: `Result<WireValue, RazerError>`
    /// * `Ok(WireValue::Bytes)` - the packed buffer
    /// * `Err(RazerError::InvalidArgument)` - the column range is reversed or the colour count
    ///   does not match it
    pub fn encode(&self) -> Result<WireValue, RazerError> {
        let columns = self.column_count().ok_or_else(|| {
            RazerError::InvalidArgument(format!(
                "end column {} is before start column {}",
                self.end_column, self.start_column
            ))
        })?;
        if self.colors.len() != columns {
            return Err(RazerError::InvalidArgument(format!(
                "columns {}..={} need {columns} colours, got {}",
                self.start_column,
                self.end_column,
                self.colors.len()
            )));
        }
        let mut buffer = Vec::with_capacity(3 + 3 * columns);
        buffer.extend([self.row, self.start_column, self.end_column]);
        for c in &self.colors {
            buffer.extend([c.r, c.g, c.b]);
        }
        Ok(WireValue::Bytes(buffer))
    }
}

/// Direction of the wave effect. Sent as a 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, WireEnum)]
#[repr(u8)]
pub enum WaveDirection {
    Left = 1,
    Right = 2,
}

/// How long a key stays lit after a press in the reactive effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, WireEnum)]
#[repr(u8)]
pub enum ReactiveSpeed {
    Ms500 = 1,
    Ms1000 = 2,
    Ms1500 = 3,
    Ms2000 = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, WireEnum)]
#[repr(u8)]
pub enum StarlightSpeed {
    Fast = 1,
    Normal = 2,
    Slow = 3,
}

/// Effect reported by the `get{Zone}Effect` getters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, WireEnum)]
#[repr(u8)]
pub enum LedEffect {
    Static = 0,
    Blinking = 1,
    Pulsate = 2,
    Spectrum = 4,
}

/// Hardware identifier of a lighting zone, as used by the device firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, WireEnum)]
#[repr(u8)]
pub enum LedId {
    Unspecified = 0x00,
    ScrollWheel = 0x01,
    Battery = 0x03,
    Logo = 0x04,
    Backlight = 0x05,
    MacroRecording = 0x07,
    GameMode = 0x08,
    KeymapRed = 0x0C,
    KeymapGreen = 0x0D,
    KeymapBlue = 0x0E,
    RightSide = 0x10,
    LeftSide = 0x11,
}

/// The lighting effects a zone may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Effect {
    None,
    Static,
    BreathSingle,
    BreathDual,
    BreathTriple,
    BreathRandom,
    Blinking,
    Pulsate,
    Spectrum,
    Wave,
    Reactive,
    StarlightSingle,
    StarlightDual,
    StarlightRandom,
    Ripple,
    RippleRandom,
}

impl Effect {
    pub const ALL: [Effect; 16] = [
        Effect::None,
        Effect::Static,
        Effect::BreathSingle,
        Effect::BreathDual,
        Effect::BreathTriple,
        Effect::BreathRandom,
        Effect::Blinking,
        Effect::Pulsate,
        Effect::Spectrum,
        Effect::Wave,
        Effect::Reactive,
        Effect::StarlightSingle,
        Effect::StarlightDual,
        Effect::StarlightRandom,
        Effect::Ripple,
        Effect::RippleRandom,
    ];

    /// Stable snake_case name, the suffix of the effect's capability identifier.
    pub fn name(self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Static => "static",
            Effect::BreathSingle => "breath_single",
            Effect::BreathDual => "breath_dual",
            Effect::BreathTriple => "breath_triple",
            Effect::BreathRandom => "breath_random",
            Effect::Blinking => "blinking",
            Effect::Pulsate => "pulsate",
            Effect::Spectrum => "spectrum",
            Effect::Wave => "wave",
            Effect::Reactive => "reactive",
            Effect::StarlightSingle => "starlight_single",
            Effect::StarlightDual => "starlight_dual",
            Effect::StarlightRandom => "starlight_random",
            Effect::Ripple => "ripple",
            Effect::RippleRandom => "ripple_random",
        }
    }

    /// Number of colours the effect takes.
    pub fn color_count(self) -> usize {
        match self {
            Effect::Static
            | Effect::BreathSingle
            | Effect::Blinking
            | Effect::Pulsate
            | Effect::Reactive
            | Effect::StarlightSingle
            | Effect::Ripple => 1,
            Effect::BreathDual | Effect::StarlightDual => 2,
            Effect::BreathTriple => 3,
            _ => 0,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = RazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('-', "_").to_ascii_lowercase();
        Effect::ALL
            .into_iter()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| RazerError::InvalidArgument(format!("unknown effect '{s}'")))
    }
}

/// An effect together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectParams {
    None,
    Static(Rgb),
    BreathSingle(Rgb),
    BreathDual(Rgb, Rgb),
    BreathTriple(Rgb, Rgb, Rgb),
    BreathRandom,
    Blinking(Rgb),
    Pulsate(Rgb),
    Spectrum,
    Wave(WaveDirection),
    Reactive(Rgb, ReactiveSpeed),
    StarlightSingle(Rgb, StarlightSpeed),
    StarlightDual(Rgb, Rgb, StarlightSpeed),
    StarlightRandom(StarlightSpeed),
    /// Colour and refresh rate in seconds.
    Ripple(Rgb, f64),
    RippleRandom(f64),
}

impl EffectParams {
    pub fn effect(&self) -> Effect {
        match self {
            EffectParams::None => Effect::None,
            EffectParams::Static(..) => Effect::Static,
            EffectParams::BreathSingle(..) => Effect::BreathSingle,
            EffectParams::BreathDual(..) => Effect::BreathDual,
            EffectParams::BreathTriple(..) => Effect::BreathTriple,
            EffectParams::BreathRandom => Effect::BreathRandom,
            EffectParams::Blinking(..) => Effect::Blinking,
            EffectParams::Pulsate(..) => Effect::Pulsate,
            EffectParams::Spectrum => Effect::Spectrum,
            EffectParams::Wave(..) => Effect::Wave,
            EffectParams::Reactive(..) => Effect::Reactive,
            EffectParams::StarlightSingle(..) => Effect::StarlightSingle,
            EffectParams::StarlightDual(..) => Effect::StarlightDual,
            EffectParams::StarlightRandom(..) => Effect::StarlightRandom,
            EffectParams::Ripple(..) => Effect::Ripple,
            EffectParams::RippleRandom(..) => Effect::RippleRandom,
        }
    }

    /// The argument tuple of the effect's setter.
    pub fn encode(&self) -> Vec<WireValue> {
        let mut args = Vec::new();
        match *self {
            EffectParams::None
            | EffectParams::BreathRandom
            | EffectParams::Spectrum => {}
            EffectParams::Static(c)
            | EffectParams::BreathSingle(c)
            | EffectParams::Blinking(c)
            | EffectParams::Pulsate(c) => args.extend(c.to_args()),
            EffectParams::BreathDual(c1, c2) => {
                args.extend(c1.to_args());
                args.extend(c2.to_args());
            }
            EffectParams::BreathTriple(c1, c2, c3) => {
                args.extend(c1.to_args());
                args.extend(c2.to_args());
                args.extend(c3.to_args());
            }
            EffectParams::Wave(direction) => args.push(i32::from(direction.code()).into()),
            EffectParams::Reactive(c, speed) => {
                args.extend(c.to_args());
                args.push(speed.code().into());
            }
            EffectParams::StarlightSingle(c, speed) => {
                args.extend(c.to_args());
                args.push(speed.code().into());
            }
            EffectParams::StarlightDual(c1, c2, speed) => {
                args.extend(c1.to_args());
                args.extend(c2.to_args());
                args.push(speed.code().into());
            }
            EffectParams::StarlightRandom(speed) => args.push(speed.code().into()),
            EffectParams::Ripple(c, refresh_rate) => {
                args.extend(c.to_args());
                args.push(refresh_rate.into());
            }
            EffectParams::RippleRandom(refresh_rate) => args.push(refresh_rate.into()),
        }
        args
    }
}
