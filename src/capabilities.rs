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

//! The capability table and its per-device resolution.
//!
//! A capability is a stable identifier such as `lighting_breath_dual` or `poll_rate` together with
//! the interface and method that drive it. The table is compiled in and never changes. What varies
//! per device is only which identifiers are present, decided by introspecting the device object:
//! a capability is present when its interface is exported and the method it is gated on (the
//! setter, or the getter for read-only capabilities) is listed on that interface. The daemon
//! exports the same interface names for every device and only varies the methods, so checking the
//! interface alone is not enough.

use crate::codec::{Effect, LedId};
use crate::config;
use crate::error::RazerError;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// An addressable lighting zone of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LightingZone {
    /// The main lighting, per-key matrix on keyboards.
    Chroma,
    Logo,
    Scroll,
    Backlight,
}

impl LightingZone {
    /// Resolution order. When two zones share a [`LedId`] the earlier one names it.
    pub const ALL: [LightingZone; 4] = [
        LightingZone::Chroma,
        LightingZone::Logo,
        LightingZone::Scroll,
        LightingZone::Backlight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LightingZone::Chroma => "Chroma",
            LightingZone::Logo => "Logo",
            LightingZone::Scroll => "Scroll",
            LightingZone::Backlight => "Backlight",
        }
    }

    pub fn led_id(self) -> LedId {
        match self {
            LightingZone::Chroma | LightingZone::Backlight => LedId::Backlight,
            LightingZone::Logo => LedId::Logo,
            LightingZone::Scroll => LedId::ScrollWheel,
        }
    }
}

impl fmt::Display for LightingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightingZone {
    type Err = RazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LightingZone::ALL
            .into_iter()
            .find(|z| z.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RazerError::InvalidArgument(format!("unknown lighting zone '{s}'")))
    }
}

/// Zone settings that are not effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneProperty {
    Active,
    Brightness,
    CurrentEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Effect(Effect),
    ZoneProperty(ZoneProperty),
    /// A device setting with a getter, a setter, or both.
    Property,
    /// A one-shot request without a readable state.
    Action,
}

/// Shape of the arguments a capability's setter takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    None,
    Colors(u8),
    Direction,
    Speed,
    ColorsAndSpeed(u8),
    ColorsAndRefreshRate(u8),
    Flag,
    Scalar,
    Pair,
    Frame,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::None => f.write_str("none"),
            Arity::Colors(1) => f.write_str("1 color"),
            Arity::Colors(n) => write!(f, "{n} colors"),
            Arity::Direction => f.write_str("direction"),
            Arity::Speed => f.write_str("speed"),
            Arity::ColorsAndSpeed(0) => f.write_str("speed"),
            Arity::ColorsAndSpeed(n) => write!(f, "{n} color(s) + speed"),
            Arity::ColorsAndRefreshRate(0) => f.write_str("refresh rate"),
            Arity::ColorsAndRefreshRate(n) => write!(f, "{n} color(s) + refresh rate"),
            Arity::Flag => f.write_str("flag"),
            Arity::Scalar => f.write_str("value"),
            Arity::Pair => f.write_str("2 values"),
            Arity::Frame => f.write_str("frame"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub id: &'static str,
    pub kind: CapabilityKind,
    pub arity: Arity,
    pub interface: &'static str,
    pub setter: Option<&'static str>,
    pub getter: Option<&'static str>,
    pub zone: Option<LightingZone>,
}

impl Capability {
    /// Setter and getter, whichever exist.
    pub fn methods(&self) -> impl Iterator<Item = &'static str> {
        self.setter.into_iter().chain(self.getter)
    }
}

const fn effect(
    id: &'static str,
    zone: LightingZone,
    effect: Effect,
    arity: Arity,
    interface: &'static str,
    method: &'static str,
) -> Capability {
    Capability {
        id,
        kind: CapabilityKind::Effect(effect),
        arity,
        interface,
        setter: Some(method),
        getter: None,
        zone: Some(zone),
    }
}

const fn zone_property(
    id: &'static str,
    zone: LightingZone,
    property: ZoneProperty,
    interface: &'static str,
    setter: Option<&'static str>,
    getter: &'static str,
) -> Capability {
    let arity = match property {
        ZoneProperty::Active => Arity::Flag,
        ZoneProperty::Brightness => Arity::Scalar,
        ZoneProperty::CurrentEffect => Arity::None,
    };
    Capability {
        id,
        kind: CapabilityKind::ZoneProperty(property),
        arity,
        interface,
        setter,
        getter: Some(getter),
        zone: Some(zone),
    }
}

const fn property(
    id: &'static str,
    arity: Arity,
    interface: &'static str,
    setter: Option<&'static str>,
    getter: Option<&'static str>,
) -> Capability {
    Capability {
        id,
        kind: CapabilityKind::Property,
        arity,
        interface,
        setter,
        getter,
        zone: None,
    }
}

const fn action(
    id: &'static str,
    arity: Arity,
    interface: &'static str,
    method: &'static str,
) -> Capability {
    Capability {
        id,
        kind: CapabilityKind::Action,
        arity,
        interface,
        setter: Some(method),
        getter: None,
        zone: None,
    }
}

use Arity::{Colors, ColorsAndRefreshRate, ColorsAndSpeed, Direction};
use LightingZone::{Backlight, Chroma, Logo, Scroll};

/// Every capability the client knows how to drive.
#[rustfmt::skip]
pub static CAPABILITIES: &[Capability] = &[
    // Main lighting
    effect("lighting_none", Chroma, Effect::None, Arity::None, config::CHROMA_INTERFACE, "setNone"),
    effect("lighting_static", Chroma, Effect::Static, Colors(1), config::CHROMA_INTERFACE, "setStatic"),
    effect("lighting_breath_single", Chroma, Effect::BreathSingle, Colors(1), config::CHROMA_INTERFACE, "setBreathSingle"),
    effect("lighting_breath_dual", Chroma, Effect::BreathDual, Colors(2), config::CHROMA_INTERFACE, "setBreathDual"),
    effect("lighting_breath_triple", Chroma, Effect::BreathTriple, Colors(3), config::CHROMA_INTERFACE, "setBreathTriple"),
    effect("lighting_breath_random", Chroma, Effect::BreathRandom, Arity::None, config::CHROMA_INTERFACE, "setBreathRandom"),
    effect("lighting_wave", Chroma, Effect::Wave, Direction, config::CHROMA_INTERFACE, "setWave"),
    effect("lighting_reactive", Chroma, Effect::Reactive, ColorsAndSpeed(1), config::CHROMA_INTERFACE, "setReactive"),
    effect("lighting_spectrum", Chroma, Effect::Spectrum, Arity::None, config::CHROMA_INTERFACE, "setSpectrum"),
    effect("lighting_starlight_single", Chroma, Effect::StarlightSingle, ColorsAndSpeed(1), config::CHROMA_INTERFACE, "setStarlightSingle"),
    effect("lighting_starlight_dual", Chroma, Effect::StarlightDual, ColorsAndSpeed(2), config::CHROMA_INTERFACE, "setStarlightDual"),
    effect("lighting_starlight_random", Chroma, Effect::StarlightRandom, Arity::Speed, config::CHROMA_INTERFACE, "setStarlightRandom"),
    effect("lighting_ripple", Chroma, Effect::Ripple, ColorsAndRefreshRate(1), config::CUSTOM_INTERFACE, "setRipple"),
    effect("lighting_ripple_random", Chroma, Effect::RippleRandom, ColorsAndRefreshRate(0), config::CUSTOM_INTERFACE, "setRippleRandomColour"),
    zone_property("brightness", Chroma, ZoneProperty::Brightness, config::BRIGHTNESS_INTERFACE, Some("setBrightness"), "getBrightness"),
    action("lighting_led_matrix", Arity::Frame, config::CHROMA_INTERFACE, "setKeyRow"),
    action("lighting_custom", Arity::None, config::CHROMA_INTERFACE, "setCustom"),
    action("lighting_static_bw2013", Arity::None, config::BW2013_INTERFACE, "setStatic"),
    action("lighting_pulsate", Arity::None, config::BW2013_INTERFACE, "setPulsate"),
    // Logo
    effect("lighting_logo_none", Logo, Effect::None, Arity::None, config::LOGO_INTERFACE, "setLogoNone"),
    effect("lighting_logo_static", Logo, Effect::Static, Colors(1), config::LOGO_INTERFACE, "setLogoStatic"),
    effect("lighting_logo_blinking", Logo, Effect::Blinking, Colors(1), config::LOGO_INTERFACE, "setLogoBlinking"),
    effect("lighting_logo_pulsate", Logo, Effect::Pulsate, Colors(1), config::LOGO_INTERFACE, "setLogoPulsate"),
    effect("lighting_logo_spectrum", Logo, Effect::Spectrum, Arity::None, config::LOGO_INTERFACE, "setLogoSpectrum"),
    effect("lighting_logo_reactive", Logo, Effect::Reactive, ColorsAndSpeed(1), config::LOGO_INTERFACE, "setLogoReactive"),
    effect("lighting_logo_breath_single", Logo, Effect::BreathSingle, Colors(1), config::LOGO_INTERFACE, "setLogoBreathSingle"),
    effect("lighting_logo_breath_dual", Logo, Effect::BreathDual, Colors(2), config::LOGO_INTERFACE, "setLogoBreathDual"),
    effect("lighting_logo_breath_random", Logo, Effect::BreathRandom, Arity::None, config::LOGO_INTERFACE, "setLogoBreathRandom"),
    zone_property("lighting_logo_active", Logo, ZoneProperty::Active, config::LOGO_INTERFACE, Some("setLogoActive"), "getLogoActive"),
    zone_property("lighting_logo_effect", Logo, ZoneProperty::CurrentEffect, config::LOGO_INTERFACE, None, "getLogoEffect"),
    zone_property("lighting_logo_brightness", Logo, ZoneProperty::Brightness, config::LOGO_INTERFACE, Some("setLogoBrightness"), "getLogoBrightness"),
    // Scroll wheel
    effect("lighting_scroll_none", Scroll, Effect::None, Arity::None, config::SCROLL_INTERFACE, "setScrollNone"),
    effect("lighting_scroll_static", Scroll, Effect::Static, Colors(1), config::SCROLL_INTERFACE, "setScrollStatic"),
    effect("lighting_scroll_blinking", Scroll, Effect::Blinking, Colors(1), config::SCROLL_INTERFACE, "setScrollBlinking"),
    effect("lighting_scroll_pulsate", Scroll, Effect::Pulsate, Colors(1), config::SCROLL_INTERFACE, "setScrollPulsate"),
    effect("lighting_scroll_spectrum", Scroll, Effect::Spectrum, Arity::None, config::SCROLL_INTERFACE, "setScrollSpectrum"),
    effect("lighting_scroll_reactive", Scroll, Effect::Reactive, ColorsAndSpeed(1), config::SCROLL_INTERFACE, "setScrollReactive"),
    effect("lighting_scroll_breath_single", Scroll, Effect::BreathSingle, Colors(1), config::SCROLL_INTERFACE, "setScrollBreathSingle"),
    effect("lighting_scroll_breath_dual", Scroll, Effect::BreathDual, Colors(2), config::SCROLL_INTERFACE, "setScrollBreathDual"),
    effect("lighting_scroll_breath_random", Scroll, Effect::BreathRandom, Arity::None, config::SCROLL_INTERFACE, "setScrollBreathRandom"),
    zone_property("lighting_scroll_active", Scroll, ZoneProperty::Active, config::SCROLL_INTERFACE, Some("setScrollActive"), "getScrollActive"),
    zone_property("lighting_scroll_effect", Scroll, ZoneProperty::CurrentEffect, config::SCROLL_INTERFACE, None, "getScrollEffect"),
    zone_property("lighting_scroll_brightness", Scroll, ZoneProperty::Brightness, config::SCROLL_INTERFACE, Some("setScrollBrightness"), "getScrollBrightness"),
    // Backlight
    effect("lighting_backlight_static", Backlight, Effect::Static, Colors(1), config::BACKLIGHT_INTERFACE, "setBacklightStatic"),
    effect("lighting_backlight_spectrum", Backlight, Effect::Spectrum, Arity::None, config::BACKLIGHT_INTERFACE, "setBacklightSpectrum"),
    zone_property("lighting_backlight_active", Backlight, ZoneProperty::Active, config::BACKLIGHT_INTERFACE, Some("setBacklightActive"), "getBacklightActive"),
    zone_property("lighting_backlight_effect", Backlight, ZoneProperty::CurrentEffect, config::BACKLIGHT_INTERFACE, None, "getBacklightEffect"),
    zone_property("lighting_backlight_brightness", Backlight, ZoneProperty::Brightness, config::BACKLIGHT_INTERFACE, Some("setBacklightBrightness"), "getBacklightBrightness"),
    // Profile LEDs
    property("lighting_profile_led_red", Arity::Flag, config::PROFILE_LED_INTERFACE, Some("setRedLED"), Some("getRedLED")),
    property("lighting_profile_led_green", Arity::Flag, config::PROFILE_LED_INTERFACE, Some("setGreenLED"), Some("getGreenLED")),
    property("lighting_profile_led_blue", Arity::Flag, config::PROFILE_LED_INTERFACE, Some("setBlueLED"), Some("getBlueLED")),
    // Device settings
    property("poll_rate", Arity::Scalar, config::DEVICE_INTERFACE, Some("setPollRate"), Some("getPollRate")),
    property("dpi", Arity::Pair, config::DPI_INTERFACE, Some("setDPI"), Some("getDPI")),
    property("max_dpi", Arity::None, config::DPI_INTERFACE, None, Some("maxDPI")),
    property("battery", Arity::None, config::POWER_INTERFACE, None, Some("getBattery")),
    property("charging", Arity::None, config::POWER_INTERFACE, None, Some("isCharging")),
    action("idle_time", Arity::Scalar, config::POWER_INTERFACE, "setIdleTime"),
    action("low_battery_threshold", Arity::Scalar, config::POWER_INTERFACE, "setLowBatteryThreshold"),
    property("device_mode", Arity::Pair, config::MISC_INTERFACE, Some("setDeviceMode"), Some("getDeviceMode")),
    property("razer_urls", Arity::None, config::MISC_INTERFACE, None, Some("getRazerUrls")),
    property("vid_pid", Arity::None, config::MISC_INTERFACE, None, Some("getVidPid")),
    property("dedicated_macro_keys", Arity::None, config::MISC_INTERFACE, None, Some("hasDedicatedMacroKeys")),
    property("has_matrix", Arity::None, config::MISC_INTERFACE, None, Some("hasMatrix")),
    property("matrix_dimensions", Arity::None, config::MISC_INTERFACE, None, Some("getMatrixDimensions")),
    property("keyboard_layout", Arity::None, config::DEVICE_INTERFACE, None, Some("getKeyboardLayout")),
    property("mug", Arity::None, config::MUG_INTERFACE, None, Some("isMugPresent")),
];

/// Looks a capability up by identifier.
pub fn lookup(id: &str) -> Option<&'static Capability> {
    CAPABILITIES.iter().find(|c| c.id == id)
}

/// The capability implementing `effect` on `zone`, if the table has one.
pub fn effect_capability(zone: LightingZone, effect: Effect) -> Option<&'static Capability> {
    CAPABILITIES
        .iter()
        .find(|c| c.zone == Some(zone) && c.kind == CapabilityKind::Effect(effect))
}

/// The capability implementing `property` on `zone`, if the table has one.
pub fn zone_property_capability(
    zone: LightingZone,
    property: ZoneProperty,
) -> Option<&'static Capability> {
    CAPABILITIES
        .iter()
        .find(|c| c.zone == Some(zone) && c.kind == CapabilityKind::ZoneProperty(property))
}

/// Interfaces of an introspected object, each with the names of its methods.
pub type InterfaceMap = BTreeMap<String, BTreeSet<String>>;

/// Parses the XML returned by `org.freedesktop.DBus.Introspectable.Introspect`.
///
/// # Returns: `Result<InterfaceMap, RazerError>`
/// * `Ok(InterfaceMap)` - interface name to method names
/// * `Err(RazerError::MalformedReply)` - the document is not valid introspection data
pub fn parse_introspection(xml: &str) -> Result<InterfaceMap, RazerError> {
    let node = zbus_xml::Node::from_reader(xml.as_bytes())
        .map_err(|e| RazerError::MalformedReply(format!("invalid introspection data: {e}")))?;
    Ok(node
        .interfaces()
        .iter()
        .map(|interface| {
            let methods = interface
                .methods()
                .iter()
                .map(|m| m.name().to_string())
                .collect();
            (interface.name().to_string(), methods)
        })
        .collect())
}

/// The capabilities one device advertises.
///
/// A capability is present when any of its methods is exported. Reads and writes are tracked
/// separately since the daemon may export only one side of a getter/setter pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    ids: BTreeSet<&'static str>,
    readable: BTreeSet<&'static str>,
    writable: BTreeSet<&'static str>,
}

impl CapabilitySet {
    /// Selects the table entries with at least one method exported on their interface.
    /// Interfaces the table does not know are ignored.
    pub fn from_interfaces(interfaces: &InterfaceMap) -> Self {
        let mut set = CapabilitySet::default();
        for capability in CAPABILITIES {
            let Some(methods) = interfaces.get(capability.interface) else {
                continue;
            };
            let exported = |method: Option<&str>| method.is_some_and(|m| methods.contains(m));
            set.insert(
                capability,
                exported(capability.getter),
                exported(capability.setter),
            );
        }
        debug!("resolved {} capabilities: {:?}", set.ids.len(), set.ids);
        set
    }

    /// A set holding the named capabilities with all of their methods.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let wanted: BTreeSet<&str> = ids.into_iter().collect();
        let mut set = CapabilitySet::default();
        for capability in CAPABILITIES.iter().filter(|c| wanted.contains(c.id)) {
            set.insert(
                capability,
                capability.getter.is_some(),
                capability.setter.is_some(),
            );
        }
        set
    }

    fn insert(&mut self, capability: &'static Capability, readable: bool, writable: bool) {
        if readable {
            self.readable.insert(capability.id);
        }
        if writable {
            self.writable.insert(capability.id);
        }
        if readable || writable {
            self.ids.insert(capability.id);
        }
    }

    /// Whether the getter of `id` is exported.
    pub fn can_read(&self, id: &str) -> bool {
        self.readable.contains(id)
    }

    /// Whether the setter of `id` is exported.
    pub fn can_write(&self, id: &str) -> bool {
        self.writable.contains(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The present capabilities, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Capability> + '_ {
        CAPABILITIES.iter().filter(|c| self.ids.contains(c.id))
    }

    /// Zones with at least one present capability, in resolution order.
    pub fn zones(&self) -> Vec<LightingZone> {
        LightingZone::ALL
            .into_iter()
            .filter(|zone| self.iter().any(|c| c.zone == Some(*zone)))
            .collect()
    }

    pub fn effects(&self, zone: LightingZone) -> Vec<Effect> {
        self.iter()
            .filter(|c| c.zone == Some(zone))
            .filter_map(|c| match c.kind {
                CapabilityKind::Effect(effect) => Some(effect),
                _ => None,
            })
            .collect()
    }

    /// The present zone driving the hardware LED `led`. Chroma wins over Backlight since both
    /// drive [`LedId::Backlight`].
    pub fn zone_for(&self, led: LedId) -> Option<LightingZone> {
        self.zones().into_iter().find(|zone| zone.led_id() == led)
    }

    pub fn led_name_for(&self, led: LedId) -> Option<&'static str> {
        self.zone_for(led).map(LightingZone::name)
    }
}
