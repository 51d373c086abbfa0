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

use crate::common::{DEVICE_PATH, MockTransport, mock};
use googletest::prelude::*;
use openrazer_client::codec::{
    Effect, EffectParams, LedEffect, LedId, ReactiveSpeed, Rgb, StarlightSpeed, WaveDirection,
    WireValue,
};
use openrazer_client::{Device, ErrorKind, Gateway, LightingZone, config};
use rstest::*;
use std::sync::Arc;

/// A keyboard with a full chroma interface, ripple, brightness, a logo and a scroll wheel.
#[fixture]
fn keyboard(mock: Arc<MockTransport>) -> (Arc<MockTransport>, Device) {
    mock.add_device(
        DEVICE_PATH,
        &[
            (
                config::CHROMA_INTERFACE,
                &[
                    "setNone",
                    "setStatic",
                    "setBreathSingle",
                    "setBreathDual",
                    "setBreathTriple",
                    "setBreathRandom",
                    "setWave",
                    "setReactive",
                    "setSpectrum",
                    "setStarlightSingle",
                    "setStarlightDual",
                    "setStarlightRandom",
                ],
            ),
            (config::CUSTOM_INTERFACE, &["setRipple", "setRippleRandomColour"]),
            (config::BRIGHTNESS_INTERFACE, &["setBrightness", "getBrightness"]),
            (
                config::LOGO_INTERFACE,
                &[
                    "setLogoStatic",
                    "setLogoActive",
                    "getLogoActive",
                    "getLogoEffect",
                    "setLogoBrightness",
                    "getLogoBrightness",
                ],
            ),
            (
                config::SCROLL_INTERFACE,
                &["setScrollBreathDual", "setScrollBreathSingle", "setScrollSpectrum"],
            ),
        ],
    );
    let device = Device::new(Gateway::new(mock.clone()), DEVICE_PATH);
    (mock, device)
}

#[gtest]
#[rstest]
fn zones_are_listed_in_order(keyboard: (Arc<MockTransport>, Device)) {
    let (_mock, device) = keyboard;
    let leds = device.leds().unwrap();
    let zones: Vec<_> = leds.iter().map(|led| led.zone()).collect();
    assert_that!(
        zones,
        elements_are![
            eq(&LightingZone::Chroma),
            eq(&LightingZone::Logo),
            eq(&LightingZone::Scroll)
        ]
    );
    assert_that!(leds[2].led_id(), eq(LedId::ScrollWheel));
    assert!(device.led(LightingZone::Backlight).unwrap().is_none());
}

#[gtest]
#[rstest]
#[case::none(EffectParams::None, "setNone", vec![])]
#[case::static_(
    EffectParams::Static(Rgb::new(12, 34, 56)),
    "setStatic",
    vec![WireValue::Byte(12), WireValue::Byte(34), WireValue::Byte(56)]
)]
#[case::breath_triple(
    EffectParams::BreathTriple(Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(7, 8, 9)),
    "setBreathTriple",
    (1..=9).map(WireValue::Byte).collect()
)]
#[case::wave(EffectParams::Wave(WaveDirection::Left), "setWave", vec![WireValue::Int32(1)])]
#[case::reactive(
    EffectParams::Reactive(Rgb::new(0, 255, 0), ReactiveSpeed::Ms2000),
    "setReactive",
    vec![WireValue::Byte(0), WireValue::Byte(255), WireValue::Byte(0), WireValue::Byte(4)]
)]
#[case::starlight_dual(
    EffectParams::StarlightDual(Rgb::new(1, 1, 1), Rgb::new(2, 2, 2), StarlightSpeed::Fast),
    "setStarlightDual",
    vec![
        WireValue::Byte(1), WireValue::Byte(1), WireValue::Byte(1),
        WireValue::Byte(2), WireValue::Byte(2), WireValue::Byte(2),
        WireValue::Byte(1),
    ]
)]
#[case::ripple(
    EffectParams::Ripple(Rgb::new(255, 0, 0), 0.01),
    "setRipple",
    vec![WireValue::Byte(255), WireValue::Byte(0), WireValue::Byte(0), WireValue::Double(0.01)]
)]
fn chroma_effects(
    keyboard: (Arc<MockTransport>, Device),
    #[case] params: EffectParams,
    #[case] method: &str,
    #[case] args: Vec<WireValue>,
) {
    let (mock, device) = keyboard;
    let led = device.led(LightingZone::Chroma).unwrap().unwrap();

    led.set_effect(&params).unwrap();

    let last = mock.last_call().unwrap();
    assert_that!(last.target, eq(DEVICE_PATH));
    assert_that!(last.method, eq(method));
    assert_that!(last.args, eq(&args));
}

#[gtest]
#[rstest]
fn ripple_lives_on_the_custom_interface(keyboard: (Arc<MockTransport>, Device)) {
    let (mock, device) = keyboard;
    let led = device.led(LightingZone::Chroma).unwrap().unwrap();

    led.set_ripple_random(0.05).unwrap();

    let last = mock.last_call().unwrap();
    assert_that!(last.interface, eq(config::CUSTOM_INTERFACE));
    assert_that!(last.method, eq("setRippleRandomColour"));
}

#[gtest]
#[rstest]
fn scroll_breath_dual_uses_its_own_method(keyboard: (Arc<MockTransport>, Device)) {
    let (mock, device) = keyboard;
    let led = device.led(LightingZone::Scroll).unwrap().unwrap();

    led.set_breath_dual(Rgb::new(255, 0, 0), Rgb::new(0, 0, 255))
        .unwrap();

    let last = mock.last_call().unwrap();
    assert_that!(last.interface, eq(config::SCROLL_INTERFACE));
    assert_that!(last.method, eq("setScrollBreathDual"));
    assert_that!(last.args.len(), eq(6));
}

#[gtest]
#[rstest]
#[case::logo_wave(LightingZone::Logo, EffectParams::Wave(WaveDirection::Right))]
#[case::logo_spectrum(LightingZone::Logo, EffectParams::Spectrum)]
#[case::scroll_static(LightingZone::Scroll, EffectParams::Static(Rgb::new(1, 2, 3)))]
#[case::chroma_blinking(LightingZone::Chroma, EffectParams::Blinking(Rgb::new(1, 2, 3)))]
fn unsupported_effect_is_not_sent(
    keyboard: (Arc<MockTransport>, Device),
    #[case] zone: LightingZone,
    #[case] params: EffectParams,
) {
    let (mock, device) = keyboard;
    let led = device.led(zone).unwrap().unwrap();

    let err = led.set_effect(&params).unwrap_err();

    assert_that!(err.kind(), eq(ErrorKind::NotSupported));
    assert_that!(mock.operation_calls(), is_empty());
}

#[gtest]
#[rstest]
fn supported_effects_per_zone(keyboard: (Arc<MockTransport>, Device)) {
    let (_mock, device) = keyboard;
    let scroll = device.led(LightingZone::Scroll).unwrap().unwrap();

    assert_that!(
        scroll.supported_effects(),
        ok(elements_are![
            eq(&Effect::Spectrum),
            eq(&Effect::BreathSingle),
            eq(&Effect::BreathDual)
        ])
    );
    assert_that!(scroll.has_effect(Effect::Wave), ok(eq(&false)));
    assert_that!(scroll.has_effect(Effect::BreathDual), ok(eq(&true)));
}

#[gtest]
#[rstest]
fn logo_state(keyboard: (Arc<MockTransport>, Device)) {
    let (mock, device) = keyboard;
    mock.reply(
        config::LOGO_INTERFACE,
        "getLogoActive",
        vec![WireValue::Bool(true)],
    );
    mock.reply(
        config::LOGO_INTERFACE,
        "getLogoEffect",
        vec![WireValue::Byte(4)],
    );
    mock.reply(
        config::LOGO_INTERFACE,
        "getLogoBrightness",
        vec![WireValue::Double(75.0)],
    );
    let logo = device.led(LightingZone::Logo).unwrap().unwrap();

    assert_that!(logo.is_active(), ok(eq(&true)));
    assert_that!(logo.current_effect(), ok(eq(&LedEffect::Spectrum)));
    assert_that!(logo.brightness(), ok(eq(&75.0)));

    logo.set_active(false).unwrap();
    assert_that!(
        mock.last_call().unwrap().args,
        elements_are![eq(&WireValue::Bool(false))]
    );
    logo.set_brightness(150.0).unwrap();
    let last = mock.last_call().unwrap();
    assert_that!(last.method, eq("setLogoBrightness"));
    assert_that!(last.args, elements_are![eq(&WireValue::Double(150.0))]);
}

#[gtest]
#[rstest]
fn unknown_current_effect_is_malformed(keyboard: (Arc<MockTransport>, Device)) {
    let (mock, device) = keyboard;
    mock.reply(
        config::LOGO_INTERFACE,
        "getLogoEffect",
        vec![WireValue::Byte(3)],
    );
    let logo = device.led(LightingZone::Logo).unwrap().unwrap();

    let err = logo.current_effect().unwrap_err();

    assert_that!(err.kind(), eq(ErrorKind::MalformedReply));
}

#[gtest]
#[rstest]
fn chroma_brightness_uses_the_brightness_interface(keyboard: (Arc<MockTransport>, Device)) {
    let (mock, device) = keyboard;
    mock.reply(
        config::BRIGHTNESS_INTERFACE,
        "getBrightness",
        vec![WireValue::Double(40.0)],
    );
    let chroma = device.led(LightingZone::Chroma).unwrap().unwrap();

    assert_that!(chroma.brightness(), ok(eq(&40.0)));
    assert_that!(
        mock.last_call().unwrap().interface,
        eq(config::BRIGHTNESS_INTERFACE)
    );
}

#[gtest]
#[rstest]
fn zone_without_the_property_fails_fast(keyboard: (Arc<MockTransport>, Device)) {
    let (mock, device) = keyboard;
    let chroma = device.led(LightingZone::Chroma).unwrap().unwrap();
    let scroll = device.led(LightingZone::Scroll).unwrap().unwrap();

    assert_that!(
        chroma.is_active().unwrap_err().kind(),
        eq(ErrorKind::NotSupported)
    );
    assert_that!(
        scroll.brightness().unwrap_err().kind(),
        eq(ErrorKind::NotSupported)
    );
    assert_that!(mock.operation_calls(), is_empty());
}
