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
use openrazer_client::codec::{Effect, LedId};
use openrazer_client::{Device, Gateway, LightingZone, config};
use rstest::*;
use std::sync::Arc;

fn device(mock: &Arc<MockTransport>) -> Device {
    Device::new(Gateway::new(mock.clone()), DEVICE_PATH)
}

#[gtest]
#[rstest]
fn resolves_once(mock: Arc<MockTransport>) {
    mock.add_device(DEVICE_PATH, &[(config::CHROMA_INTERFACE, &["setStatic"])]);
    let device = device(&mock);

    let first = device.capabilities().unwrap().clone();
    let second = device.capabilities().unwrap().clone();

    assert_that!(first, eq(&second));
    assert_that!(mock.count("Introspect"), eq(1));
    assert!(device.has_capability("lighting_static").unwrap());
    assert_that!(mock.count("Introspect"), eq(1));
}

#[gtest]
#[rstest]
fn logo_and_scroll_device_has_no_matrix(mock: Arc<MockTransport>) {
    mock.add_device(
        DEVICE_PATH,
        &[
            (config::LOGO_INTERFACE, &["setLogoStatic", "setLogoActive", "getLogoActive"]),
            (config::SCROLL_INTERFACE, &["setScrollStatic", "setScrollSpectrum"]),
        ],
    );
    let device = device(&mock);

    let set = device.capabilities().unwrap();
    assert!(set.iter().all(|c| {
        c.id.starts_with("lighting_logo_") || c.id.starts_with("lighting_scroll_")
    }));
    assert!(!device.has_capability("lighting_led_matrix").unwrap());
    assert_that!(
        set.zones(),
        elements_are![eq(&LightingZone::Logo), eq(&LightingZone::Scroll)]
    );
}

#[gtest]
#[rstest]
fn led_names_follow_resolved_zones(mock: Arc<MockTransport>) {
    mock.add_device(
        DEVICE_PATH,
        &[
            (config::CHROMA_INTERFACE, &["setSpectrum"]),
            (config::BACKLIGHT_INTERFACE, &["setBacklightStatic"]),
            (config::LOGO_INTERFACE, &["setLogoStatic"]),
        ],
    );
    let device = device(&mock);

    assert_that!(
        device.led_name_for(LedId::Backlight),
        ok(some(eq(&"Chroma")))
    );
    assert_that!(device.led_name_for(LedId::Logo), ok(some(eq(&"Logo"))));
    assert_that!(device.led_name_for(LedId::ScrollWheel), ok(none()));
}

#[gtest]
#[rstest]
fn unknown_object_fails_resolution(mock: Arc<MockTransport>) {
    let device = device(&mock);
    assert_that!(
        device.capabilities(),
        err(displays_as(contains_substring("UnknownObject")))
    );
    // A failed resolution is not memoized.
    mock.add_device(DEVICE_PATH, &[(config::CHROMA_INTERFACE, &["setWave"])]);
    assert!(device.has_capability("lighting_wave").unwrap());
    assert_that!(mock.count("Introspect"), eq(2));
}

#[gtest]
#[rstest]
fn effects_per_zone(mock: Arc<MockTransport>) {
    mock.add_device(
        DEVICE_PATH,
        &[
            (config::CHROMA_INTERFACE, &["setWave", "setReactive", "setKeyRow"]),
            (config::CUSTOM_INTERFACE, &["setRipple"]),
        ],
    );
    let device = device(&mock);
    let set = device.capabilities().unwrap();

    assert_that!(
        set.effects(LightingZone::Chroma),
        elements_are![eq(&Effect::Wave), eq(&Effect::Reactive), eq(&Effect::Ripple)]
    );
    assert!(set.contains("lighting_led_matrix"));
    assert_that!(set.effects(LightingZone::Logo), is_empty());
}
