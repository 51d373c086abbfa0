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

use crate::common::{DEVICE_PATH, MockTransport, OTHER_DEVICE_PATH, mock};
use googletest::prelude::*;
use openrazer_client::codec::WireValue;
use openrazer_client::{ErrorKind, Manager, RazerError, config};
use rstest::*;
use std::sync::{Arc, Mutex};

fn manager(mock: &Arc<MockTransport>) -> Manager {
    Manager::new(mock.clone())
}

#[gtest]
#[rstest]
fn lists_devices(mock: Arc<MockTransport>) {
    mock.set_property(
        config::MANAGER_INTERFACE,
        "Devices",
        WireValue::Array(vec![
            WireValue::ObjectPath(DEVICE_PATH.into()),
            WireValue::ObjectPath(OTHER_DEVICE_PATH.into()),
        ]),
    );
    let manager = manager(&mock);

    let devices = manager.devices().unwrap();

    let paths: Vec<_> = devices.iter().map(|d| d.path()).collect();
    assert_that!(
        paths,
        elements_are![eq(&DEVICE_PATH), eq(&OTHER_DEVICE_PATH)]
    );
    // Enumeration does not introspect.
    assert_that!(mock.count("Introspect"), eq(0));
}

#[gtest]
#[rstest]
fn no_devices_is_not_an_error(mock: Arc<MockTransport>) {
    mock.set_property(
        config::MANAGER_INTERFACE,
        "Devices",
        WireValue::Array(vec![]),
    );
    assert_that!(manager(&mock).devices(), ok(is_empty()));
}

#[gtest]
#[rstest]
fn version_and_reachability(mock: Arc<MockTransport>) {
    let manager = manager(&mock);
    assert!(!manager.is_daemon_reachable());

    mock.set_property(config::MANAGER_INTERFACE, "Version", "3.0.1".into());

    assert_that!(manager.daemon_version(), ok(eq("3.0.1")));
    assert!(manager.is_daemon_reachable());
    let last = mock.last_call().unwrap();
    assert_that!(last.target, eq(config::MANAGER_PATH));
    assert_that!(
        last.args,
        elements_are![
            eq(&WireValue::Str(config::MANAGER_INTERFACE.into())),
            eq(&WireValue::Str("Version".into()))
        ]
    );
}

#[gtest]
#[rstest]
fn empty_version_is_distinct_from_failure(mock: Arc<MockTransport>) {
    mock.set_property(config::MANAGER_INTERFACE, "Version", "".into());
    let manager = manager(&mock);

    let err = manager.daemon_version().unwrap_err();

    assert!(matches!(err, RazerError::EmptyProperty { .. }));
    assert!(!manager.is_daemon_reachable());
}

#[gtest]
#[rstest]
fn supported_devices_are_decoded(mock: Arc<MockTransport>) {
    mock.reply(
        config::DEVICES_INTERFACE,
        "supportedDevices",
        vec![r#"{"Razer BlackWidow Chroma": [5426, 515], "Razer Naga Hex": [5426, 65]}"#.into()],
    );

    let supported = manager(&mock).supported_devices().unwrap();

    assert_that!(supported.len(), eq(2));
    assert_that!(supported.get("Razer Naga Hex"), some(eq(&(5426, 65))));
}

#[gtest]
#[rstest]
fn supported_devices_reject_bad_json(mock: Arc<MockTransport>) {
    mock.reply(
        config::DEVICES_INTERFACE,
        "supportedDevices",
        vec![r#"{"Razer Naga Hex": [5426]}"#.into()],
    );
    let err = manager(&mock).supported_devices().unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::MalformedReply));
}

#[gtest]
#[rstest]
fn daemon_settings(mock: Arc<MockTransport>) {
    mock.reply(
        config::DEVICES_INTERFACE,
        "getSyncEffects",
        vec![WireValue::Bool(true)],
    );
    mock.reply(
        config::DEVICES_INTERFACE,
        "getOffOnScreensaver",
        vec![WireValue::Bool(false)],
    );
    let manager = manager(&mock);

    assert_that!(manager.sync_effects(), ok(eq(&true)));
    assert_that!(manager.turn_off_on_screensaver(), ok(eq(&false)));

    manager.set_sync_effects(false).unwrap();
    let last = mock.last_call().unwrap();
    assert_that!(last.method, eq("syncEffects"));
    assert_that!(last.args, elements_are![eq(&WireValue::Bool(false))]);

    manager.set_turn_off_on_screensaver(true).unwrap();
    assert_that!(
        mock.last_call().unwrap().method,
        eq("enableTurnOffOnScreensaver")
    );
}

#[gtest]
#[rstest]
fn transport_failure_on_settings(mock: Arc<MockTransport>) {
    mock.respond(config::DEVICES_INTERFACE, "getSyncEffects", |_| {
        Err(RazerError::TransportFailure("connection reset".into()))
    });
    let err = manager(&mock).sync_effects().unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::TransportFailure));
}

#[gtest]
#[rstest]
fn device_notifications(mock: Arc<MockTransport>) {
    let manager = manager(&mock);
    let added = Arc::new(Mutex::new(Vec::new()));
    let removed = Arc::new(Mutex::new(0));
    {
        let added = added.clone();
        manager
            .on_device_added(move |path| added.lock().unwrap().push(path))
            .unwrap();
        let removed = removed.clone();
        manager
            .on_device_removed(move |_| *removed.lock().unwrap() += 1)
            .unwrap();
    }

    mock.emit(
        "device_added",
        vec![WireValue::ObjectPath(DEVICE_PATH.into())],
    );
    mock.emit("device_added", vec![]);
    mock.emit("device_removed", vec![]);

    assert_that!(
        *added.lock().unwrap(),
        elements_are![eq(&Some(DEVICE_PATH.to_string())), eq(&None)]
    );
    assert_that!(*removed.lock().unwrap(), eq(1));
}

#[gtest]
#[rstest]
fn handles_share_the_connection(mock: Arc<MockTransport>) {
    mock.add_device(DEVICE_PATH, &[(config::DPI_INTERFACE, &["getDPI"])]);
    let manager = manager(&mock);
    let device = manager.device(DEVICE_PATH);

    assert!(device.has_capability("dpi").unwrap());
    assert_that!(mock.calls()[0].target, eq(DEVICE_PATH));
}

#[gtest]
#[rstest]
fn handler_can_enumerate_again(mock: Arc<MockTransport>) {
    mock.set_property(
        config::MANAGER_INTERFACE,
        "Devices",
        WireValue::Array(vec![WireValue::ObjectPath(DEVICE_PATH.into())]),
    );
    let manager = manager(&mock);
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let (inner, seen) = (manager.clone(), seen.clone());
        manager
            .on_device_added(move |_| {
                let paths = inner.device_paths().unwrap_or_default();
                seen.lock().unwrap().push(paths);
            })
            .unwrap();
    }

    mock.emit(
        "device_added",
        vec![WireValue::ObjectPath(DEVICE_PATH.into())],
    );

    let seen = seen.lock().unwrap().clone();
    assert_that!(seen, eq(&vec![vec![DEVICE_PATH.to_string()]]));
}
