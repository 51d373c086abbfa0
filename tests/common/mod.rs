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

pub mod mock_transport;

pub use mock_transport::{Call, MockTransport};

use rstest::*;
use std::sync::Arc;

pub static DEVICE_PATH: &str = "/io/github/openrazer1/devices/PM1439131641838";
pub static OTHER_DEVICE_PATH: &str = "/io/github/openrazer1/devices/XX0000000001";

/// A fresh mock transport with test logging enabled.
#[fixture]
pub fn mock() -> Arc<MockTransport> {
    let _ = env_logger::builder().is_test(true).try_init();
    Arc::new(MockTransport::default())
}
