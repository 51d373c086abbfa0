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

//! Status of the daemon's systemd user unit.
//!
//! These helpers shell out to `systemctl --user`. They do not talk to the daemon itself and work
//! whether or not it is running.

use crate::config;
use crate::error::RazerError;
use log::{trace, warn};
use std::fmt;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaemonStatus {
    /// The unit starts with the user session.
    Enabled,
    Disabled,
    /// Neither the unit nor the daemon binary could be found.
    NotInstalled,
    /// `systemctl` is unavailable but the daemon is installed, e.g. on a distribution without
    /// systemd.
    NoServiceManager,
    Unknown,
}

impl fmt::Display for DaemonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DaemonStatus::Enabled => "enabled",
            DaemonStatus::Disabled => "disabled",
            DaemonStatus::NotInstalled => "not installed",
            DaemonStatus::NoServiceManager => "no service manager",
            DaemonStatus::Unknown => "unknown",
        })
    }
}

/// Captured result of one `systemctl` run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

fn run_systemctl(action: &str) -> Result<CommandOutput, RazerError> {
    trace!(
        "running {} --user {action} {}",
        config::SYSTEMCTL,
        config::DAEMON_UNIT,
    );
    let output = Command::new(config::SYSTEMCTL)
        .args(["--user", action, config::DAEMON_UNIT])
        .output()
        .map_err(|e| RazerError::ServiceControl {
            command: format!("{} --user {action}", config::SYSTEMCTL),
            e,
        })?;
    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}

/// Classifies the result of `systemctl --user is-enabled`.
///
/// # Arguments
///
/// * `is_enabled`: the captured output, or `None` when `systemctl` could not be started
/// * `daemon_installed`: whether the daemon binary exists, consulted only when `systemctl` could
///   not be started
pub fn classify_status(is_enabled: Option<&CommandOutput>, daemon_installed: bool) -> DaemonStatus {
    let Some(output) = is_enabled else {
        return if daemon_installed {
            DaemonStatus::NoServiceManager
        } else {
            DaemonStatus::NotInstalled
        };
    };
    match output.stdout.as_str() {
        "enabled\n" => DaemonStatus::Enabled,
        "disabled\n" => DaemonStatus::Disabled,
        _ if output.stderr.contains(config::DAEMON_UNIT)
            && output.stderr.contains("No such file or directory") =>
        {
            DaemonStatus::NotInstalled
        }
        _ => {
            warn!(
                "could not tell whether the daemon is enabled; unit state: {:?}, error: {:?}",
                output.stdout, output.stderr
            );
            DaemonStatus::Unknown
        }
    }
}

pub fn daemon_status() -> DaemonStatus {
    let output = run_systemctl("is-enabled").ok();
    classify_status(output.as_ref(), Path::new(config::DAEMON_BINARY).exists())
}

/// Joins stdout and stderr, leaving out whichever is empty.
pub fn join_output(output: &CommandOutput) -> String {
    [output.stdout.trim_end(), output.stderr.trim_end()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line output of `systemctl --user status` for the daemon's unit.
pub fn daemon_status_output() -> Result<String, RazerError> {
    Ok(join_output(&run_systemctl("status")?))
}

/// Enables the unit so the daemon starts with the user session.
///
/// # Returns: `Result<bool, RazerError>`
/// * `Ok(bool)` - whether `systemctl` exited successfully
/// * `Err(RazerError::ServiceControl)` - `systemctl` could not be started
pub fn enable_daemon() -> Result<bool, RazerError> {
    Ok(run_systemctl("enable")?.success)
}
