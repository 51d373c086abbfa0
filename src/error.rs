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

//! Error type shared by every layer of the client.
//!
//! Every failure is returned to the immediate caller; nothing in this crate retries or swallows
//! an error. [`RazerError::kind`] collapses the variants into the five classes callers are
//! expected to branch on.

use log::error;
use zbus::fdo;

/// Coarse classification of a [`RazerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The device does not advertise the capability the operation needs.
    NotSupported,
    /// The bus or the connection to the daemon failed.
    TransportFailure,
    /// The daemon answered with an error reply.
    RemoteFault,
    /// The reply did not have the expected argument count or type.
    MalformedReply,
    /// Local validation failed before anything was sent.
    InvalidArgument,
}

#[derive(Debug, thiserror::Error)]
pub enum RazerError {
    #[error("RazerError::NotSupported: {target} does not support {capability}")]
    NotSupported { capability: String, target: String },
    #[error("RazerError::TransportFailure: {0}")]
    TransportFailure(String),
    #[error("RazerError::RemoteFault: {name}: {message}")]
    RemoteFault { name: String, message: String },
    #[error("RazerError::EmptyProperty: property {name} of {interface} was empty")]
    EmptyProperty { interface: String, name: String },
    #[error("RazerError::MalformedReply: {0}")]
    MalformedReply(String),
    #[error("RazerError::InvalidArgument: {0}")]
    InvalidArgument(String),
    #[error("RazerError::ServiceControl: failed to run {command}: {e}")]
    ServiceControl { command: String, e: std::io::Error },
}

impl RazerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RazerError::NotSupported { .. } => ErrorKind::NotSupported,
            RazerError::TransportFailure(..) | RazerError::ServiceControl { .. } => {
                ErrorKind::TransportFailure
            }
            RazerError::RemoteFault { .. } | RazerError::EmptyProperty { .. } => {
                ErrorKind::RemoteFault
            }
            RazerError::MalformedReply(..) => ErrorKind::MalformedReply,
            RazerError::InvalidArgument(..) => ErrorKind::InvalidArgument,
        }
    }

    /// The daemon's error name, for faults that carry one.
    pub fn remote_name(&self) -> Option<&str> {
        match self {
            RazerError::RemoteFault { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<RazerError> for fdo::Error {
    fn from(err: RazerError) -> Self {
        error!("{err}");
        match err {
            RazerError::NotSupported { .. } => fdo::Error::NotSupported(err.to_string()),
            RazerError::InvalidArgument(..) => fdo::Error::InvalidArgs(err.to_string()),
            RazerError::TransportFailure(..) => fdo::Error::NoReply(err.to_string()),
            RazerError::ServiceControl { .. } => fdo::Error::SpawnFailed(err.to_string()),
            _ => fdo::Error::Failed(err.to_string()),
        }
    }
}
