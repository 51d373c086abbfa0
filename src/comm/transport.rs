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

use crate::codec::WireValue;
use crate::error::RazerError;

/// Callback invoked with the arguments of a received signal.
pub type SignalHandler = Box<dyn Fn(Vec<WireValue>) + Send + Sync + 'static>;

/// Request/response access to remote objects.
///
/// Implementations block the calling thread until the reply arrives. They do not retry and do
/// not interpret replies: a reply is returned as the list of its arguments, and classification of
/// the outcome is left to [`crate::Gateway`].
///
/// Errors are expected to be either [`RazerError::TransportFailure`], when the bus itself could not
/// deliver the request or the reply, or [`RazerError::RemoteFault`], when the remote object
/// answered with an error.
pub trait Transport: Send + Sync {
    /// Calls `method` of `interface` on the object at `target`.
    ///
    /// # Arguments
    ///
    /// * `target`: object path of the remote object, e.g.
    ///   `/io/github/openrazer1/devices/XX0000000000`
    /// * `interface`: interface the method belongs to
    /// * `method`: method name
    /// * `args`: the argument tuple, in order
    ///
    /// # Returns: `Result<Vec<WireValue>, RazerError>`
    /// * `Ok(Vec<WireValue>)` - the reply arguments, empty for methods without a return value
    /// * `Err(RazerError)` - the call could not be delivered or the remote object failed it
    fn call(
        &self,
        target: &str,
        interface: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, RazerError>;

    /// Reads property `name` of `interface` on `target`.
    fn read_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
    ) -> Result<WireValue, RazerError>;

    /// Writes property `name` of `interface` on `target`.
    fn write_property(
        &self,
        target: &str,
        interface: &str,
        name: &str,
        value: WireValue,
    ) -> Result<(), RazerError>;

    /// Registers `handler` for `signal` emitted by `target` on `interface`.
    ///
    /// The handler stays registered for the lifetime of the transport and may be invoked from a
    /// thread other than the one that subscribed.
    fn subscribe(
        &self,
        target: &str,
        interface: &str,
        signal: &str,
        handler: SignalHandler,
    ) -> Result<(), RazerError>;
}
