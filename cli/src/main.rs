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

//! `razer` - command line client for the OpenRazer daemon.
//!
//! Every subcommand connects to the daemon through `openrazer_client`, performs one request and
//! prints the result. Devices are selected by serial number, object path, or their index in the
//! output of `razer list`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (`trace`, `debug`, `info`, `warn`, `error`
//!   or `off`). Defaults to `info`

mod effect;
mod settings;
mod status;
mod watch;

use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use openrazer_client::{Bus, LightingZone, Manager};

#[derive(Parser, Debug)]
#[command(name = "razer")]
#[command(bin_name = "razer")]
#[command(about = "Control Razer peripherals through the OpenRazer daemon")]
struct Cli {
    #[arg(
        long = "system",
        help = "talk to a daemon on the system bus instead of the session bus"
    )]
    system: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Daemon reachability, version and service status
    Status,
    /// Connected devices with their lighting zones
    List,
    /// Capabilities a device advertises
    Caps { device: String },
    /// Apply a lighting effect to a zone
    Effect {
        device: String,
        /// chroma, logo, scroll or backlight
        zone: LightingZone,
        /// e.g. static, breath_dual, wave, reactive, starlight_random
        effect: openrazer_client::codec::Effect,
        /// colours as #rrggbb or r,g,b
        colors: Vec<openrazer_client::codec::Rgb>,
        #[arg(long, value_enum, default_value_t = Direction::Left)]
        direction: Direction,
        /// reactive speed 1-4 or starlight speed 1-3
        #[arg(long)]
        speed: Option<u8>,
        /// ripple refresh rate in seconds
        #[arg(long)]
        refresh_rate: Option<f64>,
    },
    /// Show or set DPI
    Dpi {
        device: String,
        x: Option<u16>,
        y: Option<u16>,
    },
    /// Show or set the poll rate in Hz
    PollRate { device: String, hz: Option<u16> },
    /// Battery level and charging state
    Battery { device: String },
    /// Print device added/removed notifications until interrupted
    Watch,
    /// Enable the daemon's systemd user unit
    EnableDaemon,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    debug!("parsed cli command with {cli:?}");
    let bus = if cli.system { Bus::System } else { Bus::Session };

    // Service control does not need a bus connection.
    if let Commands::EnableDaemon = cli.command {
        println!("{}", status::enable_daemon_handler()?);
        return Ok(());
    }

    let manager = Manager::connect(bus)?;
    let result = match cli.command {
        Commands::Status => status::status_handler(&manager),
        Commands::List => status::list_handler(&manager),
        Commands::Caps { device } => status::caps_handler(&manager, &device),
        Commands::Effect {
            device,
            zone,
            effect,
            colors,
            direction,
            speed,
            refresh_rate,
        } => effect::effect_handler(
            &manager,
            &device,
            zone,
            effect,
            &colors,
            direction,
            speed,
            refresh_rate,
        ),
        Commands::Dpi { device, x, y } => settings::dpi_handler(&manager, &device, x, y),
        Commands::PollRate { device, hz } => settings::poll_rate_handler(&manager, &device, hz),
        Commands::Battery { device } => settings::battery_handler(&manager, &device),
        Commands::Watch => watch::watch_handler(&manager),
        Commands::EnableDaemon => status::enable_daemon_handler(),
    };
    println!("{}", result?);
    Ok(())
}
