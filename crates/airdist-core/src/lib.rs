// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod airport;
pub mod calculator;
pub mod config;
pub mod geo;
pub mod lookup;
pub mod resolver;
pub mod selection;
pub mod viewport;

use std::path::PathBuf;

pub use airport::{Airport, AirportError};
pub use calculator::DistanceCalculator;
pub use config::Settings;
pub use geo::{BoundingBox, Coordinate};
pub use resolver::{AirportResolver, Candidates, QueryTicket, SearchBox};
pub use selection::{CalculationResult, SelectionState, Slot};
pub use viewport::{MapSurface, RouteScene};

/// Per-user configuration directory (settings and log file).
/// Falls back to `./.airdist` when the platform reports no home directory.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("com", "startux", "airdist")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".airdist"))
}
