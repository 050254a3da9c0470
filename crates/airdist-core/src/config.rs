// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-tunable settings for the lookup endpoint and search behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub locale: String,
    pub location_types: String,
    pub result_limit: u32,
    /// Country code a record's city must belong to (e.g. "US").
    pub country: String,
    /// Queries need strictly more characters than this before a lookup is issued.
    pub min_query_len: usize,
    pub debounce_ms: u64,
    /// `None` lets a hung request wait forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.skypicker.com/locations".to_string(),
            locale: "en-US".to_string(),
            location_types: "airport".to_string(),
            result_limit: 10,
            country: "US".to_string(),
            min_query_len: 2,
            debounce_ms: 250,
            request_timeout_secs: Some(10),
        }
    }
}

impl Settings {
    /// Loads `settings.json` from the config root, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Loads settings from `path`. A missing file is normal; an unreadable or
    /// invalid one is logged and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file; using defaults; path={}", path.display());
            return Self::default();
        }

        match Self::read(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Ignoring unreadable settings file; using defaults; path={} error={}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn default_path() -> PathBuf {
        crate::get_config_root().join(SETTINGS_FILE)
    }
}
