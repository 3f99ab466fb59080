// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runner configuration loaded from environment variables.
//!
//! Command-line flags take precedence over these; everything has a safe
//! default.

use std::path::PathBuf;

/// Environment-style overrides for the runner.
#[derive(Debug, Clone)]
pub struct Config {
    /// Export snapshot directory override.
    pub export_dir: Option<PathBuf>,
    /// Default update input document.
    pub update_input: Option<PathBuf>,
    /// Synchronize-with-central toggle for workshared models.
    pub auto_sync: bool,
    /// Folder receiving the timestamped model copy after an update.
    pub saveas_dir: Option<PathBuf>,
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => !matches!(value.to_lowercase().as_str(), "0" | "false" | "no"),
        Err(_) => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            export_dir: env_path("STRAX_EXPORT_DIR"),
            update_input: env_path("STRAX_UPDATE_JSON"),
            auto_sync: env_flag("STRAX_AUTO_SYNC", true),
            saveas_dir: env_path("STRAX_SAVEAS_DIR"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
