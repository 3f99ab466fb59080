// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output directory resolution.
//!
//! Walks an ordered candidate list and returns the first directory that
//! can be created and written to: explicit argument, `STRAX_EXPORT_DIR`,
//! the user's documents folder, the system temp folder. Falls back to a
//! subdirectory of the working directory when everything else fails.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

const EXPORT_DIR_ENV: &str = "STRAX_EXPORT_DIR";
const EXPORT_DIR_NAME: &str = "strax_exports";

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Creates the directory if needed and probes writability with a scratch
/// file.
fn usable(path: &Path) -> bool {
    if std::fs::create_dir_all(path).is_err() {
        return false;
    }
    let probe = path.join("__writetest.tmp");
    match std::fs::write(&probe, "ok") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// Resolves the export output directory.
///
/// `custom` (when given) is tried first, then the environment override,
/// then the default locations. The chosen directory exists and is
/// writable on return, except for the last-resort working-directory
/// fallback, which is returned even if creation fails.
pub fn ensure_output_dir(custom: Option<&Path>) -> PathBuf {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(path) = custom {
        candidates.push(path.to_path_buf());
    }
    if let Some(env_override) = std::env::var_os(EXPORT_DIR_ENV) {
        candidates.push(PathBuf::from(env_override));
    }
    if let Some(home) = home_dir() {
        candidates.push(home.join("Documents").join(EXPORT_DIR_NAME));
    }
    candidates.push(std::env::temp_dir().join(EXPORT_DIR_NAME));

    for candidate in candidates {
        if usable(&candidate) {
            debug!(dir = %candidate.display(), "resolved export directory");
            return candidate;
        }
    }

    let fallback = PathBuf::from(EXPORT_DIR_NAME);
    warn!(
        dir = %fallback.display(),
        "no export directory candidate was writable, using working directory"
    );
    let _ = std::fs::create_dir_all(&fallback);
    fallback
}
