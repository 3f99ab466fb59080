// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence policy after a successful update.
//!
//! Entered only when at least one change was applied. For a workshared
//! model a synchronize-with-central is attempted first (best-effort); the
//! timestamped save-as copy is the primary persistence action; a failed
//! copy falls back to an in-place save. Every outcome lands in the status
//! document regardless of success.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use strax_provider::StructuralModel;

/// What the persistence steps actually achieved.
#[derive(Debug, Default)]
pub struct PersistOutcome {
    pub synced: bool,
    pub saved: bool,
    pub saveas_path: Option<PathBuf>,
}

/// File name base and extension for the timestamped copy, taken from the
/// model's own path when it has one.
fn copy_name<M: StructuralModel>(model: &M) -> (String, String) {
    let base = model
        .path_name()
        .and_then(|p| {
            Path::new(&p)
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| model.title());
    let extension = model
        .path_name()
        .and_then(|p| {
            Path::new(&p)
                .extension()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "json".into());
    (base, extension)
}

/// Runs the persistence chain for a model with applied changes.
pub fn persist_changes<M: StructuralModel>(
    model: &mut M,
    auto_sync: bool,
    saveas_dir: &Path,
) -> PersistOutcome {
    let mut outcome = PersistOutcome::default();

    if model.is_workshared() && auto_sync {
        match model.synchronize_with_central() {
            Ok(()) => {
                outcome.synced = true;
                info!("synchronized with central");
            }
            Err(err) => {
                warn!(%err, "synchronize failed, continuing with save-as");
            }
        }
    }

    if let Err(err) = std::fs::create_dir_all(saveas_dir) {
        warn!(dir = %saveas_dir.display(), %err, "could not ensure save-as directory");
    }

    let (base, extension) = copy_name(model);
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let candidate = saveas_dir.join(format!("{base}_{timestamp}.{extension}"));

    match model.save_as(&candidate) {
        Ok(()) => {
            info!(path = %candidate.display(), "timestamped copy written");
            outcome.saved = true;
            outcome.saveas_path = Some(candidate);
        }
        Err(err) => {
            warn!(%err, "save-as failed, attempting in-place save");
            match model.save() {
                Ok(()) => {
                    info!("in-place save succeeded");
                    outcome.saved = true;
                }
                Err(err) => {
                    warn!(%err, "in-place save failed");
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use strax_provider::MemoryModel;

    #[test]
    fn saveas_is_primary() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MemoryModel::new("tower_a");

        let outcome = persist_changes(&mut model, true, dir.path());
        assert!(outcome.saved);
        let path = outcome.saveas_path.unwrap();
        assert!(path.is_file());
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("tower_a_"));
        // Not workshared, so no sync was attempted.
        assert!(!outcome.synced);
    }

    #[test]
    fn sync_runs_first_for_workshared_models() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MemoryModel::new("tower_a");
        model.set_workshared(true);

        let outcome = persist_changes(&mut model, true, dir.path());
        assert!(outcome.synced);
        assert!(outcome.saved);
    }

    #[test]
    fn sync_failure_does_not_block_saveas() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MemoryModel::new("tower_a");
        model.set_workshared(true);
        model.failures.sync_fails = true;

        let outcome = persist_changes(&mut model, true, dir.path());
        assert!(!outcome.synced);
        assert!(outcome.saved);
        assert!(outcome.saveas_path.is_some());
    }

    #[test]
    fn auto_sync_off_skips_sync() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MemoryModel::new("tower_a");
        model.set_workshared(true);

        let outcome = persist_changes(&mut model, false, dir.path());
        assert!(!outcome.synced);
        assert!(outcome.saved);
    }

    #[test]
    fn saveas_failure_falls_back_to_save() {
        let dir = tempfile::tempdir().unwrap();
        let in_place = dir.path().join("tower_a.json");
        let mut model = MemoryModel::new("tower_a");
        model.set_path_name(in_place.to_str().unwrap());
        model.failures.save_as_fails = true;

        let outcome = persist_changes(&mut model, true, dir.path());
        assert!(outcome.saved);
        assert!(outcome.saveas_path.is_none());
        assert!(in_place.is_file());
    }

    #[test]
    fn all_persistence_failures_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MemoryModel::new("tower_a");
        model.failures.save_as_fails = true;
        model.failures.save_fails = true;

        let outcome = persist_changes(&mut model, true, dir.path());
        assert!(!outcome.saved);
        assert!(outcome.saveas_path.is_none());
    }

    #[test]
    fn copy_name_prefers_model_path() {
        let mut model = MemoryModel::new("title_only");
        model.set_path_name("/models/tower_a.rvtx");
        let (base, ext) = copy_name(&model);
        assert_eq!(base, "tower_a");
        assert_eq!(ext, "rvtx");
    }
}
