// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The section update engine.
//!
//! Reads an externally edited snapshot, resolves each referenced host
//! element, and applies target section types inside one write transaction.
//! Per-record misses (unknown symbol, dead host, rejected change) are
//! counted and skipped; any other error raised while the transaction is
//! open rolls back every mutation of the run and surfaces as fatal. That
//! is the atomicity guarantee: all attempted mutations are durably applied
//! together, or none are.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info, warn};

use strax_model::{UpdateCounts, UpdateDocument, UpdateStatus};
use strax_provider::{PhysicalInstanceElement, ProviderError, StructuralModel};

use crate::error::{Error, Result};
use crate::persist::{persist_changes, PersistOutcome};
use crate::symbols::SymbolIndex;

const TRANSACTION_NAME: &str = "Update host section types";

/// Options of an update run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Attempt synchronize-with-central for workshared models.
    pub auto_sync: bool,
    /// Folder receiving the timestamped model copy.
    pub saveas_dir: PathBuf,
    /// Recorded in the status document; the engine behaves the same
    /// either way.
    pub cli_mode: bool,
}

impl UpdateOptions {
    pub fn new(saveas_dir: impl Into<PathBuf>) -> Self {
        Self {
            auto_sync: true,
            saveas_dir: saveas_dir.into(),
            cli_mode: false,
        }
    }
}

/// Host lookup prefers the stable unique id: it survives file round-trips
/// that renumber element ids.
fn resolve_host<M: StructuralModel>(
    model: &M,
    host_id: Option<i64>,
    host_unique_id: Option<&str>,
) -> Option<PhysicalInstanceElement> {
    if let Some(unique_id) = host_unique_id {
        if let Some(instance) = model.instance_by_unique_id(unique_id) {
            return Some(instance);
        }
    }
    host_id.and_then(|id| model.instance_by_id(id))
}

/// Applies the target type to an instance unless it already matches.
///
/// Returns `Ok(true)` when the type was changed, `Ok(false)` when it
/// already matched or both change paths were rejected. Any other provider
/// error is fatal to the run.
fn change_type_if_needed<M: StructuralModel>(
    model: &mut M,
    instance_id: i64,
    symbol_id: i64,
) -> std::result::Result<bool, ProviderError> {
    if model.current_type_id(instance_id) == Some(symbol_id) {
        return Ok(false);
    }
    match model.change_instance_type(instance_id, symbol_id) {
        Ok(()) => Ok(true),
        Err(ProviderError::ChangeTypeUnavailable(_) | ProviderError::ChangeTypeFailed { .. }) => {
            match model.assign_instance_symbol(instance_id, symbol_id) {
                Ok(()) => Ok(true),
                Err(
                    ProviderError::ChangeTypeUnavailable(_)
                    | ProviderError::ChangeTypeFailed { .. },
                ) => {
                    warn!(instance = instance_id, "both type change paths rejected");
                    Ok(false)
                }
                Err(fatal) => Err(fatal),
            }
        }
        Err(fatal) => Err(fatal),
    }
}

fn apply_records<M: StructuralModel>(
    model: &mut M,
    document: &UpdateDocument,
    index: &SymbolIndex,
    counts: &mut UpdateCounts,
) -> std::result::Result<(), ProviderError> {
    for record in document.actionable_members() {
        counts.processed += 1;
        let member = record.id;

        let section = record.section.as_ref();
        let family_name = section.and_then(|s| s.family_name.as_deref());
        let type_name = section.and_then(|s| s.type_name.as_deref());
        let (Some(family_name), Some(type_name)) = (family_name, type_name) else {
            warn!(?member, "missing target family/type, skipping");
            continue;
        };

        let Some(symbol_id) = index.get(family_name, type_name) else {
            counts.missing_symbol += 1;
            warn!(?member, family_name, type_name, "target symbol not found");
            continue;
        };

        let Some(host) = resolve_host(model, record.host_id, record.host_unique_id.as_deref())
        else {
            counts.no_host += 1;
            warn!(
                ?member,
                host_id = ?record.host_id,
                host_unique_id = ?record.host_unique_id,
                "host element not resolved"
            );
            continue;
        };

        if change_type_if_needed(model, host.id, symbol_id)? {
            counts.changed += 1;
            info!(?member, host = host.id, family_name, type_name, "type changed");
        } else {
            counts.unchanged += 1;
            debug!(?member, host = host.id, "type unchanged");
        }
    }
    Ok(())
}

fn status_path_for(input_path: &Path) -> PathBuf {
    let mut name = input_path.as_os_str().to_os_string();
    name.push(".update_status.json");
    PathBuf::from(name)
}

/// Runs one section update against a model.
///
/// Fatal outcomes: unreadable input, missing transaction capability, or
/// an error inside the open transaction (which rolls back first). All
/// other conditions complete the run and are reported in the returned
/// status document, which is also written next to the input file.
pub fn run_update<M: StructuralModel>(
    model: &mut M,
    input_path: &Path,
    options: &UpdateOptions,
) -> Result<UpdateStatus> {
    info!(input = %input_path.display(), "starting section update");

    if !model.supports_transactions() {
        return Err(Error::TransactionsUnavailable);
    }

    let document =
        UpdateDocument::read_from(input_path).map_err(|err| Error::InputUnreadable {
            path: input_path.to_path_buf(),
            reason: err.to_string(),
        })?;
    info!(
        records = document.analytical_members.len(),
        "loaded update input"
    );

    let index = SymbolIndex::build(model);
    let mut counts = UpdateCounts::default();

    model
        .begin_transaction(TRANSACTION_NAME)
        .map_err(|err| match err {
            ProviderError::TransactionsUnsupported => Error::TransactionsUnavailable,
            other => Error::TransactionAborted {
                reason: other.to_string(),
            },
        })?;

    match apply_records(model, &document, &index, &mut counts) {
        Ok(()) => {
            if let Err(err) = model.commit_transaction() {
                error!(%err, "commit failed, rolling back");
                if let Err(rollback_err) = model.rollback_transaction() {
                    warn!(%rollback_err, "rollback after failed commit also failed");
                }
                return Err(Error::TransactionAborted {
                    reason: err.to_string(),
                });
            }
        }
        Err(err) => {
            error!(%err, "error inside transaction, rolling back");
            if let Err(rollback_err) = model.rollback_transaction() {
                warn!(%rollback_err, "rollback failed");
            }
            return Err(Error::TransactionAborted {
                reason: err.to_string(),
            });
        }
    }

    info!(
        processed = counts.processed,
        changed = counts.changed,
        unchanged = counts.unchanged,
        missing_symbol = counts.missing_symbol,
        no_host = counts.no_host,
        "update summary"
    );

    let outcome = if counts.changed > 0 {
        persist_changes(model, options.auto_sync, &options.saveas_dir)
    } else {
        info!("no changes, skipping persistence");
        PersistOutcome::default()
    };

    let status = UpdateStatus {
        input_path: input_path.display().to_string(),
        updated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        model_title: Some(model.title()),
        counts,
        auto_save: true,
        auto_sync: outcome.synced,
        cli_mode: options.cli_mode,
        saved: outcome.saved,
        synced: outcome.synced,
        saveas_path: outcome.saveas_path.as_ref().map(|p| p.display().to_string()),
        success: true,
    };

    let status_path = status_path_for(input_path);
    match status.write_to(&status_path) {
        Ok(()) => info!(path = %status_path.display(), "wrote status document"),
        // A failed status write never fails the run itself.
        Err(err) => warn!(%err, "failed to write status document"),
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strax_provider::{CurveGeometry, FramingSymbolElement, MemoryModel, PhysicalCategory};

    fn instance(id: i64, type_id: i64) -> PhysicalInstanceElement {
        PhysicalInstanceElement {
            id,
            unique_id: format!("inst-{id}"),
            category: PhysicalCategory::Framing,
            location_curve: Some(CurveGeometry {
                start: [0.0; 3],
                end: [10.0, 0.0, 0.0],
            }),
            type_id,
            material_param: None,
            geometry_material_ids: Vec::new(),
        }
    }

    fn symbol(id: i64, family: &str, type_name: &str) -> FramingSymbolElement {
        FramingSymbolElement {
            id,
            unique_id: format!("sym-{id}"),
            family_name: Some(family.into()),
            type_name: Some(type_name.into()),
            section_parameters: Default::default(),
            material_param: None,
        }
    }

    #[test]
    fn unique_id_wins_over_numeric_id() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_instance(instance(2, 10));

        // Numeric id points at instance 1, unique id at instance 2.
        let host = resolve_host(&model, Some(1), Some("inst-2")).unwrap();
        assert_eq!(host.id, 2);
    }

    #[test]
    fn stale_unique_id_falls_back_to_numeric_id() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));

        let host = resolve_host(&model, Some(1), Some("inst-gone")).unwrap();
        assert_eq!(host.id, 1);
    }

    #[test]
    fn change_skips_matching_type() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(10, "W-Shapes", "W12x26"));

        model.begin_transaction("t").unwrap();
        assert!(!change_type_if_needed(&mut model, 1, 10).unwrap());
    }

    #[test]
    fn rich_path_unavailable_falls_back_to_direct() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(10, "W-Shapes", "W12x26"));
        model.add_symbol(symbol(20, "W-Shapes", "W16x31"));
        model.failures.rich_change_unavailable = true;

        model.begin_transaction("t").unwrap();
        assert!(change_type_if_needed(&mut model, 1, 20).unwrap());
        assert_eq!(model.current_type_id(1), Some(20));
    }

    #[test]
    fn both_paths_rejected_is_tolerated() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(10, "W-Shapes", "W12x26"));
        model.add_symbol(symbol(20, "W-Shapes", "W16x31"));
        model.failures.rich_change_unavailable = true;
        model.failures.direct_change_fails = true;

        model.begin_transaction("t").unwrap();
        assert!(!change_type_if_needed(&mut model, 1, 20).unwrap());
        assert_eq!(model.current_type_id(1), Some(10));
    }

    #[test]
    fn vanished_instance_is_fatal() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(20, "W-Shapes", "W16x31"));
        model.failures.poison_instance = Some(1);

        model.begin_transaction("t").unwrap();
        assert!(change_type_if_needed(&mut model, 1, 20).is_err());
    }

    #[test]
    fn status_path_appends_suffix() {
        let path = status_path_for(Path::new("/tmp/updated_sections.json"));
        assert_eq!(
            path,
            PathBuf::from("/tmp/updated_sections.json.update_status.json")
        );
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = MemoryModel::new("m");
        let options = UpdateOptions::new(dir.path());

        let err = run_update(&mut model, &dir.path().join("absent.json"), &options).unwrap_err();
        assert!(matches!(err, Error::InputUnreadable { .. }));
    }

    #[test]
    fn missing_transaction_capability_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.json");
        std::fs::write(&input, r#"{"analytical_members":[]}"#).unwrap();

        let mut model = MemoryModel::new("m");
        model.failures.transactions_unsupported = true;
        let options = UpdateOptions::new(dir.path());

        let err = run_update(&mut model, &input, &options).unwrap_err();
        assert!(matches!(err, Error::TransactionsUnavailable));
    }
}
