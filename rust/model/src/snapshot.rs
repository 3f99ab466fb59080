// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The export snapshot document.
//!
//! One immutable [`ExportResult`] is produced per export run and written as
//! a timestamped JSON file; prior runs are never overwritten.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::member::MemberRecord;
use crate::node::Node;
use crate::units::LengthUnit;

/// Per-run element counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCounts {
    /// Number of member records assembled (including degraded ones).
    pub members_total: usize,
    /// Number of raw node elements seen, including those with no position.
    pub nodes_seen: usize,
}

/// Root artifact of an export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    pub model: String,
    pub exported_at: String,
    pub units: LengthUnit,
    pub snap_tolerance_m: f64,
    pub counts: ExportCounts,
    pub analytical_nodes: Vec<Node>,
    pub analytical_members: Vec<MemberRecord>,
}

impl ExportResult {
    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the snapshot to `path` as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::SNAP_TOLERANCE_METERS;

    fn sample() -> ExportResult {
        ExportResult {
            model: "tower_a".into(),
            exported_at: "2026-03-02 10:15:00".into(),
            units: LengthUnit::Meters,
            snap_tolerance_m: SNAP_TOLERANCE_METERS,
            counts: ExportCounts {
                members_total: 1,
                nodes_seen: 2,
            },
            analytical_nodes: vec![
                Node::new(Some(1), "n-1", [0.0, 0.0, 0.0]),
                Node::new(Some(2), "n-2", [1.0, 0.0, 0.0]),
            ],
            analytical_members: vec![MemberRecord::no_curve(Some(3), "m-3")],
        }
    }

    #[test]
    fn snapshot_roundtrip() {
        let result = sample();
        let json = result.to_json().unwrap();
        let restored = ExportResult::from_json(&json).unwrap();
        assert_eq!(restored, result);
    }

    #[test]
    fn snapshot_schema_top_level_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        for key in [
            "model",
            "exported_at",
            "units",
            "snap_tolerance_m",
            "counts",
            "analytical_nodes",
            "analytical_members",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["counts"]["members_total"], 1);
        assert_eq!(json["counts"]["nodes_seen"], 2);
    }
}
