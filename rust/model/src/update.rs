// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Update input and status documents.
//!
//! The update input is an externally edited copy of an export snapshot:
//! only the member identity, host reference and target section fields are
//! read back. The status document is overwritten on every run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Target section named by an external editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateSection {
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub type_id: Option<i64>,
}

/// One member entry of the update input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub host_id: Option<i64>,
    #[serde(default)]
    pub host_unique_id: Option<String>,
    #[serde(default)]
    pub section: Option<UpdateSection>,
}

impl UpdateRecord {
    /// Only records naming a host are processed at all; the rest are
    /// skipped before any counting happens.
    pub fn has_host_reference(&self) -> bool {
        self.host_id.is_some() || self.host_unique_id.is_some()
    }
}

/// The update input document. Unknown fields (the rest of the snapshot
/// schema) are ignored on read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    #[serde(default)]
    pub analytical_members: Vec<UpdateRecord>,
}

impl UpdateDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Records carrying a host reference, in document order.
    pub fn actionable_members(&self) -> impl Iterator<Item = &UpdateRecord> {
        self.analytical_members
            .iter()
            .filter(|r| r.has_host_reference())
    }
}

/// Per-run outcome counts of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateCounts {
    pub processed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub missing_symbol: usize,
    pub no_host: usize,
}

/// Status document written next to the update input after every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub input_path: String,
    pub updated_at: String,
    pub model_title: Option<String>,
    pub counts: UpdateCounts,
    pub auto_save: bool,
    pub auto_sync: bool,
    pub cli_mode: bool,
    pub saved: bool,
    pub synced: bool,
    pub saveas_path: Option<String>,
    pub success: bool,
}

impl UpdateStatus {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_without_host_reference_are_not_actionable() {
        let doc = UpdateDocument::from_json(
            r#"{"analytical_members":[
                {"id":1,"section":{"family_name":"W-Shapes","type_name":"W12x26"}},
                {"id":2,"host_id":100,"section":{"family_name":"W-Shapes","type_name":"W12x26"}},
                {"id":3,"host_unique_id":"abc"}
            ]}"#,
        )
        .unwrap();
        let actionable: Vec<_> = doc.actionable_members().collect();
        assert_eq!(actionable.len(), 2);
        assert_eq!(actionable[0].id, Some(2));
        assert_eq!(actionable[1].id, Some(3));
    }

    #[test]
    fn update_input_tolerates_full_snapshot_fields() {
        // External tools send back the whole snapshot record; extra fields
        // must not fail the parse.
        let doc = UpdateDocument::from_json(
            r#"{"analytical_members":[
                {"id":4,"host_id":7,"status":"ok","nodeI":1,"nodeJ":2,
                 "section":{"family_name":"HSS","type_name":"HSS6x6","type_id":55,"shape":"Tube"}}
            ],"model":"tower_a","counts":{"members_total":1,"nodes_seen":2}}"#,
        )
        .unwrap();
        assert_eq!(doc.analytical_members.len(), 1);
        let section = doc.analytical_members[0].section.as_ref().unwrap();
        assert_eq!(section.type_id, Some(55));
    }

    #[test]
    fn empty_document_parses() {
        let doc = UpdateDocument::from_json("{}").unwrap();
        assert!(doc.analytical_members.is_empty());
    }
}
