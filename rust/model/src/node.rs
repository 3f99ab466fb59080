// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analytical node records.

use serde::{Deserialize, Serialize};

use crate::units::LengthUnit;

/// A point in the idealized structural graph.
///
/// Created once per host analytical node during an export pass and never
/// mutated afterwards. `id` is the host's numeric element id (absent when
/// the host could not report one); `unique_id` is the stable identifier
/// that survives file round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Option<i64>,
    pub unique_id: String,
    /// Position in output units, exactly three components.
    pub position: [f64; 3],
    pub units: LengthUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Node {
    pub fn new(id: Option<i64>, unique_id: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            id,
            unique_id: unique_id.into(),
            position,
            units: LengthUnit::Meters,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_serializes_without_status_when_absent() {
        let node = Node::new(Some(11), "uid-11", [0.0, 1.0, 2.0]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], 11);
        assert_eq!(json["units"], "meters");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn node_id_may_be_null() {
        let node = Node::new(None, "uid-x", [0.0, 0.0, 0.0]);
        let json = serde_json::to_value(&node).unwrap();
        assert!(json["id"].is_null());
    }
}
