// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analytical member records.
//!
//! A member is a line element of the idealized structural graph. Its record
//! degrades gracefully: when geometry extraction fails the record carries
//! only identity and the `no_curve` status, with every optional metadata
//! field null.

use serde::{Deserialize, Serialize};

use crate::release::Releases;
use crate::section::{MaterialInfo, SectionInfo, SectionProperties};
use crate::units::LengthUnit;

/// Outcome of node association for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Both end nodes resolved.
    Ok,
    /// Geometry extraction failed; the record is minimal.
    NoCurve,
    /// The start endpoint did not snap to any node.
    NoNodeI,
    /// The end endpoint did not snap to any node.
    NoNodeJ,
}

impl MemberStatus {
    /// Status from the node association outcome. The start endpoint is
    /// checked first, so a member missing both nodes reports `NoNodeI`.
    pub fn from_nodes(node_i: Option<i64>, node_j: Option<i64>) -> Self {
        match (node_i, node_j) {
            (Some(_), Some(_)) => MemberStatus::Ok,
            (None, _) => MemberStatus::NoNodeI,
            (_, None) => MemberStatus::NoNodeJ,
        }
    }
}

/// Straight line geometry of a member, endpoints in output units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub i: [f64; 3],
    pub j: [f64; 3],
}

/// Local coordinate triad of a member, unit vectors in global coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAxes {
    pub x: [f64; 3],
    pub y: [f64; 3],
    pub z: [f64; 3],
}

/// One analytical member of an export snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: Option<i64>,
    pub unique_id: String,
    #[serde(rename = "nodeI")]
    pub node_i: Option<i64>,
    #[serde(rename = "nodeJ")]
    pub node_j: Option<i64>,
    pub units: LengthUnit,
    pub status: MemberStatus,
    pub material: Option<MaterialInfo>,
    pub section: Option<SectionInfo>,
    pub section_properties: Option<SectionProperties>,
    pub releases: Option<Releases>,
    pub local_axes: Option<LocalAxes>,
    pub structural_role: Option<String>,
    pub cross_section_rotation_rad: Option<f64>,
    pub host_id: Option<i64>,
    pub host_unique_id: Option<String>,
    /// Present only when line geometry was extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<LineGeometry>,
}

impl MemberRecord {
    /// Minimal record for a member whose geometry could not be extracted.
    /// All optional metadata fields stay null.
    pub fn no_curve(id: Option<i64>, unique_id: impl Into<String>) -> Self {
        Self {
            id,
            unique_id: unique_id.into(),
            node_i: None,
            node_j: None,
            units: LengthUnit::Meters,
            status: MemberStatus::NoCurve,
            material: None,
            section: None,
            section_properties: None,
            releases: None,
            local_axes: None,
            structural_role: None,
            cross_section_rotation_rad: None,
            host_id: None,
            host_unique_id: None,
            endpoints: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ok_iff_both_nodes_resolved() {
        assert_eq!(MemberStatus::from_nodes(Some(1), Some(2)), MemberStatus::Ok);
        assert_eq!(MemberStatus::from_nodes(None, Some(2)), MemberStatus::NoNodeI);
        assert_eq!(MemberStatus::from_nodes(Some(1), None), MemberStatus::NoNodeJ);
        assert_eq!(MemberStatus::from_nodes(None, None), MemberStatus::NoNodeI);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MemberStatus::NoCurve).unwrap(),
            "\"no_curve\""
        );
        assert_eq!(serde_json::to_string(&MemberStatus::Ok).unwrap(), "\"ok\"");
    }

    #[test]
    fn no_curve_record_has_all_metadata_null() {
        let record = MemberRecord::no_curve(Some(42), "uid-42");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "no_curve");
        assert!(json["nodeI"].is_null());
        assert!(json["nodeJ"].is_null());
        assert!(json["material"].is_null());
        assert!(json["section"].is_null());
        assert!(json["releases"].is_null());
        assert!(json["host_id"].is_null());
        // endpoints key is omitted entirely, not serialized as null
        assert!(json.get("endpoints").is_none());
    }

    #[test]
    fn node_keys_use_camel_case() {
        let mut record = MemberRecord::no_curve(Some(1), "uid-1");
        record.node_i = Some(10);
        record.node_j = Some(20);
        record.status = MemberStatus::Ok;
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nodeI"], 10);
        assert_eq!(json["nodeJ"], 20);
    }
}
