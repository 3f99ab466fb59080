// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section and material metadata attached to member records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity of a member's cross-section type.
///
/// May be fully unresolved (all `None`) while `shape` is still known: the
/// host reports the shape classification independently of the type
/// reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionInfo {
    pub type_id: Option<i64>,
    pub type_name: Option<String>,
    pub family_name: Option<String>,
    pub shape: Option<String>,
}

impl SectionInfo {
    /// Identity-only section with no resolved type, keeping the shape tag.
    pub fn shape_only(shape: Option<String>) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }
}

/// Open mapping of host-defined section parameter names to numeric values.
///
/// The recognized parameter set is host-defined and extensible, so this
/// stays a string-keyed map rather than a fixed struct. A `BTreeMap` keeps
/// the serialized order stable across runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionProperties {
    pub values: BTreeMap<String, f64>,
}

impl SectionProperties {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for SectionProperties {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Reference to a material element in the host model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRef {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Resolved material data for a member.
///
/// `primary` is the first material found by the resolution chain; `all`
/// carries every material reference in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub primary: Option<MaterialRef>,
    pub all: Vec<MaterialRef>,
}

impl MaterialInfo {
    /// Wraps a single reference as both primary and the full set.
    pub fn single(reference: MaterialRef) -> Self {
        Self {
            primary: Some(reference.clone()),
            all: vec![reference],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_properties_serialize_as_flat_map() {
        let props: SectionProperties = [
            ("SECTION_AREA".to_string(), 0.0047),
            ("SECTION_HEIGHT".to_string(), 0.31),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["SECTION_AREA"], 0.0047);
        assert_eq!(json["SECTION_HEIGHT"], 0.31);
    }

    #[test]
    fn shape_only_section_keeps_shape() {
        let info = SectionInfo::shape_only(Some("IWideFlange".into()));
        assert!(info.type_id.is_none());
        assert!(info.type_name.is_none());
        assert_eq!(info.shape.as_deref(), Some("IWideFlange"));
    }

    #[test]
    fn single_material_is_primary_and_all() {
        let info = MaterialInfo::single(MaterialRef {
            id: Some(77),
            name: Some("Steel S355".into()),
        });
        assert_eq!(info.primary.as_ref().unwrap().id, Some(77));
        assert_eq!(info.all.len(), 1);
    }
}
