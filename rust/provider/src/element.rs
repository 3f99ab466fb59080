// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw element views handed out by a structural model provider.
//!
//! These are deliberately close to what building hosts actually expose:
//! every geometric or metadata source is optional, numeric ids can be
//! missing on analytical elements after file round-trips, and coordinates
//! are in the host's internal length unit (see
//! [`StructuralModel::unit_scale`](crate::traits::StructuralModel::unit_scale)).

use std::collections::BTreeMap;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in internal units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
            0.5 * (self.min[2] + self.max[2]),
        )
    }
}

/// A straight curve segment in internal units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGeometry {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

impl CurveGeometry {
    pub fn start_point(&self) -> Point3<f64> {
        Point3::from(self.start)
    }

    pub fn end_point(&self) -> Point3<f64> {
        Point3::from(self.end)
    }

    pub fn direction(&self) -> Vector3<f64> {
        self.end_point() - self.start_point()
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}

/// Local-to-global basis of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTriad {
    pub x: [f64; 3],
    pub y: [f64; 3],
    pub z: [f64; 3],
}

/// Raw end release flags as stored on an analytical member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseDofs {
    #[serde(default)]
    pub fx: bool,
    #[serde(default)]
    pub fy: bool,
    #[serde(default)]
    pub fz: bool,
    #[serde(default)]
    pub mx: bool,
    #[serde(default)]
    pub my: bool,
    #[serde(default)]
    pub mz: bool,
}

/// An analytical node element.
///
/// The three optional fields are the ordered position sources: explicit
/// coordinate-system origin, point location, bounding box. A node may
/// carry none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticalNodeElement {
    #[serde(default)]
    pub id: Option<i64>,
    pub unique_id: String,
    #[serde(default)]
    pub coordinate_system_origin: Option<[f64; 3]>,
    #[serde(default)]
    pub location_point: Option<[f64; 3]>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
}

/// An analytical member element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticalMemberElement {
    #[serde(default)]
    pub id: Option<i64>,
    pub unique_id: String,
    /// Single analytical curve, when the member is represented by one.
    #[serde(default)]
    pub curve: Option<CurveGeometry>,
    /// Realized geometry segments, the fallback representation.
    #[serde(default)]
    pub geometry: Vec<CurveGeometry>,
    /// Direct reference to a section type definition.
    #[serde(default)]
    pub section_type_id: Option<i64>,
    /// Shape classification; known independently of the type reference.
    #[serde(default)]
    pub section_shape: Option<String>,
    /// Material reference carried directly by the member.
    #[serde(default)]
    pub material_id: Option<i64>,
    /// Direct association with the physical host element, when the host
    /// API exposes one.
    #[serde(default)]
    pub host_element_id: Option<i64>,
    #[serde(default)]
    pub start_release: Option<ReleaseDofs>,
    #[serde(default)]
    pub end_release: Option<ReleaseDofs>,
    /// Local-to-global transform basis.
    #[serde(default)]
    pub transform: Option<AxisTriad>,
    #[serde(default)]
    pub structural_role: Option<String>,
    /// Cross-section rotation about the member axis, radians.
    #[serde(default)]
    pub cross_section_rotation: Option<f64>,
}

/// Category of a physical structural instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalCategory {
    Framing,
    Column,
}

/// A physical framing or column instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalInstanceElement {
    pub id: i64,
    pub unique_id: String,
    pub category: PhysicalCategory,
    /// Location curve; instances placed by point have none and are never
    /// host-match candidates.
    #[serde(default)]
    pub location_curve: Option<CurveGeometry>,
    /// Currently assigned type (symbol) id.
    pub type_id: i64,
    /// Instance-level structural material parameter.
    #[serde(default)]
    pub material_param: Option<i64>,
    /// Material ids enumerated on the instance geometry (paint and core),
    /// in source order.
    #[serde(default)]
    pub geometry_material_ids: Vec<i64>,
}

/// A structural framing type definition (symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingSymbolElement {
    pub id: i64,
    pub unique_id: String,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    /// Named numeric section parameters, reported in SI output units.
    #[serde(default)]
    pub section_parameters: BTreeMap<String, f64>,
    /// Type-level structural material parameter.
    #[serde(default)]
    pub material_param: Option<i64>,
}

/// A material element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialElement {
    pub id: i64,
    pub unique_id: String,
    #[serde(default)]
    pub name: Option<String>,
}
