// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node collection and tolerance-based snapping.
//!
//! Positions in the index stay in host-internal units; the document
//! records carry meters. Lookup is a linear scan over all entries, which
//! is fine at the node counts building models reach (hundreds to low
//! thousands).

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use strax_model::units::internal_to_meters;
use strax_model::Node;
use strax_provider::{AnalyticalNodeElement, StructuralModel};

/// Position-keyed index of analytical nodes, internal units.
///
/// Only nodes with a numeric id participate in snapping; nodes without one
/// still appear in the export node list.
#[derive(Debug, Default)]
pub struct NodeIndex {
    positions: FxHashMap<i64, Point3<f64>>,
}

impl NodeIndex {
    /// Id of the closest node within `tolerance` of `point`, or `None`.
    ///
    /// The boundary is inclusive: a point exactly at the tolerance
    /// distance snaps. Among equally distant nodes the result is
    /// deterministic for a given map iteration order, but that order is
    /// not contractually meaningful.
    pub fn nearest_within(&self, point: &Point3<f64>, tolerance: f64) -> Option<i64> {
        let mut best_id = None;
        let mut best_d2 = tolerance * tolerance;
        for (&id, node_point) in &self.positions {
            let d2 = (point - node_point).norm_squared();
            if d2 <= best_d2 {
                best_id = Some(id);
                best_d2 = d2;
            }
        }
        best_id
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, id: i64, point: Point3<f64>) {
        self.positions.insert(id, point);
    }
}

/// Outcome of a node collection pass.
#[derive(Debug)]
pub struct CollectedNodes {
    pub index: NodeIndex,
    /// Document records, positions in meters, in enumeration order.
    pub nodes: Vec<Node>,
    /// Raw node elements seen, including those with no position.
    pub total_seen: usize,
    /// Nodes excluded because no position source resolved.
    pub missing: usize,
}

/// Position of a node element through the ordered fallback sources:
/// coordinate-system origin, then point location, then bounding-box
/// centroid.
fn node_position(element: &AnalyticalNodeElement) -> Option<Point3<f64>> {
    if let Some(origin) = element.coordinate_system_origin {
        return Some(Point3::from(origin));
    }
    if let Some(point) = element.location_point {
        return Some(Point3::from(point));
    }
    element.bounding_box.as_ref().map(|bbox| bbox.centroid())
}

/// Collects all analytical nodes of a model.
///
/// A node with no resolvable position is counted as missing and excluded
/// from both the index and the list; this is a tolerated omission, not an
/// error.
pub fn collect_nodes<M: StructuralModel>(model: &M) -> CollectedNodes {
    let elements = model.analytical_nodes();
    let scale = model.unit_scale();
    let total_seen = elements.len();

    let mut index = NodeIndex::default();
    let mut nodes = Vec::new();
    let mut missing = 0usize;

    for element in &elements {
        let Some(position) = node_position(element) else {
            missing += 1;
            debug!(
                node = %element
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| element.unique_id.clone()),
                "node has no resolvable position, skipping"
            );
            continue;
        };
        if let Some(id) = element.id {
            index.positions.insert(id, position);
        }
        nodes.push(Node::new(
            element.id,
            element.unique_id.clone(),
            [
                internal_to_meters(position.x, scale),
                internal_to_meters(position.y, scale),
                internal_to_meters(position.z, scale),
            ],
        ));
    }

    info!(
        seen = total_seen,
        indexed = index.len(),
        missing,
        "collected analytical nodes"
    );

    CollectedNodes {
        index,
        nodes,
        total_seen,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strax_provider::{BoundingBox, MemoryModel};

    fn node_element(id: i64, origin: Option<[f64; 3]>) -> AnalyticalNodeElement {
        AnalyticalNodeElement {
            id: Some(id),
            unique_id: format!("n-{id}"),
            coordinate_system_origin: origin,
            location_point: None,
            bounding_box: None,
        }
    }

    #[test]
    fn snap_is_idempotent_on_stored_position() {
        let mut index = NodeIndex::default();
        index.insert(1, Point3::new(1.0, 2.0, 3.0));
        index.insert(2, Point3::new(5.0, 5.0, 5.0));

        assert_eq!(index.nearest_within(&Point3::new(1.0, 2.0, 3.0), 0.05), Some(1));
    }

    #[test]
    fn snap_boundary_is_inclusive() {
        let mut index = NodeIndex::default();
        index.insert(1, Point3::new(0.0, 0.0, 0.0));

        let tol = 0.05;
        assert_eq!(index.nearest_within(&Point3::new(tol, 0.0, 0.0), tol), Some(1));
        assert_eq!(
            index.nearest_within(&Point3::new(tol + 1e-9, 0.0, 0.0), tol),
            None
        );
    }

    #[test]
    fn snap_picks_minimum_distance() {
        let mut index = NodeIndex::default();
        index.insert(1, Point3::new(0.0, 0.0, 0.0));
        index.insert(2, Point3::new(0.01, 0.0, 0.0));

        assert_eq!(
            index.nearest_within(&Point3::new(0.009, 0.0, 0.0), 0.05),
            Some(2)
        );
    }

    #[test]
    fn position_fallback_order() {
        // Origin wins over the others.
        let mut element = node_element(1, Some([1.0, 0.0, 0.0]));
        element.location_point = Some([2.0, 0.0, 0.0]);
        assert_eq!(node_position(&element), Some(Point3::new(1.0, 0.0, 0.0)));

        // Point location next.
        element.coordinate_system_origin = None;
        assert_eq!(node_position(&element), Some(Point3::new(2.0, 0.0, 0.0)));

        // Bounding box centroid last.
        element.location_point = None;
        element.bounding_box = Some(BoundingBox {
            min: [0.0, 0.0, 0.0],
            max: [4.0, 0.0, 0.0],
        });
        assert_eq!(node_position(&element), Some(Point3::new(2.0, 0.0, 0.0)));

        // Nothing left.
        element.bounding_box = None;
        assert_eq!(node_position(&element), None);
    }

    #[test]
    fn collect_counts_missing_nodes() {
        let mut model = MemoryModel::new("m");
        model.add_node(node_element(1, Some([0.0, 0.0, 0.0])));
        model.add_node(node_element(2, None)); // no position source
        model.add_node(node_element(3, Some([1.0, 1.0, 0.0])));

        let collected = collect_nodes(&model);
        assert_eq!(collected.total_seen, 3);
        assert_eq!(collected.missing, 1);
        assert_eq!(collected.nodes.len(), 2);
        assert_eq!(collected.index.len(), 2);
    }

    #[test]
    fn collected_positions_are_converted_to_meters() {
        let mut model = MemoryModel::new("m");
        model.set_unit_scale(0.3048);
        model.add_node(node_element(1, Some([10.0, 0.0, 0.0])));

        let collected = collect_nodes(&model);
        let position = collected.nodes[0].position;
        assert!((position[0] - 3.048).abs() < 1e-12);
    }

    #[test]
    fn node_without_numeric_id_is_listed_but_not_indexed() {
        let mut model = MemoryModel::new("m");
        model.add_node(AnalyticalNodeElement {
            id: None,
            unique_id: "n-x".into(),
            coordinate_system_origin: Some([0.0, 0.0, 0.0]),
            location_point: None,
            bounding_box: None,
        });

        let collected = collect_nodes(&model);
        assert_eq!(collected.nodes.len(), 1);
        assert!(collected.index.is_empty());
    }
}
