// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic physical host matching.
//!
//! When a member has no direct structural association, the best physical
//! framing/column instance whose centerline approximates the member's line
//! is searched. This is a greedy single-pass nearest-candidate search, not
//! a global assignment: two members may match the same host, and ties are
//! resolved independently per member (first minimum encountered wins).

use nalgebra::{Point3, Vector3};
use tracing::debug;

use strax_provider::{PhysicalInstanceElement, StructuralModel};

/// Maximum deviation between a candidate's direction and the member line.
const MAX_ANGLE_DEG: f64 = 10.0;

/// Angle between two directions, radians.
///
/// The normalized dot product is clamped to [-1, 1] before the inverse
/// cosine so floating-point drift cannot leave the acos domain. A
/// degenerate (zero-length) direction reports the worst angle.
fn angle_between(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    match (v1.try_normalize(f64::EPSILON), v2.try_normalize(f64::EPSILON)) {
        (Some(a), Some(b)) => a.dot(&b).clamp(-1.0, 1.0).acos(),
        _ => std::f64::consts::PI,
    }
}

/// Finds the best physical host for the member line `pi -> pj`.
///
/// `tolerance` is the base spatial tolerance in internal units. Candidates
/// are gated on direction (≤ 10°) and midpoint distance (≤ 3× tolerance);
/// the surviving minimum endpoint-pairing score is accepted at ≤ 6×
/// tolerance. The score takes the better of the two endpoint pairings, so
/// it is direction-agnostic.
pub fn find_physical_host<M: StructuralModel>(
    model: &M,
    pi: &Point3<f64>,
    pj: &Point3<f64>,
    tolerance: f64,
) -> Option<PhysicalInstanceElement> {
    let line_vec = pj - pi;
    let mid = nalgebra::center(pi, pj);
    let max_angle = MAX_ANGLE_DEG.to_radians();

    let mut best: Option<PhysicalInstanceElement> = None;
    let mut best_score = f64::INFINITY;

    for instance in model.physical_instances() {
        let Some(curve) = &instance.location_curve else {
            continue;
        };
        let a = curve.start_point();
        let b = curve.end_point();

        if angle_between(&line_vec, &(b - a)) > max_angle {
            continue;
        }

        let candidate_mid = nalgebra::center(&a, &b);
        if nalgebra::distance(&mid, &candidate_mid) > tolerance * 3.0 {
            continue;
        }

        let straight = nalgebra::distance(pi, &a) + nalgebra::distance(pj, &b);
        let reversed = nalgebra::distance(pi, &b) + nalgebra::distance(pj, &a);
        let score = straight.min(reversed);

        if score < best_score {
            best = Some(instance);
            best_score = score;
        }
    }

    if best.is_some() && best_score <= tolerance * 6.0 {
        best
    } else {
        debug!("no physical host matched within tolerance");
        None
    }
}
