// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Member geometry extraction.
//!
//! Preferred path: the single analytical curve the host reports for the
//! member. Fallback: the longest segment of the member's realized
//! geometry. Either way failing is a valid, terminal outcome: the caller
//! degrades the record to `no_curve`.

use nalgebra::Point3;
use tracing::debug;

use strax_model::units::internal_to_meters;
use strax_model::LocalAxes;
use strax_provider::AnalyticalMemberElement;

/// Endpoints of a member in internal units, or `None` when no geometry
/// could be extracted.
pub fn member_endpoints(member: &AnalyticalMemberElement) -> Option<(Point3<f64>, Point3<f64>)> {
    if let Some(curve) = &member.curve {
        return Some((curve.start_point(), curve.end_point()));
    }

    // Fallback: longest segment of the realized geometry. First-longest
    // wins on equal lengths.
    let mut longest = None;
    let mut max_length = -1.0;
    for segment in &member.geometry {
        let length = segment.length();
        if length > max_length {
            longest = Some(segment);
            max_length = length;
        }
    }
    match longest {
        Some(segment) => {
            debug!(
                member = %member.unique_id,
                segments = member.geometry.len(),
                "no single curve, using longest geometry segment"
            );
            Some((segment.start_point(), segment.end_point()))
        }
        None => {
            debug!(member = %member.unique_id, "no geometry, member degrades to no_curve");
            None
        }
    }
}

/// Local coordinate triad from the member's transform; absence is
/// non-fatal.
pub fn local_axes(member: &AnalyticalMemberElement) -> Option<LocalAxes> {
    member.transform.as_ref().map(|t| LocalAxes {
        x: t.x,
        y: t.y,
        z: t.z,
    })
}

/// Converts an internal-unit point to an output-unit coordinate triple.
pub(crate) fn point_to_output(point: &Point3<f64>, unit_scale: f64) -> [f64; 3] {
    [
        internal_to_meters(point.x, unit_scale),
        internal_to_meters(point.y, unit_scale),
        internal_to_meters(point.z, unit_scale),
    ]
}
