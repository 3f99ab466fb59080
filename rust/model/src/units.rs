// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output units and tolerance constants.
//!
//! Host applications keep geometry in an internal length unit (commonly
//! feet); exchange documents always carry meters. The provider reports its
//! internal-unit-to-meters scale and the conversions below apply it.

use serde::{Deserialize, Serialize};

/// Maximum distance at which a member endpoint snaps to a node (15 mm).
pub const SNAP_TOLERANCE_METERS: f64 = 0.015;

/// Base spatial tolerance for the physical host match heuristic (50 mm).
pub const HOST_MATCH_TOLERANCE_METERS: f64 = 0.05;

/// Length unit tag carried by exchange documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Meters,
    Feet,
}

impl LengthUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Meters => "meters",
            LengthUnit::Feet => "feet",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a length from host-internal units to meters.
///
/// `unit_scale` is the provider's internal-unit-to-meters factor
/// (0.3048 when the host works in feet).
#[inline]
pub fn internal_to_meters(value: f64, unit_scale: f64) -> f64 {
    value * unit_scale
}

/// Converts a length in meters to host-internal units.
#[inline]
pub fn meters_to_internal(value: f64, unit_scale: f64) -> f64 {
    value / unit_scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_tag_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LengthUnit::Meters).unwrap(), "\"meters\"");
        assert_eq!(serde_json::to_string(&LengthUnit::Feet).unwrap(), "\"feet\"");
    }

    #[test]
    fn meter_roundtrip_through_internal_units() {
        let scale = 0.3048; // feet
        let m = 1.5;
        let internal = meters_to_internal(m, scale);
        assert!((internal_to_meters(internal, scale) - m).abs() < 1e-12);
    }
}
