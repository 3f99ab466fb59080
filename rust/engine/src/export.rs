// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The export assembler.
//!
//! Orchestrates one read-only export run: index nodes, then per member
//! extract geometry, snap endpoints to nodes, resolve section, host,
//! material, releases and axes, and assemble the record. No step retries;
//! a failure at any per-member stage degrades that member's record to its
//! minimal valid form and never aborts the run. The assembled result is
//! written as one timestamped snapshot per run.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use strax_model::units::meters_to_internal;
use strax_model::{
    ExportCounts, ExportResult, LengthUnit, LineGeometry, MemberRecord, MemberStatus,
    HOST_MATCH_TOLERANCE_METERS, SNAP_TOLERANCE_METERS,
};
use strax_provider::{AnalyticalMemberElement, StructuralModel};

use crate::error::Result;
use crate::geometry::{local_axes, member_endpoints, point_to_output};
use crate::host_match::find_physical_host;
use crate::nodes::{collect_nodes, NodeIndex};
use crate::releases::read_releases;
use crate::sections::{material_for_member, section_for_member};

/// A completed export run.
#[derive(Debug)]
pub struct ExportOutcome {
    pub result: ExportResult,
    pub snapshot_path: PathBuf,
}

/// Model name for snapshot file naming: file stem of the model path when
/// saved, otherwise the document title.
fn model_name<M: StructuralModel>(model: &M) -> String {
    if let Some(path) = model.path_name() {
        if let Some(stem) = Path::new(&path).file_stem().and_then(|s| s.to_str()) {
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }
    model.title()
}

/// One export run over a structural model.
pub struct Exporter<'a, M: StructuralModel> {
    model: &'a M,
    output_dir: PathBuf,
}

impl<'a, M: StructuralModel> Exporter<'a, M> {
    pub fn new(model: &'a M, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            output_dir: output_dir.into(),
        }
    }

    /// Runs the export and writes the snapshot document.
    ///
    /// The only fatal condition on this path is being unable to write the
    /// snapshot; the model itself is never mutated.
    pub fn export(&self) -> Result<ExportOutcome> {
        let name = model_name(self.model);
        info!(model = %name, "starting analytical member export");

        let collected = collect_nodes(self.model);
        let scale = self.model.unit_scale();
        let snap_tolerance = meters_to_internal(SNAP_TOLERANCE_METERS, scale);

        let members = self.model.analytical_members();
        info!(members = members.len(), "found analytical members");

        let records: Vec<MemberRecord> = members
            .iter()
            .map(|member| self.build_member_record(member, &collected.index, snap_tolerance))
            .collect();

        let result = ExportResult {
            model: name,
            exported_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            units: LengthUnit::Meters,
            snap_tolerance_m: SNAP_TOLERANCE_METERS,
            counts: ExportCounts {
                members_total: records.len(),
                nodes_seen: collected.total_seen,
            },
            analytical_nodes: collected.nodes,
            analytical_members: records,
        };

        let snapshot_path = self.write_snapshot(&result)?;
        info!(
            path = %snapshot_path.display(),
            members = result.counts.members_total,
            nodes = result.counts.nodes_seen,
            "export complete"
        );
        Ok(ExportOutcome {
            result,
            snapshot_path,
        })
    }

    fn build_member_record(
        &self,
        member: &AnalyticalMemberElement,
        node_index: &NodeIndex,
        snap_tolerance: f64,
    ) -> MemberRecord {
        let Some((start, end)) = member_endpoints(member) else {
            return MemberRecord::no_curve(member.id, &member.unique_id);
        };

        let node_i = node_index.nearest_within(&start, snap_tolerance);
        let node_j = node_index.nearest_within(&end, snap_tolerance);

        let (section, section_properties) = section_for_member(self.model, member);

        // Direct association short-circuits the spatial heuristic.
        let direct_host = member
            .host_element_id
            .filter(|&id| id > 0)
            .and_then(|id| self.model.instance_by_id(id));
        let heuristic = direct_host.is_none();
        let host = direct_host.or_else(|| {
            let scale = self.model.unit_scale();
            let tolerance = meters_to_internal(HOST_MATCH_TOLERANCE_METERS, scale);
            find_physical_host(self.model, &start, &end, tolerance)
        });

        let material = material_for_member(self.model, member, host.as_ref());
        let releases = read_releases(member);
        let axes = local_axes(member);
        let status = MemberStatus::from_nodes(node_i, node_j);
        let scale = self.model.unit_scale();

        debug!(
            member = member.id.unwrap_or(-1),
            unique_id = %member.unique_id,
            ?status,
            heuristic_host = heuristic && host.is_some(),
            host_id = host.as_ref().map(|h| h.id),
            "assembled member record"
        );

        MemberRecord {
            id: member.id,
            unique_id: member.unique_id.clone(),
            node_i,
            node_j,
            units: LengthUnit::Meters,
            status,
            material,
            section: Some(section),
            section_properties,
            releases,
            local_axes: axes,
            structural_role: member.structural_role.clone(),
            cross_section_rotation_rad: member.cross_section_rotation,
            host_id: host.as_ref().map(|h| h.id),
            host_unique_id: host.as_ref().map(|h| h.unique_id.clone()),
            endpoints: Some(LineGeometry {
                i: point_to_output(&start, scale),
                j: point_to_output(&end, scale),
            }),
        }
    }

    /// Writes the snapshot under a model+timestamp name, uniquified so a
    /// prior run is never overwritten.
    fn write_snapshot(&self, result: &ExportResult) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let base = format!("members_{}_{}", result.model, timestamp);
        let mut path = self.output_dir.join(format!("{base}.json"));
        let mut counter = 1u32;
        while path.exists() {
            path = self.output_dir.join(format!("{base}_{counter}.json"));
            counter += 1;
        }
        result.write_to(&path)?;
        Ok(path)
    }
}
