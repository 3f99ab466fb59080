// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section and material resolution.
//!
//! Section identity comes from the member's referenced type definition
//! when one exists; the shape classification is read independently and
//! survives an unresolved type. Material resolution walks an ordered
//! fallback chain, and the first rule that produces a reference wins;
//! later rules are not consulted. Absence of any resolved material is a
//! valid null result, not an error.

use tracing::debug;

use strax_model::{MaterialInfo, MaterialRef, SectionInfo, SectionProperties};
use strax_provider::{AnalyticalMemberElement, PhysicalInstanceElement, StructuralModel};

/// Treats non-positive ids the way hosts use them: as "no reference".
fn positive(id: i64) -> bool {
    id > 0
}

/// Resolves section identity and numeric properties for a member.
///
/// With a resolved type reference the identity fields and the open
/// property map are filled from the symbol; without one, an identity-only
/// section is returned that still carries the shape when known.
pub fn section_for_member<M: StructuralModel>(
    model: &M,
    member: &AnalyticalMemberElement,
) -> (SectionInfo, Option<SectionProperties>) {
    let shape = member.section_shape.clone();

    let symbol = member
        .section_type_id
        .filter(|&id| positive(id))
        .and_then(|id| model.symbol_by_id(id));

    let Some(symbol) = symbol else {
        debug!(member = %member.unique_id, "no section type reference, shape-only section");
        return (SectionInfo::shape_only(shape), None);
    };

    let info = SectionInfo {
        type_id: Some(symbol.id),
        type_name: symbol.type_name.clone(),
        family_name: symbol.family_name.clone(),
        shape,
    };
    let properties = if symbol.section_parameters.is_empty() {
        None
    } else {
        Some(SectionProperties {
            values: symbol.section_parameters.clone(),
        })
    };
    (info, properties)
}

fn material_ref<M: StructuralModel>(model: &M, id: i64) -> Option<MaterialRef> {
    model.material_by_id(id).map(|m| MaterialRef {
        id: Some(m.id),
        name: m.name,
    })
}

/// Resolves material data for a member, in priority order:
///
/// 1. a material reference carried directly by the analytical member;
/// 2. the structural material parameter on the matched host instance;
/// 3. the same parameter on the host's type definition;
/// 4. the materials enumerated on the host's geometry, first taken as
///    primary.
pub fn material_for_member<M: StructuralModel>(
    model: &M,
    member: &AnalyticalMemberElement,
    host: Option<&PhysicalInstanceElement>,
) -> Option<MaterialInfo> {
    if let Some(id) = member.material_id.filter(|&id| positive(id)) {
        if let Some(reference) = material_ref(model, id) {
            return Some(MaterialInfo::single(reference));
        }
    }

    let host = host?;

    let mut material_id = host.material_param.filter(|&id| positive(id));
    if material_id.is_none() {
        material_id = model
            .symbol_by_id(host.type_id)
            .and_then(|symbol| symbol.material_param)
            .filter(|&id| positive(id));
    }
    if let Some(id) = material_id {
        if let Some(reference) = material_ref(model, id) {
            return Some(MaterialInfo::single(reference));
        }
    }

    let references: Vec<MaterialRef> = host
        .geometry_material_ids
        .iter()
        .filter_map(|&id| material_ref(model, id))
        .collect();
    if let Some(primary) = references.first().cloned() {
        return Some(MaterialInfo {
            primary: Some(primary),
            all: references,
        });
    }

    debug!(member = %member.unique_id, "no material resolved");
    None
}
