// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End release extraction.

use strax_model::{ReleaseCondition, Releases};
use strax_provider::{AnalyticalMemberElement, ReleaseDofs};

fn to_condition(dofs: ReleaseDofs) -> ReleaseCondition {
    ReleaseCondition {
        fx: dofs.fx,
        fy: dofs.fy,
        fz: dofs.fz,
        mx: dofs.mx,
        my: dofs.my,
        mz: dofs.mz,
    }
}

/// Reads the member's end release conditions; `None` when neither end
/// carries one.
pub fn read_releases(member: &AnalyticalMemberElement) -> Option<Releases> {
    Releases::from_ends(
        member.start_release.map(to_condition),
        member.end_release.map(to_condition),
    )
}
