// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Member end release conditions.

use serde::{Deserialize, Serialize};

/// Six independent degrees of freedom released at one member end:
/// three force components, three moment components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseCondition {
    pub fx: bool,
    pub fy: bool,
    pub fz: bool,
    pub mx: bool,
    pub my: bool,
    pub mz: bool,
}

/// Release conditions at both ends of a member; either end may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Releases {
    pub start: Option<ReleaseCondition>,
    pub end: Option<ReleaseCondition>,
}

impl Releases {
    /// Returns `None` when neither end carries a condition, so the member
    /// record serializes the whole field as null.
    pub fn from_ends(
        start: Option<ReleaseCondition>,
        end: Option<ReleaseCondition>,
    ) -> Option<Self> {
        if start.is_none() && end.is_none() {
            None
        } else {
            Some(Self { start, end })
        }
    }
}
