// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Strax Model
//!
//! Document schemas for structural analytical model exchange.
//!
//! An export run produces an immutable [`ExportResult`] snapshot: the full
//! set of analytical nodes and members of a building model, with section,
//! material, release and host-association metadata. An externally edited
//! copy of that snapshot comes back as an [`UpdateDocument`], and the
//! outcome of applying it is reported in an [`UpdateStatus`].
//!
//! All documents serialize to JSON with `serde`; field names and null
//! conventions are part of the exchange contract and must not change
//! between releases.

pub mod error;
pub mod member;
pub mod node;
pub mod release;
pub mod section;
pub mod snapshot;
pub mod units;
pub mod update;

pub use error::{Error, Result};
pub use member::{LineGeometry, LocalAxes, MemberRecord, MemberStatus};
pub use node::Node;
pub use release::{ReleaseCondition, Releases};
pub use section::{MaterialInfo, MaterialRef, SectionInfo, SectionProperties};
pub use snapshot::{ExportCounts, ExportResult};
pub use units::{LengthUnit, HOST_MATCH_TOLERANCE_METERS, SNAP_TOLERANCE_METERS};
pub use update::{UpdateCounts, UpdateDocument, UpdateRecord, UpdateSection, UpdateStatus};
