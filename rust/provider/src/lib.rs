// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Strax Provider
//!
//! Host-model abstraction for the analytical exchange engine.
//!
//! Building applications expose elements, curves and transactions through
//! wildly different APIs. This crate narrows all of that to the
//! [`StructuralModel`] trait: enumerate analytical nodes and members,
//! enumerate physical framing/column candidates, resolve elements by id or
//! stable unique id, read and change an instance's type, and run a single
//! write transaction with save/synchronize persistence.
//!
//! [`MemoryModel`] is a complete in-memory implementation, deserializable
//! from a JSON model document, used by the CLI and by tests.

pub mod element;
pub mod error;
pub mod memory;
pub mod traits;

pub use element::{
    AnalyticalMemberElement, AnalyticalNodeElement, AxisTriad, BoundingBox, CurveGeometry,
    FramingSymbolElement, MaterialElement, PhysicalCategory, PhysicalInstanceElement, ReleaseDofs,
};
pub use error::{ProviderError, Result};
pub use memory::{FailureModes, MemoryModel};
pub use traits::StructuralModel;
