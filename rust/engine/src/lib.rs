// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Strax Engine
//!
//! Export and update engines for structural analytical exchange.
//!
//! The export path reads a building model through the
//! [`StructuralModel`](strax_provider::StructuralModel) trait, associates
//! analytical members with nodes and physical host elements, and writes one
//! immutable snapshot document per run. It never mutates the model.
//!
//! The update path reads an externally edited snapshot back, resolves each
//! referenced host element, and changes section types inside a single write
//! transaction: either every attempted mutation of a run is durably applied
//! together, or none are. A persistence policy then synchronizes and saves
//! the model, degrading through ordered fallbacks.
//!
//! Per-item failures (missing geometry, snap misses, unresolved sections or
//! materials) are logged and degrade the affected record; they never abort
//! a run.

pub mod error;
pub mod export;
pub mod geometry;
pub mod host_match;
pub mod nodes;
pub mod outdir;
pub mod persist;
pub mod releases;
pub mod sections;
pub mod symbols;
pub mod update;

pub use error::{Error, Result};
pub use export::{ExportOutcome, Exporter};
pub use nodes::{collect_nodes, NodeIndex};
pub use persist::PersistOutcome;
pub use symbols::SymbolIndex;
pub use update::{run_update, UpdateOptions};
