// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The structural model provider trait.
//!
//! Engines consume only this interface, so any host binding (or the
//! in-memory double) can sit behind it. Enumeration methods return owned
//! element views; model sizes are bounded (hundreds to low thousands of
//! elements), so the copies are cheap and keep borrow lifetimes out of the
//! trait surface.

use std::path::Path;

use crate::element::{
    AnalyticalMemberElement, AnalyticalNodeElement, FramingSymbolElement, MaterialElement,
    PhysicalInstanceElement,
};
use crate::error::Result;

/// Read and write access to a host building model.
///
/// All mutation methods require an open transaction; providers reject
/// out-of-transaction writes. The export path uses only the read surface.
pub trait StructuralModel {
    // ---- identity -------------------------------------------------------

    /// Model title (document name without path).
    fn title(&self) -> String;

    /// Full path of the model file, if it has ever been saved.
    fn path_name(&self) -> Option<String>;

    /// Whether the model is workshared (has a central copy to synchronize
    /// with).
    fn is_workshared(&self) -> bool;

    /// Internal length unit to meters scale factor (0.3048 for hosts that
    /// work in feet).
    fn unit_scale(&self) -> f64;

    // ---- enumeration ----------------------------------------------------

    /// All analytical node elements.
    fn analytical_nodes(&self) -> Vec<AnalyticalNodeElement>;

    /// All analytical member elements.
    fn analytical_members(&self) -> Vec<AnalyticalMemberElement>;

    /// All physical framing and column instances (not type definitions).
    fn physical_instances(&self) -> Vec<PhysicalInstanceElement>;

    /// All structural framing type definitions.
    fn framing_symbols(&self) -> Vec<FramingSymbolElement>;

    // ---- resolution -----------------------------------------------------

    /// Resolves a physical instance by numeric id.
    fn instance_by_id(&self, id: i64) -> Option<PhysicalInstanceElement>;

    /// Resolves a physical instance by stable unique id.
    fn instance_by_unique_id(&self, unique_id: &str) -> Option<PhysicalInstanceElement>;

    /// Resolves a framing symbol by numeric id.
    fn symbol_by_id(&self, id: i64) -> Option<FramingSymbolElement>;

    /// Resolves a material by numeric id.
    fn material_by_id(&self, id: i64) -> Option<MaterialElement>;

    /// Currently assigned type id of a physical instance.
    fn current_type_id(&self, instance_id: i64) -> Option<i64>;

    // ---- mutation (transaction required) --------------------------------

    /// Changes an instance's type through the host's rich path.
    ///
    /// Returns [`ProviderError::ChangeTypeUnavailable`] when this path is
    /// not available for the instance; callers fall back to
    /// [`assign_instance_symbol`](Self::assign_instance_symbol).
    ///
    /// [`ProviderError::ChangeTypeUnavailable`]: crate::error::ProviderError::ChangeTypeUnavailable
    fn change_instance_type(&mut self, instance_id: i64, symbol_id: i64) -> Result<()>;

    /// Directly assigns a symbol to an instance, the simpler fallback path.
    fn assign_instance_symbol(&mut self, instance_id: i64, symbol_id: i64) -> Result<()>;

    // ---- transactions ---------------------------------------------------

    /// Whether this provider can open write transactions at all.
    fn supports_transactions(&self) -> bool;

    /// Opens the single named write transaction of a run.
    fn begin_transaction(&mut self, name: &str) -> Result<()>;

    /// Commits the open transaction, making all mutations durable together.
    fn commit_transaction(&mut self) -> Result<()>;

    /// Rolls back the open transaction, restoring pre-transaction state.
    fn rollback_transaction(&mut self) -> Result<()>;

    // ---- persistence ----------------------------------------------------

    /// Saves the model in place.
    fn save(&mut self) -> Result<()>;

    /// Writes a copy of the model to `path`.
    fn save_as(&mut self, path: &Path) -> Result<()>;

    /// Synchronizes the model with its central copy.
    fn synchronize_with_central(&mut self) -> Result<()>;
}
