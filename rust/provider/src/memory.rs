// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory structural model.
//!
//! A full [`StructuralModel`] implementation backed by plain vectors,
//! deserializable from a JSON model document. Lookups are linear scans;
//! model sizes are bounded, so no index is kept. Transactions snapshot the
//! mutable type assignments and restore them on rollback.
//!
//! [`FailureModes`] injects host failures (sync, save, change-path) at the
//! provider boundary, which is how the engine's fallback chains and the
//! rollback guarantee are exercised in tests.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::element::{
    AnalyticalMemberElement, AnalyticalNodeElement, FramingSymbolElement, MaterialElement,
    PhysicalInstanceElement,
};
use crate::error::{ProviderError, Result};
use crate::traits::StructuralModel;

fn default_unit_scale() -> f64 {
    // Hosts commonly keep geometry in feet.
    0.3048
}

fn default_title() -> String {
    "unsaved_model".into()
}

/// Host failures injectable at the provider boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureModes {
    /// The model cannot open write transactions at all.
    #[serde(default)]
    pub transactions_unsupported: bool,
    /// The rich type-change path reports itself unavailable.
    #[serde(default)]
    pub rich_change_unavailable: bool,
    /// The direct symbol-assignment fallback is rejected.
    #[serde(default)]
    pub direct_change_fails: bool,
    /// Synchronize-with-central fails.
    #[serde(default)]
    pub sync_fails: bool,
    /// In-place save fails.
    #[serde(default)]
    pub save_fails: bool,
    /// Save-as fails.
    #[serde(default)]
    pub save_as_fails: bool,
    /// Mutations on this instance report it as not found, as if it died
    /// mid-run. Used to exercise transaction rollback.
    #[serde(default)]
    pub poison_instance: Option<i64>,
}

#[derive(Debug, Clone)]
struct OpenTransaction {
    name: String,
    /// (instance id, type id) pairs captured at begin.
    saved_assignments: Vec<(i64, i64)>,
}

/// An in-memory building model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryModel {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    path_name: Option<String>,
    #[serde(default)]
    workshared: bool,
    #[serde(default = "default_unit_scale")]
    unit_scale: f64,
    #[serde(default)]
    nodes: Vec<AnalyticalNodeElement>,
    #[serde(default)]
    members: Vec<AnalyticalMemberElement>,
    #[serde(default)]
    instances: Vec<PhysicalInstanceElement>,
    #[serde(default)]
    symbols: Vec<FramingSymbolElement>,
    #[serde(default)]
    materials: Vec<MaterialElement>,
    #[serde(default)]
    pub failures: FailureModes,
    #[serde(skip)]
    transaction: Option<OpenTransaction>,
}

impl MemoryModel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path_name: None,
            workshared: false,
            unit_scale: default_unit_scale(),
            nodes: Vec::new(),
            members: Vec::new(),
            instances: Vec::new(),
            symbols: Vec::new(),
            materials: Vec::new(),
            failures: FailureModes::default(),
            transaction: None,
        }
    }

    /// Parses a model document from JSON text.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a model document from disk.
    pub fn read_from(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(std::io::Error::other)
    }

    pub fn set_path_name(&mut self, path: impl Into<String>) {
        self.path_name = Some(path.into());
    }

    pub fn set_workshared(&mut self, workshared: bool) {
        self.workshared = workshared;
    }

    pub fn set_unit_scale(&mut self, unit_scale: f64) {
        self.unit_scale = unit_scale;
    }

    pub fn add_node(&mut self, node: AnalyticalNodeElement) {
        self.nodes.push(node);
    }

    pub fn add_member(&mut self, member: AnalyticalMemberElement) {
        self.members.push(member);
    }

    pub fn add_instance(&mut self, instance: PhysicalInstanceElement) {
        self.instances.push(instance);
    }

    pub fn add_symbol(&mut self, symbol: FramingSymbolElement) {
        self.symbols.push(symbol);
    }

    pub fn add_material(&mut self, material: MaterialElement) {
        self.materials.push(material);
    }

    fn instance_index(&self, instance_id: i64) -> Result<usize> {
        if self.failures.poison_instance == Some(instance_id) {
            return Err(ProviderError::ElementNotFound(instance_id));
        }
        self.instances
            .iter()
            .position(|i| i.id == instance_id)
            .ok_or(ProviderError::ElementNotFound(instance_id))
    }

    fn require_transaction(&self) -> Result<()> {
        if self.transaction.is_none() {
            return Err(ProviderError::NoOpenTransaction);
        }
        Ok(())
    }

    fn document_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ProviderError::Persistence(e.to_string()))
    }
}

impl StructuralModel for MemoryModel {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn path_name(&self) -> Option<String> {
        self.path_name.clone()
    }

    fn is_workshared(&self) -> bool {
        self.workshared
    }

    fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    fn analytical_nodes(&self) -> Vec<AnalyticalNodeElement> {
        self.nodes.clone()
    }

    fn analytical_members(&self) -> Vec<AnalyticalMemberElement> {
        self.members.clone()
    }

    fn physical_instances(&self) -> Vec<PhysicalInstanceElement> {
        self.instances.clone()
    }

    fn framing_symbols(&self) -> Vec<FramingSymbolElement> {
        self.symbols.clone()
    }

    fn instance_by_id(&self, id: i64) -> Option<PhysicalInstanceElement> {
        self.instances.iter().find(|i| i.id == id).cloned()
    }

    fn instance_by_unique_id(&self, unique_id: &str) -> Option<PhysicalInstanceElement> {
        self.instances
            .iter()
            .find(|i| i.unique_id == unique_id)
            .cloned()
    }

    fn symbol_by_id(&self, id: i64) -> Option<FramingSymbolElement> {
        self.symbols.iter().find(|s| s.id == id).cloned()
    }

    fn material_by_id(&self, id: i64) -> Option<MaterialElement> {
        self.materials.iter().find(|m| m.id == id).cloned()
    }

    fn current_type_id(&self, instance_id: i64) -> Option<i64> {
        self.instances
            .iter()
            .find(|i| i.id == instance_id)
            .map(|i| i.type_id)
    }

    fn change_instance_type(&mut self, instance_id: i64, symbol_id: i64) -> Result<()> {
        self.require_transaction()?;
        if self.failures.rich_change_unavailable {
            return Err(ProviderError::ChangeTypeUnavailable(instance_id));
        }
        let idx = self.instance_index(instance_id)?;
        if self.symbol_by_id(symbol_id).is_none() {
            return Err(ProviderError::ElementNotFound(symbol_id));
        }
        self.instances[idx].type_id = symbol_id;
        Ok(())
    }

    fn assign_instance_symbol(&mut self, instance_id: i64, symbol_id: i64) -> Result<()> {
        self.require_transaction()?;
        if self.failures.direct_change_fails {
            return Err(ProviderError::ChangeTypeFailed {
                instance: instance_id,
                reason: "symbol assignment rejected".into(),
            });
        }
        let idx = self.instance_index(instance_id)?;
        if self.symbol_by_id(symbol_id).is_none() {
            return Err(ProviderError::ElementNotFound(symbol_id));
        }
        self.instances[idx].type_id = symbol_id;
        Ok(())
    }

    fn supports_transactions(&self) -> bool {
        !self.failures.transactions_unsupported
    }

    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        if self.failures.transactions_unsupported {
            return Err(ProviderError::TransactionsUnsupported);
        }
        if let Some(open) = &self.transaction {
            return Err(ProviderError::TransactionAlreadyOpen(open.name.clone()));
        }
        self.transaction = Some(OpenTransaction {
            name: name.to_string(),
            saved_assignments: self.instances.iter().map(|i| (i.id, i.type_id)).collect(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        self.transaction
            .take()
            .map(|_| ())
            .ok_or(ProviderError::NoOpenTransaction)
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        let open = self
            .transaction
            .take()
            .ok_or(ProviderError::NoOpenTransaction)?;
        for (id, type_id) in open.saved_assignments {
            if let Some(instance) = self.instances.iter_mut().find(|i| i.id == id) {
                instance.type_id = type_id;
            }
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.failures.save_fails {
            return Err(ProviderError::Persistence("save rejected by host".into()));
        }
        let path = self
            .path_name
            .clone()
            .ok_or_else(|| ProviderError::Persistence("model has never been saved".into()))?;
        let json = self.document_json()?;
        std::fs::write(&path, json).map_err(|e| ProviderError::Persistence(e.to_string()))
    }

    fn save_as(&mut self, path: &Path) -> Result<()> {
        if self.failures.save_as_fails {
            return Err(ProviderError::Persistence("save-as rejected by host".into()));
        }
        let json = self.document_json()?;
        std::fs::write(path, json).map_err(|e| ProviderError::Persistence(e.to_string()))
    }

    fn synchronize_with_central(&mut self) -> Result<()> {
        if !self.workshared {
            return Err(ProviderError::Persistence("model is not workshared".into()));
        }
        if self.failures.sync_fails {
            return Err(ProviderError::Persistence(
                "central model is unreachable".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::PhysicalCategory;

    fn instance(id: i64, type_id: i64) -> PhysicalInstanceElement {
        PhysicalInstanceElement {
            id,
            unique_id: format!("inst-{id}"),
            category: PhysicalCategory::Framing,
            location_curve: None,
            type_id,
            material_param: None,
            geometry_material_ids: Vec::new(),
        }
    }

    fn symbol(id: i64) -> FramingSymbolElement {
        FramingSymbolElement {
            id,
            unique_id: format!("sym-{id}"),
            family_name: Some("W-Shapes".into()),
            type_name: Some(format!("W{id}")),
            section_parameters: Default::default(),
            material_param: None,
        }
    }

    #[test]
    fn mutation_outside_transaction_is_rejected() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(10));
        model.add_symbol(symbol(20));
        assert!(matches!(
            model.change_instance_type(1, 20),
            Err(ProviderError::NoOpenTransaction)
        ));
    }

    #[test]
    fn rollback_restores_type_assignments() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_instance(instance(2, 10));
        model.add_symbol(symbol(10));
        model.add_symbol(symbol(20));

        model.begin_transaction("test").unwrap();
        model.change_instance_type(1, 20).unwrap();
        model.change_instance_type(2, 20).unwrap();
        model.rollback_transaction().unwrap();

        assert_eq!(model.current_type_id(1), Some(10));
        assert_eq!(model.current_type_id(2), Some(10));
    }

    #[test]
    fn commit_keeps_type_assignments() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(10));
        model.add_symbol(symbol(20));

        model.begin_transaction("test").unwrap();
        model.change_instance_type(1, 20).unwrap();
        model.commit_transaction().unwrap();

        assert_eq!(model.current_type_id(1), Some(20));
    }

    #[test]
    fn nested_transactions_are_rejected() {
        let mut model = MemoryModel::new("m");
        model.begin_transaction("outer").unwrap();
        assert!(matches!(
            model.begin_transaction("inner"),
            Err(ProviderError::TransactionAlreadyOpen(_))
        ));
    }

    #[test]
    fn poisoned_instance_reports_not_found_on_mutation() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(1, 10));
        model.add_symbol(symbol(20));
        model.failures.poison_instance = Some(1);

        model.begin_transaction("test").unwrap();
        assert!(matches!(
            model.change_instance_type(1, 20),
            Err(ProviderError::ElementNotFound(1))
        ));
        // Read surface is unaffected.
        assert_eq!(model.current_type_id(1), Some(10));
    }

    #[test]
    fn save_as_writes_a_loadable_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.json");

        let mut model = MemoryModel::new("tower_a");
        model.add_instance(instance(1, 10));
        model.save_as(&path).unwrap();

        let restored = MemoryModel::read_from(&path).unwrap();
        assert_eq!(restored.title(), "tower_a");
        assert_eq!(restored.current_type_id(1), Some(10));
    }

    #[test]
    fn unique_id_lookup() {
        let mut model = MemoryModel::new("m");
        model.add_instance(instance(7, 10));
        assert!(model.instance_by_unique_id("inst-7").is_some());
        assert!(model.instance_by_unique_id("inst-8").is_none());
    }
}
