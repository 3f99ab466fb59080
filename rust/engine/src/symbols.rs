// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbol indexing for the update path.
//!
//! Maps (family name, type name) to the framing type definition id. The
//! index is rebuilt once per update run rather than cached: type
//! definitions may have changed between runs.

use rustc_hash::FxHashMap;
use tracing::info;

use strax_provider::StructuralModel;

/// Lookup of framing symbols by (family name, type name).
#[derive(Debug, Default)]
pub struct SymbolIndex {
    map: FxHashMap<(String, String), i64>,
}

impl SymbolIndex {
    /// Scans all framing type definitions once. Entries with a missing
    /// family or type name are skipped.
    pub fn build<M: StructuralModel>(model: &M) -> Self {
        let mut map = FxHashMap::default();
        for symbol in model.framing_symbols() {
            let (Some(family), Some(type_name)) = (symbol.family_name, symbol.type_name) else {
                continue;
            };
            map.insert((family, type_name), symbol.id);
        }
        info!(symbols = map.len(), "indexed framing symbols");
        Self { map }
    }

    /// Symbol id for the (family, type) pair, if known.
    pub fn get(&self, family_name: &str, type_name: &str) -> Option<i64> {
        self.map
            .get(&(family_name.to_string(), type_name.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strax_provider::{FramingSymbolElement, MemoryModel};

    fn symbol(id: i64, family: Option<&str>, type_name: Option<&str>) -> FramingSymbolElement {
        FramingSymbolElement {
            id,
            unique_id: format!("sym-{id}"),
            family_name: family.map(Into::into),
            type_name: type_name.map(Into::into),
            section_parameters: Default::default(),
            material_param: None,
        }
    }

    #[test]
    fn indexes_by_family_and_type_name() {
        let mut model = MemoryModel::new("m");
        model.add_symbol(symbol(1, Some("W-Shapes"), Some("W12x26")));
        model.add_symbol(symbol(2, Some("W-Shapes"), Some("W16x31")));

        let index = SymbolIndex::build(&model);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("W-Shapes", "W16x31"), Some(2));
        assert_eq!(index.get("W-Shapes", "W21x44"), None);
    }

    #[test]
    fn entries_with_missing_names_are_skipped() {
        let mut model = MemoryModel::new("m");
        model.add_symbol(symbol(1, None, Some("W12x26")));
        model.add_symbol(symbol(2, Some("W-Shapes"), None));
        model.add_symbol(symbol(3, Some("W-Shapes"), Some("W12x26")));

        let index = SymbolIndex::build(&model);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("W-Shapes", "W12x26"), Some(3));
    }
}
