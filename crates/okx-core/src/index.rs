//! Edition -> traits lookup for the parent batch

use crate::metadata::Item;
use std::collections::BTreeMap;

/// Traits of one item, trait_type -> value
pub type Traits = BTreeMap<String, String>;

/// Trait sets keyed by edition number or override identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeIndex {
    entries: BTreeMap<String, Traits>,
}

impl AttributeIndex {
    /// Index a batch by the decimal form of each item's `edition`
    pub fn from_items(items: &[Item]) -> Self {
        let mut index = Self::default();
        for item in items {
            index.insert(item.edition.to_string(), item);
        }
        index
    }

    /// Replace entries with hand-curated overrides, keyed by `custom_edition`.
    ///
    /// Returns how many overrides were applied. Items without an identifier
    /// are ignored.
    pub fn apply_overrides(&mut self, overrides: &[Item]) -> usize {
        let mut applied = 0;
        for item in overrides {
            if let Some(id) = &item.custom_edition {
                self.insert(id.clone(), item);
                applied += 1;
            }
        }
        applied
    }

    /// Traits for an identifier
    pub fn get(&self, id: &str) -> Option<&Traits> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // A later item with the same id replaces the whole trait set
    fn insert(&mut self, id: String, item: &Item) {
        let traits = item
            .attributes
            .iter()
            .map(|a| (a.trait_type.clone(), a.value.clone()))
            .collect();
        self.entries.insert(id, traits);
    }
}
