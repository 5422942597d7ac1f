//! Flatten child metadata and inherited parent traits into OKX CSV rows
//!
//! A child item may carry a "parent key" trait whose value is the edition of
//! an item in the parent batch. The child's own traits come first; any trait
//! it does not set is filled in from that parent.

use crate::error::Result;
use crate::index::AttributeIndex;
use crate::metadata::Item;
use crate::table::write_rows;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Columns that lead every output file, in order
pub const FIXED_COLUMNS: [&str; 3] = ["name", "description", "file_name"];

/// Column name for a trait
pub fn attribute_column(trait_type: &str) -> String {
    format!("attributes[{}]", trait_type)
}

/// One output row, column -> value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedRow {
    pub cells: BTreeMap<String, String>,
    /// Parent identifier taken from the parent-key trait, if any
    pub parent: Option<String>,
}

impl MergedRow {
    /// Cell value, empty if the row lacks the column
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Attribute columns present in this row
    pub fn attribute_columns(&self) -> impl Iterator<Item = &str> {
        self.cells
            .keys()
            .map(String::as_str)
            .filter(|c| !FIXED_COLUMNS.contains(c))
    }
}

/// All rows plus the final column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedTable {
    /// Fixed columns followed by attribute columns sorted by name
    pub columns: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header plus one record per row, projected onto `columns`
    pub fn records(&self) -> Vec<Vec<&str>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.columns.iter().map(String::as_str).collect());
        for row in &self.rows {
            records.push(self.columns.iter().map(|c| row.get(c)).collect());
        }
        records
    }

    /// Write the table as CSV, creating parent directories as needed
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_rows(path.as_ref(), self.records())
    }
}

/// Build the row for one child item.
///
/// Attributes are read in order until the first one named `parent_key`;
/// its value becomes the parent identifier and the rest of the list is not
/// read. Parent traits only fill columns the child left unset.
pub fn build_row(item: &Item, parent_key: &str, index: &AttributeIndex) -> MergedRow {
    let mut cells = BTreeMap::new();
    cells.insert("name".to_string(), item.name.clone());
    cells.insert("description".to_string(), item.description.clone());
    cells.insert("file_name".to_string(), item.file_name().to_string());

    let mut parent = item.parent_edition.clone();
    for attr in &item.attributes {
        if attr.trait_type == parent_key {
            parent = Some(attr.value.clone());
            break;
        }
        cells.insert(attribute_column(&attr.trait_type), attr.value.clone());
    }

    let inherited = parent
        .as_deref()
        .filter(|id| !id.is_empty())
        .and_then(|id| index.get(id));

    if let Some(traits) = inherited {
        for (trait_type, value) in traits {
            cells
                .entry(attribute_column(trait_type))
                .or_insert_with(|| value.clone());
        }
    }

    MergedRow { cells, parent }
}

/// Build rows for a whole child batch, in batch order
pub fn merge_items(items: &[Item], parent_key: &str, index: &AttributeIndex) -> MergedTable {
    let rows: Vec<MergedRow> = items
        .iter()
        .map(|item| build_row(item, parent_key, index))
        .collect();

    let attribute_columns: BTreeSet<&str> =
        rows.iter().flat_map(MergedRow::attribute_columns).collect();

    let columns = FIXED_COLUMNS
        .iter()
        .copied()
        .chain(attribute_columns)
        .map(str::to_string)
        .collect();

    MergedTable { columns, rows }
}
