//! okx-core: Core library for preparing NFT collections for OKX listing
//!
//! This library provides functionality to:
//! - Load tool settings from a small INI file
//! - Renumber the `name` column of CSV exports, across whole directory trees
//! - Load layered NFT metadata batches and hand-curated override files
//! - Flatten child items with their inherited parent traits into one CSV

pub mod config;
pub mod error;
pub mod index;
pub mod ini;
pub mod merger;
pub mod metadata;
pub mod renamer;
pub mod scanner;
pub mod table;

pub use config::{MergeConfig, OverriddenField, RenameConfig, RenameOverrides};
pub use error::{Error, Result};
pub use index::AttributeIndex;
pub use merger::{attribute_column, build_row, merge_items, MergedRow, MergedTable};
pub use metadata::{load_items, load_overrides, Attribute, Item};
pub use renamer::{rename_file, rename_path, rename_records, NameFormat, RenameSummary};
pub use scanner::{scan_csv_files, CsvFile};
pub use table::Records;
