//! NFT metadata as produced by layered-art generators
//!
//! A batch is a `_metadata.json` array of items. Override files are
//! single items saved one per file; the file stem names the edition they
//! replace.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One NFT metadata record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub edition: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Vec<Attribute>,
    /// Edition this item inherits traits from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_edition: Option<String>,
    /// Identifier supplied by an override file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_edition: Option<String>,
}

impl Item {
    /// Last `/`-separated segment of `image`
    pub fn file_name(&self) -> &str {
        file_name_of(&self.image)
    }
}

/// A single trait
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    #[serde(deserialize_with = "null_as_default")]
    pub trait_type: String,
    #[serde(deserialize_with = "scalar_to_string")]
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accept string, number, bool or null trait values as text
fn scalar_to_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_)) => Ok(v.to_string()),
        other => Err(D::Error::custom(format!(
            "trait value must be a string, number or bool, found {}",
            other
        ))),
    }
}

/// Text after the last `/`, or the whole string if there is none
pub fn file_name_of(image: &str) -> &str {
    image.rsplit_once('/').map_or(image, |(_, last)| last)
}

/// Load a JSON array of items
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| Error::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load one override item; its `custom_edition` is the file stem
pub fn load_override<P: AsRef<Path>>(path: P) -> Result<Item> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut item: Item = serde_json::from_str(&content).map_err(|e| Error::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    item.custom_edition = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());

    Ok(item)
}

/// Load every `.json` file directly inside `dir`, sorted by file name.
///
/// Sub-directories and other files are ignored. Any unreadable or invalid
/// override aborts the load.
pub fn load_overrides<P: AsRef<Path>>(dir: P) -> Result<Vec<Item>> {
    let dir = dir.as_ref();
    let read_err = |e: std::io::Error| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        // A bare `.json` has no extension here, so it is never loaded
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if entry.file_type().map_err(read_err)?.is_file() && is_json {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(load_override).collect()
}
