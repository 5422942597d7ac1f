//! Configuration for the rename and merge tools
//!
//! Both tools read the same INI file (`convert_okx.ini` by default). The
//! rename tool uses the `[rename]` section; the merge tool uses `[paths]`
//! and `[fields]`.

use crate::error::{Error, Result};
use crate::ini::{parse_ini, Ini};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INI_PATH: &str = "./convert_okx.ini";
pub const DEFAULT_INPUT_PATH: &str = "./";
pub const DEFAULT_OUTPUT_PATH: &str = "./rename";
pub const DEFAULT_NAME_PREFIX: &str = "NFT";
pub const DEFAULT_NAME_FORMAT: &str = "{0} #{1}";
pub const DEFAULT_START_NUMBER: u64 = 1;

const RENAME_SECTION: &str = "rename";
const PATHS_SECTION: &str = "paths";
const FIELDS_SECTION: &str = "fields";

/// Read and parse an INI file, distinguishing "absent" from "unreadable"
fn read_ini(path: &Path) -> Result<Ini> {
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(parse_ini(&content))
}

/// Effective settings for the rename tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameConfig {
    /// CSV file or directory to process
    pub input: PathBuf,
    /// Output file or directory
    pub output: PathBuf,
    /// Substituted for `{0}` in the format
    pub prefix: String,
    /// Name template with `{0}` and `{1}` placeholders
    pub format: String,
    /// First number substituted for `{1}`
    pub start: u64,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            prefix: DEFAULT_NAME_PREFIX.to_string(),
            format: DEFAULT_NAME_FORMAT.to_string(),
            start: DEFAULT_START_NUMBER,
        }
    }
}

/// Values passed on the command line, before deciding what overrides what
#[derive(Debug, Clone, PartialEq)]
pub struct RenameOverrides {
    pub input: String,
    pub output: String,
    pub prefix: String,
    pub format: String,
    pub start: i64,
}

impl Default for RenameOverrides {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_PATH.to_string(),
            output: DEFAULT_OUTPUT_PATH.to_string(),
            prefix: DEFAULT_NAME_PREFIX.to_string(),
            format: DEFAULT_NAME_FORMAT.to_string(),
            start: DEFAULT_START_NUMBER as i64,
        }
    }
}

/// A config value that a command-line flag replaced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverriddenField {
    pub field: &'static str,
    pub previous: String,
    pub value: String,
}

impl RenameConfig {
    /// Load the `[rename]` section, back-filling unset keys with defaults.
    ///
    /// Fails only if the file is missing or unreadable, or has no
    /// `[rename]` section.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ini = read_ini(path)?;
        Self::from_ini(&ini).ok_or_else(|| Error::ConfigSectionMissing {
            path: path.to_path_buf(),
            section: RENAME_SECTION.to_string(),
        })
    }

    /// Build from an already parsed document; `None` if `[rename]` is absent
    pub fn from_ini(ini: &Ini) -> Option<Self> {
        if !ini.has_section(RENAME_SECTION) {
            return None;
        }

        let defaults = Self::default();
        let get = |key| ini.get_non_empty(RENAME_SECTION, key);

        let start = get("start").map(parse_leading_int).unwrap_or(0);

        Some(Self {
            input: get("input").map(PathBuf::from).unwrap_or(defaults.input),
            output: get("output").map(PathBuf::from).unwrap_or(defaults.output),
            prefix: get("prefix").map(str::to_string).unwrap_or(defaults.prefix),
            format: get("format").map(str::to_string).unwrap_or(defaults.format),
            start: u64::try_from(start)
                .ok()
                .filter(|&n| n > 0)
                .unwrap_or(defaults.start),
        })
    }

    /// Apply command-line values on top of the loaded config.
    ///
    /// A flag only wins when it is set and differs from its built-in
    /// default, so an untouched flag never clobbers a configured value.
    pub fn apply_overrides(&mut self, flags: &RenameOverrides) -> Vec<OverriddenField> {
        let mut applied = Vec::new();

        if !flags.input.is_empty() && flags.input != DEFAULT_INPUT_PATH {
            applied.push(OverriddenField {
                field: "input",
                previous: self.input.display().to_string(),
                value: flags.input.clone(),
            });
            self.input = PathBuf::from(&flags.input);
        }
        if !flags.output.is_empty() && flags.output != DEFAULT_OUTPUT_PATH {
            applied.push(OverriddenField {
                field: "output",
                previous: self.output.display().to_string(),
                value: flags.output.clone(),
            });
            self.output = PathBuf::from(&flags.output);
        }
        if !flags.prefix.is_empty() && flags.prefix != DEFAULT_NAME_PREFIX {
            applied.push(OverriddenField {
                field: "prefix",
                previous: std::mem::replace(&mut self.prefix, flags.prefix.clone()),
                value: flags.prefix.clone(),
            });
        }
        if !flags.format.is_empty() && flags.format != DEFAULT_NAME_FORMAT {
            applied.push(OverriddenField {
                field: "format",
                previous: std::mem::replace(&mut self.format, flags.format.clone()),
                value: flags.format.clone(),
            });
        }
        if let Ok(start) = u64::try_from(flags.start) {
            if start > 0 && start != DEFAULT_START_NUMBER {
                applied.push(OverriddenField {
                    field: "start",
                    previous: self.start.to_string(),
                    value: start.to_string(),
                });
                self.start = start;
            }
        }

        applied
    }
}

/// Parse the leading decimal integer of `s` (`"12abc"` -> 12), or 0
fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    s[..sign_len + digits_len].parse().unwrap_or(0)
}

/// Effective settings for the merge tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeConfig {
    /// Parent batch `_metadata.json`
    pub file1: PathBuf,
    /// Child batch `_metadata.json`
    pub file2: PathBuf,
    /// Directory of hand-curated override files for the parent batch
    pub dir2: Option<PathBuf>,
    /// Trait whose value names the parent edition
    pub parent_key: String,
}

impl MergeConfig {
    /// Load `[paths]` and `[fields]`; `file1`, `file2` and `parent_key`
    /// are required.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ini = read_ini(path)?;
        Self::from_ini(&ini).map_err(|field| Error::ConfigMissingField {
            path: path.to_path_buf(),
            field: field.to_string(),
        })
    }

    /// Build from an already parsed document, naming the first missing field
    pub fn from_ini(ini: &Ini) -> std::result::Result<Self, &'static str> {
        let file1 = ini.get_non_empty(PATHS_SECTION, "file1").ok_or("file1")?;
        let file2 = ini.get_non_empty(PATHS_SECTION, "file2").ok_or("file2")?;
        let parent_key = ini
            .get_non_empty(FIELDS_SECTION, "parent_key")
            .ok_or("parent_key")?;

        Ok(Self {
            file1: PathBuf::from(file1),
            file2: PathBuf::from(file2),
            dir2: ini.get_non_empty(PATHS_SECTION, "dir2").map(PathBuf::from),
            parent_key: parent_key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rename_defaults_backfilled() {
        let ini = parse_ini("[rename]\nprefix = Cat\nstart = abc\n");
        let config = RenameConfig::from_ini(&ini).unwrap();

        assert_eq!(config.prefix, "Cat");
        assert_eq!(config.input, PathBuf::from("./"));
        assert_eq!(config.output, PathBuf::from("./rename"));
        assert_eq!(config.format, "{0} #{1}");
        assert_eq!(config.start, 1);
    }

    #[test]
    fn test_rename_start_parsing() {
        let start = |v: &str| {
            let ini = parse_ini(&format!("[rename]\nstart = {}\n", v));
            RenameConfig::from_ini(&ini).unwrap().start
        };

        assert_eq!(start("42"), 42);
        assert_eq!(start("12abc"), 12);
        assert_eq!(start("0"), 1);
        assert_eq!(start("-5"), 1);
    }

    #[test]
    fn test_rename_section_required() {
        let ini = parse_ini("[paths]\nfile1 = a\n");
        assert!(RenameConfig::from_ini(&ini).is_none());
    }

    #[test]
    fn test_rename_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.ini");
        assert!(matches!(
            RenameConfig::load(&missing),
            Err(Error::ConfigNotFound(_))
        ));

        let other = dir.path().join("other.ini");
        fs::write(&other, "[paths]\nfile1 = a.json\n").unwrap();
        assert!(matches!(
            RenameConfig::load(&other),
            Err(Error::ConfigSectionMissing { .. })
        ));
    }

    #[test]
    fn test_overrides_only_when_not_default() {
        let mut config = RenameConfig {
            input: PathBuf::from("in"),
            output: PathBuf::from("out"),
            prefix: "Cat".to_string(),
            format: "{0}-{1}".to_string(),
            start: 10,
        };

        let applied = config.apply_overrides(&RenameOverrides::default());
        assert!(applied.is_empty());
        assert_eq!(config.prefix, "Cat");
        assert_eq!(config.start, 10);

        let flags = RenameOverrides {
            prefix: "Dog".to_string(),
            start: 7,
            ..RenameOverrides::default()
        };
        let applied = config.apply_overrides(&flags);

        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].field, "prefix");
        assert_eq!(applied[0].previous, "Cat");
        assert_eq!(config.prefix, "Dog");
        assert_eq!(config.start, 7);
        assert_eq!(config.input, PathBuf::from("in"));
    }

    #[test]
    fn test_negative_start_flag_ignored() {
        let mut config = RenameConfig::default();
        let flags = RenameOverrides {
            start: -3,
            ..RenameOverrides::default()
        };

        assert!(config.apply_overrides(&flags).is_empty());
        assert_eq!(config.start, 1);
    }

    #[test]
    fn test_merge_config() {
        let ini = parse_ini(
            "[paths]\nfile1 = 1/_metadata.json\nfile2 = 2/_metadata.json\ndir2 = manual\n[fields]\nparent_key = Parent\n",
        );
        let config = MergeConfig::from_ini(&ini).unwrap();

        assert_eq!(config.file1, PathBuf::from("1/_metadata.json"));
        assert_eq!(config.file2, PathBuf::from("2/_metadata.json"));
        assert_eq!(config.dir2, Some(PathBuf::from("manual")));
        assert_eq!(config.parent_key, "Parent");
    }

    #[test]
    fn test_merge_config_optional_dir2() {
        let ini = parse_ini("[paths]\nfile1 = a\nfile2 = b\ndir2 =\n[fields]\nparent_key = P\n");
        assert_eq!(MergeConfig::from_ini(&ini).unwrap().dir2, None);
    }

    #[test]
    fn test_merge_config_missing_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("convert_okx.ini");
        fs::write(&path, "[paths]\nfile1 = a\nfile2 = b\n").unwrap();

        match MergeConfig::load(&path) {
            Err(Error::ConfigMissingField { field, .. }) => assert_eq!(field, "parent_key"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
