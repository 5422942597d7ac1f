//! Minimal line-oriented INI reader shared by both tools
//!
//! Only what the tools need: `[section]` headers, `key = value` pairs and
//! `#` comments. There is no escaping, quoting or multi-line support.

use std::collections::BTreeMap;

const UTF8_BOM: char = '\u{feff}';

/// Parsed INI document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ini {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Ini {
    /// Whether a `[name]` header appeared anywhere in the document
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Look up a value, returning `None` for missing keys and sections
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    /// Like [`Ini::get`], but treats an empty value as missing
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|v| !v.is_empty())
    }
}

/// Parse INI text.
///
/// Keys that appear before the first section header are dropped. When a key
/// repeats inside a section the last value wins.
pub fn parse_ini(content: &str) -> Ini {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut ini = Ini::default();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let name = line.trim_matches(|c| c == '[' || c == ']').to_string();
            ini.sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some(section) = current.as_ref() else {
            continue;
        };

        if let Some((key, value)) = line.split_once('=') {
            ini.sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    ini
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_keys() {
        let ini = parse_ini("[paths]\nfile1 = a.json\nfile2=b.json\n\n[fields]\nparent_key = Body\n");

        assert_eq!(ini.get("paths", "file1"), Some("a.json"));
        assert_eq!(ini.get("paths", "file2"), Some("b.json"));
        assert_eq!(ini.get("fields", "parent_key"), Some("Body"));
        assert_eq!(ini.get("fields", "file1"), None);
    }

    #[test]
    fn test_strips_bom_and_comments() {
        let ini = parse_ini("\u{feff}[rename]\r\n# prefix = ignored\r\nprefix = Cat\r\n");

        assert!(ini.has_section("rename"));
        assert_eq!(ini.get("rename", "prefix"), Some("Cat"));
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let ini = parse_ini("[rename]\nformat = {0}={1}\n");
        assert_eq!(ini.get("rename", "format"), Some("{0}={1}"));
    }

    #[test]
    fn test_keys_outside_section_ignored() {
        let ini = parse_ini("input = nowhere\n[rename]\noutput = out\n");

        assert_eq!(ini.get("", "input"), None);
        assert_eq!(ini.get("rename", "input"), None);
        assert_eq!(ini.get("rename", "output"), Some("out"));
    }

    #[test]
    fn test_empty_section_is_recorded() {
        let ini = parse_ini("[rename]\n");
        assert!(ini.has_section("rename"));
        assert!(!ini.has_section("paths"));
    }

    #[test]
    fn test_last_value_wins_and_empty_values() {
        let ini = parse_ini("[paths]\ndir2 = first\ndir2 = second\nfile1 =\nnot a pair\n");

        assert_eq!(ini.get("paths", "dir2"), Some("second"));
        assert_eq!(ini.get("paths", "file1"), Some(""));
        assert_eq!(ini.get_non_empty("paths", "file1"), None);
    }
}
