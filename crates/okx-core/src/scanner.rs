//! Directory scanner for discovering CSV files to rename

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A CSV file found under an input root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Path relative to the scanned root, reused under the output root
    pub relative: PathBuf,
}

impl CsvFile {
    /// Where this file lands under `output_root`
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.relative)
    }
}

/// Whether a path has a `.csv` extension, ignoring case
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Recursively find every CSV file under `root`.
///
/// Entries come back in walk order with siblings sorted by file name, which
/// is the order the rename counter advances in. Symlinks are followed, and
/// the link's own path is what gets mirrored. Directories and non-CSV files
/// are skipped; an unreadable directory or a link loop aborts the scan.
pub fn scan_csv_files<P: AsRef<Path>>(root: P) -> Result<Vec<CsvFile>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_csv(path) {
            continue;
        }

        let relative = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));

        files.push(CsvFile {
            path: path.to_path_buf(),
            relative,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_csv_case_insensitive() {
        assert!(is_csv(Path::new("a.csv")));
        assert!(is_csv(Path::new("dir/B.CSV")));
        assert!(!is_csv(Path::new("a.csv.bak")));
        assert!(!is_csv(Path::new("csv")));
    }

    #[test]
    fn test_scan_sorted_and_relative() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("b.csv"), "name\n").unwrap();
        fs::write(root.join("a.CSV"), "name\n").unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();
        fs::write(root.join("sub").join("x.csv"), "name\n").unwrap();

        let files = scan_csv_files(root).unwrap();
        let relative: Vec<_> = files.iter().map(|f| f.relative.clone()).collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.CSV"),
                PathBuf::from("b.csv"),
                PathBuf::from("sub").join("x.csv"),
            ]
        );
        assert_eq!(
            files[2].output_path(Path::new("out")),
            Path::new("out").join("sub").join("x.csv")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_csv() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("in");
        fs::create_dir_all(&root).unwrap();
        fs::write(dir.path().join("real.csv"), "name\nx\n").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.csv"), root.join("linked.csv")).unwrap();

        let files = scan_csv_files(&root).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, root.join("linked.csv"));
        assert_eq!(files[0].relative, PathBuf::from("linked.csv"));
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        assert!(scan_csv_files(dir.path().join("nope")).is_err());
    }
}
