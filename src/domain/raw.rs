//! RAW sidecar lookup
//!
//! This module is the single authority on which extensions count as camera
//! RAW files. A RAW sibling is any file in the source directory whose base
//! name equals the primary image's base name and whose extension is in
//! [`RAW_EXTENSIONS`], compared case-insensitively.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RAW_EXTENSIONS: [&str; 11] = [
    "cr2", "cr3", "nef", "arw", "raf", "dng", "rw2", "orf", "srw", "pef", "raw",
];

pub fn is_raw_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    RAW_EXTENSIONS.contains(&ext.as_str())
}

/// RAW files of one directory grouped by base name
#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    by_stem: HashMap<String, BTreeSet<PathBuf>>,
}

impl RawCatalog {
    /// Scans `source_dir` once. A missing or unreadable directory gives an
    /// empty catalog.
    pub fn scan(source_dir: &Path) -> Self {
        let mut by_stem: HashMap<String, BTreeSet<PathBuf>> = HashMap::new();

        let entries = match fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %source_dir.display(), error = %e, "no RAW catalog for directory");
                return Self { by_stem };
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();

            let (stem, ext) = match (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) {
                (Some(stem), Some(ext)) => (stem.to_string(), ext),
                _ => continue,
            };

            if !is_raw_extension(ext) || !path.is_file() {
                continue;
            }

            by_stem.entry(stem).or_default().insert(path);
        }

        Self { by_stem }
    }

    pub fn siblings(&self, base_name: &str) -> BTreeSet<PathBuf> {
        self.by_stem.get(base_name).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_stem.is_empty()
    }
}

/// Finds every RAW file named `base_name.<raw ext>` in `source_dir`
pub fn find_raw_siblings(base_name: &str, source_dir: &Path) -> BTreeSet<PathBuf> {
    RawCatalog::scan(source_dir).siblings(base_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(paths: &BTreeSet<PathBuf>) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect()
    }

    #[test]
    fn test_raw_extensions() {
        for ext in RAW_EXTENSIONS {
            assert!(is_raw_extension(ext));
            assert!(is_raw_extension(&ext.to_uppercase()));
        }
        assert!(!is_raw_extension("jpg"));
        assert!(!is_raw_extension("xmp"));
    }

    #[test]
    fn test_no_siblings() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("photo2.jpg"), b"x").unwrap();

        assert!(find_raw_siblings("photo2", temp_dir.path()).is_empty());
    }

    #[test]
    fn test_single_sibling_any_case() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("photo1.jpg"), b"x").unwrap();
        fs::write(dir.join("photo1.CR2"), b"raw").unwrap();
        fs::write(dir.join("photo10.cr2"), b"raw").unwrap();

        let siblings = find_raw_siblings("photo1", dir);

        assert_eq!(names(&siblings), vec!["photo1.CR2"]);
    }

    #[test]
    fn test_ambiguous_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("photo1.cr2"), b"raw").unwrap();
        fs::write(dir.join("photo1.dng"), b"raw").unwrap();
        fs::write(dir.join("photo1.xmp"), b"sidecar").unwrap();

        let siblings = find_raw_siblings("photo1", dir);

        assert_eq!(names(&siblings), vec!["photo1.cr2", "photo1.dng"]);
    }

    #[test]
    fn test_directories_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("photo1.nef")).unwrap();

        assert!(find_raw_siblings("photo1", temp_dir.path()).is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let catalog = RawCatalog::scan(Path::new("/nonexistent/pswp/raws"));
        assert!(catalog.is_empty());
        assert!(catalog.siblings("photo1").is_empty());
    }
}
