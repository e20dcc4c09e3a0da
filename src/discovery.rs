//! Entry file discovery
//!
//! An input may be a single schema file or a directory of them. Directories
//! are walked recursively and every file with a schema extension becomes an
//! entry point for reference collection.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{CollectError, Result};

/// Which files count as schema entry points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File extensions (without the dot), compared case-insensitively
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Skip files whose path relative to the input starts with one of these
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["xsd".to_string()]
}

fn default_skip_prefixes() -> Vec<String> {
    vec![
        "target/".to_string(),
        ".git/".to_string(),
        "node_modules/".to_string(),
    ]
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            skip_prefixes: default_skip_prefixes(),
        }
    }
}

impl DiscoveryConfig {
    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn is_skipped(&self, relative: &Path) -> bool {
        let relative_str = relative.to_string_lossy().replace('\\', "/");
        self.skip_prefixes.iter().any(|p| relative_str.starts_with(p))
    }
}

/// List the entry files for an input path.
///
/// A file input is returned as-is whatever its extension. A directory input
/// yields its schema files sorted by path.
pub fn schema_files(input: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(input).map_err(|e| CollectError::io(input, e))?;
    if !metadata.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !config.matches_extension(path) {
            continue;
        }

        let relative = path.strip_prefix(input).unwrap_or(path);
        if config.is_skipped(relative) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.extensions, vec!["xsd"]);
        assert!(config.skip_prefixes.contains(&".git/".to_string()));
    }

    #[test]
    fn test_directory_walk_filters() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::create_dir_all(dir.path().join("target/gen")).unwrap();

        fs::write(dir.path().join("b.xsd"), "<schema/>").unwrap();
        fs::write(dir.path().join("a.XSD"), "<schema/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();
        fs::write(dir.path().join("nested/c.xsd"), "<schema/>").unwrap();
        fs::write(dir.path().join("target/gen/skipped.xsd"), "<schema/>").unwrap();

        let files = schema_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.XSD"),
                dir.path().join("b.xsd"),
                dir.path().join("nested/c.xsd"),
            ]
        );
    }

    #[test]
    fn test_single_file_input() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("schema.xml");
        fs::write(&file, "<schema/>").unwrap();

        let files = schema_files(&file, &DiscoveryConfig::default()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let result = schema_files(&dir.path().join("nope"), &DiscoveryConfig::default());
        assert!(matches!(result, Err(CollectError::Io { .. })));
    }
}
