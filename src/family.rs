//! Schema families
//!
//! A family is the closure of every entry file under an input together with
//! everything those files import or include. Downstream compilers load the
//! family as one unit.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::collector::{collect_referenced_files, CollectOptions, VisitedSet};
use crate::discovery::{schema_files, DiscoveryConfig};
use crate::error::{CollectError, Result};
use crate::location::clean_path;

/// The collected closure for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaFamily {
    /// Input file or directory the family was collected from
    pub input: PathBuf,
    /// Directory `files` are reported against, cleaned like `files`
    pub root: PathBuf,
    /// Every reachable file, sorted
    pub files: Vec<PathBuf>,
    /// SHA256 over the contents of `files`, in order
    pub bundle_hash: String,
}

impl SchemaFamily {
    /// Files relative to the input root where they live under it
    pub fn relative_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|f| {
                f.strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| f.clone())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Directory that locations in a family are reported against
fn root_dir(input: &Path) -> &Path {
    if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Path::new(""))
    }
}

/// `root_dir`, cleaned the way collected paths are. The current directory
/// becomes the empty path so it strips from relative file paths.
fn report_root(input: &Path) -> PathBuf {
    let root = clean_path(root_dir(input));
    if root == Path::new(".") {
        PathBuf::new()
    } else {
        root
    }
}

/// Collect the family reachable from `input`.
pub fn collect_family(
    input: &Path,
    discovery: &DiscoveryConfig,
    options: &CollectOptions,
) -> Result<SchemaFamily> {
    let entries = schema_files(input, discovery)?;
    let base_dir = root_dir(input);

    let mut visited = VisitedSet::new();
    for entry in &entries {
        collect_referenced_files(entry, base_dir, &mut visited, options)?;
    }

    let files: Vec<PathBuf> = visited
        .into_paths()
        .into_iter()
        .filter(|p| p.is_file())
        .collect();

    let mut hasher = Sha256::new();
    for file in &files {
        let content = fs::read(file).map_err(|e| CollectError::io(file, e))?;
        hasher.update(&content);
        hasher.update([0u8]);
    }
    let bundle_hash = format!("{:x}", hasher.finalize());

    info!(
        input = %input.display(),
        entries = entries.len(),
        files = files.len(),
        "collected schema family"
    );

    Ok(SchemaFamily {
        input: input.to_path_buf(),
        root: report_root(input),
        files,
        bundle_hash,
    })
}
