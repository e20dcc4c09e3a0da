//! Reference Collection
//!
//! Depth-first traversal over the file graph implied by `import` and `include`
//! directives. The caller owns the [`VisitedSet`]; every file is marked in it
//! before its content is read, which is what stops self-referencing and cyclic
//! schema families from recursing forever.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::directive::Token;
use crate::error::{CollectError, Result};
use crate::location::{clean_path, extract_location, is_remote, resolve_target};

/// Options handed through the traversal untouched.
///
/// The collector never reads these values; they travel with every recursive
/// call so deeper stages layered on top see the caller's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectOptions {
    /// Original input root, if the caller has one
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    /// Free-form settings for downstream stages
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Files already processed or currently being processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    paths: BTreeSet<PathBuf>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Insert a path, returning `true` if it was not present yet.
    pub fn mark(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    /// Consume the set, returning the paths in sorted order
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths.into_iter().collect()
    }
}

impl IntoIterator for VisitedSet {
    type Item = PathBuf;
    type IntoIter = std::collections::btree_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a VisitedSet {
    type Item = &'a PathBuf;
    type IntoIter = std::collections::btree_set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// A [`VisitedSet`] behind a mutex, for callers that walk independent
/// subtrees on several threads.
///
/// `mark` performs the membership check and the insertion under one lock so
/// two workers can never both claim the same file.
#[derive(Debug, Default)]
pub struct SharedVisitedSet {
    inner: Mutex<VisitedSet>,
}

impl SharedVisitedSet {
    pub fn new(visited: VisitedSet) -> Self {
        Self {
            inner: Mutex::new(visited),
        }
    }

    /// Claim a path; `true` means the caller is the first to see it.
    pub fn mark(&self, path: impl Into<PathBuf>) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mark(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    pub fn into_inner(self) -> VisitedSet {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Recursively collect every file referenced from `path` by `import` and
/// `include` directives into `visited`.
///
/// `base_dir` is the original input root; it is carried through for context
/// only, since locations always resolve against the directory of the file
/// that contains them. Remote locations and locations that do not exist on
/// disk are skipped. The first I/O failure aborts the whole traversal.
pub fn collect_referenced_files(
    path: &Path,
    base_dir: &Path,
    visited: &mut VisitedSet,
    options: &CollectOptions,
) -> Result<()> {
    let path = clean_path(path);

    if !visited.mark(path.clone()) {
        trace!(file = %path.display(), "already visited");
        return Ok(());
    }

    let metadata = fs::metadata(&path).map_err(|e| CollectError::io(&path, e))?;
    if metadata.is_dir() {
        return Ok(());
    }

    debug!(file = %path.display(), base = %base_dir.display(), "collecting schema references");

    let targets = {
        let file = File::open(&path).map_err(|e| CollectError::io(&path, e))?;
        let mut input = BufReader::new(file);
        let head = input.fill_buf().map_err(|e| CollectError::io(&path, e))?;

        match utf16_encoding(head) {
            Some(encoding) => {
                let mut bytes = Vec::new();
                input
                    .read_to_end(&mut bytes)
                    .map_err(|e| CollectError::io(&path, e))?;
                let (text, _) = encoding.decode_with_bom_removal(&bytes);
                scan_directives(&mut Reader::from_str(&text), &path)
            }
            None => scan_directives(&mut Reader::from_reader(input), &path),
        }
    };

    for target in targets {
        match fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => {
                debug!(file = %path.display(), target = %target.display(), "skipping directory reference");
            }
            Ok(_) => collect_referenced_files(&target, base_dir, visited, options)?,
            Err(_) => {
                debug!(file = %path.display(), target = %target.display(), "skipping dangling reference");
            }
        }
    }

    Ok(())
}

/// UTF-16 documents, by BOM or by the byte pattern of a leading `<?`.
///
/// The tokenizer only understands ASCII-compatible input, so these are
/// transcoded to UTF-8 before scanning. Everything else is streamed and its
/// declared encoding is applied to attribute values.
fn utf16_encoding(head: &[u8]) -> Option<&'static Encoding> {
    match head {
        [0xFF, 0xFE, ..] | [b'<', 0x00, b'?', 0x00, ..] => Some(UTF_16LE),
        [0xFE, 0xFF, ..] | [0x00, b'<', 0x00, b'?', ..] => Some(UTF_16BE),
        _ => None,
    }
}

/// Resolved local targets of every directive in one document, in order.
fn scan_directives<R: BufRead>(reader: &mut Reader<R>, path: &Path) -> Vec<PathBuf> {
    let mut targets = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match Token::classify(reader.read_event_into(&mut buf)) {
            Token::Directive(kind, start) => {
                let location = extract_location(&start, reader.decoder());
                if location.is_empty() {
                    continue;
                }
                if is_remote(&location) {
                    debug!(file = %path.display(), kind = kind.as_str(), %location, "skipping remote location");
                    continue;
                }
                targets.push(resolve_target(path, &location));
            }
            Token::Other => {}
            Token::Malformed(e) => {
                debug!(file = %path.display(), error = %e, "discovery stopped at malformed markup");
                break;
            }
            Token::End => break,
        }
    }

    targets
}
