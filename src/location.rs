//! Schema location handling
//!
//! Extracts the `schemaLocation` attribute from a directive, decides whether
//! the location points at the network, and resolves local locations against
//! the directory of the referencing file.

use std::path::{Component, Path, PathBuf};

use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;
use url::Url;

const SCHEMA_LOCATION: &[u8] = b"schemaLocation";

/// Return the trimmed `schemaLocation` value of a directive, or an empty string
/// when the attribute is absent or cannot be decoded.
pub fn extract_location(directive: &BytesStart<'_>, decoder: Decoder) -> String {
    directive
        .attributes()
        .filter_map(|attr| attr.ok())
        .find(|attr| attr.key.local_name().as_ref() == SCHEMA_LOCATION)
        .and_then(|attr| {
            attr.decode_and_unescape_value(decoder)
                .ok()
                .map(|value| value.trim().to_string())
        })
        .unwrap_or_default()
}

/// Whether a location names a network resource rather than a local file.
///
/// Only URLs with a host count as remote: `file:///a.xsd`, `urn:x` and
/// Windows drive paths such as `C:\a.xsd` are treated as local.
pub fn is_remote(location: &str) -> bool {
    match Url::parse(location) {
        Ok(url) => url.host_str().map(|h| !h.is_empty()).unwrap_or(false),
        Err(_) => false,
    }
}

/// Resolve a local location relative to the file that references it.
pub fn resolve_target(current_file: &Path, location: &str) -> PathBuf {
    let dir = current_file.parent().unwrap_or(Path::new(""));
    clean_path(&dir.join(location))
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component. No filesystem access.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}
