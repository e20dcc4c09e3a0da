//! Schema Closure
//!
//! Collects the transitive closure of XML Schema documents reachable from an
//! entry file through `import` and `include` directives, so a downstream
//! compiler can load a whole schema family as one unit.
//!
//! ## Features
//!
//! - **Streaming**: documents are tokenized, never built into a tree
//! - **Charset aware**: declared document encodings are honoured
//! - **Cycle safe**: each file is visited at most once
//! - **Local only**: remote `schemaLocation` URLs are never fetched
//!
//! ## Example
//!
//! ```text
//! schemas/
//! ├── order.xsd        <xs:include schemaLocation="common/types.xsd"/>
//! └── common/
//!     ├── types.xsd    <xs:import schemaLocation="codes.xsd"/>
//!     └── codes.xsd
//! ```
//!
//! ```rust,no_run
//! use std::path::Path;
//! use schema_closure::{collect_referenced_files, CollectOptions, VisitedSet};
//!
//! let mut visited = VisitedSet::new();
//! collect_referenced_files(
//!     Path::new("schemas/order.xsd"),
//!     Path::new("schemas"),
//!     &mut visited,
//!     &CollectOptions::default(),
//! )?;
//! assert_eq!(visited.len(), 3);
//! # Ok::<(), schema_closure::CollectError>(())
//! ```

pub mod collector;
pub mod config;
pub mod directive;
pub mod discovery;
pub mod error;
pub mod family;
pub mod location;

pub use collector::{collect_referenced_files, CollectOptions, SharedVisitedSet, VisitedSet};
pub use config::{ClosureConfig, OutputConfig, OutputFormat};
pub use directive::{DirectiveKind, Token};
pub use discovery::{schema_files, DiscoveryConfig};
pub use error::{CollectError, Result};
pub use family::{collect_family, SchemaFamily};
pub use location::{clean_path, extract_location, is_remote, resolve_target};
