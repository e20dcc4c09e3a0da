//! Error types for reference collection

use std::path::PathBuf;

use thiserror::Error;

/// Result type for collection operations
pub type Result<T> = std::result::Result<T, CollectError>;

/// Reference collection errors
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectError {
    /// Wrap an I/O failure together with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = CollectError::io(
            "schemas/missing.xsd",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let message = err.to_string();
        assert!(message.contains("schemas/missing.xsd"));
        assert!(message.contains("no such file"));
    }
}
