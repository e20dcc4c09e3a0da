//! Configuration management for schema-closure
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-closure.toml)
//! - Environment variables (SCHEMA_CLOSURE__*)
//!
//! ## Example config file (schema-closure.toml):
//! ```toml
//! [discovery]
//! extensions = ["xsd", "xml"]
//! skip_prefixes = ["target/", "build/"]
//!
//! [output]
//! format = "json"
//! relative = true
//!
//! [options.properties]
//! package = "schema"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::collector::CollectOptions;
use crate::discovery::DiscoveryConfig;
use crate::error::Result;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureConfig {
    /// Entry file discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// How the closure is printed
    #[serde(default)]
    pub output: OutputConfig,

    /// Passed through the traversal unchanged
    #[serde(default)]
    pub options: CollectOptions,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print paths relative to the input root
    #[serde(default)]
    pub relative: bool,
}

/// Output format for the closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One path per line
    #[default]
    Plain,
    /// Pretty-printed JSON
    Json,
}

impl ClosureConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-closure.toml",
            ".schema-closure.toml",
            "config/schema-closure.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "schema-closure", "schema-closure") {
            let xdg_config = config_dir.config_dir().join("schema-closure.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_CLOSURE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClosureConfig::default();
        assert_eq!(config.output.format, OutputFormat::Plain);
        assert!(!config.output.relative);
        assert_eq!(config.discovery.extensions, vec!["xsd"]);
    }

    #[test]
    fn test_serialize_config() {
        let config = ClosureConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[discovery]"));
        assert!(toml_str.contains("[output]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[discovery]
extensions = ["xsd", "xml"]

[output]
format = "json"
relative = true

[options.properties]
package = "orders"
"#,
        )
        .unwrap();

        let config = ClosureConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.discovery.extensions, vec!["xsd", "xml"]);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.relative);
        assert_eq!(config.options.properties.get("package").map(String::as_str), Some("orders"));
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let mut config = ClosureConfig::default();
        config.output.format = OutputFormat::Json;
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = ClosureConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }
}
