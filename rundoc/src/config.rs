//! Tool configuration types.
//!
//! Configuration is read from `.rundoc.toml` in the workspace directory.
//! Every field has a default, so the file is optional and may be partial.
//!
//! # Configuration File Format
//!
//! ```toml
//! [verify]
//! runner_jar = "target/app-runner.jar"
//! main_class = "io.quarkus.runner.GeneratedMain"
//! expected_artifacts = ["io.quarkus:quarkus-core:3.0.0"]
//!
//! [doc]
//! metadata = "target/config-metadata.json"
//! output_dir = "${workspaceFolder}/docs/generated"
//! ```
//!
//! Path values accept `${workspaceFolder}` and `${env:VAR}` placeholders.

use std::path::Path;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::verify::{DEFAULT_LIB_PREFIX, DEFAULT_MAIN_CLASS};

/// File name of the configuration looked up in the workspace.
pub const CONFIG_FILE_NAME: &str = ".rundoc.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct RundocConfig {
    /// Runner jar layout verification.
    pub verify: VerifyConfig,
    /// Configuration reference generation.
    pub doc: DocConfig,
}

/// Settings for `rundoc verify`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct VerifyConfig {
    /// Runner jar to check when none is given on the command line.
    pub runner_jar: Option<String>,
    /// Library directory; defaults to `lib` next to the runner jar.
    pub lib_dir: Option<String>,
    /// Expected `Main-Class` manifest attribute.
    pub main_class: String,
    /// Prefix every `Class-Path` entry must carry.
    pub lib_prefix: String,
    /// Library file names that must make up the library directory.
    pub expected_libs: Vec<String>,
    /// Artifacts (`group:artifact:version[:packaging]`) whose library files
    /// must make up the library directory.
    pub expected_artifacts: Vec<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            runner_jar: None,
            lib_dir: None,
            main_class: DEFAULT_MAIN_CLASS.to_string(),
            lib_prefix: DEFAULT_LIB_PREFIX.to_string(),
            expected_libs: Vec::new(),
            expected_artifacts: Vec::new(),
        }
    }
}

/// Settings for `rundoc doc`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct DocConfig {
    /// Metadata file produced by the collector (`.json` or `.toml`).
    pub metadata: String,
    /// Directory the `.adoc` pages are written to.
    pub output_dir: String,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            metadata: "target/config-metadata.json".to_string(),
            output_dir: "target/generated/config".to_string(),
        }
    }
}

impl RundocConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// JSON schema of the configuration file.
    pub fn schema_json() -> anyhow::Result<String> {
        let schema = schemars::schema_for!(RundocConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = RundocConfig::from_toml_str("").unwrap();
        assert_eq!(config, RundocConfig::default());
        assert_eq!(config.verify.main_class, DEFAULT_MAIN_CLASS);
        assert_eq!(config.verify.lib_prefix, "lib/");
    }

    #[test]
    fn test_partial_config() {
        let config = RundocConfig::from_toml_str(
            r#"
[verify]
runner_jar = "target/app-runner.jar"
expected_artifacts = ["org.acme:dep:1.0"]

[doc]
output_dir = "docs"
"#,
        )
        .unwrap();

        assert_eq!(config.verify.runner_jar.as_deref(), Some("target/app-runner.jar"));
        assert_eq!(config.verify.main_class, DEFAULT_MAIN_CLASS);
        assert_eq!(config.verify.expected_artifacts, vec!["org.acme:dep:1.0"]);
        assert_eq!(config.doc.output_dir, "docs");
        assert_eq!(config.doc.metadata, "target/config-metadata.json");
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(RundocConfig::from_toml_str("[verify]\nexpected_libs = 3\n").is_err());
    }

    #[test]
    fn test_schema_mentions_sections() {
        let schema = RundocConfig::schema_json().unwrap();
        assert!(schema.contains("VerifyConfig"));
        assert!(schema.contains("output_dir"));
    }
}
