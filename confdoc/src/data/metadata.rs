use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::item::ConfigDocItem;

/// Errors raised while loading configuration metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML metadata: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported metadata file extension: {0:?}")]
    UnsupportedExtension(String),
}

/// Items collected from one configuration root class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRoot {
    /// Fully qualified name of the root class.
    pub name: String,
    pub items: Vec<ConfigDocItem>,
}

/// Output of the metadata collector: every configuration root of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMetadata {
    pub roots: Vec<ConfigRoot>,
}

impl ConfigMetadata {
    /// Loads metadata, choosing the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let metadata = Self::from_str_with_ext(&content, ext)?;
        log::debug!(
            "loaded {} configuration roots from {}",
            metadata.roots.len(),
            path.display()
        );
        Ok(metadata)
    }

    /// Parses metadata content in the format named by `ext` (`json` or `toml`).
    pub fn from_str_with_ext(content: &str, ext: &str) -> Result<Self, MetadataError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        match ext {
            "json" => Ok(serde_json::from_str(content)?),
            "toml" => Ok(toml::from_str(content)?),
            ext => Err(MetadataError::UnsupportedExtension(ext.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::key::ConfigPhase;

    const TOML_METADATA: &str = r#"
[[roots]]
name = "io.quarkus.vertx.http.runtime.HttpConfiguration"

[[roots.items]]
[roots.items.key]
key = "quarkus.http.port"
type = "int"
config_doc = "The HTTP port"
default_value = "8080"
config_phase = "RUN_TIME"
"#;

    #[test]
    fn test_load_toml() {
        let metadata = ConfigMetadata::from_str_with_ext(TOML_METADATA, "toml").unwrap();
        assert_eq!(metadata.roots.len(), 1);

        let root = &metadata.roots[0];
        assert_eq!(root.name, "io.quarkus.vertx.http.runtime.HttpConfiguration");
        let key = root.items[0].as_key().unwrap();
        assert_eq!(key.key, "quarkus.http.port");
        assert_eq!(key.config_phase, ConfigPhase::RunTime);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(
            &path,
            r#"{"roots": [{"name": "io.quarkus.arc.ArcConfig", "items": [
                {"key": {"key": "quarkus.arc.remove-unused-beans", "type": "java.lang.String",
                         "config_phase": "BUILD_TIME"}}
            ]}]}"#,
        )
        .unwrap();

        let metadata = ConfigMetadata::from_file(&path).unwrap();
        let key = metadata.roots[0].items[0].as_key().unwrap();
        assert!(key.config_phase.is_fixed_at_build_time());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigMetadata::from_str_with_ext("roots: []", "yaml").unwrap_err();
        assert!(matches!(err, MetadataError::UnsupportedExtension(ext) if ext == "yaml"));
    }

    #[test]
    fn test_empty_content() {
        let metadata = ConfigMetadata::from_str_with_ext("   \n", "json").unwrap();
        assert!(metadata.roots.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigMetadata::from_file("/nonexistent/metadata.json").unwrap_err();
        assert!(matches!(err, MetadataError::Io { .. }));
    }
}
