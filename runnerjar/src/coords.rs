//! Artifact coordinates and the library file names derived from them.

use std::{fmt, str::FromStr};

use crate::error::JarError;

/// Default packaging type.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Maven-style artifact coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoords {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
}

impl ArtifactCoords {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: DEFAULT_PACKAGING.to_string(),
        }
    }

    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = packaging.into();
        self
    }

    /// File name the artifact gets in a runner's library directory:
    /// `group.artifact-version.packaging`.
    pub fn lib_file_name(&self) -> String {
        format!(
            "{}.{}-{}.{}",
            self.group_id, self.artifact_id, self.version, self.packaging
        )
    }
}

impl FromStr for ArtifactCoords {
    type Err = JarError;

    /// Parses `group:artifact:version[:packaging]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(JarError::InvalidCoords(s.to_string()));
        }
        match parts.as_slice() {
            [g, a, v] => Ok(Self::new(*g, *a, *v)),
            [g, a, v, p] => Ok(Self::new(*g, *a, *v).with_packaging(*p)),
            _ => Err(JarError::InvalidCoords(s.to_string())),
        }
    }
}

impl fmt::Display for ArtifactCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if self.packaging != DEFAULT_PACKAGING {
            write!(f, ":{}", self.packaging)?;
        }
        Ok(())
    }
}
