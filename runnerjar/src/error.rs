//! Error types and result definitions.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while reading or writing runner jars.
#[derive(Debug, Error)]
pub enum JarError {
    /// A file system operation on `path` failed.
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip container is unreadable or could not be written.
    #[error("zip container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The archive does not contain `META-INF/MANIFEST.MF`.
    #[error("{} has no META-INF/MANIFEST.MF entry", path.display())]
    MissingManifest { path: PathBuf },

    /// The manifest text does not follow the `Name: value` line format.
    #[error("invalid manifest at line {line}: {reason}")]
    InvalidManifest { line: usize, reason: String },

    /// Artifact coordinates could not be parsed.
    #[error("invalid artifact coordinates `{0}`, expected group:artifact:version[:packaging]")]
    InvalidCoords(String),
}

impl JarError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_manifest(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidManifest {
            line,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JarError>;
