//! Configuration documentation data structures.
//!
//! This module provides the records the metadata collector produces and the
//! documentation generator consumes:
//!
//! - [`key`] - Documentation for a single configuration property
//! - [`item`] - Documentation tree nodes (keys and sections)
//! - [`metadata`] - Configuration roots and metadata file loading

/// Documentation for a single configuration property.
pub mod key;

/// Documentation tree nodes.
pub mod item;

/// Configuration roots and metadata file loading.
pub mod metadata;

pub use item::{ConfigDocItem, ConfigDocSection};
pub use key::{ConfigDocKey, ConfigPhase};
pub use metadata::{ConfigMetadata, ConfigRoot, MetadataError};
