//! # confdoc
//!
//! Turns configuration metadata into reference documentation.
//!
//! A metadata collector records, for every configuration root of an
//! application framework, the keys it exposes (name, type, accepted values,
//! default) grouped in sections. `confdoc` derives the strings a reference
//! page needs from those records and renders them as AsciiDoc tables.
//!
//! ## Features
//!
//! - Primitive default values and wrapper type unboxing
//! - Javadoc link synthesis for JDK and known third-party types
//! - Camel-case to hyphenated key conversion (`HTTPServer` to `http-server`)
//! - Per-extension documentation file names
//! - Merging of sections contributed by several configuration roots
//! - TOML and JSON metadata files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use confdoc::{adoc, data::ConfigMetadata, merge, util};
//!
//! let metadata = ConfigMetadata::from_file("target/config-metadata.json").unwrap();
//! let mut items = Vec::new();
//! for root in metadata.roots {
//!     merge::append_config_items_into_existing_ones(&mut items, root.items);
//! }
//! let page = adoc::render_config_reference("quarkus-http", &items);
//! assert_eq!(util::hyphenate("JBossLogManager"), "jboss-log-manager");
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Documentation records and metadata loading
//! - [`util`] - String transformations
//! - [`merge`] - Section merging
//! - [`adoc`] - AsciiDoc rendering

/// Documentation records and metadata loading.
pub mod data;

/// String transformations for documentation values.
pub mod util;

/// Merging of items from several configuration roots.
pub mod merge;

/// AsciiDoc reference table rendering.
pub mod adoc;

pub use data::{
    ConfigDocItem, ConfigDocKey, ConfigDocSection, ConfigMetadata, ConfigPhase, ConfigRoot,
    MetadataError,
};
pub use merge::append_config_items_into_existing_ones;
