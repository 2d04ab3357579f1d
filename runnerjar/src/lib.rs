//! # runnerjar - Runner Jar Library
//!
//! Reads and writes the executable "runner" jars produced by a JVM
//! application build: the jar itself holds the generated entry point and a
//! manifest whose `Class-Path` points at library jars in a sibling `lib/`
//! directory.
//!
//! ## Features
//!
//! - Jar manifest codec (main attributes, named sections, 72 byte line wrapping)
//! - Opening a jar and reading its manifest and entry list
//! - Writing jars with the manifest as first entry
//! - Artifact coordinates to library file name mapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use runnerjar::RunnerJar;
//!
//! let jar = RunnerJar::open("target/app-runner.jar").unwrap();
//! for entry in jar.manifest().class_path().unwrap_or_default() {
//!     println!("{entry}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`manifest`] - Manifest parsing and serialisation
//! - [`archive`] - Jar reading and writing
//! - [`coords`] - Artifact coordinates
//! - [`error`] - Error types and result definitions

/// Jar reading and writing.
pub mod archive;

/// Artifact coordinates.
pub mod coords;

/// Error types and result definitions.
pub mod error;

/// Manifest parsing and serialisation.
pub mod manifest;

pub use archive::{read_manifest, JarWriter, RunnerJar};
pub use coords::ArtifactCoords;
pub use error::{JarError, Result};
pub use manifest::{Attributes, Manifest, Section, CLASS_PATH, MAIN_CLASS, MANIFEST_PATH};
