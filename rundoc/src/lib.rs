//! # rundoc
//!
//! Build output checks and documentation for JVM application runners.
//!
//! `rundoc` inspects the runnable jar a build produces and turns the
//! configuration metadata of the same build into reference pages.
//!
//! ## Features
//!
//! - **Layout Verification**: checks that a runner jar's manifest `Class-Path`
//!   matches its library directory one to one
//! - **Expected Libraries**: compares the library directory with a list of
//!   file names or artifact coordinates
//! - **Configuration Reference**: renders AsciiDoc pages from collected
//!   configuration metadata, one page per extension
//! - **Tool Configuration**: optional `.rundoc.toml` with a JSON schema
//!
//! ## Modules
//!
//! - [`config`] - Tool configuration file types
//! - [`ctx`] - Application context and state management
//! - [`doc`] - Configuration reference generation
//! - [`verify`] - Runner jar layout verification
//! - [`utils`] - Common utilities and helper functions
//!
//! ## Example
//!
//! ```rust,no_run
//! use rundoc::ctx::AppContext;
//!
//! let mut ctx = AppContext::new(".");
//! ctx.load_config(None).unwrap();
//! let expectation = ctx.layout_expectation().unwrap();
//! let jar = ctx.runner_jar_path(None).unwrap();
//! let report = ctx.verify_runner_jar(&jar, &expectation).unwrap();
//! assert!(report.passed());
//! ```

/// Tool configuration file types.
pub mod config;

/// Application context and state management.
pub mod ctx;

/// Configuration reference generation.
///
/// Groups configuration roots into extension pages and renders them as
/// AsciiDoc.
pub mod doc;

/// Common utilities and helper functions.
pub mod utils;

/// Runner jar layout verification.
pub mod verify;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;
