//! Application context and state management.
//!
//! This module provides the [`AppContext`] type which holds the state shared
//! by every `rundoc` command: the workspace paths and the loaded tool
//! configuration. Command modules extend it with their own `impl AppContext`
//! blocks.

use std::path::{Path, PathBuf};

use crate::{
    config::{CONFIG_FILE_NAME, RundocConfig},
    utils::replace_env_placeholders,
};

/// Path configuration grouping all path-related fields.
#[derive(Default, Clone)]
pub struct PathConfig {
    /// Workspace root directory; relative configured paths start here.
    pub workspace: PathBuf,
    /// Configuration file the current settings came from, if any.
    pub config: Option<PathBuf>,
}

/// The main application context holding all state.
#[derive(Default, Clone)]
pub struct AppContext {
    /// Path configuration for the workspace and configuration file.
    pub paths: PathConfig,
    /// Current tool configuration.
    pub config: RundocConfig,
}

impl AppContext {
    /// Creates a context rooted at `workspace` with default configuration.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathConfig {
                workspace: workspace.into(),
                config: None,
            },
            config: RundocConfig::default(),
        }
    }

    /// Loads the tool configuration.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file. Defaults to
    ///   `.rundoc.toml` in the workspace directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file does not exist, or if the
    /// file cannot be read or parsed. A missing default file is not an error;
    /// the defaults are used instead.
    pub fn load_config(&mut self, config_path: Option<PathBuf>) -> anyhow::Result<&RundocConfig> {
        let (path, explicit) = match config_path {
            Some(path) => (path, true),
            None => (self.paths.workspace.join(CONFIG_FILE_NAME), false),
        };

        if !path.exists() {
            if explicit {
                bail!("Configuration file {} does not exist", path.display());
            }
            debug!("No {} found, using defaults", path.display());
            self.config = RundocConfig::default();
            self.paths.config = None;
            return Ok(&self.config);
        }

        info!("Loading configuration from {}", path.display());
        self.config = RundocConfig::load(&path)?;
        self.paths.config = Some(path);
        Ok(&self.config)
    }

    /// Replaces variable placeholders in a string.
    ///
    /// Supports `${workspaceFolder}`, replaced with the workspace directory
    /// path, and `${env:VAR}`, replaced with the value of environment
    /// variable `VAR`.
    pub fn value_replace_with_var<S>(&self, value: S) -> String
    where
        S: AsRef<std::ffi::OsStr>,
    {
        let raw = value.as_ref().to_string_lossy();
        let replaced = raw.replace(
            "${workspaceFolder}",
            format!("{}", self.paths.workspace.display()).as_ref(),
        );
        replace_env_placeholders(&replaced)
    }

    /// Resolves a configured path: placeholders are replaced and relative
    /// results are joined onto the workspace.
    pub fn resolve_path(&self, value: &str) -> PathBuf {
        let path = PathBuf::from(self.value_replace_with_var(value));
        self.workspace_relative(&path)
    }

    /// Joins a relative `path` onto the workspace; absolute paths are kept.
    ///
    /// Paths given on the command line go through here so that
    /// `--workspace` applies to them as it does to configured paths.
    pub fn workspace_relative(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.workspace.join(path)
        }
    }
}
