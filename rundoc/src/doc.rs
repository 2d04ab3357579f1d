//! Configuration reference generation.
//!
//! Roots from the collector's metadata are grouped by the documentation file
//! their class name maps to, the item lists of each group are merged, and one
//! AsciiDoc page is written per file.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use colored::Colorize;
use confdoc::{
    ConfigDocItem, ConfigMetadata, adoc::render_config_reference,
    append_config_items_into_existing_ones, util::compute_extension_doc_file_name,
};

use crate::ctx::AppContext;

/// Groups the roots of `metadata` by documentation file name and merges the
/// items of each group, in root order.
pub fn group_by_doc_file(metadata: ConfigMetadata) -> BTreeMap<String, Vec<ConfigDocItem>> {
    let mut groups: BTreeMap<String, Vec<ConfigDocItem>> = BTreeMap::new();
    for root in metadata.roots {
        let file_name = compute_extension_doc_file_name(&root.name);
        debug!("{} -> {file_name}", root.name);
        append_config_items_into_existing_ones(groups.entry(file_name).or_default(), root.items);
    }
    groups
}

/// Renders every group into `output_dir`, creating it if needed.
///
/// Returns the written files in file name order.
pub fn write_docs(
    groups: &BTreeMap<String, Vec<ConfigDocItem>>,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(groups.len());
    for (file_name, items) in groups {
        let anchor_prefix = file_name.strip_suffix(".adoc").unwrap_or(file_name);
        let path = output_dir.join(file_name);
        std::fs::write(&path, render_config_reference(anchor_prefix, items))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

impl AppContext {
    /// Generates the configuration reference pages.
    ///
    /// `metadata` and `output_dir` override the `[doc]` configuration;
    /// relative overrides are taken from the workspace.
    pub fn generate_docs(
        &self,
        metadata: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let metadata_path = match metadata {
            Some(path) => self.workspace_relative(&path),
            None => self.resolve_path(&self.config.doc.metadata),
        };
        let output_dir = match output_dir {
            Some(path) => self.workspace_relative(&path),
            None => self.resolve_path(&self.config.doc.output_dir),
        };

        let metadata = ConfigMetadata::from_file(&metadata_path)
            .with_context(|| format!("Failed to load metadata {}", metadata_path.display()))?;
        if metadata.roots.is_empty() {
            warn!("{} contains no configuration roots", metadata_path.display());
        }

        println!(
            "{}",
            format!(
                "Generating configuration reference...\r\n  metadata: {}\r\n  output: {}",
                metadata_path.display(),
                output_dir.display()
            )
            .purple()
            .bold()
        );

        let groups = group_by_doc_file(metadata);
        let written = write_docs(&groups, &output_dir)?;
        for path in &written {
            info!("Wrote {}", path.display());
        }
        Ok(written)
    }
}
