//! Common utilities and helper functions.
//!
//! String processing used when resolving configured paths, and directory
//! listing shared by the verifier.

use std::{collections::BTreeSet, path::Path, sync::LazyLock};

use anyhow::Context;
use regex::{Captures, Regex};

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{env:([^{}]*)\}").unwrap());

/// Replaces environment variable placeholders in a string.
///
/// Placeholders use the format `${env:VAR_NAME}` where `VAR_NAME` is the
/// name of an environment variable. If the variable is not set, the
/// placeholder is replaced with an empty string. Anything that is not a
/// complete `env:` placeholder is kept as is.
///
/// # Example
///
/// ```rust
/// use rundoc::utils::replace_env_placeholders;
///
/// unsafe { std::env::set_var("MY_VAR", "hello"); }
/// let result = replace_env_placeholders("Value: ${env:MY_VAR}");
/// assert_eq!(result, "Value: hello");
/// ```
pub fn replace_env_placeholders(input: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(input, |caps: &Captures| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => {
                    debug!("Using {name}={value}");
                    value
                }
                Err(_) => String::new(),
            }
        })
        .into_owned()
}

/// Names of all entries directly inside `dir`, sorted.
///
/// Subdirectories are listed too; nothing is filtered by extension.
pub fn list_dir_names(dir: &Path) -> anyhow::Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
