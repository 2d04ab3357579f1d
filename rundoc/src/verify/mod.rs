//! Runner jar layout verification.
//!
//! A runner jar references its dependencies through the manifest
//! `Class-Path` attribute, one `lib/<file>` entry per file in the library
//! directory next to it. This module checks that correspondence:
//!
//! - `Main-Class` names the expected entry point
//! - `Class-Path` lists as many entries as the library directory holds files
//! - every entry carries the library prefix, names an existing file and is
//!   listed once
//! - when an expected set of libraries is given, the library directory holds
//!   exactly that set
//!
//! Every discrepancy is collected as a [`LayoutIssue`]; only I/O problems
//! (missing jar, unreadable library directory, corrupt archive) are errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use rundoc::verify::{LayoutExpectation, verify_layout};
//!
//! let mut expectation = LayoutExpectation::new();
//! expectation.expect_lib("org.acme.dep-1.0.jar");
//! let report = verify_layout("target/app-runner.jar".as_ref(), &expectation).unwrap();
//! if let Some(message) = report.message() {
//!     eprintln!("{message}");
//! }
//! ```

use std::{
    collections::{BTreeSet, HashSet},
    path::{Path, PathBuf},
};

use anyhow::Context;
use colored::Colorize;
use runnerjar::{ArtifactCoords, CLASS_PATH, MAIN_CLASS, Manifest, RunnerJar};

use crate::{ctx::AppContext, utils::list_dir_names};

mod report;

pub use report::{LayoutIssue, LayoutReport};

/// Entry point every generated runner jar declares.
pub const DEFAULT_MAIN_CLASS: &str = "io.quarkus.runner.GeneratedMain";
/// Prefix of `Class-Path` entries.
pub const DEFAULT_LIB_PREFIX: &str = "lib/";
/// Library directory name, relative to the runner jar.
pub const DEFAULT_LIB_DIR: &str = "lib";

/// What a runner jar layout is checked against.
#[derive(Debug, Clone)]
pub struct LayoutExpectation {
    /// Expected `Main-Class`; `None` skips the check.
    pub main_class: Option<String>,
    pub lib_prefix: String,
    /// Library directory; defaults to `lib` next to the jar.
    pub lib_dir: Option<PathBuf>,
    /// Library file names the directory must consist of; `None` skips the
    /// check.
    pub expected_libs: Option<Vec<String>>,
}

impl Default for LayoutExpectation {
    fn default() -> Self {
        Self {
            main_class: Some(DEFAULT_MAIN_CLASS.to_string()),
            lib_prefix: DEFAULT_LIB_PREFIX.to_string(),
            lib_dir: None,
            expected_libs: None,
        }
    }
}

impl LayoutExpectation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_class(mut self, main_class: impl Into<String>) -> Self {
        self.main_class = Some(main_class.into());
        self
    }

    pub fn with_lib_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.lib_prefix = prefix.into();
        self
    }

    pub fn with_lib_dir(mut self, lib_dir: impl Into<PathBuf>) -> Self {
        self.lib_dir = Some(lib_dir.into());
        self
    }

    /// Adds a library file name to the expected set.
    pub fn expect_lib(&mut self, name: impl Into<String>) {
        self.expected_libs
            .get_or_insert_with(Vec::new)
            .push(name.into());
    }

    /// Adds the library file of an artifact to the expected set.
    pub fn expect_artifact(&mut self, coords: &ArtifactCoords) {
        self.expect_lib(coords.lib_file_name());
    }

    /// Parses `group:artifact:version[:packaging]` and expects its library file.
    pub fn expect_artifact_str(&mut self, coords: &str) -> anyhow::Result<()> {
        let coords: ArtifactCoords = coords.parse()?;
        self.expect_artifact(&coords);
        Ok(())
    }

    /// Library directory used for `jar`.
    pub fn lib_dir_for(&self, jar: &Path) -> PathBuf {
        self.lib_dir.clone().unwrap_or_else(|| {
            jar.parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_LIB_DIR)
        })
    }
}

/// Checks the layout of the runner jar at `jar` against `expectation`.
///
/// # Errors
///
/// Returns an error when the library directory cannot be listed or the jar
/// cannot be opened or has no readable manifest. Layout discrepancies are
/// reported in the returned [`LayoutReport`].
pub fn verify_layout(jar: &Path, expectation: &LayoutExpectation) -> anyhow::Result<LayoutReport> {
    let lib_dir = expectation.lib_dir_for(jar);
    if !lib_dir.is_dir() {
        bail!("Library directory {} does not exist", lib_dir.display());
    }
    let actual_libs = list_dir_names(&lib_dir)?;
    debug!(
        "{} holds {} library files",
        lib_dir.display(),
        actual_libs.len()
    );

    let runner = RunnerJar::open(jar).with_context(|| format!("Failed to open {}", jar.display()))?;

    let mut issues = check_manifest(runner.manifest(), &actual_libs, expectation);
    if let Some(expected) = &expectation.expected_libs {
        issues.extend(check_expected_libs(&actual_libs, expected));
    }

    Ok(LayoutReport {
        jar: jar.to_path_buf(),
        lib_dir,
        actual_libs,
        issues,
    })
}

fn check_manifest(
    manifest: &Manifest,
    actual_libs: &BTreeSet<String>,
    expectation: &LayoutExpectation,
) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();

    if let Some(expected) = &expectation.main_class {
        match manifest.main_class() {
            None => issues.push(LayoutIssue::MissingAttribute { name: MAIN_CLASS }),
            Some(actual) if actual != expected => issues.push(LayoutIssue::MainClassMismatch {
                expected: expected.clone(),
                actual: actual.to_string(),
            }),
            Some(_) => {}
        }
    }

    let Some(class_path) = manifest.class_path() else {
        issues.push(LayoutIssue::MissingAttribute { name: CLASS_PATH });
        return issues;
    };

    if class_path.len() != actual_libs.len() {
        issues.push(LayoutIssue::ClassPathCountMismatch {
            class_path: class_path.len(),
            libs: actual_libs.len(),
        });
    }

    let mut seen = HashSet::new();
    for entry in class_path {
        if !seen.insert(entry) {
            issues.push(LayoutIssue::DuplicateClassPathEntry {
                entry: entry.to_string(),
            });
            continue;
        }
        match entry.strip_prefix(expectation.lib_prefix.as_str()) {
            None => issues.push(LayoutIssue::MalformedClassPathEntry {
                entry: entry.to_string(),
                prefix: expectation.lib_prefix.clone(),
            }),
            Some(name) if !actual_libs.contains(name) => {
                issues.push(LayoutIssue::UnknownClassPathEntry {
                    entry: entry.to_string(),
                })
            }
            Some(_) => {}
        }
    }

    issues
}

/// Missing files keep the expected order; extra files are sorted.
fn check_expected_libs(actual_libs: &BTreeSet<String>, expected: &[String]) -> Vec<LayoutIssue> {
    let mut remaining = actual_libs.clone();
    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !remaining.remove(name.as_str()))
        .cloned()
        .collect();

    let mut issues = Vec::new();
    if !missing.is_empty() {
        issues.push(LayoutIssue::MissingEntries(missing));
    }
    if !remaining.is_empty() {
        issues.push(LayoutIssue::ExtraEntries(remaining.into_iter().collect()));
    }
    issues
}

impl AppContext {
    /// Builds the expectation described by the `[verify]` configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured artifact is not valid
    /// `group:artifact:version[:packaging]` coordinates.
    pub fn layout_expectation(&self) -> anyhow::Result<LayoutExpectation> {
        let config = &self.config.verify;
        let mut expectation = LayoutExpectation::new()
            .with_main_class(config.main_class.clone())
            .with_lib_prefix(config.lib_prefix.clone());

        if let Some(lib_dir) = &config.lib_dir {
            expectation.lib_dir = Some(self.resolve_path(lib_dir));
        }
        for name in &config.expected_libs {
            expectation.expect_lib(name.clone());
        }
        for coords in &config.expected_artifacts {
            expectation
                .expect_artifact_str(coords)
                .with_context(|| format!("Invalid expected artifact in configuration: {coords}"))?;
        }
        Ok(expectation)
    }

    /// The runner jar to check: `jar` if given, else the configured one.
    ///
    /// Relative paths are taken from the workspace.
    pub fn runner_jar_path(&self, jar: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        match (jar, &self.config.verify.runner_jar) {
            (Some(jar), _) => Ok(self.workspace_relative(&jar)),
            (None, Some(configured)) => Ok(self.resolve_path(configured)),
            (None, None) => bail!("No runner jar given and none configured in [verify]"),
        }
    }

    /// Verifies `jar` and prints the outcome.
    pub fn verify_runner_jar(
        &self,
        jar: &Path,
        expectation: &LayoutExpectation,
    ) -> anyhow::Result<LayoutReport> {
        println!(
            "{}",
            format!("Verifying runner jar {}", jar.display())
                .purple()
                .bold()
        );

        let report = verify_layout(jar, expectation)?;
        if report.passed() {
            info!(
                "{} references all {} files of {}",
                jar.display(),
                report.actual_libs.len(),
                report.lib_dir.display()
            );
            println!("{}", report.to_string().green().bold());
        } else {
            for issue in &report.issues {
                warn!("{issue}");
            }
            println!("{}", report.to_string().red().bold());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runnerjar::JarWriter;

    fn runner_jar(dir: &Path, main_class: &str, class_path: &[&str], libs: &[&str]) -> PathBuf {
        let lib_dir = dir.join(DEFAULT_LIB_DIR);
        std::fs::create_dir_all(&lib_dir).unwrap();
        for lib in libs {
            std::fs::write(lib_dir.join(lib), b"PK").unwrap();
        }

        let manifest = Manifest::new()
            .with_main_class(main_class)
            .with_class_path(class_path);
        let mut writer = JarWriter::create(dir.join("app-runner.jar"), &manifest).unwrap();
        writer
            .add_entry("io/quarkus/runner/GeneratedMain.class", b"\xca\xfe\xba\xbe")
            .unwrap();
        writer.finish().unwrap()
    }

    fn expecting(libs: &[&str]) -> LayoutExpectation {
        let mut expectation = LayoutExpectation::new();
        for lib in libs {
            expectation.expect_lib(*lib);
        }
        expectation
    }

    #[test]
    fn test_valid_layout_passes() {
        let dir = tempfile::tempdir().unwrap();
        let jar = runner_jar(
            dir.path(),
            DEFAULT_MAIN_CLASS,
            &["lib/org.acme.a-1.0.jar", "lib/org.acme.b-2.0.jar"],
            &["org.acme.a-1.0.jar", "org.acme.b-2.0.jar"],
        );

        let report = verify_layout(&jar, &expecting(&["org.acme.b-2.0.jar", "org.acme.a-1.0.jar"]))
            .unwrap();

        assert!(report.passed(), "{:?}", report.issues);
        assert_eq!(report.lib_dir, dir.path().join("lib"));
        assert_eq!(report.actual_libs.len(), 2);
    }

    #[test]
    fn test_missing_and_extra_entries() {
        let dir = tempfile::tempdir().unwrap();
        let jar = runner_jar(
            dir.path(),
            DEFAULT_MAIN_CLASS,
            &["lib/a.jar", "lib/d.jar", "lib/c.jar"],
            &["a.jar", "d.jar", "c.jar"],
        );

        let report = verify_layout(&jar, &expecting(&["b.jar", "a.jar", "e.jar"])).unwrap();

        assert!(!report.passed());
        assert_eq!(report.missing_entries(), ["b.jar", "e.jar"]);
        assert_eq!(report.extra_entries(), ["c.jar", "d.jar"]);
        assert_eq!(
            report.message().unwrap(),
            "Missing entries: b.jar, e.jar; Extra entries: c.jar, d.jar"
        );
    }

    #[test]
    fn test_duplicate_expectation_is_missing_once_consumed() {
        let actual = BTreeSet::from(["a.jar".to_string()]);
        let issues = check_expected_libs(&actual, &["a.jar".to_string(), "a.jar".to_string()]);
        assert_eq!(issues, vec![LayoutIssue::MissingEntries(vec!["a.jar".into()])]);
    }

    #[test]
    fn test_empty_expectation_reports_every_file_extra() {
        let dir = tempfile::tempdir().unwrap();
        let jar = runner_jar(dir.path(), DEFAULT_MAIN_CLASS, &["lib/a.jar"], &["a.jar"]);

        let mut expectation = LayoutExpectation::new();
        expectation.expected_libs = Some(Vec::new());
        let report = verify_layout(&jar, &expectation).unwrap();
        assert_eq!(report.issues, vec![LayoutIssue::ExtraEntries(vec!["a.jar".into()])]);

        expectation.expected_libs = None;
        assert!(verify_layout(&jar, &expectation).unwrap().passed());
    }

    #[test]
    fn test_class_path_discrepancies() {
        let dir = tempfile::tempdir().unwrap();
        let jar = runner_jar(
            dir.path(),
            DEFAULT_MAIN_CLASS,
            &["lib/a.jar", "a.jar", "lib/ghost.jar", "lib/a.jar"],
            &["a.jar", "b.jar"],
        );

        let report = verify_layout(&jar, &LayoutExpectation::new()).unwrap();

        assert_eq!(
            report.issues,
            vec![
                LayoutIssue::ClassPathCountMismatch {
                    class_path: 4,
                    libs: 2
                },
                LayoutIssue::MalformedClassPathEntry {
                    entry: "a.jar".into(),
                    prefix: "lib/".into()
                },
                LayoutIssue::UnknownClassPathEntry {
                    entry: "lib/ghost.jar".into()
                },
                LayoutIssue::DuplicateClassPathEntry {
                    entry: "lib/a.jar".into()
                },
            ]
        );
    }

    #[test]
    fn test_main_class_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let jar = runner_jar(dir.path(), "org.acme.Main", &[], &[]);

        let report = verify_layout(&jar, &LayoutExpectation::new()).unwrap();
        assert_eq!(
            report.issues,
            vec![LayoutIssue::MainClassMismatch {
                expected: DEFAULT_MAIN_CLASS.into(),
                actual: "org.acme.Main".into()
            }]
        );

        let custom = LayoutExpectation::new().with_main_class("org.acme.Main");
        assert!(verify_layout(&jar, &custom).unwrap().passed());
    }

    #[test]
    fn test_missing_class_path_attribute() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();
        let jar = dir.path().join("app-runner.jar");
        JarWriter::create(&jar, &Manifest::new())
            .unwrap()
            .finish()
            .unwrap();

        let report = verify_layout(&jar, &LayoutExpectation::new()).unwrap();
        assert_eq!(
            report.issues,
            vec![
                LayoutIssue::MissingAttribute { name: MAIN_CLASS },
                LayoutIssue::MissingAttribute { name: CLASS_PATH },
            ]
        );
    }

    #[test]
    fn test_custom_lib_dir_and_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let deps = dir.path().join("deps");
        std::fs::create_dir(&deps).unwrap();
        std::fs::write(deps.join("org.acme.dep-1.0.jar"), b"").unwrap();

        let manifest = Manifest::new()
            .with_main_class(DEFAULT_MAIN_CLASS)
            .with_class_path(["deps/org.acme.dep-1.0.jar"]);
        let jar = JarWriter::create(dir.path().join("app.jar"), &manifest)
            .unwrap()
            .finish()
            .unwrap();

        let mut expectation = LayoutExpectation::new()
            .with_lib_dir(&deps)
            .with_lib_prefix("deps/");
        expectation
            .expect_artifact_str("org.acme:dep:1.0")
            .unwrap();

        assert!(verify_layout(&jar, &expectation).unwrap().passed());
        assert!(expectation.expect_artifact_str("org.acme:dep").is_err());
    }

    #[test]
    fn test_runner_jar_path_is_workspace_relative() {
        let mut ctx = AppContext::new("/proj");
        assert_eq!(
            ctx.runner_jar_path(Some(PathBuf::from("target/app-runner.jar")))
                .unwrap(),
            PathBuf::from("/proj/target/app-runner.jar")
        );
        assert_eq!(
            ctx.runner_jar_path(Some(PathBuf::from("/abs/app.jar")))
                .unwrap(),
            PathBuf::from("/abs/app.jar")
        );
        assert!(ctx.runner_jar_path(None).is_err());

        ctx.config.verify.runner_jar = Some("build/app-runner.jar".into());
        assert_eq!(
            ctx.runner_jar_path(None).unwrap(),
            PathBuf::from("/proj/build/app-runner.jar")
        );
    }

    #[test]
    fn test_io_failures_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("app-runner.jar");
        assert!(verify_layout(&jar, &LayoutExpectation::new()).is_err());

        std::fs::create_dir(dir.path().join("lib")).unwrap();
        let err = verify_layout(&jar, &LayoutExpectation::new()).unwrap_err();
        assert!(err.to_string().contains("app-runner.jar"));
    }
}
