use std::{collections::BTreeSet, fmt, path::PathBuf};

/// One discrepancy between a runner jar and its library directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutIssue {
    /// The manifest lacks a required attribute.
    MissingAttribute { name: &'static str },
    MainClassMismatch { expected: String, actual: String },
    /// `Class-Path` and the library directory hold different numbers of files.
    ClassPathCountMismatch { class_path: usize, libs: usize },
    /// A `Class-Path` entry without the library prefix.
    MalformedClassPathEntry { entry: String, prefix: String },
    /// A `Class-Path` entry naming a file the library directory lacks.
    UnknownClassPathEntry { entry: String },
    DuplicateClassPathEntry { entry: String },
    /// Expected library files absent from the library directory.
    MissingEntries(Vec<String>),
    /// Library files present beyond the expected set.
    ExtraEntries(Vec<String>),
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutIssue::MissingAttribute { name } => {
                write!(f, "Manifest has no {name} attribute")
            }
            LayoutIssue::MainClassMismatch { expected, actual } => {
                write!(f, "Main-Class is {actual}, expected {expected}")
            }
            LayoutIssue::ClassPathCountMismatch { class_path, libs } => write!(
                f,
                "Class-Path has {class_path} entries but the library directory holds {libs} files"
            ),
            LayoutIssue::MalformedClassPathEntry { entry, prefix } => {
                write!(f, "Class-Path entry {entry} does not start with {prefix}")
            }
            LayoutIssue::UnknownClassPathEntry { entry } => {
                write!(f, "Class-Path entry {entry} is not in the library directory")
            }
            LayoutIssue::DuplicateClassPathEntry { entry } => {
                write!(f, "Class-Path entry {entry} is listed more than once")
            }
            LayoutIssue::MissingEntries(entries) => {
                write!(f, "Missing entries: {}", entries.join(", "))
            }
            LayoutIssue::ExtraEntries(entries) => {
                write!(f, "Extra entries: {}", entries.join(", "))
            }
        }
    }
}

/// Outcome of checking one runner jar.
#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub jar: PathBuf,
    pub lib_dir: PathBuf,
    /// File names found in the library directory.
    pub actual_libs: BTreeSet<String>,
    pub issues: Vec<LayoutIssue>,
}

impl LayoutReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// All issues joined with `; `, or `None` when the layout is valid.
    pub fn message(&self) -> Option<String> {
        if self.passed() {
            return None;
        }
        let parts: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        Some(parts.join("; "))
    }

    pub fn missing_entries(&self) -> &[String] {
        self.issues
            .iter()
            .find_map(|i| match i {
                LayoutIssue::MissingEntries(e) => Some(e.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn extra_entries(&self) -> &[String] {
        self.issues
            .iter()
            .find_map(|i| match i {
                LayoutIssue::ExtraEntries(e) => Some(e.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            None => write!(
                f,
                "{}: layout verified ({} libraries)",
                self.jar.display(),
                self.actual_libs.len()
            ),
            Some(message) => write!(f, "{}: {message}", self.jar.display()),
        }
    }
}
