//! Jar manifest codec.
//!
//! A manifest is a sequence of sections separated by blank lines. The first
//! section holds the main attributes; every following section starts with a
//! `Name` attribute naming the archive entry it applies to. Each attribute is
//! written as `Name: value` and physical lines are limited to 72 bytes, longer
//! values continue on lines starting with a single space.

use crate::error::{JarError, Result};

/// Entry path of the manifest inside a jar.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Maximum length of a physical manifest line in bytes, excluding the line break.
pub const MAX_LINE_BYTES: usize = 72;

/// `Manifest-Version` attribute name.
pub const MANIFEST_VERSION: &str = "Manifest-Version";
/// `Main-Class` attribute name.
pub const MAIN_CLASS: &str = "Main-Class";
/// `Class-Path` attribute name.
pub const CLASS_PATH: &str = "Class-Path";

const SECTION_NAME: &str = "Name";
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Ordered attribute list with case-insensitive name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an attribute value, ignoring ASCII case of the name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, keeping the position of an existing one.
    ///
    /// Returns the previous value if the attribute was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-entry manifest section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Value of the leading `Name` attribute.
    pub name: String,
    /// Remaining attributes of the section.
    pub attributes: Attributes,
}

/// Parsed jar manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Main attributes.
    pub main: Attributes,
    /// Named per-entry sections.
    pub sections: Vec<Section>,
}

impl Manifest {
    /// Creates a manifest with `Manifest-Version: 1.0`.
    pub fn new() -> Self {
        let mut main = Attributes::new();
        main.insert(MANIFEST_VERSION, "1.0");
        Self {
            main,
            sections: Vec::new(),
        }
    }

    /// Sets the `Main-Class` attribute.
    pub fn with_main_class(mut self, main_class: impl Into<String>) -> Self {
        self.main.insert(MAIN_CLASS, main_class);
        self
    }

    /// Sets the `Class-Path` attribute from a list of entries.
    pub fn with_class_path<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = entries
            .into_iter()
            .map(|e| e.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.main.insert(CLASS_PATH, joined);
        self
    }

    /// The `Main-Class` main attribute.
    pub fn main_class(&self) -> Option<&str> {
        self.main.get(MAIN_CLASS)
    }

    /// The `Class-Path` main attribute split on whitespace.
    ///
    /// Returns `None` when the attribute is absent.
    pub fn class_path(&self) -> Option<Vec<&str>> {
        self.main
            .get(CLASS_PATH)
            .map(|cp| cp.split_whitespace().collect())
    }

    /// Looks up a named section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Parses manifest bytes.
    ///
    /// Accepts `\r\n`, `\n` and `\r` line endings and joins continuation
    /// lines before splitting attributes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut manifest = Manifest::default();
        let mut current = Attributes::new();
        let mut in_main = true;

        for line in logical_lines(bytes)? {
            match line {
                Line::Blank { line_no } => {
                    if in_main {
                        manifest.main = std::mem::take(&mut current);
                        in_main = false;
                    } else if !current.is_empty() {
                        manifest
                            .sections
                            .push(into_section(std::mem::take(&mut current), line_no)?);
                    }
                }
                Line::Attribute { line_no, text } => {
                    let (name, value) = split_attribute(&text, line_no)?;
                    if !in_main && current.is_empty() && !name.eq_ignore_ascii_case(SECTION_NAME) {
                        return Err(JarError::invalid_manifest(
                            line_no,
                            format!("section must start with `{SECTION_NAME}`, found `{name}`"),
                        ));
                    }
                    current.insert(name, value);
                }
            }
        }

        if in_main {
            manifest.main = current;
        } else if !current.is_empty() {
            manifest.sections.push(into_section(current, 0)?);
        }

        Ok(manifest)
    }

    /// Serialises the manifest with `\r\n` line endings and 72 byte lines.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for (name, value) in self.main.iter() {
            write_attribute(&mut out, name, value);
        }
        out.push_str("\r\n");

        for section in &self.sections {
            write_attribute(&mut out, SECTION_NAME, &section.name);
            for (name, value) in section.attributes.iter() {
                write_attribute(&mut out, name, value);
            }
            out.push_str("\r\n");
        }
        out.into_bytes()
    }
}

enum Line {
    Attribute { line_no: usize, text: String },
    Blank { line_no: usize },
}

/// Joins continuation lines into logical attribute lines.
///
/// Joining happens on bytes: writers may wrap in the middle of a multibyte
/// character, so only whole logical lines are decoded.
fn logical_lines(bytes: &[u8]) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, Vec<u8>)> = None;

    for (idx, raw) in split_lines(bytes).into_iter().enumerate() {
        let line_no = idx + 1;
        if let Some(rest) = raw.strip_prefix(b" ") {
            match pending.as_mut() {
                Some((_, buf)) => buf.extend_from_slice(rest),
                None => {
                    return Err(JarError::invalid_manifest(
                        line_no,
                        "continuation line without an attribute",
                    ));
                }
            }
            continue;
        }

        if let Some((line_no, buf)) = pending.take() {
            lines.push(attribute_line(line_no, buf)?);
        }
        if raw.is_empty() {
            lines.push(Line::Blank { line_no });
        } else {
            pending = Some((line_no, raw.to_vec()));
        }
    }
    if let Some((line_no, buf)) = pending {
        lines.push(attribute_line(line_no, buf)?);
    }
    Ok(lines)
}

fn attribute_line(line_no: usize, buf: Vec<u8>) -> Result<Line> {
    let text = String::from_utf8(buf).map_err(|e| {
        JarError::invalid_manifest(line_no, format!("not UTF-8: {}", e.utf8_error()))
    })?;
    Ok(Line::Attribute { line_no, text })
}

fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        match rest.iter().position(|b| matches!(b, b'\r' | b'\n')) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let skip = if rest[pos..].starts_with(b"\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest);
                rest = &[];
            }
        }
    }
    lines
}

fn split_attribute(line: &str, line_no: usize) -> Result<(&str, &str)> {
    let Some((name, value)) = line.split_once(": ") else {
        return Err(JarError::invalid_manifest(
            line_no,
            format!("expected `Name: value`, found `{line}`"),
        ));
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(JarError::invalid_manifest(
            line_no,
            format!("invalid attribute name `{name}`"),
        ));
    }
    Ok((name, value))
}

fn into_section(mut attributes: Attributes, line_no: usize) -> Result<Section> {
    let pos = attributes
        .entries
        .iter()
        .position(|(n, _)| n.eq_ignore_ascii_case(SECTION_NAME))
        .ok_or_else(|| JarError::invalid_manifest(line_no, "section without `Name`"))?;
    let (_, name) = attributes.entries.remove(pos);
    Ok(Section { name, attributes })
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    let line = format!("{name}: {value}");
    let mut rest = line.as_str();
    let mut limit = MAX_LINE_BYTES;
    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str("\r\n ");
        rest = &rest[cut..];
        // the leading space takes one byte of the next line
        limit = MAX_LINE_BYTES - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_main_attributes() {
        let text = "Manifest-Version: 1.0\r\nMain-Class: io.quarkus.runner.GeneratedMain\r\nClass-Path: lib/a.jar lib/b.jar\r\n\r\n";
        let manifest = Manifest::parse(text.as_bytes()).unwrap();

        assert_eq!(manifest.main.get("manifest-version"), Some("1.0"));
        assert_eq!(
            manifest.main_class(),
            Some("io.quarkus.runner.GeneratedMain")
        );
        assert_eq!(
            manifest.class_path().unwrap(),
            vec!["lib/a.jar", "lib/b.jar"]
        );
        assert!(manifest.sections.is_empty());
    }

    #[test]
    fn test_parse_joins_continuation_lines() {
        let text = "Manifest-Version: 1.0\nClass-Path: lib/org.acme.first-1.0.jar lib/org.ac\n me.second-2.0.jar\n";
        let manifest = Manifest::parse(text.as_bytes()).unwrap();

        assert_eq!(
            manifest.class_path().unwrap(),
            vec!["lib/org.acme.first-1.0.jar", "lib/org.acme.second-2.0.jar"]
        );
    }

    #[test]
    fn test_parse_sections() {
        let text = "Manifest-Version: 1.0\n\nName: org/acme/\nSealed: true\n\nName: org/other/\nSealed: false\n";
        let manifest = Manifest::parse(text.as_bytes()).unwrap();

        assert_eq!(manifest.sections.len(), 2);
        let acme = manifest.section("org/acme/").unwrap();
        assert_eq!(acme.attributes.get("Sealed"), Some("true"));
        assert_eq!(
            manifest.section("org/other/").unwrap().attributes.get("sealed"),
            Some("false")
        );
    }

    #[test]
    fn test_parse_rejects_orphan_continuation() {
        let err = Manifest::parse(b" dangling\n").unwrap_err();
        assert!(matches!(err, JarError::InvalidManifest { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_section_without_name() {
        let err = Manifest::parse(b"Manifest-Version: 1.0\n\nSealed: true\n").unwrap_err();
        assert!(matches!(err, JarError::InvalidManifest { line: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        let err = Manifest::parse(b"Manifest-Version 1.0\n").unwrap_err();
        assert!(matches!(err, JarError::InvalidManifest { line: 1, .. }));
    }

    #[test]
    fn test_write_wraps_long_lines() {
        let entries: Vec<String> = (0..10)
            .map(|i| format!("lib/org.acme.library-number-{i}-1.0.0.jar"))
            .collect();
        let manifest = Manifest::new().with_class_path(&entries);
        let bytes = manifest.to_bytes();
        let text = String::from_utf8(bytes.clone()).unwrap();

        for line in text.split("\r\n") {
            assert!(line.len() <= MAX_LINE_BYTES, "line too long: {line:?}");
        }
        assert!(text.contains("\r\n "));

        let parsed = Manifest::parse(&bytes).unwrap();
        assert_eq!(parsed.class_path().unwrap(), entries);
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn test_write_keeps_multibyte_chars_intact() {
        let value = "é".repeat(80);
        let mut manifest = Manifest::new();
        manifest.main.insert("Implementation-Title", value.clone());

        let parsed = Manifest::parse(&manifest.to_bytes()).unwrap();
        assert_eq!(parsed.main.get("Implementation-Title"), Some(value.as_str()));
    }

    #[test]
    fn test_parse_joins_char_split_across_continuation() {
        let mut bytes = b"Manifest-Version: 1.0\r\nImplementation-Title: ".to_vec();
        bytes.extend_from_slice("a".repeat(49).as_bytes());
        bytes.extend_from_slice(b"\xc3\r\n \xa9b\r\n\r\n");

        let manifest = Manifest::parse(&bytes).unwrap();
        let expected = format!("{}éb", "a".repeat(49));
        assert_eq!(
            manifest.main.get("Implementation-Title"),
            Some(expected.as_str())
        );
    }

    #[test]
    fn test_parse_reports_line_of_invalid_utf8() {
        let err = Manifest::parse(b"Manifest-Version: 1.0\nTitle: \xff\n").unwrap_err();
        assert!(matches!(err, JarError::InvalidManifest { line: 2, .. }));
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        let manifest = Manifest::parse(b"\xef\xbb\xbfMain-Class: a.Main\n").unwrap();
        assert_eq!(manifest.main_class(), Some("a.Main"));
    }

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut attrs = Attributes::new();
        attrs.insert("Main-Class", "a.A");
        let old = attrs.insert("MAIN-CLASS", "b.B");

        assert_eq!(old.as_deref(), Some("a.A"));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("main-class"), Some("b.B"));
    }

    #[test]
    fn test_missing_class_path() {
        let manifest = Manifest::new().with_main_class("a.Main");
        assert!(manifest.class_path().is_none());
    }
}
