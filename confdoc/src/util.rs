//! String transformations used when rendering configuration documentation.
//!
//! Lookups that have nothing to say return an empty string, `None`, or the
//! input unchanged; none of these functions fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::ConfigDocKey;

pub const OFFICIAL_JAVA_DOC_BASE_LINK: &str = "https://docs.oracle.com/javase/8/docs/api/";
pub const VERTX_JAVA_DOC_SITE: &str = "https://vertx.io/docs/apidocs/";
pub const AGROAL_API_JAVA_DOC_SITE: &str =
    "https://jar-download.com/javaDoc/io.agroal/agroal-api/1.5/index.html?";

pub const DURATION_TYPE: &str = "java.time.Duration";
pub const MEMORY_SIZE_TYPE: &str = "io.quarkus.runtime.configuration.MemorySize";

pub const DURATION_INFORMATION: &str = "About the Duration format\n\n\
The format for durations uses the standard `java.time.Duration` format.\n\
You can learn more about it in the link:https://docs.oracle.com/javase/8/docs/api/java/time/Duration.html#parse-java.lang.CharSequence-[Duration#parse() javadoc].\n\n\
You can also provide duration values starting with a number.\n\
In this case, if the value consists only of a number, the converter treats the value as seconds.\n\
Otherwise, `PT` is implicitly prepended to the value to obtain a standard `java.time.Duration` format.";

pub const MEMORY_SIZE_INFORMATION: &str = "About the MemorySize format\n\n\
A size configuration option recognises string in this format (shown as a regular expression): `[0-9]+[KkMmGgTtPpEeZzYy]?`.\n\
If no suffix is given, assume bytes.";

pub const ADOC_EXTENSION: &str = ".adoc";

const KEY_PREFIX: &str = "quarkus";
const CORE: &str = "core-";
const DEPLOYMENT: &str = "deployment";
const RUNTIME: &str = "runtime";
const COMMON: &str = "common";

const PRIMITIVE_DEFAULT_VALUES: &[(&str, &str)] = &[
    ("int", "0"),
    ("byte", "0"),
    ("char", ""),
    ("short", "0"),
    ("long", "0l"),
    ("float", "0f"),
    ("double", "0d"),
    ("boolean", "false"),
];

const JAVA_PRIMITIVE_WRAPPERS: &[(&str, &str)] = &[
    ("java.lang.Character", "char"),
    ("java.lang.Boolean", "boolean"),
    ("java.lang.Byte", "byte"),
    ("java.lang.Short", "short"),
    ("java.lang.Integer", "int"),
    ("java.lang.Long", "long"),
    ("java.lang.Float", "float"),
    ("java.lang.Double", "double"),
];

/// Base package prefix (`first.second.`) to javadoc site.
const EXTENSION_JAVA_DOC_LINK: &[(&str, &str)] = &[
    ("io.vertx.", VERTX_JAVA_DOC_SITE),
    ("io.agroal.", AGROAL_API_JAVA_DOC_SITE),
];

/// Wrapper types documented as the type they carry.
const ALIASED_TYPES: &[(&str, &str)] = &[
    ("java.util.OptionalLong", "long"),
    ("java.util.OptionalInt", "int"),
    ("java.util.OptionalDouble", "double"),
    ("java.lang.Class<?>", "class name"),
    ("java.net.InetSocketAddress", "host:port"),
    ("java.util.logging.Level", "java.util.logging.Level"),
];

/// Identifiers whose mixed case would otherwise split into several humps.
const MIXED_CASE_WORDS: &[&str] = &["JBoss"];

static PACKAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\..*$").unwrap());

static PKG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^io\.quarkus\.([A-Za-z0-9_]+)\.?([A-Za-z0-9_]+)?\.?([A-Za-z0-9_]+)?").unwrap()
});

static DIGIT_OR_LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").unwrap());

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Default value of a primitive type, `None` for anything else.
pub fn primitive_default_value(primitive_type: &str) -> Option<&'static str> {
    lookup(PRIMITIVE_DEFAULT_VALUES, primitive_type)
}

/// Replaces a primitive wrapper type with its primitive; other types pass through.
pub fn unbox(type_name: &str) -> &str {
    lookup(JAVA_PRIMITIVE_WRAPPERS, type_name).unwrap_or(type_name)
}

/// Documented type of a known wrapper such as `java.util.OptionalInt`.
pub fn known_generic_type(type_name: &str) -> Option<&'static str> {
    lookup(ALIASED_TYPES, type_name)
}

/// Javadoc link for a fully qualified type, or an empty string when unknown.
pub fn java_doc_site_link(type_name: &str) -> String {
    let Some(caps) = PACKAGE_PATTERN.captures(type_name) else {
        return String::new();
    };

    if lookup(JAVA_PRIMITIVE_WRAPPERS, type_name).is_some() {
        return String::new();
    }

    if &caps[1] == "java" {
        return format!("{OFFICIAL_JAVA_DOC_BASE_LINK}{}", java_doc_link_for_type(type_name));
    }

    let base_pkg_name = format!("{}.{}.", &caps[1], &caps[2]);
    match lookup(EXTENSION_JAVA_DOC_LINK, &base_pkg_name) {
        Some(base) => format!("{base}{}", java_doc_link_for_type(type_name)),
        None => String::new(),
    }
}

fn java_doc_link_for_type(type_name: &str) -> String {
    let first_upper = type_name
        .find(|c: char| c.is_ascii_uppercase())
        .unwrap_or(0);
    let (package, simple) = type_name.split_at(first_upper);
    format!("{}{}.html", package.replace('.', "/"), simple.replace('$', "."))
}

/// Splits a camel-case identifier into its humps.
///
/// `JBoss` is kept as one hump, all-caps runs end before the capital that
/// starts the next word (`HTTPServer` gives `HTTP`, `Server`), and any other
/// hump runs until the next uppercase character.
pub fn camel_humps(s: &str) -> Vec<&str> {
    let mut humps = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let (hump, tail) = rest.split_at(next_hump_len(rest));
        humps.push(hump);
        rest = tail;
    }
    humps
}

fn next_hump_len(s: &str) -> usize {
    if let Some(word) = MIXED_CASE_WORDS.iter().find(|w| s.starts_with(**w)) {
        return word.len();
    }

    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let offset = |i: usize| chars.get(i).map_or(s.len(), |(idx, _)| *idx);
    let until_upper = |from: usize| {
        chars
            .iter()
            .skip(from)
            .find(|(_, c)| c.is_uppercase())
            .map_or(s.len(), |(idx, _)| *idx)
    };

    if !chars[0].1.is_uppercase() {
        return until_upper(1);
    }
    match chars.get(1) {
        None => s.len(),
        Some((_, c)) if c.is_uppercase() => {
            // all caps: stop before the capital followed by a lowercase letter
            let mut i = 1;
            while let Some((_, next)) = chars.get(i + 1) {
                if next.is_lowercase() {
                    return offset(i);
                }
                i += 1;
            }
            s.len()
        }
        Some(_) => until_upper(2),
    }
}

/// Lowercase, hyphen separated form of a camel-case identifier.
///
/// ```
/// assert_eq!(confdoc::util::hyphenate("JBossLogManager"), "jboss-log-manager");
/// assert_eq!(confdoc::util::hyphenate("HTTPServer"), "http-server");
/// ```
pub fn hyphenate(orig: &str) -> String {
    camel_humps(orig)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// `FOO_BAR` becomes `foo-bar`.
pub fn hyphenate_enum_value(orig: &str) -> String {
    orig.replace('_', "-").to_lowercase()
}

/// Renders accepted values as `` `a`, `b` ``; empty for none.
pub fn join_accepted_values(accepted_values: &[String]) -> String {
    if accepted_values.is_empty() {
        return String::new();
    }
    format!("`{}`", accepted_values.join("`, `"))
}

pub fn has_duration_information_note(key: &ConfigDocKey) -> bool {
    key.has_type() && key.type_name == DURATION_TYPE
}

pub fn has_memory_information_note(key: &ConfigDocKey) -> bool {
    key.has_type() && key.type_name == MEMORY_SIZE_TYPE
}

/// Format note for types with a textual syntax, empty otherwise.
pub fn type_format_information_note(key: &ConfigDocKey) -> &'static str {
    if key.type_name == DURATION_TYPE {
        DURATION_INFORMATION
    } else if key.type_name == MEMORY_SIZE_TYPE {
        MEMORY_SIZE_INFORMATION
    } else {
        ""
    }
}

/// Guesses the documentation file name of the extension owning `config_root`.
///
/// Core roots (`io.quarkus.runtime.*`, `io.quarkus.deployment.*`) are named
/// after their class, extension roots after their package segments.
pub fn compute_extension_doc_file_name(config_root: &str) -> String {
    let Some(caps) = PKG_PATTERN.captures(config_root) else {
        return format!("{config_root}{ADOC_EXTENSION}");
    };

    let extension_name = &caps[1];
    let mut key = format!("{KEY_PREFIX}-");

    if extension_name == DEPLOYMENT || extension_name == RUNTIME {
        let config_class = config_root
            .rsplit_once('.')
            .map_or(config_root, |(_, class)| class);
        key.push_str(CORE);
        key.push_str(&hyphenate(config_class));
    } else if let Some(subgroup) = caps.get(2).map(|m| m.as_str()).filter(|s| is_doc_segment(s)) {
        key.push_str(extension_name);
        key.push('-');
        key.push_str(subgroup);

        if let Some(qualifier) = caps.get(3).map(|m| m.as_str()).filter(|s| is_doc_segment(s)) {
            key.push('-');
            key.push_str(qualifier);
        }
    } else {
        key.push_str(extension_name);
    }

    key.push_str(ADOC_EXTENSION);
    key
}

fn is_doc_segment(segment: &str) -> bool {
    !matches!(segment, DEPLOYMENT | RUNTIME | COMMON) && DIGIT_OR_LOWERCASE.is_match(segment)
}
