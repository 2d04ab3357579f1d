//! AsciiDoc configuration reference tables.
//!
//! Renders a (merged) documentation tree as one table: a header row, a row
//! per key, and a header row per section followed by the section's rows. Type
//! and default cells are built with the helpers in [`crate::util`].

use crate::{
    data::{ConfigDocItem, ConfigDocKey, ConfigDocSection},
    util::{
        DURATION_INFORMATION, has_duration_information_note,
        has_memory_information_note, hyphenate_enum_value, java_doc_site_link,
        join_accepted_values, known_generic_type, primitive_default_value,
        type_format_information_note, unbox,
    },
};

const DURATION_NOTE_ANCHOR: &str = "duration-note-anchor";
const MEMORY_SIZE_NOTE_ANCHOR: &str = "memory-size-note-anchor";
const BUILD_TIME_ICON: &str = "icon:lock[title=Fixed at build time]";
const TABLE_HEADER: &str = "[.configuration-reference, cols=\"80,.^10,.^10\"]\n|===\n";

/// Renders `items` as a configuration reference table.
///
/// `anchor_prefix` scopes the generated anchors, usually the doc file name
/// without extension (`quarkus-http`).
pub fn render_config_reference(anchor_prefix: &str, items: &[ConfigDocItem]) -> String {
    let mut notes = Vec::new();
    let mut out = String::new();

    out.push_str("[.configuration-legend]\n");
    out.push_str(&format!(
        "{BUILD_TIME_ICON} Configuration property fixed at build time - \
         All other configuration properties are overridable at runtime\n"
    ));
    out.push_str(TABLE_HEADER);
    out.push_str(&header_row(
        &format!("{anchor_prefix}_configuration"),
        "Configuration property",
    ));

    for item in items {
        render_item(&mut out, anchor_prefix, item, &mut notes);
    }
    out.push_str("|===\n");

    for information in notes {
        out.push_str(&information_note(note_anchor(information), information));
    }
    out
}

/// Format notes in the order their types first appear.
type Notes = Vec<&'static str>;

fn render_item(out: &mut String, anchor_prefix: &str, item: &ConfigDocItem, notes: &mut Notes) {
    match item {
        ConfigDocItem::Key(key) => {
            let information = type_format_information_note(key);
            if !information.is_empty() && !notes.contains(&information) {
                notes.push(information);
            }
            out.push_str(&key_row(anchor_prefix, key));
        }
        ConfigDocItem::Section(section) => {
            out.push_str(&section_row(anchor_prefix, section));
            for child in &section.config_doc_items {
                render_item(out, anchor_prefix, child, notes);
            }
        }
    }
}

fn anchor(anchor_prefix: &str, name: &str) -> String {
    format!("{anchor_prefix}_{}", name.replace(['"', ' '], ""))
}

fn header_row(anchor: &str, title: &str) -> String {
    format!("\nh|[[{anchor}]]link:#{anchor}[{title}]\n\nh|Type\nh|Default\n")
}

fn section_row(anchor_prefix: &str, section: &ConfigDocSection) -> String {
    let title = if section.section_details_title.is_empty() {
        &section.name
    } else {
        &section.section_details_title
    };
    let mut row = header_row(&anchor(anchor_prefix, &section.name), title);
    if let Some(details) = section.section_details.as_deref().filter(|d| !d.is_empty()) {
        row.push_str(&format!("\n3+a|{details}\n"));
    }
    row
}

fn key_row(anchor_prefix: &str, key: &ConfigDocKey) -> String {
    let anchor = anchor(anchor_prefix, &key.key);
    let lock = if key.config_phase.is_fixed_at_build_time() {
        format!("{BUILD_TIME_ICON} ")
    } else {
        String::new()
    };

    format!(
        "\na|{lock}[[{anchor}]]`link:#{anchor}[{key_name}]`\n\n[.description]\n--\n{doc}\n--|{ty}\n|{default}\n",
        key_name = key.key,
        doc = key.config_doc.trim(),
        ty = type_cell(key),
        default = default_cell(key),
    )
}

/// Type column: accepted values, a javadoc link, or the plain type name.
pub fn type_cell(key: &ConfigDocKey) -> String {
    if key.has_accepted_values() {
        let values: Vec<String> = key
            .accepted_values
            .iter()
            .map(|v| hyphenate_enum_value(v))
            .collect();
        return join_accepted_values(&values);
    }

    let type_name = match known_generic_type(&key.type_name) {
        Some(aliased) => aliased,
        None => unbox(&key.type_name),
    };
    let simple_name = type_name
        .rsplit('.')
        .next()
        .unwrap_or(type_name)
        .replace('$', ".");
    let link = if key.java_doc_site_link.is_empty() {
        java_doc_site_link(type_name)
    } else {
        key.java_doc_site_link.clone()
    };

    let mut cell = if link.is_empty() {
        simple_name
    } else {
        format!("link:{link}[{simple_name}]")
    };
    if key.list {
        cell = format!("list of {cell}");
    }

    if has_duration_information_note(key) {
        cell.push_str(&format!(
            "\nlink:#{DURATION_NOTE_ANCHOR}[icon:question-circle[], title=More information about the Duration format]"
        ));
    } else if has_memory_information_note(key) {
        cell.push_str(&format!(
            "\nlink:#{MEMORY_SIZE_NOTE_ANCHOR}[icon:question-circle[], title=More information about the MemorySize format]"
        ));
    }
    cell
}

/// Default column: the declared default, or the primitive default for
/// non-optional primitive keys.
pub fn default_cell(key: &ConfigDocKey) -> String {
    let default = match key.default_value.as_deref() {
        Some(value) if key.has_accepted_values() => hyphenate_enum_value(value),
        Some(value) => value.to_string(),
        None if key.optional => String::new(),
        None => primitive_default_value(unbox(&key.type_name))
            .unwrap_or_default()
            .to_string(),
    };
    if default.is_empty() {
        default
    } else {
        format!("`{default}`")
    }
}

fn note_anchor(information: &str) -> &'static str {
    if information == DURATION_INFORMATION {
        DURATION_NOTE_ANCHOR
    } else {
        MEMORY_SIZE_NOTE_ANCHOR
    }
}

fn information_note(anchor: &str, information: &str) -> String {
    let (title, body) = information.split_once("\n\n").unwrap_or((information, ""));
    format!("\n[NOTE]\n[[{anchor}]]\n.{title}\n====\n{body}\n====\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ConfigPhase;
    use crate::util::{DURATION_TYPE, MEMORY_SIZE_TYPE};

    #[test]
    fn test_type_cell_variants() {
        let port = ConfigDocKey::new("quarkus.http.port", "java.lang.Integer");
        assert_eq!(type_cell(&port), "int");

        let mut auth = ConfigDocKey::new("quarkus.http.ssl.client-auth", "io.vertx.core.http.ClientAuth");
        assert_eq!(
            type_cell(&auth),
            "link:https://vertx.io/docs/apidocs/io/vertx/core/http/ClientAuth.html[ClientAuth]"
        );
        auth.accepted_values = vec!["NONE".into(), "REQUEST".into(), "REQUIRED".into()];
        assert_eq!(type_cell(&auth), "`none`, `request`, `required`");

        let mut origins = ConfigDocKey::new("quarkus.http.cors.origins", "java.lang.String");
        origins.list = true;
        assert_eq!(
            type_cell(&origins),
            "list of link:https://docs.oracle.com/javase/8/docs/api/java/lang/String.html[String]"
        );

        let mut modes = ConfigDocKey::new("quarkus.acme.modes", "org.acme.Mode$Kind");
        modes.list = true;
        assert_eq!(type_cell(&modes), "list of Mode.Kind");

        let timeout = ConfigDocKey::new("quarkus.http.idle-timeout", DURATION_TYPE);
        let cell = type_cell(&timeout);
        assert!(cell.starts_with("link:https://docs.oracle.com/javase/8/docs/api/java/time/Duration.html[Duration]"));
        assert!(cell.contains("#duration-note-anchor"));

        let optional_int = ConfigDocKey::new("quarkus.x", "java.util.OptionalInt");
        assert_eq!(type_cell(&optional_int), "int");
    }

    #[test]
    fn test_default_cell() {
        let mut port = ConfigDocKey::new("quarkus.http.port", "int");
        assert_eq!(default_cell(&port), "`0`");
        port.default_value = Some("8080".into());
        assert_eq!(default_cell(&port), "`8080`");

        let mut boxed = ConfigDocKey::new("quarkus.x", "java.lang.Boolean");
        assert_eq!(default_cell(&boxed), "`false`");
        boxed.optional = true;
        assert_eq!(default_cell(&boxed), "");

        let mut level = ConfigDocKey::new("quarkus.log.level", "org.acme.Level");
        level.accepted_values = vec!["DEBUG_ALL".into()];
        level.default_value = Some("DEBUG_ALL".into());
        assert_eq!(default_cell(&level), "`debug-all`");

        let string = ConfigDocKey::new("quarkus.name", "java.lang.String");
        assert_eq!(default_cell(&string), "");
    }

    #[test]
    fn test_render_table() {
        let mut build_key = ConfigDocKey::new("quarkus.http.auth.basic", "boolean");
        build_key.config_phase = ConfigPhase::BuildTime;
        build_key.config_doc = "Enable basic auth".into();

        let items = vec![
            ConfigDocItem::Key(build_key),
            ConfigDocSection::new("quarkus.http.limits", "Limits")
                .with_items([ConfigDocKey::new("quarkus.http.limits.max-body-size", MEMORY_SIZE_TYPE).into()])
                .into(),
        ];

        let adoc = render_config_reference("quarkus-http", &items);

        assert!(adoc.contains("h|[[quarkus-http_configuration]]link:#quarkus-http_configuration[Configuration property]"));
        assert!(adoc.contains(
            "a|icon:lock[title=Fixed at build time] [[quarkus-http_quarkus.http.auth.basic]]`link:#quarkus-http_quarkus.http.auth.basic[quarkus.http.auth.basic]`"
        ));
        assert!(adoc.contains("Enable basic auth\n--|boolean\n|`false`"));
        assert!(adoc.contains("h|[[quarkus-http_quarkus.http.limits]]link:#quarkus-http_quarkus.http.limits[Limits]"));
        assert!(adoc.contains("[[memory-size-note-anchor]]\n.About the MemorySize format"));
        assert!(!adoc.contains("[[duration-note-anchor]]"));
        assert_eq!(adoc.matches("|===").count(), 2);
    }

    #[test]
    fn test_each_format_note_rendered_once() {
        let items = vec![
            ConfigDocKey::new("quarkus.a.max-size", MEMORY_SIZE_TYPE).into(),
            ConfigDocKey::new("quarkus.a.timeout", DURATION_TYPE).into(),
            ConfigDocSection::new("quarkus.a.b", "B")
                .with_items([
                    ConfigDocKey::new("quarkus.a.b.timeout", DURATION_TYPE).into(),
                    ConfigDocKey::new("quarkus.a.b.port", "int").into(),
                ])
                .into(),
        ];

        let adoc = render_config_reference("quarkus-a", &items);

        assert_eq!(adoc.matches("[NOTE]").count(), 2);
        let memory = adoc.find("[[memory-size-note-anchor]]").unwrap();
        let duration = adoc.find("[[duration-note-anchor]]").unwrap();
        assert!(memory < duration);
        assert!(adoc.contains("[[duration-note-anchor]]\n.About the Duration format\n===="));
    }
}
