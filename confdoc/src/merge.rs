//! Merging documentation items coming from several configuration roots.
//!
//! Roots that document the same extension often contribute to the same
//! section (for example a build time root and a run time root both adding
//! keys under `quarkus.datasource`). Merging folds such sections together so
//! each one is rendered once.

use crate::data::{ConfigDocItem, ConfigDocSection};

/// Appends `config_doc_items` to `existing_config_items`.
///
/// Keys are appended as they are. A section is appended to the items of the
/// first existing section equal to it, searched depth first, or pushed as a
/// new top level item when there is none.
pub fn append_config_items_into_existing_ones(
    existing_config_items: &mut Vec<ConfigDocItem>,
    config_doc_items: Vec<ConfigDocItem>,
) {
    for item in config_doc_items {
        match item {
            ConfigDocItem::Key(_) => existing_config_items.push(item),
            ConfigDocItem::Section(section) => {
                if let Err(section) =
                    merge_section_into_existing_items(section, existing_config_items)
                {
                    existing_config_items.push(ConfigDocItem::Section(section));
                }
            }
        }
    }
}

/// Moves the items of `section` into a matching section below `items`.
///
/// Gives the section back when no match exists.
fn merge_section_into_existing_items(
    section: ConfigDocSection,
    items: &mut [ConfigDocItem],
) -> Result<(), ConfigDocSection> {
    let mut section = section;
    for existing in items.iter_mut().filter_map(ConfigDocItem::as_section_mut) {
        if *existing == section {
            log::debug!("merging section `{}`", section.name);
            existing.add_config_doc_items(section.config_doc_items);
            return Ok(());
        }
        section = match merge_section_into_existing_items(section, &mut existing.config_doc_items)
        {
            Ok(()) => return Ok(()),
            Err(section) => section,
        };
    }
    Err(section)
}
