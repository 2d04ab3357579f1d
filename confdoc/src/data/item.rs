use serde::{Deserialize, Serialize};

use crate::data::key::ConfigDocKey;

/// Node of a configuration documentation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigDocItem {
    /// Leaf property.
    Key(ConfigDocKey),
    /// Named group of items.
    Section(ConfigDocSection),
}

impl ConfigDocItem {
    pub fn as_key(&self) -> Option<&ConfigDocKey> {
        match self {
            Self::Key(key) => Some(key),
            Self::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&ConfigDocSection> {
        match self {
            Self::Section(section) => Some(section),
            Self::Key(_) => None,
        }
    }

    pub fn as_section_mut(&mut self) -> Option<&mut ConfigDocSection> {
        match self {
            Self::Section(section) => Some(section),
            Self::Key(_) => None,
        }
    }

    /// Visits every key below this item, depth first.
    pub fn for_each_key<'a>(&'a self, f: &mut impl FnMut(&'a ConfigDocKey)) {
        match self {
            Self::Key(key) => f(key),
            Self::Section(section) => {
                for item in &section.config_doc_items {
                    item.for_each_key(f);
                }
            }
        }
    }
}

impl From<ConfigDocKey> for ConfigDocItem {
    fn from(key: ConfigDocKey) -> Self {
        Self::Key(key)
    }
}

impl From<ConfigDocSection> for ConfigDocItem {
    fn from(section: ConfigDocSection) -> Self {
        Self::Section(section)
    }
}

/// Named group of configuration items.
///
/// Two sections are equal when their names are equal; the items they hold do
/// not take part in the comparison. Merging relies on this to find the
/// existing section an incoming one belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocSection {
    /// Property path of the group, e.g. `quarkus.http.ssl`.
    pub name: String,
    /// Short title shown in the section header row.
    pub section_details_title: String,
    pub section_details: Option<String>,
    pub optional: bool,
    pub config_doc_items: Vec<ConfigDocItem>,
}

impl ConfigDocSection {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section_details_title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = ConfigDocItem>) -> Self {
        self.config_doc_items.extend(items);
        self
    }

    /// Appends items after the existing ones.
    pub fn add_config_doc_items(&mut self, items: impl IntoIterator<Item = ConfigDocItem>) {
        self.config_doc_items.extend(items);
    }
}

impl PartialEq for ConfigDocSection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ConfigDocSection {}
