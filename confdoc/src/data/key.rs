use serde::{Deserialize, Serialize};

/// Phase in which a configuration property is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPhase {
    /// Read during the build and not available at run time.
    BuildTime,
    /// Read during the build and fixed for run time.
    BuildAndRunTimeFixed,
    /// Read at run time, overridable.
    #[default]
    RunTime,
}

impl ConfigPhase {
    /// Whether the value is frozen once the application is built.
    pub fn is_fixed_at_build_time(self) -> bool {
        matches!(self, Self::BuildTime | Self::BuildAndRunTimeFixed)
    }
}

/// Documentation record for one configuration property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocKey {
    /// Full property name, e.g. `quarkus.http.port`.
    pub key: String,
    /// Fully qualified type name as seen by the collector.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Javadoc-derived description.
    pub config_doc: String,
    /// Explicit default value, if the property declares one.
    pub default_value: Option<String>,
    /// Allowed values for enum-like properties.
    pub accepted_values: Vec<String>,
    /// Link to the type's API documentation, if known.
    pub java_doc_site_link: String,
    pub config_phase: ConfigPhase,
    pub optional: bool,
    pub list: bool,
}

impl ConfigDocKey {
    pub fn new(key: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn has_type(&self) -> bool {
        !self.type_name.is_empty()
    }

    pub fn has_accepted_values(&self) -> bool {
        !self.accepted_values.is_empty()
    }
}
