//! Rule (reporting descriptor) records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::level::Level;
use super::message::MultiformatMessageString;

/// Rule metadata describing a class of finding, referenced by results
/// via id, GUID or ordinal index. Immutable once parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportingDescriptor {
    pub id: Option<String>,
    pub guid: Option<String>,
    pub name: Option<String>,
    pub default_configuration: ReportingConfiguration,
    pub short_description: Option<MultiformatMessageString>,
    pub full_description: Option<MultiformatMessageString>,
    pub help_uri: Option<String>,
    pub help: Option<MultiformatMessageString>,
    pub message_strings: Option<hashbrown::HashMap<String, MultiformatMessageString>>,
    pub properties: Option<Map<String, Value>>,
}

impl ReportingDescriptor {
    /// The level configured as this rule's default.
    #[must_use]
    pub fn default_level(&self) -> Level {
        self.default_configuration.level
    }

    /// Look up a message template by id.
    #[must_use]
    pub fn message_string(&self, id: &str) -> Option<&MultiformatMessageString> {
        self.message_strings.as_ref()?.get(id)
    }
}

/// Default reporting configuration. The format specifies `warning` as
/// the level when a rule does not configure one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportingConfiguration {
    pub level: Level,
}

impl Default for ReportingConfiguration {
    fn default() -> Self {
        Self {
            level: Level::Warning,
        }
    }
}
