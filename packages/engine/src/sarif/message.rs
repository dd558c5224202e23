//! Message records

use serde::{Deserialize, Serialize};

/// A result or descriptor message: literal text, or a template id
/// resolved against the rule's message-string table, with optional
/// positional arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub text: Option<String>,
    pub id: Option<String>,
    pub arguments: Option<Vec<String>>,
}

/// A message string carried in plain-text form (the markdown rendition,
/// when present, is ignored).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiformatMessageString {
    pub text: Option<String>,
}
