//! Result severity level

use serde::{Deserialize, Serialize};

/// Severity tier of a result, either explicit on the result or inherited
/// from the rule's default configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    /// Not a reportable severity; results resolving to this level
    /// produce no output.
    None,
    Note,
    Warning,
    Error,
}
