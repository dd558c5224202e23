//! Artifact records

use serde::{Deserialize, Serialize};

/// Reference to an artifact location: a URI, optionally relative to a
/// named base URI, or an index into the run's artifact list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtifactLocation {
    pub uri: Option<String>,
    pub uri_base_id: Option<String>,
    pub index: Option<i64>,
}

/// One entry of the run's artifact list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artifact {
    pub location: Option<ArtifactLocation>,
}
