//! Location records

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactLocation;
use super::message::{Message, MultiformatMessageString};

/// One location a result applies to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub physical_location: Option<PhysicalLocation>,
    pub message: Option<Message>,
}

/// Physical location: the artifact plus an optional source region.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicalLocation {
    pub artifact_location: Option<ArtifactLocation>,
    pub region: Option<SourceRegion>,
}

/// Source region within an artifact. Only the fields the resolution
/// engine consumes are mapped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceRegion {
    pub start_line: Option<u32>,
    pub snippet: Option<MultiformatMessageString>,
}
