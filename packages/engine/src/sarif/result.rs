//! Result records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::artifact::ArtifactLocation;
use super::kind::Kind;
use super::level::Level;
use super::location::Location;
use super::message::Message;

/// One finding as reported within a run. Created fresh per array entry
/// during the replay pass and consumed immediately by the resolution
/// engine.
///
/// Fingerprint tables deserialize into sorted maps so their canonical
/// string form is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultRecord {
    pub guid: Option<String>,
    pub correlation_guid: Option<String>,
    pub rule_id: Option<String>,
    pub rule_index: Option<i64>,
    pub rule: Option<ReportingDescriptorReference>,
    pub kind: Option<Kind>,
    pub level: Option<Level>,
    pub message: Option<Message>,
    pub locations: Option<Vec<Location>>,
    pub analysis_target: Option<ArtifactLocation>,
    pub fingerprints: BTreeMap<String, String>,
    pub partial_fingerprints: BTreeMap<String, String>,
    pub properties: Option<Map<String, Value>>,
}

/// Inline reference to a reporting descriptor by id, index or GUID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportingDescriptorReference {
    pub id: Option<String>,
    pub index: Option<i64>,
    pub guid: Option<String>,
}
