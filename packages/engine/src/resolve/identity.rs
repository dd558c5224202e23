//! Instance identity
//!
//! A stable identifier for deduplication, chosen in decreasing order of
//! reliability: explicit GUID, correlation GUID, canonical fingerprint
//! string, and finally a synthesized string combining tool, file, rule,
//! partial fingerprints and message. The chosen string is digested so
//! sinks always receive a fixed-length identifier; collisions on the
//! synthesized fallback are accepted.

use std::collections::BTreeMap;

use ring::digest;

use crate::rundata::non_blank;

use super::{ResultResolution, UNKNOWN_FILE};

impl ResultResolution<'_> {
    /// The result's stable instance identifier: a hex-encoded SHA-256
    /// digest of the most reliable identity string available.
    #[must_use]
    pub fn instance_id(&self) -> String {
        let raw = self.instance_id_string();
        hex::encode(digest::digest(&digest::SHA256, raw.as_bytes()))
    }

    fn instance_id_string(&self) -> String {
        if let Some(guid) = non_blank(self.result.guid.as_deref()) {
            return guid.to_string();
        }
        if let Some(guid) = non_blank(self.result.correlation_guid.as_deref()) {
            return guid.to_string();
        }
        if !self.result.fingerprints.is_empty() {
            return canonical_map_string(&self.result.fingerprints);
        }
        self.generated_id_string()
    }

    // Best-effort identity from tool name, file, rule id, partial
    // fingerprints and message. Can still collide on truly identical
    // findings.
    fn generated_id_string(&self) -> String {
        let partial = if self.result.partial_fingerprints.is_empty() {
            String::new()
        } else {
            canonical_map_string(&self.result.partial_fingerprints)
        };
        [
            self.run.tool_name().unwrap_or_default().to_string(),
            self.file_name(UNKNOWN_FILE),
            self.rule_id().unwrap_or_default(),
            partial,
            self.message().unwrap_or_default(),
        ]
        .join("|")
    }
}

/// Deterministic string form of a sorted fingerprint table.
fn canonical_map_string(map: &BTreeMap<String, String>) -> String {
    let mut out = String::from("{");
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out.push('}');
    out
}
