//! Per-run auxiliary data
//!
//! Cross-referenced metadata collected during the first pass over a run
//! object: the base-URI table, the rule table with its secondary indexes,
//! the artifact list, the tool name, and the byte region of the `results`
//! array. The large tables live in spillable storage; everything is
//! released when the run's processing block exits.

use hashbrown::HashMap;

use crate::error::ImportResult;
use crate::parser::StreamingParser;
use crate::sarif::{Artifact, ArtifactLocation, ReportingDescriptor};
use crate::store::SpillList;
use crate::stream::{JsonCursor, Region};

/// Auxiliary data for one `run` entry of the input document.
pub struct RunData {
    // A document carries a small, bounded set of URI base ids, so the
    // table stays in memory. Rules and artifacts can be adversarially
    // large and go through spillable storage.
    original_uri_base_ids: HashMap<String, ArtifactLocation>,
    artifacts_by_index: SpillList<Artifact>,
    rule_indexes_by_id: HashMap<String, usize>,
    rule_indexes_by_guid: HashMap<String, usize>,
    rules_by_index: SpillList<ReportingDescriptor>,
    results_region: Option<Region>,
    tool_name: Option<String>,
}

impl RunData {
    fn with_threshold(spill_threshold: usize) -> Self {
        Self {
            original_uri_base_ids: HashMap::new(),
            artifacts_by_index: SpillList::with_threshold(spill_threshold),
            rule_indexes_by_id: HashMap::new(),
            rule_indexes_by_guid: HashMap::new(),
            rules_by_index: SpillList::with_threshold(spill_threshold),
            results_region: None,
            tool_name: None,
        }
    }

    /// Collect auxiliary data from the run object the cursor is
    /// positioned at. The `results` array itself is not parsed; only
    /// its byte region is captured for the replay pass.
    pub fn parse(cursor: &mut JsonCursor<'_>, spill_threshold: usize) -> ImportResult<Self> {
        let mut run = Self::with_threshold(spill_threshold);
        let parser = StreamingParser::<Self>::new()
            .named_value_handler::<ArtifactLocation, _>(
                "/originalUriBaseIds/*",
                |run, name, location| {
                    run.original_uri_base_ids.insert(name.to_string(), location);
                    Ok(())
                },
            )
            .value_handler::<Artifact, _>("/artifacts/*", |run, artifact| {
                run.add_artifact(artifact)
            })
            .value_handler::<ReportingDescriptor, _>("/tool/driver/rules/*", |run, rule| {
                run.add_rule(rule)
            })
            .value_handler::<String, _>("/tool/driver/name", |run, name| {
                run.tool_name = Some(name);
                Ok(())
            })
            .region_handler("/results", |run, region| {
                run.results_region = Some(region);
                Ok(())
            });
        parser.parse_object_properties(&mut run, cursor, "/")?;
        Ok(run)
    }

    fn add_artifact(&mut self, artifact: Artifact) -> ImportResult<()> {
        self.artifacts_by_index.push(artifact)?;
        Ok(())
    }

    fn add_rule(&mut self, rule: ReportingDescriptor) -> ImportResult<()> {
        let index = self.rules_by_index.len();
        if let Some(id) = non_blank(rule.id.as_deref()) {
            self.rule_indexes_by_id.insert(id.to_string(), index);
        }
        if let Some(guid) = non_blank(rule.guid.as_deref()) {
            self.rule_indexes_by_guid.insert(guid.to_string(), index);
        }
        self.rules_by_index.push(rule)?;
        Ok(())
    }

    /// The base location registered under `uri_base_id`, if any.
    #[must_use]
    pub fn base_location(&self, uri_base_id: &str) -> Option<&ArtifactLocation> {
        self.original_uri_base_ids.get(uri_base_id)
    }

    #[must_use]
    pub fn artifact_by_index(&self, index: Option<i64>) -> Option<Artifact> {
        let index = index?;
        if self.artifacts_by_index.is_empty() {
            return None;
        }
        if index < 0 || index as usize >= self.artifacts_by_index.len() {
            log::warn!("input error: ignoring non-existing artifact index {index}");
            return None;
        }
        self.artifacts_by_index.get(index as usize)
    }

    #[must_use]
    pub fn rule_by_index(&self, index: Option<i64>) -> Option<ReportingDescriptor> {
        let index = index?;
        if self.rules_by_index.is_empty() {
            return None;
        }
        if index < 0 || index as usize >= self.rules_by_index.len() {
            log::warn!("input error: ignoring non-existing rule index {index}");
            return None;
        }
        self.rules_by_index.get(index as usize)
    }

    #[must_use]
    pub fn rule_by_id(&self, id: &str) -> Option<ReportingDescriptor> {
        self.rule_indexes_by_id
            .get(id)
            .and_then(|&i| self.rules_by_index.get(i))
    }

    #[must_use]
    pub fn rule_by_guid(&self, guid: &str) -> Option<ReportingDescriptor> {
        self.rule_indexes_by_guid
            .get(guid)
            .and_then(|&i| self.rules_by_index.get(i))
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules_by_index.len()
    }

    #[must_use]
    pub fn tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }

    /// Byte region of the run's `results` array, once pass 1 has reached
    /// it.
    #[must_use]
    pub fn results_region(&self) -> Option<Region> {
        self.results_region
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
