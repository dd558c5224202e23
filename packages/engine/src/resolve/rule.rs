//! Rule resolution
//!
//! Fallback order: ordinal index first (positional references are
//! unambiguous), then identifier, then GUID. Id and GUID lookups can
//! collide in malformed input, so they only apply when no index matches.

use crate::rundata::non_blank;
use crate::sarif::ReportingDescriptor;

use super::ResultResolution;

impl ResultResolution<'_> {
    /// The rule this result refers to, if any. Computed once; the cached
    /// miss is the sentinel for "no rule found".
    pub fn rule(&self) -> Option<&ReportingDescriptor> {
        self.rule.get_or_init(|| self.lookup_rule()).as_ref()
    }

    fn lookup_rule(&self) -> Option<ReportingDescriptor> {
        let index = self
            .result
            .rule_index
            .or_else(|| self.result.rule.as_ref().and_then(|r| r.index));
        if let Some(rule) = self.run.rule_by_index(index) {
            return Some(rule);
        }
        if let Some(id) = self.rule_id_hint() {
            if let Some(rule) = self.run.rule_by_id(id) {
                return Some(rule);
            }
        }
        if let Some(guid) = self.rule_guid_hint() {
            if let Some(rule) = self.run.rule_by_guid(guid) {
                return Some(rule);
            }
        }
        log::debug!(
            "no rule resolved for result (ruleId={:?})",
            self.result.rule_id
        );
        None
    }

    /// The rule identifier named by the result itself, before any table
    /// lookup: its own field, else the nested reference's id.
    fn rule_id_hint(&self) -> Option<&str> {
        non_blank(self.result.rule_id.as_deref())
            .or_else(|| non_blank(self.result.rule.as_ref()?.id.as_deref()))
    }

    fn rule_guid_hint(&self) -> Option<&str> {
        non_blank(self.result.rule.as_ref()?.guid.as_deref())
    }

    /// The result's effective rule identifier: its own field, else the
    /// nested reference's id, else the id of the rule found by index.
    #[must_use]
    pub fn rule_id(&self) -> Option<String> {
        self.rule_id_hint()
            .map(str::to_string)
            .or_else(|| self.rule()?.id.clone())
    }

    /// The result's effective rule GUID: the nested reference's GUID,
    /// else the GUID of the resolved rule.
    #[must_use]
    pub fn rule_guid(&self) -> Option<String> {
        self.rule_guid_hint()
            .map(str::to_string)
            .or_else(|| self.rule()?.guid.clone())
    }
}
