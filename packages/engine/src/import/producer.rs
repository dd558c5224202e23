//! Finding production
//!
//! Maps one resolved result into the neutral [`Finding`] record and hands
//! it to the sink. Results whose kind or resolved severity marks them as
//! non-reportable are dropped here, silently; not every result in the
//! input format is meant to produce output.

use crate::resolve::{
    float_property, string_list_property, string_property, ResultResolution, UNKNOWN_FILE,
};
use crate::rundata::{non_blank, RunData};
use crate::sarif::{Kind, ResultRecord};

use super::sink::{AttributeValue, Finding, FindingSink};

const NOT_AVAILABLE: &str = "Not Available";

/// Produces findings from resolved results. The engine type is an
/// explicit construction-time value owned by the caller, not process
/// state.
pub struct FindingProducer {
    engine_type: String,
}

impl FindingProducer {
    #[must_use]
    pub fn new(engine_type: impl Into<String>) -> Self {
        Self {
            engine_type: engine_type.into(),
        }
    }

    #[must_use]
    pub fn engine_type(&self) -> &str {
        &self.engine_type
    }

    /// Produce a finding for `result` if it is reportable. Returns
    /// whether the sink was invoked.
    pub fn produce<K: FindingSink + ?Sized>(
        &self,
        run: &RunData,
        result: &ResultRecord,
        sink: &mut K,
    ) -> bool {
        // Absent kind defaults to fail, per the format specification.
        let kind = result.kind.unwrap_or(Kind::Fail);
        if !kind.is_reportable() {
            log::trace!("dropping result of kind {kind:?}");
            return false;
        }
        let resolution = ResultResolution::new(result, run);
        let Some(priority) = resolution.priority() else {
            log::debug!("result resolves to no reportable severity, dropping");
            return false;
        };
        let finding = Finding {
            instance_id: resolution.instance_id(),
            category: self.category(&resolution),
            sub_category: self.sub_category(&resolution),
            priority,
            file_name: resolution.file_name(UNKNOWN_FILE),
            message: resolution.message(),
            line_number: resolution.line_number(),
            attributes: self.attributes(&resolution),
        };
        sink.finding(finding);
        true
    }

    /// Category fallback chain: rule short description, rule display
    /// name (camel-case names are split into words), rule `Type`
    /// property, resolved rule id, tool name.
    fn category(&self, resolution: &ResultResolution<'_>) -> String {
        if let Some(rule) = resolution.rule() {
            if let Some(text) = rule
                .short_description
                .as_ref()
                .and_then(|sd| resolution.template_text(sd))
            {
                return text;
            }
            if let Some(name) = non_blank(rule.name.as_deref()) {
                if name.contains(' ') {
                    return name.to_string();
                }
                return title_case_camel(name);
            }
            if let Some(kind) = string_property(rule.properties.as_ref(), "Type") {
                if !kind.trim().is_empty() {
                    return kind;
                }
            }
        }
        if let Some(id) = resolution.rule_id() {
            if !id.trim().is_empty() {
                return id;
            }
        }
        resolution
            .run()
            .tool_name()
            .unwrap_or(&self.engine_type)
            .to_string()
    }

    fn sub_category(&self, resolution: &ResultResolution<'_>) -> Option<String> {
        let rule = resolution.rule()?;
        string_property(rule.properties.as_ref(), "Subtype").filter(|s| !s.trim().is_empty())
    }

    fn attributes(&self, resolution: &ResultResolution<'_>) -> Vec<(String, AttributeValue)> {
        let rule_props = resolution.rule().and_then(|r| r.properties.as_ref());
        let result_props = resolution.record().properties.as_ref();
        let mut attributes = Vec::new();

        if let Some(tool) = resolution.run().tool_name() {
            attributes.push(("toolName".into(), AttributeValue::Text(tool.to_string())));
        }
        let category = self.category(resolution);
        let combined = match self.sub_category(resolution) {
            Some(sub) => format!("{category}: {sub}"),
            None => category,
        };
        attributes.push((
            "categoryAndSubCategory".into(),
            AttributeValue::Text(combined),
        ));
        attributes.push(("help".into(), AttributeValue::Text(self.help(resolution))));
        attributes.push((
            "helpUri".into(),
            AttributeValue::Text(self.help_uri(resolution)),
        ));
        let tags = self.tags(resolution);
        if !tags.is_empty() {
            attributes.push(("tags".into(), AttributeValue::Text(tags)));
        }
        if let Some(snippet) = resolution.snippet() {
            attributes.push(("snippet".into(), AttributeValue::Text(snippet)));
        }

        // Numeric scores with recommended defaults; malformed property
        // values fall back to the default.
        attributes.push((
            "accuracy".into(),
            AttributeValue::Number(f64::from(float_property(rule_props, "Accuracy", 5.0))),
        ));
        attributes.push((
            "severity".into(),
            AttributeValue::Number(f64::from(float_property(
                result_props,
                "InstanceSeverity",
                2.5,
            ))),
        ));
        attributes.push((
            "confidence".into(),
            AttributeValue::Number(f64::from(float_property(result_props, "Confidence", 2.5))),
        ));
        attributes.push((
            "probability".into(),
            AttributeValue::Number(f64::from(float_property(rule_props, "Probability", 2.5))),
        ));
        attributes.push((
            "impact".into(),
            AttributeValue::Number(f64::from(float_property(rule_props, "Impact", 2.5))),
        ));
        attributes.push(("likelihood".into(), AttributeValue::Number(2.5)));
        attributes
    }

    fn help(&self, resolution: &ResultResolution<'_>) -> String {
        resolution
            .rule()
            .and_then(|r| r.help.as_ref())
            .and_then(|h| non_blank(h.text.as_deref()))
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    }

    fn help_uri(&self, resolution: &ResultResolution<'_>) -> String {
        resolution
            .rule()
            .and_then(|r| non_blank(r.help_uri.as_deref()))
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    }

    /// Rule tags, minus the ubiquitous `security` tag that code-scanning
    /// pipelines require on every finding.
    fn tags(&self, resolution: &ResultResolution<'_>) -> String {
        let props = resolution.rule().and_then(|r| r.properties.as_ref());
        string_list_property(props, "tags")
            .into_iter()
            .filter(|tag| !tag.eq_ignore_ascii_case("security"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(PartialEq, Clone, Copy)]
enum CharKind {
    Upper,
    Lower,
    Digit,
    Other,
}

fn char_kind(c: char) -> CharKind {
    if c.is_uppercase() {
        CharKind::Upper
    } else if c.is_lowercase() {
        CharKind::Lower
    } else if c.is_ascii_digit() {
        CharKind::Digit
    } else {
        CharKind::Other
    }
}

/// Split a camel-case identifier into space-separated words and
/// capitalize the result: `UnusedVariable` becomes `Unused Variable`,
/// `SQLInjection` becomes `SQL Injection`.
fn title_case_camel(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let mut words: Vec<String> = Vec::new();
    let mut start = 0usize;
    for i in 1..chars.len() {
        let prev = char_kind(chars[i - 1]);
        let cur = char_kind(chars[i]);
        if cur == prev {
            continue;
        }
        // An upper-to-lower transition starts the new word at the last
        // upper-case character (the tail of an acronym run).
        let split_at = if prev == CharKind::Upper && cur == CharKind::Lower {
            i - 1
        } else {
            i
        };
        if split_at > start {
            words.push(chars[start..split_at].iter().collect());
            start = split_at;
        }
    }
    words.push(chars[start..].iter().collect());
    let joined = words.join(" ");
    let mut rest = joined.chars();
    match rest.next() {
        Some(first) => first.to_uppercase().collect::<String>() + rest.as_str(),
        None => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::title_case_camel;

    #[test]
    fn test_title_case_camel() {
        assert_eq!(title_case_camel("UnusedVariable"), "Unused Variable");
        assert_eq!(title_case_camel("unusedVariable"), "Unused Variable");
        assert_eq!(title_case_camel("SQLInjection"), "SQL Injection");
        assert_eq!(title_case_camel("X509Check"), "X 509 Check");
        assert_eq!(title_case_camel("simple"), "Simple");
        assert_eq!(title_case_camel(""), "");
    }
}
