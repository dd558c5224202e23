//! Level and priority resolution

use crate::sarif::{Kind, Level};

use super::{string_property, ResultResolution};

/// Output priority tier of a reportable finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        };
        f.write_str(name)
    }
}

impl ResultResolution<'_> {
    /// The result's effective severity level: explicit level, else the
    /// resolved rule's default configuration, else a kind-based default
    /// where `fail` (or absent kind) means `warning` and anything else
    /// means `none`.
    #[must_use]
    pub fn level(&self) -> Level {
        if let Some(level) = self.result.level {
            return level;
        }
        if let Some(rule) = self.rule() {
            return rule.default_level();
        }
        match self.result.kind {
            Some(Kind::Fail) | None => Level::Warning,
            Some(_) => Level::None,
        }
    }

    /// The output priority, or `None` when the result is not a
    /// reportable finding. A `security-severity` score on the rule takes
    /// precedence over the level mapping; malformed or out-of-range
    /// scores fall through to the level chain.
    #[must_use]
    pub fn priority(&self) -> Option<Priority> {
        if let Some(priority) = self.security_severity_priority() {
            return Some(priority);
        }
        level_priority(self.level())
    }

    fn security_severity_priority(&self) -> Option<Priority> {
        let raw = string_property(self.rule()?.properties.as_ref(), "security-severity")?;
        let score: f32 = match raw.trim().parse() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("error converting security-severity string '{raw}' to float: {e}");
                return None;
            }
        };
        // CVSS score ranges.
        if score < 0.0 {
            log::warn!("invalid security-severity, {score} is less than 0");
            None
        } else if score < 4.0 {
            Some(Priority::Low)
        } else if score < 7.0 {
            Some(Priority::Medium)
        } else if score < 9.0 {
            Some(Priority::High)
        } else if score <= 10.0 {
            Some(Priority::Critical)
        } else {
            log::warn!("invalid security-severity, {score} is greater than 10");
            None
        }
    }
}

pub(crate) fn level_priority(level: Level) -> Option<Priority> {
    match level {
        Level::Error => Some(Priority::High),
        Level::Warning => Some(Priority::Medium),
        Level::Note => Some(Priority::Low),
        Level::None => None,
    }
}
