//! Result kind

use serde::{Deserialize, Serialize};

/// The nature of a result. Absent kind is treated as [`Kind::Fail`] by
/// the resolution engine, per the format specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    /// The rule was evaluated and no problem was found.
    Pass,
    /// The rule was evaluated but the tool could not decide whether a
    /// problem exists.
    Open,
    /// A purely informational result.
    Informational,
    /// The rule does not apply to the analysis target.
    NotApplicable,
    /// A human must review the result to decide if it is a problem.
    Review,
    /// A problem whose severity is given by the result's level.
    Fail,
}

impl Kind {
    /// Whether results of this kind can ever be reported as findings.
    #[must_use]
    pub fn is_reportable(self) -> bool {
        matches!(self, Kind::Open | Kind::Review | Kind::Fail)
    }
}
