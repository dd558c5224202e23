//! Result resolution engine
//!
//! Resolves a [`ResultRecord`]'s effective rule, severity level, file
//! name, message text and instance identity against the run's auxiliary
//! data, using layered fallback chains. Each resolution is a pure
//! function of immutable inputs with a single compute-once transition:
//! the resolved rule is memoized alongside the record, and a cached miss
//! doubles as the "no rule found" sentinel so repeated attempts stay
//! O(1). Failure always means "fall through to the next fallback", never
//! an error.

mod identity;
mod level;
mod location;
mod message;
mod properties;
mod rule;

pub use level::Priority;
pub use location::UNKNOWN_FILE;
pub use message::{resolve_args, strip_links};

pub(crate) use properties::{float_property, string_list_property, string_property};

use once_cell::unsync::OnceCell;

use crate::rundata::RunData;
use crate::sarif::{ReportingDescriptor, ResultRecord};

/// One result record paired with its run's auxiliary data, resolving
/// derived values on demand and caching the rule lookup.
pub struct ResultResolution<'a> {
    result: &'a ResultRecord,
    run: &'a RunData,
    rule: OnceCell<Option<ReportingDescriptor>>,
}

impl<'a> ResultResolution<'a> {
    #[must_use]
    pub fn new(result: &'a ResultRecord, run: &'a RunData) -> Self {
        Self {
            result,
            run,
            rule: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn record(&self) -> &ResultRecord {
        self.result
    }

    #[must_use]
    pub fn run(&self) -> &RunData {
        self.run
    }
}
