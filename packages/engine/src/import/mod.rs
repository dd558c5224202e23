//! Import drivers and output contracts
//!
//! [`ScanParser`] extracts scan-level metadata and enforces the version
//! gate; [`FindingsParser`] runs the two-pass traversal per run and feeds
//! resolved records through [`FindingProducer`] into the caller's
//! [`FindingSink`].

mod findings;
mod producer;
mod scan;
mod sink;
mod source;

pub use findings::{FindingsParser, ImportStats};
pub use producer::FindingProducer;
pub use scan::{ScanInfo, ScanParser};
pub use sink::{AttributeValue, Finding, FindingSink};
pub use source::ScanSource;
