//! SARIF domain records
//!
//! The subset of the SARIF 2.1.0 object model this engine subscribes to,
//! as plain serde records. Anything not declared here is skipped by the
//! streaming parser before it is ever deserialized.

mod artifact;
mod kind;
mod level;
mod location;
mod message;
mod result;
mod rule;

pub use artifact::{Artifact, ArtifactLocation};
pub use kind::Kind;
pub use level::Level;
pub use location::{Location, PhysicalLocation, SourceRegion};
pub use message::{Message, MultiformatMessageString};
pub use result::{ReportingDescriptorReference, ResultRecord};
pub use rule::{ReportingConfiguration, ReportingDescriptor};
