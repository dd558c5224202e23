//! # Sarx Engine
//!
//! Streaming import engine for SARIF static-analysis reports. Extracts a
//! bounded working set of findings from arbitrarily large, deeply nested
//! JSON documents without materializing the document in memory.
//!
//! The engine is built from a small number of cooperating parts:
//!
//! - [`stream`]: a pull-based JSON token cursor over any [`std::io::Read`]
//!   source, with byte-offset tracking, allocation-free structural skipping
//!   and raw value capture.
//! - [`parser`]: the path-addressed streaming parser. Handlers are
//!   registered against `/`-delimited logical paths (with `*` wildcards)
//!   and invoked as the single forward pass reaches them.
//! - [`stream::Region`] capture and replay: pass 1 records the byte span
//!   of the large `results` array, pass 2 re-opens the source bounded to
//!   that span and parses it as a standalone array.
//! - [`rundata`]: per-run auxiliary data (rules, base URIs, artifacts)
//!   collected during pass 1, spilling to disk-backed storage above a size
//!   threshold.
//! - [`resolve`]: layered fallback resolution of a result's rule, severity
//!   level, file name, message text and instance identity.
//! - [`import`]: the scan/findings drivers and the neutral
//!   [`import::Finding`] output contract.

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod import;
pub mod parser;
pub mod resolve;
pub mod rundata;
pub mod sarif;
pub mod store;
pub mod stream;

pub use error::{ImportError, ImportResult};
pub use import::{
    AttributeValue, Finding, FindingProducer, FindingSink, FindingsParser, ImportStats, ScanInfo,
    ScanParser, ScanSource,
};
pub use parser::{StartToken, StreamingParser};
pub use resolve::{Priority, ResultResolution};
pub use rundata::RunData;
pub use stream::{Event, JsonCursor, Region, RegionReader};

/// Engine type reported for findings when the caller does not override it.
pub const DEFAULT_ENGINE_TYPE: &str = "SARIF";

/// The single input document schema version this engine understands.
pub const SUPPORTED_VERSION: &str = "2.1.0";
