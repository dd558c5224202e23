//! Scan-level metadata parsing
//!
//! One streaming pass collecting document-level properties. When the
//! input contains multiple runs or invocations, later values win: the
//! scan date ends up as the end time of the last invocation of the last
//! run, in document order.

use chrono::{DateTime, Utc};

use crate::error::{ImportError, ImportResult};
use crate::parser::StreamingParser;
use crate::SUPPORTED_VERSION;

use super::source::ScanSource;

/// Scan-level metadata extracted from the document.
#[derive(Debug, Clone, Default)]
pub struct ScanInfo {
    pub engine_version: String,
    pub scan_date: Option<DateTime<Utc>>,
    pub host_name: Option<String>,
    pub build_id: Option<String>,
    pub scan_label: Option<String>,
    pub num_files: u64,
}

#[derive(Default)]
struct ScanAccumulator {
    version: Option<String>,
    scan_date: Option<DateTime<Utc>>,
    host_name: Option<String>,
    build_id: Option<String>,
    scan_label: Option<String>,
    num_files: u64,
}

/// Parses scan metadata and enforces the version gate: any declared
/// version other than the supported literal is a fatal error, surfaced
/// before any records are produced.
pub struct ScanParser;

impl ScanParser {
    pub fn parse<S: ScanSource + ?Sized>(source: &S) -> ImportResult<ScanInfo> {
        let mut acc = ScanAccumulator::default();
        let parser = StreamingParser::<ScanAccumulator>::new()
            .value_handler::<String, _>("/version", |acc, version| {
                acc.version = Some(version);
                Ok(())
            })
            .value_handler::<DateTime<Utc>, _>(
                "/runs/*/invocations/*/endTimeUtc",
                |acc, end_time| {
                    acc.scan_date = Some(end_time);
                    Ok(())
                },
            )
            .value_handler::<String, _>("/runs/*/invocations/*/machine", |acc, machine| {
                acc.host_name = Some(machine);
                Ok(())
            })
            .value_handler::<String, _>("/runs/*/automationDetails/guid", |acc, guid| {
                acc.build_id = Some(guid);
                Ok(())
            })
            .value_handler::<String, _>("/runs/*/automationDetails/id", |acc, id| {
                acc.scan_label = Some(id);
                Ok(())
            })
            .handler("/runs/*/artifacts", |_, acc, cursor| {
                acc.num_files += cursor.count_array_entries()?;
                Ok(())
            });
        parser.parse(&mut acc, source.open()?)?;

        let version = acc
            .version
            .unwrap_or_else(|| String::from("<none>"));
        if version != SUPPORTED_VERSION {
            return Err(ImportError::UnsupportedVersion(version));
        }
        Ok(ScanInfo {
            engine_version: version,
            scan_date: acc.scan_date,
            host_name: acc.host_name,
            build_id: acc.build_id,
            scan_label: acc.scan_label,
            num_files: acc.num_files,
        })
    }
}
