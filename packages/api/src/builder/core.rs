//! Core import builder

use sarx_engine::{
    FindingSink, FindingsParser, ImportResult, ImportStats, ScanInfo, ScanParser, ScanSource,
    DEFAULT_ENGINE_TYPE,
};

/// Fluent builder configuring and running an import.
#[derive(Debug, Clone)]
pub struct ImportBuilder {
    engine_type: String,
    spill_threshold: Option<usize>,
}

impl ImportBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine_type: DEFAULT_ENGINE_TYPE.to_string(),
            spill_threshold: None,
        }
    }

    /// Engine type string reported on produced findings.
    #[must_use]
    pub fn engine_type(mut self, engine_type: impl Into<String>) -> Self {
        self.engine_type = engine_type.into();
        self
    }

    /// Entry count above which per-run reference tables (rules,
    /// artifacts) spill to temporary disk storage.
    #[must_use]
    pub fn spill_threshold(mut self, threshold: usize) -> Self {
        self.spill_threshold = Some(threshold);
        self
    }

    /// Parse scan-level metadata only. Fails on an unsupported document
    /// version before anything else is produced.
    pub fn parse_scan<S: ScanSource + ?Sized>(&self, source: &S) -> ImportResult<ScanInfo> {
        ScanParser::parse(source)
    }

    /// Full import: version gate, then the two-pass findings traversal.
    /// Every reportable finding is handed to `sink`; the returned stats
    /// count runs, replayed results and produced findings.
    pub fn import<S, K>(&self, source: &S, sink: &mut K) -> ImportResult<ImportStats>
    where
        S: ScanSource + ?Sized,
        K: FindingSink,
    {
        let scan = ScanParser::parse(source)?;
        log::debug!(
            "importing document version {} ({} files)",
            scan.engine_version,
            scan.num_files
        );
        self.findings_parser().parse(source, sink)
    }

    /// Findings traversal without the scan pass. Callers taking this
    /// entry point are expected to have version-gated the document via
    /// [`parse_scan`](Self::parse_scan) already.
    pub fn import_findings<S, K>(&self, source: &S, sink: &mut K) -> ImportResult<ImportStats>
    where
        S: ScanSource + ?Sized,
        K: FindingSink,
    {
        self.findings_parser().parse(source, sink)
    }

    fn findings_parser(&self) -> FindingsParser {
        let mut parser = FindingsParser::new().engine_type(self.engine_type.clone());
        if let Some(threshold) = self.spill_threshold {
            parser = parser.spill_threshold(threshold);
        }
        parser
    }
}

impl Default for ImportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
