//! Two-pass findings driver
//!
//! Runs are processed one at a time, strictly sequentially. Pass 1
//! collects the run's auxiliary data and captures the byte region of its
//! `results` array without deserializing any entry. Pass 2 re-opens the
//! source bounded to that region and parses it as a standalone array,
//! mapping each entry into a record and producing a finding for it. The
//! run's auxiliary data, including any spill storage, is released when
//! the run handler returns, on success and error paths alike.

use crate::error::ImportResult;
use crate::parser::{StartToken, StreamingParser};
use crate::rundata::RunData;
use crate::sarif::ResultRecord;
use crate::store::DEFAULT_SPILL_THRESHOLD;
use crate::stream::Region;
use crate::DEFAULT_ENGINE_TYPE;

use super::producer::FindingProducer;
use super::sink::FindingSink;
use super::source::ScanSource;

/// Counters for one import invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Runs encountered in the document.
    pub runs: u64,
    /// Result entries replayed in pass 2.
    pub results: u64,
    /// Findings actually handed to the sink.
    pub findings: u64,
}

/// Drives the two-pass traversal over every run in the document.
pub struct FindingsParser {
    engine_type: String,
    spill_threshold: usize,
}

struct FindingsCtx<'a, S: ?Sized, K> {
    source: &'a S,
    sink: &'a mut K,
    producer: &'a FindingProducer,
    spill_threshold: usize,
    stats: ImportStats,
}

struct ResultsCtx<'r, K> {
    run: &'r RunData,
    sink: &'r mut K,
    producer: &'r FindingProducer,
    results: u64,
    findings: u64,
}

impl FindingsParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine_type: DEFAULT_ENGINE_TYPE.to_string(),
            spill_threshold: DEFAULT_SPILL_THRESHOLD,
        }
    }

    /// Engine type reported on produced findings.
    #[must_use]
    pub fn engine_type(mut self, engine_type: impl Into<String>) -> Self {
        self.engine_type = engine_type.into();
        self
    }

    /// Entry count above which per-run reference tables spill to disk.
    #[must_use]
    pub fn spill_threshold(mut self, threshold: usize) -> Self {
        self.spill_threshold = threshold;
        self
    }

    /// Parse all runs of the document, producing findings into `sink`.
    pub fn parse<S, K>(&self, source: &S, sink: &mut K) -> ImportResult<ImportStats>
    where
        S: ScanSource + ?Sized,
        K: FindingSink,
    {
        let producer = FindingProducer::new(self.engine_type.clone());
        let mut ctx = FindingsCtx {
            source,
            sink,
            producer: &producer,
            spill_threshold: self.spill_threshold,
            stats: ImportStats::default(),
        };
        let parser = StreamingParser::<FindingsCtx<'_, S, K>>::new().each_entry_handler(
            "/runs",
            |_, ctx, cursor| {
                let run = RunData::parse(cursor, ctx.spill_threshold)?;
                ctx.stats.runs += 1;
                let Some(region) = run.results_region() else {
                    log::debug!("run has no results array, skipping replay pass");
                    return Ok(());
                };
                replay_results(ctx, &run, region)
            },
        );
        parser.parse(&mut ctx, source.open()?)?;
        log::debug!(
            "import finished: {} runs, {} results, {} findings",
            ctx.stats.runs,
            ctx.stats.results,
            ctx.stats.findings
        );
        Ok(ctx.stats)
    }
}

impl Default for FindingsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pass 2: replay the captured `results` region as a standalone array.
/// The bounded view must open with an array start; anything else means
/// the region was computed incorrectly and fails structurally.
fn replay_results<S, K>(
    ctx: &mut FindingsCtx<'_, S, K>,
    run: &RunData,
    region: Region,
) -> ImportResult<()>
where
    S: ScanSource + ?Sized,
    K: FindingSink,
{
    let mut results_ctx = ResultsCtx {
        run,
        sink: &mut *ctx.sink,
        producer: ctx.producer,
        results: 0,
        findings: 0,
    };
    let parser = StreamingParser::<ResultsCtx<'_, K>>::new()
        .expected_start(StartToken::Array)
        .entry_value_handler::<ResultRecord, _>("/", |rctx, record| {
            rctx.results += 1;
            if rctx.producer.produce(rctx.run, &record, rctx.sink) {
                rctx.findings += 1;
            }
            Ok(())
        });
    parser.parse_bounded(&mut results_ctx, ctx.source.open()?, Some(region))?;
    ctx.stats.results += results_ctx.results;
    ctx.stats.findings += results_ctx.findings;
    Ok(())
}
