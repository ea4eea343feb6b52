//! Multi-source conversion into one or more PCAP files.
//!
//! Every input is resolved to a dialect first; an unsupported dialect aborts
//! the run before anything is read. Sources are then ordered by the
//! timestamp of the first usable line among their first two lines (sources
//! without one are dropped) and streamed line by line through the extractor
//! and the PCAP encoder into an [`OutputTarget`].

mod error;
mod sink;
mod source;
mod target;

use std::fmt;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use log::{debug, info, trace, warn};

use crate::extract::LineExtractor;
use crate::pcap::{LinkType, encode_line};
use crate::timestamp::{Timestamp, TimestampNormalizer, to_rfc3339};
use crate::{ConversionSummary, SUMMARY_VERSION, SourceSummary, ToolInfo};

pub use error::ConvertError;
pub use source::{DISCOVERY_LINES, resolve_dialects};
pub use target::OutputTarget;

use sink::OutputSink;
use source::{LineSource, Source, discover};

/// Everything a conversion run needs.
///
/// # Examples
/// ```
/// use std::num::NonZeroU64;
/// use std::path::PathBuf;
///
/// use wpancap_core::{ConversionOptions, LinkType, OutputTarget};
///
/// let options = ConversionOptions::new(
///     vec![PathBuf::from("sniffer.log")],
///     OutputTarget::Directory(PathBuf::from("pcaps")),
/// )
/// .with_chunk_period(NonZeroU64::new(3600))
/// .with_link_type(LinkType::from_fcs(true));
/// assert_eq!(options.link_type.code(), 195);
/// ```
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub inputs: Vec<PathBuf>,
    pub target: OutputTarget,
    /// Chunk length in seconds; `None` disables chunking.
    pub chunk_period: Option<NonZeroU64>,
    pub link_type: LinkType,
    /// Offset that calendar timestamps are read and file names written in.
    pub normalizer: TimestampNormalizer,
}

impl ConversionOptions {
    pub fn new(inputs: Vec<PathBuf>, target: OutputTarget) -> Self {
        Self {
            inputs,
            target,
            chunk_period: None,
            link_type: LinkType::default(),
            normalizer: TimestampNormalizer::default(),
        }
    }

    pub fn with_chunk_period(mut self, chunk_period: Option<NonZeroU64>) -> Self {
        self.chunk_period = chunk_period;
        self
    }

    pub fn with_link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub fn with_normalizer(mut self, normalizer: TimestampNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct LineCounts {
    records: u64,
    skipped: u64,
}

/// Convert the configured inputs and describe what was written.
///
/// # Errors
/// - `UnsupportedDialect` when any input is an `.isd` or `.psd` capture
/// - `NoUsableSource` when no input has a timestamp in its first lines
/// - `EmptyResult` when no line of any source produced a frame
/// - `Io` when an input cannot be read or an output cannot be written
pub fn convert(options: &ConversionOptions) -> Result<ConversionSummary, ConvertError> {
    let resolved = resolve_dialects(&options.inputs)?;
    let extractor = LineExtractor::new(options.normalizer);

    let mut sources = Vec::with_capacity(resolved.len());
    let mut dropped_sources = Vec::new();
    for (path, dialect) in resolved {
        match discover(&path, dialect, &extractor)? {
            Some(first_timestamp) => {
                debug!("{}: {dialect}, first frame at {first_timestamp}", path.display());
                sources.push(Source {
                    path,
                    dialect,
                    first_timestamp,
                });
            }
            None => {
                warn!(
                    "{}: no timestamp in the first {DISCOVERY_LINES} lines, source skipped",
                    path.display()
                );
                dropped_sources.push(path.display().to_string());
            }
        }
    }
    if sources.is_empty() {
        return Err(ConvertError::NoUsableSource {
            inputs: options.inputs.len(),
        });
    }
    sources.sort_by(|a, b| a.first_timestamp.total_cmp(&b.first_timestamp));

    let mut sink = OutputSink::new(options.link_type, options.chunk_period)?;
    let mut source_summaries = Vec::with_capacity(sources.len());
    let mut totals = LineCounts::default();
    for source in &sources {
        let counts = stream_source(source, options, &extractor, &mut sink)?;
        if options.target.per_source() {
            sink.close();
        }
        totals.records += counts.records;
        totals.skipped += counts.skipped;
        source_summaries.push(SourceSummary {
            path: source.path.display().to_string(),
            dialect: source.dialect,
            first_timestamp: to_rfc3339(source.first_timestamp),
            records: counts.records,
            skipped_lines: counts.skipped,
        });
    }
    let outputs = sink.finish();

    if totals.records == 0 {
        return Err(ConvertError::EmptyResult {
            sources: sources.len(),
        });
    }
    info!(
        "{} records from {} source(s) written to {} file(s), {} lines skipped",
        totals.records,
        sources.len(),
        outputs.len(),
        totals.skipped
    );

    Ok(ConversionSummary {
        summary_version: SUMMARY_VERSION,
        tool: ToolInfo::current(),
        link_type: options.link_type,
        chunk_period_s: options.chunk_period.map(NonZeroU64::get),
        records_total: totals.records,
        skipped_lines: totals.skipped,
        sources: source_summaries,
        dropped_sources,
        outputs,
    })
}

fn stream_source(
    source: &Source,
    options: &ConversionOptions,
    extractor: &LineExtractor,
    sink: &mut OutputSink,
) -> Result<LineCounts, ConvertError> {
    debug!("reading {}", source.path.display());
    let mut lines = LineSource::open(&source.path)?;
    let mut counts = LineCounts::default();

    while let Some(line) = lines.next_line()? {
        let line = match source.dialect.preprocess(&line, extractor.normalizer()) {
            Ok(line) => line,
            Err(reason) => {
                skip(&mut counts, &source.path, lines.line_number(), reason);
                continue;
            }
        };
        let record = match encode_line(extractor, &line) {
            Ok(record) => record,
            Err(reason) => {
                skip(&mut counts, &source.path, lines.line_number(), reason);
                continue;
            }
        };
        sink.write(&record, |anchor| output_path(options, &source.path, anchor))?;
        counts.records += 1;
    }
    Ok(counts)
}

fn output_path(
    options: &ConversionOptions,
    source: &Path,
    anchor: Timestamp,
) -> Result<PathBuf, ConvertError> {
    let stamp = match options.chunk_period {
        Some(_) => Some(options.normalizer.to_compact_text(anchor, false)?),
        None => None,
    };
    Ok(options.target.output_path(source, stamp.as_deref()))
}

fn skip(counts: &mut LineCounts, path: &Path, line_number: u64, reason: impl fmt::Display) {
    counts.skipped += 1;
    trace!("{}:{line_number}: skipped: {reason}", path.display());
}

