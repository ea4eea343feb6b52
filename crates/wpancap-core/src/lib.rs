//! Conversion of IEEE 802.15.4 sniffer text logs into classic PCAP files.
//!
//! Capture tools log frames as text lines carrying a timestamp and the frame
//! bytes in hex, each in its own loosely structured layout. This crate turns
//! such logs into little-endian PCAP files that packet analyzers open
//! directly.
//!
//! The pipeline for every line is: dialect preprocessing (`dialect`) ->
//! timestamp and payload extraction (`extract`) -> record encoding (`pcap`)
//! -> output orchestration (`convert`). Numeric and byte conversions live in
//! `codec`, timestamp parsing and rendering in `timestamp`. Only the
//! orchestrator touches the filesystem.
//!
//! Invariants:
//! - Sources are merged in order of their first timestamp; ties keep the
//!   caller's order.
//! - Output files exist only when they hold at least one record.
//! - Lines that carry no frame are skipped and counted, never fatal.
//!
//! # Examples
//! ```no_run
//! use std::path::PathBuf;
//!
//! use wpancap_core::{ConversionOptions, OutputTarget, convert};
//!
//! let options = ConversionOptions::new(
//!     vec![PathBuf::from("sniffer.log")],
//!     OutputTarget::File(PathBuf::from("sniffer.pcap")),
//! );
//! let summary = convert(&options)?;
//! println!("{} records written", summary.records_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod codec;
mod convert;
pub mod dialect;
pub mod extract;
pub mod pcap;
pub mod timestamp;

pub use convert::{
    ConversionOptions, ConvertError, DISCOVERY_LINES, OutputTarget, convert, resolve_dialects,
};
pub use dialect::Dialect;
pub use pcap::LinkType;
pub use timestamp::{Timestamp, TimestampError, TimestampNormalizer};

/// Current summary schema version.
pub const SUMMARY_VERSION: u32 = 1;

/// What a conversion run read and wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Summary schema version (not the binary version).
    pub summary_version: u32,
    pub tool: ToolInfo,
    pub link_type: LinkType,
    /// Chunk length in seconds, absent when chunking is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_period_s: Option<u64>,
    pub records_total: u64,
    /// Lines that carried no frame, over all sources.
    pub skipped_lines: u64,
    /// Merged sources in merge order.
    pub sources: Vec<SourceSummary>,
    /// Inputs without a timestamp in their first lines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_sources: Vec<String>,
    /// Files written, in the order they were closed.
    pub outputs: Vec<OutputSummary>,
}

/// Tool metadata embedded in summaries.
///
/// # Examples
/// ```
/// use wpancap_core::ToolInfo;
///
/// let tool = ToolInfo::current();
/// assert_eq!(tool.name, "wpancap");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "wpancap".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One merged source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    pub path: String,
    pub dialect: Dialect,
    /// RFC3339 time of the first frame found while ordering sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_timestamp: Option<String>,
    pub records: u64,
    pub skipped_lines: u64,
}

/// One written PCAP file.
///
/// # Examples
/// ```
/// use wpancap_core::OutputSummary;
///
/// let output = OutputSummary {
///     path: "capture.pcap".to_string(),
///     records: 2,
///     bytes: 24 + 2 * 20,
///     time_start: Some("2017-07-20T15:25:04.533Z".to_string()),
///     time_end: None,
/// };
/// assert_eq!(output.records, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSummary {
    pub path: String,
    pub records: u64,
    /// File size, global header included.
    pub bytes: u64,
    /// RFC3339 time of the first record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// RFC3339 time of the last record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}
