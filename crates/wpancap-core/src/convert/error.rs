use std::path::PathBuf;

use thiserror::Error;

use crate::dialect::Dialect;
use crate::pcap::PcapError;
use crate::timestamp::TimestampError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{}: {dialect} captures are not supported", path.display())]
    UnsupportedDialect { path: PathBuf, dialect: Dialect },
    #[error("no timestamp found in the first lines of any of {inputs} input(s)")]
    NoUsableSource { inputs: usize },
    #[error("no frames found in {sources} source(s)")]
    EmptyResult { sources: usize },
    #[error("{context} {}: {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
    #[error(transparent)]
    Pcap(#[from] PcapError),
}
