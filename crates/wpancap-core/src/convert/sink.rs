use std::fs::{File, OpenOptions};
use std::io::Write;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use log::debug;

use crate::OutputSummary;
use crate::pcap::{EncodedRecord, LinkType, build_global_header};
use crate::timestamp::{Timestamp, to_rfc3339};

use super::error::ConvertError;

/// Records and byte counts of one output path over the whole run.
struct Written {
    path: PathBuf,
    records: u64,
    bytes: u64,
    first: Timestamp,
    last: Timestamp,
}

impl Written {
    fn summary(&self) -> OutputSummary {
        OutputSummary {
            path: self.path.display().to_string(),
            records: self.records,
            bytes: self.bytes,
            time_start: to_rfc3339(self.first),
            time_end: to_rfc3339(self.last),
        }
    }

    fn absorb(&mut self, other: Written) {
        self.records += other.records;
        self.bytes += other.bytes;
        if other.first.total_cmp(&self.first).is_lt() {
            self.first = other.first;
        }
        if other.last.total_cmp(&self.last).is_gt() {
            self.last = other.last;
        }
    }
}

/// The output file currently receiving records.
struct OpenChunk {
    file: File,
    anchor: Timestamp,
    written: Written,
}

/// Owns at most one open output file.
///
/// Files are opened on the first record they receive, so an output never
/// exists without records. With a chunk period, the chunk closes after the
/// first record lying more than one period past the chunk's first record;
/// that record stays in the closing chunk.
///
/// A path opened again in the same run is appended to without a second
/// header, and its summary entry is merged with the earlier one.
pub struct OutputSink {
    header: Vec<u8>,
    chunk_period: Option<NonZeroU64>,
    open: Option<OpenChunk>,
    written: Vec<Written>,
}

impl OutputSink {
    pub fn new(
        link_type: LinkType,
        chunk_period: Option<NonZeroU64>,
    ) -> Result<Self, ConvertError> {
        Ok(Self {
            header: build_global_header(link_type)?,
            chunk_period,
            open: None,
            written: Vec::new(),
        })
    }

    /// Append `record`, opening the file named by `path_for(anchor)` first
    /// when nothing is open.
    pub fn write<F>(&mut self, record: &EncodedRecord, path_for: F) -> Result<(), ConvertError>
    where
        F: FnOnce(Timestamp) -> Result<PathBuf, ConvertError>,
    {
        let mut chunk = match self.open.take() {
            Some(chunk) => chunk,
            None => self.open_chunk(path_for(record.timestamp)?, record.timestamp)?,
        };

        chunk
            .file
            .write_all(&record.bytes)
            .map_err(|source| ConvertError::Io {
                context: "cannot write output",
                path: chunk.written.path.clone(),
                source,
            })?;
        chunk.written.records += 1;
        chunk.written.bytes += record.bytes.len() as u64;
        chunk.written.last = record.timestamp;

        let expired = self
            .chunk_period
            .is_some_and(|period| record.timestamp.exceeds(chunk.anchor, period.get()));
        self.open = Some(chunk);
        if expired {
            self.close();
        }
        Ok(())
    }

    pub fn close(&mut self) {
        let Some(chunk) = self.open.take() else {
            return;
        };
        let written = chunk.written;
        debug!(
            "closed {} ({} records, {} bytes)",
            written.path.display(),
            written.records,
            written.bytes
        );
        match self.earlier(&written.path) {
            Some(index) => self.written[index].absorb(written),
            None => self.written.push(written),
        }
    }

    /// Close any open file and list every file written.
    pub fn finish(mut self) -> Vec<OutputSummary> {
        self.close();
        self.written.iter().map(Written::summary).collect()
    }

    fn earlier(&self, path: &Path) -> Option<usize> {
        self.written.iter().position(|written| written.path == path)
    }

    fn open_chunk(&self, path: PathBuf, anchor: Timestamp) -> Result<OpenChunk, ConvertError> {
        let io_error = |source| ConvertError::Io {
            context: "cannot create output",
            path: path.clone(),
            source,
        };
        let reopened = self.earlier(&path).is_some();
        let (file, bytes) = if reopened {
            debug!("reopened {} at {anchor}", path.display());
            let file = OpenOptions::new()
                .append(true)
                .open(&path)
                .map_err(io_error)?;
            (file, 0)
        } else {
            debug!("opened {} at {anchor}", path.display());
            let mut file = File::create(&path).map_err(io_error)?;
            file.write_all(&self.header).map_err(io_error)?;
            (file, self.header.len() as u64)
        };
        Ok(OpenChunk {
            file,
            anchor,
            written: Written {
                path,
                records: 0,
                bytes,
                first: anchor,
                last: anchor,
            },
        })
    }
}
