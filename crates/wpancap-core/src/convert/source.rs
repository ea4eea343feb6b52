use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::dialect::Dialect;
use crate::extract::LineExtractor;
use crate::timestamp::Timestamp;

use super::error::ConvertError;

/// Lines inspected when looking for a source's first timestamp.
pub const DISCOVERY_LINES: usize = 2;

#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub first_timestamp: Timestamp,
}

/// Resolve every input's dialect, failing on the first unsupported one.
///
/// Touches nothing on disk, so callers can reject a run before preparing
/// output locations.
pub fn resolve_dialects(inputs: &[PathBuf]) -> Result<Vec<(PathBuf, Dialect)>, ConvertError> {
    inputs
        .iter()
        .map(|path| {
            let dialect = Dialect::for_path(path);
            if !dialect.is_supported() {
                return Err(ConvertError::UnsupportedDialect {
                    path: path.clone(),
                    dialect,
                });
            }
            Ok((path.clone(), dialect))
        })
        .collect()
}

/// Timestamp of the first usable line among the first [`DISCOVERY_LINES`].
pub fn discover(
    path: &Path,
    dialect: Dialect,
    extractor: &LineExtractor,
) -> Result<Option<Timestamp>, ConvertError> {
    let mut lines = LineSource::open(path)?;
    for _ in 0..DISCOVERY_LINES {
        let Some(line) = lines.next_line()? else {
            break;
        };
        if let Some(timestamp) = line_timestamp(&line, dialect, extractor) {
            return Ok(Some(timestamp));
        }
    }
    Ok(None)
}

fn line_timestamp(line: &str, dialect: Dialect, extractor: &LineExtractor) -> Option<Timestamp> {
    let line = dialect.preprocess(line, extractor.normalizer()).ok()?;
    extractor.extract(&line).ok().map(|data| data.timestamp)
}

/// Reads a source line by line, terminators kept. Invalid UTF-8 is replaced
/// rather than rejected.
#[derive(Debug)]
pub struct LineSource {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_number: u64,
}

impl LineSource {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::Io {
            context: "cannot open input",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_number: 0,
        })
    }

    pub fn next_line(&mut self) -> Result<Option<String>, ConvertError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| ConvertError::Io {
                context: "cannot read input",
                path: self.path.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    /// 1-based number of the line last returned.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_source(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn unsupported_dialects_are_rejected_up_front() {
        let inputs = vec![PathBuf::from("a.txt"), PathBuf::from("b.isd")];
        let err = resolve_dialects(&inputs).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedDialect {
                dialect: Dialect::EmberInsight,
                ..
            }
        ));
    }

    #[test]
    fn discovery_looks_at_two_lines() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = LineExtractor::default();
        let second = write_source(
            dir.path(),
            "second.txt",
            b"# capture log\n1500564304533 aa bb cc\n",
        );
        let third = write_source(
            dir.path(),
            "third.txt",
            b"# capture log\n# channel 11\n1500564304533 aa bb cc\n",
        );

        let found = discover(&second, Dialect::PlainHex, &extractor).unwrap();
        assert_eq!(found.unwrap().as_secs_f64(), 1_500_564_304.533);
        assert!(discover(&third, Dialect::PlainHex, &extractor).unwrap().is_none());
    }

    #[test]
    fn lines_keep_terminators_and_survive_binary_junk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_source(dir.path(), "junk.txt", b"ab\xffcd\r\nlast");
        let mut lines = LineSource::open(&path).unwrap();
        assert_eq!(lines.next_line().unwrap().unwrap(), "ab\u{fffd}cd\r\n");
        assert_eq!(lines.next_line().unwrap().unwrap(), "last");
        assert_eq!(lines.line_number(), 2);
        assert!(lines.next_line().unwrap().is_none());
    }

    #[test]
    fn missing_input_reports_its_path() {
        let err = LineSource::open(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
