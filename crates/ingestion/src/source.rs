//! Line-oriented record source

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IngestionError, Result};

/// Reads one record (line) at a time from a text source.
pub struct RecordSource {
    reader: Box<dyn BufRead + Send>,
    buffer: Vec<u8>,
    /// Lines consumed so far (header included)
    line: u64,
}

impl RecordSource {
    /// Open a file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Wrap any buffered reader
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
            buffer: Vec::new(),
            line: 0,
        }
    }

    /// Next line without its terminator, `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 come back as U+FFFD; only I/O
    /// failures are errors.
    pub fn next_record(&mut self) -> Result<Option<Cow<'_, str>>> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(|source| IngestionError::Read {
                line: self.line + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        let mut end = self.buffer.len();
        while end > 0 && matches!(self.buffer[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        Ok(Some(String::from_utf8_lossy(&self.buffer[..end])))
    }

    /// Number of the last line returned (1-based)
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl std::fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSource")
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}
