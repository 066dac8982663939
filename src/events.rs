//! Host event wire format
//!
//! The host bundler (or a thin plugin inside it) writes newline-delimited
//! JSON, one lifecycle event per line:
//!
//! ```text
//! {"event":"invalid"}
//! {"event":"done","stats":{"startTime":0,"endTime":100,"errors":[],"warnings":[]}}
//! {"event":"done","stats":[{"startTime":0,"endTime":1000},{"startTime":2,"endTime":2002}]}
//! ```

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{TidyError, TidyResult};
use crate::stats::BuildOutcome;

/// One compiler lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// A watched file changed or a build started
    Invalid,
    /// A build finished
    Done { stats: BuildOutcome },
}

impl HostEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Decode one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str, line_no: usize) -> TidyResult<Option<HostEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| TidyError::InvalidEvent {
            line: line_no,
            message: e.to_string(),
        })
}

/// Iterator over host events read from a line-oriented source.
///
/// Read failures end the stream with an `Io` error; malformed lines,
/// including ones that are not valid UTF-8, are yielded as `InvalidEvent`
/// errors so callers can skip them and continue.
pub struct EventStream<R> {
    reader: R,
    line_no: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> EventStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: Vec::new(),
        }
    }
}

/// Decode one raw line. Invalid UTF-8 is a malformed event, not a read failure.
fn decode_line(bytes: &[u8], line_no: usize) -> TidyResult<Option<HostEvent>> {
    let line = std::str::from_utf8(bytes).map_err(|e| TidyError::InvalidEvent {
        line: line_no,
        message: e.to_string(),
    })?;
    parse_line(line, line_no)
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = TidyResult<HostEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    match decode_line(&self.buf, self.line_no) {
                        Ok(Some(event)) => return Some(Ok(event)),
                        Ok(None) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
