//! Face-tracker frame sources.
//!
//! The tracker process writes one JSON frame per line; a source reads them
//! back from a file, a FIFO, or stdin.

use facebrain_core::BlendShapeFrame;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameSourceError {
    #[error("frame source not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid UTF-8 on line {line}")]
    InvalidUtf8 { line: usize },
    #[error("malformed frame on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that yields tracker frames in order.
pub trait FrameSource {
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<BlendShapeFrame>, FrameSourceError>;
}

/// JSON-lines frame reader.
pub struct JsonLinesSource<R> {
    reader: R,
    origin: String,
    line: usize,
    buf: Vec<u8>,
}

impl JsonLinesSource<Box<dyn BufRead + Send>> {
    /// Open a frame file by path, or stdin for `-`.
    pub fn open(path: &str) -> Result<Self, FrameSourceError> {
        let reader: Box<dyn BufRead + Send> = if path == "-" {
            Box::new(BufReader::new(std::io::stdin()))
        } else {
            if !Path::new(path).exists() {
                return Err(FrameSourceError::NotFound(path.to_string()));
            }
            Box::new(BufReader::new(File::open(path)?))
        };
        tracing::info!(source = path, "frame source opened");
        Ok(Self::from_reader(reader, path))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn from_reader(reader: R, origin: &str) -> Self {
        Self {
            reader,
            origin: origin.to_string(),
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Path or label this source reads from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    /// Frames without an explicit sequence number take their line number.
    fn next_frame(&mut self) -> Result<Option<BlendShapeFrame>, FrameSourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                tracing::debug!(source = %self.origin, lines = self.line, "frame source exhausted");
                return Ok(None);
            }
            self.line += 1;

            let text = std::str::from_utf8(&self.buf)
                .map_err(|_| FrameSourceError::InvalidUtf8 { line: self.line })?
                .trim();
            if text.is_empty() {
                continue;
            }

            let mut frame = BlendShapeFrame::from_json(text).map_err(|source| {
                FrameSourceError::Malformed {
                    line: self.line,
                    source,
                }
            })?;
            if frame.sequence.is_none() {
                frame.sequence = Some(self.line as u64);
            }
            return Ok(Some(frame));
        }
    }
}
