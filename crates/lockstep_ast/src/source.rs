//! Source text with a byte-offset → line/column index.

use std::path::{Path, PathBuf};

use crate::{Position, Span};

/// One input program: its path, full text, and a line index.
///
/// The line index is computed once at construction; position lookups are a
/// binary search over line start offsets.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a source file from a path label and its text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0u32];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx as u32 + 1);
            }
        }
        Self {
            path: path.into(),
            text,
            line_starts,
        }
    }

    /// Returns the path this source was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text covered by `span`, clamped to the source length.
    pub fn slice(&self, span: Span) -> &str {
        let start = (span.start as usize).min(self.text.len());
        let end = (span.end as usize).min(self.text.len());
        &self.text[start..end]
    }

    /// Maps a byte offset to a (line, column) position.
    ///
    /// Lines are 1-indexed, columns 0-indexed. Offsets past the end of the
    /// text map to the last line.
    pub fn position(&self, offset: u32) -> Position {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        Position::new(line_idx as u32 + 1, offset - self.line_starts[line_idx])
    }
}
