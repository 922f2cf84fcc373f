//! Parser error types.

use thiserror::Error;

/// Errors that can occur while reading or parsing a source program.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A character no token starts with.
    #[error("unexpected character at offset {offset}")]
    UnexpectedChar { offset: u32 },

    /// A token that does not fit the grammar at this point.
    #[error("expected {expected}, found `{found}` at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: u32,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    /// A regex literal without a closing `/`.
    #[error("unterminated regular expression literal at offset {offset}")]
    UnterminatedRegex { offset: u32 },

    /// A numeric literal the lexer accepted but `f64` parsing rejected.
    #[error("invalid numeric literal `{raw}` at offset {offset}")]
    InvalidNumber { raw: String, offset: u32 },
}

impl ParseError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
