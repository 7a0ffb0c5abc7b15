//! Error types for decoding and the serde bridge.
//!
//! Decoding reports the failure kind and, where one exists, the
//! 1-based line number of the offending input line. Encoding has no
//! error path: every normalized value encodes.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, DecodeOptions, Error};
//!
//! let strict = DecodeOptions::new().with_strict(true);
//! let err = decode("[3]: 1, 2", &strict).unwrap_err();
//! assert!(matches!(err, Error::CountMismatch { .. }));
//! assert_eq!(err.line_number(), Some(1));
//! ```

use std::fmt;
use thiserror::Error;

/// All failures the decoder and the serde bridge can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Tab in leading whitespace, or a leading-space count that is
    /// not a multiple of the configured indent (strict mode).
    #[error("indentation error at line {line}: {msg}")]
    Indentation { line: usize, msg: String },

    /// An array header that failed to parse once the line was
    /// committed to being one.
    #[error("invalid array header at line {line}: {msg}")]
    InvalidHeader { line: usize, msg: String },

    /// Element, row, or field count disagrees with the declared
    /// count (strict mode).
    #[error("count mismatch at line {line}: expected {expected}, found {actual}")]
    CountMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// Unknown escape sequence or a trailing backslash inside a
    /// quoted string.
    #[error("invalid escape at line {line}: {msg}")]
    InvalidEscape { line: usize, msg: String },

    /// Blank line between the elements of an array body (strict
    /// mode).
    #[error("blank line inside array at line {line}")]
    BlankInsideArray { line: usize },

    /// Dotted-key expansion hit a leaf/branch or duplicate-leaf
    /// conflict (strict mode).
    #[error("path conflict at {path:?}: {msg}")]
    PathConflict { path: String, msg: String },

    /// Residual structural errors: missing colon, unterminated
    /// quote, stray indentation.
    #[error("syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    /// Message produced through the serde `ser`/`de` error traits.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn indentation(line: usize, msg: impl Into<String>) -> Self {
        Error::Indentation {
            line,
            msg: msg.into(),
        }
    }

    pub(crate) fn invalid_header(line: usize, msg: impl Into<String>) -> Self {
        Error::InvalidHeader {
            line,
            msg: msg.into(),
        }
    }

    pub(crate) fn count_mismatch(line: usize, expected: usize, actual: usize) -> Self {
        Error::CountMismatch {
            line,
            expected,
            actual,
        }
    }

    pub(crate) fn invalid_escape(line: usize, msg: impl Into<String>) -> Self {
        Error::InvalidEscape {
            line,
            msg: msg.into(),
        }
    }

    pub(crate) fn blank_inside_array(line: usize) -> Self {
        Error::BlankInsideArray { line }
    }

    pub(crate) fn path_conflict(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::PathConflict {
            path: path.into(),
            msg: msg.into(),
        }
    }

    pub(crate) fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            msg: msg.into(),
        }
    }

    /// The 1-based input line the error refers to, when one exists.
    /// Path conflicts and serde messages carry none.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Error::Indentation { line, .. }
            | Error::InvalidHeader { line, .. }
            | Error::CountMismatch { line, .. }
            | Error::InvalidEscape { line, .. }
            | Error::BlankInsideArray { line }
            | Error::Syntax { line, .. } => Some(*line),
            Error::PathConflict { .. } | Error::Message(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
