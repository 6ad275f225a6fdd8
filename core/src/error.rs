//! Error taxonomy shared by the lexer, the parser states, and the writer.
//!
//! Mirrors the kinds from the design's error taxonomy: every variant carries
//! a byte offset into the overall input.

extern crate alloc;

use alloc::string::String;

/// Convenient alias for results across the codec.
pub type Result<T> = core::result::Result<T, Error>;

/// The kind of failure, independent of where in the input it occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Syntactic mismatch against the JSON grammar.
    UnexpectedToken,
    /// Input ended while a value was still in progress.
    UnexpectedEndOfInput,
    /// A `\u` escape was malformed, or a surrogate was left unpaired.
    MalformedEscape,
    /// A well-formed JSON value does not match the target shape.
    TypeMismatch {
        /// What the shape expected, for the error message.
        expected: &'static str,
    },
    /// A numeric literal does not fit the target scalar kind.
    NumberOutOfRange,
    /// The writer was asked to emit `NaN` or `+-inf`.
    NonFiniteNumber,
    /// An object had the same key twice under a strict-duplicates plan.
    DuplicateField,
    /// An object had a key the shape does not declare, under a strict plan.
    UnknownField,
    /// A shape contains a construct the plan builder cannot compile.
    PlanBuildFailure(String),
    /// The underlying reader or sink failed.
    Io,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::UnexpectedToken => write!(f, "unexpected token"),
            ErrorKind::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            ErrorKind::MalformedEscape => write!(f, "malformed escape sequence"),
            ErrorKind::TypeMismatch { expected } => write!(f, "expected {expected}"),
            ErrorKind::NumberOutOfRange => write!(f, "number out of range"),
            ErrorKind::NonFiniteNumber => write!(f, "NaN/infinite number has no JSON representation"),
            ErrorKind::DuplicateField => write!(f, "duplicate field"),
            ErrorKind::UnknownField => write!(f, "unknown field"),
            ErrorKind::PlanBuildFailure(reason) => write!(f, "cannot build plan: {reason}"),
            ErrorKind::Io => write!(f, "i/o error"),
        }
    }
}

/// A codec error: a kind and the byte offset it occurred at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset into the overall input (across chunk boundaries).
    pub offset: usize,
}

impl Error {
    /// Builds an error at the given offset.
    #[must_use]
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Error { kind, offset }
    }

    /// Returns a copy of this error with its offset replaced. Used by
    /// callers that only learn the precise token-start offset after an
    /// inner conversion has already failed with a placeholder offset.
    #[must_use]
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}
