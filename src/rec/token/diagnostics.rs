//! Lexical errors and the side channel they are reported through.
//!
//! None of these errors stop the scanner. It hands each one to a
//! [`DiagnosticSink`] and carries on with the next token.
use std::io::{self, Stderr, Write};

use thiserror::Error;
use tracing::warn;

use crate::rec::types::Location;

/// Errors that can happen during lexing.
///
/// All of them render as a single line of the form
/// `Error for Lexer at line L, column C, unexpected char: X`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[expect(
    clippy::exhaustive_enums,
    reason = "sinks may want to match on every kind, adding one is a breaking change."
)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error(
        "Error for Lexer at line {}, column {}, unexpected char: {found}",
        .location.line,
        .location.col
    )]
    UnrecognizedCharacter {
        /// Position of the character.
        location: Location,
        /// The character itself.
        found: char,
    },
    /// A `.` entered as a number without a digit following it.
    #[error(
        "Error for Lexer at line {}, column {}, unexpected char: .",
        .location.line,
        .location.col
    )]
    MalformedNumber {
        /// Position of the `.`.
        location: Location,
    },
    /// A string was started but not terminated until the end of input.
    #[error(
        "Error for Lexer at line {}, column {}, unexpected char: \"",
        .location.line,
        .location.col
    )]
    UnterminatedString {
        /// Position of the opening quote.
        location: Location,
    },
}

impl LexError {
    /// Where the error was found.
    #[inline]
    #[must_use]
    pub const fn location(&self) -> Location {
        match *self {
            LexError::UnrecognizedCharacter { location, .. }
            | LexError::MalformedNumber { location }
            | LexError::UnterminatedString { location } => location,
        }
    }

    /// The character the error is about.
    #[inline]
    #[must_use]
    pub const fn character(&self) -> char {
        match *self {
            LexError::UnrecognizedCharacter { found, .. } => found,
            LexError::MalformedNumber { .. } => '.',
            LexError::UnterminatedString { .. } => '"',
        }
    }
}

/// Receiver of lexical errors.
pub trait DiagnosticSink {
    /// Takes note of one error. Must not fail.
    fn report(&mut self, error: LexError);
}

/// Collects every error, in order.
impl DiagnosticSink for Vec<LexError> {
    fn report(&mut self, error: LexError) {
        self.push(error);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, error: LexError) {
        (**self).report(error);
    }
}

/// Writes one line per error and counts them.
#[derive(Debug)]
pub struct WriteSink<W> {
    /// Destination of the error lines.
    writer: W,
    /// Number of errors reported so far.
    reported: usize,
}

/// The sink used by the command line: errors go to standard error.
pub type StderrSink = WriteSink<Stderr>;

impl StderrSink {
    /// Creates a sink writing to standard error.
    #[inline]
    #[must_use]
    pub fn stderr() -> Self {
        WriteSink::new(io::stderr())
    }
}

impl<W: Write> WriteSink<W> {
    /// Creates a sink writing to `writer`.
    #[inline]
    pub const fn new(writer: W) -> Self {
        WriteSink { writer, reported: 0 }
    }

    /// Number of errors reported so far.
    #[inline]
    #[must_use]
    pub const fn reported(&self) -> usize {
        self.reported
    }
}

impl<W: Write> DiagnosticSink for WriteSink<W> {
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "one error per input character at most, so this cannot overflow."
    )]
    fn report(&mut self, error: LexError) {
        self.reported += 1;
        if let Err(err) = writeln!(self.writer, "{error}") {
            warn!(%err, "could not write lexer diagnostic");
        }
    }
}
