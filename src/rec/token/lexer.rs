//! Encapsulates all behaviour necessary to properly lex Rec code.
//!
//! Lexing is pull-based: a [Scanner] hands out one [Token] per call to
//! [`next_token`](Scanner::next_token) and never fails. Characters that do
//! not fit anywhere, as well as strings missing their closing quote, are
//! reported to the scanner's [`DiagnosticSink`] and then skipped over, so
//! the token stream stays usable after an error.
//!
//! ```rust,ignore
//! let source = r#"
//!     final Point origin = Point(0, .5);
//!     $ comments run until the end of the line
//!     writeln(origin.x);
//! "#;
//! let mut errors = Vec::new();
//! let tokens: Vec<Token> = Scanner::new(source.chars(), &mut errors).collect();
//! ```
#![allow(
    clippy::min_ident_chars,
    reason = "short names do not decrease readability here."
)]

use core::iter::FusedIterator;
use std::io::Read;

use tracing::{debug, trace};

use crate::rec::token::cursor::{Cursor, ReadChars};
use crate::rec::token::diagnostics::{DiagnosticSink, LexError};
use crate::rec::token::tokens::{
    BOOLEAN_LITERALS, BUILTIN_FUNCTIONS, KEYWORDS, OPERATOR_CHARS, TYPE_NAMES, Token, TokenKind,
};
use crate::rec::types::{Location, Span};

/// Starts a comment that runs until the end of the line.
pub const COMMENT_MARKER: char = '$';

/// Knobs changing how words are classified.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScannerConfig {
    /// Lex built-in function names as [`TokenKind::Keyword`] instead of
    /// [`TokenKind::Identifier`].
    pub builtins_as_keywords: bool,
}

impl ScannerConfig {
    /// Sets [`builtins_as_keywords`](ScannerConfig::builtins_as_keywords).
    #[inline]
    #[must_use]
    pub const fn builtins_as_keywords(mut self, enabled: bool) -> Self {
        self.builtins_as_keywords = enabled;
        self
    }
}

/// Turns a stream of characters into [`Tokens`](Token).
///
/// Once the input is exhausted, every further call to
/// [`next_token`](Scanner::next_token) returns the end-of-stream token again
/// without touching the sink.
#[derive(Debug)]
pub struct Scanner<I: Iterator<Item = char>, S> {
    /// Position in the input.
    cursor: Cursor<I>,
    /// Receiver of every lexical error.
    sink: S,
    /// How to classify words.
    config: ScannerConfig,
}

impl<I: Iterator<Item = char>, S: DiagnosticSink> Scanner<I, S> {
    /// Creates a scanner over `chars`, reporting errors to `sink`.
    #[inline]
    pub fn new(chars: I, sink: S) -> Self {
        Scanner {
            cursor: Cursor::new(chars),
            sink,
            config: ScannerConfig::default(),
        }
    }

    /// Replaces the default configuration.
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        debug!(?config, "configuring scanner");
        self.config = config;
        self
    }

    /// The sink errors are reported to.
    #[inline]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Lexes the next token, advancing the input as far as needed.
    ///
    /// Whitespace and comments are skipped. Unrecognized characters are
    /// reported and dropped, and lexing resumes right after them.
    #[inline]
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let start = self.cursor.location();
            let Some(c) = self.cursor.current() else {
                return Token::end_of_stream(Span::from(start, start));
            };
            let next = self.cursor.peek();

            let token = match c {
                COMMENT_MARKER => {
                    self.skip_comment();
                    continue;
                }

                // Identifiers and Keywords
                c if is_word_start(c) => self.scan_word(start),

                // Numbers, a dot only counts if a digit follows
                c if is_digit(c) || (c == '.' && next.is_some_and(is_digit)) => {
                    match self.scan_number(start) {
                        Ok(token) => token,
                        // Only reachable if the lookahead above is loosened.
                        Err(err) => {
                            self.report(err);
                            self.cursor.advance();
                            continue;
                        }
                    }
                }
                '.' => {
                    self.cursor.advance();
                    self.emit(TokenKind::FieldOperator, String::from('.'), start)
                }

                '"' => self.scan_string(start),

                c if OPERATOR_CHARS.contains(&c) => self.scan_operator(c, start),

                // ERROR
                found => {
                    self.report(LexError::UnrecognizedCharacter {
                        location: start,
                        found,
                    });
                    self.cursor.advance();
                    continue;
                }
            };
            break token;
        }
    }

    /// Skips all whitespace, newlines included.
    fn skip_whitespace(&mut self) {
        while self.cursor.current().is_some_and(char::is_whitespace) {
            self.cursor.advance();
        }
    }

    /// Skips from the comment marker up to, not including, the end of the line.
    fn skip_comment(&mut self) {
        while self.cursor.current().is_some_and(|c| c != '\n') {
            self.cursor.advance();
        }
    }

    /// Lexes a word and classifies it.
    fn scan_word(&mut self, start: Location) -> Token {
        let mut word = String::new();
        self.cursor.eat_while(&mut word, is_word_continue);
        let kind = self.classify_word(&word);
        self.emit(kind, word, start)
    }

    /// Decides which kind of token a word is. The tables are disjoint, so
    /// the order only matters for the capitalization fallback.
    fn classify_word(&self, word: &str) -> TokenKind {
        if KEYWORDS.contains(word) {
            TokenKind::Keyword
        } else if TYPE_NAMES.contains(word) {
            TokenKind::TypeName
        } else if BOOLEAN_LITERALS.contains(word) {
            TokenKind::BooleanLiteral
        } else if BUILTIN_FUNCTIONS.contains(word) {
            if self.config.builtins_as_keywords {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            }
        } else if word.chars().next().is_some_and(char::is_uppercase) {
            TokenKind::RecordTypeReference
        } else {
            TokenKind::Identifier
        }
    }

    /// Lexes an integer or float, normalizing `.5` to `0.5` and `5.` to `5.0`.
    ///
    /// At most one `.` becomes part of the number; a second one is left for
    /// the next token.
    fn scan_number(&mut self, start: Location) -> Result<Token, LexError> {
        let mut number = String::new();
        if self.cursor.current() == Some('.') {
            if !self.cursor.peek().is_some_and(is_digit) {
                return Err(LexError::MalformedNumber { location: start });
            }
            number.push('0');
        }

        self.cursor.eat_while(&mut number, is_digit);
        if !self.cursor.eat('.') {
            return Ok(self.emit(TokenKind::IntegerLiteral, number, start));
        }

        number.push('.');
        self.cursor.eat_while(&mut number, is_digit);
        if number.ends_with('.') {
            number.push('0');
        }
        Ok(self.emit(TokenKind::FloatLiteral, number, start))
    }

    /// Lexes a string literal, processing escapes.
    ///
    /// A missing closing quote is reported, and whatever was read up to the
    /// end of input still becomes the literal.
    fn scan_string(&mut self, start: Location) -> Token {
        self.cursor.advance(); // opening quote
        let mut content = String::new();
        loop {
            match self.cursor.bump() {
                Some('"') => return self.emit(TokenKind::StringLiteral, content, start),
                Some('\\') => match self.cursor.bump() {
                    Some('n') => content.push('\n'),
                    // `\\`, `\"` and everything else stand for themselves
                    Some(escaped) => content.push(escaped),
                    None => break,
                },
                Some(c) => content.push(c),
                None => break,
            }
        }

        self.report(LexError::UnterminatedString { location: start });
        self.emit(TokenKind::StringLiteral, content, start)
    }

    /// Lexes a one or two character symbol starting with `first`.
    fn scan_operator(&mut self, first: char, start: Location) -> Token {
        self.cursor.advance();
        let mut symbol = String::from(first);

        let second = match first {
            '=' | '!' | '<' | '>' => Some('='),
            '&' | '|' => Some(first),
            _ => None,
        };
        if let Some(second) = second {
            if self.cursor.eat(second) {
                symbol.push(second);
            }
        }

        self.emit(TokenKind::Symbol, symbol, start)
    }

    /// Builds a token spanning from `start` to the current position.
    fn emit(&self, kind: TokenKind, lexeme: String, start: Location) -> Token {
        let token = Token::new(kind, lexeme, Span::from(start, self.cursor.location()));
        trace!(kind = %token.kind(), lexeme = token.lexeme(), span = %token.span(), "token");
        token
    }

    /// Hands an error to the sink.
    fn report(&mut self, error: LexError) {
        debug!(location = %error.location(), found = %error.character(), "lexical error");
        self.sink.report(error);
    }
}

#[expect(
    clippy::multiple_inherent_impl,
    reason = "reading from a stream needs a concrete character source."
)]
impl<R: Read, S: DiagnosticSink> Scanner<ReadChars<R>, S> {
    /// Creates a scanner reading from a byte stream.
    ///
    /// Read errors end the input early, they are not reported to `sink`.
    #[inline]
    pub fn from_reader(reader: R, sink: S) -> Self {
        Scanner::new(ReadChars::new(reader), sink)
    }
}

/// Yields every token up to, but not including, the end-of-stream token.
impl<I: Iterator<Item = char>, S: DiagnosticSink> Iterator for Scanner<I, S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_end_of_stream()).then_some(token)
    }
}

impl<I: Iterator<Item = char>, S: DiagnosticSink> FusedIterator for Scanner<I, S> {}

/// Is the character an ASCII digit?
#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Can the character start a word?
#[inline]
fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || (c == '_')
}

/// Can the character continue a word?
#[inline]
fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || (c == '_')
}
