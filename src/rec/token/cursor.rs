//! Character cursor the scanner reads its input through.
//!
//! [`Cursor`] wraps any character iterator and offers exactly what the
//! scanner needs: the current character, one character of lookahead, and
//! line/column tracking. [`ReadChars`] turns an [`io::Read`](Read) stream
//! into such an iterator.
use core::iter::{Fuse, Peekable};
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::vec;

use tracing::warn;

use crate::rec::types::Location;

/// A cursor over a stream of characters.
///
/// `None` is the end-of-input sentinel: once reached, [`current`](Cursor::current)
/// and [`peek`](Cursor::peek) keep returning it and [`advance`](Cursor::advance)
/// does nothing.
#[derive(Debug)]
pub struct Cursor<I: Iterator<Item = char>> {
    /// Characters after the current one.
    chars: Peekable<Fuse<I>>,
    /// The current character.
    current: Option<char>,
    /// Line of the current character, 1-based.
    line: usize,
    /// Characters consumed on the current line.
    column: usize,
}

impl<I: Iterator<Item = char>> Cursor<I> {
    /// Creates a cursor positioned on the first character of `chars`.
    #[inline]
    pub fn new(chars: I) -> Self {
        let mut chars = chars.fuse().peekable();
        let current = chars.next();
        Cursor {
            chars,
            current,
            line: 1,
            column: 0,
        }
    }

    /// The current character, or `None` at end of input.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Option<char> {
        self.current
    }

    /// The character after the current one, without consuming anything.
    #[inline]
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Position of the current character.
    #[inline]
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "a line with usize::MAX characters does not fit in memory anyway."
    )]
    pub const fn location(&self) -> Location {
        Location {
            line: self.line,
            col: self.column + 1,
        }
    }

    /// Consumes the current character and moves on to the next one.
    #[inline]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "If these ever overflow, you got bigger problems."
    )]
    pub fn advance(&mut self) {
        match self.current {
            None => return,
            Some('\n') => {
                self.line += 1;
                self.column = 0;
            }
            Some(_) => self.column += 1,
        }
        self.current = self.chars.next();
    }

    /// Consumes and returns the current character.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let current = self.current;
        self.advance();
        current
    }

    /// Consumes the current character only if it is exactly `expected`.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        if self.current == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes characters while they match `test`, appending them to `buffer`.
    #[inline]
    pub fn eat_while<F: Fn(char) -> bool>(&mut self, buffer: &mut String, test: F) {
        while let Some(c) = self.current.filter(|c| test(*c)) {
            buffer.push(c);
            self.advance();
        }
    }
}

/// Reads characters out of a byte stream, line by line.
///
/// Reading never fails from the caller's point of view: an I/O error or
/// invalid UTF-8 ends the character stream early, the same way a cleanly
/// finished stream does.
#[derive(Debug)]
pub struct ReadChars<R> {
    /// The underlying stream.
    reader: BufReader<R>,
    /// Buffer the current line is read into.
    line: String,
    /// Characters of the current line not yet handed out.
    pending: vec::IntoIter<char>,
    /// Set once the stream ended or failed.
    exhausted: bool,
}

impl<R: Read> ReadChars<R> {
    /// Wraps `reader`; nothing is read until the first character is requested.
    #[inline]
    pub fn new(reader: R) -> Self {
        ReadChars {
            reader: BufReader::new(reader),
            line: String::new(),
            pending: Vec::new().into_iter(),
            exhausted: false,
        }
    }
}

impl<R: Read> Iterator for ReadChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.pending.next() {
                return Some(c);
            }
            if self.exhausted {
                return None;
            }

            self.line.clear();
            let read = self.reader.read_line(&mut self.line);
            // A failed read keeps whatever valid text it appended before failing.
            self.pending = self.line.chars().collect::<Vec<_>>().into_iter();
            match read {
                Ok(0) => self.exhausted = true,
                Ok(_) => {}
                Err(ref err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(%err, "reading source failed, treating it as end of input");
                    self.exhausted = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::{Error as IOError, Read};

    use super::{Cursor, ReadChars};
    use crate::rec::types::Location;

    #[test]
    fn tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd".chars());
        assert_eq!(cursor.location(), Location { line: 1, col: 1 });
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.current(), Some('\n'));
        assert_eq!(cursor.location(), Location { line: 1, col: 3 });
        cursor.advance();
        assert_eq!(cursor.current(), Some('c'));
        assert_eq!(cursor.location(), Location { line: 2, col: 1 });
    }

    #[test]
    fn peek_does_not_consume() {
        let mut cursor = Cursor::new(".5".chars());
        assert_eq!(cursor.peek(), Some('5'));
        assert_eq!(cursor.peek(), Some('5'));
        assert_eq!(cursor.current(), Some('.'));
    }

    #[test]
    fn end_of_input_is_sticky() {
        let mut cursor = Cursor::new("x".chars());
        assert_eq!(cursor.bump(), Some('x'));
        let end = cursor.location();
        for _ in 0..5 {
            cursor.advance();
            assert_eq!(cursor.current(), None);
            assert_eq!(cursor.peek(), None);
        }
        assert_eq!(cursor.location(), end);
    }

    #[test]
    fn eat_only_consumes_matches() {
        let mut cursor = Cursor::new("==x".chars());
        assert!(cursor.eat('='));
        assert!(cursor.eat('='));
        assert!(!cursor.eat('='));
        assert_eq!(cursor.current(), Some('x'));
    }

    /// Hands out its data once, then fails every read.
    struct FailingReader(Option<&'static [u8]>);

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(data);
                    Ok(data.len())
                }
                None => Err(IOError::other("disk on fire")),
            }
        }
    }

    #[test]
    fn read_chars_spans_lines() {
        let chars: String = ReadChars::new("ab\ncd\n".as_bytes()).collect();
        assert_eq!(chars, "ab\ncd\n");
    }

    #[test]
    fn read_errors_degrade_to_end_of_input() {
        let mut chars = ReadChars::new(FailingReader(Some(&b"ok\nrest"[..])));
        assert_eq!(chars.by_ref().collect::<String>(), "ok\nrest");
        assert_eq!(chars.next(), None);
    }

    #[test]
    fn partial_line_survives_a_failed_read() {
        let chars: String = ReadChars::new(FailingReader(Some(&b"abc def"[..]))).collect();
        assert_eq!(chars, "abc def");
    }

    #[test]
    fn invalid_utf8_degrades_to_end_of_input() {
        let chars: String = ReadChars::new(&b"fine\n\xff\xfe\n"[..]).collect();
        assert_eq!(chars, "fine\n");
    }
}
