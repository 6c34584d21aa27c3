//! Data types representing tokens available in the Rec language,
//! alongside the static word and character tables used to classify them.
use core::fmt::{Display, Formatter};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::rec::types::Span;
use crate::rec::util::set;

/// Lexeme carried by the [`TokenKind::EndOfStream`] token.
pub const END_OF_STREAM_LEXEME: &str = "EOF";

/// Reserved words of the language.
pub static KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set! {
        // Declarations
        "free", "final", "rec", "fun",
        // Control flow
        "for", "while", "if", "else", "return",
    }
});

/// Names of the primitive types.
pub static TYPE_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set! { "int", "float", "bool", "string" }
});

/// The two boolean constants.
pub static BOOLEAN_LITERALS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set! { "true", "false" }
});

/// Predeclared functions. They lex like any other identifier unless the
/// scanner is told to treat them as keywords.
pub static BUILTIN_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set! {
        // Input
        "readInt", "readFloat", "readString",
        // Output
        "writeInt", "writeFloat", "write", "writeln",
        // Others
        "len", "floor", "chr", "not",
    }
});

/// Characters starting a [`TokenKind::Symbol`].
///
/// `.` is missing on purpose: it either starts a float or is a field operator.
pub static OPERATOR_CHARS: LazyLock<HashSet<char>> = LazyLock::new(|| {
    set! {
        // Grouping
        '(', ')', '{', '}', '[', ']',
        // Arith Operators
        '+', '-', '*', '/', '%',
        // Comparison and Boolean Operators
        '=', '<', '>', '!', '&', '|',
        // Separators
        ',', ';',
    }
});

/// The closed set of token classifications.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_enums,
    reason = "a parser has to handle every kind, adding one is a breaking change."
)]
pub enum TokenKind {
    /// A user-chosen name.
    Identifier,
    /// A reserved word, see [`KEYWORDS`].
    Keyword,
    /// A primitive type name, see [`TYPE_NAMES`].
    TypeName,
    /// A capitalized identifier, referring to a declared record type.
    RecordTypeReference,
    /// `true` or `false`.
    BooleanLiteral,
    /// Decimal integer, e.g. `42`.
    IntegerLiteral,
    /// Decimal number with a fractional part, normalized to `d.d`.
    FloatLiteral,
    /// Escape-processed string content, without quotes.
    StringLiteral,
    /// Punctuation and operators, one or two characters.
    Symbol,
    /// `.` accessing a record field.
    FieldOperator,
    /// End of the character stream.
    EndOfStream,
}

impl TokenKind {
    /// Name of the kind as printed in token listings.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::TypeName => "TYPE",
            TokenKind::RecordTypeReference => "REC",
            TokenKind::BooleanLiteral => "BOOLEAN",
            TokenKind::IntegerLiteral => "INTEGER",
            TokenKind::FloatLiteral => "FLOAT",
            TokenKind::StringLiteral => "STRING",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::FieldOperator => "FIELD_OPERATOR",
            TokenKind::EndOfStream => "EOF",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified piece of source text. Tokens are immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Classification of this token.
    kind: TokenKind,
    /// Text of the token, normalized for numbers and escape-processed for strings.
    lexeme: String,
    /// Span the token takes up in source code.
    span: Span,
}

impl Token {
    /// Bundles a kind and its lexeme with a source span.
    #[inline]
    #[must_use]
    pub fn new<L: Into<String>>(kind: TokenKind, lexeme: L, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// The end-of-stream token, located at `span`.
    #[inline]
    #[must_use]
    pub fn end_of_stream(span: Span) -> Self {
        Token::new(TokenKind::EndOfStream, END_OF_STREAM_LEXEME, span)
    }

    /// Classification of this token.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Text of this token.
    #[inline]
    #[must_use]
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Where this token was found.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Whether this token terminates the stream.
    #[inline]
    #[must_use]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfStream)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{},{} @ {}>", self.kind, self.lexeme.escape_debug(), self.span)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rec::types::Location;

    #[test]
    fn word_tables_are_disjoint() {
        let tables = [&*KEYWORDS, &*TYPE_NAMES, &*BOOLEAN_LITERALS, &*BUILTIN_FUNCTIONS];
        for (idx, first) in tables.iter().enumerate() {
            for second in tables.iter().skip(idx + 1) {
                assert!(
                    first.is_disjoint(second),
                    "{first:?} overlaps with {second:?}"
                );
            }
        }
    }

    #[test]
    fn display_escapes_lexeme() {
        let loc = Location { line: 1, col: 1 };
        let token = Token::new(TokenKind::StringLiteral, "a\nb", Span::from(loc, loc));
        assert_eq!(token.to_string(), "<STRING,a\\nb @ 1:1>");
    }

    #[test]
    fn end_of_stream_has_sentinel_lexeme() {
        let loc = Location { line: 4, col: 1 };
        let token = Token::end_of_stream(Span::from(loc, loc));
        assert!(token.is_end_of_stream());
        assert_eq!(token.lexeme(), "EOF");
        assert_eq!(token.kind().name(), "EOF");
    }
}
