//! The plain-text token listing printed by the command line tool.

use crate::rec::token::tokens::Token;

/// Renders a value as one line of a token listing.
pub trait ListingDisplay {
    /// The listing line, without a trailing newline.
    fn listing_line(&self) -> String;
}

impl ListingDisplay for Token {
    fn listing_line(&self) -> String {
        format!("token: {} value: {}", self.kind(), self.lexeme())
    }
}
