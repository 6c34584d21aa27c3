//! This is the Lexing or Tokenization module, split into four submodules.
//!
//! - [cursor] walks over the input characters and keeps track of lines and columns.
//! - [tokens] specifies the data types making up the tokens of the Rec language,
//!   as well as the word and symbol tables used to classify them.
//! - [diagnostics] defines the errors that can occur during this phase and the
//!   sinks they are reported to.
//! - [lexer] contains the code for tokenizing source code.
pub mod cursor;
pub mod diagnostics;
pub mod lexer;
pub mod tokens;
