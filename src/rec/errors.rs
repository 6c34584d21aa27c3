//! Errors that can occur during the lifetime of the tool.
use std::io::Error as IOError;
use std::process::ExitCode;

use thiserror::Error;

/// An error that occurred inside the Rec engine.
///
/// To support the [`std::process::Termination`] trait such that we can use
/// exit codes as specified by the
/// [`<sysexits.h>`](https://man.freebsd.org/cgi/man.cgi?query=sysexits&apropos=0&sektion=0&manpath=FreeBSD+4.3-RELEASE&format=html)
/// header, a `From<EngineError> for ExitCode` implementation is provided.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// An error in how the tool is called, carrying the program name.
    #[error("Usage: {0} [-lexer] <source_file>")]
    UsageError(String),
    /// Errors that happened when trying to load the file.
    #[error("Error reading source file: {0}")]
    FileError(#[from] IOError),
    /// Lexing finished, but reported this many errors along the way.
    #[error("Lexing reported {0} error(s)")]
    LexingErrors(usize),
}

impl From<EngineError> for ExitCode {
    fn from(value: EngineError) -> Self {
        ExitCode::from(match value {
            EngineError::UsageError(_) => 64, // EX_USAGE
            // Technically, 66 only specifies missing or unreadable files
            // any other errors during I/O should be presented as 74, EX_IOERR
            EngineError::FileError(_) => 66,    // EX_NOINPUT
            EngineError::LexingErrors(_) => 65, // EX_DATAERR
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::{Error as IOError, ErrorKind};

    use super::EngineError;

    #[test]
    fn usage_is_a_single_line() {
        let message = EngineError::UsageError("rust-rec".to_owned()).to_string();
        assert_eq!(message, "Usage: rust-rec [-lexer] <source_file>");
        assert!(!message.contains('\n'));
    }

    #[test]
    fn io_errors_convert() {
        let err: EngineError = IOError::new(ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, EngineError::FileError(_)));
        assert_eq!(err.to_string(), "Error reading source file: gone");
    }
}
