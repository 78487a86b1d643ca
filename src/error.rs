//! Errors of a parse call.

use thiserror::Error;

/// Error terminating a parse call. No partial document is produced.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input ends before the title line.
    #[error("unexpected EOF; expected title")]
    UnexpectedEof,

    /// A free text header line after the subtitle is already set.
    #[error("unexpected header line: {0:?}")]
    UnexpectedHeaderLine(String),

    /// Directive name is not registered in the directive table.
    #[error("{file}:{line}: unknown directive {name:?}")]
    UnknownDirective {
        file: String,
        line: usize,
        name: String,
    },

    /// Error raised by a directive parser.
    #[error("{file}:{line}: {source}")]
    Directive {
        file: String,
        line: usize,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ParseError {
    /// Document name and 1-based line number of located errors.
    pub fn location(&self) -> Option<(&str, usize)> {
        match self {
            ParseError::UnknownDirective { file, line, .. }
            | ParseError::Directive { file, line, .. } => Some((file.as_str(), *line)),
            _ => None,
        }
    }
}
