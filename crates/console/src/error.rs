use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

/// Failures of the shell itself, as opposed to record operation errors,
/// which are reported to the user and never abort the session.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("invalid attribute dictionary: {0}")]
    InvalidDictionary(String),

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    pub fn unknown_syntax(line: impl Into<String>) -> Self {
        Self::UnknownSyntax(line.into())
    }
}
