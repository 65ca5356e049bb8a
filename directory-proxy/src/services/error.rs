use thiserror::Error;

/// Failure of a single call to the directory service.
///
/// Transport failures, HTTP-level failures and business status codes are kept
/// apart so callers can report them distinctly.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Connection, timeout or I/O failure before a response was read.
    #[error("network error: {0}")]
    Transport(String),

    #[error("directory service responded with HTTP {0}")]
    HttpStatus(u16),

    #[error("unreadable directory response: {0}")]
    Decode(String),

    #[error("directory response carries no errcode")]
    MissingStatus,

    /// Non-zero `errcode` in an otherwise well-formed response.
    #[error("code: {code}, {message}")]
    Api { code: i64, message: String },

    /// `errcode` was 0 but the payload field is absent.
    #[error("directory response has no `{0}` field")]
    MissingField(&'static str),
}

impl DirectoryError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryError::Transport(_) => "transport",
            DirectoryError::HttpStatus(_) => "http_status",
            DirectoryError::Decode(_) => "decode",
            DirectoryError::MissingStatus => "missing_status",
            DirectoryError::Api { .. } => "api",
            DirectoryError::MissingField(_) => "missing_field",
        }
    }
}
