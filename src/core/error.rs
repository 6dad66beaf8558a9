use std::fmt;

/// Comprehensive error types for topicsup operations
#[derive(Debug)]
pub enum TopicsUpError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Topic record parsing error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for TopicsUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicsUpError::Io(err) => write!(f, "IO error: {err}"),
            TopicsUpError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TopicsUpError::Http(err) => write!(f, "HTTP error: {err}"),
            TopicsUpError::Json(err) => write!(f, "Record parsing error: {err}"),
            TopicsUpError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            TopicsUpError::FileNotFound(path) => write!(f, "File not found: {path}"),
            TopicsUpError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for TopicsUpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TopicsUpError::Io(err) => Some(err),
            TopicsUpError::Http(err) => Some(err),
            TopicsUpError::Json(err) => Some(err),
            TopicsUpError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TopicsUpError {
    fn from(err: std::io::Error) -> Self {
        TopicsUpError::Io(err)
    }
}

impl From<reqwest::Error> for TopicsUpError {
    fn from(err: reqwest::Error) -> Self {
        TopicsUpError::Http(err)
    }
}

impl From<serde_json::Error> for TopicsUpError {
    fn from(err: serde_json::Error) -> Self {
        TopicsUpError::Json(err)
    }
}

impl From<toml::de::Error> for TopicsUpError {
    fn from(err: toml::de::Error) -> Self {
        TopicsUpError::TomlParsing(err)
    }
}

/// Type alias for Results using TopicsUpError
pub type Result<T> = std::result::Result<T, TopicsUpError>;
