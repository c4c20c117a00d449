use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: any of these aborts the run before a file is processed.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("folder does not exist or is not a directory: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid search pattern `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid filename pattern `{pattern}`: {source}")]
    InvalidFilterPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to read one document. Recorded per file, never fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no favorite named `{0}`")]
    UnknownFavorite(String),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
