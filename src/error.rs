use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubtidalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("\"{}\" is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("could not derive a video identity from \"{0}\"")]
    IdentityParse(String),

    #[error("no subtitle found for \"{0}\"")]
    SubtitleNotFound(String),

    #[error("expected subtitle file \"{}\" is missing, cannot rename", .0.display())]
    RenameMissing(PathBuf),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SubtidalError {
    /// Whether this failure aborts the whole run, as opposed to
    /// skipping the candidate it occurred on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SubtidalError::InvalidDirectory(_))
    }
}

pub type Result<T> = std::result::Result<T, SubtidalError>;
