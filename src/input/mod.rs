use std::path::Path;

pub mod metadata;
pub mod scores;

pub use metadata::{MetadataField, RunMetadata, load_metadata};
pub use scores::{ScoreRecord, load_scores};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl InputError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub fn validate_username(username: &str) -> Result<&str, InputError> {
    if username.is_empty() {
        return Err(InputError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }
    Ok(username)
}
