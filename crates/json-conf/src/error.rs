use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("No file found at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Only types Array and String can be appended to (location `{location}`).")]
    InvalidAppend { location: String },

    #[error("A listener needs a location suffix to match against.")]
    MissingMatcher,

    #[error("Descendant lookup needs a key to match against.")]
    MissingDescendantMatcher,

    #[error("{0}")]
    Listener(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfError {
    /// Wraps a failure reported by a listener callback.
    pub fn listener(msg: impl Into<String>) -> Self {
        ConfError::Listener(msg.into())
    }
}

pub type Result<T, E = ConfError> = std::result::Result<T, E>;
