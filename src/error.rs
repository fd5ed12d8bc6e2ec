use thiserror::Error;

use crate::target::Target;

#[derive(Debug, Error)]
pub enum HuntError {
    /// The picture has not been laid out yet, so no frame can be measured.
    #[error("Image size is not set properly: {0}")]
    Configuration(String),

    /// Region data does not cover a target from the fixed set.
    #[error("Icon not found: no region data for {0}")]
    TargetNotFound(Target),

    /// Any failed call to the region or score source: transport, status or
    /// payload.
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Icon already found: {0}")]
    AlreadyFound(Target),

    #[error("{0}")]
    UserInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HuntError {
    /// Errors that only concern the currently selected target.
    pub fn is_target_related(&self) -> bool {
        matches!(
            self,
            HuntError::TargetNotFound(_) | HuntError::AlreadyFound(_)
        )
    }
}

pub type HuntResult<T> = Result<T, HuntError>;
