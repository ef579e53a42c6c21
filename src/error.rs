use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("service answered {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid backend url {0:?}")]
    InvalidBaseUrl(String),
}

/// Form input that cannot be submitted. Shown next to the form only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Exercise name is required")]
    MissingTitle,
    #[error("{field} must be a positive whole number, got {value:?}")]
    InvalidCount { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// The only text a failed operation ever puts in front of the user.
    pub fn user_message(self) -> &'static str {
        match self {
            Operation::Load => "Could not load workouts",
            Operation::Create => "Could not add workout",
            Operation::Update => "Update failed",
            Operation::Delete => "Delete failed",
        }
    }
}
