use thiserror::Error;

use crate::workflow::WorkflowState;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Malformed data URI: {0}")]
    MalformedInput(String),

    #[error("Missing input image: {0}")]
    MissingInput(&'static str),

    #[error("Generation service credential not set (GEMINI_API_KEY or API_KEY)")]
    MissingCredential,

    #[error("AI failed to generate an image. The response may contain safety blocks or an unexpected format")]
    NoImageReturned,

    #[error("Generation service request failed: {0}")]
    Transport(String),

    #[error("Cannot {event} while in {state} state")]
    InvalidTransition {
        state: WorkflowState,
        event: &'static str,
    },

    #[error("Unknown negative constraint: {0}")]
    UnknownConstraint(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<reqwest::Error> for SwapError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SwapError>;
