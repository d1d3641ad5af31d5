//! # Jersey Swap
//!
//! Orchestrates jersey replacement and background compositing on player
//! photos, delegating all pixel work to a multimodal image generation
//! service.
//!
//! ## Core Features
//!
//! - **Data URI codec**: images travel as `data:<mime>;base64,<payload>` strings
//! - **Prompt builder**: deterministic instructions for each operation
//! - **Generation client**: trait-based backend, with a Gemini implementation
//! - **Workflow**: a single `Session` aggregate driven through
//!   `Upload -> Processing -> Preview | Error`, with `reset` always available
//! - **MCP server**: the workflow exposed as tools
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use jersey_swap::{GeminiClient, ImageAsset, SwapConfig, Workflow};
//!
//! # async fn run() -> jersey_swap::Result<()> {
//! let config = SwapConfig::from_env()?;
//! let mut workflow = Workflow::new(Arc::new(GeminiClient::new(&config)?));
//!
//! workflow.session_mut().set_player_image(ImageAsset::from_data_uri("data:image/png;base64,..."))?;
//! workflow.session_mut().set_jersey_image(ImageAsset::from_data_uri("data:image/png;base64,..."))?;
//!
//! let result = workflow.perform_jersey_swap().await?;
//! std::fs::write("jersey-swap-result.png", result.decode_bytes()?)?;
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod config;
pub mod error;
pub mod generation;
pub mod mcp;
pub mod prompt;
pub mod types;
pub mod workflow;

pub use asset::{DataUriParts, ImageAsset};
pub use config::SwapConfig;
pub use error::{Result, SwapError};
pub use generation::{GeminiClient, GenerationClient, GenerationRequest};
pub use prompt::PromptOperation;
pub use types::{JerseyType, NegativeConstraint, NegativeConstraintSet};
pub use workflow::{
    Completion, PendingGeneration, ProcessingStatus, Session, SessionSnapshot, Workflow,
    WorkflowState,
};
