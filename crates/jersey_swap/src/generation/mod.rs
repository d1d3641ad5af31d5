pub mod gemini;

use async_trait::async_trait;

use crate::{
    asset::{DataUriParts, ImageAsset},
    error::Result,
};

pub use gemini::GeminiClient;

/// One instruction plus the images it refers to, in the order the
/// instruction names them.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub images: Vec<DataUriParts>,
}

impl GenerationRequest {
    /// Build a request from assets, running each through the data URI codec.
    /// A malformed asset aborts before anything is sent.
    pub fn new(instruction: String, images: &[&ImageAsset]) -> Result<Self> {
        let images = images
            .iter()
            .map(|asset| asset.parts())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { instruction, images })
    }
}

/// A multimodal image generation backend.
///
/// Implementations issue exactly one call per `generate`, without retries,
/// and return the first image the service produced.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<ImageAsset>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
