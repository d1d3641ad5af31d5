//! Client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    asset::{DataUriParts, ImageAsset},
    config::SwapConfig,
    error::{Result, SwapError},
};

use super::{GenerationClient, GenerationRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<ResponseContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Scan response parts in order and return the first one carrying image data.
pub fn first_inline_image(response: &GenerateContentResponse) -> Option<ImageAsset> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
        .map(|inline| ImageAsset::from_parts(&inline.mime_type, &inline.data))
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client; fails fast when the configuration has no credential.
    pub fn new(config: &SwapConfig) -> Result<Self> {
        let api_key = config.require_credential()?.to_string();
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn request_body<'a>(request: &'a GenerationRequest) -> GenerateContentRequest<'a> {
        let mut parts = Vec::with_capacity(request.images.len() + 1);
        parts.push(RequestPart::Text {
            text: &request.instruction,
        });
        parts.extend(request.images.iter().map(|DataUriParts { mime_type, payload }| {
            RequestPart::Image {
                inline_data: InlineData {
                    mime_type: mime_type.clone(),
                    data: payload.clone(),
                },
            }
        }));

        GenerateContentRequest {
            contents: vec![RequestContent { parts }],
            generation_config: GenerationConfig {
                response_modalities: ["IMAGE", "TEXT"],
            },
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<ImageAsset> {
        debug_assert!(!self.api_key.is_empty());

        info!(
            "Requesting image from {} ({} input images)",
            self.model,
            request.images.len()
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwapError::Transport(format!("HTTP {}: {}", status, body)));
        }

        let body: GenerateContentResponse = response.json().await?;
        debug!("Received {} candidates", body.candidates.len());

        match first_inline_image(&body) {
            Some(image) => Ok(image),
            None => {
                let block_reason = body
                    .prompt_feedback
                    .as_ref()
                    .and_then(|feedback| feedback.block_reason.as_deref());
                let finish_reason = body
                    .candidates
                    .first()
                    .and_then(|candidate| candidate.finish_reason.as_deref());
                warn!(
                    "No image in response (block reason: {:?}, finish reason: {:?})",
                    block_reason, finish_reason
                );
                Err(SwapError::NoImageReturned)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
