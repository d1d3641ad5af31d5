use crate::{
    asset::ImageAsset,
    config::SwapConfig,
    error::SwapError,
    generation::{GeminiClient, GenerationClient},
    prompt::PromptOperation,
    types::{JerseyType, NegativeConstraint},
    workflow::{Completion, PendingGeneration, ProcessingStatus, Session},
};
use rmcp::{
    handler::server::tool::IntoCallToolResult, model::{CallToolResult, Content, ServerCapabilities, ServerInfo}, schemars, tool, Error as McpError, ServerHandler
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Request carrying an image as a data URI
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UploadImageRequest {
    #[schemars(description = "Image as a data URI: data:<mime>;base64,<payload>")]
    pub data_uri: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct JerseyTypeRequest {
    #[schemars(description = "Either 'custom' (Custom Design) or 'official' (Official Jersey)")]
    pub jersey_type: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConstraintRequest {
    #[schemars(
        description = "One of: rectangular patch, pasted image, incorrect logos, blurry, unrealistic lighting, flat texture, wrong colors, cartoonish"
    )]
    pub constraint: String,
}

/// Outcome of a tool call plus the session it left behind
#[derive(Debug, Serialize, schemars::JsonSchema, TS)]
#[ts(export)]
pub struct SessionResponse {
    #[schemars(description = "Whether the requested action took effect")]
    pub ok: bool,
    #[schemars(description = "User-facing message")]
    pub message: String,
    #[schemars(description = "Session state without image payloads")]
    pub session: serde_json::Value,
}

impl SessionResponse {
    fn success(session: &Session, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            session: serde_json::to_value(session.snapshot()).unwrap_or_default(),
        }
    }

    /// Prefer the session's user-safe message over the raw error.
    fn failure(session: &Session, error: &SwapError) -> Self {
        let message = match error {
            SwapError::MissingInput(_)
            | SwapError::MalformedInput(_)
            | SwapError::MissingCredential
            | SwapError::NoImageReturned
            | SwapError::Transport(_) => session
                .last_error()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            _ => error.to_string(),
        };
        Self {
            ok: false,
            message,
            session: serde_json::to_value(session.snapshot()).unwrap_or_default(),
        }
    }
}

impl IntoCallToolResult for SessionResponse {
    fn into_call_tool_result(self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&self).unwrap_or_else(|_| format!("{:?}", self)),
        )]))
    }
}

/// MCP Server driving one jersey swap session
#[derive(Clone)]
pub struct JerseySwapMcpServer {
    session: Arc<Mutex<Session>>,
    client: Arc<dyn GenerationClient>,
    status: ProcessingStatus,
}

impl JerseySwapMcpServer {
    pub fn new(client: Arc<dyn GenerationClient>, status: ProcessingStatus) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            client,
            status,
        }
    }

    /// Server backed by the Gemini client; fails fast without a credential.
    pub fn from_config(config: &SwapConfig) -> crate::Result<Self> {
        let client = GeminiClient::new(config)?;
        Ok(Self::new(Arc::new(client), ProcessingStatus::new(config.status_interval())))
    }

    async fn update<F>(&self, message: &str, action: F) -> SessionResponse
    where
        F: FnOnce(&mut Session) -> crate::Result<()>,
    {
        let mut session = self.session.lock().await;
        match action(&mut *session) {
            Ok(()) => SessionResponse::success(&session, message),
            Err(e) => SessionResponse::failure(&session, &e),
        }
    }

    /// Send a pending request without holding the session lock, so `reset`
    /// stays available while the call runs.
    async fn generate(&self, pending: crate::Result<PendingGeneration>, done: &str) -> SessionResponse {
        let PendingGeneration { ticket, request } = match pending {
            Ok(pending) => pending,
            Err(e) => {
                let session = self.session.lock().await;
                return SessionResponse::failure(&session, &e);
            }
        };

        let outcome = self
            .status
            .while_processing(self.client.generate(request), |message| {
                tracing::info!("{}", message)
            })
            .await;

        let mut session = self.session.lock().await;
        match session.complete(ticket, outcome) {
            Ok(Completion::Applied) => SessionResponse::success(&session, done),
            Ok(Completion::Discarded) => SessionResponse {
                ok: false,
                message: "The session was reset before the result arrived; the result was discarded.".to_string(),
                session: serde_json::to_value(session.snapshot()).unwrap_or_default(),
            },
            Err(e) => SessionResponse::failure(&session, &e),
        }
    }
}

#[tool(tool_box)]
impl JerseySwapMcpServer {
    #[tool(description = "Upload the photo of the player whose jersey will be replaced")]
    async fn upload_player_image(&self, #[tool(aggr)] UploadImageRequest { data_uri }: UploadImageRequest) -> SessionResponse {
        self.update("Player photo uploaded", |session| {
            session.set_player_image(ImageAsset::from_data_uri(data_uri))
        })
        .await
    }

    #[tool(description = "Upload the new jersey design")]
    async fn upload_jersey_image(&self, #[tool(aggr)] UploadImageRequest { data_uri }: UploadImageRequest) -> SessionResponse {
        self.update("Jersey image uploaded", |session| {
            session.set_jersey_image(ImageAsset::from_data_uri(data_uri))
        })
        .await
    }

    #[tool(description = "Upload a new background scene (after begin_background_edit)")]
    async fn upload_background_image(&self, #[tool(aggr)] UploadImageRequest { data_uri }: UploadImageRequest) -> SessionResponse {
        self.update("Background uploaded", |session| {
            session.set_background_image(ImageAsset::from_data_uri(data_uri))
        })
        .await
    }

    #[tool(description = "Choose whether the jersey is a custom design or an official jersey")]
    async fn set_jersey_type(&self, #[tool(aggr)] JerseyTypeRequest { jersey_type }: JerseyTypeRequest) -> SessionResponse {
        self.update("Jersey type updated", |session| {
            let jersey_type: JerseyType = jersey_type
                .parse()
                .map_err(|_| SwapError::Config(format!("unknown jersey type '{}'", jersey_type)))?;
            session.set_jersey_type(jersey_type)
        })
        .await
    }

    #[tool(description = "Select or deselect a negative constraint")]
    async fn toggle_negative_constraint(&self, #[tool(aggr)] ConstraintRequest { constraint }: ConstraintRequest) -> SessionResponse {
        self.update("Negative constraints updated", |session| {
            let constraint = NegativeConstraint::parse(&constraint)?;
            session.toggle_negative_constraint(constraint).map(|_| ())
        })
        .await
    }

    #[tool(description = "Start editing the background of the current result")]
    async fn begin_background_edit(&self) -> SessionResponse {
        self.update("Background editing started", Session::begin_background_edit).await
    }

    #[tool(description = "Stop editing the background and drop the uploaded background")]
    async fn cancel_background_edit(&self) -> SessionResponse {
        self.update("Background editing cancelled", Session::cancel_background_edit).await
    }

    #[tool(description = "Replace the player's jersey with the uploaded design")]
    async fn swap_jersey(&self) -> SessionResponse {
        let pending = self.session.lock().await.begin_jersey_swap();
        self.generate(pending, "Jersey swapped").await
    }

    #[tool(description = "Composite the current result into the uploaded background")]
    async fn replace_background(&self) -> SessionResponse {
        let pending = self.session.lock().await.begin_background_replace();
        self.generate(pending, "Background replaced").await
    }

    #[tool(description = "Start over: clear all images and errors")]
    async fn reset(&self) -> SessionResponse {
        self.update("Session reset", |session| {
            session.reset();
            Ok(())
        })
        .await
    }

    #[tool(description = "Get the current session state")]
    async fn get_session(&self) -> SessionResponse {
        self.update("Current session", |_| Ok(())).await
    }

    #[tool(description = "Get the result image as a data URI")]
    async fn get_result(&self) -> String {
        match self.session.lock().await.result_image() {
            Some(image) => image.as_data_uri().to_string(),
            None => "No result image yet. Run swap_jersey first.".to_string(),
        }
    }

    #[tool(description = "Get the instruction text that would be sent for the current session")]
    async fn get_prompt(&self) -> String {
        let session = self.session.lock().await;
        PromptOperation::JerseySwap {
            jersey_type: session.jersey_type(),
            negative_constraints: session.negative_constraints().clone(),
        }
        .build()
    }

    #[tool(description = "Get the JSON schema for PromptOperation")]
    fn get_command_schema(&self) -> String {
        let schema = PromptOperation::schema();
        serde_json::to_string_pretty(&schema)
            .unwrap_or_else(|e| format!("Failed to serialize schema: {}", e))
    }
}

#[tool(tool_box)]
impl ServerHandler for JerseySwapMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Jersey Swap Server - Upload a player photo and a jersey design, swap the jersey, then optionally composite the player into a new background. Images are exchanged as data URIs.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generation::GenerationRequest, workflow::WorkflowState};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Returns a fixed image once released, or fails on calls past `succeed_calls`.
    struct GatedClient {
        gate: Notify,
        succeed_calls: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerationClient for GatedClient {
        async fn generate(&self, _request: GenerationRequest) -> crate::Result<ImageAsset> {
            self.gate.notified().await;
            if self.calls.fetch_add(1, Ordering::SeqCst) >= self.succeed_calls {
                return Err(SwapError::Transport("connection reset".to_string()));
            }
            Ok(ImageAsset::from_parts("image/png", "UkVTVUxU"))
        }

        fn model_name(&self) -> &str {
            "gated"
        }
    }

    fn server() -> (JerseySwapMcpServer, Arc<GatedClient>) {
        server_succeeding(usize::MAX)
    }

    fn server_succeeding(succeed_calls: usize) -> (JerseySwapMcpServer, Arc<GatedClient>) {
        let client = Arc::new(GatedClient {
            gate: Notify::new(),
            succeed_calls,
            calls: AtomicUsize::new(0),
        });
        let server = JerseySwapMcpServer::new(
            client.clone(),
            ProcessingStatus::new(Duration::from_millis(2500)),
        );
        (server, client)
    }

    fn upload(data_uri: &str) -> UploadImageRequest {
        UploadImageRequest {
            data_uri: data_uri.to_string(),
        }
    }

    #[tokio::test]
    async fn test_swap_through_tools() {
        let (server, client) = server();
        assert!(server.upload_player_image(upload("data:image/png;base64,UExBWUVS")).await.ok);
        assert!(server.upload_jersey_image(upload("data:image/png;base64,SkVSU0VZ")).await.ok);
        client.gate.notify_one();

        let response = server.swap_jersey().await;
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.session["state"], "preview");
        assert_eq!(server.get_result().await, "data:image/png;base64,UkVTVUxU");
    }

    #[tokio::test]
    async fn test_missing_inputs_report_user_message() {
        let (server, _client) = server();
        let response = server.swap_jersey().await;
        assert!(!response.ok);
        assert_eq!(response.message, crate::workflow::MISSING_SWAP_INPUTS);
        assert_eq!(response.session["state"], "upload");
    }

    #[tokio::test]
    async fn test_reset_while_processing_discards_result() {
        let (server, client) = server();
        server.upload_player_image(upload("data:image/png;base64,UExBWUVS")).await;
        server.upload_jersey_image(upload("data:image/png;base64,SkVSU0VZ")).await;

        let swapping = {
            let server = server.clone();
            tokio::spawn(async move { server.swap_jersey().await })
        };
        while server.session.lock().await.state() != WorkflowState::Processing {
            tokio::task::yield_now().await;
        }

        let reset = server.reset().await;
        assert!(reset.ok);
        client.gate.notify_one();

        let response = swapping.await.unwrap();
        assert!(!response.ok);
        assert_eq!(response.session["state"], "upload");
        assert!(server.session.lock().await.result_image().is_none());
    }

    #[tokio::test]
    async fn test_cancel_background_edit_waits_for_pending_call() {
        let (server, client) = server_succeeding(1);
        server.upload_player_image(upload("data:image/png;base64,UExBWUVS")).await;
        server.upload_jersey_image(upload("data:image/png;base64,SkVSU0VZ")).await;
        client.gate.notify_one();
        assert!(server.swap_jersey().await.ok);
        assert!(server.begin_background_edit().await.ok);
        assert!(server.upload_background_image(upload("data:image/png;base64,QkFDSw==")).await.ok);

        let replacing = {
            let server = server.clone();
            tokio::spawn(async move { server.replace_background().await })
        };
        while server.session.lock().await.state() != WorkflowState::Processing {
            tokio::task::yield_now().await;
        }

        let cancel = server.cancel_background_edit().await;
        assert!(!cancel.ok);
        assert_eq!(cancel.session["state"], "processing");
        assert_eq!(cancel.session["is_editing_background"], true);
        client.gate.notify_one();

        let response = replacing.await.unwrap();
        assert!(!response.ok);
        assert_eq!(response.message, crate::workflow::BACKGROUND_FAILED);
        assert_eq!(response.session["state"], "error");
        assert_eq!(response.session["has_background_image"], true);
        let session = server.session.lock().await;
        assert_eq!(
            session.background_image().map(ImageAsset::as_data_uri),
            Some("data:image/png;base64,QkFDSw==")
        );
    }

    #[tokio::test]
    async fn test_preferences_through_tools() {
        let (server, _client) = server();
        let response = server
            .set_jersey_type(JerseyTypeRequest {
                jersey_type: "official".to_string(),
            })
            .await;
        assert!(response.ok);
        assert_eq!(response.session["jersey_type"], "official_jersey");

        let response = server
            .toggle_negative_constraint(ConstraintRequest {
                constraint: "Cartoonish".to_string(),
            })
            .await;
        assert!(response.ok);
        assert!(server.get_prompt().await.contains("incorrect logos, cartoonish"));

        let response = server
            .toggle_negative_constraint(ConstraintRequest {
                constraint: "lens flare".to_string(),
            })
            .await;
        assert!(!response.ok);
    }
}
