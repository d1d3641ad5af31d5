//! The session aggregate and the transitions that drive it.
//!
//! ```text
//! Upload --submit swap--> Processing --ok--> Preview --submit background--> Processing
//!                              |                                                 |
//!                              +--fail--> Error <------------fail----------------+
//! any --reset--> Upload
//! ```
//!
//! A generation call is split into `begin_*` (validate, build the request,
//! enter `Processing`) and [`Session::complete`] so the call itself can run
//! without holding the session. Results that come back after a `reset` are
//! discarded.

pub mod status;

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{error, info, warn};

use crate::{
    asset::ImageAsset,
    error::{Result, SwapError},
    generation::{GenerationClient, GenerationRequest},
    prompt::PromptOperation,
    types::{JerseyType, NegativeConstraint, NegativeConstraintSet},
};

pub use status::{ProcessingStatus, StatusTicker, PROCESSING_MESSAGES};

pub const MISSING_SWAP_INPUTS: &str = "Please upload both a player photo and a jersey image.";
pub const SWAP_FAILED: &str = "An error occurred during the AI processing. Please try again.";
pub const MISSING_BACKGROUND_INPUTS: &str = "An error occurred. Missing images for background swap.";
pub const BACKGROUND_FAILED: &str =
    "An error occurred during the background replacement. Please try again.";

#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Upload,
    Processing,
    Preview,
    Error,
}

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationKind {
    JerseySwap,
    BackgroundReplace,
}

impl GenerationKind {
    fn failure_message(self) -> &'static str {
        match self {
            Self::JerseySwap => SWAP_FAILED,
            Self::BackgroundReplace => BACKGROUND_FAILED,
        }
    }
}

/// Identifies an in-flight generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    kind: GenerationKind,
}

impl Ticket {
    pub fn kind(&self) -> GenerationKind {
        self.kind
    }
}

/// A request ready to be sent, plus the ticket to hand back to
/// [`Session::complete`].
#[derive(Debug)]
pub struct PendingGeneration {
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was stored and the session moved to `Preview`.
    Applied,
    /// The session was reset while the call was pending.
    Discarded,
}

/// All transformation state for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    player_image: Option<ImageAsset>,
    jersey_image: Option<ImageAsset>,
    background_image: Option<ImageAsset>,
    result_image: Option<ImageAsset>,
    state: WorkflowState,
    last_error: Option<String>,
    jersey_type: JerseyType,
    negative_constraints: NegativeConstraintSet,
    is_editing_background: bool,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn player_image(&self) -> Option<&ImageAsset> {
        self.player_image.as_ref()
    }

    pub fn jersey_image(&self) -> Option<&ImageAsset> {
        self.jersey_image.as_ref()
    }

    pub fn background_image(&self) -> Option<&ImageAsset> {
        self.background_image.as_ref()
    }

    pub fn result_image(&self) -> Option<&ImageAsset> {
        self.result_image.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn jersey_type(&self) -> JerseyType {
        self.jersey_type
    }

    pub fn negative_constraints(&self) -> &NegativeConstraintSet {
        &self.negative_constraints
    }

    pub fn is_editing_background(&self) -> bool {
        self.is_editing_background
    }

    fn expect_state(&self, expected: WorkflowState, event: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SwapError::InvalidTransition {
                state: self.state,
                event,
            })
        }
    }

    /// Replace the player photo.
    pub fn set_player_image(&mut self, image: ImageAsset) -> Result<()> {
        self.expect_state(WorkflowState::Upload, "upload a player photo")?;
        self.player_image = Some(image);
        Ok(())
    }

    /// Replace the jersey image.
    pub fn set_jersey_image(&mut self, image: ImageAsset) -> Result<()> {
        self.expect_state(WorkflowState::Upload, "upload a jersey image")?;
        self.jersey_image = Some(image);
        Ok(())
    }

    pub fn set_jersey_type(&mut self, jersey_type: JerseyType) -> Result<()> {
        self.expect_state(WorkflowState::Upload, "change the jersey type")?;
        self.jersey_type = jersey_type;
        Ok(())
    }

    /// Returns whether the constraint is selected afterwards.
    pub fn toggle_negative_constraint(&mut self, constraint: NegativeConstraint) -> Result<bool> {
        self.expect_state(WorkflowState::Upload, "change negative constraints")?;
        Ok(self.negative_constraints.toggle(constraint))
    }

    pub fn set_negative_constraints(&mut self, constraints: NegativeConstraintSet) -> Result<()> {
        self.expect_state(WorkflowState::Upload, "change negative constraints")?;
        self.negative_constraints = constraints;
        Ok(())
    }

    pub fn begin_background_edit(&mut self) -> Result<()> {
        self.expect_state(WorkflowState::Preview, "edit the background")?;
        self.is_editing_background = true;
        Ok(())
    }

    pub fn set_background_image(&mut self, image: ImageAsset) -> Result<()> {
        self.expect_state(WorkflowState::Preview, "upload a background")?;
        if !self.is_editing_background {
            return Err(SwapError::InvalidTransition {
                state: self.state,
                event: "upload a background without editing the background",
            });
        }
        self.background_image = Some(image);
        Ok(())
    }

    pub fn cancel_background_edit(&mut self) -> Result<()> {
        self.expect_state(WorkflowState::Preview, "cancel the background edit")?;
        self.is_editing_background = false;
        self.background_image = None;
        Ok(())
    }

    /// Validate swap inputs and enter `Processing`.
    ///
    /// Missing inputs leave the state untouched and only set the message.
    pub fn begin_jersey_swap(&mut self) -> Result<PendingGeneration> {
        self.expect_state(WorkflowState::Upload, "submit a jersey swap")?;

        let (Some(player), Some(jersey)) = (&self.player_image, &self.jersey_image) else {
            self.last_error = Some(MISSING_SWAP_INPUTS.to_string());
            let missing = if self.player_image.is_none() {
                "player photo"
            } else {
                "jersey image"
            };
            return Err(SwapError::MissingInput(missing));
        };

        let operation = PromptOperation::JerseySwap {
            jersey_type: self.jersey_type,
            negative_constraints: self.negative_constraints.clone(),
        };
        let request = GenerationRequest::new(operation.build(), &[player, jersey]);
        self.enter_processing(GenerationKind::JerseySwap, request)
    }

    /// Validate background inputs and enter `Processing`.
    ///
    /// Unlike the swap, missing inputs here move the session to `Error`.
    pub fn begin_background_replace(&mut self) -> Result<PendingGeneration> {
        self.expect_state(WorkflowState::Preview, "submit a background replacement")?;

        let (Some(player), Some(background)) = (&self.result_image, &self.background_image) else {
            let missing = if self.result_image.is_none() {
                "result image"
            } else {
                "background image"
            };
            self.state = WorkflowState::Error;
            self.last_error = Some(MISSING_BACKGROUND_INPUTS.to_string());
            return Err(SwapError::MissingInput(missing));
        };

        let request = GenerationRequest::new(
            PromptOperation::BackgroundReplace.build(),
            &[player, background],
        );
        self.enter_processing(GenerationKind::BackgroundReplace, request)
    }

    fn enter_processing(
        &mut self,
        kind: GenerationKind,
        request: Result<GenerationRequest>,
    ) -> Result<PendingGeneration> {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                error!("Could not build {} request: {}", kind, e);
                self.state = WorkflowState::Error;
                self.last_error = Some(kind.failure_message().to_string());
                return Err(e);
            }
        };

        self.state = WorkflowState::Processing;
        self.last_error = None;
        info!("Submitting {} ({} images)", kind, request.images.len());

        Ok(PendingGeneration {
            ticket: Ticket {
                epoch: self.epoch,
                kind,
            },
            request,
        })
    }

    /// Apply the outcome of a generation call.
    ///
    /// Failures move the session to `Error` with a generic message and are
    /// returned to the caller; the detailed error is only logged.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<ImageAsset>) -> Result<Completion> {
        if ticket.epoch != self.epoch || self.state != WorkflowState::Processing {
            warn!(
                "Discarding {} result that arrived after the session moved on",
                ticket.kind
            );
            return Ok(Completion::Discarded);
        }

        match outcome {
            Ok(image) => {
                self.result_image = Some(image);
                self.state = WorkflowState::Preview;
                if ticket.kind == GenerationKind::BackgroundReplace {
                    self.is_editing_background = false;
                    self.background_image = None;
                }
                info!("{} finished", ticket.kind);
                Ok(Completion::Applied)
            }
            Err(e) => {
                error!("{} failed: {}", ticket.kind, e);
                self.state = WorkflowState::Error;
                self.last_error = Some(ticket.kind.failure_message().to_string());
                Err(e)
            }
        }
    }

    /// Return to `Upload`, dropping every image and any error.
    ///
    /// The jersey type and negative constraints are user preferences and
    /// survive the reset. Calls still in flight are invalidated.
    pub fn reset(&mut self) {
        self.player_image = None;
        self.jersey_image = None;
        self.background_image = None;
        self.result_image = None;
        self.last_error = None;
        self.is_editing_background = false;
        self.state = WorkflowState::Upload;
        self.epoch += 1;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            has_player_image: self.player_image.is_some(),
            has_jersey_image: self.jersey_image.is_some(),
            has_background_image: self.background_image.is_some(),
            has_result_image: self.result_image.is_some(),
            jersey_type: self.jersey_type,
            negative_constraints: self.negative_constraints.iter().map(|c| c.to_string()).collect(),
            is_editing_background: self.is_editing_background,
            last_error: self.last_error.clone(),
        }
    }
}

/// Serializable view of a session without the image payloads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionSnapshot {
    pub state: WorkflowState,
    pub has_player_image: bool,
    pub has_jersey_image: bool,
    pub has_background_image: bool,
    pub has_result_image: bool,
    pub jersey_type: JerseyType,
    pub negative_constraints: Vec<String>,
    pub is_editing_background: bool,
    pub last_error: Option<String>,
}

/// A session bound to a generation backend, with exclusive ownership.
pub struct Workflow {
    session: Session,
    client: Arc<dyn GenerationClient>,
}

impl Workflow {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            session: Session::new(),
            client,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub async fn perform_jersey_swap(&mut self) -> Result<&ImageAsset> {
        let pending = self.session.begin_jersey_swap()?;
        self.run(pending).await
    }

    pub async fn perform_background_replace(&mut self) -> Result<&ImageAsset> {
        let pending = self.session.begin_background_replace()?;
        self.run(pending).await
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    async fn run(&mut self, pending: PendingGeneration) -> Result<&ImageAsset> {
        let PendingGeneration { ticket, request } = pending;
        let outcome = self.client.generate(request).await;

        match self.session.complete(ticket, outcome)? {
            Completion::Applied => self.session.result_image().ok_or(SwapError::NoImageReturned),
            Completion::Discarded => Err(SwapError::InvalidTransition {
                state: self.session.state(),
                event: "apply a generation result",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::gemini::{first_inline_image, GenerateContentResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a canned service response, or fails with a transport error.
    struct StubClient {
        response: Option<&'static str>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl StubClient {
        fn responding(json: &'static str) -> Arc<Self> {
            Arc::new(Self {
                response: Some(json),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerationClient for StubClient {
        async fn generate(&self, request: GenerationRequest) -> Result<ImageAsset> {
            self.requests.lock().unwrap().push(request);
            let json = self
                .response
                .ok_or_else(|| SwapError::Transport("connection reset".to_string()))?;
            let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
            first_inline_image(&response).ok_or(SwapError::NoImageReturned)
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    const IMAGE_X: &str = r#"{"candidates":[{"content":{"parts":[
        {"text":"done"},
        {"inlineData":{"mimeType":"image/png","data":"WFhY"}}
    ]}}]}"#;
    const NO_IMAGE: &str = r#"{"candidates":[{"content":{"parts":[{"text":"blocked"}]}}]}"#;

    fn asset(payload: &str) -> ImageAsset {
        ImageAsset::from_parts("image/png", payload)
    }

    fn ready_workflow(client: Arc<StubClient>) -> Workflow {
        let mut workflow = Workflow::new(client);
        workflow.session_mut().set_player_image(asset("UExBWUVS")).unwrap();
        workflow.session_mut().set_jersey_image(asset("SkVSU0VZ")).unwrap();
        workflow
    }

    async fn preview_workflow(client: Arc<StubClient>) -> Workflow {
        let mut workflow = ready_workflow(client);
        workflow.perform_jersey_swap().await.unwrap();
        workflow
    }

    #[test]
    fn test_initial_session() {
        let session = Session::new();
        assert_eq!(session.state(), WorkflowState::Upload);
        assert_eq!(session.jersey_type(), JerseyType::CustomDesign);
        assert_eq!(session.negative_constraints(), &NegativeConstraintSet::default());
        assert!(!session.is_editing_background());
    }

    #[tokio::test]
    async fn test_swap_success_enters_preview() {
        let client = StubClient::responding(IMAGE_X);
        let mut workflow = ready_workflow(client.clone());

        let result = workflow.perform_jersey_swap().await.unwrap().clone();
        assert_eq!(result, ImageAsset::from_parts("image/png", "WFhY"));
        assert_eq!(workflow.session().state(), WorkflowState::Preview);
        assert_eq!(workflow.session().result_image(), Some(&result));
        assert_eq!(workflow.session().last_error(), None);

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].images.len(), 2);
        assert_eq!(requests[0].images[0].payload, "UExBWUVS");
        assert_eq!(requests[0].images[1].payload, "SkVSU0VZ");
        assert!(requests[0].instruction.contains("JERSEY REPLACEMENT"));
    }

    #[tokio::test]
    async fn test_swap_without_jersey_keeps_state() {
        let client = StubClient::responding(IMAGE_X);
        let mut workflow = Workflow::new(client.clone());
        workflow.session_mut().set_player_image(asset("UExBWUVS")).unwrap();

        let err = workflow.perform_jersey_swap().await.unwrap_err();
        assert!(matches!(err, SwapError::MissingInput("jersey image")));
        assert_eq!(workflow.session().state(), WorkflowState::Upload);
        assert_eq!(workflow.session().last_error(), Some(MISSING_SWAP_INPUTS));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_swap_without_image_part_enters_error() {
        let client = StubClient::responding(NO_IMAGE);
        let mut workflow = ready_workflow(client);

        let err = workflow.perform_jersey_swap().await.unwrap_err();
        assert!(matches!(err, SwapError::NoImageReturned));
        assert_eq!(workflow.session().state(), WorkflowState::Error);
        assert_eq!(workflow.session().result_image(), None);
        assert_eq!(workflow.session().last_error(), Some(SWAP_FAILED));
    }

    #[tokio::test]
    async fn test_malformed_upload_aborts_before_call() {
        let client = StubClient::responding(IMAGE_X);
        let mut workflow = Workflow::new(client.clone());
        workflow
            .session_mut()
            .set_player_image(ImageAsset::from_data_uri("not a data uri"))
            .unwrap();
        workflow.session_mut().set_jersey_image(asset("SkVSU0VZ")).unwrap();

        let err = workflow.perform_jersey_swap().await.unwrap_err();
        assert!(matches!(err, SwapError::MalformedInput(_)));
        assert_eq!(workflow.session().state(), WorkflowState::Error);
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_resubmit_while_processing_is_rejected() {
        let mut session = Session::new();
        session.set_player_image(asset("UExBWUVS")).unwrap();
        session.set_jersey_image(asset("SkVSU0VZ")).unwrap();
        session.begin_jersey_swap().unwrap();

        let err = session.begin_jersey_swap().unwrap_err();
        assert!(matches!(
            err,
            SwapError::InvalidTransition {
                state: WorkflowState::Processing,
                ..
            }
        ));
        assert_eq!(session.state(), WorkflowState::Processing);
    }

    #[test]
    fn test_cancel_background_edit_while_processing_is_rejected() {
        let mut session = Session::new();
        session.set_player_image(asset("UExBWUVS")).unwrap();
        session.set_jersey_image(asset("SkVSU0VZ")).unwrap();
        let pending = session.begin_jersey_swap().unwrap();
        session.complete(pending.ticket, Ok(asset("WFhY"))).unwrap();
        session.begin_background_edit().unwrap();
        session.set_background_image(asset("QkFDSw==")).unwrap();
        session.begin_background_replace().unwrap();

        assert!(matches!(
            session.cancel_background_edit(),
            Err(SwapError::InvalidTransition {
                state: WorkflowState::Processing,
                ..
            })
        ));
        assert!(session.is_editing_background());
        assert_eq!(session.background_image(), Some(&asset("QkFDSw==")));
    }

    #[tokio::test]
    async fn test_background_replace_success() {
        let client = StubClient::responding(IMAGE_X);
        let mut workflow = preview_workflow(client.clone()).await;
        workflow.session_mut().begin_background_edit().unwrap();
        workflow.session_mut().set_background_image(asset("QkFDSw==")).unwrap();

        workflow.perform_background_replace().await.unwrap();
        let session = workflow.session();
        assert_eq!(session.state(), WorkflowState::Preview);
        assert!(!session.is_editing_background());
        assert_eq!(session.background_image(), None);

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        // The composited player goes first, then the scene
        assert_eq!(requests[1].images[0].payload, "WFhY");
        assert_eq!(requests[1].images[1].payload, "QkFDSw==");
        assert!(requests[1].instruction.contains("visual effects compositor"));
    }

    #[tokio::test]
    async fn test_background_transport_failure_keeps_images() {
        let mut session = Session::new();
        session.set_player_image(asset("UExBWUVS")).unwrap();
        session.set_jersey_image(asset("SkVSU0VZ")).unwrap();
        let pending = session.begin_jersey_swap().unwrap();
        session.complete(pending.ticket, Ok(asset("WFhY"))).unwrap();
        session.begin_background_edit().unwrap();
        session.set_background_image(asset("QkFDSw==")).unwrap();

        let mut workflow = Workflow {
            session,
            client: StubClient::failing(),
        };
        let err = workflow.perform_background_replace().await.unwrap_err();
        assert!(matches!(err, SwapError::Transport(_)));

        let session = workflow.session();
        assert_eq!(session.state(), WorkflowState::Error);
        assert_eq!(session.result_image(), Some(&asset("WFhY")));
        assert_eq!(session.background_image(), Some(&asset("QkFDSw==")));
        assert_eq!(session.last_error(), Some(BACKGROUND_FAILED));
    }

    #[tokio::test]
    async fn test_background_without_image_enters_error() {
        let client = StubClient::responding(IMAGE_X);
        let mut workflow = preview_workflow(client.clone()).await;

        let err = workflow.perform_background_replace().await.unwrap_err();
        assert!(matches!(err, SwapError::MissingInput("background image")));
        assert_eq!(workflow.session().state(), WorkflowState::Error);
        assert_eq!(workflow.session().last_error(), Some(MISSING_BACKGROUND_INPUTS));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_background_upload_requires_edit_mode() {
        let mut workflow = preview_workflow(StubClient::responding(IMAGE_X)).await;
        assert!(workflow.session_mut().set_background_image(asset("QkFDSw==")).is_err());

        workflow.session_mut().begin_background_edit().unwrap();
        workflow.session_mut().set_background_image(asset("QkFDSw==")).unwrap();
        workflow.session_mut().cancel_background_edit().unwrap();
        assert!(!workflow.session().is_editing_background());
        assert_eq!(workflow.session().background_image(), None);
    }

    #[tokio::test]
    async fn test_reset_from_every_state() {
        let mut upload = Session::new();
        upload.set_player_image(asset("UExBWUVS")).unwrap();

        let mut processing = upload.clone();
        processing.set_jersey_image(asset("SkVSU0VZ")).unwrap();
        let pending = processing.begin_jersey_swap().unwrap();

        let mut preview = processing.clone();
        preview.complete(pending.ticket, Ok(asset("WFhY"))).unwrap();
        preview.begin_background_edit().unwrap();
        preview.set_background_image(asset("QkFDSw==")).unwrap();

        let mut error = processing.clone();
        let _ = error.complete(pending.ticket, Err(SwapError::NoImageReturned));
        assert_eq!(error.state(), WorkflowState::Error);

        for mut session in [upload, processing, preview, error] {
            session.reset();
            assert_eq!(session.state(), WorkflowState::Upload);
            assert_eq!(session.player_image(), None);
            assert_eq!(session.jersey_image(), None);
            assert_eq!(session.background_image(), None);
            assert_eq!(session.result_image(), None);
            assert_eq!(session.last_error(), None);
            assert!(!session.is_editing_background());
        }
    }

    #[test]
    fn test_result_after_reset_is_discarded() {
        let mut session = Session::new();
        session.set_player_image(asset("UExBWUVS")).unwrap();
        session.set_jersey_image(asset("SkVSU0VZ")).unwrap();
        let stale = session.begin_jersey_swap().unwrap();

        session.reset();
        session.set_player_image(asset("TkVX")).unwrap();
        session.set_jersey_image(asset("SkVSU0VZ")).unwrap();
        let fresh = session.begin_jersey_swap().unwrap();

        let completion = session.complete(stale.ticket, Ok(asset("T0xE"))).unwrap();
        assert_eq!(completion, Completion::Discarded);
        assert_eq!(session.state(), WorkflowState::Processing);
        assert_eq!(session.result_image(), None);

        let completion = session.complete(fresh.ticket, Ok(asset("TkVX"))).unwrap();
        assert_eq!(completion, Completion::Applied);
        assert_eq!(session.result_image(), Some(&asset("TkVX")));
    }

    #[test]
    fn test_preferences_survive_reset() {
        let mut session = Session::new();
        session.set_jersey_type(JerseyType::OfficialJersey).unwrap();
        assert!(session.toggle_negative_constraint(NegativeConstraint::Blurry).unwrap());
        session.reset();
        assert_eq!(session.jersey_type(), JerseyType::OfficialJersey);
        assert!(session.negative_constraints().contains(NegativeConstraint::Blurry));
    }

    #[test]
    fn test_snapshot() {
        let mut session = Session::new();
        session.set_player_image(asset("UExBWUVS")).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, WorkflowState::Upload);
        assert!(snapshot.has_player_image);
        assert!(!snapshot.has_jersey_image);
        assert_eq!(
            snapshot.negative_constraints,
            vec!["rectangular patch", "pasted image", "incorrect logos"]
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "upload");
    }
}
