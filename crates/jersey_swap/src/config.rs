use std::{fmt, fs, path::Path, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 2500;

/// Environment variables checked for the service credential, in order.
pub const CREDENTIAL_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Settings for talking to the generation service.
///
/// The credential is read once at startup and never serialized.
#[derive(Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct SwapConfig {
    #[serde(skip)]
    #[schemars(skip)]
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Rotation period of the processing status message
    pub status_interval_ms: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            status_interval_ms: DEFAULT_STATUS_INTERVAL_MS,
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for SwapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapConfig")
            .field("api_key", &if self.has_credential() { "<set>" } else { "<unset>" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("status_interval_ms", &self.status_interval_ms)
            .finish()
    }
}

impl SwapConfig {
    /// Default settings with the credential taken from the environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_credential()
    }

    /// Load settings from a TOML file, then take the credential from the
    /// environment.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)?.with_env_credential()
    }

    /// Parse settings from a TOML string. The credential is left unset.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SwapConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn with_env_credential(self) -> Result<Self> {
        let api_key = credential_from(|var| std::env::var(var).ok())?;
        Ok(self.with_api_key(api_key))
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fail fast when no credential has been supplied.
    pub fn require_credential(&self) -> Result<&str> {
        if self.has_credential() {
            Ok(self.api_key.trim())
        } else {
            Err(SwapError::MissingCredential)
        }
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(SwapError::Config("model must not be empty".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(SwapError::Config("endpoint must not be empty".to_string()));
        }
        if self.status_interval_ms == 0 {
            return Err(SwapError::Config("status_interval_ms must be positive".to_string()));
        }
        Ok(())
    }
}

/// First non-blank value among [`CREDENTIAL_VARS`], in order.
fn credential_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    CREDENTIAL_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.trim().is_empty())
        .ok_or(SwapError::MissingCredential)
}
