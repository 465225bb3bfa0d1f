//! Endpoint and credential resolution.
//!
//! Chat and image generation read both the URL and the token from the
//! environment. Transcription has a fixed public URL and its own key variable;
//! only an explicit override changes its URL.

use tracing::debug;

use crate::error::ApiError;

pub const ENV_ENDPOINT: &str = "ENDPOINT";
pub const ENV_REGOLO_TOKEN: &str = "REGOLO_TOKEN";
pub const ENV_REGOLOAI_API_KEY: &str = "REGOLOAI_API_KEY";

pub const DEFAULT_TRANSCRIPTION_URL: &str =
    "https://api.regolo.ai/v1/models/whisper-large-v3/transcriptions";

pub const DEFAULT_CHAT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_CHAT_PROMPT: &str = "Tell me about Rome in a concise manner";
pub const DEFAULT_IMAGE_PROMPT: &str = "Cat playing the piano";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_AUDIO_FILE: &str = "file.mp3";

/// Which inference endpoint a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Chat,
    ImageGeneration,
    Transcription,
}

impl Service {
    /// Environment variable holding the bearer credential for this service.
    pub fn key_var(self) -> &'static str {
        match self {
            Service::Chat | Service::ImageGeneration => ENV_REGOLO_TOKEN,
            Service::Transcription => ENV_REGOLOAI_API_KEY,
        }
    }

    /// Fixed URL for services that do not read `ENDPOINT`.
    pub fn default_endpoint(self) -> Option<&'static str> {
        match self {
            Service::Transcription => Some(DEFAULT_TRANSCRIPTION_URL),
            Service::Chat | Service::ImageGeneration => None,
        }
    }
}

/// Resolved target URL and bearer credential for one call.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
}

// Keeps the key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    /// Resolve from the process environment.
    pub fn from_env(service: Service) -> Result<Self, ApiError> {
        Self::resolve(service, |name| std::env::var(name).ok())
    }

    /// Resolve through an arbitrary variable lookup. Empty values count as unset.
    pub fn resolve<F>(service: Service, lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve_with_endpoint(service, None, lookup)
    }

    /// Like `resolve`, with an explicit endpoint that wins over every other
    /// source.
    ///
    /// Without one, a service with a fixed URL uses it and never reads
    /// `ENDPOINT`; that variable belongs to chat and image generation.
    pub fn resolve_with_endpoint<F>(
        service: Service,
        endpoint: Option<&str>,
        lookup: F,
    ) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let endpoint = match endpoint.filter(|e| !e.trim().is_empty()) {
            Some(url) => url.to_string(),
            None => match service.default_endpoint() {
                Some(url) => url.to_string(),
                None => get(ENV_ENDPOINT).ok_or(ApiError::MissingConfig(ENV_ENDPOINT))?,
            },
        };
        let key_var = service.key_var();
        let api_key = get(key_var).ok_or(ApiError::MissingConfig(key_var))?;

        debug!(?service, %endpoint, "resolved client config");
        Ok(Self { endpoint, api_key })
    }
}
