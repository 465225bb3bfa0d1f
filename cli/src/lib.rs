//! Runner behind the `regolo` binary.
//!
//! # Overview
//! Each subcommand performs exactly one authenticated POST: resolve endpoint
//! and key, build the request with `regolo-core`, execute it with reqwest, and
//! hand back the parsed JSON reply. Errors propagate unchanged; there is no
//! retry and no recovery.

pub mod args;
pub mod logging;
pub mod transport;

use anyhow::Context;
use regolo_core::{
    ApiError, ChatCompletionRequest, ClientConfig, ImageGenerationRequest, InferenceClient,
    Service, TranscriptionRequest,
};
use serde_json::Value;
use tracing::debug;

pub use args::{Cli, Command};

/// Resolve config with command-line values taking precedence over the
/// environment. An explicit endpoint is the only way to move transcription
/// off its fixed URL.
pub fn resolve_config(
    service: Service,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<ClientConfig, ApiError> {
    ClientConfig::resolve_with_endpoint(service, endpoint, |name| {
        let flag = if name == service.key_var() { api_key } else { None };
        flag.map(str::to_string).or_else(|| std::env::var(name).ok())
    })
}

pub fn run(cli: &Cli) -> anyhow::Result<Value> {
    let service = cli.command.service();
    let config = resolve_config(service, cli.endpoint.as_deref(), cli.api_key.as_deref())?;
    let client = InferenceClient::from_config(&config);
    debug!(?service, ?client, "invoking");

    let request = match &cli.command {
        Command::Chat { model, prompt } => {
            client.build_chat_completion(&ChatCompletionRequest::single_prompt(model, prompt))?
        }
        Command::Image { prompts } => client.build_image_generation(&ImageGenerationRequest {
            data: prompts.clone(),
        })?,
        Command::Transcribe { model, file } => {
            let data = std::fs::read(file)
                .with_context(|| format!("reading audio file {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            let input = TranscriptionRequest {
                model: model.clone(),
                file_name,
                file: data,
            };
            client.build_transcription(&input)
        }
    };

    let response = transport::execute(request)?;
    Ok(client.parse_response(response)?)
}
