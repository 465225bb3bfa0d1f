//! Request construction and response parsing for a hosted inference API.
//!
//! # Overview
//! Covers three endpoints: chat completion, image generation, and audio
//! transcription. Every call is one bearer-authenticated POST. This crate
//! builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO); the host performs the round-trip.
//!
//! # Design
//! - `InferenceClient` holds only the endpoint and the key.
//! - `build_*` per endpoint, one shared `parse_response` yielding JSON.
//! - Multipart uploads are described as ordered form parts; the host's HTTP
//!   library encodes them.
//! - `config` resolves `ENDPOINT`, `REGOLO_TOKEN` and `REGOLOAI_API_KEY`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::InferenceClient;
pub use config::{ClientConfig, Service};
pub use error::ApiError;
pub use http::{FormPart, HttpRequest, HttpResponse, RequestBody};
pub use types::{ChatCompletionRequest, ChatMessage, ImageGenerationRequest, TranscriptionRequest};
