//! Stateless request builder and response parser for the inference API.
//!
//! # Design
//! `InferenceClient` holds only the endpoint URL and the bearer credential.
//! Each endpoint has a `build_*` method producing an `HttpRequest`; all of
//! them share `parse_response`, since every endpoint answers with JSON.
//! The caller executes the single HTTP round-trip in between.

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{FormPart, HttpRequest, HttpResponse, RequestBody};
use crate::types::{ChatCompletionRequest, ImageGenerationRequest, TranscriptionRequest};

const APPLICATION_JSON: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Synchronous, stateless client for the hosted inference endpoints.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Clone)]
pub struct InferenceClient {
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl InferenceClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.endpoint, &config.api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_chat_completion(
        &self,
        input: &ChatCompletionRequest,
    ) -> Result<HttpRequest, ApiError> {
        debug!(model = %input.model, messages = input.messages.len(), "building chat completion");
        let body = to_json(input)?;
        Ok(HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![
                ("Content-Type".to_string(), APPLICATION_JSON.to_string()),
                ("Accept".to_string(), APPLICATION_JSON.to_string()),
                self.authorization(),
            ],
            body: Some(body),
        })
    }

    pub fn build_image_generation(
        &self,
        input: &ImageGenerationRequest,
    ) -> Result<HttpRequest, ApiError> {
        debug!(prompts = input.data.len(), "building image generation");
        let body = to_json(input)?;
        Ok(HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![
                ("Content-Type".to_string(), APPLICATION_JSON.to_string()),
                self.authorization(),
            ],
            body: Some(body),
        })
    }

    /// Build a multipart upload with fields `model` and `file`, in that order.
    ///
    /// No `Content-Type` header: the host's form encoder supplies it together
    /// with the boundary.
    pub fn build_transcription(&self, input: &TranscriptionRequest) -> HttpRequest {
        debug!(
            model = %input.model,
            file = %input.file_name,
            bytes = input.file.len(),
            "building transcription upload"
        );
        let parts = vec![
            FormPart::Text {
                name: "model".to_string(),
                value: input.model.clone(),
            },
            FormPart::File {
                name: "file".to_string(),
                file_name: input.file_name.clone(),
                content_type: OCTET_STREAM.to_string(),
                data: input.file.clone(),
            },
        ];
        HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![self.authorization()],
            body: Some(RequestBody::Multipart(parts)),
        }
    }

    /// Parse any endpoint's reply. Non-2xx statuses are returned as errors
    /// with the raw body attached.
    pub fn parse_response(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        debug!(status = response.status, bytes = response.body.len(), "parsing response");
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn authorization(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.api_key))
    }
}

fn to_json<T: Serialize>(input: &T) -> Result<RequestBody, ApiError> {
    serde_json::to_vec(input)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;

    fn client() -> InferenceClient {
        InferenceClient::new("https://api.example.test/v1/chat/completions", "abc123")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn chat_request_carries_bearer_and_payload() {
        let input = ChatCompletionRequest {
            model: "X".to_string(),
            messages: vec![ChatMessage::user("hi")],
        };
        let req = client().build_chat_completion(&input).unwrap();
        assert_eq!(req.url, "https://api.example.test/v1/chat/completions");
        assert_eq!(req.header("Authorization"), Some("Bearer abc123"));

        let body: serde_json::Value = serde_json::from_str(req.body_str().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"model": "X", "messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn chat_request_headers_in_order() {
        let input = ChatCompletionRequest::single_prompt("X", "hi");
        let req = client().build_chat_completion(&input).unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer abc123".to_string()),
            ]
        );
    }

    #[test]
    fn image_request_has_no_accept_header() {
        let input = ImageGenerationRequest {
            data: vec!["Cat playing the piano".to_string()],
        };
        let req = client().build_image_generation(&input).unwrap();
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("Accept"), None);
        assert_eq!(req.body_str(), Some(r#"{"data":["Cat playing the piano"]}"#));
    }

    #[test]
    fn transcription_request_is_multipart() {
        let input = TranscriptionRequest {
            model: "whisper-1".to_string(),
            file_name: "file.mp3".to_string(),
            file: b"audio".to_vec(),
        };
        let req = client().build_transcription(&input);
        assert_eq!(
            req.headers,
            vec![("Authorization".to_string(), "Bearer abc123".to_string())]
        );
        assert!(req.body_str().is_none());
        assert_eq!(
            req.form_parts().unwrap(),
            &[
                FormPart::Text {
                    name: "model".to_string(),
                    value: "whisper-1".to_string(),
                },
                FormPart::File {
                    name: "file".to_string(),
                    file_name: "file.mp3".to_string(),
                    content_type: "application/octet-stream".to_string(),
                    data: b"audio".to_vec(),
                },
            ]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = InferenceClient::new("http://localhost:3000/", "k");
        assert_eq!(client.endpoint(), "http://localhost:3000");
    }

    #[test]
    fn debug_does_not_leak_key() {
        assert!(!format!("{:?}", client()).contains("abc123"));
    }

    #[test]
    fn parse_success_returns_json() {
        let value = client().parse_response(ok(r#"{"text":"ciao"}"#)).unwrap();
        assert_eq!(value["text"], "ciao");
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let mut resp = ok(r#"{"id":1}"#);
        resp.status = 201;
        assert!(client().parse_response(resp).is_ok());
    }

    #[test]
    fn parse_non_success_keeps_status_and_body() {
        let resp = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: "invalid token".to_string(),
        };
        let err = client().parse_response(resp).unwrap_err();
        assert!(matches!(
            err,
            ApiError::HttpError { status: 401, ref body } if body == "invalid token"
        ));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_response(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
