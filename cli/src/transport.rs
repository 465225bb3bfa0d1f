//! Blocking reqwest executor for core-built requests.
//!
//! Status codes are returned as data so `InferenceClient::parse_response`
//! owns the success/failure decision. Only transport-level failures become
//! errors here. One request per call, no retries.

use regolo_core::{ApiError, FormPart, HttpRequest, HttpResponse, RequestBody};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use tracing::info;

pub fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let client = Client::new();

    info!(url = %req.url, "POST");
    let mut builder = client.post(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = match req.body {
        Some(RequestBody::Json(bytes)) => builder.body(bytes),
        Some(RequestBody::Multipart(parts)) => builder.multipart(to_form(parts)?),
        None => builder,
    };
    let response = builder.send().map_err(transport)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let body = response.text().map_err(transport)?;
    info!(status, bytes = body.len(), "response received");

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Encode form parts in order; reqwest picks the boundary and sets the
/// `Content-Type` header.
fn to_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let part = Part::bytes(data)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(transport)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}
