//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core crate builds `HttpRequest`
//! values and parses `HttpResponse` values; the host executes the round-trip.
//! Every inference call is a single POST, so the request carries no method.
//!
//! Multipart uploads are described part by part rather than pre-encoded. The
//! host's HTTP library owns the wire encoding and boundary, and sets the
//! matching `Content-Type` header itself.

/// A POST body: serialized JSON or a list of form parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(Vec<u8>),
    Multipart(Vec<FormPart>),
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

/// An HTTP POST request described as plain data.
///
/// Built by `InferenceClient::build_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Look up a header value, ignoring ASCII case in the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The JSON body as text, if this is a JSON request.
    pub fn body_str(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Json(bytes)) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// The form parts, if this is a multipart request.
    pub fn form_parts(&self) -> Option<&[FormPart]> {
        match &self.body {
            Some(RequestBody::Multipart(parts)) => Some(parts),
            _ => None,
        }
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed to
/// `InferenceClient::parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
