//! Response types.
//!
//! The core trait is [`IntoResponse`]; handlers return anything implementing
//! it. Successful JSON responses are built through [`Reply`], which renders
//! the uniform envelope `{"success": true, "message": ..., "data": ...}` and
//! optionally sets a `Link` header pointing at the canonical resource path.

use crate::error::{ApiError, ErrorEnvelope};
use bytes::Bytes;
use http::{header, StatusCode};
use http_body_util::Full;
use serde::Serialize;

/// HTTP response type.
pub type Response = http::Response<Full<Bytes>>;

/// Trait for types that can be converted into an HTTP response.
pub trait IntoResponse {
    /// Convert self into a Response.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for () {
    fn into_response(self) -> Response {
        http::Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        http::Response::builder()
            .status(self)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        http::Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(self)))
            .unwrap()
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        http::Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(self)))
            .unwrap()
    }
}

impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = serde_json::to_vec(&ErrorEnvelope::from(self)).unwrap_or_else(|_| {
            br#"{"success":false,"message":"Something is wrong, please try again"}"#.to_vec()
        });

        http::Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }
}

/// Success envelope builder.
///
/// ```rust,ignore
/// Reply::ok(student)
///     .message("Here is your student")
///     .link(format!("/students/{}", id))
/// ```
#[derive(Debug, Clone)]
pub struct Reply<T> {
    status: StatusCode,
    message: Option<String>,
    data: Option<T>,
    link: Option<String>,
}

impl Reply<()> {
    /// 200 OK with a message and no data payload.
    pub fn text(message: impl Into<String>) -> Reply<()> {
        Reply {
            status: StatusCode::OK,
            message: Some(message.into()),
            data: None,
            link: None,
        }
    }
}

impl<T: Serialize> Reply<T> {
    /// 200 OK with a data payload.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            data: Some(data),
            link: None,
        }
    }

    /// 201 Created with the created record as payload.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: None,
            data: Some(data),
            link: None,
        }
    }

    /// Attach a message to the envelope.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the `Link` header to the canonical resource path.
    pub fn link(mut self, path: impl Into<String>) -> Self {
        self.link = Some(path.into());
        self
    }
}

#[derive(Serialize)]
struct SuccessEnvelope<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let envelope = SuccessEnvelope {
            success: true,
            message: self.message.as_deref(),
            data: self.data.as_ref(),
        };

        let body = match serde_json::to_vec(&envelope) {
            Ok(body) => body,
            Err(err) => return ApiError::internal(err).into_response(),
        };

        let mut builder = http::Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(link) = &self.link {
            builder = builder.header(header::LINK, link.as_str());
        }

        match builder.body(Full::new(Bytes::from(body))) {
            Ok(response) => response,
            Err(err) => ApiError::internal(err).into_response(),
        }
    }
}
