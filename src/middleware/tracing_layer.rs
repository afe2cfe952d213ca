//! Access logging middleware.
//!
//! Wraps each request in an `http_request` span and emits one completion
//! event with method, path, status and duration.

use super::layer::{BoxedNext, Layer};
use crate::request::Request;
use crate::response::Response;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tracing::{info_span, Instrument};

/// Middleware layer that logs every request.
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for TracingLayer {
    fn call(
        &self,
        req: Request,
        next: BoxedNext,
    ) -> Pin<Box<dyn Future<Output = Response> + Send + 'static>> {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        Box::pin(async move {
            let start = Instant::now();
            let span = info_span!(
                "http_request",
                method = %method,
                path = %path,
                status = tracing::field::Empty,
                duration_ms = tracing::field::Empty,
            );

            let response = next(req).instrument(span.clone()).await;

            let status = response.status();
            let duration_ms = start.elapsed().as_millis() as u64;
            span.record("status", status.as_u16());
            span.record("duration_ms", duration_ms);

            let _enter = span.enter();
            if status.is_client_error() || status.is_server_error() {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    duration_ms = %duration_ms,
                    "Request failed"
                );
            } else {
                tracing::info!(
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    duration_ms = %duration_ms,
                    "Request completed"
                );
            }

            response
        })
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }
}
