//! Request wrapper handed to extractors and handlers.

use bytes::Bytes;
use http::{request::Parts, Extensions, HeaderMap, Method, Uri};
use std::collections::HashMap;
use std::sync::Arc;

/// An incoming HTTP request with its body already collected.
pub struct Request {
    pub(crate) parts: Parts,
    pub(crate) body: Option<Bytes>,
    pub(crate) state: Arc<Extensions>,
    pub(crate) path_params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        parts: Parts,
        body: Bytes,
        state: Arc<Extensions>,
        path_params: HashMap<String, String>,
    ) -> Self {
        Self {
            parts,
            body: Some(body),
            state,
            path_params,
        }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    /// Request URI.
    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Request path.
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Raw query string, if any.
    pub fn query_string(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    /// Take the body bytes (can only be taken once).
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }

    /// Parameters captured from the route pattern.
    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    /// Shared application state.
    pub fn state(&self) -> &Arc<Extensions> {
        &self.state
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.parts.method)
            .field("uri", &self.parts.uri)
            .finish()
    }
}
