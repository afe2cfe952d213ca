//! In-process test client.
//!
//! Sends simulated requests through the full routing and middleware
//! pipeline without binding a socket.
//!
//! ```rust,ignore
//! let client = TestClient::new(routes::build(state));
//! let response = client.get("/api/v2/students").await;
//! assert_eq!(response.status(), 200);
//! ```

use crate::app::App;
use crate::error::ApiError;
use crate::middleware::{BoxedNext, LayerStack};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::{RouteMatch, RouteTable};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::BodyExt;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Test client wrapping a built [`App`].
pub struct TestClient {
    table: Arc<RouteTable>,
    layers: Arc<LayerStack>,
}

impl TestClient {
    pub fn new(app: App) -> Self {
        let (table, layers) = app.into_parts();
        Self {
            table: Arc::new(table),
            layers: Arc::new(layers),
        }
    }

    /// Send a GET request. The path may carry a query string.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(TestRequest::get(path)).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.request(TestRequest::post(path).json(body)).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.request(TestRequest::put(path).json(body)).await
    }

    /// Send a DELETE request with a JSON body.
    pub async fn delete_json<T: Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.request(TestRequest::delete(path).json(body)).await
    }

    /// Send a request with full control over method, headers and body.
    pub async fn request(&self, req: TestRequest) -> TestResponse {
        let uri: http::Uri = req.path.parse().unwrap_or_else(|_| "/".parse().unwrap());

        let (handler, params) = match self.table.match_route(uri.path(), &req.method) {
            RouteMatch::Found { handler, params } => (handler.clone(), params),
            RouteMatch::NotFound => {
                let response =
                    ApiError::not_found(format!("No route found for {} {}", req.method, req.path))
                        .into_response();
                return TestResponse::from_response(response).await;
            }
            RouteMatch::MethodNotAllowed { allowed } => {
                let allowed: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
                let mut response = ApiError::new(
                    StatusCode::METHOD_NOT_ALLOWED,
                    format!("Method {} not allowed for {}", req.method, req.path),
                )
                .into_response();
                if let Ok(value) = allowed.join(", ").parse() {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                return TestResponse::from_response(response).await;
            }
        };

        let mut builder = http::Request::builder().method(req.method.clone()).uri(uri);
        for (key, value) in req.headers.iter() {
            builder = builder.header(key, value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();

        let request = Request::new(
            parts,
            req.body.unwrap_or_default(),
            self.table.state(),
            params,
        );

        let final_handler: BoxedNext = Arc::new(move |req: Request| {
            let handler = handler.clone();
            Box::pin(async move { handler(req).await })
                as std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send + 'static>>
        });

        let response = self.layers.execute(request, final_handler).await;
        TestResponse::from_response(response).await
    }
}

/// Builder for a simulated request.
#[derive(Debug, Clone)]
pub struct TestRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl TestRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a header.
    pub fn header(mut self, key: &str, value: &str) -> Self {
        if let (Ok(name), Ok(val)) = (
            key.parse::<http::header::HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, val);
        }
        self
    }

    /// Set a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Some(Bytes::from(serde_json::to_vec(body).unwrap()));
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self
    }
}

/// A captured response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response status as a bare u16.
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// A response header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|err| {
            panic!(
                "response body is not valid JSON ({err}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// Body as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
