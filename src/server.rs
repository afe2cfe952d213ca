//! HTTP server loop.

use crate::error::ApiError;
use crate::middleware::{BoxedNext, LayerStack};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::{RouteMatch, RouteTable};
use http::{header, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub(crate) struct Server {
    table: Arc<RouteTable>,
    layers: Arc<LayerStack>,
}

impl Server {
    pub(crate) fn new(table: RouteTable, layers: LayerStack) -> Self {
        Self {
            table: Arc::new(table),
            layers: Arc::new(layers),
        }
    }

    /// Accept connections forever, serving each over HTTP/1.
    pub(crate) async fn run(
        self,
        addr: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Server running on http://{addr}");

        loop {
            let (stream, _remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let table = self.table.clone();
            let layers = self.layers.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<Incoming>| {
                    let table = table.clone();
                    let layers = layers.clone();
                    async move {
                        Ok::<_, Infallible>(handle_request(table, layers, req).await)
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("connection error: {err}");
                }
            });
        }
    }
}

/// Dispatch a single request: match the route, collect the body, run the
/// middleware chain and the handler.
pub(crate) async fn handle_request(
    table: Arc<RouteTable>,
    layers: Arc<LayerStack>,
    req: hyper::Request<Incoming>,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let (parts, body) = req.into_parts();

    let (handler, params) = match table.match_route(&path, &method) {
        RouteMatch::Found { handler, params } => (handler.clone(), params),
        RouteMatch::NotFound => {
            return ApiError::not_found(format!("No route found for {method} {path}"))
                .into_response();
        }
        RouteMatch::MethodNotAllowed { allowed } => {
            let allowed: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
            let mut response = ApiError::new(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Method {method} not allowed for {path}"),
            )
            .into_response();
            if let Ok(value) = allowed.join(", ").parse() {
                response.headers_mut().insert(header::ALLOW, value);
            }
            return response;
        }
    };

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => return ApiError::internal(err).into_response(),
    };

    let request = Request::new(parts, body, table.state(), params);

    let final_handler: BoxedNext = Arc::new(move |req: Request| {
        let handler = handler.clone();
        Box::pin(async move { handler(req).await })
            as std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send + 'static>>
    });

    layers.execute(request, final_handler).await
}
