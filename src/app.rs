//! Application builder.

use crate::middleware::{Layer, LayerStack};
use crate::router::{MethodRouter, RouteTable, Router};
use crate::server::Server;
use http::Extensions;
use std::sync::Arc;

/// Builder wiring state, middleware and routes into a runnable server.
///
/// ```rust,ignore
/// App::new()
///     .state(app_state)
///     .layer(TracingLayer::new())
///     .route("/", get(health))
///     .nest("/api/v2", api_routes())
///     .run("127.0.0.1:3000")
///     .await
/// ```
#[derive(Default)]
pub struct App {
    router: Router,
    layers: LayerStack,
    state: Arc<Extensions>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register shared state, retrievable in handlers via `State<S>`.
    pub fn state<S: Clone + Send + Sync + 'static>(mut self, state: S) -> Self {
        Arc::make_mut(&mut self.state).insert(state);
        self
    }

    /// Add a middleware layer. Layers run in registration order.
    pub fn layer<L: Layer>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Register a route.
    pub fn route(mut self, path: &str, method_router: MethodRouter) -> Self {
        self.router = self.router.route(path, method_router);
        self
    }

    /// Mount a sub-router under a path prefix.
    pub fn nest(mut self, prefix: &str, router: Router) -> Self {
        self.router = self.router.nest(prefix, router);
        self
    }

    /// Bind and serve forever.
    pub async fn run(self, addr: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (table, layers) = self.into_parts();
        Server::new(table, layers).run(addr).await
    }

    pub(crate) fn into_parts(self) -> (RouteTable, LayerStack) {
        (self.router.into_table(self.state), self.layers)
    }
}
