//! Middleware chain infrastructure.

use crate::request::Request;
use crate::response::Response;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The continuation of a middleware chain.
pub type BoxedNext =
    Arc<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send + 'static>> + Send + Sync>;

/// A middleware layer wrapping the rest of the chain.
pub trait Layer: Send + Sync + 'static {
    /// Handle the request, calling `next` to continue the chain.
    fn call(
        &self,
        req: Request,
        next: BoxedNext,
    ) -> Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

    fn clone_box(&self) -> Box<dyn Layer>;
}

impl Clone for Box<dyn Layer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An ordered stack of middleware layers, executed outermost-first.
#[derive(Clone, Default)]
pub struct LayerStack {
    layers: Vec<Box<dyn Layer>>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer to the stack. Layers run in the order they are added.
    pub fn push(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    /// Run the request through every layer and finally the handler.
    pub fn execute(
        &self,
        req: Request,
        handler: BoxedNext,
    ) -> Pin<Box<dyn Future<Output = Response> + Send + 'static>> {
        if self.layers.is_empty() {
            return handler(req);
        }

        // Build the chain from the inside out so the first layer added is
        // the first to see the request.
        let mut next = handler;
        for layer in self.layers.iter().rev() {
            let layer = layer.clone_box();
            let inner = next;
            next = Arc::new(move |req: Request| {
                let layer = layer.clone_box();
                let inner = inner.clone();
                Box::pin(async move { layer.call(req, inner).await })
                    as Pin<Box<dyn Future<Output = Response> + Send + 'static>>
            });
        }

        next(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Extensions, Method, StatusCode};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn test_request(method: Method, path: &str) -> Request {
        let uri: http::Uri = path.parse().unwrap();
        let req = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap();
        let (parts, _) = req.into_parts();
        Request::new(parts, Bytes::new(), Arc::new(Extensions::new()), HashMap::new())
    }

    fn ok_handler() -> BoxedNext {
        Arc::new(|_req| {
            Box::pin(async {
                http::Response::builder()
                    .status(StatusCode::OK)
                    .body(http_body_util::Full::new(Bytes::from("ok")))
                    .unwrap()
            })
        })
    }

    #[derive(Clone)]
    struct Recorder {
        id: usize,
        seen: Arc<Mutex<Vec<(usize, &'static str)>>>,
    }

    impl Layer for Recorder {
        fn call(
            &self,
            req: Request,
            next: BoxedNext,
        ) -> Pin<Box<dyn Future<Output = Response> + Send + 'static>> {
            let id = self.id;
            let seen = self.seen.clone();
            Box::pin(async move {
                seen.lock().unwrap().push((id, "pre"));
                let response = next(req).await;
                seen.lock().unwrap().push((id, "post"));
                response
            })
        }

        fn clone_box(&self) -> Box<dyn Layer> {
            Box::new(self.clone())
        }
    }

    #[tokio::test]
    async fn empty_stack_calls_handler_directly() {
        let stack = LayerStack::new();
        let response = stack
            .execute(test_request(Method::GET, "/"), ok_handler())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn layers_wrap_outermost_first() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push(Box::new(Recorder { id: 0, seen: seen.clone() }));
        stack.push(Box::new(Recorder { id: 1, seen: seen.clone() }));

        stack
            .execute(test_request(Method::GET, "/"), ok_handler())
            .await;

        let order = seen.lock().unwrap();
        assert_eq!(*order, vec![(0, "pre"), (1, "pre"), (1, "post"), (0, "post")]);
    }
}
