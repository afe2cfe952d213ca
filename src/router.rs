//! Radix-tree routing built on matchit.
//!
//! Routes are registered with `{param}` path patterns and an HTTP method
//! handler, and can be grouped into sub-routers mounted under a prefix:
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/students", get(list_students).post(create_student))
//!     .route("/students/{studentId}", get(get_student))
//! ```

use crate::handler::{into_boxed_handler, BoxedHandler, Handler};
use http::{Extensions, Method};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Handlers registered for a single path, keyed by HTTP method.
#[derive(Clone, Default)]
pub struct MethodRouter {
    handlers: HashMap<Method, BoxedHandler>,
}

impl MethodRouter {
    pub fn new() -> Self {
        Self::default()
    }

    fn on(mut self, method: Method, handler: BoxedHandler) -> Self {
        if self.handlers.insert(method.clone(), handler).is_some() {
            panic!("duplicate handler for method {method} on the same path");
        }
        self
    }

    /// Chain a GET handler onto this path.
    pub fn get<H, T>(self, handler: H) -> Self
    where
        H: Handler<T>,
        T: 'static,
    {
        self.on(Method::GET, into_boxed_handler(handler))
    }

    /// Chain a POST handler onto this path.
    pub fn post<H, T>(self, handler: H) -> Self
    where
        H: Handler<T>,
        T: 'static,
    {
        self.on(Method::POST, into_boxed_handler(handler))
    }

    /// Chain a PUT handler onto this path.
    pub fn put<H, T>(self, handler: H) -> Self
    where
        H: Handler<T>,
        T: 'static,
    {
        self.on(Method::PUT, into_boxed_handler(handler))
    }

    /// Chain a DELETE handler onto this path.
    pub fn delete<H, T>(self, handler: H) -> Self
    where
        H: Handler<T>,
        T: 'static,
    {
        self.on(Method::DELETE, into_boxed_handler(handler))
    }

    pub(crate) fn get_handler(&self, method: &Method) -> Option<&BoxedHandler> {
        self.handlers.get(method)
    }

    pub(crate) fn allowed_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    fn merge(&mut self, other: MethodRouter) {
        for (method, handler) in other.handlers {
            if self.handlers.insert(method.clone(), handler).is_some() {
                panic!("duplicate handler for method {method} on the same path");
            }
        }
    }
}

/// Create a [`MethodRouter`] with a GET handler.
pub fn get<H, T>(handler: H) -> MethodRouter
where
    H: Handler<T>,
    T: 'static,
{
    MethodRouter::new().get(handler)
}

/// Create a [`MethodRouter`] with a POST handler.
pub fn post<H, T>(handler: H) -> MethodRouter
where
    H: Handler<T>,
    T: 'static,
{
    MethodRouter::new().post(handler)
}

/// Create a [`MethodRouter`] with a PUT handler.
pub fn put<H, T>(handler: H) -> MethodRouter
where
    H: Handler<T>,
    T: 'static,
{
    MethodRouter::new().put(handler)
}

/// Create a [`MethodRouter`] with a DELETE handler.
pub fn delete<H, T>(handler: H) -> MethodRouter
where
    H: Handler<T>,
    T: 'static,
{
    MethodRouter::new().delete(handler)
}

/// Collection of path patterns and their method handlers.
#[derive(Clone, Default)]
pub struct Router {
    routes: BTreeMap<String, MethodRouter>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path pattern with its method handlers. Registering the
    /// same path twice merges the method sets.
    pub fn route(mut self, path: &str, method_router: MethodRouter) -> Self {
        self.add(path.to_string(), method_router);
        self
    }

    /// Merge all routes from another router.
    pub fn merge(mut self, other: Router) -> Self {
        for (path, method_router) in other.routes {
            self.add(path, method_router);
        }
        self
    }

    /// Mount another router's routes under a path prefix.
    pub fn nest(mut self, prefix: &str, other: Router) -> Self {
        let prefix = prefix.trim_end_matches('/');
        for (path, method_router) in other.routes {
            let nested = if path == "/" {
                prefix.to_string()
            } else {
                format!("{prefix}{path}")
            };
            self.add(nested, method_router);
        }
        self
    }

    fn add(&mut self, path: String, method_router: MethodRouter) {
        match self.routes.get_mut(&path) {
            Some(existing) => existing.merge(method_router),
            None => {
                self.routes.insert(path, method_router);
            }
        }
    }

    pub(crate) fn into_table(self, state: Arc<Extensions>) -> RouteTable {
        let mut inner = matchit::Router::new();
        for (path, method_router) in self.routes {
            inner
                .insert(to_matchit(&path), method_router)
                .unwrap_or_else(|err| panic!("route conflict at {path}: {err}"));
        }
        RouteTable { inner, state }
    }
}

/// matchit 0.7 uses `:param` capture syntax; the public API keeps `{param}`.
fn to_matchit(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for segment in path.split('/') {
        if let Some(name) = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            out.push(':');
            out.push_str(name);
        } else {
            out.push_str(segment);
        }
        out.push('/');
    }
    out.pop();
    out
}

/// Built route table used by the server and the test client.
pub(crate) struct RouteTable {
    inner: matchit::Router<MethodRouter>,
    state: Arc<Extensions>,
}

pub(crate) enum RouteMatch<'a> {
    Found {
        handler: &'a BoxedHandler,
        params: HashMap<String, String>,
    },
    NotFound,
    MethodNotAllowed {
        allowed: Vec<Method>,
    },
}

impl RouteTable {
    pub(crate) fn match_route(&self, path: &str, method: &Method) -> RouteMatch<'_> {
        match self.inner.at(path) {
            Ok(matched) => {
                let params: HashMap<String, String> = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                match matched.value.get_handler(method) {
                    Some(handler) => RouteMatch::Found { handler, params },
                    None => RouteMatch::MethodNotAllowed {
                        allowed: matched.value.allowed_methods(),
                    },
                }
            }
            Err(_) => RouteMatch::NotFound,
        }
    }

    pub(crate) fn state(&self) -> Arc<Extensions> {
        self.state.clone()
    }
}
