//! # enroll-api
//!
//! Student and course enrollment REST API backed by an in-memory registry.
//!
//! The crate is split into a small HTTP kernel (router, extractors,
//! middleware, server loop) and the service itself (models, validation,
//! repository, route handlers). [`routes::build`] wires the whole
//! application together.

pub mod app;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
mod server;
pub mod store;
pub mod test_client;
pub mod validate;

pub use app::App;
pub use error::{ApiError, Result};
pub use extract::{Json, Path, Query, State, ValidatedJson};
pub use middleware::TracingLayer;
pub use request::Request;
pub use response::{IntoResponse, Reply, Response};
pub use router::{delete, get, post, put, MethodRouter, Router};
pub use store::{AppState, CourseRepository, MemoryRegistry, RepoError, StudentRepository};
pub use test_client::{TestClient, TestRequest, TestResponse};
