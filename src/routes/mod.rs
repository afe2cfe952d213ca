//! Route handlers and application wiring.

pub mod courses;
pub mod students;
pub mod system;

use crate::app::App;
use crate::middleware::TracingLayer;
use crate::router::{get, Router};
use crate::store::AppState;

/// All resource routes mounted under the API prefix.
pub fn api_routes() -> Router {
    students::routes().merge(courses::routes())
}

/// Build the complete application: state, access logging, system routes
/// and the versioned API.
pub fn build(state: AppState) -> App {
    App::new()
        .state(state)
        .layer(TracingLayer::new())
        .route("/", get(system::health))
        .route("/me", get(system::me))
        .nest("/api/v2", api_routes())
}
