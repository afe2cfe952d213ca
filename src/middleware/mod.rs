//! Middleware applied around route handlers.

mod layer;
mod tracing_layer;

pub use layer::{BoxedNext, Layer, LayerStack};
pub use tracing_layer::TracingLayer;
