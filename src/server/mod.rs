//! HTTP transport layer — thin glue over the pipeline.

pub mod routes;

pub use routes::{ApiState, api_routes};
