//! HTTP API for the working-time engine.
//!
//! Exposes month classification over JSON. The service is stateless apart
//! from the loaded configuration: punches come in with each request.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ClassifyRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
