//! Shared types for the Botica billing dashboard
//!
//! Domain models, request/response DTOs and the API response envelope
//! used by botica-client when talking to the billing backend.

pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use response::{ApiError, ApiResponse};
