//! Data models
//!
//! Shared between the billing backend API and the client. Wire format is
//! JSON with SCREAMING_SNAKE_CASE enum values and camelCase field names,
//! matching the backend contract.

pub mod billing;
pub mod filter;
pub mod order;
pub mod payment;

// Re-exports
pub use billing::*;
pub use filter::*;
pub use order::*;
pub use payment::*;
