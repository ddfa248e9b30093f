//! Botica Client - HTTP client and orchestration for the billing dashboard
//!
//! Wraps the billing backend REST API and carries the client-side state
//! the dashboard needs: the filtered order-list query with its cache,
//! the order/payment/billing mutation sets, and the selection stores
//! used while composing a billing submission.

pub mod billing;
pub mod config;
pub mod error;
pub mod http;
pub mod mutation;
pub mod notify;
pub mod orders;
pub mod payments;
pub mod query;
pub mod selection;

pub use billing::BillingMutations;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, UNAUTHORIZED_NOTICE};
pub use http::{ApiTransport, HttpClient};
pub use mutation::InFlightGuard;
pub use notify::{NoticeLevel, Notifier, TracingNotifier};
pub use orders::OrderMutations;
pub use payments::PaymentMutations;
pub use query::OrderListQuery;
pub use selection::{Keyed, ProductPick, SelectionAction, SelectionStore, ServicePick};

// Re-export shared types for convenience
pub use shared::models::{
    Order, OrderFilter, OrderStatus, OrderType, Payment, PaymentMethod, PaymentStatus, PaymentType,
};
pub use shared::{ApiError, ApiResponse};
