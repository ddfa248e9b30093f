//! Order list filter
//!
//! Client-side discriminant selecting which backend query the order
//! list issues. Ephemeral; never persisted.

use super::order::{OrderStatus, OrderType};

/// Which slice of the order list to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    ByStatus(OrderStatus),
    ByType(OrderType),
    ByStatusAndType {
        status: OrderStatus,
        order_type: OrderType,
    },
}

impl OrderFilter {
    /// Backend endpoint for this filter. The match is exhaustive on
    /// purpose; adding a variant must force a dispatch decision here.
    pub fn endpoint(&self) -> String {
        match self {
            OrderFilter::All => "order".to_string(),
            OrderFilter::ByStatus(status) => format!("order/status/{}", status.as_str()),
            OrderFilter::ByType(order_type) => format!("order/type/{}", order_type.as_str()),
            OrderFilter::ByStatusAndType { status, order_type } => {
                format!("order/{}/status/{}", order_type.as_str(), status.as_str())
            }
        }
    }
}
