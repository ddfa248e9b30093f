// botica-client/examples/list_orders.rs
// List pending orders against a running billing backend.

use std::sync::Arc;

use anyhow::Result;
use botica_client::{ClientConfig, OrderFilter, OrderListQuery, OrderStatus, TracingNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("BOTICA_API_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string());
    let mut config = ClientConfig::new(&base_url);
    if let Ok(token) = std::env::var("BOTICA_API_TOKEN") {
        config = config.with_token(token);
    }

    let transport = Arc::new(config.build_http_client());
    let query = OrderListQuery::new(transport, Arc::new(TracingNotifier));

    query
        .set_filter(OrderFilter::ByStatus(OrderStatus::Pending))
        .await;
    let orders = query.fetch().await;

    tracing::info!(count = orders.len(), "pending orders");
    for order in &orders {
        tracing::info!(
            id = %order.id,
            code = order.code.as_deref().unwrap_or("-"),
            order_type = %order.order_type,
            total = %order.total,
            currency = %order.currency,
            "order"
        );
    }

    Ok(())
}
