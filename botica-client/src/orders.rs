//! Order mutation set
//!
//! Create / update / archive / reactivate / submit-draft operations.
//! Every operation: rejects duplicates via the in-flight guard,
//! normalizes `{error}` envelopes into the error channel, invalidates
//! the order-list query on success, and notifies the outcome.

use std::sync::Arc;

use serde_json::json;
use shared::models::{Order, OrderBatch, OrderCreate, OrderUpdate};
use uuid::Uuid;
use validator::Validate;

use crate::http;
use crate::mutation::{notify_failure, InFlightGuard};
use crate::notify::{NoticeLevel, Notifier};
use crate::query::OrderListQuery;
use crate::{ApiTransport, ClientResult};

pub struct OrderMutations {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    query: Arc<OrderListQuery>,
    guard: InFlightGuard,
}

impl OrderMutations {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
        query: Arc<OrderListQuery>,
    ) -> Self {
        Self {
            transport,
            notifier,
            query,
            guard: InFlightGuard::new(),
        }
    }

    /// Create a new order (DRAFT or PENDING, decided server-side)
    pub async fn create(&self, dto: OrderCreate) -> ClientResult<Order> {
        let _permit = self.guard.begin("order.create")?;
        dto.validate()?;
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self.transport.post("order", serde_json::to_value(&dto)?).await?;
            http::decode::<Order>(envelope)
        }
        .await;

        match outcome {
            Ok((order, message)) => {
                self.query.invalidate().await;
                self.notifier.notify(
                    NoticeLevel::Success,
                    message.as_deref().unwrap_or("Orden creada correctamente"),
                );
                tracing::info!(%trace_id, order_id = %order.id, "order created");
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(%trace_id, error = %err, "order create failed");
                notify_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }

    /// Patch an existing order
    pub async fn update(&self, order_id: &str, dto: OrderUpdate) -> ClientResult<Order> {
        let _permit = self.guard.begin("order.update")?;
        dto.validate()?;
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self
                .transport
                .patch(&format!("order/{order_id}"), serde_json::to_value(&dto)?)
                .await?;
            http::decode::<Order>(envelope)
        }
        .await;

        match outcome {
            Ok((order, message)) => {
                self.query.invalidate().await;
                self.notifier.notify(
                    NoticeLevel::Success,
                    message.as_deref().unwrap_or("Orden actualizada correctamente"),
                );
                tracing::info!(%trace_id, order_id = %order.id, "order updated");
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(%trace_id, order_id, error = %err, "order update failed");
                notify_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }

    /// Archive orders (soft delete; `isActive` flips to false)
    pub async fn archive(&self, batch: OrderBatch) -> ClientResult<usize> {
        let _permit = self.guard.begin("order.archive")?;
        batch.validate()?;
        let count = batch.ids.len();
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self.transport.delete("order", serde_json::to_value(&batch)?).await?;
            http::acknowledge(envelope)
        }
        .await;

        match outcome {
            Ok(_message) => {
                self.query.invalidate().await;
                self.notifier
                    .notify(NoticeLevel::Success, &pluralize(count, "archivada", "archivadas"));
                tracing::info!(%trace_id, count, "orders archived");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(%trace_id, count, error = %err, "order archive failed");
                notify_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }

    /// Reactivate previously archived orders
    pub async fn reactivate(&self, batch: OrderBatch) -> ClientResult<usize> {
        let _permit = self.guard.begin("order.reactivate")?;
        batch.validate()?;
        let count = batch.ids.len();
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self
                .transport
                .post("order/reactivate", serde_json::to_value(&batch)?)
                .await?;
            http::acknowledge(envelope)
        }
        .await;

        match outcome {
            Ok(_message) => {
                self.query.invalidate().await;
                self.notifier.notify(
                    NoticeLevel::Success,
                    &pluralize(count, "reactivada", "reactivadas"),
                );
                tracing::info!(%trace_id, count, "orders reactivated");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(%trace_id, count, error = %err, "order reactivate failed");
                notify_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }

    /// Submit a DRAFT order; the server moves it to PENDING
    pub async fn submit_draft(&self, order_id: &str) -> ClientResult<Order> {
        let _permit = self.guard.begin("order.submit_draft")?;
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self
                .transport
                .post(&format!("order/{order_id}/submit"), json!({}))
                .await?;
            http::decode::<Order>(envelope)
        }
        .await;

        match outcome {
            Ok((order, message)) => {
                self.query.invalidate().await;
                self.notifier.notify(
                    NoticeLevel::Success,
                    message.as_deref().unwrap_or("Orden enviada correctamente"),
                );
                tracing::info!(%trace_id, order_id = %order.id, status = %order.status, "draft submitted");
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(%trace_id, order_id, error = %err, "draft submit failed");
                notify_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 orden {singular}")
    } else {
        format!("{count} órdenes {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::pluralize;

    #[test]
    fn pluralizes_by_count() {
        assert_eq!(pluralize(1, "archivada", "archivadas"), "1 orden archivada");
        assert_eq!(pluralize(3, "archivada", "archivadas"), "3 órdenes archivadas");
    }
}
