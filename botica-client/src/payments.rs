//! Payment mutation set
//!
//! Process / verify / cancel / reject / refund against a single payment
//! resource. A payment transition changes the owning order's status
//! server-side, so success forces an immediate refetch of the order
//! list, not just an invalidation. The server's success message is
//! surfaced verbatim; the client never computes status transitions.

use std::sync::Arc;

use serde::Serialize;
use shared::models::{
    CancelPayment, Payment, ProcessPayment, RefundPayment, RejectPayment, VerifyPayment,
};
use uuid::Uuid;
use validator::Validate;

use crate::http;
use crate::mutation::{notify_failure, InFlightGuard};
use crate::notify::{NoticeLevel, Notifier};
use crate::query::OrderListQuery;
use crate::{ApiTransport, ClientResult};

pub struct PaymentMutations {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    query: Arc<OrderListQuery>,
    guard: InFlightGuard,
}

impl PaymentMutations {
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

    /// PENDING → PROCESSING, recording method and voucher metadata
    pub async fn process(&self, payment_id: &str, dto: ProcessPayment) -> ClientResult<Payment> {
        self.action("payment.process", payment_id, "process", dto, "Pago en proceso")
            .await
    }

    /// Confirm a processed payment after voucher review
    pub async fn verify(&self, payment_id: &str, dto: VerifyPayment) -> ClientResult<Payment> {
        self.action("payment.verify", payment_id, "verify", dto, "Pago verificado")
            .await
    }

    /// Cancel a payment; terminal negative outcome
    pub async fn cancel(&self, payment_id: &str, dto: CancelPayment) -> ClientResult<Payment> {
        self.action("payment.cancel", payment_id, "cancel", dto, "Pago cancelado")
            .await
    }

    /// Reject a payment that failed verification; terminal
    pub async fn reject(&self, payment_id: &str, dto: RejectPayment) -> ClientResult<Payment> {
        self.action("payment.reject", payment_id, "reject", dto, "Pago rechazado")
            .await
    }

    /// Refund a completed payment. The server appends a REFUND payment
    /// record to the same order; the original payment is untouched.
    pub async fn refund(&self, payment_id: &str, dto: RefundPayment) -> ClientResult<Payment> {
        self.action("payment.refund", payment_id, "refund", dto, "Pago reembolsado")
            .await
    }

    async fn action<D: Serialize + Validate>(
        &self,
        key: &'static str,
        payment_id: &str,
        action: &str,
        dto: D,
        default_notice: &str,
    ) -> ClientResult<Payment> {
        let _permit = self.guard.begin(key)?;
        dto.validate()?;
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self
                .transport
                .post(
                    &format!("payment/{payment_id}/{action}"),
                    serde_json::to_value(&dto)?,
                )
                .await?;
            http::decode::<Payment>(envelope)
        }
        .await;

        match outcome {
            Ok((payment, message)) => {
                // The order status already moved server-side; re-issue
                // the list query instead of waiting for a natural fetch.
                self.query.refetch().await;
                self.notifier
                    .notify(NoticeLevel::Success, message.as_deref().unwrap_or(default_notice));
                tracing::info!(%trace_id, payment_id, order_id = %payment.order_id, action, "payment action applied");
                Ok(payment)
            }
            Err(err) => {
                tracing::warn!(%trace_id, payment_id, action, error = %err, "payment action failed");
                notify_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }
}
