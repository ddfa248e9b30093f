//! Billing composition
//!
//! The three creation flows: product sale, prescription billing and
//! medical-appointment billing. Each assembles its payload from the
//! shared selection stores, submits it as one mutation, and clears the
//! selections on success. On an authorization failure the clear is
//! delayed by a grace period so the error can render before the form
//! resets; other failures leave the selections untouched.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{
    AppointmentBilling, Order, PaymentMethod, PrescriptionBilling, ProductSaleBilling,
};
use uuid::Uuid;
use validator::Validate;

use crate::http;
use crate::mutation::{notify_failure, InFlightGuard};
use crate::notify::{NoticeLevel, Notifier};
use crate::query::OrderListQuery;
use crate::selection::{ProductPick, SelectionAction, SelectionStore, ServicePick};
use crate::{ApiTransport, ClientError, ClientResult};

/// Notice when prescription services are submitted without all their
/// appointment bindings in place
pub const SERVICES_UNBOUND_NOTICE: &str =
    "Cada servicio seleccionado debe tener una cita vinculada.";

pub struct BillingMutations {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    query: Arc<OrderListQuery>,
    products: Arc<SelectionStore<ProductPick>>,
    services: Arc<SelectionStore<ServicePick>>,
    guard: InFlightGuard,
    reset_delay: Duration,
}

impl BillingMutations {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
        query: Arc<OrderListQuery>,
    ) -> Self {
        Self {
            transport,
            notifier,
            query,
            products: Arc::new(SelectionStore::new()),
            services: Arc::new(SelectionStore::new()),
            guard: InFlightGuard::new(),
            reset_delay: Duration::from_secs(1),
        }
    }

    /// Grace period before selections reset after an authorization
    /// failure (tests shorten it)
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Product selection shared with the picker dialogs
    pub fn products(&self) -> Arc<SelectionStore<ProductPick>> {
        Arc::clone(&self.products)
    }

    /// Service selection shared with the scheduling dialogs
    pub fn services(&self) -> Arc<SelectionStore<ServicePick>> {
        Arc::clone(&self.services)
    }

    /// Build a product-sale payload from the current product selection
    pub fn assemble_product_sale(
        &self,
        branch_id: impl Into<String>,
        patient_id: impl Into<String>,
        payment_method: PaymentMethod,
        currency: impl Into<String>,
    ) -> ProductSaleBilling {
        ProductSaleBilling {
            branch_id: branch_id.into(),
            patient_id: patient_id.into(),
            payment_method,
            currency: currency.into(),
            products: self.products.items().iter().map(Into::into).collect(),
            notes: None,
        }
    }

    /// Build a prescription payload from both selections
    pub fn assemble_prescription(
        &self,
        branch_id: impl Into<String>,
        patient_id: impl Into<String>,
        prescription_id: impl Into<String>,
        payment_method: PaymentMethod,
        currency: impl Into<String>,
    ) -> PrescriptionBilling {
        PrescriptionBilling {
            branch_id: branch_id.into(),
            patient_id: patient_id.into(),
            prescription_id: prescription_id.into(),
            payment_method,
            currency: currency.into(),
            products: self.products.items().iter().map(Into::into).collect(),
            services: self.services.items().iter().map(Into::into).collect(),
            notes: None,
        }
    }

    /// Build an appointment payload from the service selection
    pub fn assemble_appointment(
        &self,
        branch_id: impl Into<String>,
        patient_id: impl Into<String>,
        payment_method: PaymentMethod,
        currency: impl Into<String>,
        deposit: Option<Decimal>,
    ) -> AppointmentBilling {
        AppointmentBilling {
            branch_id: branch_id.into(),
            patient_id: patient_id.into(),
            payment_method,
            currency: currency.into(),
            services: self.services.items().iter().map(Into::into).collect(),
            deposit,
            notes: None,
        }
    }

    /// Create a product-sale order
    pub async fn create_product_sale(&self, dto: ProductSaleBilling) -> ClientResult<Order> {
        let _permit = self.guard.begin("billing.product_sale")?;
        dto.validate()?;
        self.submit("product-sale", serde_json::to_value(&dto)?, "Venta registrada")
            .await
    }

    /// Create a prescription-billing order.
    ///
    /// Gated locally: every selected service must carry an appointment
    /// binding before anything goes over the wire. This is the one
    /// client-side validation that blocks a network call.
    pub async fn create_prescription(&self, dto: PrescriptionBilling) -> ClientResult<Order> {
        let _permit = self.guard.begin("billing.prescription")?;

        let picks = self.services.items();
        let bound = picks.iter().filter(|pick| pick.is_bound()).count();
        if bound != picks.len() {
            tracing::debug!(selected = picks.len(), bound, "prescription submit blocked");
            self.notifier.notify(NoticeLevel::Error, SERVICES_UNBOUND_NOTICE);
            return Err(ClientError::Precondition(SERVICES_UNBOUND_NOTICE.to_string()));
        }

        dto.validate()?;
        self.submit("prescription", serde_json::to_value(&dto)?, "Receta facturada")
            .await
    }

    /// Create a medical-appointment order
    pub async fn create_appointment(&self, dto: AppointmentBilling) -> ClientResult<Order> {
        let _permit = self.guard.begin("billing.appointment")?;
        dto.validate()?;
        self.submit("medical-appointment", serde_json::to_value(&dto)?, "Cita registrada")
            .await
    }

    async fn submit(&self, kind: &str, body: Value, default_notice: &str) -> ClientResult<Order> {
        let trace_id = Uuid::new_v4();

        let outcome = async {
            let envelope = self.transport.post(&format!("billing/{kind}"), body).await?;
            http::decode::<Order>(envelope)
        }
        .await;

        match outcome {
            Ok((order, message)) => {
                self.query.invalidate().await;
                self.notifier
                    .notify(NoticeLevel::Success, message.as_deref().unwrap_or(default_notice));
                self.clear_selections();
                tracing::info!(%trace_id, kind, order_id = %order.id, "billing order created");
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(%trace_id, kind, error = %err, "billing submit failed");
                notify_failure(self.notifier.as_ref(), &err);
                if err.is_unauthorized() {
                    // Let the error render before the form empties
                    self.schedule_reset();
                }
                Err(err)
            }
        }
    }

    fn clear_selections(&self) {
        self.products.dispatch(SelectionAction::Clear);
        self.services.dispatch(SelectionAction::Clear);
    }

    fn schedule_reset(&self) {
        let products = Arc::clone(&self.products);
        let services = Arc::clone(&self.services);
        let delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            products.dispatch(SelectionAction::Clear);
            services.dispatch(SelectionAction::Clear);
        });
    }
}
