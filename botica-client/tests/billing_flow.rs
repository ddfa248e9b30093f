// Billing composition: selection-driven payload assembly, the
// prescription appointment-binding gate, and selection reset policy.

mod common;

use std::sync::Arc;
use std::time::Duration;

use botica_client::billing::SERVICES_UNBOUND_NOTICE;
use botica_client::{
    BillingMutations, ClientError, NoticeLevel, OrderListQuery, PaymentMethod, ProductPick,
    SelectionAction, ServicePick,
};
use common::{envelope, error_envelope, order_json, MockTransport, RecordingNotifier, Scripted};
use rust_decimal::Decimal;

struct Rig {
    transport: Arc<MockTransport>,
    notifier: Arc<RecordingNotifier>,
    billing: BillingMutations,
}

fn rig() -> Rig {
    let transport = Arc::new(MockTransport::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let query = Arc::new(OrderListQuery::new(transport.clone(), notifier.clone()));
    let billing = BillingMutations::new(transport.clone(), notifier.clone(), query);
    Rig {
        transport,
        notifier,
        billing,
    }
}

fn product_pick(stock_id: &str) -> ProductPick {
    ProductPick {
        stock_id: stock_id.to_string(),
        product_id: format!("prod-{stock_id}"),
        storage_id: "st-1".to_string(),
        quantity: 2,
        unit_price: Decimal::new(2550, 2),
    }
}

fn service_pick(service_id: &str, appointment_id: Option<&str>) -> ServicePick {
    ServicePick {
        service_id: service_id.to_string(),
        quantity: 1,
        appointment_id: appointment_id.map(str::to_string),
    }
}

#[tokio::test]
async fn prescription_with_unbound_services_never_hits_the_network() {
    let r = rig();
    r.billing.services().dispatch(SelectionAction::Append(vec![
        service_pick("svc-1", Some("apt-1")),
        service_pick("svc-2", None),
    ]));

    let dto = r.billing.assemble_prescription(
        "br-1",
        "pat-1",
        "rx-1",
        PaymentMethod::Cash,
        "PEN",
    );
    let result = r.billing.create_prescription(dto).await;

    assert!(matches!(result, Err(ClientError::Precondition(_))));
    assert_eq!(r.transport.call_count(), 0);
    assert_eq!(
        r.notifier.last(),
        Some((NoticeLevel::Error, SERVICES_UNBOUND_NOTICE.to_string()))
    );
}

#[tokio::test]
async fn prescription_with_all_bindings_submits_exactly_once() {
    let r = rig();
    r.billing.services().dispatch(SelectionAction::Append(vec![
        service_pick("svc-1", Some("apt-1")),
        service_pick("svc-2", Some("apt-2")),
    ]));
    r.transport.push(Scripted::Envelope(envelope(
        order_json("ord-7", "MEDICAL_PRESCRIPTION_ORDER", "PENDING"),
        Some("Receta facturada correctamente"),
    )));

    let dto = r.billing.assemble_prescription(
        "br-1",
        "pat-1",
        "rx-1",
        PaymentMethod::Yape,
        "PEN",
    );
    let order = r.billing.create_prescription(dto).await.unwrap();

    assert_eq!(order.id, "ord-7");
    assert_eq!(r.transport.call_count(), 1);
    let call = &r.transport.calls()[0];
    assert_eq!(call.path, "billing/prescription");
    let services = call.body.as_ref().unwrap()["services"].as_array().unwrap().clone();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0]["appointmentId"], "apt-1");
    // Selections clear on success
    assert!(r.billing.services().is_empty());
}

#[tokio::test]
async fn product_sale_success_clears_selections_and_invalidates() {
    let r = rig();
    r.billing
        .products()
        .dispatch(SelectionAction::Append(vec![product_pick("stk-1")]));
    r.transport.push(Scripted::Envelope(envelope(
        order_json("ord-3", "PRODUCT_SALE_ORDER", "PENDING"),
        Some("Venta registrada: ORD-003"),
    )));

    let dto = r
        .billing
        .assemble_product_sale("br-1", "pat-1", PaymentMethod::Cash, "PEN");
    r.billing.create_product_sale(dto).await.unwrap();

    assert_eq!(r.transport.calls()[0].path, "billing/product-sale");
    assert!(r.billing.products().is_empty());
    assert_eq!(
        r.notifier.last(),
        Some((NoticeLevel::Success, "Venta registrada: ORD-003".to_string()))
    );
}

#[tokio::test]
async fn unauthorized_failure_resets_selections_after_grace_delay() {
    let r = rig();
    let billing = r.billing.with_reset_delay(Duration::from_millis(10));
    billing
        .products()
        .dispatch(SelectionAction::Append(vec![product_pick("stk-1")]));
    r.transport.push(Scripted::Envelope(error_envelope("No autorizado", Some(401))));

    let dto = billing.assemble_product_sale("br-1", "pat-1", PaymentMethod::Cash, "PEN");
    let result = billing.create_product_sale(dto).await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));

    // The error renders first; the selection survives the instant after
    assert_eq!(billing.products().len(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(billing.products().is_empty());
}

#[tokio::test]
async fn business_failure_leaves_selections_untouched() {
    let r = rig();
    r.billing
        .products()
        .dispatch(SelectionAction::Append(vec![product_pick("stk-1")]));
    r.transport.push(Scripted::Envelope(error_envelope(
        "Stock insuficiente para prod-stk-1",
        None,
    )));

    let dto = r
        .billing
        .assemble_product_sale("br-1", "pat-1", PaymentMethod::Cash, "PEN");
    let result = r.billing.create_product_sale(dto).await;

    assert!(matches!(result, Err(ClientError::Api(_))));
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(r.billing.products().len(), 1);
}

#[tokio::test]
async fn appointment_billing_posts_service_lines() {
    let r = rig();
    r.billing
        .services()
        .dispatch(SelectionAction::Append(vec![service_pick("svc-9", None)]));
    r.transport.push(Scripted::Envelope(envelope(
        order_json("ord-11", "MEDICAL_APPOINTMENT_ORDER", "PENDING"),
        None,
    )));

    let dto = r.billing.assemble_appointment(
        "br-1",
        "pat-2",
        PaymentMethod::BankTransfer,
        "PEN",
        Some(Decimal::new(20, 0)),
    );
    r.billing.create_appointment(dto).await.unwrap();

    let call = &r.transport.calls()[0];
    assert_eq!(call.path, "billing/medical-appointment");
    assert_eq!(call.body.as_ref().unwrap()["services"][0]["serviceId"], "svc-9");
    assert_eq!(call.body.as_ref().unwrap()["deposit"], 20.0);
}
