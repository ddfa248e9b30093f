//! Billing composition payloads
//!
//! DTOs for the three billing flows: product sale, prescription billing
//! and medical-appointment billing. Each aggregates the line items the
//! operator selected in the dashboard before submission.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::payment::PaymentMethod;

/// Product line item (stock-backed)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    /// Warehouse the stock is drawn from
    #[validate(length(min = 1))]
    pub storage_id: String,
}

/// Service line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    #[validate(length(min = 1))]
    pub service_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    /// Linked appointment; required for prescription billing, where the
    /// appointment must already exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
}

/// Product sale billing payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductSaleBilling {
    #[validate(length(min = 1))]
    pub branch_id: String,
    #[validate(length(min = 1))]
    pub patient_id: String,
    pub payment_method: PaymentMethod,
    pub currency: String,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub products: Vec<ProductLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Prescription billing payload (products and/or appointment-bound services)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionBilling {
    #[validate(length(min = 1))]
    pub branch_id: String,
    #[validate(length(min = 1))]
    pub patient_id: String,
    #[validate(length(min = 1))]
    pub prescription_id: String,
    pub payment_method: PaymentMethod,
    pub currency: String,
    #[validate(nested)]
    pub products: Vec<ProductLine>,
    #[validate(nested)]
    pub services: Vec<ServiceLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Medical-appointment billing payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentBilling {
    #[validate(length(min = 1))]
    pub branch_id: String,
    #[validate(length(min = 1))]
    pub patient_id: String,
    pub payment_method: PaymentMethod,
    pub currency: String,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub services: Vec<ServiceLine>,
    /// Amount paid up front, when the appointment is part-paid on booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
