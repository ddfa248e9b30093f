//! Selection stores
//!
//! Transient client-held line-item selections shared across the
//! composing dialogs. An explicit reducer-backed store, not a
//! data-fetching cache misused as a state bus: tagged actions go
//! through [`reduce`], and the store only wraps that behind a mutex.
//! Nothing here is persisted.

use std::sync::Mutex;

use rust_decimal::Decimal;
use shared::models::{ProductLine, ServiceLine};

/// Items addressable by a stable key within a selection
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Tagged selection actions
#[derive(Debug, Clone)]
pub enum SelectionAction<T> {
    /// Merge new items, skipping any whose key already exists
    Append(Vec<T>),
    /// Wholesale substitution
    Replace(Vec<T>),
    /// Drop the item with this key
    Remove(String),
    /// Empty the selection
    Clear,
}

/// Pure reducer over a selection
pub fn reduce<T: Keyed>(current: &mut Vec<T>, action: SelectionAction<T>) {
    match action {
        SelectionAction::Append(items) => {
            for item in items {
                if !current.iter().any(|existing| existing.key() == item.key()) {
                    current.push(item);
                }
            }
        }
        SelectionAction::Replace(items) => *current = items,
        SelectionAction::Remove(key) => current.retain(|item| item.key() != key),
        SelectionAction::Clear => current.clear(),
    }
}

/// Shared selection state, dispatched to from sibling dialogs
#[derive(Debug, Default)]
pub struct SelectionStore<T> {
    items: Mutex<Vec<T>>,
}

impl<T: Keyed + Clone> SelectionStore<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatch(&self, action: SelectionAction<T>) {
        let mut items = self.items.lock().expect("selection store poisoned");
        reduce(&mut items, action);
    }

    /// Snapshot of the current selection
    pub fn items(&self) -> Vec<T> {
        self.items.lock().expect("selection store poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("selection store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A chosen product-stock row
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPick {
    /// Stock row identity; selection key
    pub stock_id: String,
    pub product_id: String,
    pub storage_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl Keyed for ProductPick {
    fn key(&self) -> &str {
        &self.stock_id
    }
}

impl From<&ProductPick> for ProductLine {
    fn from(pick: &ProductPick) -> Self {
        ProductLine {
            product_id: pick.product_id.clone(),
            quantity: pick.quantity,
            storage_id: pick.storage_id.clone(),
        }
    }
}

/// A chosen service, optionally bound to an existing appointment
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePick {
    /// Selection key
    pub service_id: String,
    pub quantity: u32,
    pub appointment_id: Option<String>,
}

impl ServicePick {
    /// Whether this pick carries an appointment binding
    pub fn is_bound(&self) -> bool {
        self.appointment_id.is_some()
    }
}

impl Keyed for ServicePick {
    fn key(&self) -> &str {
        &self.service_id
    }
}

impl From<&ServicePick> for ServiceLine {
    fn from(pick: &ServicePick) -> Self {
        ServiceLine {
            service_id: pick.service_id.clone(),
            quantity: pick.quantity,
            appointment_id: pick.appointment_id.clone(),
        }
    }
}
