//! Mutation plumbing shared by the order/payment/billing sets
//!
//! Duplicate submissions are rejected atomically: a mutation holds an
//! RAII permit for its operation key while running, and a second call
//! with the same key fails with [`ClientError::InFlight`] instead of
//! issuing another network request.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::UNAUTHORIZED_NOTICE;
use crate::notify::{NoticeLevel, Notifier};
use crate::{ClientError, ClientResult};

/// Per-operation idempotency guard
#[derive(Debug, Default)]
pub struct InFlightGuard {
    inflight: DashMap<&'static str, ()>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the permit for `key`, or fail if that operation is
    /// already running. The permit releases on drop, success or error.
    pub fn begin(&self, key: &'static str) -> ClientResult<InFlightPermit<'_>> {
        match self.inflight.entry(key) {
            Entry::Occupied(_) => {
                tracing::debug!(operation = key, "duplicate submission rejected");
                Err(ClientError::InFlight(key))
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightPermit { guard: self, key })
            }
        }
    }

    /// Whether `key` currently holds a permit
    pub fn is_in_flight(&self, key: &'static str) -> bool {
        self.inflight.contains_key(key)
    }
}

/// RAII permit returned by [`InFlightGuard::begin`]
pub struct InFlightPermit<'a> {
    guard: &'a InFlightGuard,
    key: &'static str,
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.guard.inflight.remove(self.key);
    }
}

/// Surface a failed mutation: authorization failures get the canonical
/// notice, everything else the server's message.
pub(crate) fn notify_failure(notifier: &dyn Notifier, err: &ClientError) {
    if err.is_unauthorized() {
        notifier.notify(NoticeLevel::Error, UNAUTHORIZED_NOTICE);
    } else {
        notifier.notify(NoticeLevel::Error, &err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permit_is_exclusive_per_key() {
        let guard = InFlightGuard::new();
        let permit = guard.begin("order.create").unwrap();
        assert!(matches!(
            guard.begin("order.create"),
            Err(ClientError::InFlight("order.create"))
        ));
        // Independent operations are unaffected
        let other = guard.begin("order.update").unwrap();
        drop(other);
        drop(permit);
        assert!(guard.begin("order.create").is_ok());
    }

    #[test]
    fn permit_releases_on_drop() {
        let guard = InFlightGuard::new();
        {
            let _permit = guard.begin("payment.refund").unwrap();
            assert!(guard.is_in_flight("payment.refund"));
        }
        assert!(!guard.is_in_flight("payment.refund"));
    }
}
