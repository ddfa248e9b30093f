//! Unified order-list query
//!
//! One cache slot backs the whole order list; the active [`OrderFilter`]
//! decides which backend endpoint fills it. Mutations invalidate (or
//! force-refetch) the slot and the list re-renders from server state.
//!
//! List failures degrade to an empty page instead of erroring the
//! query; the failure surfaces only through the notifier. The degraded
//! result is never cached as fresh, so the next fetch retries.

use std::sync::Arc;

use shared::models::{Order, OrderFilter};
use tokio::sync::RwLock;

use crate::error::UNAUTHORIZED_NOTICE;
use crate::http;
use crate::notify::{NoticeLevel, Notifier};
use crate::ApiTransport;

/// User-facing notice for a degraded list fetch
pub const FETCH_FAILED_NOTICE: &str = "No se pudieron cargar las órdenes.";

/// Initialization phase of the query.
///
/// The first `set_filter` after construction mirrors the list view
/// mounting with its initial filter: it must not invalidate the cache.
/// Every later filter change does, exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryPhase {
    Uninitialized,
    Ready,
}

#[derive(Default)]
struct CacheSlot {
    orders: Vec<Order>,
    fresh: bool,
}

struct QueryState {
    filter: OrderFilter,
    phase: QueryPhase,
    cache: CacheSlot,
    generation: u64,
    fetches: u64,
}

/// Shared order-list query with filter dispatch and cache slot
pub struct OrderListQuery {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<QueryState>,
}

impl OrderListQuery {
    pub fn new(transport: Arc<dyn ApiTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            state: RwLock::new(QueryState {
                filter: OrderFilter::default(),
                phase: QueryPhase::Uninitialized,
                cache: CacheSlot::default(),
                generation: 0,
                fetches: 0,
            }),
        }
    }

    /// Change the active filter. Returns whether the cache was
    /// invalidated: never on the initializing call, and only when the
    /// filter actually changed afterwards.
    pub async fn set_filter(&self, filter: OrderFilter) -> bool {
        let mut state = self.state.write().await;
        match state.phase {
            QueryPhase::Uninitialized => {
                state.phase = QueryPhase::Ready;
                state.filter = filter;
                tracing::debug!(?filter, "order list query initialized");
                false
            }
            QueryPhase::Ready => {
                if state.filter == filter {
                    return false;
                }
                state.filter = filter;
                state.generation += 1;
                state.cache.fresh = false;
                tracing::debug!(?filter, generation = state.generation, "filter changed, cache invalidated");
                true
            }
        }
    }

    /// Mark the cached list stale; the next fetch re-issues the query.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.cache.fresh = false;
    }

    /// Return the list under the current filter, from cache when fresh.
    pub async fn fetch(&self) -> Vec<Order> {
        let (endpoint, generation) = {
            let state = self.state.read().await;
            if state.cache.fresh {
                return state.cache.orders.clone();
            }
            (state.filter.endpoint(), state.generation)
        };
        self.issue(endpoint, generation).await
    }

    /// Force an immediate re-issue of the query, bypassing freshness.
    /// Payment mutations use this: the owning order's status changed
    /// server-side and the list must reflect it now.
    pub async fn refetch(&self) -> Vec<Order> {
        let (endpoint, generation) = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.cache.fresh = false;
            (state.filter.endpoint(), state.generation)
        };
        self.issue(endpoint, generation).await
    }

    async fn issue(&self, endpoint: String, generation: u64) -> Vec<Order> {
        {
            let mut state = self.state.write().await;
            state.fetches += 1;
        }

        let outcome = async {
            http::decode::<Vec<Order>>(self.transport.get(&endpoint).await?)
        }
        .await;

        match outcome {
            Ok((orders, _message)) => {
                let mut state = self.state.write().await;
                // An invalidation that raced this fetch supersedes it;
                // leave the slot stale so the next fetch retries.
                if state.generation == generation {
                    state.cache.orders = orders.clone();
                    state.cache.fresh = true;
                }
                orders
            }
            Err(err) => {
                tracing::warn!(%endpoint, error = %err, "order list fetch failed, degrading to empty");
                if err.is_unauthorized() {
                    self.notifier.notify(NoticeLevel::Error, UNAUTHORIZED_NOTICE);
                } else {
                    self.notifier.notify(NoticeLevel::Error, FETCH_FAILED_NOTICE);
                }
                Vec::new()
            }
        }
    }

    /// Currently active filter
    pub async fn filter(&self) -> OrderFilter {
        self.state.read().await.filter
    }

    /// Cache generation; bumps on every invalidation
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Number of network fetches issued so far
    pub async fn fetch_count(&self) -> u64 {
        self.state.read().await.fetches
    }

    /// Whether the cache slot currently holds fresh data
    pub async fn is_fresh(&self) -> bool {
        self.state.read().await.cache.fresh
    }
}
