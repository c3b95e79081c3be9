// ── List synchronization ──
//
// The local list is a disposable cache: every refresh discards it and
// refetches the whole collection. Overlapping refreshes are resolved by
// sequence stamps, so only the most recently issued one may publish.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Entity, EntityId};
use crate::service::EntityService;
use crate::stream::ListSubscription;

/// What a list view shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<E> {
    /// A fetch is in flight (also the state before the first fetch).
    Loading,
    Ready(Arc<Vec<E>>),
    /// A single user-visible message; the cause is logged, not shown.
    Error(String),
}

impl<E> ListState<E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn items(&self) -> Option<&[E]> {
        match self {
            Self::Ready(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Keeps one entity list in step with the backend.
///
/// Cheaply cloneable via `Arc`. Forms and the assignment flow hold a
/// clone and call [`refresh()`](Self::refresh) after they mutate.
pub struct ListSync<E: Entity, S> {
    inner: Arc<ListInner<E, S>>,
}

impl<E: Entity, S> Clone for ListSync<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ListInner<E, S> {
    service: S,
    state: watch::Sender<ListState<E>>,
    /// Stamp of the most recently issued refresh (or failed delete).
    issued: AtomicU64,
    last_refreshed: watch::Sender<Option<DateTime<Utc>>>,
}

impl<E: Entity, S: EntityService<E>> ListSync<E, S> {
    /// Create a controller in the `Loading` state. Nothing is fetched
    /// until the first [`refresh()`](Self::refresh).
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(ListState::Loading);
        let (last_refreshed, _) = watch::channel(None);

        Self {
            inner: Arc::new(ListInner {
                service,
                state,
                issued: AtomicU64::new(0),
                last_refreshed,
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.inner.service
    }

    /// Current state (cheap clone; items are behind an `Arc`).
    pub fn state(&self) -> ListState<E> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> ListSubscription<E> {
        ListSubscription::new(self.inner.state.subscribe())
    }

    /// When the last fetch that reached `Ready` completed.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_refreshed.borrow()
    }

    /// Enter `Loading`, fetch the whole collection, then publish `Ready`
    /// or `Error`. A response overtaken by a newer refresh is dropped and
    /// reported as `Ok`.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let stamp = self.issue(ListState::Loading);
        debug!(entity = E::PLURAL, stamp, "refreshing list");

        let result = self.inner.service.list().await;

        let next = match &result {
            Ok(items) => ListState::Ready(Arc::new(items.clone())),
            Err(e) => {
                warn!(entity = E::PLURAL, error = %e, "list fetch failed");
                ListState::Error(format!("Failed to fetch {}", E::PLURAL))
            }
        };

        if !self.publish(stamp, next) {
            debug!(entity = E::PLURAL, stamp, "discarding stale list response");
            return Ok(());
        }

        match result {
            Ok(items) => {
                self.inner.last_refreshed.send_replace(Some(Utc::now()));
                debug!(entity = E::PLURAL, count = items.len(), "list ready");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete one record. On success the list is refreshed; on failure the
    /// list shows an error and is *not* refreshed.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        debug!(entity = E::NOUN, %id, "deleting");

        match self.inner.service.delete(id).await {
            Ok(()) => self.refresh().await,
            Err(e) => {
                warn!(entity = E::NOUN, %id, error = %e, "delete failed");
                // Stamped so an older in-flight refresh cannot paper over it.
                self.issue(ListState::Error(format!("Failed to delete {}.", E::NOUN)));
                Err(e)
            }
        }
    }

    // ── Sequencing ───────────────────────────────────────────────────

    /// Take the next stamp and publish `state` under it. Both happen under
    /// the channel's write lock, so stamps and states stay in order.
    fn issue(&self, state: ListState<E>) -> u64 {
        let mut stamp = 0;
        self.inner.state.send_modify(|current| {
            stamp = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
            *current = state;
        });
        stamp
    }

    /// Publish `state` only if `stamp` is still the latest issued.
    fn publish(&self, stamp: u64, state: ListState<E>) -> bool {
        self.inner.state.send_if_modified(|current| {
            if self.inner.issued.load(Ordering::SeqCst) == stamp {
                *current = state;
                true
            } else {
                false
            }
        })
    }
}
