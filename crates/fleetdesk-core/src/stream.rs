// ── Reactive list subscriptions ──
//
// Subscription types for consuming list-state changes from a `ListSync`.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::list::ListState;
use crate::model::Entity;

/// A subscription to one list's state.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via [`changed()`](Self::changed) or by converting to a
/// `Stream`.
pub struct ListSubscription<E: Entity> {
    current: ListState<E>,
    receiver: watch::Receiver<ListState<E>>,
}

impl<E: Entity> ListSubscription<E> {
    pub(crate) fn new(receiver: watch::Receiver<ListState<E>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The state captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &ListState<E> {
        &self.current
    }

    /// The latest state, which may be newer than `current()`.
    pub fn latest(&self) -> ListState<E> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next transition. Returns `None` once the owning
    /// controller has been dropped.
    pub async fn changed(&mut self) -> Option<ListState<E>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }

    /// Convert into a `Stream`. The first item is the current state.
    pub fn into_stream(self) -> ListWatchStream<E> {
        ListWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct ListWatchStream<E: Entity> {
    inner: WatchStream<ListState<E>>,
}

impl<E: Entity> Stream for ListWatchStream<E> {
    type Item = ListState<E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // ListState holds its items behind an Arc, so WatchStream is Unpin.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
