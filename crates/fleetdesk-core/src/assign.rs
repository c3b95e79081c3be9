// ── Driver assignment ──
//
// One session per truck: load every driver, offer only the available
// ones, then link the chosen driver through the relation endpoint. Only
// the truck side of the relation is written; the truck list refetches
// afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::list::ListSync;
use crate::model::{Driver, EntityId, Truck};
use crate::service::{AssignmentService, EntityService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentStatus {
    Closed,
    /// Fetching candidates.
    Loading,
    Ready,
    Assigning,
    /// Candidate fetch or assignment failed; the session stays open.
    Failed(String),
}

/// Everything an assignment dialog renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentState {
    pub truck_id: Option<EntityId>,
    /// Drivers whose status is exactly `"Available"`.
    pub candidates: Arc<Vec<Driver>>,
    pub selected: Option<EntityId>,
    pub status: AssignmentStatus,
}

impl AssignmentState {
    fn closed() -> Self {
        Self {
            truck_id: None,
            candidates: Arc::new(Vec::new()),
            selected: None,
            status: AssignmentStatus::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status != AssignmentStatus::Closed
    }
}

/// Result of a completed [`Assignment::assign`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    /// The backend accepted the link, optionally echoing the updated truck.
    Assigned(Option<Truck>),
    /// No driver was chosen; nothing was sent.
    NothingSelected,
}

/// Assignment controller, bound to the truck list it refreshes.
pub struct Assignment<S> {
    inner: Arc<AssignmentInner<S>>,
}

impl<S> Clone for Assignment<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AssignmentInner<S> {
    trucks: ListSync<Truck, S>,
    state: watch::Sender<AssignmentState>,
    session: AtomicU64,
}

impl<S: AssignmentService> Assignment<S> {
    pub fn new(trucks: ListSync<Truck, S>) -> Self {
        let (state, _) = watch::channel(AssignmentState::closed());
        Self {
            inner: Arc::new(AssignmentInner {
                trucks,
                state,
                session: AtomicU64::new(0),
            }),
        }
    }

    pub fn state(&self) -> AssignmentState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AssignmentState> {
        self.inner.state.subscribe()
    }

    /// Start a session for `truck_id` and load its candidates.
    pub async fn open(&self, truck_id: &EntityId) -> Result<Arc<Vec<Driver>>, CoreError> {
        let truck_id = truck_id.clone();
        self.inner.state.send_modify(|state| {
            self.inner.session.fetch_add(1, Ordering::SeqCst);
            *state = AssignmentState {
                truck_id: Some(truck_id),
                status: AssignmentStatus::Loading,
                ..AssignmentState::closed()
            };
        });
        self.load_candidates().await
    }

    /// Fetch the full driver list and keep only available drivers. With no
    /// session open the candidates are returned but nothing is published.
    pub async fn load_candidates(&self) -> Result<Arc<Vec<Driver>>, CoreError> {
        let session = self.current_session();
        self.update_if_current(session, |state| state.status = AssignmentStatus::Loading);

        let service = self.inner.trucks.service();
        match EntityService::<Driver>::list(service).await {
            Ok(drivers) => {
                let candidates: Arc<Vec<Driver>> =
                    Arc::new(drivers.into_iter().filter(Driver::is_available).collect());
                debug!(count = candidates.len(), "assignment candidates loaded");
                let published = Arc::clone(&candidates);
                self.update_if_current(session, |state| {
                    state.candidates = published;
                    state.status = AssignmentStatus::Ready;
                });
                Ok(candidates)
            }
            Err(e) => {
                warn!(error = %e, "failed to load assignment candidates");
                self.update_if_current(session, |state| {
                    state.status = AssignmentStatus::Failed("Failed to fetch drivers".into());
                });
                Err(e)
            }
        }
    }

    /// Remember the driver picked in the dialog. An empty id clears it.
    pub fn select(&self, driver_id: &EntityId) {
        let selected = Some(driver_id.clone()).filter(|id| !id.is_unsaved());
        self.inner.state.send_modify(|state| state.selected = selected);
    }

    /// Link `driver_id` to `truck_id`.
    ///
    /// An empty `driver_id` is a no-op: no request, no state change. On
    /// success the session closes and the truck list refetches; on failure
    /// the session stays open showing `"Failed to assign driver."`. A closed
    /// session stays closed whatever the outcome.
    pub async fn assign(
        &self,
        truck_id: &EntityId,
        driver_id: &EntityId,
    ) -> Result<AssignOutcome, CoreError> {
        if driver_id.is_unsaved() {
            return Ok(AssignOutcome::NothingSelected);
        }

        let session = self.current_session();
        self.update_if_current(session, |state| state.status = AssignmentStatus::Assigning);
        debug!(%truck_id, %driver_id, "assigning driver");

        match self
            .inner
            .trucks
            .service()
            .assign_driver(truck_id, driver_id)
            .await
        {
            Ok(truck) => {
                let closed = self.update_if_current(session, |state| {
                    self.inner.session.fetch_add(1, Ordering::SeqCst);
                    *state = AssignmentState::closed();
                });
                if !closed {
                    debug!("assignment session ended before the response arrived");
                }
                if let Err(e) = self.inner.trucks.refresh().await {
                    warn!(error = %e, "refresh after assignment failed");
                }
                Ok(AssignOutcome::Assigned(truck))
            }
            Err(e) => {
                warn!(%truck_id, %driver_id, error = %e, "assignment failed");
                self.update_if_current(session, |state| {
                    state.status = AssignmentStatus::Failed("Failed to assign driver.".into());
                });
                Err(e)
            }
        }
    }

    /// Assign whatever [`select`](Self::select) last recorded for the open
    /// session's truck.
    pub async fn assign_selected(&self) -> Result<AssignOutcome, CoreError> {
        let (truck_id, driver_id) = {
            let state = self.inner.state.borrow();
            (state.truck_id.clone(), state.selected.clone())
        };
        match (truck_id, driver_id) {
            (Some(truck_id), Some(driver_id)) => self.assign(&truck_id, &driver_id).await,
            _ => Ok(AssignOutcome::NothingSelected),
        }
    }

    /// Close the session. Responses still in flight will not reopen it.
    pub fn dismiss(&self) {
        self.inner.state.send_modify(|state| {
            self.inner.session.fetch_add(1, Ordering::SeqCst);
            *state = AssignmentState::closed();
        });
    }

    fn current_session(&self) -> u64 {
        self.inner.session.load(Ordering::SeqCst)
    }

    /// Apply `f` only while `session` is still the open one.
    fn update_if_current(&self, session: u64, f: impl FnOnce(&mut AssignmentState)) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.is_open() && self.inner.session.load(Ordering::SeqCst) == session {
                f(state);
                true
            } else {
                false
            }
        })
    }
}
