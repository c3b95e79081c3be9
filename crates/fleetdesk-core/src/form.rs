// ── Entity form ──
//
// Holds one draft at a time. Validation is local and runs in full before
// any request; a valid draft is saved with create (no id) or a full update
// (id present), after which the owning list refetches.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::FormError;
use crate::list::ListSync;
use crate::model::{Entity, FieldErrors, ValidationReport};
use crate::service::EntityService;

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// No session open.
    Closed,
    Editing,
    Submitting,
    /// The last save was rejected remotely. The draft is kept for a retry.
    Failed(String),
}

/// Create (blank draft) versus edit (existing record).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Everything a form view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<E> {
    pub draft: E,
    /// Only invalid fields appear here.
    pub errors: FieldErrors,
    pub status: FormStatus,
}

impl<E: Entity> FormState<E> {
    fn closed() -> Self {
        Self {
            draft: E::empty(),
            errors: FieldErrors::new(),
            status: FormStatus::Closed,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.draft.id().is_unsaved() {
            FormMode::Create
        } else {
            FormMode::Edit
        }
    }

    pub fn is_open(&self) -> bool {
        self.status != FormStatus::Closed
    }
}

/// Form controller for one entity type, bound to the list it refreshes.
pub struct Form<E: Entity, S> {
    inner: Arc<FormInner<E, S>>,
}

impl<E: Entity, S> Clone for Form<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct FormInner<E: Entity, S> {
    list: ListSync<E, S>,
    state: watch::Sender<FormState<E>>,
    /// Bumped on every open/dismiss; a save only touches state if its
    /// session is still current when the response lands.
    session: AtomicU64,
}

impl<E: Entity, S: EntityService<E>> Form<E, S> {
    pub fn new(list: ListSync<E, S>) -> Self {
        let (state, _) = watch::channel(FormState::closed());
        Self {
            inner: Arc::new(FormInner {
                list,
                state,
                session: AtomicU64::new(0),
            }),
        }
    }

    pub fn state(&self) -> FormState<E> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<E>> {
        self.inner.state.subscribe()
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Start a create session with a blank draft.
    pub fn open_create(&self) {
        self.reseed(E::empty(), FormStatus::Editing);
    }

    /// Start an edit session seeded with a copy of `record`.
    pub fn open_edit(&self, record: &E) {
        self.reseed(record.clone(), FormStatus::Editing);
    }

    /// Close the form. A save still in flight will not touch it.
    pub fn dismiss(&self) {
        self.reseed(E::empty(), FormStatus::Closed);
    }

    fn reseed(&self, draft: E, status: FormStatus) {
        self.inner.state.send_modify(|state| {
            self.inner.session.fetch_add(1, Ordering::SeqCst);
            *state = FormState {
                draft,
                errors: FieldErrors::new(),
                status,
            };
        });
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Mutate the draft in place.
    pub fn edit(&self, f: impl FnOnce(&mut E)) {
        self.inner.state.send_modify(|state| f(&mut state.draft));
    }

    /// Run every rule against `draft`. Pure; publishes nothing.
    pub fn validate(&self, draft: &E) -> ValidationReport {
        draft.validate()
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Normalize and validate the draft, then save it.
    ///
    /// Invalid drafts publish their field errors and never reach the
    /// network. On success the form closes and the list refetches; on
    /// failure the form shows `"Failed to save <noun>."` and keeps the
    /// draft. A closed form has no draft and returns
    /// [`FormError::NotOpen`] without touching state.
    pub async fn submit(&self) -> Result<E, FormError> {
        let (session, draft) = {
            let state = self.inner.state.borrow();
            if !state.is_open() {
                return Err(FormError::NotOpen(E::NOUN));
            }
            (
                self.inner.session.load(Ordering::SeqCst),
                state.draft.clone().normalize(),
            )
        };

        let report = self.validate(&draft);
        if !report.is_valid() {
            debug!(entity = E::NOUN, fields = report.errors.len(), "draft rejected");
            let errors = report.errors.clone();
            self.update_if_current(session, |state| {
                state.errors = errors;
                state.status = FormStatus::Editing;
            });
            return Err(FormError::Invalid(report.errors));
        }

        self.update_if_current(session, |state| {
            state.errors.clear();
            state.status = FormStatus::Submitting;
        });

        let service = self.inner.list.service();
        let result = if draft.id().is_unsaved() {
            debug!(entity = E::NOUN, "creating");
            service.create(&draft).await
        } else {
            debug!(entity = E::NOUN, id = %draft.id(), "updating");
            service.update(draft.id(), &draft).await
        };

        match result {
            Ok(saved) => {
                let closed = self.update_if_current(session, |state| {
                    self.inner.session.fetch_add(1, Ordering::SeqCst);
                    *state = FormState::closed();
                });
                if !closed {
                    debug!(entity = E::NOUN, "form session ended before save completed");
                }
                // The backend changed either way.
                if let Err(e) = self.inner.list.refresh().await {
                    warn!(entity = E::PLURAL, error = %e, "refresh after save failed");
                }
                Ok(saved)
            }
            Err(e) => {
                warn!(entity = E::NOUN, error = %e, "save failed");
                self.update_if_current(session, |state| {
                    state.status = FormStatus::Failed(format!("Failed to save {}.", E::NOUN));
                });
                Err(FormError::Remote(e))
            }
        }
    }

    /// Apply `f` only while `session` is still the open one.
    fn update_if_current(&self, session: u64, f: impl FnOnce(&mut FormState<E>)) -> bool {
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
