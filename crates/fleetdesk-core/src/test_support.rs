// In-memory backend for controller tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;

use crate::error::CoreError;
use crate::model::{Driver, Entity, EntityId, Truck};
use crate::service::{AssignmentService, EntityService};

type ListReply<E> = Result<Vec<E>, CoreError>;

pub(crate) fn backend_down() -> CoreError {
    CoreError::Api {
        message: "backend unavailable".into(),
        status: Some(500),
    }
}

pub(crate) fn truck(id: &str, plate: &str) -> Truck {
    Truck {
        id: id.into(),
        license_plate: plate.into(),
        color: "Red".into(),
        max_load_capacity: 5000.0,
        status: "Available".into(),
        location: "Depot A".into(),
        ..Truck::default()
    }
}

pub(crate) fn driver(id: &str, name: &str, status: &str) -> Driver {
    Driver {
        id: id.into(),
        name: name.into(),
        license_number: format!("L-{name}"),
        status: status.into(),
        ..Driver::default()
    }
}

// ── FakeTable ────────────────────────────────────────────────────────

/// One collection: records, a call log, and failure switches.
pub(crate) struct FakeTable<E> {
    inner: Arc<Mutex<TableState<E>>>,
}

impl<E> Clone for FakeTable<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct TableState<E> {
    records: Vec<E>,
    calls: Vec<String>,
    list_calls: usize,
    next_id: u32,
    fail_list: bool,
    fail_mutations: bool,
    held_lists: VecDeque<oneshot::Receiver<ListReply<E>>>,
    held_saves: VecDeque<oneshot::Receiver<()>>,
    saved: Vec<E>,
}

impl<E: Entity> FakeTable<E> {
    fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TableState {
                records: Vec::new(),
                calls: Vec::new(),
                list_calls: 0,
                next_id: 1,
                fail_list: false,
                fail_mutations: false,
                held_lists: VecDeque::new(),
                held_saves: VecDeque::new(),
                saved: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TableState<E>> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn seed(&self, records: Vec<E>) {
        self.lock().records = records;
    }

    pub(crate) fn records(&self) -> Vec<E> {
        self.lock().records.clone()
    }

    /// Every call in order: `"list"`, `"create"`, `"update <id>"`, `"delete <id>"`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// Bodies received by create and update, in order.
    pub(crate) fn saved(&self) -> Vec<E> {
        self.lock().saved.clone()
    }

    pub(crate) fn fail_list(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    pub(crate) fn fail_mutations(&self, fail: bool) {
        self.lock().fail_mutations = fail;
    }

    /// The next `list` call waits for the returned sender and answers with
    /// whatever is sent.
    pub(crate) fn hold_next_list(&self) -> oneshot::Sender<ListReply<E>> {
        let (tx, rx) = oneshot::channel();
        self.lock().held_lists.push_back(rx);
        tx
    }

    /// The next create/update waits until the returned sender fires.
    pub(crate) fn hold_next_save(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().held_saves.push_back(rx);
        tx
    }

    fn with_new_id(&self, draft: &E) -> E {
        let n = {
            let mut table = self.lock();
            let n = table.next_id;
            table.next_id += 1;
            n
        };
        let prefix = E::NOUN.chars().next().unwrap_or('x');
        let mut value = serde_json::to_value(draft).unwrap_or_default();
        value["id"] = serde_json::Value::String(format!("{prefix}{n}"));
        serde_json::from_value(value).unwrap_or_else(|_| draft.clone())
    }

    async fn save(&self, call: String, draft: &E) -> Result<E, CoreError> {
        let held = {
            let mut table = self.lock();
            table.calls.push(call);
            table.saved.push(draft.clone());
            table.held_saves.pop_front()
        };
        if let Some(rx) = held {
            let _ = rx.await;
        }
        if self.lock().fail_mutations {
            return Err(backend_down());
        }

        let record = if draft.id().is_unsaved() {
            self.with_new_id(draft)
        } else {
            draft.clone()
        };
        let mut table = self.lock();
        match table.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => table.records.push(record.clone()),
        }
        Ok(record)
    }
}

impl<E: Entity> EntityService<E> for FakeTable<E> {
    async fn list(&self) -> Result<Vec<E>, CoreError> {
        let held = {
            let mut table = self.lock();
            table.calls.push("list".into());
            table.list_calls += 1;
            if table.fail_list {
                return Err(backend_down());
            }
            table.held_lists.pop_front()
        };
        match held {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CoreError::Internal("reply dropped".into()))),
            None => Ok(self.records()),
        }
    }

    async fn create(&self, draft: &E) -> Result<E, CoreError> {
        self.save("create".into(), draft).await
    }

    async fn update(&self, id: &EntityId, draft: &E) -> Result<E, CoreError> {
        self.save(format!("update {id}"), draft).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let mut table = self.lock();
        table.calls.push(format!("delete {id}"));
        if table.fail_mutations {
            return Err(backend_down());
        }
        table.records.retain(|r| r.id() != id);
        Ok(())
    }
}

// ── FakeBackend ──────────────────────────────────────────────────────

#[derive(Default)]
struct AssignLog {
    calls: Vec<(String, String)>,
    fail: bool,
    held: VecDeque<oneshot::Receiver<()>>,
}

/// Both collections plus the assignment endpoint.
#[derive(Clone)]
pub(crate) struct FakeBackend {
    pub(crate) trucks: FakeTable<Truck>,
    pub(crate) drivers: FakeTable<Driver>,
    assign: Arc<Mutex<AssignLog>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            trucks: FakeTable::new(),
            drivers: FakeTable::new(),
            assign: Arc::new(Mutex::new(AssignLog::default())),
        }
    }

    fn assign_log(&self) -> MutexGuard<'_, AssignLog> {
        self.assign
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// `(truck_id, driver_id)` pairs received by the assignment endpoint.
    pub(crate) fn assignments(&self) -> Vec<(String, String)> {
        self.assign_log().calls.clone()
    }

    pub(crate) fn fail_assign(&self, fail: bool) {
        self.assign_log().fail = fail;
    }

    pub(crate) fn hold_next_assign(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.assign_log().held.push_back(rx);
        tx
    }
}

macro_rules! delegate_service {
    ($entity:ty, $field:ident) => {
        impl EntityService<$entity> for FakeBackend {
            fn list(
                &self,
            ) -> impl std::future::Future<Output = Result<Vec<$entity>, CoreError>> + Send {
                self.$field.list()
            }

            fn create(
                &self,
                draft: &$entity,
            ) -> impl std::future::Future<Output = Result<$entity, CoreError>> + Send {
                self.$field.create(draft)
            }

            fn update(
                &self,
                id: &EntityId,
                draft: &$entity,
            ) -> impl std::future::Future<Output = Result<$entity, CoreError>> + Send {
                self.$field.update(id, draft)
            }

            fn delete(
                &self,
                id: &EntityId,
            ) -> impl std::future::Future<Output = Result<(), CoreError>> + Send {
                self.$field.delete(id)
            }
        }
    };
}

delegate_service!(Truck, trucks);
delegate_service!(Driver, drivers);

impl AssignmentService for FakeBackend {
    async fn assign_driver(
        &self,
        truck_id: &EntityId,
        driver_id: &EntityId,
    ) -> Result<Option<Truck>, CoreError> {
        let held = {
            let mut log = self.assign_log();
            log.calls.push((truck_id.to_string(), driver_id.to_string()));
            log.held.pop_front()
        };
        if let Some(rx) = held {
            let _ = rx.await;
        }
        if self.assign_log().fail {
            return Err(backend_down());
        }

        let mut trucks = self.trucks.lock();
        if let Some(truck) = trucks.records.iter_mut().find(|t| &t.id == truck_id) {
            truck.driver_id = Some(driver_id.clone());
        }
        Ok(None)
    }
}
