//! The in-memory client.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use docbind_client::{
    AddCallback, ClientError, CollectionCallback, CollectionObserver, CollectionPath,
    CollectionSnapshot, DocumentCallback, DocumentFetch, DocumentListen, DocumentObserver,
    DocumentPath, DocumentSnapshot, DocumentWrite, ListenerRegistration, Value, WriteCallback,
};

struct DocSub {
    id: u64,
    path: DocumentPath,
    observer: Arc<Mutex<DocumentObserver>>,
}

struct CollSub {
    id: u64,
    path: CollectionPath,
    observer: Arc<Mutex<CollectionObserver>>,
}

#[derive(Default)]
struct Subscriptions {
    next_id: u64,
    documents: Vec<DocSub>,
    collections: Vec<CollSub>,
}

impl Subscriptions {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct State {
    docs: Mutex<BTreeMap<DocumentPath, Value>>,
    subs: Mutex<Subscriptions>,
    fail_next: Mutex<Option<ClientError>>,
}

/// An in-memory document-database client.
///
/// Documents live in a process-local map; listeners fire synchronously on
/// the mutating thread, with an initial event on registration. Cloning the
/// client clones a handle to the same store.
///
/// Intended for tests, fixtures and local development — there is no
/// persistence and no query surface.
///
/// # Locking
///
/// Two locks, `docs` and `subs`, are never held while an observer or
/// completion callback runs: snapshots and observer handles are collected
/// first, then the locks are released, then callbacks fire. Observers may
/// therefore fetch, subscribe and unsubscribe from inside a callback. The
/// one forbidden move is mutating a document from an observer that watches
/// it: dispatch would re-enter the running observer's own handle.
#[derive(Clone, Default)]
pub struct MemoryClient {
    state: Arc<State>,
}

impl MemoryClient {
    /// Create an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot failure: the next fetch or write operation completes
    /// with `error` instead of touching the store.
    pub fn fail_next(&self, error: ClientError) {
        *self.state.fail_next.lock() = Some(error);
    }

    fn take_failure(&self) -> Option<ClientError> {
        self.state.fail_next.lock().take()
    }

    fn snapshot_document(&self, path: &DocumentPath) -> DocumentSnapshot {
        match self.state.docs.lock().get(path) {
            Some(fields) => DocumentSnapshot::existing(path.clone(), fields.clone()),
            None => DocumentSnapshot::missing(path.clone()),
        }
    }

    fn snapshot_collection(&self, path: &CollectionPath) -> CollectionSnapshot {
        let docs = self
            .state
            .docs
            .lock()
            .iter()
            .filter(|(p, _)| path.contains(p))
            .map(|(p, v)| DocumentSnapshot::existing(p.clone(), v.clone()))
            .collect();
        CollectionSnapshot::new(path.clone(), docs)
    }

    /// Deliver change events for `path` to every matching subscription.
    ///
    /// Snapshots and observer handles are captured before any callback
    /// runs; see the type-level locking notes.
    fn notify(&self, path: &DocumentPath) {
        let doc_snap = self.snapshot_document(path);

        let (doc_observers, coll_targets) = {
            let subs = self.state.subs.lock();
            let doc_observers: Vec<_> = subs
                .documents
                .iter()
                .filter(|s| &s.path == path)
                .map(|s| Arc::clone(&s.observer))
                .collect();
            let coll_targets: Vec<_> = subs
                .collections
                .iter()
                .filter(|s| s.path.contains(path))
                .map(|s| (s.path.clone(), Arc::clone(&s.observer)))
                .collect();
            (doc_observers, coll_targets)
        };

        if !doc_observers.is_empty() || !coll_targets.is_empty() {
            log::debug!(
                "dispatching change at '{}' to {} document / {} collection observers",
                path,
                doc_observers.len(),
                coll_targets.len()
            );
        }

        for observer in doc_observers {
            (*observer.lock())(Some(doc_snap.clone()), None);
        }
        for (coll_path, observer) in coll_targets {
            let snap = self.snapshot_collection(&coll_path);
            (*observer.lock())(Some(snap), None);
        }
    }

    fn detach_document(&self, id: u64) {
        self.state.subs.lock().documents.retain(|s| s.id != id);
    }

    fn detach_collection(&self, id: u64) {
        self.state.subs.lock().collections.retain(|s| s.id != id);
    }
}

impl DocumentFetch for MemoryClient {
    fn fetch_document(&self, path: &DocumentPath, on_complete: DocumentCallback) {
        if let Some(error) = self.take_failure() {
            on_complete(None, Some(error));
            return;
        }
        on_complete(Some(self.snapshot_document(path)), None);
    }

    fn fetch_collection(&self, path: &CollectionPath, on_complete: CollectionCallback) {
        if let Some(error) = self.take_failure() {
            on_complete(None, Some(error));
            return;
        }
        on_complete(Some(self.snapshot_collection(path)), None);
    }
}

impl DocumentListen for MemoryClient {
    fn listen_document(
        &self,
        path: &DocumentPath,
        observer: DocumentObserver,
    ) -> ListenerRegistration {
        let observer = Arc::new(Mutex::new(observer));
        let id = {
            let mut subs = self.state.subs.lock();
            let id = subs.next_id();
            subs.documents.push(DocSub {
                id,
                path: path.clone(),
                observer: Arc::clone(&observer),
            });
            id
        };

        // Initial event: current state, delivered outside the subs lock.
        (*observer.lock())(Some(self.snapshot_document(path)), None);

        let client = self.clone();
        ListenerRegistration::new(move || client.detach_document(id))
    }

    fn listen_collection(
        &self,
        path: &CollectionPath,
        observer: CollectionObserver,
    ) -> ListenerRegistration {
        let observer = Arc::new(Mutex::new(observer));
        let id = {
            let mut subs = self.state.subs.lock();
            let id = subs.next_id();
            subs.collections.push(CollSub {
                id,
                path: path.clone(),
                observer: Arc::clone(&observer),
            });
            id
        };

        (*observer.lock())(Some(self.snapshot_collection(path)), None);

        let client = self.clone();
        ListenerRegistration::new(move || client.detach_collection(id))
    }
}

impl DocumentWrite for MemoryClient {
    fn set_document(&self, path: &DocumentPath, fields: Value, on_complete: WriteCallback) {
        if let Some(error) = self.take_failure() {
            on_complete(Some(error));
            return;
        }
        log::debug!("set '{}'", path);
        self.state.docs.lock().insert(path.clone(), fields);
        self.notify(path);
        on_complete(None);
    }

    fn add_document(&self, collection: &CollectionPath, fields: Value, on_complete: AddCallback) {
        if let Some(error) = self.take_failure() {
            on_complete(Err(error));
            return;
        }
        let id = generate_id();
        // Generated ids always validate; a failure here is a bug.
        let path = match collection.doc(&id) {
            Ok(path) => path,
            Err(e) => {
                on_complete(Err(ClientError::Backend {
                    code: 0,
                    message: e.to_string(),
                }));
                return;
            }
        };
        log::debug!("add '{}'", path);
        self.state.docs.lock().insert(path.clone(), fields);
        self.notify(&path);
        on_complete(Ok(path));
    }

    fn delete_document(&self, path: &DocumentPath, on_complete: WriteCallback) {
        if let Some(error) = self.take_failure() {
            on_complete(Some(error));
            return;
        }
        let removed = self.state.docs.lock().remove(path).is_some();
        if removed {
            log::debug!("delete '{}'", path);
            self.notify(path);
        }
        on_complete(None);
    }
}

/// A fresh document id: a `d`-prefixed UUID so it is always a valid path
/// component.
fn generate_id() -> String {
    format!("d{}", uuid::Uuid::new_v4().simple())
}
