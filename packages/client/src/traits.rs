//! Client boundary traits: fetch, listen, write.
//!
//! This is the surface the external document database occupies. Fetch and
//! write primitives complete through a callback invoked exactly once;
//! listen primitives deliver repeated events until their registration is
//! removed. Fetch and listen callbacks carry the SDK's dual-channel shape
//! (`Option<snapshot>`, `Option<error>`); folding that into a single
//! `Result` is the typed layer's job, not this one's.

use std::sync::Arc;

use crate::{
    ClientError, CollectionPath, CollectionSnapshot, DocumentPath, DocumentSnapshot,
    ListenerRegistration, Value,
};

/// Completion callback for a single-document fetch.
pub type DocumentCallback = Box<dyn FnOnce(Option<DocumentSnapshot>, Option<ClientError>) + Send>;

/// Completion callback for a collection fetch.
pub type CollectionCallback =
    Box<dyn FnOnce(Option<CollectionSnapshot>, Option<ClientError>) + Send>;

/// Completion callback for set/delete. `None` means success.
pub type WriteCallback = Box<dyn FnOnce(Option<ClientError>) + Send>;

/// Completion callback for add; success carries the generated document path.
pub type AddCallback = Box<dyn FnOnce(Result<DocumentPath, ClientError>) + Send>;

/// Repeated-event observer for a document subscription.
pub type DocumentObserver = Box<dyn FnMut(Option<DocumentSnapshot>, Option<ClientError>) + Send>;

/// Repeated-event observer for a collection subscription.
pub type CollectionObserver =
    Box<dyn FnMut(Option<CollectionSnapshot>, Option<ClientError>) + Send>;

/// Fetch-once primitives.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn DocumentFetch>`.
pub trait DocumentFetch: Send + Sync {
    /// Fetch one document. `on_complete` is invoked exactly once, with a
    /// snapshot (which may record a missing document) or an error.
    fn fetch_document(&self, path: &DocumentPath, on_complete: DocumentCallback);

    /// Fetch every existing document in a collection.
    fn fetch_collection(&self, path: &CollectionPath, on_complete: CollectionCallback);
}

/// Live-update subscription primitives.
///
/// Backends deliver an initial event for the current state, then one event
/// per observed change, until the registration is removed.
pub trait DocumentListen: Send + Sync {
    /// Subscribe to one document.
    fn listen_document(
        &self,
        path: &DocumentPath,
        observer: DocumentObserver,
    ) -> ListenerRegistration;

    /// Subscribe to a collection.
    fn listen_collection(
        &self,
        path: &CollectionPath,
        observer: CollectionObserver,
    ) -> ListenerRegistration;
}

/// Write primitives.
///
/// `fields` must be a `Value::Map`; callers validate shape before reaching
/// this boundary (see the typed layer), so backends may assume it.
pub trait DocumentWrite: Send + Sync {
    /// Create or replace the document at `path`.
    fn set_document(&self, path: &DocumentPath, fields: Value, on_complete: WriteCallback);

    /// Create a document with a generated id inside `collection`.
    fn add_document(&self, collection: &CollectionPath, fields: Value, on_complete: AddCallback);

    /// Delete the document at `path`. Deleting a missing document succeeds.
    fn delete_document(&self, path: &DocumentPath, on_complete: WriteCallback);
}

/// The full client boundary.
///
/// Automatically implemented for anything providing all three primitive
/// groups.
pub trait DocumentClient: DocumentFetch + DocumentListen + DocumentWrite {}
impl<T: DocumentFetch + DocumentListen + DocumentWrite> DocumentClient for T {}

// Blanket implementations so clients compose behind references, boxes and
// shared handles.

impl<T: DocumentFetch + ?Sized> DocumentFetch for &T {
    fn fetch_document(&self, path: &DocumentPath, on_complete: DocumentCallback) {
        (*self).fetch_document(path, on_complete);
    }

    fn fetch_collection(&self, path: &CollectionPath, on_complete: CollectionCallback) {
        (*self).fetch_collection(path, on_complete);
    }
}

impl<T: DocumentListen + ?Sized> DocumentListen for &T {
    fn listen_document(
        &self,
        path: &DocumentPath,
        observer: DocumentObserver,
    ) -> ListenerRegistration {
        (*self).listen_document(path, observer)
    }

    fn listen_collection(
        &self,
        path: &CollectionPath,
        observer: CollectionObserver,
    ) -> ListenerRegistration {
        (*self).listen_collection(path, observer)
    }
}

impl<T: DocumentWrite + ?Sized> DocumentWrite for &T {
    fn set_document(&self, path: &DocumentPath, fields: Value, on_complete: WriteCallback) {
        (*self).set_document(path, fields, on_complete);
    }

    fn add_document(&self, collection: &CollectionPath, fields: Value, on_complete: AddCallback) {
        (*self).add_document(collection, fields, on_complete);
    }

    fn delete_document(&self, path: &DocumentPath, on_complete: WriteCallback) {
        (*self).delete_document(path, on_complete);
    }
}

impl<T: DocumentFetch + ?Sized> DocumentFetch for Box<T> {
    fn fetch_document(&self, path: &DocumentPath, on_complete: DocumentCallback) {
        self.as_ref().fetch_document(path, on_complete);
    }

    fn fetch_collection(&self, path: &CollectionPath, on_complete: CollectionCallback) {
        self.as_ref().fetch_collection(path, on_complete);
    }
}

impl<T: DocumentListen + ?Sized> DocumentListen for Box<T> {
    fn listen_document(
        &self,
        path: &DocumentPath,
        observer: DocumentObserver,
    ) -> ListenerRegistration {
        self.as_ref().listen_document(path, observer)
    }

    fn listen_collection(
        &self,
        path: &CollectionPath,
        observer: CollectionObserver,
    ) -> ListenerRegistration {
        self.as_ref().listen_collection(path, observer)
    }
}

impl<T: DocumentWrite + ?Sized> DocumentWrite for Box<T> {
    fn set_document(&self, path: &DocumentPath, fields: Value, on_complete: WriteCallback) {
        self.as_ref().set_document(path, fields, on_complete);
    }

    fn add_document(&self, collection: &CollectionPath, fields: Value, on_complete: AddCallback) {
        self.as_ref().add_document(collection, fields, on_complete);
    }

    fn delete_document(&self, path: &DocumentPath, on_complete: WriteCallback) {
        self.as_ref().delete_document(path, on_complete);
    }
}

impl<T: DocumentFetch + ?Sized> DocumentFetch for Arc<T> {
    fn fetch_document(&self, path: &DocumentPath, on_complete: DocumentCallback) {
        self.as_ref().fetch_document(path, on_complete);
    }

    fn fetch_collection(&self, path: &CollectionPath, on_complete: CollectionCallback) {
        self.as_ref().fetch_collection(path, on_complete);
    }
}

impl<T: DocumentListen + ?Sized> DocumentListen for Arc<T> {
    fn listen_document(
        &self,
        path: &DocumentPath,
        observer: DocumentObserver,
    ) -> ListenerRegistration {
        self.as_ref().listen_document(path, observer)
    }

    fn listen_collection(
        &self,
        path: &CollectionPath,
        observer: CollectionObserver,
    ) -> ListenerRegistration {
        self.as_ref().listen_collection(path, observer)
    }
}

impl<T: DocumentWrite + ?Sized> DocumentWrite for Arc<T> {
    fn set_document(&self, path: &DocumentPath, fields: Value, on_complete: WriteCallback) {
        self.as_ref().set_document(path, fields, on_complete);
    }

    fn add_document(&self, collection: &CollectionPath, fields: Value, on_complete: AddCallback) {
        self.as_ref().add_document(collection, fields, on_complete);
    }

    fn delete_document(&self, path: &DocumentPath, on_complete: WriteCallback) {
        self.as_ref().delete_document(path, on_complete);
    }
}
