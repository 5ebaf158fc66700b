//! Typed adapters over the client boundary.
//!
//! Each method here performs the same three steps: invoke the underlying
//! fetch, listen or write primitive; fold its dual-channel callback into a
//! single `Result`; run the decode or encode step. Nothing is retried or
//! recovered — outcomes are reported once, to the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;

use docbind_client::{
    ClientError, CollectionPath, CollectionSnapshot, DocumentFetch, DocumentListen, DocumentPath,
    DocumentSnapshot, DocumentWrite, ListenerRegistration,
};

use crate::convert::to_document_fields;
use crate::snapshot::{Document, TypedCollectionSnapshot, TypedDocumentSnapshot};
use crate::Error;

/// Fold a dual-channel completion into a single result.
///
/// The error channel wins when both are populated; an invocation with
/// neither is reported as [`Error::NoCompletion`] rather than silently
/// dropped.
pub(crate) fn fold<S>(snapshot: Option<S>, error: Option<ClientError>) -> Result<S, Error> {
    match (snapshot, error) {
        (_, Some(e)) => Err(Error::Client(e)),
        (Some(s), None) => Ok(s),
        (None, None) => Err(Error::NoCompletion),
    }
}

fn decode_document<T: DeserializeOwned>(
    snapshot: Option<DocumentSnapshot>,
    error: Option<ClientError>,
) -> Result<Option<T>, Error> {
    fold(snapshot, error).and_then(|s| s.decode_opt())
}

fn decode_required<T: DeserializeOwned>(
    snapshot: Option<DocumentSnapshot>,
    error: Option<ClientError>,
) -> Result<T, Error> {
    fold(snapshot, error).and_then(|s| s.decode())
}

fn decode_collection<T: DeserializeOwned>(
    snapshot: Option<CollectionSnapshot>,
    error: Option<ClientError>,
) -> Result<Vec<Document<T>>, Error> {
    fold(snapshot, error).and_then(|s| s.decode_all())
}

/// Typed fetch-once operations.
///
/// Automatically implemented for every [`DocumentFetch`].
pub trait TypedFetch: DocumentFetch {
    /// Fetch a document and decode it, reporting one `Result` to
    /// `completion`. A missing document is `Ok(None)`.
    fn fetch_as<T, F>(&self, path: &DocumentPath, completion: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<Option<T>, Error>) + Send + 'static,
    {
        self.fetch_document(
            path,
            Box::new(move |snap, err| completion(decode_document(snap, err))),
        );
    }

    /// Like [`fetch_as`](TypedFetch::fetch_as), but absence is
    /// [`Error::Missing`].
    fn fetch_one_as<T, F>(&self, path: &DocumentPath, completion: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<T, Error>) + Send + 'static,
    {
        self.fetch_document(
            path,
            Box::new(move |snap, err| completion(decode_required(snap, err))),
        );
    }

    /// Fetch a collection and decode every member document.
    fn fetch_collection_as<T, F>(&self, path: &CollectionPath, completion: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<Vec<Document<T>>, Error>) + Send + 'static,
    {
        self.fetch_collection(
            path,
            Box::new(move |snap, err| completion(decode_collection(snap, err))),
        );
    }
}

impl<C: DocumentFetch + ?Sized> TypedFetch for C {}

/// Typed live-update subscriptions.
///
/// Automatically implemented for every [`DocumentListen`]. The registration
/// returned by the backend is forwarded untouched; removing it stops the
/// typed observer with it.
pub trait TypedListen: DocumentListen {
    /// Subscribe to a document; every event arrives as one decoded
    /// `Result`. Absence is `Ok(None)`.
    fn listen_as<T, F>(&self, path: &DocumentPath, mut on_change: F) -> ListenerRegistration
    where
        T: DeserializeOwned + 'static,
        F: FnMut(Result<Option<T>, Error>) + Send + 'static,
    {
        self.listen_document(
            path,
            Box::new(move |snap, err| on_change(decode_document(snap, err))),
        )
    }

    /// Subscribe to a collection; every event decodes all member documents.
    fn listen_collection_as<T, F>(
        &self,
        path: &CollectionPath,
        mut on_change: F,
    ) -> ListenerRegistration
    where
        T: DeserializeOwned + 'static,
        F: FnMut(Result<Vec<Document<T>>, Error>) + Send + 'static,
    {
        self.listen_collection(
            path,
            Box::new(move |snap, err| on_change(decode_collection(snap, err))),
        )
    }
}

impl<C: DocumentListen + ?Sized> TypedListen for C {}

/// Typed write operations.
///
/// Automatically implemented for every [`DocumentWrite`]. Encoding and
/// shape validation happen synchronously — the `Err` return — before the
/// backend is contacted; a shape failure therefore never reaches the
/// completion callback.
pub trait TypedWrite: DocumentWrite {
    /// Encode `data` and create or replace the document at `path`.
    fn set_from<T, F>(&self, path: &DocumentPath, data: &T, completion: F) -> Result<(), Error>
    where
        T: Serialize,
        F: FnOnce(Result<(), Error>) + Send + 'static,
    {
        let fields = to_document_fields(data)?;
        self.set_document(
            path,
            fields,
            Box::new(move |err| match err {
                Some(e) => completion(Err(Error::Client(e))),
                None => completion(Ok(())),
            }),
        );
        Ok(())
    }

    /// Encode `data` and add it to `collection` under a generated id.
    /// Success reports the new document's path.
    fn add_from<T, F>(&self, collection: &CollectionPath, data: &T, completion: F) -> Result<(), Error>
    where
        T: Serialize,
        F: FnOnce(Result<DocumentPath, Error>) + Send + 'static,
    {
        let fields = to_document_fields(data)?;
        self.add_document(
            collection,
            fields,
            Box::new(move |result| completion(result.map_err(Error::Client))),
        );
        Ok(())
    }

    /// Delete the document at `path`, reporting one `Result`.
    fn delete_with<F>(&self, path: &DocumentPath, completion: F)
    where
        F: FnOnce(Result<(), Error>) + Send + 'static,
    {
        self.delete_document(
            path,
            Box::new(move |err| match err {
                Some(e) => completion(Err(Error::Client(e))),
                None => completion(Ok(())),
            }),
        );
    }
}

impl<C: DocumentWrite + ?Sized> TypedWrite for C {}
