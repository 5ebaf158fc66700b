//! Blocking single-shot adapters.
//!
//! These drive the callback interface through a channel and wait for the
//! one completion, for callers without an async runtime or a callback
//! plumbing of their own.

use std::sync::mpsc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use docbind_client::{CollectionPath, DocumentFetch, DocumentPath, DocumentWrite};

use crate::document::{TypedFetch, TypedWrite};
use crate::snapshot::Document;
use crate::Error;

/// Wait for the single value a completion callback delivers.
///
/// A backend that drops the callback without invoking it shows up as a
/// closed channel, reported as [`Error::NoCompletion`].
fn wait<T>(rx: mpsc::Receiver<Result<T, Error>>) -> Result<T, Error> {
    rx.recv().unwrap_or(Err(Error::NoCompletion))
}

/// Blocking typed fetches.
///
/// Automatically implemented for every [`DocumentFetch`].
pub trait BlockingFetch: DocumentFetch {
    /// Fetch and decode one document, blocking until the backend completes.
    fn fetch_blocking<T: DeserializeOwned + Send + 'static>(
        &self,
        path: &DocumentPath,
    ) -> Result<Option<T>, Error> {
        let (tx, rx) = mpsc::channel();
        self.fetch_as(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx)
    }

    /// Like [`fetch_blocking`](BlockingFetch::fetch_blocking), but absence
    /// is [`Error::Missing`].
    fn fetch_one_blocking<T: DeserializeOwned + Send + 'static>(
        &self,
        path: &DocumentPath,
    ) -> Result<T, Error> {
        let (tx, rx) = mpsc::channel();
        self.fetch_one_as(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx)
    }

    /// Fetch and decode a whole collection, blocking.
    fn fetch_collection_blocking<T: DeserializeOwned + Send + 'static>(
        &self,
        path: &CollectionPath,
    ) -> Result<Vec<Document<T>>, Error> {
        let (tx, rx) = mpsc::channel();
        self.fetch_collection_as(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx)
    }
}

impl<C: DocumentFetch + ?Sized> BlockingFetch for C {}

/// Blocking typed writes.
///
/// Automatically implemented for every [`DocumentWrite`]. Shape failures
/// and backend failures arrive through the same `Result` here, since the
/// caller is waiting anyway.
pub trait BlockingWrite: DocumentWrite {
    /// Encode and write a document, blocking until the backend completes.
    fn set_from_blocking<T: Serialize>(
        &self,
        path: &DocumentPath,
        data: &T,
    ) -> Result<(), Error> {
        let (tx, rx) = mpsc::channel();
        self.set_from(path, data, move |result| {
            let _ = tx.send(result);
        })?;
        wait(rx)
    }

    /// Encode and add a document, blocking; returns the generated path.
    fn add_from_blocking<T: Serialize>(
        &self,
        collection: &CollectionPath,
        data: &T,
    ) -> Result<DocumentPath, Error> {
        let (tx, rx) = mpsc::channel();
        self.add_from(collection, data, move |result| {
            let _ = tx.send(result);
        })?;
        wait(rx)
    }

    /// Delete a document, blocking.
    fn delete_blocking(&self, path: &DocumentPath) -> Result<(), Error> {
        let (tx, rx) = mpsc::channel();
        self.delete_with(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx)
    }
}

impl<C: DocumentWrite + ?Sized> BlockingWrite for C {}
