//! Async single-shot adapters.
//!
//! Enable the `async` feature to use these traits:
//!
//! ```toml
//! [dependencies]
//! docbind-typed = { version = "0.1", features = ["async"] }
//! ```
//!
//! Each method bridges the one-shot completion callback onto a
//! `tokio::sync::oneshot` channel and awaits it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::oneshot;

use docbind_client::{CollectionPath, DocumentFetch, DocumentPath, DocumentWrite};

use crate::document::{TypedFetch, TypedWrite};
use crate::snapshot::Document;
use crate::Error;

/// Await the single value a completion callback delivers.
async fn wait<T>(rx: oneshot::Receiver<Result<T, Error>>) -> Result<T, Error> {
    rx.await.unwrap_or(Err(Error::NoCompletion))
}

/// Async typed fetches.
///
/// Automatically implemented for every [`DocumentFetch`].
#[async_trait]
pub trait AsyncTypedFetch: DocumentFetch {
    /// Fetch and decode one document. A missing document is `Ok(None)`.
    async fn fetch_as_async<T: DeserializeOwned + Send + 'static>(
        &self,
        path: &DocumentPath,
    ) -> Result<Option<T>, Error> {
        let (tx, rx) = oneshot::channel();
        self.fetch_as(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx).await
    }

    /// Like [`fetch_as_async`](AsyncTypedFetch::fetch_as_async), but
    /// absence is [`Error::Missing`].
    async fn fetch_one_as_async<T: DeserializeOwned + Send + 'static>(
        &self,
        path: &DocumentPath,
    ) -> Result<T, Error> {
        let (tx, rx) = oneshot::channel();
        self.fetch_one_as(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx).await
    }

    /// Fetch and decode a whole collection.
    async fn fetch_collection_as_async<T: DeserializeOwned + Send + 'static>(
        &self,
        path: &CollectionPath,
    ) -> Result<Vec<Document<T>>, Error> {
        let (tx, rx) = oneshot::channel();
        self.fetch_collection_as(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx).await
    }
}

#[async_trait]
impl<C: DocumentFetch + ?Sized> AsyncTypedFetch for C {}

/// Async typed writes.
///
/// Automatically implemented for every [`DocumentWrite`]. Unlike the
/// callback form, shape failures and backend failures arrive through the
/// same returned `Result`.
#[async_trait]
pub trait AsyncTypedWrite: DocumentWrite {
    /// Encode and write a document.
    async fn set_from_async<T: Serialize + Sync>(
        &self,
        path: &DocumentPath,
        data: &T,
    ) -> Result<(), Error> {
        let (tx, rx) = oneshot::channel();
        self.set_from(path, data, move |result| {
            let _ = tx.send(result);
        })?;
        wait(rx).await
    }

    /// Encode and add a document; returns the generated path.
    async fn add_from_async<T: Serialize + Sync>(
        &self,
        collection: &CollectionPath,
        data: &T,
    ) -> Result<DocumentPath, Error> {
        let (tx, rx) = oneshot::channel();
        self.add_from(collection, data, move |result| {
            let _ = tx.send(result);
        })?;
        wait(rx).await
    }

    /// Delete a document.
    async fn delete_async(&self, path: &DocumentPath) -> Result<(), Error> {
        let (tx, rx) = oneshot::channel();
        self.delete_with(path, move |result| {
            let _ = tx.send(result);
        });
        wait(rx).await
    }
}

#[async_trait]
impl<C: DocumentWrite + ?Sized> AsyncTypedWrite for C {}
