//! Typed access to document-database clients.
//!
//! This layer binds a typed, path-addressed data model onto the untyped
//! client boundary of `docbind-client`. It adds:
//!
//! - [`TypedDocumentSnapshot`] / [`TypedCollectionSnapshot`]: decode
//!   snapshots into domain types.
//! - [`TypedFetch`] / [`TypedListen`] / [`TypedWrite`]: invoke the
//!   underlying primitives and report one decoded `Result` per completion
//!   or event.
//! - [`BlockingFetch`] / [`BlockingWrite`]: the same operations as plain
//!   blocking calls.
//! - Value ⇄ serde conversions ([`to_value`], [`from_value`],
//!   [`to_document_fields`]).
//!
//! All traits are blanket-implemented; bringing one into scope is enough.
//!
//! ```rust
//! use docbind_client::{doc_path, DocumentFetch};
//! use docbind_typed::{BlockingFetch, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! fn load_user(client: &dyn DocumentFetch) -> Result<User, Error> {
//!     client.fetch_one_blocking(&doc_path!("users/alice"))
//! }
//! ```
//!
//! # Async Support
//!
//! Enable the `async` feature for [`AsyncTypedFetch`] and
//! [`AsyncTypedWrite`], which adapt the same callbacks onto awaitable
//! futures.

mod blocking;
mod convert;
mod document;
mod error;
mod snapshot;

pub use blocking::{BlockingFetch, BlockingWrite};
pub use convert::{from_value, json_to_value, to_document_fields, to_value, value_to_json};
pub use document::{TypedFetch, TypedListen, TypedWrite};
pub use error::Error;
pub use snapshot::{Document, TypedCollectionSnapshot, TypedDocumentSnapshot};

// Re-export boundary types for convenience.
pub use docbind_client::{
    ClientError, CollectionPath, CollectionSnapshot, DocumentClient, DocumentFetch,
    DocumentListen, DocumentPath, DocumentSnapshot, DocumentWrite, ListenerRegistration, Path,
    PathError, Value,
};

#[cfg(feature = "async")]
mod async_typed;

#[cfg(feature = "async")]
pub use async_typed::{AsyncTypedFetch, AsyncTypedWrite};
