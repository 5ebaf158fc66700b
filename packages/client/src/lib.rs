//! Untyped document-database client boundary.
//!
//! This crate defines the shapes the rest of the workspace is built on:
//!
//! - [`DocumentPath`] / [`CollectionPath`]: validated, depth-checked paths.
//! - [`Value`]: the untyped tree representation backends traffic in.
//! - [`DocumentSnapshot`] / [`CollectionSnapshot`]: what fetches and listen
//!   events deliver.
//! - [`DocumentFetch`] / [`DocumentListen`] / [`DocumentWrite`]: the
//!   callback-based boundary an external document database occupies.
//! - [`ListenerRegistration`]: the handle that detaches a subscription.
//! - [`ClientError`]: transport-level failures forwarded from backends.
//!
//! No typed semantics live here; see `docbind-typed` for the serde bridge.

mod error;
mod listener;
mod path;
mod snapshot;
mod traits;
mod value;

pub use error::ClientError;
pub use listener::ListenerRegistration;
pub use path::{CollectionPath, DocumentPath, Path, PathError};
pub use snapshot::{CollectionSnapshot, DocumentSnapshot};
pub use traits::{
    AddCallback, CollectionCallback, CollectionObserver, DocumentCallback, DocumentClient,
    DocumentFetch, DocumentListen, DocumentObserver, DocumentWrite, WriteCallback,
};
pub use value::Value;
