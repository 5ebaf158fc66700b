//! docbind: typed, path-addressed access to document databases.
//!
//! The workspace binds a typed data model onto an untyped document-database
//! boundary. Layers, bottom up:
//!
//! - [`client`](docbind_client): paths, values, snapshots, the
//!   callback-based client traits, listener registrations.
//! - [`typed`](docbind_typed): the serde bridge — decode snapshots, adapt
//!   fetch/listen/write into single typed results, blocking and (with the
//!   `async` feature) async single-shot forms.
//! - [`memory`](docbind_memory): an in-memory client with live listeners.
//! - [`rest`](docbind_rest): a client over a REST-style HTTP backend.
//!
//! This crate re-exports the whole public surface.

pub use docbind_client::{
    coll_path, doc_path, AddCallback, ClientError, CollectionCallback, CollectionObserver,
    CollectionPath, CollectionSnapshot, DocumentCallback, DocumentClient, DocumentFetch,
    DocumentListen, DocumentObserver, DocumentPath, DocumentSnapshot, DocumentWrite,
    ListenerRegistration, Path, PathError, Value, WriteCallback,
};

pub use docbind_typed::{
    from_value, to_document_fields, to_value, BlockingFetch, BlockingWrite, Document, Error,
    TypedCollectionSnapshot, TypedDocumentSnapshot, TypedFetch, TypedListen, TypedWrite,
};

#[cfg(feature = "async")]
pub use docbind_typed::{AsyncTypedFetch, AsyncTypedWrite};

pub use docbind_memory::MemoryClient;

pub use docbind_rest::{Error as RestError, RestClient};
