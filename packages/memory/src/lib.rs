//! In-memory document-database client.
//!
//! [`MemoryClient`] implements the full client boundary from
//! `docbind-client` against a process-local map, with synchronous live
//! listeners. It exists for tests, fixtures and local development:
//!
//! ```rust
//! use docbind_client::{coll_path, doc_path};
//! use docbind_memory::MemoryClient;
//! use docbind_typed::{BlockingFetch, BlockingWrite};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! let client = MemoryClient::new();
//! client
//!     .set_from_blocking(&doc_path!("users/alice"), &User { name: "Alice".into() })
//!     .unwrap();
//! let user: User = client.fetch_one_blocking(&doc_path!("users/alice")).unwrap();
//! assert_eq!(user.name, "Alice");
//! ```

mod client;

pub use client::MemoryClient;
