//! # docbind-rest
//!
//! A document-database client that maps the `docbind-client` boundary onto
//! a REST-style HTTP backend.
//!
//! ## Protocol
//!
//! - fetch document     → `GET /{collection}/{id}` — 404 means missing,
//!   otherwise a JSON object of fields
//! - fetch collection   → `GET /{collection}` — a JSON object keyed by
//!   document id
//! - set document       → `PUT /{collection}/{id}` with the fields as JSON
//! - add document       → `POST /{collection}`; the response supplies the
//!   generated id as `{"id": "..."}`
//! - delete document    → `DELETE /{collection}/{id}` — 404 counts as done
//!
//! Every operation runs on a background thread and completes through the
//! boundary callback. Live listening needs a change feed the plain REST
//! mapping doesn't have, so the listen primitives report
//! `ClientError::Unsupported`.
//!
//! ## Example
//!
//! ```ignore
//! use docbind_client::doc_path;
//! use docbind_rest::RestClient;
//! use docbind_typed::BlockingFetch;
//!
//! let client = RestClient::new("https://docs.example.com")?;
//! let user: User = client.fetch_one_blocking(&doc_path!("users/abc"))?;
//! ```

mod client;
mod error;

pub use client::RestClient;
pub use error::Error;
