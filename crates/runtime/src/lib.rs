#![deny(clippy::future_not_send)]

//! The storage side of generated model resolvers.
//!
//! Resolvers never talk to a database directly. They assemble a [`query::Query`] handle,
//! or hand over documents to write, and leave the rest to an implementation of
//! [`storage::Storage`]. `runtime-local` ships an in-memory one.

pub mod filter;
pub mod query;
pub mod storage;

/// A document as it is handed to and returned from storage. Keys are storage field names.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// The identity field every stored document carries.
pub const ID_FIELD: &str = "_id";
