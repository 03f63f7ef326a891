//! Typed errors for the two I/O seams of the client.
//!
//! - `TransportError` - one GraphQL request failed before an envelope was read
//! - `StoreError` - the local document store rejected an operation
//!
//! The list controller never returns either: transport errors are turned
//! into a notification message at the `graphql_fetch` boundary.

use thiserror::Error;

/// Network-level failures of a single GraphQL request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[source] reqwest::Error),

    #[error("server responded with status {status}")]
    Status { status: u16 },

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open document store at {location}: {source}")]
    Open {
        location: String,
        #[source]
        source: libsql::Error,
    },

    #[error("Document store query failed: {0}")]
    Query(#[from] libsql::Error),

    #[error("Invalid collection name '{0}'")]
    InvalidCollection(String),

    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("Failed to (de)serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Document store task failed: {0}")]
    Task(String),
}
