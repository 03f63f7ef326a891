//! GraphQL client plumbing: the transport seam, the fetch helper and the
//! documents the client sends.

pub mod queries;
pub mod transport;

pub use transport::{
    Data, GraphQlError, GraphQlRequest, GraphQlResponse, GraphQlTransport, HttpTransport,
    Variables, graphql_fetch,
};

use serde::de::DeserializeOwned;
use tracing::warn;

/// Take one field out of a response's `data` and decode it.
///
/// A missing field or an explicit `null` yields `Ok(None)`; callers treat
/// that the same as a failed request. A value of the wrong shape is an
/// error carrying the message to show the user.
pub fn take_field<T: DeserializeOwned>(data: &mut Data, field: &str) -> Result<Option<T>, String> {
    let Some(value) = data.remove(field) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(|e| {
        warn!(field, error = %e, "unexpected shape in GraphQL data");
        format!("Unexpected {} data from server: {}", field, e)
    })
}
