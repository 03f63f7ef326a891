use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::TransportError;

/// Named variables of a request.
pub type Variables = serde_json::Map<String, Value>;

/// The `data` member of a response: field name → resolved value.
pub type Data = serde_json::Map<String, Value>;

/// Request envelope posted to the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Variables,
}

/// Response envelope. Both members may be present at once when only some
/// fields resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Data>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }

    /// Validation details attached by the server to `BAD_USER_INPUT` errors.
    fn input_details(&self) -> Vec<&str> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.pointer("/exception/errors"))
            .and_then(Value::as_array)
            .map(|errs| errs.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Human-readable form shown in the notification.
    pub fn display_message(&self) -> String {
        match self.code() {
            Some("BAD_USER_INPUT") => {
                let details = self.input_details();
                if details.is_empty() {
                    format!("BAD_USER_INPUT: {}", self.message)
                } else {
                    format!("{}:\n {}", self.message, details.join("\n "))
                }
            }
            Some(code) => format!("{}: {}", code, self.message),
            None => self.message.clone(),
        }
    }
}

/// Performs one GraphQL request. Implementations must not retry.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError>;
}

/// JSON-over-HTTP POST transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(TransportError::Http)?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Run one request and hand back its `data`.
///
/// Failures never escape: a transport failure is reported through `report`
/// and yields `None`; application errors are reported as well, but any
/// `data` that came with them is still returned.
pub async fn graphql_fetch<T, F>(
    transport: &T,
    query: &str,
    variables: Variables,
    mut report: F,
) -> Option<Data>
where
    T: GraphQlTransport + ?Sized,
    F: FnMut(String),
{
    let request = GraphQlRequest {
        query: query.to_string(),
        variables,
    };
    debug!(
        variables = ?request.variables.keys().collect::<Vec<_>>(),
        "sending GraphQL request"
    );

    match transport.execute(&request).await {
        Ok(response) => {
            let errors = response.errors.unwrap_or_default();
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .map(GraphQlError::display_message)
                    .collect::<Vec<_>>()
                    .join("\n");
                warn!(count = errors.len(), "GraphQL response carried errors");
                report(message);
            }
            response.data
        }
        Err(e) => {
            warn!(error = %e, "GraphQL request failed");
            report(format!("Error in sending data to server: {}", e));
            None
        }
    }
}
