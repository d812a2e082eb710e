//! Transport port for the consumed GraphQL endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::board::ports::TransportError;

/// One request against the consumed GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    /// The query or mutation document.
    pub document: &'static str,
    /// Operation variables.
    pub variables: Value,
}

/// Executes GraphQL documents against the host transport.
///
/// The HTTP client, authentication headers, and connection handling live in
/// the host; implementations resolve to the raw response body.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Executes a request and returns the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] when no response body could be
    /// produced.
    async fn execute(&self, request: GraphRequest) -> Result<Value, TransportError>;
}
