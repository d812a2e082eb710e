//! Endpoint configuration for the consumed CRM API.

use serde::{Deserialize, Serialize};

/// Production CRM API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.crm.refine.dev";

/// GraphQL and live-update endpoints of the consumed API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEndpoints {
    /// HTTP endpoint for queries and mutations.
    pub api_url: String,
    /// WebSocket endpoint for live-update subscriptions.
    pub ws_url: String,
}

impl RemoteEndpoints {
    /// Derives both endpoints from one base URL.
    ///
    /// The live endpoint uses the WebSocket counterpart of the base scheme.
    #[must_use]
    pub fn from_base(base: &str) -> Self {
        let trimmed = base.trim_end_matches('/');
        let ws_base = trimmed
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);
        Self {
            api_url: format!("{trimmed}/graphql"),
            ws_url: format!("{ws_base}/graphql"),
        }
    }
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE)
    }
}
