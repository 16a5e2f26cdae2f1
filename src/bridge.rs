use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::{BridgeError, ConfigError};
use crate::upstream::{GraphqlClient, Upstream};

/// Read-only capabilities shared by every handler invocation.
#[derive(Clone)]
pub struct Bridge {
    upstream: Arc<dyn Upstream>,
    default_workspace_id: Option<String>,
}

impl Bridge {
    pub fn new(upstream: Arc<dyn Upstream>, default_workspace_id: Option<String>) -> Self {
        Self {
            upstream,
            default_workspace_id,
        }
    }

    /// Wire a GraphQL client from startup configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let client = GraphqlClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(client),
            config.default_workspace_id.clone(),
        ))
    }

    pub fn upstream(&self) -> &dyn Upstream {
        self.upstream.as_ref()
    }

    pub fn default_workspace_id(&self) -> Option<&str> {
        self.default_workspace_id.as_deref()
    }

    /// Pick the explicit workspace id, else the configured default.
    ///
    /// Blank ids count as absent. Fails before any upstream call when
    /// neither is available.
    pub fn workspace_for(&self, tool: &str, explicit: Option<&str>) -> Result<String, BridgeError> {
        explicit
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or(self.default_workspace_id())
            .map(str::to_string)
            .ok_or_else(|| BridgeError::MissingWorkspace {
                tool: tool.to_string(),
            })
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("default_workspace_id", &self.default_workspace_id)
            .finish_non_exhaustive()
    }
}
