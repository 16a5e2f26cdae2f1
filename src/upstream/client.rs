use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::Instrument;
use uuid::Uuid;

use super::{Operation, Upstream};
use crate::config::ServerConfig;
use crate::error::{ConfigError, UpstreamError};

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Authenticated client for the AFFiNE GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GraphqlClient {
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.graphql_endpoint(),
            config.api_token.clone(),
            config.request_timeout,
        )
    }

    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mcp-affine-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    async fn send(
        &self,
        label: &str,
        operation: &Operation,
        variables: Value,
    ) -> Result<Value, UpstreamError> {
        let body = json!({
            "query": operation.document,
            "variables": variables,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                UpstreamError::transport(label, format!("failed to reach {}: {e}", self.endpoint))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| {
                UpstreamError::transport(label, format!("failed to read response body: {e}"))
            })?;

        if !status.is_success() {
            return Err(UpstreamError::http_status(label, status.as_u16(), &text));
        }

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|e| {
                UpstreamError::malformed(label, format!("response is not a GraphQL envelope: {e}"))
            })?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(UpstreamError::application(
                label,
                errors.iter().map(|e| e.message.as_str()),
            ));
        }

        match envelope.data {
            Some(data) if data.is_object() => Ok(data),
            _ => Err(UpstreamError::malformed(label, "response envelope has no data")),
        }
    }
}

#[async_trait]
impl Upstream for GraphqlClient {
    async fn execute(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<Value, UpstreamError> {
        let label = operation.label(&variables);
        let correlation_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "upstream",
            operation = operation.name,
            correlation_id = %correlation_id,
        );

        async {
            tracing::debug!(call = %label, "sending");
            let outcome = self.send(&label, operation, variables).await;
            match &outcome {
                Ok(_) => tracing::debug!("completed"),
                Err(e) => tracing::warn!(kind = %e.kind, error = %e, "upstream call failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}
