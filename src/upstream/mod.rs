//! Upstream boundary: one GraphQL request per logical operation.

pub mod client;
pub mod operations;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::UpstreamError;

pub use client::GraphqlClient;
pub use operations::Operation;

/// Executes a fixed operation against the remote API.
///
/// Implementations issue exactly one physical call per invocation, never
/// retry, and return the envelope's `data` object on success.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn execute(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<Value, UpstreamError>;
}

/// Execute `operation` and decode the value found at `path` inside `data`.
///
/// A missing or `null` value at `path`, or one that does not decode as `T`,
/// is reported as a malformed response.
pub async fn execute_at<T>(
    upstream: &dyn Upstream,
    operation: &Operation,
    variables: Value,
    path: &[&str],
) -> Result<T, UpstreamError>
where
    T: DeserializeOwned,
{
    let label = operation.label(&variables);
    let data = upstream.execute(operation, variables).await?;

    let mut node = &data;
    for key in path {
        node = match node.get(key) {
            Some(next) if !next.is_null() => next,
            _ => {
                return Err(UpstreamError::malformed(
                    label,
                    format!("response has no value at data.{}", path.join(".")),
                ));
            }
        };
    }

    T::deserialize(node).map_err(|e| {
        UpstreamError::malformed(
            label,
            format!("cannot decode data.{}: {e}", path.join(".")),
        )
    })
}
