//! Shared test double and fixtures for handler-level tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcp_affine_server::bridge::Bridge;
use mcp_affine_server::error::UpstreamError;
use mcp_affine_server::upstream::{Operation, Upstream};
use serde_json::{json, Value};

type Route = dyn Fn(&str, &Value) -> Result<Value, UpstreamError> + Send + Sync;

/// One recorded upstream invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: String,
    pub variables: Value,
}

/// In-memory `Upstream` that answers through a routing closure and records
/// every call it receives.
pub struct MockUpstream {
    route: Box<Route>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockUpstream {
    pub fn new<F>(route: F) -> Arc<Self>
    where
        F: Fn(&str, &Value) -> Result<Value, UpstreamError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            route: Box::new(route),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// A double that fails the test if it is ever called.
    pub fn unreachable() -> Arc<Self> {
        Self::new(|op, _| panic!("upstream must not be called, got {op}"))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .collect()
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn execute(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation: operation.name.to_string(),
            variables: variables.clone(),
        });
        (self.route)(operation.name, &variables)
    }
}

pub fn bridge(mock: &Arc<MockUpstream>) -> Bridge {
    Bridge::new(mock.clone(), None)
}

pub fn bridge_with_default(mock: &Arc<MockUpstream>, workspace_id: &str) -> Bridge {
    Bridge::new(mock.clone(), Some(workspace_id.to_string()))
}

pub fn app_error(operation: &str, message: &str) -> UpstreamError {
    UpstreamError::application(operation, [message])
}

// ---------------------------------------------------------------------------
// Upstream payload fixtures (the `data` object of a GraphQL envelope)
// ---------------------------------------------------------------------------

pub fn workspace_node(id: &str) -> Value {
    json!({
        "id": id,
        "public": false,
        "createdAt": "2024-03-01T09:00:00.000Z",
        "memberCount": 2,
        "owner": { "id": format!("owner-{id}"), "name": "Owner", "email": "owner@example.com" }
    })
}

pub fn workspaces_data(ids: &[&str]) -> Value {
    json!({ "workspaces": ids.iter().map(|id| workspace_node(id)).collect::<Vec<_>>() })
}

pub fn workspace_detail_data(id: &str) -> Value {
    let mut node = workspace_node(id);
    node["quota"] = json!({
        "name": "Pro",
        "storageQuota": 107374182400u64,
        "usedStorageQuota": 1048576,
        "memberLimit": 10,
        "memberCount": 2
    });
    json!({ "workspace": node })
}

pub fn doc_node(id: &str, title: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": title,
        "mode": "Page",
        "public": false,
        "createdAt": "2024-03-02T10:00:00.000Z",
        "updatedAt": "2024-03-03T11:00:00.000Z",
        "createdBy": { "id": "u1", "name": "Ada" },
        "lastUpdatedBy": { "id": "u2", "name": "Grace" }
    })
}

pub fn docs_data(docs: &[(&str, Option<&str>)], has_next: bool, end_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = docs
        .iter()
        .map(|(id, title)| json!({ "node": doc_node(id, *title) }))
        .collect();
    json!({
        "workspace": {
            "docs": {
                "totalCount": docs.len(),
                "pageInfo": { "hasNextPage": has_next, "endCursor": end_cursor },
                "edges": edges
            }
        }
    })
}

pub fn doc_detail_data(id: &str, title: Option<&str>, public: bool) -> Value {
    let mut node = doc_node(id, title);
    node["public"] = json!(public);
    node["summary"] = json!("A short summary");
    node["permissions"] = json!({ "Doc_Read": true, "Doc_Update": true, "Doc_Delete": false });
    json!({ "workspace": { "doc": node } })
}

pub fn search_data(hits: &[(&str, &str)]) -> Value {
    let hits: Vec<Value> = hits
        .iter()
        .map(|(doc_id, title)| {
            json!({
                "docId": doc_id,
                "title": title,
                "highlight": format!("…<b>{title}</b>…"),
                "createdAt": "2024-03-02T10:00:00.000Z",
                "updatedAt": "2024-03-03T11:00:00.000Z"
            })
        })
        .collect();
    json!({ "workspace": { "searchDocs": hits } })
}

pub fn comment_node(id: &str, resolved: bool) -> Value {
    json!({
        "id": id,
        "content": { "type": "doc", "text": format!("comment {id}") },
        "resolved": resolved,
        "createdAt": "2024-04-01T08:00:00.000Z",
        "updatedAt": "2024-04-01T08:00:00.000Z",
        "user": { "id": "u1", "name": "Ada", "avatarUrl": null },
        "replies": [{
            "id": format!("{id}-r1"),
            "content": { "type": "doc", "text": "reply" },
            "createdAt": "2024-04-01T09:00:00.000Z",
            "updatedAt": "2024-04-01T09:00:00.000Z",
            "user": { "id": "u2", "name": "Grace" }
        }]
    })
}

pub fn history_entry(timestamp: &str, workspace_id: &str) -> Value {
    json!({
        "id": timestamp,
        "timestamp": timestamp,
        "workspaceId": workspace_id,
        "editor": { "name": "Ada", "avatarUrl": null }
    })
}

/// Parse the single text block of a successful tool result.
pub fn tool_payload(result: &Value) -> Value {
    let text = result["content"][0]["text"].as_str().expect("text content");
    serde_json::from_str(text).expect("tool text is JSON")
}
