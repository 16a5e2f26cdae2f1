//! Addressable read-only views over `affine://` URIs.
//!
//! Recognized forms:
//! - `affine://workspace/{id}`: workspace detail, degrading to its document list
//! - `affine://workspace/{id}/docs`: first page of the workspace's documents
//! - `affine://search?q={query}`: search across all workspaces

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::handlers::{documents, search, workspaces};
use crate::protocol::SearchParams;

pub const SCHEME: &str = "affine";

/// Page size of the document listing behind `workspace/{id}/docs`.
pub const RESOURCE_PAGE_SIZE: u32 = 50;

const FALLBACK_NOTE: &str =
    "Workspace details could not be loaded; showing the workspace's documents instead.";

const SEARCH_USAGE: &str = "Append a query parameter to search, e.g. affine://search?q=roadmap";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    Workspace { id: String },
    WorkspaceDocs { id: String },
    Search { query: Option<String> },
}

impl ResourceUri {
    pub fn parse(uri: &str) -> Result<Self, BridgeError> {
        let invalid = || BridgeError::InvalidResource {
            uri: uri.to_string(),
        };

        let url = Url::parse(uri).map_err(|_| invalid())?;
        if url.scheme() != SCHEME {
            return Err(invalid());
        }

        // Segments are split before decoding so an escaped `/` stays inside its id.
        let segments = url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8().map(Cow::into_owned))
            .collect::<Result<Vec<String>, _>>()
            .map_err(|_| invalid())?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match (url.host_str(), segments.as_slice()) {
            (Some("workspace"), [id]) => Ok(Self::Workspace { id: id.to_string() }),
            (Some("workspace"), [id, "docs"]) => Ok(Self::WorkspaceDocs { id: id.to_string() }),
            (Some("search"), []) => {
                let query = url
                    .query_pairs()
                    .find(|(key, _)| key == "q")
                    .map(|(_, value)| value.trim().to_string())
                    .filter(|q| !q.is_empty());
                Ok(Self::Search { query })
            }
            _ => Err(invalid()),
        }
    }
}

/// Advertised concrete resource.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// Advertised URI template.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceTemplate {
    #[serde(rename = "uriTemplate")]
    pub uri_template: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// Concrete resources: search always, plus the default workspace when configured.
pub fn list(bridge: &Bridge) -> Vec<ResourceDefinition> {
    let mut resources = Vec::new();
    if let Some(id) = bridge.default_workspace_id() {
        resources.push(ResourceDefinition {
            uri: format!("{SCHEME}://workspace/{id}"),
            name: "Default workspace".into(),
            description: format!("Details of workspace {id}"),
            mime_type: "application/json",
        });
        resources.push(ResourceDefinition {
            uri: format!("{SCHEME}://workspace/{id}/docs"),
            name: "Default workspace documents".into(),
            description: format!("Documents in workspace {id}"),
            mime_type: "application/json",
        });
    }
    resources.push(ResourceDefinition {
        uri: format!("{SCHEME}://search"),
        name: "Search".into(),
        description: "Search documents across all workspaces with ?q=".into(),
        mime_type: "application/json",
    });
    resources
}

pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate {
            uri_template: "affine://workspace/{workspaceId}",
            name: "Workspace",
            description: "Workspace details (falls back to its document list)",
            mime_type: "application/json",
        },
        ResourceTemplate {
            uri_template: "affine://workspace/{workspaceId}/docs",
            name: "Workspace documents",
            description: "First page of documents in a workspace",
            mime_type: "application/json",
        },
        ResourceTemplate {
            uri_template: "affine://search?q={query}",
            name: "Search",
            description: "Search documents across all workspaces",
            mime_type: "application/json",
        },
    ]
}

/// Resolve a resource URI to structured content.
///
/// For `workspace/{id}`, a failed detail read degrades to the document
/// listing. The detail error surfaces only if the listing fails too.
pub async fn resolve(uri: &str, bridge: &Bridge) -> Result<Value, BridgeError> {
    match ResourceUri::parse(uri)? {
        ResourceUri::Workspace { id } => match workspaces::fetch_workspace(bridge, &id).await {
            Ok(workspace) => Ok(serde_json::to_value(workspace)?),
            Err(detail_err) => {
                tracing::warn!(
                    workspace_id = %id,
                    error = %detail_err,
                    "workspace detail failed, falling back to listing"
                );
                match documents::fetch_document_page(bridge, &id, RESOURCE_PAGE_SIZE, None).await {
                    Ok(page) => Ok(json!({
                        "note": FALLBACK_NOTE,
                        "documents": page,
                    })),
                    Err(listing_err) => {
                        tracing::debug!(
                            workspace_id = %id,
                            error = %listing_err,
                            "fallback listing failed"
                        );
                        Err(detail_err.into())
                    }
                }
            }
        },
        ResourceUri::WorkspaceDocs { id } => {
            let page = documents::fetch_document_page(bridge, &id, RESOURCE_PAGE_SIZE, None).await?;
            Ok(serde_json::to_value(page)?)
        }
        ResourceUri::Search { query: None } => Ok(json!({
            "message": SEARCH_USAGE,
            "usage": "affine://search?q={query}",
        })),
        ResourceUri::Search { query: Some(query) } => {
            let outcome = search::search_documents(
                SearchParams {
                    query,
                    workspace_id: None,
                    limit: None,
                },
                bridge,
            )
            .await?;
            Ok(serde_json::to_value(outcome)?)
        }
    }
}
