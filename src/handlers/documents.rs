use serde::Serialize;
use serde_json::json;

use crate::bridge::Bridge;
use crate::error::{BridgeError, UpstreamError};
use crate::handlers::search;
use crate::model::{Connection, Document, Page, PublicationState};
use crate::protocol::{DocumentParams, ListDocumentsParams, PublishParams};
use crate::upstream::{execute_at, operations};

/// Page size when `list_documents` is called without `limit`.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Hits requested by the `get_document` snippet probe.
const PROBE_LIMIT: u32 = 10;

/// Returned in place of body content, which the GraphQL API does not expose.
pub const CONTENT_UNAVAILABLE: &str =
    "Document body content is not available through the AFFiNE GraphQL API. \
Only metadata is returned; open the document in AFFiNE to read its content.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    pub workspace_id: String,
    #[serde(flatten)]
    pub page: Page<Document>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub workspace_id: String,
    pub document: Document,
    pub content: &'static str,
    /// Highlighted excerpt from search, when the probe found one.
    pub snippet: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationChange {
    pub workspace_id: String,
    #[serde(flatten)]
    pub state: PublicationState,
}

/// One page of documents in `workspace_id`; `cursor: None` fetches the first page.
pub async fn fetch_document_page(
    bridge: &Bridge,
    workspace_id: &str,
    limit: u32,
    cursor: Option<&str>,
) -> Result<DocumentPage, UpstreamError> {
    let conn: Connection<Document> = execute_at(
        bridge.upstream(),
        &operations::LIST_DOCS,
        json!({
            "workspaceId": workspace_id,
            "first": limit,
            "after": cursor,
        }),
        &["workspace", "docs"],
    )
    .await?;

    Ok(DocumentPage {
        workspace_id: workspace_id.to_string(),
        page: conn.into(),
    })
}

pub async fn fetch_document(
    bridge: &Bridge,
    workspace_id: &str,
    doc_id: &str,
) -> Result<Document, UpstreamError> {
    execute_at(
        bridge.upstream(),
        &operations::GET_DOC,
        json!({ "workspaceId": workspace_id, "docId": doc_id }),
        &["workspace", "doc"],
    )
    .await
}

/// Handle a `list_documents` tool call.
pub async fn list_documents(
    params: ListDocumentsParams,
    bridge: &Bridge,
) -> Result<DocumentPage, BridgeError> {
    let workspace_id = bridge.workspace_for("list_documents", params.workspace_id.as_deref())?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    Ok(fetch_document_page(bridge, &workspace_id, limit, params.cursor.as_deref()).await?)
}

/// Handle a `get_document` tool call.
///
/// Metadata failures propagate. The follow-up search probe is best effort:
/// its failure only leaves `snippet` empty.
pub async fn get_document(
    params: DocumentParams,
    bridge: &Bridge,
) -> Result<DocumentView, BridgeError> {
    let workspace_id = bridge.workspace_for("get_document", params.workspace_id.as_deref())?;
    let document = fetch_document(bridge, &workspace_id, &params.doc_id).await?;

    let keyword = document.title.as_deref().unwrap_or(&document.id);
    let probe = search::search_workspace(bridge, &workspace_id, keyword, PROBE_LIMIT).await;
    let snippet = match probe {
        Ok(hits) => hits
            .into_iter()
            .find(|hit| hit.doc_id == document.id)
            .and_then(|hit| hit.highlight),
        Err(e) => {
            tracing::debug!(doc_id = %document.id, error = %e, "snippet probe failed");
            None
        }
    };

    Ok(DocumentView {
        workspace_id,
        document,
        content: CONTENT_UNAVAILABLE,
        snippet,
    })
}

/// Handle a `publish_document` tool call.
pub async fn publish_document(
    params: PublishParams,
    bridge: &Bridge,
) -> Result<PublicationChange, BridgeError> {
    let workspace_id = bridge.workspace_for("publish_document", params.workspace_id.as_deref())?;
    let state = execute_at(
        bridge.upstream(),
        &operations::PUBLISH_DOC,
        json!({
            "workspaceId": workspace_id,
            "docId": params.doc_id,
            "mode": params.mode,
        }),
        &["publishDoc"],
    )
    .await?;
    Ok(PublicationChange { workspace_id, state })
}

/// Handle an `unpublish_document` tool call.
pub async fn unpublish_document(
    params: DocumentParams,
    bridge: &Bridge,
) -> Result<PublicationChange, BridgeError> {
    let workspace_id = bridge.workspace_for("unpublish_document", params.workspace_id.as_deref())?;
    let state = execute_at(
        bridge.upstream(),
        &operations::REVOKE_PUBLIC_DOC,
        json!({ "workspaceId": workspace_id, "docId": params.doc_id }),
        &["revokePublicDoc"],
    )
    .await?;
    Ok(PublicationChange { workspace_id, state })
}
