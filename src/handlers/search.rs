use futures::future::join_all;
use serde::Serialize;
use serde_json::json;

use crate::bridge::Bridge;
use crate::error::{BridgeError, UpstreamError};
use crate::handlers::{documents, workspaces};
use crate::model::SearchHit;
use crate::protocol::SearchParams;
use crate::upstream::{execute_at, operations};

/// Hit count when `search_documents` is called without `limit`.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

pub const SEARCH_GUIDANCE: &str = "Provide a non-empty `query` to search documents across all \
accessible workspaces, or pass `workspaceId` with an empty query to list that \
workspace's documents.";

const LISTING_NOTE: &str = "Empty query: listing documents in the workspace instead of searching.";

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    Hits {
        query: String,
        /// Workspace ids that were searched successfully.
        workspaces: Vec<String>,
        /// Workspace ids whose search failed during fan-out.
        #[serde(rename = "skippedWorkspaces", skip_serializing_if = "Vec::is_empty")]
        skipped_workspaces: Vec<String>,
        hits: Vec<SearchHit>,
    },
    Listing {
        note: &'static str,
        documents: documents::DocumentPage,
    },
    Guidance {
        message: &'static str,
    },
}

/// Search one workspace.
pub async fn search_workspace(
    bridge: &Bridge,
    workspace_id: &str,
    keyword: &str,
    limit: u32,
) -> Result<Vec<SearchHit>, UpstreamError> {
    execute_at(
        bridge.upstream(),
        &operations::SEARCH_DOCS,
        json!({
            "workspaceId": workspace_id,
            "keyword": keyword,
            "limit": limit,
        }),
        &["workspace", "searchDocs"],
    )
    .await
}

/// Per-workspace share of a fan-out search: `ceil(limit / workspace_count)`.
///
/// Workspaces returning fewer hits than their share are not compensated for,
/// so the merged result can hold fewer than `limit` hits.
pub fn per_workspace_limit(limit: u32, workspace_count: usize) -> u32 {
    if workspace_count == 0 {
        return limit;
    }
    let count = u32::try_from(workspace_count).unwrap_or(u32::MAX);
    limit.div_ceil(count)
}

/// Handle a `search_documents` tool call.
///
/// - blank query, no workspace: guidance only, no upstream call
/// - blank query with workspace: first page of that workspace's documents
/// - workspace given: one scoped search, failures propagate
/// - no workspace: fan out over every workspace, skipping failed ones
pub async fn search_documents(
    params: SearchParams,
    bridge: &Bridge,
) -> Result<SearchOutcome, BridgeError> {
    let query = params.query.trim();
    let workspace_id = params
        .workspace_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    if query.is_empty() {
        return match workspace_id {
            Some(id) => {
                let page = documents::fetch_document_page(
                    bridge,
                    id,
                    documents::DEFAULT_LIST_LIMIT,
                    None,
                )
                .await?;
                Ok(SearchOutcome::Listing {
                    note: LISTING_NOTE,
                    documents: page,
                })
            }
            None => Ok(SearchOutcome::Guidance {
                message: SEARCH_GUIDANCE,
            }),
        };
    }

    if let Some(id) = workspace_id {
        let hits = search_workspace(bridge, id, query, limit).await?;
        return Ok(SearchOutcome::Hits {
            query: query.to_string(),
            workspaces: vec![id.to_string()],
            skipped_workspaces: Vec::new(),
            hits,
        });
    }

    fan_out(bridge, query, limit).await
}

async fn fan_out(bridge: &Bridge, query: &str, limit: u32) -> Result<SearchOutcome, BridgeError> {
    let workspace_ids: Vec<String> = workspaces::fetch_workspaces(bridge)
        .await?
        .into_iter()
        .map(|ws| ws.id)
        .collect();

    let share = per_workspace_limit(limit, workspace_ids.len());
    let results = join_all(
        workspace_ids
            .iter()
            .map(|id| search_workspace(bridge, id, query, share)),
    )
    .await;

    let mut searched = Vec::new();
    let mut skipped = Vec::new();
    let mut hits = Vec::new();
    for (workspace_id, result) in workspace_ids.into_iter().zip(results) {
        match result {
            Ok(found) => {
                hits.extend(found.into_iter().map(|mut hit| {
                    hit.workspace_id = Some(workspace_id.clone());
                    hit
                }));
                searched.push(workspace_id);
            }
            Err(e) => {
                tracing::warn!(
                    workspace_id = %workspace_id,
                    error = %e,
                    "skipping workspace in fan-out search"
                );
                skipped.push(workspace_id);
            }
        }
    }
    hits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

    Ok(SearchOutcome::Hits {
        query: query.to_string(),
        workspaces: searched,
        skipped_workspaces: skipped,
        hits,
    })
}
