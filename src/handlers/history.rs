use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::json;

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::model::HistoryEntry;
use crate::protocol::ListHistoryParams;
use crate::upstream::{execute_at, operations};

/// Entries per page when `list_history` is called without `limit`.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub workspace_id: String,
    pub doc_id: String,
    pub entries: Vec<HistoryEntry>,
    /// Pass as `before` to fetch older entries. Absent once a page comes back short.
    pub next_before: Option<String>,
}

/// Handle a `list_history` tool call.
///
/// Entries are newest first. An empty page is a normal end of history.
pub async fn list_history(
    params: ListHistoryParams,
    bridge: &Bridge,
) -> Result<HistoryPage, BridgeError> {
    let workspace_id = bridge.workspace_for("list_history", params.workspace_id.as_deref())?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let entries: Vec<HistoryEntry> = execute_at(
        bridge.upstream(),
        &operations::LIST_HISTORY,
        json!({
            "workspaceId": workspace_id,
            "docId": params.doc_id,
            "take": limit,
            "before": params.before,
        }),
        &["workspace", "histories"],
    )
    .await?;

    let full_page = usize::try_from(limit).is_ok_and(|limit| entries.len() >= limit);
    let next_before = entries
        .last()
        .filter(|_| full_page)
        .map(|entry| entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true));

    Ok(HistoryPage {
        workspace_id,
        doc_id: params.doc_id,
        entries,
        next_before,
    })
}
