use serde::Serialize;
use serde_json::json;

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::model::{Comment, Connection, Page};
use crate::protocol::{
    CreateCommentParams, DeleteCommentParams, ListCommentsParams, ResolveCommentParams,
    UpdateCommentParams,
};
use crate::upstream::{execute_at, operations};

/// Page size when `list_comments` is called without `limit`.
pub const DEFAULT_COMMENT_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub workspace_id: String,
    pub doc_id: String,
    #[serde(flatten)]
    pub page: Page<Comment>,
}

/// Outcome of a comment mutation that returns only a boolean upstream.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAck {
    pub comment_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
}

/// Handle a `list_comments` tool call. Only the first page is fetched.
pub async fn list_comments(
    params: ListCommentsParams,
    bridge: &Bridge,
) -> Result<CommentPage, BridgeError> {
    let workspace_id = bridge.workspace_for("list_comments", params.workspace_id.as_deref())?;
    let limit = params.limit.unwrap_or(DEFAULT_COMMENT_LIMIT);

    let conn: Connection<Comment> = execute_at(
        bridge.upstream(),
        &operations::LIST_COMMENTS,
        json!({
            "workspaceId": workspace_id,
            "docId": params.doc_id,
            "first": limit,
        }),
        &["workspace", "comments"],
    )
    .await?;

    Ok(CommentPage {
        workspace_id,
        doc_id: params.doc_id,
        page: conn.into(),
    })
}

/// Handle a `create_comment` tool call.
pub async fn create_comment(
    params: CreateCommentParams,
    bridge: &Bridge,
) -> Result<Comment, BridgeError> {
    let workspace_id = bridge.workspace_for("create_comment", params.workspace_id.as_deref())?;

    let comment = execute_at(
        bridge.upstream(),
        &operations::CREATE_COMMENT,
        json!({
            "input": {
                "workspaceId": workspace_id,
                "docId": params.doc_id,
                "docMode": params.doc_mode,
                "docTitle": params.doc_title.unwrap_or_default(),
                "content": params.content,
            }
        }),
        &["createComment"],
    )
    .await?;
    Ok(comment)
}

/// Handle an `update_comment` tool call.
pub async fn update_comment(
    params: UpdateCommentParams,
    bridge: &Bridge,
) -> Result<CommentAck, BridgeError> {
    let success = execute_at(
        bridge.upstream(),
        &operations::UPDATE_COMMENT,
        json!({ "input": { "id": params.comment_id, "content": params.content } }),
        &["updateComment"],
    )
    .await?;
    Ok(CommentAck {
        comment_id: params.comment_id,
        success,
        resolved: None,
    })
}

/// Handle a `resolve_comment` tool call. `resolved: false` reopens the thread.
pub async fn resolve_comment(
    params: ResolveCommentParams,
    bridge: &Bridge,
) -> Result<CommentAck, BridgeError> {
    let success = execute_at(
        bridge.upstream(),
        &operations::RESOLVE_COMMENT,
        json!({ "input": { "id": params.comment_id, "resolved": params.resolved } }),
        &["resolveComment"],
    )
    .await?;
    Ok(CommentAck {
        comment_id: params.comment_id,
        success,
        resolved: Some(params.resolved),
    })
}

/// Handle a `delete_comment` tool call.
pub async fn delete_comment(
    params: DeleteCommentParams,
    bridge: &Bridge,
) -> Result<CommentAck, BridgeError> {
    let success = execute_at(
        bridge.upstream(),
        &operations::DELETE_COMMENT,
        json!({ "id": params.comment_id }),
        &["deleteComment"],
    )
    .await?;
    Ok(CommentAck {
        comment_id: params.comment_id,
        success,
        resolved: None,
    })
}
