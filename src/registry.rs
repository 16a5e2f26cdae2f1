//! Tool catalogue and name-based routing.
//!
//! Each tool is a `ToolKind` variant; `invoke` maps the variant to its
//! handler after checking the arguments against the declared input schema.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::handlers::{blobs, comments, documents, history, search, workspaces};
use crate::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ListWorkspaces,
    GetWorkspace,
    CurrentUser,
    SearchDocuments,
    ListDocuments,
    GetDocument,
    PublishDocument,
    UnpublishDocument,
    ListComments,
    CreateComment,
    UpdateComment,
    ResolveComment,
    DeleteComment,
    ListHistory,
    ListBlobs,
    DeleteBlob,
    CleanupBlobs,
}

/// Advertised shape of one tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolKind {
    /// Advertisement order for `tools/list`.
    pub const ALL: [ToolKind; 17] = [
        ToolKind::ListWorkspaces,
        ToolKind::GetWorkspace,
        ToolKind::CurrentUser,
        ToolKind::SearchDocuments,
        ToolKind::ListDocuments,
        ToolKind::GetDocument,
        ToolKind::PublishDocument,
        ToolKind::UnpublishDocument,
        ToolKind::ListComments,
        ToolKind::CreateComment,
        ToolKind::UpdateComment,
        ToolKind::ResolveComment,
        ToolKind::DeleteComment,
        ToolKind::ListHistory,
        ToolKind::ListBlobs,
        ToolKind::DeleteBlob,
        ToolKind::CleanupBlobs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ListWorkspaces => "list_workspaces",
            Self::GetWorkspace => "get_workspace",
            Self::CurrentUser => "current_user",
            Self::SearchDocuments => "search_documents",
            Self::ListDocuments => "list_documents",
            Self::GetDocument => "get_document",
            Self::PublishDocument => "publish_document",
            Self::UnpublishDocument => "unpublish_document",
            Self::ListComments => "list_comments",
            Self::CreateComment => "create_comment",
            Self::UpdateComment => "update_comment",
            Self::ResolveComment => "resolve_comment",
            Self::DeleteComment => "delete_comment",
            Self::ListHistory => "list_history",
            Self::ListBlobs => "list_blobs",
            Self::DeleteBlob => "delete_blob",
            Self::CleanupBlobs => "cleanup_blobs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ListWorkspaces => "List all workspaces accessible with the configured token",
            Self::GetWorkspace => {
                "Get workspace details: owner, visibility, member count and quota"
            }
            Self::CurrentUser => "Show the account the server is authenticated as",
            Self::SearchDocuments => {
                "Search documents by keyword in one workspace, \
                 or across all workspaces when workspaceId is omitted"
            }
            Self::ListDocuments => "List documents in a workspace, paginated by cursor",
            Self::GetDocument => {
                "Get document metadata (title, mode, visibility, editors, permissions)"
            }
            Self::PublishDocument => "Make a document publicly accessible in Page or Edgeless mode",
            Self::UnpublishDocument => "Revoke public access to a document",
            Self::ListComments => "List comments (with replies) on a document",
            Self::CreateComment => "Add a comment to a document",
            Self::UpdateComment => "Replace the content of a comment",
            Self::ResolveComment => "Resolve or reopen a comment thread",
            Self::DeleteComment => "Delete a comment",
            Self::ListHistory => "List a document's version history, newest first",
            Self::ListBlobs => "List blob metadata in a workspace with the total storage used",
            Self::DeleteBlob => "Delete a blob, optionally skipping the trash",
            Self::CleanupBlobs => "Permanently release blobs that were previously soft-deleted",
        }
    }

    pub fn input_schema(self) -> Value {
        let workspace_id = json!({
            "type": "string",
            "description": "Workspace id (defaults to AFFINE_WORKSPACE_ID)"
        });
        let doc_id = json!({ "type": "string", "description": "Document id" });
        let comment_id = json!({ "type": "string", "description": "Comment id" });
        let limit = |default: u32| {
            json!({ "type": "integer", "minimum": 1, "default": default })
        };

        match self {
            Self::ListWorkspaces | Self::CurrentUser => object(json!({}), &[]),
            Self::GetWorkspace | Self::ListBlobs | Self::CleanupBlobs => {
                object(json!({ "workspaceId": workspace_id }), &[])
            }
            Self::SearchDocuments => object(
                json!({
                    "query": { "type": "string", "description": "Search keywords" },
                    "workspaceId": {
                        "type": "string",
                        "description": "Workspace to search; omit to search every workspace"
                    },
                    "limit": limit(search::DEFAULT_SEARCH_LIMIT)
                }),
                &["query"],
            ),
            Self::ListDocuments => object(
                json!({
                    "workspaceId": workspace_id,
                    "limit": limit(documents::DEFAULT_LIST_LIMIT),
                    "cursor": { "type": "string", "description": "endCursor from a previous page" }
                }),
                &[],
            ),
            Self::GetDocument | Self::UnpublishDocument => object(
                json!({ "docId": doc_id, "workspaceId": workspace_id }),
                &["docId"],
            ),
            Self::PublishDocument => object(
                json!({
                    "docId": doc_id,
                    "workspaceId": workspace_id,
                    "mode": { "type": "string", "enum": ["Page", "Edgeless"], "default": "Page" }
                }),
                &["docId"],
            ),
            Self::ListComments => object(
                json!({
                    "docId": doc_id,
                    "workspaceId": workspace_id,
                    "limit": limit(comments::DEFAULT_COMMENT_LIMIT)
                }),
                &["docId"],
            ),
            Self::CreateComment => object(
                json!({
                    "docId": doc_id,
                    "content": { "description": "Comment body (AFFiNE rich-text JSON)" },
                    "workspaceId": workspace_id,
                    "docTitle": { "type": "string" },
                    "docMode": { "type": "string", "enum": ["Page", "Edgeless"], "default": "Page" }
                }),
                &["docId", "content"],
            ),
            Self::UpdateComment => object(
                json!({
                    "commentId": comment_id,
                    "content": { "description": "New comment body (AFFiNE rich-text JSON)" }
                }),
                &["commentId", "content"],
            ),
            Self::ResolveComment => object(
                json!({
                    "commentId": comment_id,
                    "resolved": { "type": "boolean", "description": "true resolves, false reopens" }
                }),
                &["commentId", "resolved"],
            ),
            Self::DeleteComment => object(json!({ "commentId": comment_id }), &["commentId"]),
            Self::ListHistory => object(
                json!({
                    "docId": doc_id,
                    "workspaceId": workspace_id,
                    "limit": limit(history::DEFAULT_HISTORY_LIMIT),
                    "before": {
                        "type": "string",
                        "description": "Only entries strictly older than this timestamp \
                            (nextBefore of a previous page)"
                    }
                }),
                &["docId"],
            ),
            Self::DeleteBlob => object(
                json!({
                    "key": { "type": "string", "description": "Blob key" },
                    "workspaceId": workspace_id,
                    "permanently": { "type": "boolean", "default": false }
                }),
                &["key"],
            ),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// Every tool, in advertisement order.
pub fn list() -> Vec<ToolDefinition> {
    ToolKind::ALL.into_iter().map(ToolKind::definition).collect()
}

/// Route a tool call by name.
///
/// Unknown names fail before any argument handling or upstream call.
pub async fn invoke(
    name: &str,
    arguments: Option<Value>,
    bridge: &Bridge,
) -> Result<Value, BridgeError> {
    let kind = ToolKind::from_name(name).ok_or_else(|| BridgeError::UnknownTool {
        name: name.to_string(),
    })?;

    let arguments = match arguments {
        Some(Value::Null) | None => json!({}),
        Some(v) => v,
    };
    schema::validate_value(&kind.input_schema(), &arguments).map_err(|e| {
        BridgeError::InvalidArguments {
            tool: name.to_string(),
            message: e.to_string(),
        }
    })?;

    tracing::debug!(tool = name, "invoking tool");
    call(kind, arguments, bridge).await
}

async fn call(kind: ToolKind, args: Value, bridge: &Bridge) -> Result<Value, BridgeError> {
    match kind {
        ToolKind::ListWorkspaces => respond(workspaces::list_workspaces(bridge).await?),
        ToolKind::GetWorkspace => {
            respond(workspaces::get_workspace(parse(kind, args)?, bridge).await?)
        }
        ToolKind::CurrentUser => respond(workspaces::current_user(bridge).await?),
        ToolKind::SearchDocuments => {
            respond(search::search_documents(parse(kind, args)?, bridge).await?)
        }
        ToolKind::ListDocuments => {
            respond(documents::list_documents(parse(kind, args)?, bridge).await?)
        }
        ToolKind::GetDocument => {
            respond(documents::get_document(parse(kind, args)?, bridge).await?)
        }
        ToolKind::PublishDocument => {
            respond(documents::publish_document(parse(kind, args)?, bridge).await?)
        }
        ToolKind::UnpublishDocument => {
            respond(documents::unpublish_document(parse(kind, args)?, bridge).await?)
        }
        ToolKind::ListComments => {
            respond(comments::list_comments(parse(kind, args)?, bridge).await?)
        }
        ToolKind::CreateComment => {
            respond(comments::create_comment(parse(kind, args)?, bridge).await?)
        }
        ToolKind::UpdateComment => {
            respond(comments::update_comment(parse(kind, args)?, bridge).await?)
        }
        ToolKind::ResolveComment => {
            respond(comments::resolve_comment(parse(kind, args)?, bridge).await?)
        }
        ToolKind::DeleteComment => {
            respond(comments::delete_comment(parse(kind, args)?, bridge).await?)
        }
        ToolKind::ListHistory => respond(history::list_history(parse(kind, args)?, bridge).await?),
        ToolKind::ListBlobs => respond(blobs::list_blobs(parse(kind, args)?, bridge).await?),
        ToolKind::DeleteBlob => respond(blobs::delete_blob(parse(kind, args)?, bridge).await?),
        ToolKind::CleanupBlobs => respond(blobs::cleanup_blobs(parse(kind, args)?, bridge).await?),
    }
}

fn parse<T: DeserializeOwned>(kind: ToolKind, args: Value) -> Result<T, BridgeError> {
    serde_json::from_value(args).map_err(|e| BridgeError::InvalidArguments {
        tool: kind.name().to_string(),
        message: e.to_string(),
    })
}

fn respond<T: Serialize>(result: T) -> Result<Value, BridgeError> {
    Ok(serde_json::to_value(result)?)
}
