use serde::Serialize;
use serde_json::json;

use crate::bridge::Bridge;
use crate::error::{BridgeError, UpstreamError};
use crate::model::{CurrentUser, Workspace};
use crate::protocol::WorkspaceParams;
use crate::upstream::{execute_at, operations};

#[derive(Debug, Serialize)]
pub struct WorkspaceList {
    pub workspaces: Vec<Workspace>,
}

/// Every workspace the token can see.
pub async fn fetch_workspaces(bridge: &Bridge) -> Result<Vec<Workspace>, UpstreamError> {
    execute_at(
        bridge.upstream(),
        &operations::LIST_WORKSPACES,
        json!({}),
        &["workspaces"],
    )
    .await
}

/// Workspace detail including owner and quota.
pub async fn fetch_workspace(
    bridge: &Bridge,
    workspace_id: &str,
) -> Result<Workspace, UpstreamError> {
    execute_at(
        bridge.upstream(),
        &operations::GET_WORKSPACE,
        json!({ "workspaceId": workspace_id }),
        &["workspace"],
    )
    .await
}

/// Handle a `list_workspaces` tool call.
pub async fn list_workspaces(bridge: &Bridge) -> Result<WorkspaceList, BridgeError> {
    let workspaces = fetch_workspaces(bridge).await?;
    Ok(WorkspaceList { workspaces })
}

/// Handle a `get_workspace` tool call.
pub async fn get_workspace(
    params: WorkspaceParams,
    bridge: &Bridge,
) -> Result<Workspace, BridgeError> {
    let workspace_id = bridge.workspace_for("get_workspace", params.workspace_id.as_deref())?;
    Ok(fetch_workspace(bridge, &workspace_id).await?)
}

/// Handle a `current_user` tool call. Also used as the startup connectivity probe.
pub async fn current_user(bridge: &Bridge) -> Result<CurrentUser, BridgeError> {
    let user = execute_at(
        bridge.upstream(),
        &operations::CURRENT_USER,
        json!({}),
        &["currentUser"],
    )
    .await?;
    Ok(user)
}
