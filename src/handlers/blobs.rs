use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::model::Blob;
use crate::protocol::{DeleteBlobParams, WorkspaceParams};
use crate::upstream::{execute_at, operations};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobsSnapshot {
    blobs: Vec<Blob>,
    blobs_size: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobListing {
    pub workspace_id: String,
    pub blobs: Vec<Blob>,
    /// Aggregate size in bytes as reported upstream.
    pub total_size: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobDeletion {
    pub workspace_id: String,
    pub key: String,
    pub permanently: bool,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobCleanup {
    pub workspace_id: String,
    pub released: bool,
}

/// Handle a `list_blobs` tool call. Metadata only; blob bytes are never fetched.
pub async fn list_blobs(
    params: WorkspaceParams,
    bridge: &Bridge,
) -> Result<BlobListing, BridgeError> {
    let workspace_id = bridge.workspace_for("list_blobs", params.workspace_id.as_deref())?;
    let snapshot: BlobsSnapshot = execute_at(
        bridge.upstream(),
        &operations::LIST_BLOBS,
        json!({ "workspaceId": workspace_id }),
        &["workspace"],
    )
    .await?;

    Ok(BlobListing {
        workspace_id,
        blobs: snapshot.blobs,
        total_size: snapshot.blobs_size,
    })
}

/// Handle a `delete_blob` tool call.
///
/// `permanently` is forwarded as-is; soft and hard deletes share one result shape.
pub async fn delete_blob(
    params: DeleteBlobParams,
    bridge: &Bridge,
) -> Result<BlobDeletion, BridgeError> {
    let workspace_id = bridge.workspace_for("delete_blob", params.workspace_id.as_deref())?;
    let deleted = execute_at(
        bridge.upstream(),
        &operations::DELETE_BLOB,
        json!({
            "workspaceId": workspace_id,
            "key": params.key,
            "permanently": params.permanently,
        }),
        &["deleteBlob"],
    )
    .await?;

    Ok(BlobDeletion {
        workspace_id,
        key: params.key,
        permanently: params.permanently,
        deleted,
    })
}

/// Handle a `cleanup_blobs` tool call: purge soft-deleted blobs.
pub async fn cleanup_blobs(
    params: WorkspaceParams,
    bridge: &Bridge,
) -> Result<BlobCleanup, BridgeError> {
    let workspace_id = bridge.workspace_for("cleanup_blobs", params.workspace_id.as_deref())?;
    let released = execute_at(
        bridge.upstream(),
        &operations::RELEASE_DELETED_BLOBS,
        json!({ "workspaceId": workspace_id }),
        &["releaseDeletedBlobs"],
    )
    .await?;

    Ok(BlobCleanup {
        workspace_id,
        released,
    })
}
