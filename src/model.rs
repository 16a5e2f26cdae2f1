//! Read-through projections of upstream AFFiNE entities.
//!
//! Field names deserialize from the GraphQL camelCase shape and serialize back
//! out in the same shape, so tool results mirror what the upstream returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a user as embedded in other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The authenticated account behind the configured token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceQuota {
    pub name: String,
    pub storage_quota: u64,
    pub used_storage_quota: u64,
    pub member_limit: u64,
    pub member_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub public: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub member_count: Option<u64>,
    /// Only present on the detail read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<WorkspaceQuota>,
}

/// Editor mode of a document; also the publish mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocMode {
    #[default]
    Page,
    Edgeless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocPermissions {
    #[serde(rename(deserialize = "Doc_Read"))]
    pub read: bool,
    #[serde(rename(deserialize = "Doc_Update"))]
    pub update: bool,
    #[serde(rename(deserialize = "Doc_Delete"))]
    pub delete: bool,
}

/// Document metadata. `title` is `None` for untitled documents and is never
/// replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub mode: DocMode,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub last_updated_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<DocPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Publication state returned by publish/unpublish mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationState {
    pub id: String,
    pub mode: DocMode,
    pub public: bool,
}

/// A reply to a comment. Replies do not nest further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub content: Value,
    pub user: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Opaque rich-text payload, passed through untouched.
    pub content: Value,
    #[serde(default)]
    pub resolved: bool,
    pub user: UserRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub editor: Option<UserRef>,
    pub workspace_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub key: String,
    pub mime: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// A search match. Only produced by the search operation; carries no permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub doc_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set when hits from several workspaces are merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    /// Opaque; pass back verbatim as `cursor` to continue.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// GraphQL relay-style connection as returned upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> From<Connection<T>> for Page<T> {
    fn from(conn: Connection<T>) -> Self {
        Self {
            items: conn.edges.into_iter().map(|edge| edge.node).collect(),
            page_info: conn.page_info,
            total_count: conn.total_count,
        }
    }
}
