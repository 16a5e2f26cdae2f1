//! The fixed catalogue of GraphQL documents sent upstream.
//!
//! Nothing is built dynamically; callers only supply variables.

use serde_json::Value;

/// A named GraphQL query or mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

impl Operation {
    /// Human-readable call label, e.g. `GetDoc(workspaceId=w1, docId=d1)`.
    ///
    /// String variables are shown, including those one level down inside an
    /// object such as a mutation `input` (`input.id=c1`). Nested bodies like
    /// comment content stay out of error messages.
    pub fn label(&self, variables: &Value) -> String {
        let mut ids = Vec::new();
        if let Value::Object(map) = variables {
            for (key, value) in map {
                match value {
                    Value::String(s) => ids.push(format!("{key}={s}")),
                    Value::Object(inner) => ids.extend(
                        inner
                            .iter()
                            .filter_map(|(k, v)| v.as_str().map(|s| format!("{key}.{k}={s}"))),
                    ),
                    _ => {}
                }
            }
        }
        if ids.is_empty() {
            self.name.to_string()
        } else {
            format!("{}({})", self.name, ids.join(", "))
        }
    }
}

pub const LIST_WORKSPACES: Operation = Operation {
    name: "ListWorkspaces",
    document: r#"query ListWorkspaces {
  workspaces {
    id
    public
    createdAt
    memberCount
    owner { id name email }
  }
}"#,
};

pub const GET_WORKSPACE: Operation = Operation {
    name: "GetWorkspace",
    document: r#"query GetWorkspace($workspaceId: String!) {
  workspace(id: $workspaceId) {
    id
    public
    createdAt
    memberCount
    owner { id name email }
    quota {
      name
      storageQuota
      usedStorageQuota
      memberLimit
      memberCount
    }
  }
}"#,
};

pub const CURRENT_USER: Operation = Operation {
    name: "CurrentUser",
    document: r#"query CurrentUser {
  currentUser {
    id
    name
    email
    emailVerified
    avatarUrl
  }
}"#,
};

pub const LIST_DOCS: Operation = Operation {
    name: "ListDocs",
    document: r#"query ListDocs($workspaceId: String!, $first: Int!, $after: String) {
  workspace(id: $workspaceId) {
    docs(pagination: { first: $first, after: $after }) {
      totalCount
      pageInfo { hasNextPage endCursor }
      edges {
        node {
          id
          title
          mode
          public
          createdAt
          updatedAt
          createdBy { id name }
          lastUpdatedBy { id name }
        }
      }
    }
  }
}"#,
};

pub const GET_DOC: Operation = Operation {
    name: "GetDoc",
    document: r#"query GetDoc($workspaceId: String!, $docId: String!) {
  workspace(id: $workspaceId) {
    doc(docId: $docId) {
      id
      title
      mode
      public
      summary
      createdAt
      updatedAt
      createdBy { id name }
      lastUpdatedBy { id name }
      permissions { Doc_Read Doc_Update Doc_Delete }
    }
  }
}"#,
};

pub const SEARCH_DOCS: Operation = Operation {
    name: "SearchDocs",
    document: r#"query SearchDocs($workspaceId: String!, $keyword: String!, $limit: Int!) {
  workspace(id: $workspaceId) {
    searchDocs(input: { keyword: $keyword, limit: $limit }) {
      docId
      title
      highlight
      createdAt
      updatedAt
    }
  }
}"#,
};

pub const PUBLISH_DOC: Operation = Operation {
    name: "PublishDoc",
    document: r#"mutation PublishDoc($workspaceId: String!, $docId: String!, $mode: PublicDocMode) {
  publishDoc(workspaceId: $workspaceId, docId: $docId, mode: $mode) {
    id
    mode
    public
  }
}"#,
};

pub const REVOKE_PUBLIC_DOC: Operation = Operation {
    name: "RevokePublicDoc",
    document: r#"mutation RevokePublicDoc($workspaceId: String!, $docId: String!) {
  revokePublicDoc(workspaceId: $workspaceId, docId: $docId) {
    id
    mode
    public
  }
}"#,
};

pub const LIST_COMMENTS: Operation = Operation {
    name: "ListComments",
    document: r#"query ListComments($workspaceId: String!, $docId: String!, $first: Int!) {
  workspace(id: $workspaceId) {
    comments(docId: $docId, pagination: { first: $first }) {
      totalCount
      pageInfo { hasNextPage endCursor }
      edges {
        node {
          id
          content
          resolved
          createdAt
          updatedAt
          user { id name avatarUrl }
          replies {
            id
            content
            createdAt
            updatedAt
            user { id name avatarUrl }
          }
        }
      }
    }
  }
}"#,
};

pub const CREATE_COMMENT: Operation = Operation {
    name: "CreateComment",
    document: r#"mutation CreateComment($input: CommentCreateInput!) {
  createComment(input: $input) {
    id
    content
    resolved
    createdAt
    updatedAt
    user { id name avatarUrl }
    replies {
      id
      content
      createdAt
      updatedAt
      user { id name avatarUrl }
    }
  }
}"#,
};

pub const UPDATE_COMMENT: Operation = Operation {
    name: "UpdateComment",
    document: r#"mutation UpdateComment($input: CommentUpdateInput!) {
  updateComment(input: $input)
}"#,
};

pub const RESOLVE_COMMENT: Operation = Operation {
    name: "ResolveComment",
    document: r#"mutation ResolveComment($input: CommentResolveInput!) {
  resolveComment(input: $input)
}"#,
};

pub const DELETE_COMMENT: Operation = Operation {
    name: "DeleteComment",
    document: r#"mutation DeleteComment($id: String!) {
  deleteComment(id: $id)
}"#,
};

pub const LIST_HISTORY: Operation = Operation {
    name: "ListHistory",
    document: r#"query ListHistory(
  $workspaceId: String!
  $docId: String!
  $take: Int!
  $before: DateTime
) {
  workspace(id: $workspaceId) {
    histories(guid: $docId, take: $take, before: $before) {
      id
      timestamp
      workspaceId
      editor { name avatarUrl }
    }
  }
}"#,
};

pub const LIST_BLOBS: Operation = Operation {
    name: "ListBlobs",
    document: r#"query ListBlobs($workspaceId: String!) {
  workspace(id: $workspaceId) {
    blobs {
      key
      mime
      size
      createdAt
    }
    blobsSize
  }
}"#,
};

pub const DELETE_BLOB: Operation = Operation {
    name: "DeleteBlob",
    document: r#"mutation DeleteBlob($workspaceId: String!, $key: String!, $permanently: Boolean!) {
  deleteBlob(workspaceId: $workspaceId, key: $key, permanently: $permanently)
}"#,
};

pub const RELEASE_DELETED_BLOBS: Operation = Operation {
    name: "ReleaseDeletedBlobs",
    document: r#"mutation ReleaseDeletedBlobs($workspaceId: String!) {
  releaseDeletedBlobs(workspaceId: $workspaceId)
}"#,
};
