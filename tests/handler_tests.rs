//! Integration tests for the operation handlers.
//!
//! Handlers are exercised directly against `MockUpstream`, checking both the
//! shaped result and the exact variables sent upstream.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use common::*;
use mcp_affine_server::error::{BridgeError, UpstreamError, UpstreamErrorKind};
use mcp_affine_server::handlers::{blobs, comments, documents, history, workspaces};
use mcp_affine_server::model::DocMode;
use mcp_affine_server::protocol::{
    CreateCommentParams, DeleteBlobParams, DeleteCommentParams, DocumentParams,
    ListCommentsParams, ListDocumentsParams, ListHistoryParams, PublishParams,
    ResolveCommentParams, UpdateCommentParams, WorkspaceParams,
};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// workspaces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_workspace_returns_detail_with_quota() {
    let mock = MockUpstream::new(|op, vars| {
        assert_eq!(op, "GetWorkspace");
        Ok(workspace_detail_data(vars["workspaceId"].as_str().unwrap()))
    });

    let ws = workspaces::get_workspace(
        WorkspaceParams { workspace_id: Some("ws-1".into()) },
        &bridge(&mock),
    )
    .await
    .unwrap();

    assert_eq!(ws.id, "ws-1");
    let quota = ws.quota.expect("detail read carries quota");
    assert_eq!(quota.name, "Pro");
    assert_eq!(quota.member_limit, 10);
}

#[tokio::test]
async fn workspace_scoped_tool_uses_configured_default() {
    let mock = MockUpstream::new(|_, vars| {
        Ok(workspace_detail_data(vars["workspaceId"].as_str().unwrap()))
    });

    let bridge = bridge_with_default(&mock, "ws-default");
    let ws = workspaces::get_workspace(WorkspaceParams::default(), &bridge)
        .await
        .unwrap();

    assert_eq!(ws.id, "ws-default");
    assert_eq!(mock.calls()[0].variables["workspaceId"], "ws-default");
}

#[tokio::test]
async fn missing_workspace_fails_before_upstream() {
    let mock = MockUpstream::unreachable();

    let err = documents::list_documents(ListDocumentsParams::default(), &bridge(&mock))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BridgeError::MissingWorkspace { tool: "list_documents".into() }
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn list_workspaces_returns_all() {
    let mock = MockUpstream::new(|_, _| Ok(workspaces_data(&["a", "b"])));

    let list = workspaces::list_workspaces(&bridge(&mock)).await.unwrap();

    let ids: Vec<&str> = list.workspaces.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

// ---------------------------------------------------------------------------
// list_documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_documents_defaults_to_first_page_of_fifty() {
    let mock = MockUpstream::new(|_, _| Ok(docs_data(&[("d1", Some("One"))], false, None)));

    let page = documents::list_documents(
        ListDocumentsParams { workspace_id: Some("ws-1".into()), ..Default::default() },
        &bridge(&mock),
    )
    .await
    .unwrap();

    let call = &mock.calls_to("ListDocs")[0];
    assert_eq!(call.variables["first"], 50);
    assert!(call.variables["after"].is_null(), "absent cursor requests the first page");
    assert_eq!(page.page.items.len(), 1);
}

#[tokio::test]
async fn list_documents_passes_cursor_and_page_info_verbatim() {
    let mock = MockUpstream::new(|_, _| {
        Ok(docs_data(&[("d3", None), ("d4", Some("Four"))], true, Some("opaque==cursor")))
    });

    let page = documents::list_documents(
        ListDocumentsParams {
            workspace_id: Some("ws-1".into()),
            limit: Some(2),
            cursor: Some("prev==cursor".into()),
        },
        &bridge(&mock),
    )
    .await
    .unwrap();

    let call = &mock.calls()[0];
    assert_eq!(call.variables["first"], 2);
    assert_eq!(call.variables["after"], "prev==cursor");

    assert!(page.page.page_info.has_next_page);
    assert_eq!(page.page.page_info.end_cursor.as_deref(), Some("opaque==cursor"));
    assert_eq!(page.page.items[0].title, None, "untitled stays untitled");

    let out = serde_json::to_value(&page).unwrap();
    assert_eq!(out["workspaceId"], "ws-1");
    assert_eq!(out["pageInfo"]["endCursor"], "opaque==cursor");
    assert!(out["items"][0]["title"].is_null());
}

// ---------------------------------------------------------------------------
// get_document
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_document_returns_metadata_and_fixed_content_note() {
    let mock = MockUpstream::new(|op, _| match op {
        "GetDoc" => Ok(doc_detail_data("d1", Some("Roadmap"), true)),
        "SearchDocs" => Ok(search_data(&[("other", "Other"), ("d1", "Roadmap")])),
        other => panic!("unexpected {other}"),
    });

    let view = documents::get_document(
        DocumentParams { doc_id: "d1".into(), workspace_id: Some("ws-1".into()) },
        &bridge(&mock),
    )
    .await
    .unwrap();

    let ops: Vec<String> = mock.calls().into_iter().map(|c| c.operation).collect();
    assert_eq!(ops, vec!["GetDoc", "SearchDocs"]);
    assert_eq!(mock.calls()[1].variables["keyword"], "Roadmap");

    assert_eq!(view.document.title.as_deref(), Some("Roadmap"));
    assert!(view.document.public);
    let perms = view.document.permissions.unwrap();
    assert!(perms.read && perms.update && !perms.delete);
    assert_eq!(view.content, documents::CONTENT_UNAVAILABLE);
    assert_eq!(view.snippet.as_deref(), Some("…<b>Roadmap</b>…"));
}

#[tokio::test]
async fn get_document_survives_failed_probe() {
    let mock = MockUpstream::new(|op, _| match op {
        "GetDoc" => Ok(doc_detail_data("d1", None, false)),
        _ => Err(app_error("SearchDocs", "search index unavailable")),
    });

    let view = documents::get_document(
        DocumentParams { doc_id: "d1".into(), workspace_id: Some("ws-1".into()) },
        &bridge(&mock),
    )
    .await
    .unwrap();

    assert_eq!(view.document.title, None);
    assert_eq!(view.snippet, None);
    assert_eq!(view.content, documents::CONTENT_UNAVAILABLE);
    assert_eq!(mock.calls()[1].variables["keyword"], "d1", "untitled docs probe by id");
}

#[tokio::test]
async fn get_document_metadata_failure_propagates() {
    let mock = MockUpstream::new(|_, _| Err(app_error("GetDoc(docId=missing)", "Doc not found")));

    let err = documents::get_document(
        DocumentParams { doc_id: "missing".into(), workspace_id: Some("ws-1".into()) },
        &bridge(&mock),
    )
    .await
    .unwrap_err();

    match err {
        BridgeError::Upstream(e) => {
            assert_eq!(e.kind, UpstreamErrorKind::ApplicationErrors);
            assert_eq!(e.message, "Doc not found");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(mock.calls().len(), 1, "no probe after a failed metadata read");
}

#[tokio::test]
async fn null_document_is_a_malformed_response() {
    let mock = MockUpstream::new(|_, _| Ok(json!({ "workspace": { "doc": null } })));

    let err = documents::get_document(
        DocumentParams { doc_id: "d1".into(), workspace_id: Some("ws-1".into()) },
        &bridge(&mock),
    )
    .await
    .unwrap_err();

    match err {
        BridgeError::Upstream(e) => {
            assert_eq!(e.kind, UpstreamErrorKind::MalformedResponse);
            assert!(e.operation.contains("docId=d1"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// publish / unpublish
// ---------------------------------------------------------------------------

/// Stateful stand-in tracking the public flag per document.
fn publication_fake() -> Arc<MockUpstream> {
    let state: Arc<Mutex<HashMap<String, (bool, String)>>> = Arc::new(Mutex::new(HashMap::new()));
    MockUpstream::new(move |op, vars| {
        let doc_id = vars["docId"].as_str().unwrap_or_default().to_string();
        let mut docs = state.lock().unwrap();
        match op {
            "PublishDoc" => {
                let mode = vars["mode"].as_str().unwrap().to_string();
                docs.insert(doc_id.clone(), (true, mode.clone()));
                Ok(json!({ "publishDoc": { "id": doc_id, "mode": mode, "public": true } }))
            }
            "RevokePublicDoc" => {
                let mode = docs
                    .get(&doc_id)
                    .map(|(_, m)| m.clone())
                    .unwrap_or_else(|| "Page".into());
                docs.insert(doc_id.clone(), (false, mode.clone()));
                Ok(json!({ "revokePublicDoc": { "id": doc_id, "mode": mode, "public": false } }))
            }
            "GetDoc" => {
                let public = docs.get(&doc_id).map(|(p, _)| *p).unwrap_or(false);
                Ok(doc_detail_data(&doc_id, Some("Spec"), public))
            }
            "SearchDocs" => Ok(search_data(&[])),
            other => panic!("unexpected {other}"),
        }
    })
}

#[tokio::test]
async fn publish_then_unpublish_leaves_document_private() {
    let mock = publication_fake();
    let bridge = bridge(&mock);

    let published = documents::publish_document(
        PublishParams {
            doc_id: "d1".into(),
            workspace_id: Some("ws-1".into()),
            mode: DocMode::Edgeless,
        },
        &bridge,
    )
    .await
    .unwrap();
    assert!(published.state.public);
    assert_eq!(published.state.mode, DocMode::Edgeless);
    assert_eq!(mock.calls_to("PublishDoc")[0].variables["mode"], "Edgeless");

    let revoked = documents::unpublish_document(
        DocumentParams { doc_id: "d1".into(), workspace_id: Some("ws-1".into()) },
        &bridge,
    )
    .await
    .unwrap();
    assert!(!revoked.state.public);

    let view = documents::get_document(
        DocumentParams { doc_id: "d1".into(), workspace_id: Some("ws-1".into()) },
        &bridge,
    )
    .await
    .unwrap();
    assert!(!view.document.public);
}

#[tokio::test]
async fn publish_mode_defaults_to_page() {
    let mock = publication_fake();

    let params: PublishParams =
        serde_json::from_value(json!({ "docId": "d1", "workspaceId": "ws-1" })).unwrap();
    documents::publish_document(params, &bridge(&mock)).await.unwrap();

    assert_eq!(mock.calls()[0].variables["mode"], "Page");
}

// ---------------------------------------------------------------------------
// comments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_comments_defaults_to_ten_and_keeps_replies() {
    let mock = MockUpstream::new(|_, _| {
        Ok(json!({
            "workspace": {
                "comments": {
                    "totalCount": 2,
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "edges": [
                        { "node": comment_node("c1", false) },
                        { "node": comment_node("c2", true) }
                    ]
                }
            }
        }))
    });

    let page = comments::list_comments(
        ListCommentsParams { doc_id: "d1".into(), workspace_id: Some("ws-1".into()), limit: None },
        &bridge(&mock),
    )
    .await
    .unwrap();

    assert_eq!(mock.calls()[0].variables["first"], 10);
    assert_eq!(page.page.items.len(), 2);
    assert!(page.page.items[1].resolved);
    assert_eq!(page.page.items[0].replies.len(), 1);
    assert_eq!(page.page.items[0].replies[0].id, "c1-r1");
}

#[tokio::test]
async fn create_comment_forwards_content_untouched() {
    let content = json!({ "type": "doc", "blocks": [{ "text": "Looks good", "bold": true }] });
    let mock = MockUpstream::new(|_, _| Ok(json!({ "createComment": comment_node("c9", false) })));

    let comment = comments::create_comment(
        CreateCommentParams {
            doc_id: "d1".into(),
            content: content.clone(),
            workspace_id: Some("ws-1".into()),
            doc_title: Some("Roadmap".into()),
            doc_mode: DocMode::Page,
        },
        &bridge(&mock),
    )
    .await
    .unwrap();

    let input = &mock.calls()[0].variables["input"];
    assert_eq!(input["content"], content);
    assert_eq!(input["workspaceId"], "ws-1");
    assert_eq!(input["docId"], "d1");
    assert_eq!(input["docTitle"], "Roadmap");
    assert_eq!(input["docMode"], "Page");
    assert_eq!(comment.id, "c9");
}

#[tokio::test]
async fn resolve_update_delete_need_only_comment_id() {
    let mock = MockUpstream::new(|op, _| {
        Ok(match op {
            "ResolveComment" => json!({ "resolveComment": true }),
            "UpdateComment" => json!({ "updateComment": true }),
            "DeleteComment" => json!({ "deleteComment": true }),
            other => panic!("unexpected {other}"),
        })
    });
    // No default workspace: these tools must not ask for one.
    let bridge = bridge(&mock);

    let ack = comments::resolve_comment(
        ResolveCommentParams { comment_id: "c1".into(), resolved: false },
        &bridge,
    )
    .await
    .unwrap();
    assert!(ack.success);
    assert_eq!(ack.resolved, Some(false));

    comments::update_comment(
        UpdateCommentParams { comment_id: "c1".into(), content: json!({"text": "edited"}) },
        &bridge,
    )
    .await
    .unwrap();

    let ack = comments::delete_comment(DeleteCommentParams { comment_id: "c1".into() }, &bridge)
        .await
        .unwrap();
    assert!(ack.success);

    let calls = mock.calls();
    assert_eq!(calls[0].variables, json!({ "input": { "id": "c1", "resolved": false } }));
    assert_eq!(calls[1].variables["input"]["content"], json!({"text": "edited"}));
    assert_eq!(calls[2].variables, json!({ "id": "c1" }));
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

#[tokio::test]
async fn history_passes_before_cursor_verbatim() {
    let mock = MockUpstream::new(|_, _| {
        Ok(json!({ "workspace": { "histories": [
            history_entry("2024-05-02T10:00:00.000Z", "ws-1"),
            history_entry("2024-05-01T10:00:00.000Z", "ws-1")
        ] } }))
    });

    let page = history::list_history(
        ListHistoryParams {
            doc_id: "d1".into(),
            workspace_id: Some("ws-1".into()),
            limit: Some(2),
            before: Some("2024-05-03T00:00:00.000Z".into()),
        },
        &bridge(&mock),
    )
    .await
    .unwrap();

    let vars = &mock.calls()[0].variables;
    assert_eq!(vars["before"], "2024-05-03T00:00:00.000Z");
    assert_eq!(vars["take"], 2);
    assert_eq!(vars["docId"], "d1");

    assert_eq!(page.entries.len(), 2);
    assert_eq!(page.entries[0].workspace_id, "ws-1");
    assert_eq!(page.next_before.as_deref(), Some("2024-05-01T10:00:00.000Z"));
}

#[tokio::test]
async fn empty_history_is_not_an_error() {
    let mock = MockUpstream::new(|_, _| Ok(json!({ "workspace": { "histories": [] } })));

    let page = history::list_history(
        ListHistoryParams {
            doc_id: "d1".into(),
            workspace_id: Some("ws-1".into()),
            ..Default::default()
        },
        &bridge(&mock),
    )
    .await
    .unwrap();

    assert!(page.entries.is_empty());
    assert_eq!(page.next_before, None);
    assert_eq!(mock.calls()[0].variables["take"], 10);
    assert!(mock.calls()[0].variables["before"].is_null());
}

// ---------------------------------------------------------------------------
// blobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_blobs_reports_aggregate_size() {
    let mock = MockUpstream::new(|_, _| {
        Ok(json!({ "workspace": {
            "blobs": [
                {
                    "key": "a",
                    "mime": "image/png",
                    "size": 100,
                    "createdAt": "2024-01-01T00:00:00.000Z"
                },
                {
                    "key": "b",
                    "mime": "application/pdf",
                    "size": 250,
                    "createdAt": "2024-01-02T00:00:00.000Z"
                }
            ],
            "blobsSize": 350
        } }))
    });

    let params = WorkspaceParams { workspace_id: Some("ws-1".into()) };
    let listing = blobs::list_blobs(params, &bridge(&mock))
        .await
        .unwrap();

    assert_eq!(listing.blobs.len(), 2);
    assert_eq!(listing.total_size, 350);
    assert_eq!(listing.blobs[1].mime, "application/pdf");
}

#[tokio::test]
async fn delete_blob_forwards_permanently_flag_and_shares_result_shape() {
    let mock = MockUpstream::new(|_, _| Ok(json!({ "deleteBlob": true })));
    let bridge = bridge(&mock);

    for permanently in [false, true] {
        let outcome = blobs::delete_blob(
            DeleteBlobParams {
                key: "blob-key".into(),
                workspace_id: Some("ws-1".into()),
                permanently,
            },
            &bridge,
        )
        .await
        .unwrap();
        assert!(outcome.deleted);
        assert_eq!(outcome.permanently, permanently);
    }

    let flags: Vec<Value> = mock
        .calls()
        .into_iter()
        .map(|c| c.variables["permanently"].clone())
        .collect();
    assert_eq!(flags, vec![json!(false), json!(true)]);
}

#[tokio::test]
async fn cleanup_blobs_releases_deleted() {
    let mock = MockUpstream::new(|op, _| {
        assert_eq!(op, "ReleaseDeletedBlobs");
        Ok(json!({ "releaseDeletedBlobs": true }))
    });

    let bridge = bridge_with_default(&mock, "ws-9");
    let outcome = blobs::cleanup_blobs(WorkspaceParams::default(), &bridge)
        .await
        .unwrap();

    assert!(outcome.released);
    assert_eq!(outcome.workspace_id, "ws-9");
}

#[tokio::test]
async fn upstream_errors_surface_unchanged() {
    let original = UpstreamError::http_status("ListBlobs(workspaceId=ws-1)", 503, "maintenance");
    let returned = original.clone();
    let mock = MockUpstream::new(move |_, _| Err(returned.clone()));

    let params = WorkspaceParams { workspace_id: Some("ws-1".into()) };
    let err = blobs::list_blobs(params, &bridge(&mock))
        .await
        .unwrap_err();

    assert_eq!(err, BridgeError::Upstream(original));
}
