mod support;

use axum::http::{Method, StatusCode};
use election_api::StoreError;
use serde_json::json;
use support::{router, send, Reply, ScriptedStore};

#[tokio::test]
async fn list_returns_rows_with_party_name() {
    let store = ScriptedStore::new(vec![Reply::Rows(vec![json!({
        "id": 1, "first_name": "Ronald", "last_name": "Firbank",
        "industry_connected": true, "party_id": 1, "party_name": "JS Juggernauts"
    })])]);
    let (status, body) = send(router(store.clone()), Method::GET, "/api/candidates", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"][0]["party_name"], "JS Juggernauts");
    let stmts = store.statements();
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].sql.contains(r#"LEFT JOIN "parties""#));
    assert!(stmts[0].sql.contains(r#"AS "party_name""#));
}

#[tokio::test]
async fn empty_list_is_success() {
    let store = ScriptedStore::new(vec![Reply::Rows(vec![])]);
    let (status, body) = send(router(store), Method::GET, "/api/candidates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "message": "success", "data": [] }));
}

#[tokio::test]
async fn list_failure_is_a_server_error() {
    let store = ScriptedStore::new(vec![Reply::Fail(StoreError::Failed("relation does not exist".into()))]);
    let (status, body) = send(router(store), Method::GET, "/api/candidates", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap(), json!({ "error": "relation does not exist" }));
}

#[tokio::test]
async fn read_unknown_id_is_success_with_null_data() {
    let store = ScriptedStore::new(vec![Reply::Rows(vec![])]);
    let (status, body) = send(router(store.clone()), Method::GET, "/api/candidate/99", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "message": "success", "data": null }));
    assert_eq!(store.statements()[0].params, vec![json!(99)]);
}

#[tokio::test]
async fn read_returns_single_object() {
    let row = json!({
        "id": 3, "first_name": "Ada", "last_name": "Lovelace",
        "industry_connected": true, "party_id": null, "party_name": null
    });
    let store = ScriptedStore::new(vec![Reply::Rows(vec![row.clone()])]);
    let (status, body) = send(router(store), Method::GET, "/api/candidate/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["data"], row);
}

#[tokio::test]
async fn malformed_id_never_reaches_the_store() {
    let store = ScriptedStore::new(vec![]);
    let (status, body) = send(router(store.clone()), Method::GET, "/api/candidate/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({ "error": "invalid id: 'abc'" }));
    assert!(store.statements().is_empty());
}

#[tokio::test]
async fn create_reports_every_missing_field() {
    let store = ScriptedStore::new(vec![]);
    let (status, body) = send(
        router(store.clone()),
        Method::POST,
        "/api/candidate",
        Some(json!({ "last_name": "Lovelace", "first_name": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap(),
        json!({ "error": ["No first_name specified.", "No industry_connected specified."] })
    );
    assert!(store.statements().is_empty());
}

#[tokio::test]
async fn create_echoes_the_payload() {
    let store = ScriptedStore::new(vec![Reply::Affected(1)]);
    let payload = json!({ "first_name": "Ada", "last_name": "Lovelace", "industry_connected": true });
    let (status, body) = send(router(store.clone()), Method::POST, "/api/candidate", Some(payload.clone())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "message": "success", "data": payload }));
    let stmts = store.statements();
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].sql.starts_with(r#"INSERT INTO "candidates""#));
    assert_eq!(stmts[0].params, vec![json!("Ada"), json!("Lovelace"), json!(true)]);
}

#[tokio::test]
async fn create_echoes_flag_as_sent_and_binds_boolean() {
    let store = ScriptedStore::new(vec![Reply::Affected(1)]);
    let payload = json!({ "first_name": "Grace", "last_name": "Hopper", "industry_connected": 1 });
    let (status, body) = send(router(store.clone()), Method::POST, "/api/candidate", Some(payload.clone())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["data"], payload);
    assert_eq!(store.statements()[0].params[2], json!(true));
}

#[tokio::test]
async fn create_rejects_client_supplied_id() {
    let store = ScriptedStore::new(vec![]);
    let (status, body) = send(
        router(store.clone()),
        Method::POST,
        "/api/candidate",
        Some(json!({ "id": 7, "first_name": "Ada", "last_name": "Lovelace", "industry_connected": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["error"].as_str().unwrap().contains("unknown field"));
    assert!(store.statements().is_empty());
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let store = ScriptedStore::new(vec![]);
    let (status, body) = send(router(store), Method::POST, "/api/candidate", Some(json!(["Ada"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({ "error": "body must be a JSON object" }));
}

#[tokio::test]
async fn update_requires_party_id() {
    let store = ScriptedStore::new(vec![]);
    let (status, body) = send(router(store.clone()), Method::PUT, "/api/candidate/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({ "error": ["No party_id specified."] }));
    assert!(store.statements().is_empty());
}

#[tokio::test]
async fn update_reports_changes() {
    let store = ScriptedStore::new(vec![Reply::Affected(1)]);
    let (status, body) = send(
        router(store.clone()),
        Method::PUT,
        "/api/candidate/1",
        Some(json!({ "party_id": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({ "message": "success", "data": { "party_id": 2 }, "changes": 1 })
    );
    assert_eq!(store.statements()[0].params, vec![json!(2), json!(1)]);
}

#[tokio::test]
async fn update_of_missing_candidate_is_not_an_error() {
    let store = ScriptedStore::new(vec![Reply::Affected(0)]);
    let (status, body) = send(
        router(store),
        Method::PUT,
        "/api/candidate/404",
        Some(json!({ "party_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "message": "Candidate not found" }));
}

#[tokio::test]
async fn update_constraint_violation_is_a_client_error() {
    let store = ScriptedStore::new(vec![Reply::Fail(StoreError::Rejected(
        "insert or update on table \"candidates\" violates foreign key constraint \"fk_party\"".into(),
    ))]);
    let (status, body) = send(
        router(store),
        Method::PUT,
        "/api/candidate/1",
        Some(json!({ "party_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["error"].as_str().unwrap().contains("fk_party"));
}

#[tokio::test]
async fn update_accepts_null_party() {
    let store = ScriptedStore::new(vec![Reply::Affected(1)]);
    let (status, body) = send(
        router(store.clone()),
        Method::PUT,
        "/api/candidate/1",
        Some(json!({ "party_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["data"], json!({ "party_id": null }));
    assert_eq!(store.statements()[0].params, vec![serde_json::Value::Null, json!(1)]);
}

#[tokio::test]
async fn second_delete_reports_not_found() {
    let store = ScriptedStore::new(vec![Reply::Affected(1), Reply::Affected(0)]);

    let (status, body) = send(router(store.clone()), Method::DELETE, "/api/candidate/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "message": "deleted", "changes": 1, "id": 5 }));

    let (status, body) = send(router(store.clone()), Method::DELETE, "/api/candidate/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "message": "Candidate not found" }));

    let stmts = store.statements();
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0], stmts[1]);
}

#[tokio::test]
async fn delete_failure_surfaces_store_message() {
    let store = ScriptedStore::new(vec![Reply::Fail(StoreError::Rejected("value out of range".into()))]);
    let (status, body) = send(router(store), Method::DELETE, "/api/candidate/5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({ "error": "value out of range" }));
}

#[tokio::test]
async fn store_timeout_is_service_unavailable() {
    let store = ScriptedStore::new(vec![Reply::Fail(StoreError::Unavailable(
        "statement timed out after 5000 ms".into(),
    ))]);
    let (status, body) = send(router(store), Method::GET, "/api/candidate/1", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.unwrap(), json!({ "error": "statement timed out after 5000 ms" }));
}
