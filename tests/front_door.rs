//! HTTP tests for the generator service front door.

use record_generator::AgeRange;
use record_shipper::server::{router, AppState};
use schema_store::SchemaStore;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn start_service(store: SchemaStore) -> String {
    let app = router(AppState::new(store, AgeRange::default()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn register(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{base}/schemas"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_liveness() {
    let base = start_service(SchemaStore::in_memory()).await;
    let body: Value = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_then_generate() {
    let base = start_service(SchemaStore::in_memory()).await;
    let client = reqwest::Client::new();

    let response = register(
        &client,
        &base,
        json!({"name": "demo", "fields": {"Email": "email_address", "Country": "alpha2"}, "count": 3}),
    )
    .await;
    assert_eq!(response.status(), 201);

    let records: Vec<Value> = client
        .get(format!("{base}/schemas/demo/data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    for record in &records {
        let keys: Vec<&String> = record.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["Email", "Country"]);
        assert!(record["Email"].as_str().unwrap().contains('@'));
    }
}

#[tokio::test]
async fn test_ndjson_when_requested() {
    let base = start_service(SchemaStore::in_memory()).await;
    let client = reqwest::Client::new();
    register(
        &client,
        &base,
        json!({"name": "demo", "fields": {"Name": "full_name"}, "count": 4}),
    )
    .await;

    let response = client
        .get(format!("{base}/schemas/demo/data"))
        .header("accept", "application/x-ndjson")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/x-ndjson"
    );

    let body = response.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in lines {
        let record: Value = serde_json::from_str(line).unwrap();
        assert!(record["Name"].is_string());
    }
}

#[tokio::test]
async fn test_register_rejects_bad_payloads() {
    let base = start_service(SchemaStore::in_memory()).await;
    let client = reqwest::Client::new();

    let bad_payloads = [
        json!({"fields": {"Email": "email_address"}, "count": 3}),
        json!({"name": "demo", "fields": ["Email"], "count": 3}),
        json!({"name": "demo", "fields": {"Email": 1}, "count": 3}),
        json!({"name": "demo", "fields": {"Email": "email_address"}, "count": 0}),
        json!({"name": "demo", "fields": {"Email": "email_address"}, "count": "3"}),
        json!({"name": "demo", "fields": {}, "count": 3}),
    ];
    for payload in bad_payloads {
        let response = register(&client, &base, payload.clone()).await;
        assert_eq!(response.status(), 400, "{payload}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "{payload}");
    }

    let response = client
        .post(format!("{base}/schemas"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let names: Vec<String> = reqwest::get(format!("{base}/schemas"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_unknown_schema_is_404() {
    let base = start_service(SchemaStore::in_memory()).await;
    let client = reqwest::Client::new();

    for url in [
        format!("{base}/schemas/missing"),
        format!("{base}/schemas/missing/data"),
    ] {
        let response = client.get(url).send().await.unwrap();
        assert_eq!(response.status(), 404);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    let response = client
        .delete(format!("{base}/schemas/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_replace_list_show_delete() {
    let base = start_service(SchemaStore::in_memory()).await;
    let client = reqwest::Client::new();

    register(
        &client,
        &base,
        json!({"name": "people", "fields": {"Name": "full_name"}, "count": 2}),
    )
    .await;
    register(
        &client,
        &base,
        json!({"name": "albums", "fields": {"Title": "album_title"}, "count": 1}),
    )
    .await;
    // Re-registering replaces the earlier definition.
    register(
        &client,
        &base,
        json!({"name": "people", "fields": {"Name": "full_name", "Mood": "mood"}, "count": 5}),
    )
    .await;

    let names: Vec<String> = client
        .get(format!("{base}/schemas"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(names, vec!["albums", "people"]);

    let schema: Value = client
        .get(format!("{base}/schemas/people"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(schema["count"], 5);
    assert_eq!(schema["fields"]["Mood"], "mood");

    let records: Vec<Value> = client
        .get(format!("{base}/schemas/people/data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["Mood"], "invalid: Mood - mood");

    let response = client
        .delete(format!("{base}/schemas/people"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{base}/schemas/people"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemas.json");
    let client = reqwest::Client::new();

    let base = start_service(SchemaStore::json_file(&path)).await;
    register(
        &client,
        &base,
        json!({"name": "demo", "fields": {"Email": "email_address"}, "count": 2}),
    )
    .await;

    let base = start_service(SchemaStore::json_file(&path)).await;
    let records: Vec<Value> = client
        .get(format!("{base}/schemas/demo/data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_register_rejects_oversized_count() {
    let base = start_service(SchemaStore::in_memory()).await;
    let client = reqwest::Client::new();

    let response = register(
        &client,
        &base,
        json!({"name": "huge", "fields": {"Email": "email_address"}, "count": record_core::MAX_COUNT + 1}),
    )
    .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("exceeds"));

    let response = client
        .get(format!("{base}/schemas/huge/data"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_invalid_stored_schema_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemas.json");
    std::fs::write(
        &path,
        json!({
            "empty": {"fields": {}, "count": 3},
            "huge": {"fields": {"Email": "email_address"}, "count": 50_000_000u64},
        })
        .to_string(),
    )
    .unwrap();
    let base = start_service(SchemaStore::json_file(&path)).await;
    let client = reqwest::Client::new();

    for name in ["empty", "huge"] {
        let response = client
            .get(format!("{base}/schemas/{name}/data"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "{name}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "{name}");
    }
}
