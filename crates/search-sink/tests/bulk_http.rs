//! HTTP tests for the Elasticsearch-compatible sink.
//!
//! Each test starts a throwaway axum server that mimics the index and
//! `_bulk` endpoints and records what it received.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{head, post},
    Json, Router,
};
use record_core::Record;
use search_sink::{BulkStop, CollectionStatus, ElasticSink, ElasticSinkConfig, SearchSink};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Scripted behaviour for the mock sink.
#[derive(Clone, Default)]
struct MockSink {
    /// Bodies of every bulk request, in arrival order
    bulk_bodies: Arc<Mutex<Vec<String>>>,
    /// Authorization headers of every bulk request
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    /// Index names created via PUT
    created: Arc<Mutex<Vec<String>>>,
    /// Index names that already exist
    existing: Vec<String>,
    /// 1-based bulk request number and the status to answer it with
    fail_request: Option<(usize, StatusCode)>,
    /// Acknowledge one item fewer than sent
    ack_short: bool,
    /// Delay before answering bulk requests
    delay: Option<Duration>,
    /// Status for index creation
    create_status: Option<StatusCode>,
}

async fn probe_index(State(mock): State<MockSink>, Path(index): Path<String>) -> StatusCode {
    if mock.existing.contains(&index) || mock.created.lock().unwrap().contains(&index) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create_index(State(mock): State<MockSink>, Path(index): Path<String>) -> Response {
    if let Some(status) = mock.create_status {
        return (status, "resource_already_exists_exception").into_response();
    }
    mock.created.lock().unwrap().push(index.clone());
    Json(json!({"acknowledged": true, "index": index})).into_response()
}

async fn bulk(State(mock): State<MockSink>, headers: HeaderMap, body: String) -> Response {
    let request_number = {
        let mut bodies = mock.bulk_bodies.lock().unwrap();
        bodies.push(body.clone());
        bodies.len()
    };
    mock.auth_headers.lock().unwrap().push(
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    if let Some(delay) = mock.delay {
        tokio::time::sleep(delay).await;
    }

    if let Some((n, status)) = mock.fail_request {
        if n == request_number {
            return (status, "{\"error\":\"scripted\"}").into_response();
        }
    }

    let documents = body.lines().count() / 2;
    let acknowledged = if mock.ack_short {
        documents.saturating_sub(1)
    } else {
        documents
    };
    let items: Vec<Value> = (0..acknowledged)
        .map(|_| json!({"index": {"status": 201}}))
        .collect();
    Json(json!({"took": 1, "errors": false, "items": items})).into_response()
}

async fn start_mock(mock: MockSink) -> String {
    let app = Router::new()
        .route("/_bulk", post(bulk))
        .route("/:index", head(probe_index).put(create_index))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn sink(base_url: &str) -> ElasticSink {
    ElasticSink::new(
        ElasticSinkConfig::new(base_url)
            .with_api_key(Some("c2VjcmV0".to_string()))
            .with_timeout(Duration::from_secs(5))
            .with_bulk_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

fn documents(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| json!({"seq": i, "Email": format!("user{i}@example.com")}))
        .map(|v| v.as_object().unwrap().clone())
        .collect()
}

#[tokio::test]
async fn test_empty_documents_send_nothing() {
    let mock = MockSink::default();
    let url = start_mock(mock.clone()).await;

    let report = sink(&url).bulk_write("people", &[], 10).await;

    assert_eq!(report.delivered, 0);
    assert_eq!(report.requests, 0);
    assert!(report.is_complete());
    assert!(mock.bulk_bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chunking_issues_one_request_per_chunk() {
    let mock = MockSink::default();
    let url = start_mock(mock.clone()).await;
    let chunk_size = 4;

    let report = sink(&url)
        .bulk_write("people", &documents(2 * chunk_size + 1), chunk_size)
        .await;

    assert_eq!(report.requests, 3);
    assert_eq!(report.delivered, 9);
    assert!(report.is_complete());

    let bodies = mock.bulk_bodies.lock().unwrap();
    let sizes: Vec<usize> = bodies.iter().map(|b| b.lines().count() / 2).collect();
    assert_eq!(sizes, vec![4, 4, 1]);

    for line in bodies[0].lines().step_by(2) {
        let action: Value = serde_json::from_str(line).unwrap();
        assert_eq!(action["index"]["_index"], "people");
    }
}

#[tokio::test]
async fn test_api_key_header_sent() {
    let mock = MockSink::default();
    let url = start_mock(mock.clone()).await;

    sink(&url).bulk_write("people", &documents(1), 10).await;

    assert_eq!(
        mock.auth_headers.lock().unwrap()[0].as_deref(),
        Some("ApiKey c2VjcmV0")
    );
}

#[tokio::test]
async fn test_unauthorized_on_second_chunk_stops_write() {
    let mock = MockSink {
        fail_request: Some((2, StatusCode::UNAUTHORIZED)),
        ..Default::default()
    };
    let url = start_mock(mock.clone()).await;

    let report = sink(&url).bulk_write("people", &documents(7), 3).await;

    assert_eq!(report.delivered, 3);
    assert_eq!(report.requests, 2);
    assert_eq!(report.stopped, Some(BulkStop::Unauthorized));
    // Chunk 3 never reached the server.
    assert_eq!(mock.bulk_bodies.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_error_keeps_delivered_count() {
    let mock = MockSink {
        fail_request: Some((3, StatusCode::INTERNAL_SERVER_ERROR)),
        ..Default::default()
    };
    let url = start_mock(mock.clone()).await;

    let report = sink(&url).bulk_write("people", &documents(10), 2).await;

    assert_eq!(report.delivered, 4);
    assert_eq!(report.requests, 3);
    match report.stopped {
        Some(BulkStop::Failed(reason)) => assert!(reason.contains("500"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delivered_counts_acknowledged_items() {
    let mock = MockSink {
        ack_short: true,
        ..Default::default()
    };
    let url = start_mock(mock).await;

    let report = sink(&url).bulk_write("people", &documents(6), 3).await;

    assert_eq!(report.requests, 2);
    assert_eq!(report.delivered, 4);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_timeout_is_a_request_failure() {
    let mock = MockSink {
        delay: Some(Duration::from_millis(500)),
        ..Default::default()
    };
    let url = start_mock(mock).await;
    let sink = ElasticSink::new(
        ElasticSinkConfig::new(&url).with_bulk_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let report = sink.bulk_write("people", &documents(4), 2).await;

    assert_eq!(report.delivered, 0);
    assert_eq!(report.requests, 1);
    assert!(matches!(report.stopped, Some(BulkStop::Failed(_))));
}

#[tokio::test]
async fn test_unreachable_sink_is_reported() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sink = sink(&format!("http://{addr}"));
    let report = sink.bulk_write("people", &documents(2), 10).await;
    assert!(matches!(report.stopped, Some(BulkStop::Failed(_))));

    assert!(matches!(
        sink.ensure_collection("people").await,
        CollectionStatus::Failed(_)
    ));
}

#[tokio::test]
async fn test_ensure_collection_creates_once() {
    let mock = MockSink::default();
    let url = start_mock(mock.clone()).await;
    let sink = sink(&url);

    assert_eq!(sink.ensure_collection("people").await, CollectionStatus::Created);
    assert_eq!(sink.ensure_collection("people").await, CollectionStatus::Exists);
    assert_eq!(*mock.created.lock().unwrap(), vec!["people".to_string()]);
}

#[tokio::test]
async fn test_ensure_collection_existing() {
    let mock = MockSink {
        existing: vec!["people".to_string()],
        ..Default::default()
    };
    let url = start_mock(mock.clone()).await;

    assert_eq!(
        sink(&url).ensure_collection("people").await,
        CollectionStatus::Exists
    );
    assert!(mock.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_ensure_collection_create_failure_is_reported() {
    let mock = MockSink {
        create_status: Some(StatusCode::BAD_REQUEST),
        ..Default::default()
    };
    let url = start_mock(mock).await;

    match sink(&url).ensure_collection("people").await {
        CollectionStatus::Failed(reason) => assert!(reason.contains("400"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
}
