//! Tests for the REST backend client against a mock HTTP server

use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{Points, ResultId};

use super::fixtures::{create_record_json, create_test_draft};
use crate::error::ClientError;
use crate::services::RealResultsApi;
use crate::traits::ResultsApi;

async fn api_for(server: &MockServer) -> RealResultsApi {
    let base = Url::parse(&server.uri()).unwrap();
    RealResultsApi::new(base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_all_parses_document_store_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            create_record_json("r1", "Asha"),
            create_record_json("r2", "Bilal"),
        ])))
        .mount(&server)
        .await;

    let records = api_for(&server).await.fetch_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, ResultId::from("r1"));
    assert_eq!(records[1].student_name, "Bilal");
    assert_eq!(records[0].score(), 8.0);
}

#[tokio::test]
async fn test_fetch_all_rejects_non_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = api_for(&server).await.fetch_all().await;
    assert!(matches!(result, Err(ClientError::UnexpectedStatus { status: 500 })));
}

#[tokio::test]
async fn test_fetch_all_rejects_non_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .mount(&server)
        .await;

    let error = api_for(&server).await.fetch_all().await.unwrap_err();
    assert_eq!(error.to_string(), "Unexpected response payload: Expected array response");
}

#[tokio::test]
async fn test_create_returns_record_from_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_partial_json(serde_json::json!({ "studentName": "Asha" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "Result added successfully",
            "data": create_record_json("new-1", "Asha"),
        })))
        .mount(&server)
        .await;

    let record = api_for(&server).await.create(create_test_draft("Asha")).await.unwrap();

    assert_eq!(record.id, ResultId::from("new-1"));
    assert_eq!(record.points, Points::Text("8".to_string()));
}

#[tokio::test]
async fn test_update_targets_record_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_record_json("abc123", "Chen")))
        .expect(1)
        .mount(&server)
        .await;

    let record = api_for(&server)
        .await
        .update(&ResultId::from("abc123"), create_test_draft("Chen"))
        .await
        .unwrap();

    assert_eq!(record.student_name, "Chen");
}

#[tokio::test]
async fn test_delete_reports_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Result not found" })))
        .mount(&server)
        .await;

    let error = api_for(&server).await.delete(&ResultId::from("missing")).await.unwrap_err();

    match error {
        ClientError::MutationFailed { operation, message } => {
            assert_eq!(operation, "Delete");
            assert_eq!(message, "Result not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/results/", server.uri())).unwrap();
    let api = RealResultsApi::new(base, Duration::from_secs(2)).unwrap();

    assert!(api.fetch_all().await.unwrap().is_empty());
}
