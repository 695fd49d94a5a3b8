//! Integration tests for PublicClient caching using wiremock

mod common;

use std::time::Duration;

use common::{api_config, content_id, public_content_json, public_hospital_json, site_config};
use reputation::api::{ApiError, PublicClient};
use reputation::config::SiteConfig;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PublicClient {
    PublicClient::new(&api_config(&server.uri()), &site_config()).unwrap()
}

/// A second lookup within the TTL is served from cache
#[tokio::test]
async fn test_hospital_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals/jangpyeonhan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(public_hospital_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let first = client.fetch_hospital("jangpyeonhan").await.unwrap();
    let second = client.fetch_hospital("jangpyeonhan").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.tagline(), "서울 강남구 하지정맥류 · 탈장 전문 클리닉");
}

/// Entries expire with the TTL and are fetched again
#[tokio::test]
async fn test_hospital_refetched_after_ttl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals/jangpyeonhan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(public_hospital_json()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let site = SiteConfig {
        hospital_ttl_secs: 1,
        ..site_config()
    };
    let client = PublicClient::new(&api_config(&mock_server.uri()), &site).unwrap();
    client.fetch_hospital("jangpyeonhan").await.unwrap();
    client.fetch_hospital("jangpyeonhan").await.unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    client.fetch_hospital("jangpyeonhan").await.unwrap();
}

/// Unknown or inactive hospitals are not found
#[tokio::test]
async fn test_hospital_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals/unknown"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found"})))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_hospital("unknown")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound("Hospital not found: unknown".to_string()));
}

/// Server errors also read as not found, and are not cached
#[tokio::test]
async fn test_server_error_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals/jangpyeonhan"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hospitals/jangpyeonhan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(public_hospital_json()))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client.fetch_hospital("jangpyeonhan").await.unwrap_err();
    assert!(err.is_not_found());

    let hospital = client.fetch_hospital("jangpyeonhan").await;
    assert!(hospital.is_ok(), "failure must not be cached");
}

/// A failed content listing degrades to an empty list
#[tokio::test]
async fn test_contents_empty_on_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals/jangpyeonhan/contents"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let contents = client(&mock_server).fetch_contents("jangpyeonhan").await;
    assert!(contents.is_empty());
}

/// Content listings are cached per slug
#[tokio::test]
async fn test_contents_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals/jangpyeonhan/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            public_content_json(1, "DISEASE", "하지정맥류 초기 증상"),
            public_content_json(2, "FAQ", "수술 후 자주 묻는 질문")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert_eq!(client.fetch_contents("jangpyeonhan").await.len(), 2);
    assert_eq!(client.fetch_contents("jangpyeonhan").await.len(), 2);
}

/// Single content lookups hit the detail path
#[tokio::test]
async fn test_fetch_content() {
    let mock_server = MockServer::start().await;
    let id = content_id(1);

    Mock::given(method("GET"))
        .and(path(format!("/hospitals/jangpyeonhan/contents/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(public_content_json(1, "DISEASE", "하지정맥류 초기 증상")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let content = client.fetch_content("jangpyeonhan", id).await.unwrap();
    assert_eq!(content.title, "하지정맥류 초기 증상");
    assert!(content.body.is_some());
    client.fetch_content("jangpyeonhan", id).await.unwrap();
}

/// Transport failures keep their kind
#[tokio::test]
async fn test_unreachable_backend() {
    let client = PublicClient::new(&api_config("http://127.0.0.1:1"), &site_config()).unwrap();
    let err = client.fetch_hospital("jangpyeonhan").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
