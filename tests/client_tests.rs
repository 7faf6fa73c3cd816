//! Integration tests against a local mock HTTP server.
//!
//! These tests exercise the full request path: URL building, auth
//! injection, query/body parameter merging, response parsing, error
//! mapping, retries, and end-to-end pagination through `PagedCollection`.

use std::sync::Once;
use std::time::Duration;

use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pluvo_rs::models::{Course, CourseSearch, TokenType, User};
use pluvo_rs::{ClientConfig, Error, PluvoClient, RetryConfig};

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Build a client pointed at the mock server, authenticated with a token.
fn token_client(server: &MockServer, page_size: u64) -> PluvoClient {
    init_logging();
    PluvoClient::builder()
        .token("test-token")
        .base_url(&format!("{}/", server.uri()))
        .expect("mock server URI is a valid base")
        .page_size(page_size)
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn test_token_travels_as_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/1/"))
        .and(query_param("token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "title": "Rust 101" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 20);
    let course = client.courses().get(1).await.unwrap();
    assert_eq!(course.id, Some(1));
    assert_eq!(course.title, "Rust 101");
}

#[tokio::test]
async fn test_client_pair_travels_as_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/version/"))
        .and(header("client_id", "my-id"))
        .and(header("client_secret", "my-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "2.4.0" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PluvoClient::builder()
        .client_id("my-id")
        .client_secret("my-secret")
        .base_url(&format!("{}/", server.uri()))
        .unwrap()
        .build()
        .unwrap();

    let version = client.version().await.unwrap();
    assert_eq!(version.version, "2.4.0");
}

#[tokio::test]
async fn test_api_error_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/9/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "error message" })),
        )
        .mount(&server)
        .await;

    let client = token_client(&server, 20);
    let err = client.courses().get(9).await.unwrap_err();
    match err {
        Error::Api {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "error message");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/404/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Course not found" })),
        )
        .mount(&server)
        .await;

    let client = token_client(&server, 20);
    match client.courses().get(404).await.unwrap_err() {
        Error::NotFound(message) => assert_eq!(message, "Course not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_retries_transient_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/5/"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "try later" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/course/5/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "title": "Recovered" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    init_logging();
    let config = ClientConfig::default()
        .with_retry(RetryConfig::default().with_initial_backoff(Duration::from_millis(1)));
    let client = PluvoClient::builder()
        .token("test-token")
        .config(config)
        .base_url(&format!("{}/", server.uri()))
        .unwrap()
        .build()
        .unwrap();

    let course = client.courses().get(5).await.unwrap();
    assert_eq!(course.title, "Recovered");
}

#[tokio::test]
async fn test_no_retry_when_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/5/"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "down" })))
        .expect(1)
        .mount(&server)
        .await;

    init_logging();
    let config = ClientConfig::default().with_retry(RetryConfig::no_retry());
    let client = PluvoClient::builder()
        .token("test-token")
        .config(config)
        .base_url(&format!("{}/", server.uri()))
        .unwrap()
        .build()
        .unwrap();

    let err = client.courses().get(5).await.unwrap_err();
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_list_paginates_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "data": [
                { "id": 1, "title": "One" },
                { "id": 2, "title": "Two" },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/course/"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "data": [
                { "id": 3, "title": "Three" },
                { "id": 4, "title": "Four" },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 2);
    let mut courses = client.courses().list(None).build();

    assert_eq!(courses.len().await.unwrap(), 4);
    let titles: Vec<String> = courses
        .to_vec()
        .await
        .unwrap()
        .into_iter()
        .map(|c: Course| c.title)
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Three", "Four"]);

    // A second pass is served entirely from the cache; the .expect(1)
    // guards on the mocks verify no extra requests were made.
    let again = courses.to_vec().await.unwrap();
    assert_eq!(again.len(), 4);
}

#[tokio::test]
async fn test_list_filters_merge_with_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/course/"))
        .and(query_param("title", "rust"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "data": [{ "id": 7, "title": "Rust 101" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 20);
    let query = pluvo_rs::models::CoursesQuery {
        title: Some("rust".to_string()),
        ..Default::default()
    };
    let mut courses = client.courses().list(Some(query)).build();

    let all = courses.to_vec().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Rust 101");
}

#[tokio::test]
async fn test_client_window_shrinks_final_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "data": [{ "id": 1, "name": "a" }, { "id": 2, "name": "b" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "data": [{ "id": 3, "name": "c" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 2);
    let mut users = client.users().list(None).limit(3).build();

    let names: Vec<String> = users
        .to_vec()
        .await
        .unwrap()
        .into_iter()
        .map(|u: User| u.name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_search_posts_filters_and_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/course/search/"))
        .and(body_partial_json(json!({
            "ids": [1, 2, 3],
            "offset": 0,
            "limit": 2,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "data": [
                { "id": 1, "title": "One" },
                { "id": 2, "title": "Two" },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 2);
    let search = CourseSearch {
        ids: vec![1, 2, 3],
        ..Default::default()
    };
    let mut results = client.courses().search(&search).build();

    assert_eq!(results.len().await.unwrap(), 2);
    assert_eq!(results.get(0).await.unwrap().title, "One");
}

#[tokio::test]
async fn test_upsert_routes_put_or_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/course/"))
        .and(body_partial_json(json!({ "title": "New" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 10, "title": "New" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/course/10/"))
        .and(body_partial_json(json!({ "id": 10, "title": "Renamed" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 10, "title": "Renamed" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 20);

    let created = client.courses().upsert(&Course::new("New")).await.unwrap();
    assert_eq!(created.id, Some(10));

    let mut renamed = created;
    renamed.title = "Renamed".to_string();
    let updated = client.courses().upsert(&renamed).await.unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn test_course_token_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/3/course/8/token/student/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 20);
    let token = client
        .users()
        .course_token(3, 8, TokenType::Student)
        .await
        .unwrap();
    assert_eq!(token.token, "abc");
}

#[tokio::test]
async fn test_s3_upload_token_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/s3_upload_token/"))
        .and(query_param("filename", "intro.mp4"))
        .and(query_param("media_type", "video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://uploads.example/intro.mp4",
            "token": "upload-token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, 20);
    let upload = client
        .media()
        .s3_upload_token("intro.mp4", "video")
        .await
        .unwrap();
    assert_eq!(upload.token, "upload-token");
}
