//! Chart endpoint tests against a mocked Elasticsearch.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use article_search::client::ElasticsearchClient;
use article_search::config::Config;
use article_search::server::ArticleServer;

fn setup_router(mock_server: &MockServer) -> Router {
    let config = Config::for_testing(&mock_server.uri());
    let client = ElasticsearchClient::new(&config).unwrap();
    ArticleServer::new(config, client).router()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn topic_hits(sources: Vec<Value>) -> Value {
    let hits: Vec<Value> = sources
        .into_iter()
        .enumerate()
        .map(|(i, source)| json!({"_id": format!("doc{i}"), "_score": 0.0, "_source": source}))
        .collect();
    json!({"hits": {"total": {"value": hits.len(), "relation": "eq"}, "hits": hits}})
}

async fn mount_topic(mock_server: &MockServer, topic_number: i64, body: Value) {
    Mock::given(method("POST"))
        .and(path("/article/_search"))
        .and(body_partial_json(json!({
            "query": {"term": {"topic_number": topic_number}},
            "size": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(mock_server)
        .await;
}

// =============================================================================
// Year Histogram
// =============================================================================

#[tokio::test]
async fn test_histogram_groups_and_sorts_years() {
    let mock_server = MockServer::start().await;
    mount_topic(
        &mock_server,
        7,
        topic_hits(vec![
            json!({"year": "2020", "topic_number": 7}),
            json!({"year": "2019", "topic_number": 7}),
            json!({"year": "2020", "topic_number": 7}),
            json!({"topic_number": 7}),
        ]),
    )
    .await;

    let (status, content_type, page) =
        get(setup_router(&mock_server), "/generate_histogram_year?topic_number=7").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<svg"));
    assert!(page.contains("topic 7"));

    let y2019 = page.find(">2019<").expect("2019 bar label");
    let y2020 = page.find(">2020<").expect("2020 bar label");
    let unknown = page.find(">Unknown<").expect("Unknown bar label");
    assert!(y2019 < y2020 && y2020 < unknown);
    assert!(page.contains("<title>2020: 2</title>"));
    assert!(page.contains("<title>Unknown: 1</title>"));
}

#[tokio::test]
async fn test_histogram_empty_topic_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_topic(&mock_server, 404, topic_hits(vec![])).await;

    let (status, _, body) =
        get(setup_router(&mock_server), "/generate_histogram_year?topic_number=404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_histogram_requires_topic_number() {
    let mock_server = MockServer::start().await;

    let (status, _, _) = get(setup_router(&mock_server), "/generate_histogram_year").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _, _) =
        get(setup_router(&mock_server), "/generate_histogram_year?topic_number=seven").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_histogram_engine_error_is_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/article/_search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("cluster_block_exception"))
        .mount(&mock_server)
        .await;

    let (status, _, body) =
        get(setup_router(&mock_server), "/generate_histogram_year?topic_number=1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("cluster_block_exception"));
}

// =============================================================================
// Field Pie Chart
// =============================================================================

#[tokio::test]
async fn test_pie_chart_keeps_first_seen_field_order() {
    let mock_server = MockServer::start().await;
    mount_topic(
        &mock_server,
        3,
        topic_hits(vec![
            json!({"field_of_science": "Physics"}),
            json!({"field_of_science": "Math"}),
            json!({"field_of_science": "Physics"}),
        ]),
    )
    .await;

    let (status, content_type, page) =
        get(setup_router(&mock_server), "/generate_pie_chart?topic_number=3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));

    let physics = page.find("Physics (2)").expect("Physics legend entry");
    let math = page.find("Math (1)").expect("Math legend entry");
    assert!(physics < math);
}

#[tokio::test]
async fn test_pie_chart_missing_field_is_unknown() {
    let mock_server = MockServer::start().await;
    mount_topic(
        &mock_server,
        9,
        topic_hits(vec![json!({"title": "No field"}), json!({"field_of_science": "Biology"})]),
    )
    .await;

    let (status, _, page) =
        get(setup_router(&mock_server), "/generate_pie_chart?topic_number=9").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.find("Unknown (1)").unwrap() < page.find("Biology (1)").unwrap());
}

#[tokio::test]
async fn test_pie_chart_empty_topic_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_topic(&mock_server, 12, topic_hits(vec![])).await;

    let (status, _, _) =
        get(setup_router(&mock_server), "/generate_pie_chart?topic_number=12").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Loosely typed documents
// =============================================================================

#[tokio::test]
async fn test_histogram_tolerates_mistyped_sibling() {
    let mock_server = MockServer::start().await;
    mount_topic(
        &mock_server,
        7,
        topic_hits(vec![
            json!({"year": "2020", "topic_number": 7}),
            json!({"year": "2019", "topic_number": "7", "authors": ["A", "B"]}),
        ]),
    )
    .await;

    let (status, _, page) =
        get(setup_router(&mock_server), "/generate_histogram_year?topic_number=7").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<title>2019: 1</title>"));
    assert!(page.contains("<title>2020: 1</title>"));
}

#[tokio::test]
async fn test_pie_chart_tolerates_mistyped_sibling() {
    let mock_server = MockServer::start().await;
    mount_topic(
        &mock_server,
        5,
        topic_hits(vec![
            json!({"field_of_science": "Physics", "citations": 3}),
            json!({"field_of_science": "Physics"}),
            json!({"field_of_science": 42}),
        ]),
    )
    .await;

    let (status, _, page) =
        get(setup_router(&mock_server), "/generate_pie_chart?topic_number=5").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.find("Physics (2)").unwrap() < page.find("Unknown (1)").unwrap());
}
