//! Integration tests against a live Elasticsearch cluster.
//!
//! These tests need `ELASTICSEARCH_URL` pointing at a cluster holding the article index
//! (`ELASTICSEARCH_INDEX`, default `article`).
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use article_search::aggregate::Aggregator;
use article_search::client::ElasticsearchClient;
use article_search::config::Config;
use article_search::error::ApiError;
use article_search::models::SearchParams;
use article_search::search::ArticleSearch;

fn live_config() -> Config {
    let url = std::env::var("ELASTICSEARCH_URL").unwrap_or_else(|_| "http://localhost:9200".into());
    let mut config = Config::new(url);
    if let Ok(index) = std::env::var("ELASTICSEARCH_INDEX") {
        config.index = index;
    }
    config
}

fn create_client(config: &Config) -> ElasticsearchClient {
    ElasticsearchClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_ping() {
    let config = live_config();
    let client = create_client(&config);
    client.ping().await.expect("cluster should answer");
}

#[tokio::test]
async fn test_match_all_first_page() {
    let config = live_config();
    let client = create_client(&config);
    let params = SearchParams { size: 5, ..SearchParams::default() };

    let records = ArticleSearch::new(&client, &config.index).search(&params).await.unwrap();

    assert!(records.len() <= 5);
    for record in &records {
        assert!(!record.id.is_empty());
    }
    println!("First page ids: {:?}", records.iter().map(|r| &r.id).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let config = live_config();
    let client = create_client(&config);
    let search = ArticleSearch::new(&client, &config.index);

    let first = search.search(&SearchParams { page: 1, size: 3, ..SearchParams::default() }).await;
    let second = search.search(&SearchParams { page: 2, size: 3, ..SearchParams::default() }).await;

    let first: Vec<String> = first.unwrap().into_iter().map(|r| r.id).collect();
    let second: Vec<String> = second.unwrap().into_iter().map(|r| r.id).collect();
    assert!(first.iter().all(|id| !second.contains(id)));
}

#[tokio::test]
async fn test_topic_aggregations() {
    let config = live_config();
    let client = create_client(&config);
    let aggregator = Aggregator::new(&client, &config.index);

    match aggregator.by_year(1).await {
        Ok(years) => {
            assert!(years.windows(2).all(|w| w[0].0 < w[1].0));
            let fields = aggregator.by_field(1).await.unwrap();
            let total_years: u64 = years.iter().map(|(_, n)| n).sum();
            let total_fields: u64 = fields.iter().map(|(_, n)| n).sum();
            assert_eq!(total_years, total_fields);
        }
        Err(ApiError::NotFound(message)) => println!("Topic 1 is empty: {message}"),
        Err(other) => panic!("Unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unknown_topic_is_not_found() {
    let config = live_config();
    let client = create_client(&config);

    let result = Aggregator::new(&client, &config.index).by_year(-987_654_321).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
