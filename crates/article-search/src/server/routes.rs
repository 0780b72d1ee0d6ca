//! HTTP routes.
//!
//! Handlers stay thin: parse the query string, call the search or aggregation layer,
//! shape the response. Every failure leaves through [`ApiError`].

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use tower::Layer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::aggregate::Aggregator;
use crate::client::ElasticsearchClient;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::formatters::{ChartStyle, Series, chart_page, render_bar_chart, render_pie_chart};
use crate::models::{ArticleRecord, SearchParams, TopicParams};
use crate::search::ArticleSearch;

/// Shared state for HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Engine client, shared read-only by every request.
    pub client: ElasticsearchClient,
    /// Article index name.
    pub index: String,
    /// Deployment environment name.
    pub environment: String,
}

impl AppState {
    #[must_use]
    pub fn new(client: ElasticsearchClient, config: &Config) -> Self {
        Self { client, index: config.index.clone(), environment: config.environment.clone() }
    }
}

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/search", get(search_articles))
        .route("/generate_histogram_year", get(histogram_by_year))
        .route("/generate_pie_chart", get(pie_chart_by_field))
        .with_state(state);

    mount_visualizations(router, config)
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to the article search service!",
        "environment": state.environment,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    state.client.ping().await?;
    Ok(Json(serde_json::json!({ "status": "Elasticsearch is reachable" })))
}

async fn search_articles(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ArticleRecord>>> {
    let Query(params) = params?;
    let records = ArticleSearch::new(&state.client, &state.index).search(&params).await?;
    Ok(Json(records))
}

async fn histogram_by_year(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TopicParams>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let Query(TopicParams { topic_number }) = params?;
    let counts = Aggregator::new(&state.client, &state.index).by_year(topic_number).await?;

    let style = ChartStyle::bar(
        format!("Articles by year, topic {topic_number}"),
        "Year",
        "Number of articles",
    );
    let fragment = render_bar_chart(&Series::from(counts), &style);
    Ok(Html(chart_page(&style.title, &fragment)))
}

async fn pie_chart_by_field(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TopicParams>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let Query(TopicParams { topic_number }) = params?;
    let counts = Aggregator::new(&state.client, &state.index).by_field(topic_number).await?;

    let style = ChartStyle::pie(format!("Fields of science, topic {topic_number}"));
    let fragment = render_pie_chart(&Series::from(counts), &style);
    Ok(Html(chart_page(&style.title, &fragment)))
}

/// Serve pre-rendered visualization files, with `Cache-Control` when configured.
fn mount_visualizations(router: Router, config: &Config) -> Router {
    let files = ServeDir::new(&config.visualizations_dir);

    match config.cache_control.as_deref().map(HeaderValue::from_str) {
        Some(Ok(value)) => router.nest_service(
            "/visualizations",
            SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, value).layer(files),
        ),
        Some(Err(error)) => {
            tracing::warn!(%error, "Ignoring invalid CACHE_CONTROL value");
            router.nest_service("/visualizations", files)
        }
        None => router.nest_service("/visualizations", files),
    }
}

/// CORS with credentials. Methods and headers mirror the request; `*` mirrors the origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

