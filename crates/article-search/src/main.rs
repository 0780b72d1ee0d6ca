//! Article Search Service - Entry Point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use article_search::config::{self, Config, engine};
use article_search::{ElasticsearchClient, server::ArticleServer};

#[derive(Parser, Debug)]
#[command(name = "article-search")]
#[command(about = "HTTP search and chart service over an Elasticsearch article index")]
#[command(version)]
struct Cli {
    /// Elasticsearch base URL (e.g., http://localhost:9200)
    #[arg(long, env = "ELASTICSEARCH_URL")]
    elasticsearch_url: String,

    /// Index holding the articles
    #[arg(long, env = "ELASTICSEARCH_INDEX", default_value = engine::DEFAULT_INDEX)]
    index: String,

    /// Comma separated CORS origins ("*" mirrors the request origin)
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Cache-Control header for files under /visualizations
    #[arg(long, env = "CACHE_CONTROL")]
    cache_control: Option<String>,

    /// HTTP server port
    #[arg(long, env = "APP_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Deployment environment name
    #[arg(long, env = "ENVIRONMENT", default_value = config::DEFAULT_ENVIRONMENT)]
    environment: String,

    /// Directory served under /visualizations
    #[arg(long, default_value = "visualizations")]
    visualizations_dir: PathBuf,

    /// Start even if Elasticsearch does not answer a ping
    #[arg(long)]
    skip_startup_check: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            index: self.index,
            allowed_origins: self
                .allowed_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            cache_control: self.cache_control.filter(|v| !v.is_empty()),
            port: self.port,
            environment: self.environment,
            visualizations_dir: self.visualizations_dir,
            ..Config::new(self.elasticsearch_url)
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env fallbacks
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let skip_startup_check = cli.skip_startup_check;
    let config = cli.into_config();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        index = %config.index,
        "Starting article search service"
    );

    let client = ElasticsearchClient::new(&config)?;
    let server = ArticleServer::new(config, client);

    if skip_startup_check {
        tracing::warn!("Skipping Elasticsearch startup check");
    } else {
        server.check_engine().await?;
    }

    server.run_http().await
}
