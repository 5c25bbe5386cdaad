mod auth;
mod cache;
mod config;
mod db;
mod errors;
mod journal;
mod keywords;
mod models;
mod news;
mod recommend;
mod routes;
mod sources;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::DbTokenVerifier;
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::news::enrich::ArticleEnricher;
use crate::routes::build_router;
use crate::sources::{GNewsClient, GuardianClient, NewsApiClient};
use crate::state::{AppState, Caches};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting newsjournal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    info!("Schema ready");

    // Provider clients
    let guardian = GuardianClient::new(config.guardian_api_key.clone());
    let gnews = config.gnews_api_key.clone().map(GNewsClient::new);
    let newsapi = config.newsapi_api_key.clone().map(NewsApiClient::new);
    if gnews.is_none() {
        info!("GNEWS_API_KEY not set; /api/news/proxy/gnews will report a config error");
    }
    if newsapi.is_none() {
        info!("NEWSAPI_API_KEY not set; /api/news/proxy/newsapi will report a config error");
    }

    // Token verification is delegated to the external auth service's table
    let token_verifier = Arc::new(DbTokenVerifier::new(db.clone()));

    // Build app state
    let state = AppState {
        db,
        guardian,
        gnews,
        newsapi,
        enricher: ArticleEnricher::new(),
        caches: Arc::new(Caches::new()),
        token_verifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
