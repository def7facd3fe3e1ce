use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use researchly_api::{build_router, AppState};
use researchly_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("researchly_api=info".parse()?)
                .add_directive("researchly_core=info".parse()?),
        )
        .init();

    let config = Config::server_from_env();

    if !config.has_firecrawl() {
        info!("FIRECRAWL_API_KEY not set, research query endpoint serves mock sources");
    }
    if !config.has_openai() {
        info!("OPENAI_API_KEY not set, chat/validate/feedback endpoints serve mock payloads");
    }

    let state = Arc::new(AppState::from_config(&config));

    let app = build_router(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Researchly API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
