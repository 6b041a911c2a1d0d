use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use consultation_cell::services::ConsultationStore;
use content_cell::services::ContentCatalog;
use expert_cell::services::ExpertDirectory;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting consultation mock API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());

    // Mock data, generated once per process
    let now = Utc::now();
    let directory = Arc::new(ExpertDirectory::with_default_roster());
    let consultations = Arc::new(ConsultationStore::with_sample_data(
        &config,
        &directory,
        now.date_naive(),
        now,
    ));
    let catalog = Arc::new(ContentCatalog::generate(config.mock_data_seed, now));

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(router::AppServices {
        config: config.clone(),
        directory,
        consultations,
        catalog,
    })
    .layer(
        TraceLayer::new_for_http()
            .make_span_with(trace::DefaultMakeSpan::new()
                .level(Level::INFO))
            .on_response(trace::DefaultOnResponse::new()
                .level(Level::INFO)),
    )
    .layer(cors);

    // Run the server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
