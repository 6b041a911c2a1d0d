use std::sync::Arc;

use axum::{
    Json,
    Router,
    routing::get,
};
use serde_json::{json, Value};

use consultation_cell::router::consultation_routes;
use consultation_cell::services::ConsultationStore;
use content_cell::router::content_routes;
use content_cell::services::ContentCatalog;
use expert_cell::router::expert_routes;
use expert_cell::services::ExpertDirectory;
use shared_config::AppConfig;
use user_cell::router::user_routes;

/// Everything the cells share for the lifetime of the process.
#[derive(Clone)]
pub struct AppServices {
    pub config: Arc<AppConfig>,
    pub directory: Arc<ExpertDirectory>,
    pub consultations: Arc<ConsultationStore>,
    pub catalog: Arc<ContentCatalog>,
}

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the consultation API!" }))
}

pub fn create_router(services: AppServices) -> Router {
    let AppServices {
        config,
        directory,
        consultations,
        catalog,
    } = services;

    let v1 = Router::new()
        .nest("/user", user_routes(config.clone()))
        .nest(
            "/consultations",
            consultation_routes(config.clone(), consultations.clone(), directory.clone()),
        )
        .nest("/experts", expert_routes(config.clone(), directory))
        .merge(content_routes(config, catalog, consultations));

    Router::new()
        .route("/", get(|| async { "Consultation mock API is running!" }))
        .route("/api/hello", get(hello))
        .nest("/api/v1", v1)
}
