use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use consultation_cell::services::ConsultationStore;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, ContentState};
use crate::services::ContentCatalog;

/// Resources, workshops, notifications and the dashboard, meant to be
/// nested under the API version prefix.
pub fn content_routes(
    config: Arc<AppConfig>,
    catalog: Arc<ContentCatalog>,
    consultations: Arc<ConsultationStore>,
) -> Router {
    let state = ContentState {
        catalog,
        consultations,
    };

    Router::new()
        .route("/educational-resources", get(handlers::list_resources))
        .route("/educational-resources/{resource_id}", get(handlers::get_resource))
        .route("/workshops", get(handlers::list_workshops))
        .route("/workshops/{workshop_id}", get(handlers::get_workshop))
        .route("/notifications", get(handlers::list_notifications))
        .route("/dashboard", get(handlers::get_dashboard))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
