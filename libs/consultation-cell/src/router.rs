// libs/consultation-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use expert_cell::services::ExpertDirectory;
use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, ConsultationState};
use crate::services::ConsultationStore;

pub fn consultation_routes(
    config: Arc<AppConfig>,
    store: Arc<ConsultationStore>,
    directory: Arc<ExpertDirectory>,
) -> Router {
    let state = ConsultationState { store, directory };

    // All consultation operations require authentication
    Router::new()
        .route("/", get(handlers::list_consultations))
        .route("/book", post(handlers::book_consultation))
        .route("/{consultation_id}", get(handlers::get_consultation))
        .route("/{consultation_id}/cancel", post(handlers::cancel_consultation))
        .route("/{consultation_id}/reschedule", post(handlers::reschedule_consultation))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
