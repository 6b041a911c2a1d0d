use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, ExpertState};
use crate::services::ExpertDirectory;

pub fn expert_routes(config: Arc<AppConfig>, directory: Arc<ExpertDirectory>) -> Router {
    let state = ExpertState {
        config: config.clone(),
        directory,
    };

    // Every expert endpoint sits behind the access guard
    Router::new()
        .route("/", get(handlers::list_experts))
        .route("/{expert_id}", get(handlers::get_expert))
        .route("/{expert_id}/time-slots", get(handlers::get_time_slots))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
