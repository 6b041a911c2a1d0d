use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use consultation_cell::models::ConsultationCategory;
use consultation_cell::services::ConsultationStore;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response;
use shared_utils::pagination::{ListingParams, ListingQuery};

use crate::models::{ContentError, ResourceListParams};
use crate::services::ContentCatalog;

const DASHBOARD_PREVIEW: usize = 3;

#[derive(Clone)]
pub struct ContentState {
    pub catalog: Arc<ContentCatalog>,
    pub consultations: Arc<ConsultationStore>,
}

fn parse_id(raw: &str, missing: ContentError) -> Result<u64, ContentError> {
    raw.trim().parse().map_err(|_| missing)
}

// ==============================================================================
// EDUCATIONAL RESOURCES
// ==============================================================================

#[axum::debug_handler]
pub async fn list_resources(
    State(state): State<ContentState>,
    Query(params): Query<ResourceListParams>,
) -> Result<Json<Value>, AppError> {
    let query = ListingQuery::from(&params.listing);
    let page = state.catalog.list_resources(params.category.as_deref(), &query);

    Ok(response::ok("Educational resources retrieved successfully", page))
}

#[axum::debug_handler]
pub async fn get_resource(
    State(state): State<ContentState>,
    Path(resource_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resource = state
        .catalog
        .find_resource(parse_id(&resource_id, ContentError::ResourceNotFound)?)?;

    Ok(response::ok("Educational resource retrieved successfully", resource))
}

// ==============================================================================
// WORKSHOPS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_workshops(
    State(state): State<ContentState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Value>, AppError> {
    let page = state.catalog.list_workshops(&ListingQuery::from(&params));

    Ok(response::ok("Workshops retrieved successfully", page))
}

#[axum::debug_handler]
pub async fn get_workshop(
    State(state): State<ContentState>,
    Path(workshop_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let workshop = state
        .catalog
        .find_workshop(parse_id(&workshop_id, ContentError::WorkshopNotFound)?)?;

    Ok(response::ok("Workshop retrieved successfully", workshop))
}

// ==============================================================================
// NOTIFICATIONS AND DASHBOARD
// ==============================================================================

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<ContentState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Value>, AppError> {
    let page = state.catalog.list_notifications(&ListingQuery::from(&params));

    let mut data = serde_json::to_value(page).map_err(|e| AppError::Internal(e.to_string()))?;
    data["unreadCount"] = json!(state.catalog.unread_notifications());

    Ok(response::ok("Notifications retrieved successfully", data))
}

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<ContentState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Building dashboard for user {}", user.id);

    let today = Utc::now().date_naive();
    let preview = ListingQuery::new("", 1, DASHBOARD_PREVIEW as i64);

    let upcoming = state
        .consultations
        .list(Some(ConsultationCategory::Upcoming), &preview, today)
        .await;
    let featured = state.catalog.list_resources(None, &preview);

    Ok(response::ok(
        "Dashboard retrieved successfully",
        json!({
            "user": {
                "id": user.id,
                "email": user.email,
            },
            "upcomingConsultations": {
                "total": upcoming.total,
                "items": upcoming.items,
            },
            "featuredResources": featured.items,
            "upcomingWorkshops": state.catalog.upcoming_workshops(today, DASHBOARD_PREVIEW),
            "unreadNotifications": state.catalog.unread_notifications(),
        }),
    ))
}
