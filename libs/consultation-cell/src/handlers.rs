// libs/consultation-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use expert_cell::services::ExpertDirectory;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response;
use shared_utils::extractor::ValidatedJson;
use shared_utils::pagination::ListingQuery;

use crate::models::{
    BookConsultationRequest, CancelConsultationRequest, ConsultationCategory, ConsultationError,
    ConsultationListParams, RescheduleConsultationRequest,
};
use crate::services::ConsultationStore;

#[derive(Clone)]
pub struct ConsultationState {
    pub store: Arc<ConsultationStore>,
    pub directory: Arc<ExpertDirectory>,
}

fn parse_consultation_id(raw: &str) -> Result<u64, ConsultationError> {
    raw.trim().parse().map_err(|_| ConsultationError::NotFound)
}

// ==============================================================================
// BOOKING LIFECYCLE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_consultation(
    State(state): State<ConsultationState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<BookConsultationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!("User {} booking expert {}", user.id, request.expert_id);

    let consultation = state
        .store
        .book(request, &state.directory, Utc::now())
        .await?;

    Ok(response::created("Consultation booked successfully", consultation))
}

#[axum::debug_handler]
pub async fn get_consultation(
    State(state): State<ConsultationState>,
    Path(consultation_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let detail = state
        .store
        .detail(parse_consultation_id(&consultation_id)?)
        .await?;

    Ok(response::ok("Consultation retrieved successfully", detail))
}

#[axum::debug_handler]
pub async fn cancel_consultation(
    State(state): State<ConsultationState>,
    Path(consultation_id): Path<String>,
    Extension(user): Extension<User>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let consultation_id = parse_consultation_id(&consultation_id)?;
    state.store.find(consultation_id).await?;

    // The body is optional; an empty one means no reason was given
    let request: CancelConsultationRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CancelConsultationRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidInput(e.to_string()))?
    };

    debug!("User {} cancelling consultation {}", user.id, consultation_id);

    let consultation = state
        .store
        .cancel(consultation_id, request.reason, Utc::now())
        .await?;

    Ok(response::ok("Consultation cancelled successfully", consultation))
}

#[axum::debug_handler]
pub async fn reschedule_consultation(
    State(state): State<ConsultationState>,
    Path(consultation_id): Path<String>,
    Extension(user): Extension<User>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let consultation_id = parse_consultation_id(&consultation_id)?;

    state.store.find(consultation_id).await?;
    let request: RescheduleConsultationRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    debug!("User {} rescheduling consultation {}", user.id, consultation_id);

    let consultation = state
        .store
        .reschedule(consultation_id, request, Utc::now())
        .await?;

    Ok(response::ok("Consultation rescheduled successfully", consultation))
}

// ==============================================================================
// LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<ConsultationState>,
    Query(params): Query<ConsultationListParams>,
) -> Result<Json<Value>, AppError> {
    let category = match params.category.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(raw.parse::<ConsultationCategory>()?),
        None => None,
    };

    let query = ListingQuery::from(&params.listing);
    let page = state
        .store
        .list(category, &query, Utc::now().date_naive())
        .await;

    Ok(response::ok("Consultations retrieved successfully", page))
}
