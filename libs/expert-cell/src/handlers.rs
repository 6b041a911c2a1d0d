use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response;
use shared_utils::pagination::ListingQuery;

use crate::models::{ExpertError, ExpertListParams, ExpertTimeSlots, TimeSlotParams};
use crate::services::{time_slots_for, ExpertDirectory};

#[derive(Clone)]
pub struct ExpertState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<ExpertDirectory>,
}

/// Non-numeric ids can never match an expert.
pub fn parse_expert_id(raw: &str) -> Result<u64, ExpertError> {
    raw.trim().parse().map_err(|_| ExpertError::NotFound)
}

#[axum::debug_handler]
pub async fn list_experts(
    State(state): State<ExpertState>,
    Extension(user): Extension<User>,
    Query(params): Query<ExpertListParams>,
) -> Result<Json<Value>, AppError> {
    debug!("User {} listing experts", user.id);

    let query = ListingQuery::from(&params.listing);
    let page = state.directory.list(params.expert_type.as_deref(), &query)?;

    Ok(response::ok("Experts retrieved successfully", page))
}

#[axum::debug_handler]
pub async fn get_expert(
    State(state): State<ExpertState>,
    Path(expert_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let expert = state.directory.find(parse_expert_id(&expert_id)?)?;

    Ok(response::ok("Expert retrieved successfully", expert))
}

#[axum::debug_handler]
pub async fn get_time_slots(
    State(state): State<ExpertState>,
    Path(expert_id): Path<String>,
    Query(params): Query<TimeSlotParams>,
) -> Result<Json<Value>, AppError> {
    let expert = state.directory.find(parse_expert_id(&expert_id)?)?;

    let date = params
        .date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .ok_or(ExpertError::InvalidDate)?;

    let slots = ExpertTimeSlots {
        expert_id: expert.id,
        date,
        slots: time_slots_for(state.config.mock_data_seed, expert.id, date),
    };

    Ok(response::ok("Time slots retrieved successfully", slots))
}
