// libs/consultation-cell/src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_utils::pagination::{ListingParams, Searchable};

// ==============================================================================
// CORE CONSULTATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: u64,
    pub expert_id: u64,
    pub expert_name: String,
    pub expert_specialization: String,
    pub expert_image: String,
    pub booking_date: NaiveDate,
    pub time_slot: SlotTime,
    pub status: ConsultationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for Consultation {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.expert_name.as_str(), self.expert_specialization.as_str()]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationStatus::Pending => write!(f, "pending"),
            ConsultationStatus::Confirmed => write!(f, "confirmed"),
            ConsultationStatus::Completed => write!(f, "completed"),
            ConsultationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A 24-hour `HH:MM` slot start, validated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(String);

impl SlotTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SlotTime {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map(|time| SlotTime(time.format("%H:%M").to_string()))
            .map_err(|_| format!("invalid time slot {:?}, expected HH:MM", raw))
    }
}

impl FromStr for SlotTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotTime::try_from(s.to_string())
    }
}

impl From<SlotTime> for String {
    fn from(slot: SlotTime) -> Self {
        slot.0
    }
}

/// Listing buckets, computed from status and booking date at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationCategory {
    Upcoming,
    Requests,
    Past,
}

impl FromStr for ConsultationCategory {
    type Err = ConsultationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Ok(ConsultationCategory::Upcoming),
            "requests" => Ok(ConsultationCategory::Requests),
            "past" => Ok(ConsultationCategory::Past),
            other => Err(ConsultationError::InvalidCategory(other.to_string())),
        }
    }
}

/// Single-booking view with presentation fields derived on read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDetail {
    #[serde(flatten)]
    pub consultation: Consultation,
    pub experience: String,
    pub duration: String,
    pub meeting_link: String,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookConsultationRequest {
    pub expert_id: u64,
    pub booking_date: NaiveDate,
    pub time_slot: SlotTime,
    #[serde(default)]
    pub payment_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RescheduleConsultationRequest {
    pub booking_date: NaiveDate,
    pub time_slot: SlotTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CancelConsultationRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationListParams {
    #[serde(rename = "type")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub listing: ListingParams,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum ConsultationError {
    #[error("Consultation not found")]
    NotFound,

    #[error("Expert not found")]
    ExpertNotFound,

    #[error("Payment token is required")]
    PaymentTokenMissing,

    #[error("Invalid consultation type: {0} (expected upcoming, requests or past)")]
    InvalidCategory(String),

    #[error("Cannot cancel {0} consultation")]
    CannotCancel(ConsultationStatus),

    #[error("Cannot reschedule {0} consultation")]
    CannotReschedule(ConsultationStatus),
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        match err {
            ConsultationError::NotFound | ConsultationError::ExpertNotFound => {
                AppError::NotFound(err.to_string())
            }
            ConsultationError::PaymentTokenMissing | ConsultationError::InvalidCategory(_) => {
                AppError::InvalidInput(err.to_string())
            }
            ConsultationError::CannotCancel(_) | ConsultationError::CannotReschedule(_) => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}
