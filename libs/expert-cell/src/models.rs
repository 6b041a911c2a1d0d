use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_utils::pagination::{ListingParams, Searchable};

// ==============================================================================
// CORE EXPERT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: u64,
    pub name: String,
    pub specialization: String,
    /// Hourly consultation rate in USD.
    pub rate: u32,
    #[serde(rename = "type")]
    pub expert_type: ExpertType,
    pub image: String,
    pub bio: String,
    pub languages: Vec<String>,
}

impl Searchable for Expert {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.expert_type.as_str(), self.name.as_str(), self.specialization.as_str()]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpertType {
    Legal,
    Shariah,
}

impl ExpertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertType::Legal => "legal",
            ExpertType::Shariah => "shariah",
        }
    }
}

impl fmt::Display for ExpertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpertType {
    type Err = ExpertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legal" => Ok(ExpertType::Legal),
            "shariah" => Ok(ExpertType::Shariah),
            other => Err(ExpertError::InvalidType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertTimeSlots {
    pub expert_id: u64,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

// ==============================================================================
// QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpertListParams {
    #[serde(rename = "type")]
    pub expert_type: Option<String>,
    #[serde(flatten)]
    pub listing: ListingParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSlotParams {
    pub date: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum ExpertError {
    #[error("Expert not found")]
    NotFound,

    #[error("Invalid expert type: {0} (expected legal or shariah)")]
    InvalidType(String),

    #[error("A valid date (YYYY-MM-DD) is required")]
    InvalidDate,
}

impl From<ExpertError> for AppError {
    fn from(err: ExpertError) -> Self {
        match err {
            ExpertError::NotFound => AppError::NotFound(err.to_string()),
            ExpertError::InvalidType(_) | ExpertError::InvalidDate => AppError::InvalidInput(err.to_string()),
        }
    }
}
