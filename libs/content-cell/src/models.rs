use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_utils::pagination::{ListingParams, Searchable};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationalResource {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub format: ResourceFormat,
    pub duration_minutes: u32,
    pub thumbnail: String,
    pub published_at: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    Article,
    Video,
    Guide,
}

impl ResourceFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceFormat::Article => "article",
            ResourceFormat::Video => "video",
            ResourceFormat::Guide => "guide",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub host: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub mode: WorkshopMode,
    pub seats_total: u32,
    pub seats_remaining: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopMode {
    Online,
    InPerson,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Searchable for EducationalResource {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Searchable for Workshop {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Searchable for Notification {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceListParams {
    pub category: Option<String>,
    #[serde(flatten)]
    pub listing: ListingParams,
}

#[derive(Error, Debug, PartialEq)]
pub enum ContentError {
    #[error("Educational resource not found")]
    ResourceNotFound,

    #[error("Workshop not found")]
    WorkshopNotFound,
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        AppError::NotFound(err.to_string())
    }
}
