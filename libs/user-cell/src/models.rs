use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialLoginRequest {
    pub provider: SocialProvider,
    pub access_token: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Apple,
    Facebook,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Apple => "apple",
            SocialProvider::Facebook => "facebook",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: UserAccount,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<SocialProvider>,
}

#[derive(Error, Debug, PartialEq)]
pub enum UserError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

// ==============================================================================
// VALIDATION
// ==============================================================================

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, UserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserError::MissingField(field));
    }
    Ok(trimmed)
}

fn require_email(value: &str) -> Result<&str, UserError> {
    let email = require("email", value)?;
    if !email.contains('@') {
        return Err(UserError::InvalidEmail);
    }
    Ok(email)
}

/// Local part of an address, used as a display name when none was given.
pub fn username_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        require_email(&self.email)?;
        require("username", &self.username)?;
        require("password", &self.password)?;
        Ok(())
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        require_email(&self.email)?;
        require("password", &self.password)?;
        Ok(())
    }
}

impl SocialLoginRequest {
    pub fn validate(&self) -> Result<(), UserError> {
        require("accessToken", &self.access_token)?;
        require_email(&self.email)?;
        Ok(())
    }
}
