use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response;
use shared_utils::extractor::ValidatedJson;
use shared_utils::jwt::{issue_token, subject_id_for_email};

use crate::models::{
    username_from_email, LoginRequest, SessionResponse, SignupRequest, SocialLoginRequest,
    SocialProvider, UserAccount,
};

/// Builds the account view for `email` and signs a token for it.
fn open_session(
    config: &AppConfig,
    email: &str,
    username: &str,
    provider: Option<SocialProvider>,
) -> Result<SessionResponse, AppError> {
    let now = Utc::now();
    let email = email.trim();
    let subject = subject_id_for_email(email).to_string();

    let ttl = Duration::try_hours(config.token_ttl_hours)
        .ok_or_else(|| AppError::Internal("Token lifetime out of range".to_string()))?;

    let issued = issue_token(
        &subject,
        Some(email),
        provider.as_ref().map(SocialProvider::as_str),
        &config.jwt_secret,
        ttl,
        now,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(SessionResponse {
        user: UserAccount {
            id: subject,
            username: username.trim().to_string(),
            email: email.to_string(),
            created_at: now,
        },
        token: issued.token,
        provider,
    })
}

#[axum::debug_handler]
pub async fn signup(
    State(config): State<Arc<AppConfig>>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    request.validate()?;

    let session = open_session(&config, &request.email, &request.username, None)?;
    info!("Registered user {}", session.user.id);

    Ok(response::created("User registered successfully", session))
}

#[axum::debug_handler]
pub async fn login(
    State(config): State<Arc<AppConfig>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let email = request.email.trim();
    let session = open_session(&config, email, username_from_email(email), None)?;
    debug!("User {} logged in", session.user.id);

    Ok(response::ok("Login successful", session))
}

#[axum::debug_handler]
pub async fn social_login(
    State(config): State<Arc<AppConfig>>,
    ValidatedJson(request): ValidatedJson<SocialLoginRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;

    let email = request.email.trim();
    let session = open_session(&config, email, username_from_email(email), Some(request.provider))?;
    debug!("User {} logged in via {}", session.user.id, request.provider);

    Ok(response::ok("Social login successful", session))
}

#[axum::debug_handler]
pub async fn get_profile(
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting profile for user: {}", user.id);

    Ok(response::ok(
        "Profile retrieved successfully",
        json!({
            "id": user.id,
            "email": user.email,
            "provider": user.provider,
            "tokenExpiresAt": user.expires_at,
        }),
    ))
}
