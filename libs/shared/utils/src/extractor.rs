use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequest, Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Pulls the bearer token out of an `Authorization` header value. A header
/// without the `Bearer ` scheme or with an empty token counts as absent.
pub fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// Access guard for every protected route
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthenticated)?;

    let user = validate_token(token, &config.jwt_secret).map_err(|e| {
        debug!("Rejecting credential on {}: {}", request.uri().path(), e);
        AppError::InvalidCredential
    })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// JSON body extractor that reports malformed or incomplete bodies through
/// the shared error envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
        Ok(Self(value))
    }
}
