use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use chrono::{Duration, Utc};
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::auth::User;

use crate::jwt::{issue_token, subject_id_for_email};

pub struct TestConfig {
    pub jwt_secret: String,
    pub mock_data_seed: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            mock_data_seed: 7,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            jwt_secret: self.jwt_secret.clone(),
            mock_data_seed: self.mock_data_seed,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com")
    }
}

impl TestUser {
    pub fn new(email: &str) -> Self {
        Self {
            id: subject_id_for_email(email).to_string(),
            email: email.to_string(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            provider: None,
            issued_at: Some(Utc::now()),
            expires_at: Some(Utc::now() + Duration::hours(24)),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let hours = exp_hours.unwrap_or(24);
        // expired tokens are minted in the past with a positive lifetime
        let (issued_at, ttl) = if hours > 0 {
            (Utc::now(), Duration::hours(hours))
        } else {
            (Utc::now() - Duration::hours(2), Duration::hours(1))
        };

        issue_token(&user.id, Some(&user.email), None, secret, ttl, issued_at)
            .expect("test secret must be non-empty")
            .token
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid test request"),
        None => builder.body(Body::empty()).expect("valid test request"),
    }
}

pub async fn response_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&body).expect("json body")
}
