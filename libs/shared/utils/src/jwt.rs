use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use shared_models::auth::{JwtClaims, JwtHeader, User};

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    #[error("JWT secret is not set")]
    MissingSecret,

    #[error("Invalid token format")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Invalid claims format")]
    BadClaims,

    #[error("Token expired")]
    Expired,

    #[error("Token lifetime must be positive and representable")]
    InvalidLifetime,

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

/// A freshly signed credential and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

fn signer(jwt_secret: &str) -> Result<HmacSha256, TokenError> {
    if jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }
    HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|e| TokenError::Encoding(e.to_string()))
}

pub fn issue_token(
    subject: &str,
    email: Option<&str>,
    provider: Option<&str>,
    jwt_secret: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<IssuedToken, TokenError> {
    let mut mac = signer(jwt_secret)?;

    if ttl <= Duration::zero() {
        return Err(TokenError::InvalidLifetime);
    }
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or(TokenError::InvalidLifetime)?;
    let claims = JwtClaims {
        sub: subject.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        email: email.map(str::to_string),
        provider: provider.map(str::to_string),
    };

    let header_json = serde_json::to_vec(&JwtHeader::default())
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    let claims_json = serde_json::to_vec(&claims)
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    debug!("Issued token for subject {} (expires {})", subject, expires_at);

    Ok(IssuedToken {
        token: format!("{}.{}", signing_input, signature),
        expires_at,
    })
}

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<User, TokenError> {
    validate_token_at(token, jwt_secret, Utc::now())
}

pub fn validate_token_at(token: &str, jwt_secret: &str, now: DateTime<Utc>) -> Result<User, TokenError> {
    let mut mac = signer(jwt_secret)?;

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Malformed);
    }

    let (header_b64, claims_b64, signature_b64) = (parts[0], parts[1], parts[2]);

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        TokenError::Malformed
    })?;

    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());
    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err(TokenError::BadSignature);
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| TokenError::BadClaims)?;

    let claims: JwtClaims = serde_json::from_slice(&claims_json).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        TokenError::BadClaims
    })?;

    if claims.exp <= now.timestamp() {
        debug!("Token expired at {} (now: {})", claims.exp, now.timestamp());
        return Err(TokenError::Expired);
    }

    let user = User {
        id: claims.sub,
        email: claims.email,
        provider: claims.provider,
        issued_at: Utc.timestamp_opt(claims.iat, 0).single(),
        expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
    };

    debug!("Token validated successfully for user: {}", user.id);
    Ok(user)
}

/// Stable numeric subject id for an e-mail address, so signup, login and
/// social login all resolve the same account without a user table.
pub fn subject_id_for_email(email: &str) -> u64 {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix) % 1_000_000 + 1
}
