// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token verification.
//!
//! Tokens are issued by the main application's login flow and shared with
//! this service through the `authToken` cookie. We only verify them.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie set by the login flow.
pub const AUTH_COOKIE: &str = "authToken";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Email of the signed-in user
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

/// Verify an HS256 token against the shared secret and return its claims.
pub fn verify_token(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::InvalidToken
        })
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Cookie first, then bearer header for non-browser clients
    let token = if let Some(cookie) = jar.get(AUTH_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let claims = verify_token(&token, &state.config.jwt_signing_key)?;

    request
        .extensions_mut()
        .insert(AuthUser { email: claims.email });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn sign(claims: &Claims, key: &[u8], alg: Algorithm) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(key)).unwrap()
    }

    fn claims_for(email: &str, exp: u64) -> Claims {
        Claims {
            email: email.to_string(),
            exp,
            iat: Some(now()),
        }
    }

    #[test]
    fn test_valid_token_returns_claims_unchanged() {
        let claims = claims_for("ana@example.com", now() + 3600);
        let token = sign(&claims, KEY, Algorithm::HS256);

        assert_eq!(verify_token(&token, KEY).unwrap(), claims);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(
            &claims_for("ana@example.com", now() + 3600),
            b"some_other_secret_entirely_here!",
            Algorithm::HS256,
        );
        assert!(matches!(verify_token(&token, KEY), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let token = sign(
            &claims_for("ana@example.com", now() - 3600),
            KEY,
            Algorithm::HS256,
        );
        assert!(matches!(verify_token(&token, KEY), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let token = sign(
            &claims_for("ana@example.com", now() + 3600),
            KEY,
            Algorithm::HS512,
        );
        assert!(matches!(verify_token(&token, KEY), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        for token in ["", "not-a-jwt", "a.b.c"] {
            assert!(verify_token(token, KEY).is_err(), "{token:?} should fail");
        }
    }

    #[test]
    fn test_token_without_email_rejected() {
        #[derive(Serialize)]
        struct SubOnly {
            sub: String,
            exp: u64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &SubOnly {
                sub: "42".to_string(),
                exp: now() + 3600,
            },
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();

        assert!(verify_token(&token, KEY).is_err());
    }
}
