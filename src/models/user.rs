// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model and storage identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// Longest document ID Firestore accepts, in bytes.
const MAX_ID_BYTES: usize = 1500;

/// User profile stored in Firestore.
///
/// Owned by the identity service; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Firestore document ID (populated on read)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    /// Email address, the lookup key carried in session tokens
    pub email: String,
}

impl User {
    /// Internal identifier used to own workouts.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        let raw = self
            .id
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("user document for {} has no id", self.email))?;
        UserId::parse(raw).map_err(|e| AppError::Internal(e.into()))
    }
}

/// A validated Firestore document identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

/// Rejected user identifier.
#[derive(Debug, thiserror::Error)]
#[error("invalid user id {id:?}: {reason}")]
pub struct InvalidUserId {
    pub id: String,
    pub reason: &'static str,
}

impl UserId {
    /// Validate a raw identifier against Firestore document-ID rules.
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        let reject = |reason| InvalidUserId {
            id: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(reject("must not be empty"));
        }
        if raw.len() > MAX_ID_BYTES {
            return Err(reject("longer than 1500 bytes"));
        }
        if raw.contains('/') {
            return Err(reject("must not contain '/'"));
        }
        if raw == "." || raw == ".." {
            return Err(reject("must not be '.' or '..'"));
        }
        if raw.len() >= 4 && raw.starts_with("__") && raw.ends_with("__") {
            return Err(reject("names of the form __*__ are reserved"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
