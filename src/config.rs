// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and handed to the router through
//! `AppState`; nothing here is consulted lazily at request time.

use std::env;
use std::str::FromStr;

/// Origins allowed by default when `ALLOWED_ORIGINS` is not set.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// How the weekly chart is delivered to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// PNG rendered server-side, embedded as a base64 data URL.
    Image,
    /// Declarative chart figure rendered by the frontend.
    Description,
}

impl FromStr for ChartMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "png" => Ok(ChartMode::Image),
            "description" | "plotly" => Ok(ChartMode::Description),
            other => Err(ConfigError::Invalid("CHART_MODE", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project hosting the Firestore database
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Frontend origins permitted to call the API with credentials
    pub allowed_origins: Vec<String>,
    /// Chart presentation adapter
    pub chart_mode: ChartMode,
    /// Insert zero-count weeks between the first and last workout
    pub fill_empty_weeks: bool,

    // --- Secrets ---
    /// HS256 secret shared with the service that issues `authToken` cookies
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            chart_mode: ChartMode::Description,
            fill_empty_weeks: false,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?;
        if jwt_signing_key.is_empty() {
            return Err(ConfigError::Invalid(
                "JWT_SIGNING_KEY",
                "must not be empty".to_string(),
            ));
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let chart_mode = match env::var("CHART_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => ChartMode::Description,
        };

        let fill_empty_weeks = match env::var("CHART_FILL_EMPTY_WEEKS") {
            Ok(raw) => parse_bool(&raw)
                .ok_or(ConfigError::Invalid("CHART_FILL_EMPTY_WEEKS", raw))?,
            Err(_) => false,
        };

        let allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port,
            allowed_origins,
            chart_mode,
            fill_empty_weeks,
            jwt_signing_key: jwt_signing_key.into_bytes(),
        })
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
