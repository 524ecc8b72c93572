// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use workout_charts::config::{ChartMode, Config};
use workout_charts::db::FirestoreDb;
use workout_charts::routes::create_router;
use workout_charts::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

#[allow(dead_code)]
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Sign a session token the way the login flow does.
#[allow(dead_code)]
pub fn create_test_jwt(email: &str, signing_key: &[u8]) -> String {
    create_test_jwt_expiring(email, signing_key, now_secs() + 86400)
}

#[allow(dead_code)]
pub fn create_test_jwt_expiring(email: &str, signing_key: &[u8], exp: u64) -> String {
    #[derive(Serialize)]
    struct Claims<'a> {
        email: &'a str,
        exp: u64,
        iat: u64,
    }

    encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            email,
            exp,
            iat: now_secs(),
        },
        &EncodingKey::from_secret(signing_key),
    )
    .expect("Failed to create JWT")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(Config::test_default(), test_db_offline())
}

#[allow(dead_code)]
pub fn create_test_app_with_db(config: Config, db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Emulator-backed app using the given chart mode.
#[allow(dead_code)]
pub async fn create_emulator_app(chart_mode: ChartMode) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        chart_mode,
        ..Config::test_default()
    };
    create_test_app_with_db(config, test_db().await)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
