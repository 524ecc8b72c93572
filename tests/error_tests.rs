// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_charts::error::AppError;
use workout_charts::models::UserId;

mod common;

#[test]
fn test_status_mapping() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Chart("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.status(), expected, "{err}");
    }
}

#[test]
fn test_invalid_user_id_maps_to_bad_request() {
    let err: AppError = UserId::parse("a/b").unwrap_err().into();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chart_error_body_hides_details() {
    let response = AppError::Chart("pixmap allocation failed".into()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        serde_json::json!({"error": "chart_error"})
    );
}

#[tokio::test]
async fn test_not_found_body_has_details() {
    let response = AppError::NotFound("User not found".into()).into_response();
    assert_eq!(
        common::body_json(response).await,
        serde_json::json!({"error": "not_found", "details": "User not found"})
    );
}
