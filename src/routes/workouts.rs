// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout chart routes (require authentication).

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserId;
use crate::services::{build_weekly_report, WeeklyReport};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

/// Workout routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workouts", get(get_my_workouts))
        .route("/workouts/{user_id}", get(get_user_workouts))
}

/// Chart the signed-in user's workouts.
async fn get_my_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<WeeklyReport>> {
    let user = state
        .db
        .find_user_by_email(&auth.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let user_id = user.user_id()?;
    weekly_report(&state, &user_id).await.map(Json)
}

/// Chart workouts for an explicit user ID, which must belong to the caller.
async fn get_user_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
) -> Result<Json<WeeklyReport>> {
    let user_id = UserId::parse(&raw_id)?;

    let user = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    if user.email != auth.email {
        tracing::warn!(
            user_id = %user_id,
            "Rejected request for another user's workouts"
        );
        return Err(AppError::Forbidden);
    }

    weekly_report(&state, &user_id).await.map(Json)
}

async fn weekly_report(state: &AppState, user_id: &UserId) -> Result<WeeklyReport> {
    let workouts = state.db.get_workouts_for_user(user_id).await?;
    tracing::info!(
        user_id = %user_id,
        count = workouts.len(),
        "Fetched workouts"
    );

    build_weekly_report(
        &workouts,
        state.chart_producer.as_ref(),
        state.config.fill_empty_weeks,
    )
}
