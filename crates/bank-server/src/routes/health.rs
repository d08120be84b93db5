// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bank_server_api::{HealthResponse, HealthStatus};
use sqlx::SqlitePool;

use crate::api::AppState;

async fn check_database(pool: &SqlitePool) -> HealthStatus {
	match sqlx::query("SELECT 1").execute(pool).await {
		Ok(_) => HealthStatus::Healthy,
		Err(e) => {
			tracing::warn!(error = %e, "health check: database unreachable");
			HealthStatus::Unhealthy
		}
	}
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "System is unhealthy", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Public liveness and database check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = check_database(&state.pool).await;

	let response = HealthResponse {
		status: database,
		database,
		version: env!("CARGO_PKG_VERSION").to_string(),
	};

	let http_status = match database {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
