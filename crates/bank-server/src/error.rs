// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use bank_server_auth::{AccessDecision, AuthError};
use bank_server_db::DbError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned with every 401.
pub const UNAUTHENTICATED_MESSAGE: &str = "The incoming token has expired";

/// Message returned with every 403. Never names the roles that would have
/// been sufficient.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action";

/// Server error types for banking operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database error from bank-server-db.
	#[error("Database error: {0}")]
	Db(#[from] DbError),

	/// No authenticated principal.
	#[error("Unauthorized")]
	Unauthorized,

	/// Authenticated, but not permitted.
	#[error("Forbidden")]
	Forbidden,

	/// Record not found.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Invalid request.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<AuthError> for ServerError {
	fn from(err: AuthError) -> Self {
		match err {
			AuthError::AuthenticationRequired => ServerError::Unauthorized,
			AuthError::Forbidden => ServerError::Forbidden,
			other => ServerError::Internal(other.to_string()),
		}
	}
}

impl ServerError {
	/// Turn a guard decision into `Ok(())` or the matching error.
	pub fn check(decision: AccessDecision) -> Result<(), ServerError> {
		decision.into_result().map_err(ServerError::from)
	}
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}

	pub fn unauthorized() -> Self {
		Self::new("unauthorized", UNAUTHENTICATED_MESSAGE)
	}

	pub fn forbidden() -> Self {
		Self::new("forbidden", FORBIDDEN_MESSAGE)
	}

	pub fn internal() -> Self {
		Self::new("internal_error", "An internal error occurred")
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::Db(DbError::NotFound(msg)) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", msg.clone()),
			),
			ServerError::Db(DbError::Conflict(msg)) => (
				StatusCode::CONFLICT,
				ErrorResponse::new("conflict", msg.clone()),
			),
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("database_error", "A database error occurred"),
				)
			}
			ServerError::Unauthorized => {
				tracing::debug!("rejecting unauthenticated request");
				(StatusCode::UNAUTHORIZED, ErrorResponse::unauthorized())
			}
			ServerError::Forbidden => {
				tracing::warn!("forbidden");
				(StatusCode::FORBIDDEN, ErrorResponse::forbidden())
			}
			ServerError::NotFound(msg) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", msg.clone()),
			),
			ServerError::BadRequest(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", msg.clone()),
			),
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal())
			}
		};

		(status, Json(error_response)).into_response()
	}
}
