// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login and logout handlers.
//!
//! These are the only handlers that create or destroy sessions. Neither goes
//! through the guard: login is for anonymous callers and logout only needs a
//! resolved session.

use axum::{
	extract::State,
	http::header::SET_COOKIE,
	response::{IntoResponse, Response},
	Json,
};
use bank_server_api::{LoginRequest, MessageResponse, UserResponse};
use bank_server_auth::{
	build_clear_session_cookie, build_session_cookie, generate_session_token, hash_token, Session,
};
use tracing::instrument;

use crate::{
	api::AppState,
	auth_middleware::OptionalAuth,
	error::{ErrorResponse, ServerError},
};

pub const INVALID_CREDENTIALS_MESSAGE: &str =
	"Invalid Credentials: Username or password was incorrect";
pub const LOGGED_OUT_MESSAGE: &str = "You have been successfully logged out";
pub const NOT_LOGGED_IN_MESSAGE: &str = "You were not logged in to begin with";

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = UserResponse),
        (status = 400, description = "Bad credentials or already logged in", body = ErrorResponse)
    ),
    tag = "sessions"
)]
/// POST /login - Start a session.
#[instrument(skip(state, auth, req), fields(username = %req.username))]
pub async fn login(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<LoginRequest>,
) -> Result<Response, ServerError> {
	if let Some(principal) = auth.principal() {
		let username = state
			.user_repo
			.get_user_by_id(principal.id)
			.await?
			.map(|user| user.username)
			.unwrap_or_else(|| principal.id.to_string());
		return Err(ServerError::BadRequest(format!(
			"You are already logged in as user {username}"
		)));
	}

	let user = match state.user_repo.get_user_by_username(&req.username).await? {
		Some(user) if user.password == req.password => user,
		_ => {
			tracing::info!("login rejected: bad credentials");
			return Err(ServerError::BadRequest(
				INVALID_CREDENTIALS_MESSAGE.to_string(),
			));
		}
	};

	let token = generate_session_token();
	let session = Session::new(user.id, state.auth_config.session_ttl_hours)?;
	state
		.session_repo
		.create_session(&session, &hash_token(&token))
		.await?;

	tracing::info!(user_id = user.id, session_id = %session.id, "user logged in");

	let cookie = build_session_cookie(&state.auth_config, &token);
	Ok(([(SET_COOKIE, cookie)], Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session ended; cookie cleared", body = MessageResponse),
        (status = 400, description = "No active session", body = ErrorResponse)
    ),
    tag = "sessions"
)]
/// POST /logout - End the current session.
#[instrument(skip(state, auth))]
pub async fn logout(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
) -> Result<Response, ServerError> {
	let (Some(principal), Some(session)) = (auth.principal(), auth.session.as_ref()) else {
		return Err(ServerError::BadRequest(NOT_LOGGED_IN_MESSAGE.to_string()));
	};

	state
		.session_repo
		.delete_session_by_token_hash(&session.token_hash())
		.await?;

	tracing::info!(user_id = principal.id, "user logged out");

	let cookie = build_clear_session_cookie(&state.auth_config);
	Ok((
		[(SET_COOKIE, cookie)],
		Json(MessageResponse::new(LOGGED_OUT_MESSAGE)),
	)
		.into_response())
}
