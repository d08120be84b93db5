// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware for Axum.
//!
//! [`auth_layer`] reads the session cookie, resolves it to a principal through
//! the [`SessionPrincipalResolver`](bank_server_auth::SessionPrincipalResolver)
//! and stores an [`AuthContext`] as a request extension. It never rejects an
//! anonymous request; that is the guard's job inside each handler.
//!
//! # Security Properties
//!
//! - **Token Protection**: the token is hashed with SHA-256 before lookup and is
//!   never logged.
//! - **Session Expiry**: expired sessions resolve to no principal.
//! - **Fail Closed**: if the session store cannot be read the request is
//!   answered with 500. It is never downgraded to "unauthenticated".
//!
//! # Usage
//!
//! ```ignore
//! async fn handler(OptionalAuth(auth): OptionalAuth) -> Result<Json<T>, ServerError> {
//!     ServerError::check(check_role(auth.principal(), &STAFF))?;
//!     // ...
//! }
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use bank_server_auth::{extract_session_cookie_with_name, AuthContext, SessionHandle};
use std::convert::Infallible;
use tracing::instrument;

use crate::{api::AppState, error::ErrorResponse};

/// Resolve the caller and attach an [`AuthContext`] to the request.
#[instrument(
	name = "auth_layer",
	skip(state, request, next),
	fields(
		has_session = tracing::field::Empty,
		user_id = tracing::field::Empty,
		role = tracing::field::Empty,
	)
)]
pub async fn auth_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let span = tracing::Span::current();

	let session = extract_session_cookie_with_name(
		request.headers(),
		&state.auth_config.session_cookie_name,
	)
	.map(SessionHandle::new);
	span.record("has_session", session.is_some());

	let principal = match state.resolver.resolve_principal(session.as_ref()).await {
		Ok(principal) => principal,
		Err(e) => {
			tracing::error!(error = %e, "session lookup failed");
			return (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal()))
				.into_response();
		}
	};

	let auth_ctx = match (principal, session) {
		(Some(principal), Some(session)) => {
			span.record("user_id", principal.id);
			span.record("role", tracing::field::display(principal.role));
			AuthContext::authenticated(principal, session)
		}
		(None, session) => AuthContext {
			principal: None,
			session,
		},
		(Some(_), None) => AuthContext::unauthenticated(),
	};

	request.extensions_mut().insert(auth_ctx);
	next.run(request).await
}

/// Extractor for the request's [`AuthContext`].
///
/// Always succeeds. Outside of [`auth_layer`] it yields an unauthenticated
/// context, so a route that forgets the layer fails closed at the guard.
pub struct OptionalAuth(pub AuthContext);

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth_ctx = parts
			.extensions
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);
		Ok(OptionalAuth(auth_ctx))
	}
}
