// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use axum::{
	routing::{get, post},
	Router,
};
use bank_server_auth::{AuthConfig, SessionPrincipalResolver};
use bank_server_config::ServerConfig;
use bank_server_db::{
	AccountRepository, LookupRepository, OwnershipRepository, SessionRepository, UserRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
	routes,
	typed_router::{PublicRouter, SessionRouter},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub user_repo: Arc<UserRepository>,
	pub account_repo: Arc<AccountRepository>,
	pub ownership_repo: Arc<OwnershipRepository>,
	pub lookup_repo: Arc<LookupRepository>,
	pub session_repo: Arc<SessionRepository>,
	pub resolver: Arc<SessionPrincipalResolver<Arc<SessionRepository>>>,
	pub auth_config: AuthConfig,
}

/// Build the application state from a migrated pool and the server config.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let session_repo = Arc::new(SessionRepository::new(pool.clone()));
	let resolver = Arc::new(SessionPrincipalResolver::new(Arc::clone(&session_repo)));

	let auth_config = AuthConfig::new()
		.with_session_cookie_name(config.auth.session_cookie_name.clone())
		.with_session_ttl_hours(i64::from(config.auth.session_ttl_hours))
		.with_secure_cookies(config.auth.secure_cookies);

	AppState {
		user_repo: Arc::new(UserRepository::new(pool.clone())),
		account_repo: Arc::new(AccountRepository::new(pool.clone())),
		ownership_repo: Arc::new(OwnershipRepository::new(pool.clone())),
		lookup_repo: Arc::new(LookupRepository::new(pool.clone())),
		session_repo,
		resolver,
		auth_config,
		pool,
	}
}

/// Build the HTTP router.
///
/// `/health` and the OpenAPI document are public. Every other route runs
/// behind the session layer, which attaches an `AuthContext` (or responds 500
/// if the session store cannot be read). Handlers make the authorization
/// decision themselves through the guard.
pub fn create_router(state: AppState) -> Router {
	let public = PublicRouter::new()
		.route("/health", get(routes::health::health_check))
		.route("/api-docs/openapi.json", get(routes::docs::openapi_json))
		.build();

	let session = SessionRouter::new()
		// Login/logout
		.route("/login", post(routes::sessions::login))
		.route("/logout", post(routes::sessions::logout))
		// Users
		.route(
			"/users",
			get(routes::users::list_users)
				.post(routes::users::create_user)
				.put(routes::users::update_user),
		)
		.route(
			"/users/{id}",
			get(routes::users::get_user).delete(routes::users::delete_user),
		)
		// Accounts
		.route(
			"/accounts",
			get(routes::accounts::list_accounts)
				.post(routes::accounts::create_account)
				.put(routes::accounts::update_account),
		)
		.route(
			"/accounts/{id}",
			get(routes::accounts::get_account).delete(routes::accounts::delete_account),
		)
		.route(
			"/accounts/status/{status_id}",
			get(routes::accounts::list_accounts_by_status),
		)
		.route(
			"/accounts/type/{type_id}",
			get(routes::accounts::list_accounts_by_type),
		)
		.route(
			"/accounts/owner/{user_id}",
			get(routes::accounts::list_accounts_for_owner),
		)
		.build(state.clone());

	Router::new().merge(public).merge(session).with_state(state)
}
