// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-level authentication state and session cookie helpers.
//!
//! This module provides:
//! - [`AuthContext`] - the resolved principal (if any) for one request
//! - [`AuthConfig`] - cookie and session settings used by the HTTP layer
//! - Helpers for reading the session cookie and building `Set-Cookie` values
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Cookie header → SessionHandle → PrincipalSource → AuthContext
//!                                                │
//!                                                ├── Ok(Some) → authenticated
//!                                                ├── Ok(None) → unauthenticated
//!                                                └── Err      → 500, request rejected
//! ```

use http::header::COOKIE;
use http::HeaderMap;
use tracing::instrument;

use crate::resolver::SessionHandle;
use crate::session::DEFAULT_SESSION_TTL_HOURS;
use crate::types::Principal;

/// Default name for the session cookie.
pub const SESSION_COOKIE_NAME: &str = "bank_session";

/// Authentication context for request processing.
///
/// Inserted into request extensions by the auth layer. Handlers read the
/// principal from here and pass it explicitly into the guard.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	/// The resolved principal, if the session was valid.
	pub principal: Option<Principal>,
	/// The session handle presented by the client, valid or not.
	pub session: Option<SessionHandle>,
}

impl AuthContext {
	/// Create a new unauthenticated context.
	pub fn unauthenticated() -> Self {
		Self::default()
	}

	/// Create a new authenticated context.
	pub fn authenticated(principal: Principal, session: SessionHandle) -> Self {
		Self {
			principal: Some(principal),
			session: Some(session),
		}
	}

	pub fn is_authenticated(&self) -> bool {
		self.principal.is_some()
	}

	pub fn principal(&self) -> Option<&Principal> {
		self.principal.as_ref()
	}
}

/// Configuration for authentication middleware.
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Name of the session cookie.
	pub session_cookie_name: String,
	/// Lifetime of new sessions, in hours.
	pub session_ttl_hours: i64,
	/// Add the `Secure` attribute to session cookies.
	pub secure_cookies: bool,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			session_cookie_name: SESSION_COOKIE_NAME.to_string(),
			session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
			secure_cookies: false,
		}
	}
}

impl AuthConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.session_cookie_name = name.into();
		self
	}

	pub fn with_session_ttl_hours(mut self, hours: i64) -> Self {
		self.session_ttl_hours = hours;
		self
	}

	pub fn with_secure_cookies(mut self, secure: bool) -> Self {
		self.secure_cookies = secure;
		self
	}
}

/// Extract the session token from the Cookie header using the default name.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
	extract_session_cookie_with_name(headers, SESSION_COOKIE_NAME)
}

/// Extract the session token from the Cookie header with a custom cookie name.
///
/// Empty values are treated as absent.
#[instrument(level = "trace", skip(headers))]
pub fn extract_session_cookie_with_name(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get_all(COOKIE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(';'))
		.find_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			(name == cookie_name && !value.is_empty()).then(|| value.to_string())
		})
}

/// Build the `Set-Cookie` value that installs a session token.
pub fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
	let max_age = config.session_ttl_hours.max(0) * 3600;
	let mut cookie = format!(
		"{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
		config.session_cookie_name, token, max_age
	);
	if config.secure_cookies {
		cookie.push_str("; Secure");
	}
	cookie
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn build_clear_session_cookie(config: &AuthConfig) -> String {
	let mut cookie = format!(
		"{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
		config.session_cookie_name
	);
	if config.secure_cookies {
		cookie.push_str("; Secure");
	}
	cookie
}
