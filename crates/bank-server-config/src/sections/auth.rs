// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session and cookie configuration.

use serde::Deserialize;

/// Longest accepted session lifetime (100 years). Expiries past this cannot be
/// stored as fixed-width timestamps.
pub const MAX_SESSION_TTL_HOURS: u32 = 8760 * 100;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	pub session_cookie_name: String,
	pub session_ttl_hours: u32,
	pub session_cleanup_interval_secs: u64,
	pub secure_cookies: bool,
	pub environment: String,
}

impl Default for AuthConfig {
	fn default() -> Self {
		AuthConfigLayer::default().finalize()
	}
}

impl AuthConfig {
	pub fn is_production(&self) -> bool {
		self.environment.eq_ignore_ascii_case("production")
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub session_cookie_name: Option<String>,
	#[serde(default)]
	pub session_ttl_hours: Option<u32>,
	#[serde(default)]
	pub session_cleanup_interval_secs: Option<u64>,
	#[serde(default)]
	pub secure_cookies: Option<bool>,
	#[serde(default)]
	pub environment: Option<String>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.session_cookie_name.is_some() {
			self.session_cookie_name = other.session_cookie_name;
		}
		if other.session_ttl_hours.is_some() {
			self.session_ttl_hours = other.session_ttl_hours;
		}
		if other.session_cleanup_interval_secs.is_some() {
			self.session_cleanup_interval_secs = other.session_cleanup_interval_secs;
		}
		if other.secure_cookies.is_some() {
			self.secure_cookies = other.secure_cookies;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			session_cookie_name: self
				.session_cookie_name
				.unwrap_or_else(|| "bank_session".to_string()),
			session_ttl_hours: self.session_ttl_hours.unwrap_or(12),
			session_cleanup_interval_secs: self.session_cleanup_interval_secs.unwrap_or(3600),
			secure_cookies: self.secure_cookies.unwrap_or(false),
			environment: self
				.environment
				.unwrap_or_else(|| "development".to_string()),
		}
	}
}
