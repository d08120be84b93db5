// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-side login sessions.
//!
//! A session binds a random token (held by the client in a cookie) to a user.
//! Only the SHA-256 hash of the token is stored. Sessions have a fixed expiry;
//! an expired session resolves to no principal and is eventually removed by
//! the cleanup task.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::AuthError;

/// Default session lifetime (12 hours).
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 12;

/// Longest accepted session lifetime (100 years).
pub const MAX_SESSION_TTL_HOURS: i64 = 8760 * 100;

/// A login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
	pub id: String,
	pub user_id: i64,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl Session {
	/// Create a session for `user_id` that expires after `ttl_hours`.
	///
	/// A negative TTL yields an already-expired session. A TTL above
	/// [`MAX_SESSION_TTL_HOURS`] returns [`AuthError::InvalidSessionTtl`].
	#[instrument(level = "debug")]
	pub fn new(user_id: i64, ttl_hours: i64) -> Result<Self, AuthError> {
		if ttl_hours > MAX_SESSION_TTL_HOURS {
			return Err(AuthError::InvalidSessionTtl(ttl_hours));
		}
		let now = Utc::now();
		let expires_at = Duration::try_hours(ttl_hours)
			.and_then(|ttl| now.checked_add_signed(ttl))
			.ok_or(AuthError::InvalidSessionTtl(ttl_hours))?;

		Ok(Self {
			id: Uuid::new_v4().to_string(),
			user_id,
			created_at: now,
			expires_at,
		})
	}

	/// Check if session is expired.
	pub fn is_expired(&self) -> bool {
		Utc::now() > self.expires_at
	}
}

/// Generates a cryptographically secure random session token.
pub fn generate_session_token() -> String {
	use rand::Rng;
	let mut rng = rand::thread_rng();
	let bytes: [u8; 32] = rng.gen();
	hex::encode(bytes)
}
