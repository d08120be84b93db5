// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and authorization error types.

use thiserror::Error;

/// Errors that can occur during authentication and authorization.
///
/// Guard *decisions* are not errors; see [`AccessDecision`](crate::guard::AccessDecision).
/// This type covers guard denials, configuration defects and failures of the
/// backing session store.
#[derive(Debug, Error)]
pub enum AuthError {
	// =========================================================================
	// Authentication Errors
	// =========================================================================
	/// No authenticated principal is attached to the request.
	#[error("authentication required")]
	AuthenticationRequired,

	// =========================================================================
	// Authorization Errors
	// =========================================================================
	/// Authenticated, but the role is not on the allow-list and the caller
	/// does not own the resource.
	#[error("forbidden")]
	Forbidden,

	// =========================================================================
	// Configuration Errors
	// =========================================================================
	/// An allow-list was constructed with no roles.
	#[error("allow-list must name at least one role")]
	EmptyAllowList,

	/// An allow-list was constructed with a role outside the catalog.
	#[error("allow-list contains a role outside the catalog")]
	UnrecognizedRoleInAllowList,

	/// A session lifetime that cannot be represented as a stored expiry.
	#[error("session ttl of {0} hours is out of range")]
	InvalidSessionTtl(i64),

	// =========================================================================
	// System Errors
	// =========================================================================
	/// The session store could not be queried.
	#[error("session lookup failed: {0}")]
	SessionLookup(String),
}

impl AuthError {
	/// Returns true if this error should be logged at error level.
	pub fn is_internal(&self) -> bool {
		matches!(
			self,
			AuthError::SessionLookup(_)
				| AuthError::EmptyAllowList
				| AuthError::UnrecognizedRoleInAllowList
				| AuthError::InvalidSessionTtl(_)
		)
	}

	/// Returns the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			AuthError::AuthenticationRequired => 401,
			AuthError::Forbidden => 403,
			AuthError::EmptyAllowList
			| AuthError::UnrecognizedRoleInAllowList
			| AuthError::InvalidSessionTtl(_)
			| AuthError::SessionLookup(_) => 500,
		}
	}
}
