// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization guard and session handling for the bank server.
//!
//! This crate provides:
//! - The closed role catalog ([`RoleName`]) and the authenticated [`Principal`]
//! - Allow-lists and the three guard checks ([`check_role`],
//!   [`check_role_or_owner`], [`check_role_or_any_owner`])
//! - Session → principal resolution ([`SessionPrincipalResolver`])
//! - Session token generation, hashing and cookie helpers
//!
//! # Decision Flow
//!
//! ```text
//! principal absent?            → DenyNotAuthenticated
//! role on allow-list?          → Allow
//! principal owns the resource? → Allow
//! otherwise                    → DenyRoleNotAllowed
//! ```
//!
//! The guard performs no I/O. Callers resolve the principal first, look up
//! ownership if needed, and then ask for a decision.
//!
//! # Security Considerations
//!
//! - Session tokens are stored as SHA-256 hashes, never plaintext
//! - [`SessionHandle`] redacts the raw token from `Debug` and `Display`
//! - A failing session store surfaces as [`AuthError::SessionLookup`], never as
//!   "not logged in"

pub mod error;
pub mod guard;
pub mod middleware;
pub mod resolver;
pub mod session;
pub mod types;

pub use error::AuthError;
pub use guard::{
	check_role, check_role_or_any_owner, check_role_or_owner, AccessDecision, AllowList,
};
pub use middleware::{
	build_clear_session_cookie, build_session_cookie, extract_session_cookie,
	extract_session_cookie_with_name, AuthConfig, AuthContext, SESSION_COOKIE_NAME,
};
pub use resolver::{PrincipalSource, SessionHandle, SessionPrincipalResolver};
pub use session::{
	generate_session_token, Session, DEFAULT_SESSION_TTL_HOURS, MAX_SESSION_TTL_HOURS,
};
pub use types::{Principal, RoleName};

use sha2::{Digest, Sha256};

/// Hash a session token for storage and lookup.
///
/// Returns the lowercase hex SHA-256 digest.
pub fn hash_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}
