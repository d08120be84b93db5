// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session → principal resolution.
//!
//! [`SessionPrincipalResolver`] turns the opaque session handle presented by a
//! client into an `Option<Principal>`. Both "no handle" and "handle that does
//! not resolve" collapse to `None`. Only a failure of the backing store is an
//! error, and it is returned as [`AuthError::SessionLookup`] so that callers
//! cannot confuse "not logged in" with "could not check".

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

use crate::error::AuthError;
use crate::hash_token;
use crate::types::Principal;

/// The raw session token presented by a client.
///
/// `Debug` and `Display` never print the token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionHandle(String);

impl SessionHandle {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	/// SHA-256 hex digest of the token, as stored server-side.
	pub fn token_hash(&self) -> String {
		hash_token(&self.0)
	}
}

impl fmt::Debug for SessionHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SessionHandle([REDACTED])")
	}
}

impl fmt::Display for SessionHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

/// The session store, as seen by the resolver.
///
/// Implementations return the principal attached to an unexpired session with
/// the given token hash, `Ok(None)` if there is none, or
/// [`AuthError::SessionLookup`] if the store cannot be queried.
#[async_trait]
pub trait PrincipalSource: Send + Sync {
	async fn principal_for_token_hash(&self, token_hash: &str)
		-> Result<Option<Principal>, AuthError>;
}

#[async_trait]
impl<T: PrincipalSource + ?Sized> PrincipalSource for Arc<T> {
	async fn principal_for_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Principal>, AuthError> {
		(**self).principal_for_token_hash(token_hash).await
	}
}

/// Resolves session handles to principals through a [`PrincipalSource`].
#[derive(Clone)]
pub struct SessionPrincipalResolver<S> {
	source: S,
}

impl<S: PrincipalSource> SessionPrincipalResolver<S> {
	pub fn new(source: S) -> Self {
		Self { source }
	}

	/// Resolve the principal for this request.
	///
	/// No side effects. Absence of a principal is a normal outcome.
	#[instrument(skip_all, fields(has_session = session.is_some()))]
	pub async fn resolve_principal(
		&self,
		session: Option<&SessionHandle>,
	) -> Result<Option<Principal>, AuthError> {
		let Some(session) = session else {
			tracing::debug!("no session handle presented");
			return Ok(None);
		};

		let principal = self
			.source
			.principal_for_token_hash(&session.token_hash())
			.await?;

		match &principal {
			Some(p) => tracing::debug!(user_id = p.id, role = %p.role, "session resolved"),
			None => tracing::debug!("session handle did not resolve to a principal"),
		}

		Ok(principal)
	}
}
