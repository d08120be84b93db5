// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session repository for database operations.
//!
//! Sessions are keyed by the SHA-256 hash of the client's token; the raw
//! token never reaches this layer. [`SessionRepository`] also implements
//! [`PrincipalSource`], resolving a token hash to the owning user's id and role
//! in a single query.

use async_trait::async_trait;
use bank_server_auth::{AuthError, Principal, PrincipalSource, RoleName, Session};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[async_trait]
pub trait SessionStore: Send + Sync {
	async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError>;
	async fn get_session_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DbError>;
	async fn delete_session_by_token_hash(&self, token_hash: &str) -> Result<bool, DbError>;
	async fn delete_expired_sessions(&self) -> Result<u64, DbError>;
}

#[async_trait]
impl SessionStore for SessionRepository {
	async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
		self.create_session(session, token_hash).await
	}

	async fn get_session_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DbError> {
		self.get_session_by_token_hash(token_hash).await
	}

	async fn delete_session_by_token_hash(&self, token_hash: &str) -> Result<bool, DbError> {
		self.delete_session_by_token_hash(token_hash).await
	}

	async fn delete_expired_sessions(&self) -> Result<u64, DbError> {
		self.delete_expired_sessions().await
	}
}

#[async_trait]
impl PrincipalSource for SessionRepository {
	async fn principal_for_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Principal>, AuthError> {
		self
			.get_principal_by_token_hash(token_hash)
			.await
			.map_err(|e| AuthError::SessionLookup(e.to_string()))
	}
}

#[derive(Clone)]
pub struct SessionRepository {
	pool: SqlitePool,
}

impl SessionRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Store a new session.
	///
	/// # Arguments
	/// * `session` - The session metadata
	/// * `token_hash` - SHA-256 hash of the session token (never store plaintext)
	#[tracing::instrument(skip(self, session, token_hash), fields(session_id = %session.id, user_id = session.user_id))]
	pub async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
		for ts in [&session.created_at, &session.expires_at] {
			if !(0..=9999).contains(&ts.year()) {
				return Err(DbError::Internal(format!(
					"session timestamp {ts} is outside the storable range"
				)));
			}
		}

		sqlx::query(
			r#"
			INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(&session.id)
		.bind(session.user_id)
		.bind(token_hash)
		.bind(format_timestamp(&session.created_at))
		.bind(format_timestamp(&session.expires_at))
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_write(e, "session"))?;

		tracing::debug!(session_id = %session.id, user_id = session.user_id, "session created");
		Ok(())
	}

	/// Get a session by its token hash.
	///
	/// Does not check expiry; callers inspect [`Session::is_expired`].
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn get_session_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Session>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, user_id, created_at, expires_at
			FROM sessions
			WHERE token_hash = ?
			"#,
		)
		.bind(token_hash)
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => Ok(Some(Session {
				id: row.get("id"),
				user_id: row.get("user_id"),
				created_at: parse_timestamp(row.get("created_at"))?,
				expires_at: parse_timestamp(row.get("expires_at"))?,
			})),
			None => Ok(None),
		}
	}

	/// Resolve an unexpired session to its user's id and role.
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn get_principal_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Principal>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT u.id, r.role
			FROM sessions s
			INNER JOIN users u ON u.id = s.user_id
			INNER JOIN roles r ON r.id = u.role_id
			WHERE s.token_hash = ? AND s.expires_at > ?
			"#,
		)
		.bind(token_hash)
		.bind(format_timestamp(&Utc::now()))
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(|row| Principal::new(row.get("id"), RoleName::parse(row.get::<&str, _>("role")))))
	}

	/// Delete the session with this token hash (logout).
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn delete_session_by_token_hash(&self, token_hash: &str) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
			.bind(token_hash)
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!("session deleted");
		}
		Ok(deleted)
	}

	/// Remove every session whose expiry has passed.
	///
	/// # Returns
	/// Number of sessions deleted.
	#[tracing::instrument(skip(self))]
	pub async fn delete_expired_sessions(&self) -> Result<u64, DbError> {
		let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
			.bind(format_timestamp(&Utc::now()))
			.execute(&self.pool)
			.await?;

		let count = result.rows_affected();
		if count > 0 {
			tracing::debug!(count, "cleaned up expired sessions");
		}
		Ok(count)
	}
}

/// Fixed-width RFC 3339 so stored timestamps order lexically. Only holds for
/// four-digit years; `create_session` rejects anything else.
fn format_timestamp(dt: &DateTime<Utc>) -> String {
	dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(s)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("invalid timestamp {s:?}: {e}")))
}
