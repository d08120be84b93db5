// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl DbError {
	/// Classify an error from an INSERT or UPDATE.
	///
	/// Unique violations become `Conflict`, foreign key violations become
	/// `NotFound`, everything else stays `Sqlx`.
	pub(crate) fn from_write(err: sqlx::Error, what: &str) -> Self {
		match err {
			sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
				DbError::Conflict(format!("{what} already exists"))
			}
			sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
				DbError::NotFound(format!("{what} references a missing record"))
			}
			other => DbError::Sqlx(other),
		}
	}
}

pub type Result<T> = std::result::Result<T, DbError>;
