// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{
	SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;

use crate::error::DbError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_reference_data",
		include_str!("../migrations/001_reference_data.sql"),
	),
	(
		"002_users_accounts",
		include_str!("../migrations/002_users_accounts.sql"),
	),
	("003_sessions", include_str!("../migrations/003_sessions.sql")),
];

/// Create a SqlitePool with WAL mode and common settings.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./bank.db")
///
/// # Errors
/// Returns `DbError::Internal` if the URL is invalid or connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
	create_pool_with_max_connections(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Like [`create_pool`], with an explicit upper bound on open connections.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool_with_max_connections(
	database_url: &str,
	max_connections: u32,
) -> Result<SqlitePool, DbError> {
	if max_connections == 0 {
		return Err(DbError::Internal(
			"max_connections must be at least 1".to_string(),
		));
	}
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(max_connections)
		.connect_with(options)
		.await?;

	tracing::debug!(max_connections, "database pool created");
	Ok(pool)
}

/// Apply the embedded schema migrations.
///
/// Every statement is idempotent (`IF NOT EXISTS`, `INSERT OR IGNORE`), so
/// this is safe to run on every startup.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for (name, sql) in MIGRATIONS {
		for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
			if let Err(e) = sqlx::query(statement).execute(pool).await {
				if e.to_string().contains("already exists") {
					tracing::debug!(migration = name, "skipping existing object");
					continue;
				}
				tracing::error!(migration = name, error = %e, "migration failed");
				return Err(e.into());
			}
		}
		tracing::debug!(migration = name, "migration applied");
	}

	tracing::info!(count = MIGRATIONS.len(), "database migrations complete");
	Ok(())
}
