// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account ownership through the `users_accounts` join table.
//!
//! An account may have several owners (joint accounts). The owner id list is
//! what the access guard's multi-owner check is evaluated against.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, Row};

use crate::account::parse_account_row;
use crate::error::DbError;
use crate::types::Account;

#[async_trait]
pub trait OwnershipStore: Send + Sync {
	async fn add_owner(&self, user_id: i64, account_id: i64) -> Result<(), DbError>;
	async fn list_accounts_for_user(&self, user_id: i64) -> Result<Vec<Account>, DbError>;
	async fn list_owner_ids_for_account(&self, account_id: i64) -> Result<Vec<i64>, DbError>;
}

#[async_trait]
impl OwnershipStore for OwnershipRepository {
	async fn add_owner(&self, user_id: i64, account_id: i64) -> Result<(), DbError> {
		self.add_owner(user_id, account_id).await
	}

	async fn list_accounts_for_user(&self, user_id: i64) -> Result<Vec<Account>, DbError> {
		self.list_accounts_for_user(user_id).await
	}

	async fn list_owner_ids_for_account(&self, account_id: i64) -> Result<Vec<i64>, DbError> {
		self.list_owner_ids_for_account(account_id).await
	}
}

#[derive(Clone)]
pub struct OwnershipRepository {
	pool: SqlitePool,
}

impl OwnershipRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Link an additional owner to an account.
	///
	/// # Errors
	/// - `DbError::Conflict` if the link already exists
	/// - `DbError::NotFound` if the user or account does not exist
	#[tracing::instrument(skip(self))]
	pub async fn add_owner(&self, user_id: i64, account_id: i64) -> Result<(), DbError> {
		sqlx::query("INSERT INTO users_accounts (user_id, account_id) VALUES (?, ?)")
			.bind(user_id)
			.bind(account_id)
			.execute(&self.pool)
			.await
			.map_err(|e| DbError::from_write(e, "account owner"))?;

		tracing::debug!(user_id, account_id, "account owner added");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_accounts_for_user(&self, user_id: i64) -> Result<Vec<Account>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT a.id, a.balance, a.status_id, s.status, a.type_id, t.type
			FROM users_accounts ua
			INNER JOIN accounts a ON a.id = ua.account_id
			INNER JOIN account_status s ON s.id = a.status_id
			INNER JOIN account_type t ON t.id = a.type_id
			WHERE ua.user_id = ?
			ORDER BY a.id
			"#,
		)
		.bind(user_id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(parse_account_row).collect())
	}

	/// All users linked to `account_id`. Empty if the account has no owners
	/// or does not exist.
	#[tracing::instrument(skip(self))]
	pub async fn list_owner_ids_for_account(&self, account_id: i64) -> Result<Vec<i64>, DbError> {
		let rows = sqlx::query(
			"SELECT user_id FROM users_accounts WHERE account_id = ? ORDER BY user_id",
		)
		.bind(account_id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(|row| row.get("user_id")).collect())
	}
}
