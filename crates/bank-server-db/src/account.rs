// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account repository for database operations.
//!
//! Accounts are always returned with their status and type joined in.
//! Ownership lives in `users_accounts`; see [`crate::ownership`].

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::types::{Account, AccountStatus, AccountType, AccountUpdate, NewAccount};

const ACCOUNT_COLUMNS: &str = r#"
	SELECT a.id, a.balance, a.status_id, s.status, a.type_id, t.type
	FROM accounts a
	INNER JOIN account_status s ON s.id = a.status_id
	INNER JOIN account_type t ON t.id = a.type_id
"#;

#[async_trait]
pub trait AccountStore: Send + Sync {
	async fn create_account(&self, account: &NewAccount, owner_id: i64) -> Result<i64, DbError>;
	async fn list_accounts(&self) -> Result<Vec<Account>, DbError>;
	async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, DbError>;
	async fn list_accounts_by_status(&self, status_id: i64) -> Result<Vec<Account>, DbError>;
	async fn list_accounts_by_type(&self, type_id: i64) -> Result<Vec<Account>, DbError>;
	async fn update_account(&self, account: &AccountUpdate) -> Result<(), DbError>;
	async fn delete_account(&self, id: i64) -> Result<bool, DbError>;
}

#[async_trait]
impl AccountStore for AccountRepository {
	async fn create_account(&self, account: &NewAccount, owner_id: i64) -> Result<i64, DbError> {
		self.create_account(account, owner_id).await
	}

	async fn list_accounts(&self) -> Result<Vec<Account>, DbError> {
		self.list_accounts().await
	}

	async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, DbError> {
		self.get_account_by_id(id).await
	}

	async fn list_accounts_by_status(&self, status_id: i64) -> Result<Vec<Account>, DbError> {
		self.list_accounts_by_status(status_id).await
	}

	async fn list_accounts_by_type(&self, type_id: i64) -> Result<Vec<Account>, DbError> {
		self.list_accounts_by_type(type_id).await
	}

	async fn update_account(&self, account: &AccountUpdate) -> Result<(), DbError> {
		self.update_account(account).await
	}

	async fn delete_account(&self, id: i64) -> Result<bool, DbError> {
		self.delete_account(id).await
	}
}

#[derive(Clone)]
pub struct AccountRepository {
	pool: SqlitePool,
}

impl AccountRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert an account and link it to its first owner in one transaction.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the owner, status or type does not exist.
	#[tracing::instrument(skip(self, account), fields(status_id = account.status_id, type_id = account.type_id))]
	pub async fn create_account(&self, account: &NewAccount, owner_id: i64) -> Result<i64, DbError> {
		let mut tx = self.pool.begin().await?;

		let account_id = sqlx::query("INSERT INTO accounts (balance, status_id, type_id) VALUES (?, ?, ?)")
			.bind(account.balance)
			.bind(account.status_id)
			.bind(account.type_id)
			.execute(&mut *tx)
			.await
			.map_err(|e| DbError::from_write(e, "account"))?
			.last_insert_rowid();

		sqlx::query("INSERT INTO users_accounts (user_id, account_id) VALUES (?, ?)")
			.bind(owner_id)
			.bind(account_id)
			.execute(&mut *tx)
			.await
			.map_err(|e| DbError::from_write(e, "account owner"))?;

		tx.commit().await?;

		tracing::debug!(account_id, owner_id, "account created");
		Ok(account_id)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_accounts(&self) -> Result<Vec<Account>, DbError> {
		let rows = sqlx::query(&format!("{ACCOUNT_COLUMNS} ORDER BY a.id"))
			.fetch_all(&self.pool)
			.await?;

		Ok(rows.iter().map(parse_account_row).collect())
	}

	#[tracing::instrument(skip(self), fields(account_id = id))]
	pub async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, DbError> {
		let row = sqlx::query(&format!("{ACCOUNT_COLUMNS} WHERE a.id = ?"))
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.as_ref().map(parse_account_row))
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_accounts_by_status(&self, status_id: i64) -> Result<Vec<Account>, DbError> {
		let rows = sqlx::query(&format!("{ACCOUNT_COLUMNS} WHERE a.status_id = ? ORDER BY a.id"))
			.bind(status_id)
			.fetch_all(&self.pool)
			.await?;

		Ok(rows.iter().map(parse_account_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_accounts_by_type(&self, type_id: i64) -> Result<Vec<Account>, DbError> {
		let rows = sqlx::query(&format!("{ACCOUNT_COLUMNS} WHERE a.type_id = ? ORDER BY a.id"))
			.bind(type_id)
			.fetch_all(&self.pool)
			.await?;

		Ok(rows.iter().map(parse_account_row).collect())
	}

	/// Replace balance, status and type of an existing account.
	#[tracing::instrument(skip(self, account), fields(account_id = account.account_id))]
	pub async fn update_account(&self, account: &AccountUpdate) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE accounts
			SET balance = ?, status_id = ?, type_id = ?
			WHERE id = ?
			"#,
		)
		.bind(account.balance)
		.bind(account.status_id)
		.bind(account.type_id)
		.bind(account.account_id)
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_write(e, "account"))?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("account {}", account.account_id)));
		}

		tracing::debug!(account_id = account.account_id, "account updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(account_id = id))]
	pub async fn delete_account(&self, id: i64) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(account_id = id, "account deleted");
		}
		Ok(deleted)
	}
}

pub(crate) fn parse_account_row(row: &SqliteRow) -> Account {
	Account {
		account_id: row.get("id"),
		balance: row.get("balance"),
		status: AccountStatus {
			status_id: row.get("status_id"),
			status: row.get("status"),
		},
		account_type: AccountType {
			type_id: row.get("type_id"),
			name: row.get("type"),
		},
	}
}
