// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read-only reference tables: roles, account statuses and account types.

use async_trait::async_trait;
use bank_server_auth::RoleName;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::types::{AccountStatus, AccountType, Role};

#[async_trait]
pub trait LookupStore: Send + Sync {
	async fn list_roles(&self) -> Result<Vec<Role>, DbError>;
	async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>, DbError>;
	async fn list_account_statuses(&self) -> Result<Vec<AccountStatus>, DbError>;
	async fn get_account_status_by_id(&self, id: i64) -> Result<Option<AccountStatus>, DbError>;
	async fn list_account_types(&self) -> Result<Vec<AccountType>, DbError>;
	async fn get_account_type_by_id(&self, id: i64) -> Result<Option<AccountType>, DbError>;
}

#[async_trait]
impl LookupStore for LookupRepository {
	async fn list_roles(&self) -> Result<Vec<Role>, DbError> {
		self.list_roles().await
	}

	async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>, DbError> {
		self.get_role_by_id(id).await
	}

	async fn list_account_statuses(&self) -> Result<Vec<AccountStatus>, DbError> {
		self.list_account_statuses().await
	}

	async fn get_account_status_by_id(&self, id: i64) -> Result<Option<AccountStatus>, DbError> {
		self.get_account_status_by_id(id).await
	}

	async fn list_account_types(&self) -> Result<Vec<AccountType>, DbError> {
		self.list_account_types().await
	}

	async fn get_account_type_by_id(&self, id: i64) -> Result<Option<AccountType>, DbError> {
		self.get_account_type_by_id(id).await
	}
}

#[derive(Clone)]
pub struct LookupRepository {
	pool: SqlitePool,
}

impl LookupRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_roles(&self) -> Result<Vec<Role>, DbError> {
		let rows = sqlx::query("SELECT id, role FROM roles ORDER BY id")
			.fetch_all(&self.pool)
			.await?;

		Ok(rows
			.iter()
			.map(|row| Role {
				role_id: row.get("id"),
				role: RoleName::parse(row.get::<&str, _>("role")),
			})
			.collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>, DbError> {
		let row = sqlx::query("SELECT id, role FROM roles WHERE id = ?")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.map(|row| Role {
			role_id: row.get("id"),
			role: RoleName::parse(row.get::<&str, _>("role")),
		}))
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_account_statuses(&self) -> Result<Vec<AccountStatus>, DbError> {
		let rows = sqlx::query("SELECT id, status FROM account_status ORDER BY id")
			.fetch_all(&self.pool)
			.await?;

		Ok(rows
			.iter()
			.map(|row| AccountStatus {
				status_id: row.get("id"),
				status: row.get("status"),
			})
			.collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_account_status_by_id(&self, id: i64) -> Result<Option<AccountStatus>, DbError> {
		let row = sqlx::query("SELECT id, status FROM account_status WHERE id = ?")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.map(|row| AccountStatus {
			status_id: row.get("id"),
			status: row.get("status"),
		}))
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_account_types(&self) -> Result<Vec<AccountType>, DbError> {
		let rows = sqlx::query("SELECT id, type FROM account_type ORDER BY id")
			.fetch_all(&self.pool)
			.await?;

		Ok(rows
			.iter()
			.map(|row| AccountType {
				type_id: row.get("id"),
				name: row.get("type"),
			})
			.collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_account_type_by_id(&self, id: i64) -> Result<Option<AccountType>, DbError> {
		let row = sqlx::query("SELECT id, type FROM account_type WHERE id = ?")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.map(|row| AccountType {
			type_id: row.get("id"),
			name: row.get("type"),
		}))
	}
}
