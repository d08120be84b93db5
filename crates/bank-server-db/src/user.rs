// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.
//!
//! Every user read joins the `roles` table so callers always get the role
//! name alongside the id.

use async_trait::async_trait;
use bank_server_auth::RoleName;
use sqlx::{sqlite::SqliteRow, sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::types::{NewUser, Role, User, UserUpdate};

const USER_COLUMNS: &str = r#"
	SELECT u.id, u.username, u.password, u.first_name, u.last_name, u.email,
		   u.role_id, r.role
	FROM users u
	INNER JOIN roles r ON r.id = u.role_id
"#;

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &NewUser) -> Result<i64, DbError>;
	async fn list_users(&self) -> Result<Vec<User>, DbError>;
	async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
	async fn update_user(&self, user: &UserUpdate) -> Result<(), DbError>;
	async fn delete_user(&self, id: i64) -> Result<bool, DbError>;
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &NewUser) -> Result<i64, DbError> {
		self.create_user(user).await
	}

	async fn list_users(&self) -> Result<Vec<User>, DbError> {
		self.list_users().await
	}

	async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
		self.get_user_by_id(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}

	async fn update_user(&self, user: &UserUpdate) -> Result<(), DbError> {
		self.update_user(user).await
	}

	async fn delete_user(&self, id: i64) -> Result<bool, DbError> {
		self.delete_user(id).await
	}
}

#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a user and return the generated id.
	///
	/// # Errors
	/// - `DbError::Conflict` if the username or email is taken
	/// - `DbError::NotFound` if `role_id` is not a seeded role
	#[tracing::instrument(skip(self, user), fields(username = %user.username, role_id = user.role_id))]
	pub async fn create_user(&self, user: &NewUser) -> Result<i64, DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO users (username, password, first_name, last_name, email, role_id)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&user.username)
		.bind(&user.password)
		.bind(&user.first_name)
		.bind(&user.last_name)
		.bind(&user.email)
		.bind(user.role_id)
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_write(e, "user"))?;

		let id = result.last_insert_rowid();
		tracing::debug!(user_id = id, "user created");
		Ok(id)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
		let rows = sqlx::query(&format!("{USER_COLUMNS} ORDER BY u.id"))
			.fetch_all(&self.pool)
			.await?;

		Ok(rows.iter().map(parse_user_row).collect())
	}

	#[tracing::instrument(skip(self), fields(user_id = id))]
	pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!("{USER_COLUMNS} WHERE u.id = ?"))
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.as_ref().map(parse_user_row))
	}

	/// Look up a user by exact username. Used by login.
	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!("{USER_COLUMNS} WHERE u.username = ?"))
			.bind(username)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.as_ref().map(parse_user_row))
	}

	/// Replace every column of an existing user.
	///
	/// # Errors
	/// - `DbError::NotFound` if no user has `user.id`
	/// - `DbError::Conflict` if the new username or email is taken
	#[tracing::instrument(skip(self, user), fields(user_id = user.id, role_id = user.role_id))]
	pub async fn update_user(&self, user: &UserUpdate) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET username = ?, password = ?, first_name = ?, last_name = ?, email = ?, role_id = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.username)
		.bind(&user.password)
		.bind(&user.first_name)
		.bind(&user.last_name)
		.bind(&user.email)
		.bind(user.role_id)
		.bind(user.id)
		.execute(&self.pool)
		.await
		.map_err(|e| DbError::from_write(e, "user"))?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}

		tracing::debug!(user_id = user.id, "user updated");
		Ok(())
	}

	/// Delete a user. Their sessions and ownership links go with them.
	#[tracing::instrument(skip(self), fields(user_id = id))]
	pub async fn delete_user(&self, id: i64) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(user_id = id, "user deleted");
		}
		Ok(deleted)
	}
}

fn parse_user_row(row: &SqliteRow) -> User {
	User {
		id: row.get("id"),
		username: row.get("username"),
		password: row.get("password"),
		first_name: row.get("first_name"),
		last_name: row.get("last_name"),
		email: row.get("email"),
		role: Role {
			role_id: row.get("role_id"),
			role: RoleName::parse(row.get::<&str, _>("role")),
		},
	}
}
