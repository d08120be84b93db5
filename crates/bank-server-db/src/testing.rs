// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::pool::run_migrations;
use crate::types::{role_ids, status_ids, type_ids};

/// In-memory pool with the full schema applied.
///
/// A single connection, since every `:memory:` connection is its own database.
pub async fn create_test_pool() -> SqlitePool {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect("sqlite::memory:")
		.await
		.unwrap();
	sqlx::query("PRAGMA foreign_keys = ON")
		.execute(&pool)
		.await
		.unwrap();
	run_migrations(&pool).await.unwrap();
	pool
}

pub async fn insert_user(pool: &SqlitePool, username: &str, role_id: i64) -> i64 {
	sqlx::query(
		r#"
		INSERT INTO users (username, password, first_name, last_name, email, role_id)
		VALUES (?, 'password', 'Test', 'User', ?, ?)
		"#,
	)
	.bind(username)
	.bind(format!("{username}@example.com"))
	.bind(role_id)
	.execute(pool)
	.await
	.unwrap()
	.last_insert_rowid()
}

pub async fn insert_standard_user(pool: &SqlitePool, username: &str) -> i64 {
	insert_user(pool, username, role_ids::STANDARD).await
}

pub async fn insert_account(pool: &SqlitePool, balance: f64, status_id: i64) -> i64 {
	sqlx::query("INSERT INTO accounts (balance, status_id, type_id) VALUES (?, ?, ?)")
		.bind(balance)
		.bind(status_id)
		.bind(type_ids::CHECKING)
		.execute(pool)
		.await
		.unwrap()
		.last_insert_rowid()
}

pub async fn insert_open_account(pool: &SqlitePool, owner_id: i64) -> i64 {
	let account_id = insert_account(pool, 100.0, status_ids::OPEN).await;
	sqlx::query("INSERT INTO users_accounts (user_id, account_id) VALUES (?, ?)")
		.bind(owner_id)
		.bind(account_id)
		.execute(pool)
		.await
		.unwrap();
	account_id
}
