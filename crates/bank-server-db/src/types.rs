// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Records stored in and read from the bank database.

use bank_server_auth::RoleName;
use serde::{Deserialize, Serialize};

/// Role row, joined onto every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub role_id: i64,
	pub role: RoleName,
}

/// A bank customer or staff member.
///
/// `password` is stored in plaintext and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	pub username: String,
	#[serde(skip_serializing, default)]
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role: Role,
}

/// Fields for inserting a user. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub username: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role_id: i64,
}

/// Full replacement of a user row.
#[derive(Debug, Clone)]
pub struct UserUpdate {
	pub id: i64,
	pub username: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
	pub status_id: i64,
	pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountType {
	pub type_id: i64,
	#[serde(rename = "type")]
	pub name: String,
}

/// A bank account, with its status and type joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
	pub account_id: i64,
	pub balance: f64,
	pub status: AccountStatus,
	#[serde(rename = "type")]
	pub account_type: AccountType,
}

/// Fields for inserting an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
	pub balance: f64,
	pub status_id: i64,
	pub type_id: i64,
}

/// Full replacement of an account row.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
	pub account_id: i64,
	pub balance: f64,
	pub status_id: i64,
	pub type_id: i64,
}

/// Seeded `account_status` ids.
pub mod status_ids {
	pub const PENDING: i64 = 1;
	pub const OPEN: i64 = 2;
	pub const CLOSED: i64 = 3;
	pub const DENIED: i64 = 4;
}

/// Seeded `account_type` ids.
pub mod type_ids {
	pub const CHECKING: i64 = 1;
	pub const SAVINGS: i64 = 2;
}

/// Seeded `roles` ids.
pub mod role_ids {
	pub const STANDARD: i64 = 1;
	pub const PREMIUM: i64 = 2;
	pub const EMPLOYEE: i64 = 3;
	pub const ADMIN: i64 = 4;
}
