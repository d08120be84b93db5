// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bank_server_db::{NewUser, Role, User, UserUpdate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RoleResponse {
	pub role_id: i64,
	pub role: String,
}

impl From<Role> for RoleResponse {
	fn from(role: Role) -> Self {
		Self {
			role_id: role.role_id,
			role: role.role.to_string(),
		}
	}
}

/// A user in API responses. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserResponse {
	pub user_id: i64,
	pub username: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role: RoleResponse,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			user_id: user.id,
			username: user.username,
			first_name: user.first_name,
			last_name: user.last_name,
			email: user.email,
			role: user.role.into(),
		}
	}
}

/// Request to register a user (Admin only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateUserRequest {
	pub username: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role_id: i64,
}

impl From<CreateUserRequest> for NewUser {
	fn from(req: CreateUserRequest) -> Self {
		Self {
			username: req.username,
			password: req.password,
			first_name: req.first_name,
			last_name: req.last_name,
			email: req.email,
			role_id: req.role_id,
		}
	}
}

/// Full replacement of a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateUserRequest {
	pub user_id: i64,
	pub username: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub role_id: i64,
}

impl From<UpdateUserRequest> for UserUpdate {
	fn from(req: UpdateUserRequest) -> Self {
		Self {
			id: req.user_id,
			username: req.username,
			password: req.password,
			first_name: req.first_name,
			last_name: req.last_name,
			email: req.email,
			role_id: req.role_id,
		}
	}
}
