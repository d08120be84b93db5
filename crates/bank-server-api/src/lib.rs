// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod accounts;
pub mod health;
pub mod sessions;
pub mod users;

pub use accounts::{
	AccountResponse, AccountStatusResponse, AccountTypeResponse, CreateAccountRequest,
	UpdateAccountRequest,
};
pub use health::{HealthResponse, HealthStatus};
pub use sessions::{LoginRequest, MessageResponse};
pub use users::{CreateUserRequest, RoleResponse, UpdateUserRequest, UserResponse};
