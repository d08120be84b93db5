// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bank_server_db::{Account, AccountStatus, AccountType, AccountUpdate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AccountStatusResponse {
	pub status_id: i64,
	pub status: String,
}

impl From<AccountStatus> for AccountStatusResponse {
	fn from(status: AccountStatus) -> Self {
		Self {
			status_id: status.status_id,
			status: status.status,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AccountTypeResponse {
	pub type_id: i64,
	#[serde(rename = "type")]
	pub name: String,
}

impl From<AccountType> for AccountTypeResponse {
	fn from(account_type: AccountType) -> Self {
		Self {
			type_id: account_type.type_id,
			name: account_type.name,
		}
	}
}

/// An account in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AccountResponse {
	pub account_id: i64,
	pub balance: f64,
	pub status: AccountStatusResponse,
	#[serde(rename = "type")]
	pub account_type: AccountTypeResponse,
}

impl From<Account> for AccountResponse {
	fn from(account: Account) -> Self {
		Self {
			account_id: account.account_id,
			balance: account.balance,
			status: account.status.into(),
			account_type: account.account_type.into(),
		}
	}
}

/// Request to open an account for `user_id`.
///
/// `status_id` is only honoured for staff callers; an owner opening their own
/// account always gets Pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateAccountRequest {
	pub user_id: i64,
	#[serde(default)]
	pub balance: f64,
	#[serde(default)]
	pub status_id: Option<i64>,
	pub type_id: i64,
}

/// Full replacement of an account's balance, status and type (Admin only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateAccountRequest {
	pub account_id: i64,
	pub balance: f64,
	pub status_id: i64,
	pub type_id: i64,
}

impl From<UpdateAccountRequest> for AccountUpdate {
	fn from(req: UpdateAccountRequest) -> Self {
		Self {
			account_id: req.account_id,
			balance: req.balance,
			status_id: req.status_id,
			type_id: req.type_id,
		}
	}
}
