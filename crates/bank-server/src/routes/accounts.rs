// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account HTTP handlers.
//!
//! Account ownership lives in the `users_accounts` join table, so the owner
//! exception for a single account is evaluated against the full owner set.
//! That set is only read after the role check has already said
//! `DenyRoleNotAllowed`; anonymous callers and staff never trigger it.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use bank_server_api::{
	AccountResponse, CreateAccountRequest, MessageResponse, UpdateAccountRequest,
};
use bank_server_auth::{
	check_role, check_role_or_any_owner, check_role_or_owner, AccessDecision, AllowList, RoleName,
};
use bank_server_db::{status_ids, Account, NewAccount};
use tracing::instrument;

use crate::{
	api::AppState,
	auth_middleware::OptionalAuth,
	error::{ErrorResponse, ServerError},
};

const ACCOUNT_READERS: AllowList = AllowList::from_static(&[RoleName::Employee, RoleName::Admin]);
const ACCOUNT_OPENERS: AllowList = AllowList::from_static(&[RoleName::Employee, RoleName::Admin]);
const ACCOUNT_ADMINS: AllowList = AllowList::from_static(&[RoleName::Admin]);

fn account_not_found(id: i64) -> ServerError {
	ServerError::NotFound(format!("Account {id} not found"))
}

/// Reject unknown status or type ids with a 404 before anything is written.
async fn ensure_reference_data(
	state: &AppState,
	status_id: i64,
	type_id: i64,
) -> Result<(), ServerError> {
	if state
		.lookup_repo
		.get_account_status_by_id(status_id)
		.await?
		.is_none()
	{
		return Err(ServerError::NotFound(format!(
			"Account status {status_id} not found"
		)));
	}
	if state
		.lookup_repo
		.get_account_type_by_id(type_id)
		.await?
		.is_none()
	{
		return Err(ServerError::NotFound(format!(
			"Account type {type_id} not found"
		)));
	}
	Ok(())
}

fn to_responses(accounts: Vec<Account>) -> Json<Vec<AccountResponse>> {
	Json(accounts.into_iter().map(AccountResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/accounts",
    responses(
        (status = 200, description = "All accounts", body = [AccountResponse]),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// GET /accounts - List every account.
#[instrument(skip(state, auth))]
pub async fn list_accounts(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
) -> Result<Json<Vec<AccountResponse>>, ServerError> {
	ServerError::check(check_role(auth.principal(), &ACCOUNT_READERS))?;
	Ok(to_responses(state.account_repo.list_accounts().await?))
}

#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(("id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "The account", body = AccountResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Neither staff nor an owner", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// GET /accounts/{id} - Fetch one account. Staff, or any owner.
#[instrument(skip(state, auth), fields(decision = tracing::field::Empty))]
pub async fn get_account(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, ServerError> {
	let principal = auth.principal();

	let mut decision = check_role(principal, &ACCOUNT_READERS);
	if decision == AccessDecision::DenyRoleNotAllowed {
		let owner_ids = state.ownership_repo.list_owner_ids_for_account(id).await?;
		decision = check_role_or_any_owner(principal, &ACCOUNT_READERS, &owner_ids);
	}
	tracing::Span::current().record("decision", decision.as_str());
	ServerError::check(decision)?;

	let account = state
		.account_repo
		.get_account_by_id(id)
		.await?
		.ok_or_else(|| account_not_found(id))?;
	Ok(Json(account.into()))
}

#[utoipa::path(
    get,
    path = "/accounts/status/{status_id}",
    params(("status_id" = i64, Path, description = "Account status ID")),
    responses(
        (status = 200, description = "Accounts with this status", body = [AccountResponse]),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// GET /accounts/status/{status_id} - List accounts by status.
#[instrument(skip(state, auth))]
pub async fn list_accounts_by_status(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(status_id): Path<i64>,
) -> Result<Json<Vec<AccountResponse>>, ServerError> {
	ServerError::check(check_role(auth.principal(), &ACCOUNT_READERS))?;
	Ok(to_responses(
		state.account_repo.list_accounts_by_status(status_id).await?,
	))
}

#[utoipa::path(
    get,
    path = "/accounts/type/{type_id}",
    params(("type_id" = i64, Path, description = "Account type ID")),
    responses(
        (status = 200, description = "Accounts of this type", body = [AccountResponse]),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// GET /accounts/type/{type_id} - List accounts by type.
#[instrument(skip(state, auth))]
pub async fn list_accounts_by_type(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(type_id): Path<i64>,
) -> Result<Json<Vec<AccountResponse>>, ServerError> {
	ServerError::check(check_role(auth.principal(), &ACCOUNT_READERS))?;
	Ok(to_responses(
		state.account_repo.list_accounts_by_type(type_id).await?,
	))
}

#[utoipa::path(
    get,
    path = "/accounts/owner/{user_id}",
    params(("user_id" = i64, Path, description = "Owner user ID")),
    responses(
        (status = 200, description = "Accounts owned by the user", body = [AccountResponse]),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Neither staff nor this user", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// GET /accounts/owner/{user_id} - List a user's accounts. Staff, or the user.
#[instrument(skip(state, auth))]
pub async fn list_accounts_for_owner(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(user_id): Path<i64>,
) -> Result<Json<Vec<AccountResponse>>, ServerError> {
	ServerError::check(check_role_or_owner(
		auth.principal(),
		&ACCOUNT_READERS,
		user_id,
	))?;
	Ok(to_responses(
		state.ownership_repo.list_accounts_for_user(user_id).await?,
	))
}

#[utoipa::path(
    post,
    path = "/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account opened", body = AccountResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Neither staff nor the owner named in the body", body = ErrorResponse),
        (status = 404, description = "Unknown owner, status or type", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// POST /accounts - Open an account for `user_id`.
///
/// Staff may choose the initial status (Pending if omitted) and balance. A
/// customer opening an account for themselves always gets Pending with a zero
/// balance.
#[instrument(skip(state, auth, req), fields(owner_id = req.user_id))]
pub async fn create_account(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ServerError> {
	let principal = auth.principal();
	ServerError::check(check_role_or_owner(principal, &ACCOUNT_OPENERS, req.user_id))?;

	let staff = principal.is_some_and(|p| ACCOUNT_OPENERS.permits(p.role));
	let (status_id, balance) = if staff {
		(req.status_id.unwrap_or(status_ids::PENDING), req.balance)
	} else {
		(status_ids::PENDING, 0.0)
	};
	ensure_reference_data(&state, status_id, req.type_id).await?;

	let new_account = NewAccount {
		balance,
		status_id,
		type_id: req.type_id,
	};
	let id = state
		.account_repo
		.create_account(&new_account, req.user_id)
		.await?;
	let account = state
		.account_repo
		.get_account_by_id(id)
		.await?
		.ok_or_else(|| ServerError::Internal(format!("account {id} vanished after insert")))?;

	tracing::info!(account_id = id, status_id, "account opened");
	Ok((StatusCode::CREATED, Json(account.into())))
}

#[utoipa::path(
    put,
    path = "/accounts",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account replaced", body = AccountResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such account, status or type", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// PUT /accounts - Replace an account's balance, status and type.
#[instrument(skip(state, auth, req), fields(account_id = req.account_id))]
pub async fn update_account(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ServerError> {
	ServerError::check(check_role(auth.principal(), &ACCOUNT_ADMINS))?;
	ensure_reference_data(&state, req.status_id, req.type_id).await?;

	let account_id = req.account_id;
	state.account_repo.update_account(&req.into()).await?;

	let account = state
		.account_repo
		.get_account_by_id(account_id)
		.await?
		.ok_or_else(|| account_not_found(account_id))?;
	Ok(Json(account.into()))
}

#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    params(("id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse)
    ),
    tag = "accounts"
)]
/// DELETE /accounts/{id} - Delete an account and its ownership links.
#[instrument(skip(state, auth))]
pub async fn delete_account(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ServerError> {
	ServerError::check(check_role(auth.principal(), &ACCOUNT_ADMINS))?;

	if !state.account_repo.delete_account(id).await? {
		return Err(account_not_found(id));
	}

	tracing::info!(account_id = id, "account deleted");
	Ok(Json(MessageResponse::new(format!("Account {id} deleted"))))
}
