// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User HTTP handlers.
//!
//! | Route | Allow-list | Owner exception |
//! |---|---|---|
//! | `GET /users` | Employee, Admin | none |
//! | `GET /users/{id}` | Employee, Admin | `id` |
//! | `POST /users` | Admin | none |
//! | `PUT /users` | Admin | body `user_id`, role unchanged |
//! | `DELETE /users/{id}` | Admin | none |

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use bank_server_api::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use bank_server_auth::{check_role, check_role_or_owner, AllowList, RoleName};
use bank_server_db::UserUpdate;
use tracing::instrument;

use crate::{
	api::AppState,
	auth_middleware::OptionalAuth,
	error::{ErrorResponse, ServerError},
};

const USER_READERS: AllowList = AllowList::from_static(&[RoleName::Employee, RoleName::Admin]);
const USER_ADMINS: AllowList = AllowList::from_static(&[RoleName::Admin]);

fn user_not_found(id: i64) -> ServerError {
	ServerError::NotFound(format!("User {id} not found"))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    ),
    tag = "users"
)]
/// GET /users - List every user.
#[instrument(skip(state, auth))]
pub async fn list_users(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
) -> Result<Json<Vec<UserResponse>>, ServerError> {
	ServerError::check(check_role(auth.principal(), &USER_READERS))?;

	let users = state.user_repo.list_users().await?;
	Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Neither staff nor this user", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = "users"
)]
/// GET /users/{id} - Fetch one user. Staff, or the user themselves.
#[instrument(skip(state, auth))]
pub async fn get_user(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ServerError> {
	ServerError::check(check_role_or_owner(auth.principal(), &USER_READERS, id))?;

	let user = state
		.user_repo
		.get_user_by_id(id)
		.await?
		.ok_or_else(|| user_not_found(id))?;
	Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown role", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse)
    ),
    tag = "users"
)]
/// POST /users - Register a user.
#[instrument(skip(state, auth, req))]
pub async fn create_user(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ServerError> {
	ServerError::check(check_role(auth.principal(), &USER_ADMINS))?;

	let id = state.user_repo.create_user(&req.into()).await?;
	let user = state
		.user_repo
		.get_user_by_id(id)
		.await?
		.ok_or_else(|| ServerError::Internal(format!("user {id} vanished after insert")))?;

	tracing::info!(user_id = id, "user registered");
	Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    put,
    path = "/users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User replaced", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not an admin, not this user, or a self role change", body = ErrorResponse),
        (status = 404, description = "No such user or role", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse)
    ),
    tag = "users"
)]
/// PUT /users - Replace a user record.
///
/// Admins may replace any user. A user may replace their own record but not
/// their own role.
#[instrument(skip(state, auth, req), fields(user_id = req.user_id))]
pub async fn update_user(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ServerError> {
	let principal = auth.principal();
	ServerError::check(check_role_or_owner(principal, &USER_ADMINS, req.user_id))?;

	let via_owner = principal.is_some_and(|p| !USER_ADMINS.permits(p.role));
	if via_owner {
		let current = state
			.user_repo
			.get_user_by_id(req.user_id)
			.await?
			.ok_or_else(|| user_not_found(req.user_id))?;
		if current.role.role_id != req.role_id {
			tracing::warn!("self role change rejected");
			return Err(ServerError::Forbidden);
		}
	}

	let update: UserUpdate = req.into();
	state.user_repo.update_user(&update).await?;

	let user = state
		.user_repo
		.get_user_by_id(update.id)
		.await?
		.ok_or_else(|| user_not_found(update.id))?;
	Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = "users"
)]
/// DELETE /users/{id} - Delete a user and their ownership links.
#[instrument(skip(state, auth))]
pub async fn delete_user(
	State(state): State<AppState>,
	OptionalAuth(auth): OptionalAuth,
	Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ServerError> {
	ServerError::check(check_role(auth.principal(), &USER_ADMINS))?;

	if !state.user_repo.delete_user(id).await? {
		return Err(user_not_found(id));
	}

	tracing::info!(user_id = id, "user deleted");
	Ok(Json(MessageResponse::new(format!("User {id} deleted"))))
}
