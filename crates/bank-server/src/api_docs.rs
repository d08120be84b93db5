// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for bank-server, generated from the handler
//! annotations with utoipa. Served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bank Server API",
        version = "1.0.0",
        description = "Session-authenticated, role-gated banking API.",
        license(name = "Proprietary")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and database checks"),
        (name = "sessions", description = "Login and logout"),
        (name = "users", description = "User records"),
        (name = "accounts", description = "Bank accounts and their owners")
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::sessions::login,
        crate::routes::sessions::logout,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::accounts::list_accounts,
        crate::routes::accounts::get_account,
        crate::routes::accounts::list_accounts_by_status,
        crate::routes::accounts::list_accounts_by_type,
        crate::routes::accounts::list_accounts_for_owner,
        crate::routes::accounts::create_account,
        crate::routes::accounts::update_account,
        crate::routes::accounts::delete_account,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            bank_server_api::HealthResponse,
            bank_server_api::HealthStatus,
            bank_server_api::LoginRequest,
            bank_server_api::MessageResponse,
            bank_server_api::RoleResponse,
            bank_server_api::UserResponse,
            bank_server_api::CreateUserRequest,
            bank_server_api::UpdateUserRequest,
            bank_server_api::AccountStatusResponse,
            bank_server_api::AccountTypeResponse,
            bank_server_api::AccountResponse,
            bank_server_api::CreateAccountRequest,
            bank_server_api::UpdateAccountRequest,
        )
    )
)]
pub struct ApiDoc;
