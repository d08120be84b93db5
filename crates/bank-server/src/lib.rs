// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Banking API server.
//!
//! An axum application over SQLite. Every protected route resolves the caller
//! from the session cookie and asks the guard in `bank-server-auth` for a
//! decision before it reads or writes the resource.

pub mod api;
pub mod api_docs;
pub mod auth_middleware;
pub mod error;
pub mod jobs;
pub mod routes;
pub mod typed_router;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use bank_server_config::ServerConfig;
pub use error::{ErrorResponse, ServerError};
pub use jobs::SessionCleanupJob;
pub use typed_router::{PublicRouter, SessionRouter};
