// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{middleware::from_fn_with_state, routing::MethodRouter, Router};

use crate::{api::AppState, auth_middleware::auth_layer};

/// Routes that run behind [`auth_layer`].
///
/// The layer only resolves the caller; it does not reject anonymous requests.
/// Each handler calls the guard with its own allow-list.
pub struct SessionRouter(Router<AppState>);

impl SessionRouter {
	pub fn new() -> Self {
		Self(Router::new())
	}

	pub fn route(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
		Self(self.0.route(path, method_router))
	}

	pub fn build(self, state: AppState) -> Router<AppState> {
		self.0.layer(from_fn_with_state(state, auth_layer))
	}
}

impl Default for SessionRouter {
	fn default() -> Self {
		Self::new()
	}
}

/// Routes that never look at the session cookie.
pub struct PublicRouter(Router<AppState>);

impl PublicRouter {
	pub fn new() -> Self {
		Self(Router::new())
	}

	pub fn route(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
		Self(self.0.route(path, method_router))
	}

	pub fn build(self) -> Router<AppState> {
		self.0
	}
}

impl Default for PublicRouter {
	fn default() -> Self {
		Self::new()
	}
}
