// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	body::Body,
	http::{header::COOKIE, Method, Request, StatusCode},
	response::Response,
	Router,
};
use bank_server_auth::{generate_session_token, hash_token, Session};
use bank_server_db::{role_ids, status_ids, type_ids, NewAccount, NewUser, User};
use serde::Serialize;
use tempfile::TempDir;
use tower::ServiceExt;

use bank_server::{create_app_state, create_router, AppState, ServerConfig};

#[derive(Clone)]
pub struct TestUser {
	pub user: User,
	pub session_token: String,
}

impl TestUser {
	pub fn id(&self) -> i64 {
		self.user.id
	}

	pub fn cookie(&self) -> String {
		format!("bank_session={}", self.session_token)
	}
}

#[derive(Clone)]
pub struct Fixtures {
	pub admin: TestUser,
	pub employee: TestUser,
	/// Standard customer; sole owner of `alice_account`, joint owner of `joint_account`.
	pub alice: TestUser,
	/// Premium customer; sole owner of `bob_account`, joint owner of `joint_account`.
	pub bob: TestUser,
	pub alice_account: i64,
	pub bob_account: i64,
	pub joint_account: i64,
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
	_temp_dir: TempDir,
}

impl TestApp {
	pub async fn new() -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("test_authz.db");
		let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

		let pool = bank_server_db::create_pool(&db_url).await.unwrap();
		bank_server_db::run_migrations(&pool).await.unwrap();

		let config = ServerConfig::default();
		let state = create_app_state(pool, &config);
		let fixtures = create_fixtures(&state).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
			_temp_dir: temp_dir,
		}
	}

	/// Rebuild the router with a different session lifetime for new logins.
	pub fn with_session_ttl_hours(mut self, hours: i64) -> Self {
		self.state.auth_config = self.state.auth_config.clone().with_session_ttl_hours(hours);
		self.router = create_router(self.state.clone());
		self
	}

	/// Create a user with a live session.
	pub async fn create_user(&self, username: &str, role_id: i64) -> TestUser {
		create_test_user(&self.state, username, role_id).await
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::GET, path, user, Option::<()>::None)
			.await
	}

	pub async fn post(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::POST, path, user, Some(body)).await
	}

	pub async fn put(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::PUT, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::DELETE, path, user, Option::<()>::None)
			.await
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<T>,
	) -> Response<Body> {
		let cookie = user.map(TestUser::cookie);
		self
			.request_with_cookie(method, path, cookie.as_deref(), body)
			.await
	}

	/// Send a request with an arbitrary (possibly forged) Cookie header.
	pub async fn request_with_cookie<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		cookie: Option<&str>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(cookie) = cookie {
			builder = builder.header(COOKIE, cookie);
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();
		self.router.clone().oneshot(request).await.unwrap()
	}
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => {
				app.post(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, Some(body)) if *m == Method::PUT => {
				app.put(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, _) if *m == Method::DELETE => app.delete(&case.path, case.user.as_ref()).await,
			_ => app.get(&case.path, case.user.as_ref()).await,
		};

		if response.status() != case.expected_status {
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

async fn create_fixtures(state: &AppState) -> Fixtures {
	let admin = create_test_user(state, "admin", role_ids::ADMIN).await;
	let employee = create_test_user(state, "employee", role_ids::EMPLOYEE).await;
	let alice = create_test_user(state, "alice", role_ids::STANDARD).await;
	let bob = create_test_user(state, "bob", role_ids::PREMIUM).await;

	let alice_account = open_account(state, alice.id(), type_ids::CHECKING).await;
	let bob_account = open_account(state, bob.id(), type_ids::SAVINGS).await;
	let joint_account = open_account(state, alice.id(), type_ids::SAVINGS).await;
	state
		.ownership_repo
		.add_owner(bob.id(), joint_account)
		.await
		.unwrap();

	Fixtures {
		admin,
		employee,
		alice,
		bob,
		alice_account,
		bob_account,
		joint_account,
	}
}

async fn open_account(state: &AppState, owner_id: i64, type_id: i64) -> i64 {
	let account = NewAccount {
		balance: 100.0,
		status_id: status_ids::OPEN,
		type_id,
	};
	state
		.account_repo
		.create_account(&account, owner_id)
		.await
		.unwrap()
}

async fn create_test_user(state: &AppState, username: &str, role_id: i64) -> TestUser {
	let new_user = NewUser {
		username: username.to_string(),
		password: format!("{username}-password"),
		first_name: username.to_string(),
		last_name: "Test".to_string(),
		email: format!("{username}@bank.test"),
		role_id,
	};
	let id = state.user_repo.create_user(&new_user).await.unwrap();
	let user = state.user_repo.get_user_by_id(id).await.unwrap().unwrap();

	let session_token = generate_session_token();
	let session = Session::new(id, 12).unwrap();
	state
		.session_repo
		.create_session(&session, &hash_token(&session_token))
		.await
		.unwrap();

	TestUser {
		user,
		session_token,
	}
}
