// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for user routes.

use axum::http::{Method, StatusCode};
use bank_server_db::role_ids;
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

fn replacement_body(user_id: i64, username: &str, role_id: i64) -> serde_json::Value {
	json!({
		"user_id": user_id,
		"username": username,
		"password": "changed-password",
		"first_name": "Changed",
		"last_name": "Name",
		"email": format!("{username}@changed.test"),
		"role_id": role_id,
	})
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn list_users_is_staff_only() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "anonymous",
			method: Method::GET,
			path: "/users".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "standard",
			method: Method::GET,
			path: "/users".to_string(),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "premium",
			method: Method::GET,
			path: "/users".to_string(),
			user: Some(f.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee",
			method: Method::GET,
			path: "/users".to_string(),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin",
			method: Method::GET,
			path: "/users".to_string(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn unauthenticated_body_uses_fixed_message() {
	let app = TestApp::new().await;

	let response = app.get("/users", None).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	let body = body_json(response).await;
	assert_eq!(body["error"], "unauthorized");
	assert_eq!(body["message"], "The incoming token has expired");
}

#[tokio::test]
async fn forbidden_body_does_not_name_sufficient_roles() {
	let app = TestApp::new().await;

	let response = app.get("/users", Some(&app.fixtures.alice)).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let body = body_json(response).await;
	assert_eq!(body["error"], "forbidden");
	let message = body["message"].as_str().unwrap();
	assert!(!message.contains("Employee"));
	assert!(!message.contains("Admin"));
}

// ============================================================================
// Fetch by id (owner exception)
// ============================================================================

#[tokio::test]
async fn get_user_allows_staff_or_self() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let alice_path = format!("/users/{}", f.alice.id());

	let cases = vec![
		AuthzCase {
			name: "owner with insufficient role",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other customer",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(f.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin",
			method: Method::GET,
			path: alice_path.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "anonymous naming an existing owner id",
			method: Method::GET,
			path: alice_path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn get_missing_user_is_404_for_staff() {
	let app = TestApp::new().await;

	let response = app.get("/users/9999", Some(&app.fixtures.admin)).await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_response_never_contains_password() {
	let app = TestApp::new().await;
	let alice = &app.fixtures.alice;

	let response = app.get(&format!("/users/{}", alice.id()), Some(alice)).await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;
	assert_eq!(body["username"], "alice");
	assert_eq!(body["role"]["role"], "Standard");
	assert!(body.get("password").is_none());
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn create_user_is_admin_only() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let new_user = |username: &str| {
		json!({
			"username": username,
			"password": "pw",
			"first_name": "New",
			"last_name": "User",
			"email": format!("{username}@bank.test"),
			"role_id": role_ids::STANDARD,
		})
	};

	let cases = vec![
		AuthzCase {
			name: "anonymous",
			method: Method::POST,
			path: "/users".to_string(),
			user: None,
			body: Some(new_user("anon-made")),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "employee",
			method: Method::POST,
			path: "/users".to_string(),
			user: Some(f.employee.clone()),
			body: Some(new_user("employee-made")),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin",
			method: Method::POST,
			path: "/users".to_string(),
			user: Some(f.admin.clone()),
			body: Some(new_user("admin-made")),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "admin duplicate username",
			method: Method::POST,
			path: "/users".to_string(),
			user: Some(f.admin.clone()),
			body: Some(new_user("admin-made")),
			expected_status: StatusCode::CONFLICT,
		},
	];

	run_authz_cases(&app, &cases).await;

	let denied = app
		.state
		.user_repo
		.get_user_by_username("employee-made")
		.await
		.unwrap();
	assert!(denied.is_none(), "denied create must not write");
}

// ============================================================================
// Update (owner exception, no self role change)
// ============================================================================

#[tokio::test]
async fn owner_can_replace_own_record() {
	let app = TestApp::new().await;
	let alice = &app.fixtures.alice;

	let response = app
		.put(
			"/users",
			Some(alice),
			replacement_body(alice.id(), "alice2", role_ids::STANDARD),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;
	assert_eq!(body["username"], "alice2");
	assert_eq!(body["first_name"], "Changed");
}

#[tokio::test]
async fn owner_cannot_change_own_role() {
	let app = TestApp::new().await;
	let alice = &app.fixtures.alice;

	let response = app
		.put(
			"/users",
			Some(alice),
			replacement_body(alice.id(), "alice", role_ids::ADMIN),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let stored = app
		.state
		.user_repo
		.get_user_by_id(alice.id())
		.await
		.unwrap()
		.unwrap();
	assert_eq!(stored.role.role_id, role_ids::STANDARD);
}

#[tokio::test]
async fn update_user_denials() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "customer replacing someone else",
			method: Method::PUT,
			path: "/users".to_string(),
			user: Some(f.bob.clone()),
			body: Some(replacement_body(f.alice.id(), "alice", role_ids::STANDARD)),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee replacing a customer",
			method: Method::PUT,
			path: "/users".to_string(),
			user: Some(f.employee.clone()),
			body: Some(replacement_body(f.alice.id(), "alice", role_ids::STANDARD)),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous",
			method: Method::PUT,
			path: "/users".to_string(),
			user: None,
			body: Some(replacement_body(f.alice.id(), "alice", role_ids::STANDARD)),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "admin replacing a missing user",
			method: Method::PUT,
			path: "/users".to_string(),
			user: Some(f.admin.clone()),
			body: Some(replacement_body(9999, "ghost", role_ids::STANDARD)),
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn admin_can_change_roles() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.put(
			"/users",
			Some(&f.admin),
			replacement_body(f.bob.id(), "bob", role_ids::EMPLOYEE),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	// Bob's live session now carries the new role.
	let response = app.get("/users", Some(&f.bob)).await;
	assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_user_is_admin_only_and_denials_have_no_effect() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let victim = app.create_user("victim", role_ids::STANDARD).await;
	let path = format!("/users/{}", victim.id());

	let cases = vec![
		AuthzCase {
			name: "self delete",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(victim.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "user still exists after denials",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin deleting again",
			method: Method::DELETE,
			path,
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// Roles outside the catalog
// ============================================================================

#[tokio::test]
async fn unrecognized_role_only_gets_owner_access() {
	let app = TestApp::new().await;

	sqlx::query("INSERT INTO roles (id, role) VALUES (99, 'Auditor')")
		.execute(&app.state.pool)
		.await
		.unwrap();
	let auditor = app.create_user("auditor", 99).await;

	let response = app.get("/users", Some(&auditor)).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let response = app
		.get(&format!("/users/{}", auditor.id()), Some(&auditor))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}
