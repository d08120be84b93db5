// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for account routes.

use axum::http::{Method, StatusCode};
use bank_server_db::{status_ids, type_ids};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

// ============================================================================
// Staff-only listings
// ============================================================================

#[tokio::test]
async fn listings_are_staff_only() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let mut cases = Vec::new();
	for path in [
		"/accounts".to_string(),
		format!("/accounts/status/{}", status_ids::OPEN),
		format!("/accounts/type/{}", type_ids::SAVINGS),
	] {
		cases.push(AuthzCase {
			name: "anonymous",
			method: Method::GET,
			path: path.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		});
		cases.push(AuthzCase {
			name: "standard",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		});
		cases.push(AuthzCase {
			name: "premium",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		});
		cases.push(AuthzCase {
			name: "employee",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::OK,
		});
		cases.push(AuthzCase {
			name: "admin",
			method: Method::GET,
			path,
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		});
	}

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn status_and_type_filters_apply() {
	let app = TestApp::new().await;
	let employee = &app.fixtures.employee;

	let response = app
		.get(&format!("/accounts/type/{}", type_ids::SAVINGS), Some(employee))
		.await;
	let body = body_json(response).await;
	assert_eq!(body.as_array().unwrap().len(), 2);
	assert!(body
		.as_array()
		.unwrap()
		.iter()
		.all(|a| a["type"]["type"] == "Savings"));

	let response = app
		.get(
			&format!("/accounts/status/{}", status_ids::PENDING),
			Some(employee),
		)
		.await;
	assert!(body_json(response).await.as_array().unwrap().is_empty());
}

// ============================================================================
// Single account (multi-owner exception)
// ============================================================================

#[tokio::test]
async fn get_account_allows_staff_or_any_owner() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "sole owner",
			method: Method::GET,
			path: format!("/accounts/{}", f.alice_account),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "first joint owner",
			method: Method::GET,
			path: format!("/accounts/{}", f.joint_account),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "second joint owner",
			method: Method::GET,
			path: format!("/accounts/{}", f.joint_account),
			user: Some(f.bob.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "non-owner customer",
			method: Method::GET,
			path: format!("/accounts/{}", f.alice_account),
			user: Some(f.bob.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee",
			method: Method::GET,
			path: format!("/accounts/{}", f.bob_account),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "anonymous",
			method: Method::GET,
			path: format!("/accounts/{}", f.alice_account),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "customer probing a missing account",
			method: Method::GET,
			path: "/accounts/9999".to_string(),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "staff fetching a missing account",
			method: Method::GET,
			path: "/accounts/9999".to_string(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn ownership_is_read_only_after_a_role_denial() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/accounts/{}", f.joint_account);

	// Any ownership read now fails with a database error.
	sqlx::query("DROP TABLE users_accounts")
		.execute(&app.state.pool)
		.await
		.unwrap();

	let cases = vec![
		AuthzCase {
			name: "anonymous is rejected before any ownership read",
			method: Method::GET,
			path: path.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "employee passes on role alone",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin passes on role alone",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "customer needs the owner set",
			method: Method::GET,
			path,
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::INTERNAL_SERVER_ERROR,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn account_body_shape() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.get(&format!("/accounts/{}", f.alice_account), Some(&f.alice))
		.await;
	let body = body_json(response).await;

	assert_eq!(body["account_id"], f.alice_account);
	assert_eq!(body["balance"], 100.0);
	assert_eq!(body["status"]["status"], "Open");
	assert_eq!(body["type"]["type"], "Checking");
}

// ============================================================================
// Accounts by owner
// ============================================================================

#[tokio::test]
async fn owner_listing_allows_staff_or_self() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "self",
			method: Method::GET,
			path: format!("/accounts/owner/{}", f.alice.id()),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "someone else",
			method: Method::GET,
			path: format!("/accounts/owner/{}", f.bob.id()),
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee",
			method: Method::GET,
			path: format!("/accounts/owner/{}", f.bob.id()),
			user: Some(f.employee.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "anonymous",
			method: Method::GET,
			path: format!("/accounts/owner/{}", f.bob.id()),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app
		.get(&format!("/accounts/owner/{}", f.alice.id()), Some(&f.alice))
		.await;
	let ids: Vec<i64> = body_json(response)
		.await
		.as_array()
		.unwrap()
		.iter()
		.map(|a| a["account_id"].as_i64().unwrap())
		.collect();
	assert_eq!(ids, vec![f.alice_account, f.joint_account]);
}

// ============================================================================
// Opening accounts
// ============================================================================

#[tokio::test]
async fn customer_opened_account_is_forced_pending_and_empty() {
	let app = TestApp::new().await;
	let alice = &app.fixtures.alice;

	let response = app
		.post(
			"/accounts",
			Some(alice),
			json!({
				"user_id": alice.id(),
				"balance": 50.0,
				"status_id": status_ids::OPEN,
				"type_id": type_ids::SAVINGS,
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let body = body_json(response).await;
	assert_eq!(body["status"]["status_id"], status_ids::PENDING);
	assert_eq!(body["status"]["status"], "Pending");
	assert_eq!(body["balance"], 0.0);

	let owners = app
		.state
		.ownership_repo
		.list_owner_ids_for_account(body["account_id"].as_i64().unwrap())
		.await
		.unwrap();
	assert_eq!(owners, vec![alice.id()]);
}

#[tokio::test]
async fn staff_choose_initial_status() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			"/accounts",
			Some(&f.employee),
			json!({
				"user_id": f.bob.id(),
				"balance": 250.0,
				"status_id": status_ids::OPEN,
				"type_id": type_ids::CHECKING,
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let body = body_json(response).await;
	assert_eq!(body["status"]["status"], "Open");
	assert_eq!(body["balance"], 250.0);

	let response = app
		.post(
			"/accounts",
			Some(&f.admin),
			json!({ "user_id": f.bob.id(), "type_id": type_ids::CHECKING }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	assert_eq!(body_json(response).await["status"]["status"], "Pending");
}

#[tokio::test]
async fn unknown_status_or_type_is_404_and_writes_nothing() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let before = app.state.account_repo.list_accounts().await.unwrap().len();

	let response = app
		.post(
			"/accounts",
			Some(&f.admin),
			json!({ "user_id": f.bob.id(), "type_id": 77 }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		body_json(response).await["message"],
		"Account type 77 not found"
	);

	let response = app
		.post(
			"/accounts",
			Some(&f.employee),
			json!({ "user_id": f.bob.id(), "status_id": 42, "type_id": type_ids::CHECKING }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		body_json(response).await["message"],
		"Account status 42 not found"
	);

	let response = app
		.put(
			"/accounts",
			Some(&f.admin),
			json!({
				"account_id": f.alice_account,
				"balance": 1.0,
				"status_id": status_ids::OPEN,
				"type_id": 77,
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	assert_eq!(
		app.state.account_repo.list_accounts().await.unwrap().len(),
		before
	);
	let untouched = app
		.state
		.account_repo
		.get_account_by_id(f.alice_account)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(untouched.balance, 100.0);
}

#[tokio::test]
async fn open_account_denials() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "customer opening for someone else",
			method: Method::POST,
			path: "/accounts".to_string(),
			user: Some(f.alice.clone()),
			body: Some(json!({ "user_id": f.bob.id(), "type_id": type_ids::CHECKING })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous naming an owner",
			method: Method::POST,
			path: "/accounts".to_string(),
			user: None,
			body: Some(json!({ "user_id": f.alice.id(), "type_id": type_ids::CHECKING })),
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "staff opening for a missing user",
			method: Method::POST,
			path: "/accounts".to_string(),
			user: Some(f.admin.clone()),
			body: Some(json!({ "user_id": 9999, "type_id": type_ids::CHECKING })),
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;

	let response = app
		.get(&format!("/accounts/owner/{}", f.bob.id()), Some(&f.admin))
		.await;
	assert_eq!(
		body_json(response).await.as_array().unwrap().len(),
		2,
		"denied opens must not create accounts"
	);
}

// ============================================================================
// Admin-only writes
// ============================================================================

#[tokio::test]
async fn update_account_is_admin_only() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let update = |balance: f64| {
		json!({
			"account_id": f.alice_account,
			"balance": balance,
			"status_id": status_ids::CLOSED,
			"type_id": type_ids::CHECKING,
		})
	};

	let cases = vec![
		AuthzCase {
			name: "owner",
			method: Method::PUT,
			path: "/accounts".to_string(),
			user: Some(f.alice.clone()),
			body: Some(update(1_000_000.0)),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "employee",
			method: Method::PUT,
			path: "/accounts".to_string(),
			user: Some(f.employee.clone()),
			body: Some(update(1_000_000.0)),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin",
			method: Method::PUT,
			path: "/accounts".to_string(),
			user: Some(f.admin.clone()),
			body: Some(update(0.0)),
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;

	let account = app
		.state
		.account_repo
		.get_account_by_id(f.alice_account)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(account.balance, 0.0);
	assert_eq!(account.status.status, "Closed");
}

#[tokio::test]
async fn delete_account_is_admin_only() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/accounts/{}", f.joint_account);

	let cases = vec![
		AuthzCase {
			name: "joint owner",
			method: Method::DELETE,
			path: path.clone(),
			user: Some(f.bob.clone()),
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
			name: "still readable by owner after denials",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.alice.clone()),
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
			name: "former owner after delete",
			method: Method::GET,
			path,
			user: Some(f.alice.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}
