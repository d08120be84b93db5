// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core identity types for the authorization guard.
//!
//! - **Role catalog**: the closed set of role names ([`RoleName`]) that
//!   allow-lists are written against
//! - **Principal**: the authenticated identity ([`Principal`]) resolved from a
//!   session for the duration of one request
//!
//! Role names compare by exact equality. There is no hierarchy: an `Admin` does
//! not satisfy an `Employee`-only allow-list unless the list names `Admin` too.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Role Catalog
// =============================================================================

/// A role name from the closed role catalog.
///
/// Parsing is case-sensitive. Any stored name outside the catalog parses to
/// [`RoleName::Unrecognized`], which never matches an allow-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
	/// Regular customer.
	Standard,
	/// Customer with premium account features.
	Premium,
	/// Bank staff; read access across all customers.
	Employee,
	/// Bank administrator; read and write access across all customers.
	Admin,
	/// A stored role name that is not part of the catalog.
	Unrecognized,
}

impl RoleName {
	/// Returns all roles in the catalog.
	pub fn all() -> &'static [RoleName] {
		&[
			RoleName::Standard,
			RoleName::Premium,
			RoleName::Employee,
			RoleName::Admin,
		]
	}

	/// Parse a stored role name. Never fails; unknown names map to `Unrecognized`.
	pub fn parse(name: &str) -> Self {
		match name {
			"Standard" => RoleName::Standard,
			"Premium" => RoleName::Premium,
			"Employee" => RoleName::Employee,
			"Admin" => RoleName::Admin,
			_ => RoleName::Unrecognized,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			RoleName::Standard => "Standard",
			RoleName::Premium => "Premium",
			RoleName::Employee => "Employee",
			RoleName::Admin => "Admin",
			RoleName::Unrecognized => "Unrecognized",
		}
	}

	/// Returns true if this role is part of the catalog.
	pub const fn is_recognized(&self) -> bool {
		!matches!(self, RoleName::Unrecognized)
	}
}

impl fmt::Display for RoleName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for RoleName {
	fn from(name: &str) -> Self {
		RoleName::parse(name)
	}
}

impl From<String> for RoleName {
	fn from(name: String) -> Self {
		RoleName::parse(&name)
	}
}

impl From<RoleName> for String {
	fn from(role: RoleName) -> Self {
		role.as_str().to_string()
	}
}

// =============================================================================
// Principal
// =============================================================================

/// The authenticated identity behind a request.
///
/// A principal is only ever produced by dereferencing a session handle through
/// a [`PrincipalSource`](crate::resolver::PrincipalSource). It lives for one
/// request and is passed explicitly into the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: i64,
	pub role: RoleName,
}

impl Principal {
	pub fn new(id: i64, role: RoleName) -> Self {
		Self { id, role }
	}
}

impl fmt::Display for Principal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.id, self.role)
	}
}
