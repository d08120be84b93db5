// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The access guard: the single authorization decision point.
//!
//! Every protected operation calls one of the `check_*` functions with the
//! request's resolved principal before touching the data layer. The functions
//! are pure: same inputs, same [`AccessDecision`], no shared state.
//!
//! # Evaluation order
//!
//! ```text
//! principal? ──no──▶ DenyNotAuthenticated
//!     │yes
//! role ∈ allow-list? ──yes──▶ Allow
//!     │no
//! owner exception? ──id matches──▶ Allow
//!     │otherwise
//! DenyRoleNotAllowed
//! ```
//!
//! The owner exception is only consulted after a role denial. An anonymous
//! caller is rejected before any identity comparison, whatever owner id the
//! caller supplies.

use std::borrow::Cow;
use std::fmt;

use crate::error::AuthError;
use crate::types::{Principal, RoleName};

/// Outcome of a guard check.
#[must_use = "an access decision must be acted on"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessDecision {
	Allow,
	DenyNotAuthenticated,
	DenyRoleNotAllowed,
}

impl AccessDecision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, AccessDecision::Allow)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			AccessDecision::Allow => "allow",
			AccessDecision::DenyNotAuthenticated => "deny_not_authenticated",
			AccessDecision::DenyRoleNotAllowed => "deny_role_not_allowed",
		}
	}

	/// Convert a denial into the matching [`AuthError`].
	pub fn into_result(self) -> Result<(), AuthError> {
		match self {
			AccessDecision::Allow => Ok(()),
			AccessDecision::DenyNotAuthenticated => Err(AuthError::AuthenticationRequired),
			AccessDecision::DenyRoleNotAllowed => Err(AuthError::Forbidden),
		}
	}
}

impl fmt::Display for AccessDecision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A non-empty set of catalog roles permitted to perform an operation.
///
/// Allow-lists are declared per endpoint, usually as constants:
///
/// ```
/// use bank_server_auth::{AllowList, RoleName};
///
/// const STAFF: AllowList = AllowList::from_static(&[RoleName::Employee, RoleName::Admin]);
/// assert!(STAFF.permits(RoleName::Admin));
/// ```
///
/// An empty list is a setup defect. [`AllowList::from_static`] rejects it
/// while the constant is evaluated; [`AllowList::new`] returns
/// [`AuthError::EmptyAllowList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
	roles: Cow<'static, [RoleName]>,
}

impl AllowList {
	/// Build an allow-list from a static slice.
	///
	/// # Panics
	///
	/// Panics if `roles` is empty or names [`RoleName::Unrecognized`]. In a
	/// `const` item this fails the build.
	pub const fn from_static(roles: &'static [RoleName]) -> Self {
		assert!(!roles.is_empty(), "allow-list must name at least one role");
		let mut i = 0;
		while i < roles.len() {
			assert!(
				roles[i].is_recognized(),
				"allow-list entries must come from the role catalog"
			);
			i += 1;
		}
		Self {
			roles: Cow::Borrowed(roles),
		}
	}

	/// Build an allow-list at runtime.
	pub fn new(roles: impl IntoIterator<Item = RoleName>) -> Result<Self, AuthError> {
		let mut collected: Vec<RoleName> = Vec::new();
		for role in roles {
			if !role.is_recognized() {
				return Err(AuthError::UnrecognizedRoleInAllowList);
			}
			if !collected.contains(&role) {
				collected.push(role);
			}
		}

		if collected.is_empty() {
			return Err(AuthError::EmptyAllowList);
		}

		Ok(Self {
			roles: Cow::Owned(collected),
		})
	}

	/// Returns true if `role` is named on this list.
	///
	/// `RoleName::Unrecognized` is never permitted.
	pub fn permits(&self, role: RoleName) -> bool {
		role.is_recognized() && self.roles.contains(&role)
	}

	pub fn roles(&self) -> &[RoleName] {
		&self.roles
	}
}

/// Plain role gating.
///
/// - no principal → [`AccessDecision::DenyNotAuthenticated`]
/// - principal's role on the list → [`AccessDecision::Allow`]
/// - otherwise → [`AccessDecision::DenyRoleNotAllowed`]
pub fn check_role(principal: Option<&Principal>, allowed: &AllowList) -> AccessDecision {
	match principal {
		None => AccessDecision::DenyNotAuthenticated,
		Some(p) if allowed.permits(p.role) => AccessDecision::Allow,
		Some(_) => AccessDecision::DenyRoleNotAllowed,
	}
}

/// Role gating with a single-owner exception.
///
/// A role denial is turned into `Allow` when the principal's id equals
/// `owner_id`. `DenyNotAuthenticated` is returned unchanged.
pub fn check_role_or_owner(
	principal: Option<&Principal>,
	allowed: &AllowList,
	owner_id: i64,
) -> AccessDecision {
	match check_role(principal, allowed) {
		AccessDecision::DenyRoleNotAllowed => match principal {
			Some(p) if p.id == owner_id => AccessDecision::Allow,
			_ => AccessDecision::DenyRoleNotAllowed,
		},
		decision => decision,
	}
}

/// Role gating with a multi-owner exception, for resources owned through a
/// join table.
///
/// Same evaluation as [`check_role_or_owner`]; the ownership test is
/// membership in `owner_ids`. An empty owner set grants nothing.
pub fn check_role_or_any_owner(
	principal: Option<&Principal>,
	allowed: &AllowList,
	owner_ids: &[i64],
) -> AccessDecision {
	match check_role(principal, allowed) {
		AccessDecision::DenyRoleNotAllowed => match principal {
			Some(p) if owner_ids.contains(&p.id) => AccessDecision::Allow,
			_ => AccessDecision::DenyRoleNotAllowed,
		},
		decision => decision,
	}
}
