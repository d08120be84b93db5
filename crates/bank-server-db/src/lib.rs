// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # bank-server-db
//!
//! Persistence layer for the bank server using SQLite via sqlx.
//!
//! ## Repository Pattern
//!
//! Each table group has two components:
//! - **`*Store` trait**: the interface (e.g., `UserStore`, `AccountStore`)
//! - **`*Repository` struct**: the implementation holding a `SqlitePool`
//!
//! Trait impls delegate to inherent methods, which carry the
//! `#[tracing::instrument]` spans.
//!
//! ## Error Handling
//!
//! | Variant | When |
//! |---------|------|
//! | `NotFound` | Update of a missing row; write referencing a missing row |
//! | `Conflict` | Unique constraint violation (username, email, owner link) |
//! | `Sqlx` | Anything else from the driver |
//! | `Internal` | Unparseable stored data |
//!
//! Lookups where absence is normal return `Result<Option<T>>`.
//!
//! ## Method Naming
//!
//! - `get_*_by_*` - single row, `Option<T>`
//! - `list_*` - multiple rows
//! - `create_*` - insert, returns the generated id where there is one
//! - `update_*` - full-row replacement
//! - `delete_*` - returns `true` if a row was removed
//!
//! ## Schema
//!
//! Migrations are embedded with `include_str!` and applied by
//! [`run_migrations`] on every startup. Reference data (roles, account
//! statuses, account types) is seeded with fixed ids.

pub mod account;
mod error;
pub mod lookup;
pub mod ownership;
pub mod pool;
pub mod session;
pub mod types;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use account::{AccountRepository, AccountStore};
pub use error::{DbError, Result};
pub use lookup::{LookupRepository, LookupStore};
pub use ownership::{OwnershipRepository, OwnershipStore};
pub use pool::{create_pool, create_pool_with_max_connections, run_migrations};
pub use session::{SessionRepository, SessionStore};
pub use types::{
	role_ids, status_ids, type_ids, Account, AccountStatus, AccountType, AccountUpdate, NewAccount,
	NewUser, Role, User, UserUpdate,
};
pub use user::{UserRepository, UserStore};
