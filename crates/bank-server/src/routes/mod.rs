// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod accounts;
pub mod docs;
pub mod health;
pub mod sessions;
pub mod users;
