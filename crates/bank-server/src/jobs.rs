// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background session cleanup.

use bank_server_db::{DbError, SessionRepository};
use std::time::Duration;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::instrument;

/// Deletes expired sessions on a fixed interval.
#[derive(Clone)]
pub struct SessionCleanupJob {
	session_repo: SessionRepository,
}

impl SessionCleanupJob {
	pub fn new(session_repo: SessionRepository) -> Self {
		Self { session_repo }
	}

	/// Run one cleanup pass. Returns the number of sessions deleted.
	#[instrument(skip(self), fields(job_id = "session-cleanup"))]
	pub async fn run(&self) -> Result<u64, DbError> {
		let sessions_deleted = self.session_repo.delete_expired_sessions().await?;
		tracing::info!(sessions_deleted, "session cleanup completed");
		Ok(sessions_deleted)
	}

	/// Spawn the periodic loop. It exits when `shutdown` fires.
	pub fn spawn(self, interval: Duration, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
		tokio::spawn(async move {
			loop {
				tokio::select! {
					_ = tokio::time::sleep(interval) => {
						if let Err(e) = self.run().await {
							tracing::warn!(error = %e, "session cleanup failed");
						}
					}
					_ = shutdown.recv() => {
						tracing::info!(job_id = "session-cleanup", "shutting down periodic job");
						break;
					}
				}
			}
		})
	}
}
