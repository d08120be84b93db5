// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bank server binary.

use bank_server::{create_app_state, create_router, SessionCleanupJob};
use bank_server_config::LogFormat;
use bank_server_db::SessionRepository;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod version;

/// Bank server - session-authenticated banking API.
#[derive(Parser, Debug)]
#[command(name = "bank-server", about = "Banking API server", version)]
struct Args {
	/// Path to a TOML config file (overrides /etc/bank/server.toml)
	#[arg(long, env = "BANK_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => bank_server_config::load_config_with_file(path)?,
		None => bank_server_config::load_config()?,
	};

	// RUST_LOG wins over the configured level
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
	let registry = tracing_subscriber::registry().with(filter);
	match config.logging.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		environment = %config.auth.environment,
		"starting bank-server"
	);

	let pool = bank_server_db::create_pool_with_max_connections(
		&config.database.url,
		config.database.max_connections,
	)
	.await?;
	bank_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool.clone(), &config);

	// Session cleanup
	let (shutdown_tx, _) = broadcast::channel(1);
	let cleanup = SessionCleanupJob::new(SessionRepository::new(pool.clone())).spawn(
		Duration::from_secs(config.auth.session_cleanup_interval_secs),
		shutdown_tx.subscribe(),
	);

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	let _ = shutdown_tx.send(());
	if let Err(e) = cleanup.await {
		tracing::warn!(error = %e, "session cleanup task did not exit cleanly");
	}
	pool.close().await;

	tracing::info!("Server shutdown complete");
	Ok(())
}
