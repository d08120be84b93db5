// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the bank server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`BANK_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use bank_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info, warn};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub auth: AuthConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`BANK_SERVER_*`)
/// 2. Config file (`/etc/bank/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	database.validate()?;
	validate_config(&auth)?;
	if database.is_in_memory() {
		warn!("in-memory database: all data is lost on shutdown");
	}

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		max_connections = database.max_connections,
		environment = %auth.environment,
		session_ttl_hours = auth.session_ttl_hours,
		secure_cookies = auth.secure_cookies,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		auth,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig) -> Result<(), ConfigError> {
	if auth.is_production() && !auth.secure_cookies {
		return Err(ConfigError::Validation(
			"BANK_SERVER_SECURE_COOKIES must be enabled when BANK_SERVER_ENV=production"
				.to_string(),
		));
	}

	if auth.session_ttl_hours == 0 || auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
		return Err(ConfigError::InvalidValue {
			key: "auth.session_ttl_hours".to_string(),
			message: format!("must be between 1 and {MAX_SESSION_TTL_HOURS}"),
		});
	}

	if auth.session_cleanup_interval_secs == 0 {
		return Err(ConfigError::InvalidValue {
			key: "auth.session_cleanup_interval_secs".to_string(),
			message: "must be at least 1".to_string(),
		});
	}

	if auth.session_cookie_name.is_empty()
		|| auth
			.session_cookie_name
			.contains(|c: char| c == '=' || c == ';' || c.is_whitespace())
	{
		return Err(ConfigError::InvalidValue {
			key: "auth.session_cookie_name".to_string(),
			message: format!("'{}' is not a valid cookie name", auth.session_cookie_name),
		});
	}

	Ok(())
}
