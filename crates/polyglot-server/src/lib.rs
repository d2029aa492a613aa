//! # Polyglot Server
//!
//! HTTP front end for the Polyglot translation engine. Builds the engine from
//! the application configuration (built-in maps plus an optional directory of
//! translation files) and serves it with axum.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod error;
pub mod translations;

pub use api::{create_router, ApiState, HealthResponse, MessageResponse};
pub use error::{ApiError, ApiResult, ErrorResponse};

use anyhow::{Context, Result};
use polyglot_config::AppConfig;
use polyglot_i18n::{DirectoryLoader, Locale, Polyglot};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the engine described by `config`.
///
/// Translation files found in `i18n.locales_dir` are registered after the
/// built-in maps and replace them for the same locale.
pub fn build_engine(config: &AppConfig) -> Result<Polyglot> {
    let default_locale = Locale::parse(&config.i18n.default_locale)
        .context("Invalid default locale in configuration")?;

    let mut registry = translations::registry(&default_locale)
        .context("Default locale has no built-in translations")?;

    if let Some(dir) = &config.i18n.locales_dir {
        registry = DirectoryLoader::new(dir)
            .register(registry)
            .with_context(|| format!("Failed to register translations from {}", dir.display()))?;
    }

    Ok(Polyglot::new(registry, config.i18n.formatting.clone()))
}

/// Build the engine and serve the API until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let engine = Arc::new(build_engine(&config)?);
    let state = ApiState::new(Arc::clone(&engine), config.server.message_key.as_str());
    let router = create_router(state);

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;

    info!(
        address = %config.server.bind_address,
        default_language = %engine.default_locale(),
        "Polyglot server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Polyglot server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
