//! HTTP API over the translation engine
//!
//! `GET /api?language=<tag>` renders the configured message key in the
//! requested language (the engine default when omitted). The shared engine's
//! active language is never switched by a request.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use polyglot_i18n::{Locale, Params, Polyglot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};

/// Shared state of the API handlers
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Translation engine
    pub engine: Arc<Polyglot>,
    /// Key rendered by `GET /api`
    pub message_key: Arc<str>,
}

impl ApiState {
    /// State serving `message_key` from `engine`
    pub fn new(engine: Arc<Polyglot>, message_key: impl Into<Arc<str>>) -> Self {
        Self {
            engine,
            message_key: message_key.into(),
        }
    }
}

/// Query parameters of `GET /api`
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    /// BCP-47 tag (`en-US`)
    pub language: Option<String>,
}

/// Body of `GET /api`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Rendered message
    pub message: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
    /// Engine default locale
    pub default_language: String,
    /// Locales resolved so far
    pub cached_languages: Vec<String>,
}

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api", get(get_message))
        .route("/health", get(get_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Render the message key in the requested language
async fn get_message(
    State(state): State<ApiState>,
    Query(query): Query<MessageQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let locale = match query.language.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => Locale::parse(tag)?,
        _ => state.engine.default_locale().clone(),
    };

    let label = state
        .engine
        .get_from_language_map(&locale, &state.message_key, &Params::new(), None)
        .await?;

    let message = label.as_text().ok_or_else(|| ApiError::NotText {
        key: state.message_key.to_string(),
    })?;

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

/// Engine status
async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        default_language: state.engine.default_locale().to_string(),
        cached_languages: state
            .engine
            .cached_languages()
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}
