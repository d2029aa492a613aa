//! Integration tests for polyglot-server.
//!
//! These drive the router in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use polyglot_common::test_utils::{create_temp_dir, init_test_logging, write_fixture};
use polyglot_config::AppConfig;
use polyglot_server::{build_engine, create_router, ApiState, ErrorResponse, HealthResponse, MessageResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

fn router_with(config: &AppConfig) -> Router {
    let engine = Arc::new(build_engine(config).unwrap());
    create_router(ApiState::new(engine, config.server.message_key.as_str()))
}

fn router() -> Router {
    router_with(&AppConfig::default())
}

async fn get<T: DeserializeOwned>(router: Router, uri: &str) -> (StatusCode, T) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_default_language_message() {
    init_test_logging();
    let (status, body): (_, MessageResponse) = get(router(), "/api").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.message, "Olá mundo");
}

#[tokio::test]
async fn test_requested_language_message() {
    let (status, body): (_, MessageResponse) = get(router(), "/api?language=en-US").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.message, "Hello world");

    let (_, body): (_, MessageResponse) = get(router(), "/api?language=").await;
    assert_eq!(body.message, "Olá mundo");
}

#[tokio::test]
async fn test_request_does_not_switch_engine_language() {
    let config = AppConfig::default();
    let engine = Arc::new(build_engine(&config).unwrap());
    let router = create_router(ApiState::new(Arc::clone(&engine), "welcome"));

    let (status, _): (_, MessageResponse) = get(router, "/api?language=en-US").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(engine.language().to_string(), "pt-BR");
    assert_eq!(engine.cached_languages().len(), 2);
}

#[tokio::test]
async fn test_unknown_language() {
    let (status, body): (_, ErrorResponse) = get(router(), "/api?language=xx-XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.error, "Language not found: xx-XX");
}

#[tokio::test]
async fn test_invalid_language_tag() {
    let (status, body): (_, ErrorResponse) = get(router(), "/api?language=not%20a%20tag").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.error.starts_with("Invalid language identifier"));
}

#[tokio::test]
async fn test_missing_message_key() {
    let mut config = AppConfig::default();
    config.server.message_key = "does-not-exist".to_string();
    let (status, body): (_, ErrorResponse) = get(router_with(&config), "/api").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body.error,
        "Missing translation key 'does-not-exist' for locale pt-BR"
    );
}

#[tokio::test]
async fn test_health() {
    let (status, body): (_, HealthResponse) = get(router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    assert_eq!(body.default_language, "pt-BR");
    assert_eq!(body.cached_languages, vec!["pt-BR".to_string()]);
}

#[tokio::test]
async fn test_locales_directory_adds_languages() {
    let dir = create_temp_dir();
    write_fixture(&dir, "es.json", r#"{"welcome": "Hola mundo"}"#);
    write_fixture(&dir, "en-US.ftl", "welcome = Howdy world\n");

    let mut config = AppConfig::default();
    config.i18n.locales_dir = Some(dir.path().to_path_buf());
    let router = router_with(&config);

    let (_, body): (_, MessageResponse) = get(router.clone(), "/api?language=es").await;
    assert_eq!(body.message, "Hola mundo");
    let (_, body): (_, MessageResponse) = get(router, "/api?language=en-US").await;
    assert_eq!(body.message, "Howdy world");
}

#[test]
fn test_unsupported_default_locale() {
    let mut config = AppConfig::default();
    config.i18n.default_locale = "fr".to_string();
    let err = build_engine(&config).unwrap_err();
    assert!(err.to_string().contains("no built-in translations"));
}

#[tokio::test]
async fn test_builtin_translations_render() {
    use polyglot_i18n::{params, Locale};

    let engine = build_engine(&AppConfig::default()).unwrap();
    let en = Locale::parse("en-US").unwrap();

    let pt = engine
        .get("temperature", &params! { "temp" => 32, "teste" => "teste" }, None)
        .unwrap();
    assert_eq!(pt.as_text(), Some("Temperatura 32 °C. Apenas um teste"));

    let english = engine
        .get_from_language_map(&en, "temperature", &params! { "temp" => 32, "teste" => "test" }, None)
        .await
        .unwrap();
    assert_eq!(english.as_text(), Some("Temperature 89.6°F. Just a test"));

    let visitors = engine.get("visitors", &params! {}, None).unwrap();
    assert_eq!(visitors.as_text(), Some("100.000 visitantes por dia"));
}
