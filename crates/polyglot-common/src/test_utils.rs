//! Test utilities and shared test helpers for the Polyglot workspace.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test; only the first
/// call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `name` inside `dir` and return the full path.
#[cfg(feature = "tempfile")]
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Configuration fixtures
pub mod config_fixtures {
    /// Minimal YAML application configuration
    pub fn minimal_config_yaml() -> &'static str {
        r#"
server:
  bind_address: "127.0.0.1:8080"
i18n:
  default_locale: "pt-BR"
"#
    }

    /// Full YAML application configuration
    pub fn full_config_yaml() -> &'static str {
        r#"
server:
  bind_address: "0.0.0.0:3000"
  message_key: "welcome"
i18n:
  default_locale: "pt-BR"
  locales_dir: "locales"
  formatting:
    fallback: "welcome"
    number:
      maximumFractionDigits: 2
    currency:
      code: "BRL"
      display: "symbol"
    languages:
      en-US:
        number:
          maximumFractionDigits: 1
logging:
  level: "debug"
  json: true
"#
    }
}
