//! Integration tests for polyglot-config crate.

use polyglot_common::test_utils::{config_fixtures, create_temp_dir, write_fixture};
use polyglot_config::{AppConfig, ConfigError, ConfigLoader, CurrencyDisplay};

#[test]
fn test_default_config_validation() {
    let config = AppConfig::default();
    assert!(config.validate_all().is_ok());
    assert_eq!(config.i18n.default_locale, "pt-BR");
    assert_eq!(config.server.message_key, "welcome");

    let mut broken = config;
    broken.server.bind_address.clear();
    assert!(broken.validate_all().is_err());
}

#[test]
fn test_minimal_yaml_fills_defaults() {
    let config = ConfigLoader::from_yaml_str(config_fixtures::minimal_config_yaml()).unwrap();
    assert_eq!(config.server.bind_address, "127.0.0.1:8080");
    assert_eq!(config.server.message_key, "welcome");
    assert!(config.i18n.locales_dir.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_yaml_file() {
    let dir = create_temp_dir();
    let path = write_fixture(&dir, "polyglot.yaml", config_fixtures::full_config_yaml());

    let config = ConfigLoader::load_config(&path).unwrap();
    let formatting = &config.i18n.formatting;

    assert_eq!(formatting.fallback.as_deref(), Some("welcome"));
    assert_eq!(formatting.base.currency_code(), Some("BRL"));
    assert_eq!(
        formatting.base.currency.as_ref().unwrap().display,
        Some(CurrencyDisplay::Symbol)
    );

    let en = formatting.layered("en-US", None);
    assert_eq!(en.number.unwrap().maximum_fraction_digits, Some(1));
    let pt = formatting.layered("pt-BR", None);
    assert_eq!(pt.number.unwrap().maximum_fraction_digits, Some(2));
    assert!(config.logging.json);
}

#[test]
fn test_toml_file() {
    let dir = create_temp_dir();
    let path = write_fixture(
        &dir,
        "polyglot.toml",
        r#"
[server]
bind_address = "0.0.0.0:4000"

[i18n]
default_locale = "en-US"

[i18n.formatting.percent]
maximumFractionDigits = 1
"#,
    );

    let config = ConfigLoader::load_config(&path).unwrap();
    assert_eq!(config.server.bind_address, "0.0.0.0:4000");
    assert_eq!(config.i18n.default_locale, "en-US");
    assert_eq!(
        config.i18n.formatting.base.percent.unwrap().maximum_fraction_digits,
        Some(1)
    );
}

#[test]
fn test_invalid_formatting_is_rejected() {
    let dir = create_temp_dir();
    let path = write_fixture(
        &dir,
        "polyglot.yaml",
        r#"
i18n:
  formatting:
    number:
      maximumFractionDigits: 99
"#,
    );

    let err = ConfigLoader::load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn test_missing_file() {
    let err = ConfigLoader::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}
