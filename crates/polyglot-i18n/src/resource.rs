//! File-backed translation sources.
//!
//! JSON resources are flat `key → string` objects. Fluent resources are
//! converted message by message into templates: `{ $x }` becomes `{{x}}` and
//! `{ NUMBER($x) }` becomes `{{x|number}}`.

use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;
use crate::registry::{LanguageLoader, TranslationModule, TranslationRegistry};
use crate::translation::TranslationMap;
use async_trait::async_trait;
use fluent_syntax::ast::{Entry, Expression, InlineExpression, Pattern, PatternElement};
use fluent_syntax::parser::parse;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

async fn read_resource(path: &Path) -> I18nResult<String> {
    debug!("Loading resource file: {:?}", path);
    tokio::fs::read_to_string(path).await.map_err(|err| {
        warn!("Failed to read resource file {:?}: {}", path, err);
        I18nError::ResourceLoadError {
            path: display_path(path),
        }
    })
}

/// Parse a flat JSON object into a translation map.
pub fn parse_json(path: &str, content: &str) -> I18nResult<TranslationMap> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)
        .map_err(|err| I18nError::ResourceParseError {
            path: path.to_string(),
            errors: vec![err.to_string()],
        })?;

    let mut map = TranslationMap::new();
    let mut errors = Vec::new();
    for (key, value) in object {
        match value {
            serde_json::Value::String(text) => map = map.with_text(key, text),
            other => errors.push(format!("value of '{key}' is not a string: {other}")),
        }
    }

    if errors.is_empty() {
        Ok(map)
    } else {
        Err(I18nError::ResourceParseError {
            path: path.to_string(),
            errors,
        })
    }
}

/// Convert a Fluent resource into a translation map.
pub fn parse_fluent(path: &str, content: &str) -> I18nResult<TranslationMap> {
    let resource = parse(content).map_err(|(_, errors)| I18nError::ResourceParseError {
        path: path.to_string(),
        errors: errors.iter().map(|e| format!("{e:?}")).collect(),
    })?;

    let terms: HashMap<&str, String> = resource
        .body
        .iter()
        .filter_map(|entry| match entry {
            Entry::Term(term) => literal_text(&term.value).map(|text| (term.id.name, text)),
            _ => None,
        })
        .collect();

    let mut map = TranslationMap::new();
    for entry in &resource.body {
        let Entry::Message(message) = entry else {
            continue;
        };
        let Some(pattern) = &message.value else {
            debug!(key = message.id.name, "Skipping message without a value");
            continue;
        };
        let template = pattern_template(message.id.name, pattern, &terms)?;
        map = map.with_text(message.id.name, template);
    }
    Ok(map)
}

/// Text of a pattern made only of text and literals
fn literal_text(pattern: &Pattern<&str>) -> Option<String> {
    let mut text = String::new();
    for element in &pattern.elements {
        match element {
            PatternElement::TextElement { value } => text.push_str(value),
            PatternElement::Placeable {
                expression:
                    Expression::Inline(
                        InlineExpression::StringLiteral { value }
                        | InlineExpression::NumberLiteral { value },
                    ),
            } => text.push_str(value),
            PatternElement::Placeable { .. } => return None,
        }
    }
    Some(text)
}

fn unsupported(key: &str, expression: impl Into<String>) -> I18nError {
    I18nError::UnsupportedExpression {
        key: key.to_string(),
        expression: expression.into(),
    }
}

fn pattern_template(
    key: &str,
    pattern: &Pattern<&str>,
    terms: &HashMap<&str, String>,
) -> I18nResult<String> {
    let mut template = String::new();
    for element in &pattern.elements {
        match element {
            PatternElement::TextElement { value } => template.push_str(value),
            PatternElement::Placeable { expression } => {
                template.push_str(&expression_template(key, expression, terms)?);
            }
        }
    }
    Ok(template)
}

fn expression_template(
    key: &str,
    expression: &Expression<&str>,
    terms: &HashMap<&str, String>,
) -> I18nResult<String> {
    let inline = match expression {
        Expression::Inline(inline) => inline,
        Expression::Select { .. } => return Err(unsupported(key, "select expression")),
    };

    match inline {
        InlineExpression::StringLiteral { value } | InlineExpression::NumberLiteral { value } => {
            Ok((*value).to_string())
        }
        InlineExpression::VariableReference { id } => Ok(format!("{{{{{}}}}}", id.name)),
        InlineExpression::FunctionReference { id, arguments } => {
            match arguments.positional.as_slice() {
                [InlineExpression::VariableReference { id: variable }] => Ok(format!(
                    "{{{{{}|{}}}}}",
                    variable.name,
                    id.name.to_lowercase()
                )),
                _ => Err(unsupported(key, format!("{}(..)", id.name))),
            }
        }
        InlineExpression::TermReference {
            id,
            attribute: None,
            ..
        } => terms
            .get(id.name)
            .cloned()
            .ok_or_else(|| unsupported(key, format!("-{}", id.name))),
        InlineExpression::TermReference { id, .. } => {
            Err(unsupported(key, format!("-{} attribute", id.name)))
        }
        InlineExpression::MessageReference { id, .. } => {
            Err(unsupported(key, format!("message reference {}", id.name)))
        }
        InlineExpression::Placeable { expression } => expression_template(key, expression, terms),
    }
}

/// Loads a flat JSON translation file.
#[derive(Debug, Clone)]
pub struct JsonLoader {
    path: PathBuf,
}

impl JsonLoader {
    /// Loader for the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the resource
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LanguageLoader for JsonLoader {
    async fn load(&self, locale: &Locale) -> I18nResult<TranslationModule> {
        let content = read_resource(&self.path).await?;
        let map = parse_json(&display_path(&self.path), &content)?;
        info!(locale = %locale, entries = map.len(), "Loaded JSON translations");
        Ok(TranslationModule::from_map(map))
    }
}

/// Loads a Fluent `.ftl` translation file.
#[derive(Debug, Clone)]
pub struct FluentLoader {
    path: PathBuf,
}

impl FluentLoader {
    /// Loader for the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the resource
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LanguageLoader for FluentLoader {
    async fn load(&self, locale: &Locale) -> I18nResult<TranslationModule> {
        let content = read_resource(&self.path).await?;
        let map = parse_fluent(&display_path(&self.path), &content)?;
        info!(locale = %locale, entries = map.len(), "Loaded Fluent translations");
        Ok(TranslationModule::from_map(map))
    }
}

/// Kind of translation file found by [`DirectoryLoader::scan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// `<locale>.json`
    Json,
    /// `<locale>.ftl`
    Fluent,
}

/// Registers one loader per `<locale>.json` / `<locale>.ftl` file in a
/// directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    base_dir: PathBuf,
}

impl DirectoryLoader {
    /// Scan `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory being scanned
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Translation files in the directory, sorted by path. When a locale has
    /// both a JSON and a Fluent file the JSON file wins.
    pub fn scan(&self) -> I18nResult<Vec<(Locale, ResourceKind, PathBuf)>> {
        if !self.base_dir.is_dir() {
            warn!("Locale directory does not exist: {:?}", self.base_dir);
            return Err(I18nError::ResourceLoadError {
                path: display_path(&self.base_dir),
            });
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            paths.push(entry?.path());
        }
        paths.sort();

        let mut found: Vec<(Locale, ResourceKind, PathBuf)> = Vec::new();
        for path in paths {
            let kind = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => ResourceKind::Json,
                Some("ftl") => ResourceKind::Fluent,
                _ => continue,
            };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(locale) = Locale::parse(stem) else {
                warn!("Ignoring translation file with an invalid locale name: {:?}", path);
                continue;
            };

            match found.iter().position(|(existing, ..)| *existing == locale) {
                Some(index) if kind == ResourceKind::Json => found[index] = (locale, kind, path),
                Some(_) => debug!("Ignoring {:?}, locale already provided", path),
                None => found.push((locale, kind, path)),
            }
        }
        Ok(found)
    }

    /// Register every scanned file on `registry`. Files for the registry's
    /// default locale are skipped.
    pub fn register(&self, mut registry: TranslationRegistry) -> I18nResult<TranslationRegistry> {
        let found = self.scan()?;
        let mut registered = 0_usize;
        for (locale, kind, path) in found {
            if locale == *registry.default_locale() {
                debug!("Skipping {:?}, it provides the default locale", path);
                continue;
            }
            registry = match kind {
                ResourceKind::Json => registry.with_loader(locale, JsonLoader::new(path)),
                ResourceKind::Fluent => registry.with_loader(locale, FluentLoader::new(path)),
            };
            registered += 1;
        }
        info!(
            "Registered {} translation files from {:?}",
            registered, self.base_dir
        );
        Ok(registry)
    }
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new("locales")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::{Label, Translation};
    use std::fs;
    use tempfile::TempDir;

    fn text<'a>(map: &'a TranslationMap, key: &str) -> &'a str {
        match map.get(key) {
            Some(Translation::Label(Label::Text(text))) => text,
            other => panic!("expected text for {key}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_json() {
        let map = parse_json("en.json", r#"{"welcome": "Hello", "temp": "It is {{t|celsius}}"}"#).unwrap();
        assert_eq!(text(&map, "welcome"), "Hello");
        assert_eq!(text(&map, "temp"), "It is {{t|celsius}}");
    }

    #[test]
    fn test_parse_json_rejects_non_strings() {
        let err = parse_json("en.json", r#"{"count": 3}"#).unwrap_err();
        assert!(matches!(err, I18nError::ResourceParseError { ref errors, .. } if errors.len() == 1));
        assert!(parse_json("en.json", "[1, 2]").is_err());
        assert!(parse_json("en.json", "{").is_err());
    }

    #[test]
    fn test_parse_fluent() {
        let source = "\
-brand = Polyglot
welcome = Welcome to { -brand }
hello = Hello { $name }
today = Today is { DATETIME($day) }
count = { NUMBER($n) } items { \"!\" }
";
        let map = parse_fluent("en.ftl", source).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(text(&map, "welcome"), "Welcome to Polyglot");
        assert_eq!(text(&map, "hello"), "Hello {{name}}");
        assert_eq!(text(&map, "today"), "Today is {{day|datetime}}");
        assert_eq!(text(&map, "count"), "{{n|number}} items !");
    }

    #[test]
    fn test_parse_fluent_rejects_selects() {
        let source = "\
emails = { $n ->
    [one] one email
   *[other] { $n } emails
}
";
        let err = parse_fluent("en.ftl", source).unwrap_err();
        assert!(matches!(err, I18nError::UnsupportedExpression { ref key, .. } if key == "emails"));

        let err = parse_fluent("en.ftl", "a = A\nb = { a }\n").unwrap_err();
        assert!(matches!(err, I18nError::UnsupportedExpression { ref key, .. } if key == "b"));
    }

    #[test]
    fn test_parse_fluent_syntax_errors() {
        let err = parse_fluent("bad.ftl", "= nothing\n").unwrap_err();
        assert!(matches!(err, I18nError::ResourceParseError { ref path, .. } if path == "bad.ftl"));
    }

    #[test]
    fn test_scan_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en-US.json"), r#"{"welcome": "Hello"}"#).unwrap();
        fs::write(dir.path().join("en-US.ftl"), "welcome = Hi\n").unwrap();
        fs::write(dir.path().join("es.ftl"), "welcome = Hola\n").unwrap();
        fs::write(dir.path().join("not a locale!.json"), "{}").unwrap();
        fs::write(dir.path().join("README.md"), "docs").unwrap();

        let found = DirectoryLoader::new(dir.path()).scan().unwrap();
        let summary: Vec<_> = found
            .iter()
            .map(|(locale, kind, _)| (locale.to_string(), *kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("en-US".to_string(), ResourceKind::Json),
                ("es".to_string(), ResourceKind::Fluent),
            ]
        );
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = DirectoryLoader::new(dir.path().join("missing")).scan().unwrap_err();
        assert!(matches!(err, I18nError::ResourceLoadError { .. }));
    }

    #[tokio::test]
    async fn test_json_loader_missing_file() {
        let loader = JsonLoader::new("/definitely/not/here.json");
        let err = loader.load(&Locale::parse("en").unwrap()).await.unwrap_err();
        assert!(matches!(err, I18nError::ResourceLoadError { .. }));
    }
}
