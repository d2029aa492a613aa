//! # Polyglot I18n
//!
//! Translation-resolution engine: per-locale translation maps resolved
//! lazily, locale-aware formatter bundles and a template parser for
//! `{{variable|formatter|formatter}}` placeholders.
//!
//! - The default locale is built eagerly when the engine is created
//! - Every other locale is loaded on first use and cached
//! - Text results are rendered through the active formatter bundle
//!
//! # Example
//!
//! ```rust
//! use polyglot_config::PolyglotOptions;
//! use polyglot_i18n::{params, Locale, Polyglot, TranslationMap, TranslationRegistry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TranslationRegistry::new(Locale::parse("pt-BR")?, |_| {
//!     TranslationMap::new().with_text("temperature", "Temperatura {{temp|celsius}}")
//! });
//! let engine = Polyglot::new(registry, PolyglotOptions::default());
//!
//! let label = engine.get("temperature", &params! { "temp" => 32 }, None)?;
//! assert_eq!(label.as_text(), Some("Temperatura 32 °C"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod engine;
pub mod error;
pub mod formatters;
pub mod intl;
pub mod locale;
pub mod parser;
pub mod registry;
pub mod resource;
pub mod store;
pub mod translation;
pub mod value;

pub use cache::{LanguageCache, LanguageEntry};
pub use engine::{Alias, EngineState, Polyglot};
pub use error::{I18nError, I18nResult};
pub use formatters::{Formatter, FormatterBundle};
pub use intl::{Collator, UnitFormatter};
pub use locale::Locale;
pub use parser::parse;
pub use registry::{
    DeferredLoader, LanguageLoader, LanguageSource, TranslationModule, TranslationRegistry,
};
pub use resource::{parse_fluent, parse_json, DirectoryLoader, FluentLoader, JsonLoader, ResourceKind};
pub use store::{LanguageStore, StoreSnapshot};
pub use translation::{Label, MapBuilder, Translation, TranslationFn, TranslationMap};
pub use value::{Params, Value};
