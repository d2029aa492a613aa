//! # Polyglot Config
//!
//! Type-safe configuration for Polyglot: the locale-formatting knobs consumed
//! by formatter bundles (layered global, per-locale and per-call) and the
//! application settings used by the HTTP server.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod format;
pub mod loader;
pub mod settings;

pub use format::*;
pub use loader::{ConfigError, ConfigLoader};
pub use settings::*;
