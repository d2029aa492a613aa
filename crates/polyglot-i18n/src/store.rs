//! Observer-facing language state.

use crate::engine::{EngineState, Polyglot};
use crate::error::I18nResult;
use crate::formatters::FormatterBundle;
use crate::locale::Locale;
use crate::translation::TranslationMap;
use polyglot_config::PolyglotOptions;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::debug;

/// What observers see: the active map, locale and formatters.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Active locale
    pub language: Locale,
    /// Active translation map
    pub map: Arc<TranslationMap>,
    /// Active formatter bundle
    pub format: FormatterBundle,
}

impl From<&EngineState> for StoreSnapshot {
    fn from(state: &EngineState) -> Self {
        Self {
            language: state.language().clone(),
            map: Arc::clone(state.map()),
            format: state.formatters().clone(),
        }
    }
}

/// Republishes the engine's active state to subscribers.
#[derive(Debug)]
pub struct LanguageStore {
    engine: Arc<Polyglot>,
    sender: watch::Sender<StoreSnapshot>,
    switching: Mutex<()>,
}

impl LanguageStore {
    /// Start from the engine's current state
    pub fn new(engine: Arc<Polyglot>) -> Self {
        let (sender, _) = watch::channel(StoreSnapshot::from(engine.state().as_ref()));
        Self {
            engine,
            sender,
            switching: Mutex::new(()),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> StoreSnapshot {
        self.sender.borrow().clone()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.sender.subscribe()
    }

    /// Switch the engine's language and publish the new state. Nothing is
    /// published when the switch fails.
    ///
    /// Switches through one store are serialized, and what gets published is
    /// the engine's state after the swap, so the last snapshot always matches
    /// the engine.
    pub async fn set(
        &self,
        locale: &Locale,
        options: Option<&PolyglotOptions>,
    ) -> I18nResult<StoreSnapshot> {
        let _guard = self.switching.lock().await;
        self.engine.set_language(locale, options).await?;
        let snapshot = StoreSnapshot::from(self.engine.state().as_ref());
        self.sender.send_replace(snapshot.clone());
        debug!(
            language = %locale,
            subscribers = self.sender.receiver_count(),
            "Published language change"
        );
        Ok(snapshot)
    }

    /// The engine behind the store
    pub fn engine(&self) -> &Arc<Polyglot> {
        &self.engine
    }
}
