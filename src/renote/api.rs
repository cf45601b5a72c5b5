//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! renote operation, whatever the UI.
//!
//! The facade dispatches to `commands/*.rs` and returns structured
//! [`CmdResult`]s. It holds no business logic and never writes to a terminal.
//!
//! `RenoteApi<S: DocumentStore>` is generic over storage:
//! - Production: `RenoteApi<FileStore>`
//! - Testing: `RenoteApi<InMemoryStore>`

use crate::commands;
use crate::config::RenoteConfig;
use crate::error::Result;
use crate::store::DocumentStore;

pub struct RenoteApi<S: DocumentStore> {
    store: S,
    config: RenoteConfig,
}

impl<S: DocumentStore> RenoteApi<S> {
    pub fn new(store: S, config: RenoteConfig) -> Self {
        Self { store, config }
    }

    /// Build the API with whatever config the store holds (defaults if none).
    pub fn from_store(store: S) -> Result<Self> {
        let config = RenoteConfig::load(&store)?;
        Ok(Self::new(store, config))
    }

    /// Discover, apply and verify.
    pub fn renumber(&mut self) -> Result<commands::CmdResult> {
        commands::renumber::run(&mut self.store, &self.config)
    }

    pub fn discover(&mut self) -> Result<commands::CmdResult> {
        commands::discover::run(&mut self.store, &self.config)
    }

    pub fn apply(&mut self) -> Result<commands::CmdResult> {
        commands::apply::run(&mut self.store, &self.config)
    }

    pub fn verify(&mut self) -> Result<commands::CmdResult> {
        commands::verify::run(&mut self.store, &self.config)
    }

    /// Config changes are persisted and picked up by later calls.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&mut self.store, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn settings(&self) -> &RenoteConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, Mismatch, PatchedDocument};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_from_store_reads_config() {
        let store = StoreFixture::new()
            .with_document("renote.json", r#"{"definition": "notes.xml"}"#)
            .store;
        let api = RenoteApi::from_store(store).unwrap();
        assert_eq!(api.settings().definition, "notes.xml");
    }

    #[test]
    fn test_renumber_dispatch() {
        let store = StoreFixture::new().with_default_documents().store;
        let mut api = RenoteApi::from_store(store).unwrap();
        let result = api.renumber().unwrap();
        assert_eq!(result.patched.len(), 4);
        assert!(result.mismatches.is_empty());
        assert!(api.store().exists("data.json"));
    }

    #[test]
    fn test_passes_can_run_separately() {
        let store = StoreFixture::new().with_default_documents().store;
        let mut api = RenoteApi::from_store(store).unwrap();
        assert_eq!(api.discover().unwrap().mapping.unwrap().len(), 2);
        assert_eq!(api.apply().unwrap().patched.len(), 4);
        assert!(api.verify().unwrap().mismatches.is_empty());
    }

    #[test]
    fn test_config_set_updates_live_settings() {
        let mut api = RenoteApi::from_store(InMemoryStore::new()).unwrap();
        api.config(ConfigAction::Set("prefix".into(), "fn-".into()))
            .unwrap();
        assert_eq!(api.settings().prefix, "fn-");
    }

    #[test]
    fn test_init_dispatch() {
        let mut api = RenoteApi::from_store(InMemoryStore::new()).unwrap();
        api.init().unwrap();
        assert!(api.store().exists("renote.json"));
    }
}
