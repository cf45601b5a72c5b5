use super::{DocumentStore, WriteMode};
use crate::error::{RenoteError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    documents: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a document directly.
    pub fn insert(&mut self, name: &str, contents: &str) {
        self.documents.insert(name.to_string(), contents.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self, name: &str) -> Result<String> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| RenoteError::NotFound(name.to_string()))
    }

    fn write(&mut self, name: &str, contents: &str, mode: WriteMode) -> Result<()> {
        match mode {
            WriteMode::Overwrite => {
                self.documents.insert(name.to_string(), contents.to_string());
            }
            WriteMode::Append => {
                self.documents
                    .entry(name.to_string())
                    .or_default()
                    .push_str(contents);
            }
        }
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Definition document used across tests: two notes out of order,
    /// plus one image reference.
    pub const DEFINITION: &str = concat!(
        "<div>\n",
        "<p xml:id=\"note-27.3\">27.3 Text one</p>\n",
        "<p xml:id=\"note-9\">9 Text two <graphic url=\"assets/ab-12.png\"/></p>\n",
        "</div>\n",
    );

    pub const REFERENCES: &str = concat!(
        "<ref target=\"FN.html#note-27.3\"/>\n",
        "<ref target=\"FN.html#note-9\"/>\n",
    );

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_document(mut self, name: &str, contents: &str) -> Self {
            self.store.insert(name, contents);
            self
        }

        /// FN.xml plus the three dependent documents of the default config.
        pub fn with_default_documents(self) -> Self {
            self.with_document("FN.xml", DEFINITION)
                .with_document("NO.xml", REFERENCES)
                .with_document("SS.xml", REFERENCES)
                .with_document("PP.xml", "<p>no notes referenced here</p>\n")
        }
    }
}
