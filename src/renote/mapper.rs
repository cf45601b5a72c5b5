//! # Note Mapper
//!
//! Derives the sequential renumbering table from a definition document. The
//! mapper wraps a [`TextEditor`] rather than being one: it loads through the
//! editor, scans the text, then swaps the text for the derived mapping so the
//! same editor can persist it.

use crate::editor::{Content, Editing, MatchMode, TextEditor};
use crate::error::{RenoteError, Result};
use crate::mapping::NoteMapping;
use crate::store::{DocumentStore, WriteMode};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX: &str = "note-";

/// What to do when the same identifier is defined more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Abort before anything is rewritten.
    #[default]
    Reject,
    /// Keep the first occurrence; repeats do not consume a number.
    FirstWins,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::FirstWins => "first-wins",
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = RenoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(DuplicatePolicy::Reject),
            "first-wins" => Ok(DuplicatePolicy::FirstWins),
            other => Err(RenoteError::Config(format!(
                "Unknown duplicate policy '{}' (expected reject or first-wins)",
                other
            ))),
        }
    }
}

pub struct NoteMapper {
    editor: TextEditor,
    pattern: Regex,
    prefix: String,
    duplicates: DuplicatePolicy,
    repeated: Vec<String>,
}

impl NoteMapper {
    pub fn new(document: impl Into<String>, pattern: Regex, prefix: impl Into<String>) -> Self {
        Self {
            editor: TextEditor::new(document),
            pattern,
            prefix: prefix.into(),
            duplicates: DuplicatePolicy::default(),
            repeated: Vec::new(),
        }
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn document(&self) -> &str {
        self.editor.name()
    }

    /// Identifiers seen more than once by the last `derive_mapping`. Only
    /// filled under [`DuplicatePolicy::FirstWins`]; `Reject` fails instead.
    pub fn repeated(&self) -> &[String] {
        &self.repeated
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    /// The mapping produced by the last `derive_mapping`, if any.
    pub fn mapping(&self) -> Option<&NoteMapping> {
        self.editor.content().as_mapping()
    }

    /// Scan the document and number every identifier found, in order.
    ///
    /// The editor's text is replaced by the mapping. Running this on a document
    /// already numbered `prefix1..prefixN` yields the identity mapping.
    pub fn derive_mapping<S: DocumentStore>(&mut self, store: &S) -> Result<&NoteMapping> {
        self.editor.load(store, None)?;
        let matches = self.editor.find_matches(&self.pattern)?;
        let (mapping, repeated) = number_matches(
            matches,
            &self.prefix,
            self.duplicates,
            self.editor.name(),
        )?;
        self.repeated = repeated;
        info!(
            "derived {} identifiers from '{}'",
            mapping.len(),
            self.editor.name()
        );
        self.editor.set_content(Content::Mapping(mapping));
        self.mapping()
            .ok_or_else(|| RenoteError::Empty(self.editor.name().to_string()))
    }
}

impl Editing for NoteMapper {
    fn load<S: DocumentStore>(&mut self, store: &S, name: Option<&str>) -> Result<&Content> {
        self.editor.load(store, name)
    }

    fn save<S: DocumentStore>(
        &self,
        store: &mut S,
        name: Option<&str>,
        mode: WriteMode,
    ) -> Result<()> {
        self.editor.save(store, name, mode)
    }

    fn find_matches(&self, pattern: &Regex) -> Result<Vec<String>> {
        self.editor.find_matches(pattern)
    }

    fn replace(&mut self, current: &str, replacement: &str, mode: MatchMode) -> Result<&str> {
        self.editor.replace(current, replacement, mode)
    }
}

fn number_matches(
    matches: Vec<String>,
    prefix: &str,
    duplicates: DuplicatePolicy,
    document: &str,
) -> Result<(NoteMapping, Vec<String>)> {
    let mut mapping = NoteMapping::new();
    let mut repeated: Vec<String> = Vec::new();
    for identifier in matches {
        let next = format!("{}{}", prefix, mapping.len() + 1);
        if mapping.contains(&identifier) {
            match duplicates {
                DuplicatePolicy::Reject => {
                    return Err(RenoteError::DuplicateIdentifier {
                        identifier,
                        document: document.to_string(),
                    })
                }
                DuplicatePolicy::FirstWins => {
                    debug!("skipping repeated identifier '{}'", identifier);
                    if !repeated.contains(&identifier) {
                        repeated.push(identifier);
                    }
                    continue;
                }
            }
        }
        mapping.insert(identifier, next);
    }
    Ok((mapping, repeated))
}
