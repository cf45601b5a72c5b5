use crate::config::RenoteConfig;
use crate::mapping::NoteMapping;

pub mod apply;
pub mod config;
pub mod discover;
pub mod init;
pub mod renumber;
pub mod verify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A document that went through the apply pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedDocument {
    pub name: String,
    pub replacements: usize,
}

/// An identifier whose current form differs from its sequential form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub document: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub mapping: Option<NoteMapping>,
    pub patched: Vec<PatchedDocument>,
    pub mismatches: Vec<Mismatch>,
    pub config: Option<RenoteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_mapping(mut self, mapping: NoteMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_patched(mut self, patched: Vec<PatchedDocument>) -> Self {
        self.patched = patched;
        self
    }

    pub fn with_mismatches(mut self, mismatches: Vec<Mismatch>) -> Self {
        self.mismatches = mismatches;
        self
    }

    pub fn with_config(mut self, config: RenoteConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Fold a later pass into this result. The later mapping wins; lists and
    /// messages are appended.
    pub fn merge(mut self, later: CmdResult) -> Self {
        if later.mapping.is_some() {
            self.mapping = later.mapping;
        }
        if later.config.is_some() {
            self.config = later.config;
        }
        self.patched.extend(later.patched);
        self.mismatches.extend(later.mismatches);
        self.messages.extend(later.messages);
        self
    }
}
