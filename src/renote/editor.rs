//! # Text Editor
//!
//! A [`TextEditor`] owns the content of one named resource. It loads the whole
//! resource into memory, edits it there, and writes it back only when
//! [`Editing::save`] is called.
//!
//! Resources whose name carries a `.json` extension are treated as persisted
//! [`NoteMapping`]s and loaded as such; everything else is raw text.
//!
//! Replacement templates for pattern mode use backslash group references
//! (`\2`, `\g<name>`), which is how `asset_template` is written in
//! `renote.json`. They are translated to the `regex` crate's `${2}` syntax before use, and
//! a literal `$` in a template stays literal.

use crate::error::{RenoteError, Result};
use crate::mapping::NoteMapping;
use crate::store::{DocumentStore, WriteMode};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::path::Path;

static BACKSLASH_TEMPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(\d{1,2})|\\g<(\w+)>|\\\\|\$").expect("template regex is valid")
});

/// What an editor currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Mapping(NoteMapping),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&NoteMapping> {
        match self {
            Content::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }
}

/// How `replace` interprets its search argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Plain substring, no metacharacters.
    Literal,
    /// Regular expression with a backslash-style substitution template.
    Pattern,
}

/// The load / save / match / replace capability set.
pub trait Editing {
    /// Read `name` (or the editor's own name) fully into memory.
    fn load<S: DocumentStore>(&mut self, store: &S, name: Option<&str>) -> Result<&Content>;

    /// Write the in-memory content to `name` (or the editor's own name).
    fn save<S: DocumentStore>(
        &self,
        store: &mut S,
        name: Option<&str>,
        mode: WriteMode,
    ) -> Result<()>;

    /// Every non-overlapping match, left to right. With capture groups in the
    /// pattern, the first group's text is returned instead of the whole match.
    fn find_matches(&self, pattern: &Regex) -> Result<Vec<String>>;

    /// Replace every occurrence of `current` and return the new text.
    fn replace(&mut self, current: &str, replacement: &str, mode: MatchMode) -> Result<&str>;
}

#[derive(Debug, Clone)]
pub struct TextEditor {
    name: String,
    content: Content,
}

impl TextEditor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Content::Empty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the default resource name. Storage is not touched.
    pub fn rename(&mut self, new_name: impl Into<String>) -> &str {
        self.name = new_name.into();
        &self.name
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn set_content(&mut self, content: Content) {
        self.content = content;
    }

    pub fn text(&self) -> Result<&str> {
        match &self.content {
            Content::Text(text) => Ok(text),
            Content::Empty => Err(RenoteError::Empty(self.name.clone())),
            Content::Mapping(_) => Err(RenoteError::NotText(self.name.clone())),
        }
    }

    /// Replace every match of `re` with what `f` returns for it. `None` keeps
    /// the matched text as is. Returns how many matches actually changed.
    pub fn replace_with<F>(&mut self, re: &Regex, mut f: F) -> Result<usize>
    where
        F: FnMut(&Captures) -> Option<String>,
    {
        let mut changed = 0;
        let updated = re
            .replace_all(self.text()?, |caps: &Captures| match f(caps) {
                Some(new) => {
                    if new != caps[0] {
                        changed += 1;
                    }
                    new
                }
                None => caps[0].to_string(),
            })
            .into_owned();
        self.content = Content::Text(updated);
        Ok(changed)
    }
}

impl Editing for TextEditor {
    fn load<S: DocumentStore>(&mut self, store: &S, name: Option<&str>) -> Result<&Content> {
        let name = name.unwrap_or(&self.name).to_string();
        let raw = store.read(&name)?;
        self.content = if is_mapping_name(&name) {
            Content::Mapping(NoteMapping::from_json(&raw)?)
        } else {
            Content::Text(raw)
        };
        debug!("loaded '{}'", name);
        Ok(&self.content)
    }

    fn save<S: DocumentStore>(
        &self,
        store: &mut S,
        name: Option<&str>,
        mode: WriteMode,
    ) -> Result<()> {
        let name = name.unwrap_or(&self.name);
        let serialized = match &self.content {
            Content::Text(text) => Cow::Borrowed(text.as_str()),
            Content::Mapping(mapping) => Cow::Owned(mapping.to_json()?),
            Content::Empty => return Err(RenoteError::Empty(name.to_string())),
        };
        store.write(name, &serialized, mode)?;
        debug!("saved '{}'", name);
        Ok(())
    }

    fn find_matches(&self, pattern: &Regex) -> Result<Vec<String>> {
        let text = self.text()?;
        let matches = if pattern.captures_len() > 1 {
            pattern
                .captures_iter(text)
                .map(|caps| caps.get(1).map_or_else(String::new, |m| m.as_str().to_string()))
                .collect()
        } else {
            pattern
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect()
        };
        Ok(matches)
    }

    fn replace(&mut self, current: &str, replacement: &str, mode: MatchMode) -> Result<&str> {
        let updated = match mode {
            MatchMode::Literal => self.text()?.replace(current, replacement),
            MatchMode::Pattern => {
                let re = Regex::new(current)?;
                let template = translate_template(replacement);
                re.replace_all(self.text()?, template.as_str()).into_owned()
            }
        };
        self.content = Content::Text(updated);
        self.text()
    }
}

/// Whether a resource name denotes a persisted mapping.
pub fn is_mapping_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Turn a backslash-style template (`image.html?asset=\2`) into `regex` syntax.
pub fn translate_template(template: &str) -> String {
    BACKSLASH_TEMPLATE
        .replace_all(template, |caps: &Captures| {
            if let Some(group) = caps.get(1).or_else(|| caps.get(2)) {
                format!("${{{}}}", group.as_str())
            } else if &caps[0] == "$" {
                "$$".to_string()
            } else {
                "\\".to_string()
            }
        })
        .into_owned()
}
