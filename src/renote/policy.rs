//! # Substitution Policies
//!
//! A target document is rewritten in one of two ways:
//!
//! - [`ReferenceLinkPolicy`]: dependent documents only hold links of the form
//!   `FN.html#note-27.3"/>`; each linked identifier is swapped for its new value.
//! - [`DefinitionSitePolicy`]: the definition document holds the note openings
//!   themselves, `<p xml:id="note-27.3">27.3 Text`. Both the identifier and the
//!   visible label are rewritten, and image asset paths are redirected.
//!
//! Which policy a document gets is decided when the configuration is resolved
//! (see `RenoteConfig::targets`), never inside the apply loop.
//!
//! Every entry of the mapping is applied in a single pass over the text. A
//! rewritten identifier is never seen again by a later entry, so tables such as
//! `note-2 → note-1, note-1 → note-2` swap cleanly.

use crate::editor::{translate_template, TextEditor};
use crate::error::Result;
use crate::mapping::NoteMapping;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ASSET_PATTERN: &str = r"(assets/)([a-zA-Z]{1,2}-[0-9]{1,3}\.png)";
pub const DEFAULT_ASSET_TEMPLATE: &str = r"image.html?asset=\2";

/// How the visible note number after a definition opening is rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStyle {
    /// `27.3 Text` becomes `1. Text`
    #[default]
    Numbered,
    /// `27.3 Text` becomes `Text`; numbering is left to the stylesheet
    Stripped,
}

impl LabelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelStyle::Numbered => "numbered",
            LabelStyle::Stripped => "stripped",
        }
    }
}

impl std::str::FromStr for LabelStyle {
    type Err = crate::error::RenoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "numbered" => Ok(LabelStyle::Numbered),
            "stripped" => Ok(LabelStyle::Stripped),
            other => Err(crate::error::RenoteError::Config(format!(
                "Unknown label style '{}' (expected numbered or stripped)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLinkPolicy {
    pub link_target: String,
}

impl ReferenceLinkPolicy {
    pub fn new(link_target: impl Into<String>) -> Self {
        Self {
            link_target: link_target.into(),
        }
    }

    pub fn apply(&self, editor: &mut TextEditor, mapping: &NoteMapping) -> Result<usize> {
        if mapping.is_empty() {
            return Ok(0);
        }
        let keys: Vec<String> = mapping.iter().map(|(old, _)| regex::escape(old)).collect();
        let re = Regex::new(&format!(
            r#"{}#({})"/>"#,
            regex::escape(&self.link_target),
            keys.join("|")
        ))?;

        let link_target = &self.link_target;
        editor.replace_with(&re, |caps| {
            mapping
                .get(&caps[1])
                .map(|new| format!("{}#{}\"/>", link_target, new))
        })
    }
}

/// Redirects image asset paths inside the definition document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRewrite {
    pub pattern: String,
    pub template: String,
}

impl Default for AssetRewrite {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_ASSET_PATTERN.to_string(),
            template: DEFAULT_ASSET_TEMPLATE.to_string(),
        }
    }
}

impl AssetRewrite {
    pub fn apply(&self, editor: &mut TextEditor) -> Result<usize> {
        let re = Regex::new(&self.pattern)?;
        let template = translate_template(&self.template);
        editor.replace_with(&re, |caps| {
            let mut rewritten = String::new();
            caps.expand(&template, &mut rewritten);
            Some(rewritten)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSitePolicy {
    pub element: String,
    pub attribute: String,
    pub prefix: String,
    pub label_style: LabelStyle,
    pub assets: Option<AssetRewrite>,
}

impl DefinitionSitePolicy {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            element: "p".to_string(),
            attribute: "xml:id".to_string(),
            prefix: prefix.into(),
            label_style: LabelStyle::default(),
            assets: Some(AssetRewrite::default()),
        }
    }

    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    pub fn with_assets(mut self, assets: Option<AssetRewrite>) -> Self {
        self.assets = assets;
        self
    }

    fn label<'a>(&self, identifier: &'a str) -> &'a str {
        identifier.strip_prefix(&self.prefix).unwrap_or(identifier)
    }

    fn opening(&self, identifier: &str) -> String {
        format!("<{} {}=\"{}\">", self.element, self.attribute, identifier)
    }

    /// The opening of any mapped identifier (group 1), an optional space, a
    /// label (group 2), an optional period and one or two spaces. Whether the
    /// label belongs to the identifier is checked per match.
    fn site_regex(&self, mapping: &NoteMapping) -> Result<Regex> {
        let keys: Vec<String> = mapping.iter().map(|(old, _)| regex::escape(old)).collect();
        Ok(Regex::new(&format!(
            r#"<{} {}="({})"> ?([^\s<]+?)\.? {{1,2}}"#,
            regex::escape(&self.element),
            regex::escape(&self.attribute),
            keys.join("|")
        ))?)
    }

    pub fn apply(&self, editor: &mut TextEditor, mapping: &NoteMapping) -> Result<usize> {
        let mut changed = 0;
        if !mapping.is_empty() {
            let re = self.site_regex(mapping)?;
            changed += editor.replace_with(&re, |caps| {
                let old = &caps[1];
                if &caps[2] != self.label(old) {
                    return None;
                }
                let new = mapping.get(old)?;
                Some(match self.label_style {
                    LabelStyle::Numbered => format!("{}{}. ", self.opening(new), self.label(new)),
                    LabelStyle::Stripped => self.opening(new),
                })
            })?;
        }

        if let Some(assets) = &self.assets {
            let rewritten = assets.apply(editor)?;
            debug!("rewrote {} asset paths in '{}'", rewritten, editor.name());
            changed += rewritten;
        }
        Ok(changed)
    }
}

/// The rewrite a target document receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionPolicy {
    ReferenceLink(ReferenceLinkPolicy),
    DefinitionSite(DefinitionSitePolicy),
}

impl SubstitutionPolicy {
    /// Rewrite the editor's text. Returns how many rewrites took place.
    pub fn apply(&self, editor: &mut TextEditor, mapping: &NoteMapping) -> Result<usize> {
        match self {
            SubstitutionPolicy::ReferenceLink(policy) => policy.apply(editor, mapping),
            SubstitutionPolicy::DefinitionSite(policy) => policy.apply(editor, mapping),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SubstitutionPolicy::ReferenceLink(_) => "references",
            SubstitutionPolicy::DefinitionSite(_) => "definitions",
        }
    }
}
