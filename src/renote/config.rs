//! # Configuration
//!
//! Settings live in `renote.json` next to the documents. Every field has a
//! default matching the FN/NO/SS/PP deployment, so a missing file or a
//! partial one both work.
//!
//! | Key | Default |
//! |-----|---------|
//! | `definition` | `FN.xml` |
//! | `documents` | `NO.xml, SS.xml, PP.xml, FN.xml` |
//! | `mapping-file` | `data.json` |
//! | `pattern` | `<p xml:id="(note-[0-9.]*)">` |
//! | `prefix` | `note-` |
//! | `link-target` | definition stem + `.html` |
//! | `element` / `attribute` | `p` / `xml:id` |
//! | `label-style` | `numbered` |
//! | `duplicates` | `reject` |
//! | `rewrite-assets` | `true` |
//! | `asset-pattern` / `asset-template` | `(assets/)(...\.png)` / `image.html?asset=\2` |
//!
//! The CLI spells keys with dashes, the file with underscores.

use crate::error::{RenoteError, Result};
use crate::mapper::{DuplicatePolicy, NoteMapper, DEFAULT_PREFIX};
use crate::policy::{
    AssetRewrite, DefinitionSitePolicy, LabelStyle, ReferenceLinkPolicy, SubstitutionPolicy,
    DEFAULT_ASSET_PATTERN, DEFAULT_ASSET_TEMPLATE,
};
use crate::store::{DocumentStore, WriteMode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILENAME: &str = "renote.json";
const DEFAULT_PATTERN: &str = r#"<p xml:id="(note-[0-9.]*)">"#;

pub const KEYS: &[&str] = &[
    "definition",
    "documents",
    "mapping-file",
    "pattern",
    "prefix",
    "link-target",
    "element",
    "attribute",
    "label-style",
    "duplicates",
    "rewrite-assets",
    "asset-pattern",
    "asset-template",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenoteConfig {
    /// Document where notes are defined and identifiers assigned
    pub definition: String,

    /// Documents to patch, in order. Usually includes `definition`.
    pub documents: Vec<String>,

    /// Where the derived mapping is persisted (must be `.json`)
    pub mapping_file: String,

    /// Discovery pattern; its first capture group is the identifier
    pub pattern: String,

    pub prefix: String,

    /// Link base used by dependent documents. Derived from `definition` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,

    pub element: String,
    pub attribute: String,
    pub label_style: LabelStyle,
    pub duplicates: DuplicatePolicy,
    pub rewrite_assets: bool,
    pub asset_pattern: String,
    pub asset_template: String,
}

impl Default for RenoteConfig {
    fn default() -> Self {
        Self {
            definition: "FN.xml".to_string(),
            documents: vec![
                "NO.xml".to_string(),
                "SS.xml".to_string(),
                "PP.xml".to_string(),
                "FN.xml".to_string(),
            ],
            mapping_file: "data.json".to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            link_target: None,
            element: "p".to_string(),
            attribute: "xml:id".to_string(),
            label_style: LabelStyle::default(),
            duplicates: DuplicatePolicy::default(),
            rewrite_assets: true,
            asset_pattern: DEFAULT_ASSET_PATTERN.to_string(),
            asset_template: DEFAULT_ASSET_TEMPLATE.to_string(),
        }
    }
}

/// A document to patch together with the rewrite it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub policy: SubstitutionPolicy,
}

impl RenoteConfig {
    /// Load config from the store, or return defaults if not found.
    /// A hand-edited file gets the same checks as `set`.
    pub fn load<S: DocumentStore>(store: &S) -> Result<Self> {
        if !store.exists(CONFIG_FILENAME) {
            return Ok(Self::default());
        }
        let content = store.read(CONFIG_FILENAME)?;
        let config: RenoteConfig =
            serde_json::from_str(&content).map_err(RenoteError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_mapping_file(&self.mapping_file)?;
        check_pattern(&self.pattern)?;
        Regex::new(&self.asset_pattern)?;
        for (key, value) in [
            ("definition", &self.definition),
            ("prefix", &self.prefix),
            ("element", &self.element),
            ("attribute", &self.attribute),
        ] {
            non_empty(key, value)?;
        }
        Ok(())
    }

    pub fn save<S: DocumentStore>(&self, store: &mut S) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(RenoteError::Serialization)?;
        store.write(CONFIG_FILENAME, &content, WriteMode::Overwrite)
    }

    /// `FN.xml` links as `FN.html` unless configured otherwise.
    pub fn link_target(&self) -> String {
        if let Some(target) = &self.link_target {
            return target.clone();
        }
        let stem = Path::new(&self.definition)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.definition.clone());
        format!("{}.html", stem)
    }

    /// A mapper over the definition document.
    pub fn mapper(&self) -> Result<NoteMapper> {
        let pattern = Regex::new(&self.pattern)?;
        Ok(NoteMapper::new(&self.definition, pattern, &self.prefix).with_duplicates(self.duplicates))
    }

    /// Resolve every document into its rewrite. The definition document gets
    /// the definition-site rewrite, every other document the link rewrite.
    pub fn targets(&self) -> Result<Vec<Target>> {
        let assets = if self.rewrite_assets {
            Regex::new(&self.asset_pattern)?;
            Some(AssetRewrite {
                pattern: self.asset_pattern.clone(),
                template: self.asset_template.clone(),
            })
        } else {
            None
        };
        let definition = SubstitutionPolicy::DefinitionSite(DefinitionSitePolicy {
            element: self.element.clone(),
            attribute: self.attribute.clone(),
            prefix: self.prefix.clone(),
            label_style: self.label_style,
            assets,
        });
        let reference = SubstitutionPolicy::ReferenceLink(ReferenceLinkPolicy::new(self.link_target()));

        Ok(self
            .documents
            .iter()
            .map(|name| Target {
                name: name.clone(),
                policy: if *name == self.definition {
                    definition.clone()
                } else {
                    reference.clone()
                },
            })
            .collect())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "definition" => self.definition.clone(),
            "documents" => self.documents.join(","),
            "mapping-file" => self.mapping_file.clone(),
            "pattern" => self.pattern.clone(),
            "prefix" => self.prefix.clone(),
            "link-target" => self.link_target(),
            "element" => self.element.clone(),
            "attribute" => self.attribute.clone(),
            "label-style" => self.label_style.as_str().to_string(),
            "duplicates" => self.duplicates.as_str().to_string(),
            "rewrite-assets" => self.rewrite_assets.to_string(),
            "asset-pattern" => self.asset_pattern.clone(),
            "asset-template" => self.asset_template.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "definition" => self.definition = non_empty(key, value)?,
            "documents" => {
                self.documents = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "mapping-file" => {
                check_mapping_file(value)?;
                self.mapping_file = value.to_string();
            }
            "pattern" => {
                check_pattern(value)?;
                self.pattern = value.to_string();
            }
            "prefix" => self.prefix = non_empty(key, value)?,
            "link-target" => {
                self.link_target = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "element" => self.element = non_empty(key, value)?,
            "attribute" => self.attribute = non_empty(key, value)?,
            "label-style" => self.label_style = value.parse()?,
            "duplicates" => self.duplicates = value.parse()?,
            "rewrite-assets" => {
                self.rewrite_assets = value.parse().map_err(|_| {
                    RenoteError::Config(format!("rewrite-assets must be true or false, got '{}'", value))
                })?
            }
            "asset-pattern" => {
                Regex::new(value)?;
                self.asset_pattern = value.to_string();
            }
            "asset-template" => self.asset_template = value.to_string(),
            _ => return Err(RenoteError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn check_mapping_file(value: &str) -> Result<()> {
    if !crate::editor::is_mapping_name(value) {
        return Err(RenoteError::Config(format!(
            "mapping-file must end in .json, got '{}'",
            value
        )));
    }
    Ok(())
}

fn check_pattern(value: &str) -> Result<()> {
    if Regex::new(value)?.captures_len() < 2 {
        return Err(RenoteError::Config(
            "pattern needs a capture group around the identifier".to_string(),
        ));
    }
    Ok(())
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(RenoteError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}
