use crate::commands::{CmdMessage, CmdResult};
use crate::config::RenoteConfig;
use crate::editor::Editing;
use crate::error::{RenoteError, Result};
use crate::store::{DocumentStore, WriteMode};
use log::info;

/// Pass 1: number the identifiers of the definition document and persist the
/// mapping.
pub fn run<S: DocumentStore>(store: &mut S, config: &RenoteConfig) -> Result<CmdResult> {
    let mut mapper = config.mapper()?;
    mapper.derive_mapping(&*store)?;
    mapper.save(store, Some(config.mapping_file.as_str()), WriteMode::Overwrite)?;

    let mapping = mapper
        .mapping()
        .cloned()
        .ok_or_else(|| RenoteError::Empty(config.definition.clone()))?;
    info!(
        "mapping of {} identifiers written to '{}'",
        mapping.len(),
        config.mapping_file
    );

    let mut result = CmdResult::default();
    if mapping.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No notes found in '{}'",
            config.definition
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Found {} notes in '{}', mapping written to '{}'",
            mapping.len(),
            config.definition,
            config.mapping_file
        )));
    }
    Ok(result.with_mapping(mapping))
}
