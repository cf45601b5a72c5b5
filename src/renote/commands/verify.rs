use crate::commands::apply::load_mapping;
use crate::commands::{CmdMessage, CmdResult, Mismatch};
use crate::config::RenoteConfig;
use crate::editor::Editing;
use crate::error::Result;
use crate::mapper::DuplicatePolicy;
use crate::store::{DocumentStore, WriteMode};
use log::{info, warn};

/// Pass 3: re-derive the mapping from the rewritten definition document,
/// persist it over the old one, and report every identifier that is not
/// already in its sequential form.
///
/// Mismatches are findings, not errors: the pass succeeds and lists them.
/// An identifier defined twice (a stale one colliding with a new one) is
/// reported too, whatever the configured duplicate policy.
pub fn run<S: DocumentStore>(store: &mut S, config: &RenoteConfig) -> Result<CmdResult> {
    let mut mapper = config.mapper()?.with_duplicates(DuplicatePolicy::FirstWins);
    mapper.derive_mapping(&*store)?;
    mapper.save(store, Some(config.mapping_file.as_str()), WriteMode::Overwrite)?;

    let redone = load_mapping(&*store, &config.mapping_file)?;
    let mismatches: Vec<Mismatch> = redone
        .drifted()
        .map(|(old, new)| Mismatch {
            document: mapper.document().to_string(),
            old: old.to_string(),
            new: new.to_string(),
        })
        .collect();

    let mut result = CmdResult::default();
    for identifier in mapper.repeated() {
        warn!("'{}': {} is defined more than once", mapper.document(), identifier);
        result.add_message(CmdMessage::warning(format!(
            "Look in '{}' for the note string '{}', it is defined more than once",
            mapper.document(),
            identifier
        )));
    }
    for mismatch in &mismatches {
        warn!(
            "'{}': {} should be {}",
            mismatch.document, mismatch.old, mismatch.new
        );
        result.add_message(CmdMessage::warning(format!(
            "Look in '{}' for the old note string '{}' or for the new note string '{}' because something's not quite right.",
            mismatch.document, mismatch.old, mismatch.new
        )));
    }

    if mismatches.is_empty() && mapper.repeated().is_empty() {
        info!("{} identifiers verified", redone.len());
        result.add_message(CmdMessage::success(format!(
            "All {} notes are numbered in sequence; the documents are ready to use",
            redone.len()
        )));
    }

    Ok(result.with_mapping(redone).with_mismatches(mismatches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::mapping::NoteMapping;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_sequential_document_verifies_clean() {
        let mut store = StoreFixture::new()
            .with_document(
                "FN.xml",
                r#"<p xml:id="note-1">1. A</p><p xml:id="note-2">2. B</p>"#,
            )
            .store;
        let result = run(&mut store, &RenoteConfig::default()).unwrap();
        assert!(result.mismatches.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.mapping.unwrap().is_identity());
    }

    #[test]
    fn test_partially_renumbered_reports_one_mismatch() {
        let mut store = StoreFixture::new()
            .with_document(
                "FN.xml",
                r#"<p xml:id="note-1">1. A</p><p xml:id="note-9">9 B</p>"#,
            )
            .store;
        let result = run(&mut store, &RenoteConfig::default()).unwrap();

        assert_eq!(
            result.mismatches,
            vec![Mismatch {
                document: "FN.xml".to_string(),
                old: "note-9".to_string(),
                new: "note-2".to_string(),
            }]
        );
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("'note-9'"));
        assert!(result.messages[0].content.contains("'note-2'"));
    }

    #[test]
    fn test_stale_identifier_colliding_with_new_one_is_reported() {
        let mut store = StoreFixture::new()
            .with_document(
                "FN.xml",
                r#"<p xml:id="note-2">X typo</p><p xml:id="note-2">2. ok</p>"#,
            )
            .store;
        let result = run(&mut store, &RenoteConfig::default()).unwrap();

        assert_eq!(
            result.mismatches,
            vec![Mismatch {
                document: "FN.xml".to_string(),
                old: "note-2".to_string(),
                new: "note-1".to_string(),
            }]
        );
        assert_eq!(result.messages.len(), 2);
        assert!(result
            .messages
            .iter()
            .all(|m| m.level == MessageLevel::Warning));
        assert!(result.messages[0].content.contains("more than once"));

        let persisted = NoteMapping::from_json(store.get("data.json").unwrap()).unwrap();
        assert_eq!(persisted.get("note-2"), Some("note-1"));
    }

    #[test]
    fn test_verify_overwrites_mapping_file() {
        let mut store = StoreFixture::new()
            .with_document("FN.xml", r#"<p xml:id="note-1">1. A</p>"#)
            .with_document("data.json", r#"{"note-77": "note-1"}"#)
            .store;
        run(&mut store, &RenoteConfig::default()).unwrap();

        let persisted = NoteMapping::from_json(store.get("data.json").unwrap()).unwrap();
        assert_eq!(persisted.get("note-1"), Some("note-1"));
        assert!(!persisted.contains("note-77"));
    }
}
