use crate::commands::{CmdMessage, CmdResult, PatchedDocument};
use crate::config::RenoteConfig;
use crate::editor::{Editing, TextEditor};
use crate::error::{RenoteError, Result};
use crate::mapping::NoteMapping;
use crate::store::{DocumentStore, WriteMode};
use log::{debug, info, warn};

/// Read the persisted mapping through an editor, as any other resource.
pub fn load_mapping<S: DocumentStore>(store: &S, name: &str) -> Result<NoteMapping> {
    let mut editor = TextEditor::new(name);
    let content = editor.load(store, None)?;
    let mapping = content
        .as_mapping()
        .cloned()
        .ok_or_else(|| RenoteError::Config(format!("'{}' is not a mapping file", name)))?;
    Ok(mapping)
}

/// Pass 2: rewrite every target document from the persisted mapping.
///
/// Documents are handled one at a time: loaded, rewritten, saved. An error
/// stops the pass; documents saved before it stay rewritten.
pub fn run<S: DocumentStore>(store: &mut S, config: &RenoteConfig) -> Result<CmdResult> {
    let mapping = load_mapping(&*store, &config.mapping_file)?;
    let targets = config.targets()?;
    if !config.documents.contains(&config.definition) {
        warn!(
            "definition document '{}' is not among the documents to patch",
            config.definition
        );
    }

    let mut result = CmdResult::default();
    let mut patched = Vec::with_capacity(targets.len());
    for target in targets {
        let mut editor = TextEditor::new(&target.name);
        editor.load(&*store, None)?;
        let replacements = target.policy.apply(&mut editor, &mapping)?;
        editor.save(store, None, WriteMode::Overwrite)?;

        debug!(
            "'{}': {} rewrites ({})",
            target.name,
            replacements,
            target.policy.kind()
        );
        result.add_message(CmdMessage::info(format!(
            "Patched '{}' ({} {})",
            target.name,
            replacements,
            if replacements == 1 { "rewrite" } else { "rewrites" }
        )));
        patched.push(PatchedDocument {
            name: target.name,
            replacements,
        });
    }
    info!("applied {} mappings to {} documents", mapping.len(), patched.len());

    Ok(result.with_mapping(mapping).with_patched(patched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::discover;
    use crate::store::memory::fixtures::{StoreFixture, REFERENCES};
    use crate::store::memory::InMemoryStore;

    fn discovered() -> InMemoryStore {
        let mut store = StoreFixture::new().with_default_documents().store;
        discover::run(&mut store, &RenoteConfig::default()).unwrap();
        store
    }

    #[test]
    fn test_apply_rewrites_definitions_and_references() {
        let mut store = discovered();
        let result = run(&mut store, &RenoteConfig::default()).unwrap();

        let fn_xml = store.get("FN.xml").unwrap();
        assert!(fn_xml.contains(r#"<p xml:id="note-1">1. Text one</p>"#));
        assert!(fn_xml.contains(r#"<p xml:id="note-2">2. Text two"#));
        assert!(fn_xml.contains(r#"url="image.html?asset=ab-12.png""#));

        for name in ["NO.xml", "SS.xml"] {
            let text = store.get(name).unwrap();
            assert!(text.contains(r#"target="FN.html#note-1"/>"#));
            assert!(text.contains(r#"FN.html#note-2"/>"#));
            assert!(!text.contains("note-27.3"));
        }

        let names: Vec<_> = result.patched.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["NO.xml", "SS.xml", "PP.xml", "FN.xml"]);
        let counts: Vec<_> = result.patched.iter().map(|p| p.replacements).collect();
        assert_eq!(counts, vec![2, 2, 0, 3]);
    }

    #[test]
    fn test_apply_without_mapping_file_fails() {
        let mut store = StoreFixture::new().with_default_documents().store;
        assert!(matches!(
            run(&mut store, &RenoteConfig::default()),
            Err(RenoteError::NotFound(_))
        ));
    }

    #[test]
    fn test_apply_aborts_on_missing_document_keeping_earlier_saves() {
        let mut store = discovered();
        let mut config = RenoteConfig::default();
        config.documents = vec!["NO.xml".into(), "GONE.xml".into(), "SS.xml".into()];

        assert!(run(&mut store, &config).is_err());
        assert!(store.get("NO.xml").unwrap().contains("note-1"));
        assert_eq!(store.get("SS.xml").unwrap(), REFERENCES);
    }

    #[test]
    fn test_apply_uses_persisted_mapping_as_is() {
        let mut store = StoreFixture::new()
            .with_document("NO.xml", r#"FN.html#note-9"/>"#)
            .with_document("data.json", r#"{"note-9": "note-42"}"#)
            .store;
        let mut config = RenoteConfig::default();
        config.documents = vec!["NO.xml".into()];

        run(&mut store, &config).unwrap();
        assert_eq!(store.get("NO.xml"), Some(r#"FN.html#note-42"/>"#));
    }

    #[test]
    fn test_load_mapping_rejects_text_resource() {
        let mut store = InMemoryStore::new();
        store.insert("data.txt", "note-1");
        assert!(matches!(
            load_mapping(&store, "data.txt"),
            Err(RenoteError::Config(_))
        ));
    }
}
