use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FN_XML: &str = r#"<div>
<p xml:id="note-27.3">27.3 Text one</p>
<p xml:id="note-9">9 Text two <graphic url="assets/ab-12.png"/></p>
</div>
"#;

const NO_XML: &str = r#"<p>See <ref href="FN.html#note-27.3"/> and <ref href="FN.html#note-9"/>.</p>
"#;

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("FN.xml"), FN_XML).unwrap();
    fs::write(dir.path().join("NO.xml"), NO_XML).unwrap();
    fs::write(dir.path().join("SS.xml"), NO_XML).unwrap();
    fs::write(dir.path().join("PP.xml"), "<p>Nothing to see</p>\n").unwrap();
    dir
}

fn renote(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("renote").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_default_run_renumbers_everything() {
    let dir = setup();

    renote(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Patched 'NO.xml' (2 rewrites)"))
        .stdout(predicate::str::contains("ready to use"));

    let fn_xml = read(dir.path(), "FN.xml");
    assert!(fn_xml.contains(r#"<p xml:id="note-1">1. Text one</p>"#));
    assert!(fn_xml.contains(
        r#"<p xml:id="note-2">2. Text two <graphic url="image.html?asset=ab-12.png"/></p>"#
    ));

    for name in ["NO.xml", "SS.xml"] {
        assert_eq!(
            read(dir.path(), name),
            "<p>See <ref href=\"FN.html#note-1\"/> and <ref href=\"FN.html#note-2\"/>.</p>\n"
        );
    }
    assert_eq!(read(dir.path(), "PP.xml"), "<p>Nothing to see</p>\n");
    assert_eq!(
        read(dir.path(), "data.json"),
        "{\n    \"note-1\": \"note-1\",\n    \"note-2\": \"note-2\"\n}\n"
    );
}

#[test]
fn test_dir_flag_points_at_documents() {
    let dir = setup();
    let elsewhere = TempDir::new().unwrap();

    renote(elsewhere.path())
        .arg("--dir")
        .arg(dir.path())
        .arg("run")
        .assert()
        .success();

    assert!(read(dir.path(), "FN.xml").contains("note-2"));
    assert!(!elsewhere.path().join("data.json").exists());
}

#[test]
fn test_map_prints_table_without_touching_documents() {
    let dir = setup();

    renote(dir.path())
        .arg("map")
        .assert()
        .success()
        .stdout(predicate::str::contains("note-27.3 -> "))
        .stdout(predicate::str::contains("note-9"))
        .stdout(predicate::str::contains("Found 2 notes"));

    assert_eq!(read(dir.path(), "FN.xml"), FN_XML);
    assert_eq!(
        read(dir.path(), "data.json"),
        "{\n    \"note-27.3\": \"note-1\",\n    \"note-9\": \"note-2\"\n}\n"
    );
}

#[test]
fn test_map_then_apply() {
    let dir = setup();
    renote(dir.path()).arg("map").assert().success();
    renote(dir.path()).arg("apply").assert().success();
    assert!(read(dir.path(), "NO.xml").contains("FN.html#note-2"));
}

#[test]
fn test_apply_without_mapping_fails() {
    let dir = setup();
    renote(dir.path())
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("data.json"));
}

#[test]
fn test_verify_reports_stale_identifier() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("FN.xml"),
        r#"<p xml:id="note-1">1. Done</p><p xml:id="note-5">5 Stale</p>"#,
    )
    .unwrap();

    renote(dir.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Look in 'FN.xml' for the old note string 'note-5' or for the new note string 'note-2'",
        ))
        .stdout(predicate::str::contains("note-1'").not())
        .stdout(predicate::str::contains("ready to use").not());
}

#[test]
fn test_missing_definition_fails() {
    let dir = TempDir::new().unwrap();
    renote(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found"));
}

#[test]
fn test_duplicate_identifiers_abort() {
    let dir = setup();
    fs::write(
        dir.path().join("FN.xml"),
        r#"<p xml:id="note-4">4 A</p><p xml:id="note-4">4 B</p>"#,
    )
    .unwrap();

    renote(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate identifier 'note-4'"));
    assert_eq!(read(dir.path(), "NO.xml"), NO_XML);
}

#[test]
fn test_hand_edited_config_is_checked() {
    let dir = setup();
    fs::write(
        dir.path().join("renote.json"),
        r#"{"mapping_file": "data.txt"}"#,
    )
    .unwrap();

    renote(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("mapping-file must end in .json"));
    assert_eq!(read(dir.path(), "NO.xml"), NO_XML);
}

#[test]
fn test_stale_identifier_colliding_with_new_one_is_reported() {
    let dir = setup();
    fs::write(
        dir.path().join("FN.xml"),
        r#"<p xml:id="note-2">X typo</p><p xml:id="note-5">5 ok</p>"#,
    )
    .unwrap();

    renote(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("'note-2', it is defined more than once"))
        .stdout(predicate::str::contains("for the old note string 'note-2'"))
        .stdout(predicate::str::contains("ready to use").not());
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    renote(dir.path())
        .args(["config", "label-style", "stripped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("label-style set to stripped"));

    renote(dir.path())
        .args(["config", "label-style"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stripped"));

    renote(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("definition = FN.xml"))
        .stdout(predicate::str::contains("label-style = stripped"));
}

#[test]
fn test_stripped_labels_from_config() {
    let dir = setup();
    renote(dir.path())
        .args(["config", "label-style", "stripped"])
        .assert()
        .success();
    renote(dir.path()).assert().success();

    let fn_xml = read(dir.path(), "FN.xml");
    assert!(fn_xml.contains(r#"<p xml:id="note-1">Text one</p>"#));
}

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();
    renote(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 'renote.json'"));
    assert!(read(dir.path(), "renote.json").contains("\"definition\": \"FN.xml\""));
}
