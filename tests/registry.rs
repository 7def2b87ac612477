mod common;

use common::MockTransport;
use pixel_panel::{
    config::ServerConfig,
    panel::PanelRecord,
    registry::{read_record, Registry},
    PanelError,
};
use std::fs;

#[test]
fn missing_dir_is_created_empty() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("panels");

    let reg = Registry::load_dir(&dir, Some(64), MockTransport::new()).unwrap();
    assert!(reg.is_empty());
    assert!(dir.is_dir());
}

#[test]
fn create_save_reload_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("panels");

    let mut reg = Registry::load_dir(&dir, Some(64), MockTransport::new()).unwrap();
    let hall = reg.create("hall", "dev1", 64, 32).unwrap();
    assert_eq!(hall.name(), "");
    reg.create_named("door", "Door", "10.0.0.7:8080", 32, 16).unwrap();
    reg.save(&hall).unwrap();
    assert!(dir.join("hall.json").is_file());

    let reg2 = Registry::load_dir(&dir, Some(64), MockTransport::new()).unwrap();
    assert_eq!(reg2.len(), 2);
    for id in ["hall", "door"] {
        let before = reg.lookup(id).unwrap();
        let after = reg2.lookup(id).unwrap();
        assert_eq!(before.record(), after.record());
        assert_eq!(after.id(), id);
    }
    let door = reg2.lookup("door").unwrap();
    assert_eq!(door.name(), "Door");
    assert_eq!(door.address(), "10.0.0.7:8080");
    assert_eq!((door.width(), door.height()), (32, 16));
    assert_eq!(door.canvas().dimensions(), (32, 16));
}

#[test]
fn load_through_config() {
    let root = tempfile::tempdir().unwrap();
    let cfg = ServerConfig {
        records_dir: root.path().join("records").to_string_lossy().to_string(),
        ..ServerConfig::default()
    };
    let mut reg = Registry::load(&cfg, MockTransport::new()).unwrap();
    reg.create("a", "dev-a", 8, 8).unwrap();
    assert_eq!(reg.dir(), cfg.records_path());
    assert_eq!(Registry::load(&cfg, MockTransport::new()).unwrap().len(), 1);
}

#[test]
fn bad_records_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path();
    fs::write(dir.join("good.json"), r#"{"name":"G","address":"dev-g","width":16,"height":8}"#).unwrap();
    fs::write(dir.join("broken.json"), "{not json").unwrap();
    fs::write(dir.join("wide.json"), r#"{"address":"dev-w","width":300,"height":8}"#).unwrap();
    fs::write(dir.join(".hidden.json"), r#"{"address":"dev-h"}"#).unwrap();
    fs::write(dir.join("notes.txt"), "not a record").unwrap();
    fs::create_dir(dir.join("sub.json")).unwrap();

    let reg = Registry::load_dir(dir, Some(64), MockTransport::new()).unwrap();
    let ids: Vec<String> = reg.panels().iter().map(|p| p.id().to_string()).collect();
    assert_eq!(ids, vec!["good".to_string()]);
    assert!(matches!(reg.lookup("broken"), Err(PanelError::NotFound(_))));
    // skipped records are left as they were
    assert_eq!(fs::read_to_string(dir.join("broken.json")).unwrap(), "{not json");
}

#[test]
fn records_are_normalized_on_load() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path();
    fs::write(dir.join("partial.json"), r#"{"address":"dev9"}"#).unwrap();

    let reg = Registry::load_dir(dir, Some(64), MockTransport::new()).unwrap();
    let p = reg.lookup("partial").unwrap();
    assert_eq!((p.width(), p.height()), (0, 0));

    let rec = read_record(&dir.join("partial.json")).unwrap();
    assert_eq!(
        rec,
        PanelRecord {
            name: String::new(),
            address: "dev9".into(),
            width: 0,
            height: 0,
        }
    );
    let text = fs::read_to_string(dir.join("partial.json")).unwrap();
    assert!(text.contains("\n    \"width\": 0"));
}

#[test]
fn panels_are_sorted_by_id() {
    let root = tempfile::tempdir().unwrap();
    let mut reg = Registry::load_dir(root.path(), None, MockTransport::new()).unwrap();
    for id in ["c", "a", "b"] {
        reg.create(id, "dev", 4, 4).unwrap();
    }
    let ids: Vec<_> = reg.panels().iter().map(|p| p.id().to_string()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn invalid_ids_and_unreadable_dir() {
    let root = tempfile::tempdir().unwrap();
    let mut reg = Registry::load_dir(root.path(), None, MockTransport::new()).unwrap();
    assert!(matches!(
        reg.create("../escape", "dev", 4, 4),
        Err(PanelError::InvalidId(_))
    ));
    assert!(reg.is_empty());

    let file = root.path().join("plain-file");
    fs::write(&file, "x").unwrap();
    assert!(matches!(
        Registry::load_dir(&file, None, MockTransport::new()),
        Err(PanelError::Io(_))
    ));
}

#[test]
fn recreating_an_id_replaces_the_panel() {
    let root = tempfile::tempdir().unwrap();
    let mut reg = Registry::load_dir(root.path(), None, MockTransport::new()).unwrap();
    reg.create("hall", "dev1", 64, 32).unwrap();
    reg.create("hall", "dev2", 32, 32).unwrap();
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.lookup("hall").unwrap().address(), "dev2");
}
