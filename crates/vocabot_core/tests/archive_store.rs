use std::fs;
use vocabot_core::{Archive, ArchiveRecord, ArchiveStore};

fn record(word: &str, reading: &str, meaning: &str) -> ArchiveRecord {
    ArchiveRecord {
        word: word.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
        date: "2024-01-01".to_string(),
    }
}

#[test]
fn missing_store_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(dir.path().join("vocabulary_archive.json"));

    let loaded = store.load().unwrap();
    assert!(loaded.archive.is_empty());
    assert!(!loaded.corrupt);
}

#[test]
fn blank_store_loads_empty_without_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    fs::write(&path, "  \n").unwrap();

    let loaded = ArchiveStore::new(&path).load().unwrap();
    assert!(loaded.archive.is_empty());
    assert!(!loaded.corrupt);
    assert!(path.exists());
}

#[test]
fn corrupt_store_loads_empty_and_leaves_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    fs::write(&path, "[{\"word\": \"猫\",").unwrap();

    let loaded = ArchiveStore::new(&path).load().unwrap();
    assert!(loaded.archive.is_empty());
    assert!(loaded.corrupt);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"word\": \"猫\",");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn back_up_corrupt_copies_file_beside_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    fs::write(&path, "[{\"word\": \"猫\",").unwrap();

    let backup = ArchiveStore::new(&path).back_up_corrupt().unwrap();

    assert!(path.exists());
    assert_eq!(fs::read_to_string(&backup).unwrap(), "[{\"word\": \"猫\",");
    let backup_name = backup.file_name().unwrap().to_string_lossy().into_owned();
    assert!(backup_name.starts_with("vocabulary_archive.json.corrupt-"));
}

#[test]
fn wrong_shape_counts_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    fs::write(&path, r#"{"word": "猫"}"#).unwrap();

    let loaded = ArchiveStore::new(&path).load().unwrap();
    assert!(loaded.corrupt);
    assert!(loaded.archive.is_empty());
}

#[test]
fn invalid_utf8_counts_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    fs::write(&path, [0xff, 0xfe, 0x5b]).unwrap();

    let loaded = ArchiveStore::new(&path).load().unwrap();
    assert!(loaded.corrupt);
}

#[test]
fn staged_archive_persists_pretty_utf8_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    let store = ArchiveStore::new(&path);
    let archive = Archive::from_records(vec![record("犬", "いぬ", "dog")]);

    store.stage(&archive).unwrap().commit().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"word\": \"犬\""));
    assert!(text.contains("\n  {\n    \"word\""));
    assert!(!text.contains("\\u"));

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.archive, archive);
}

#[test]
fn uncommitted_stage_leaves_previous_archive_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    let store = ArchiveStore::new(&path);
    let original = Archive::from_records(vec![record("猫", "ねこ", "cat")]);
    store.stage(&original).unwrap().commit().unwrap();

    let mut grown = original.clone();
    grown.append(record("犬", "いぬ", "dog"));
    drop(store.stage(&grown).unwrap());

    assert_eq!(store.load().unwrap().archive, original);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn loads_archive_written_by_older_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocabulary_archive.json");
    fs::write(
        &path,
        r#"[
  {
    "word": "猫",
    "reading": "ねこ",
    "meaning": "cat",
    "date": "2024-01-01"
  },
  {
    "word": "水",
    "reading": "みず",
    "meaning": "water, fluid, liquid",
    "date": "2024-01-02"
  }
]"#,
    )
    .unwrap();

    let archive = ArchiveStore::new(&path).load().unwrap().archive;
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.records()[1].meaning, "water, fluid, liquid");
}
