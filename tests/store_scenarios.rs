//! End-to-end scenarios for the task store against a real file.

use std::fs;
use tasklist::{StoreError, Task, TaskStore};
use tempfile::TempDir;

fn snapshot(store: &TaskStore) -> Vec<(String, bool)> {
    store
        .list()
        .iter()
        .map(|t| (t.description.clone(), t.done))
        .collect()
}

#[test]
fn round_trip_preserves_descriptions_flags_and_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::new(&path);
    for d in ["write report", "call \"mom\"", "write report", "ünïcödé ✓"] {
        store.add(d).unwrap();
    }
    store.mark_done(&[2, 4]).unwrap();
    store.save().unwrap();
    let expected = snapshot(&store);

    let reloaded = TaskStore::load(&path).unwrap();
    assert_eq!(snapshot(&reloaded), expected);

    reloaded.save().unwrap();
    let again = TaskStore::load(&path).unwrap();
    assert_eq!(snapshot(&again), expected);
}

#[test]
fn reads_files_written_in_the_legacy_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(
        &path,
        "[\n    {\n        \"task\": \"Buy milk\",\n        \"done\": true\n    }\n]",
    )
    .unwrap();

    let store = TaskStore::load(&path).unwrap();
    assert_eq!(
        store.list(),
        &[Task {
            description: "Buy milk".to_string(),
            done: true
        }]
    );
}

#[test]
fn malformed_file_is_replaced_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "[{\"task\": \"truncated\"").unwrap();

    let mut store = TaskStore::load(&path).unwrap();
    assert!(store.is_empty());
    assert!(store.recovered_from_malformed());

    store.add("fresh start").unwrap();
    store.save().unwrap();
    let reloaded = TaskStore::load(&path).unwrap();
    assert_eq!(snapshot(&reloaded), vec![("fresh start".to_string(), false)]);
}

#[test]
fn buy_milk_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut store = TaskStore::load(dir.path().join("tasks.json")).unwrap();
    assert!(store.is_empty());

    store.add("Buy milk").unwrap();
    assert_eq!(snapshot(&store), vec![("Buy milk".to_string(), false)]);

    store.mark_done(&[1]).unwrap();
    assert_eq!(snapshot(&store), vec![("Buy milk".to_string(), true)]);

    assert_eq!(store.delete(1).unwrap(), "Buy milk");
    assert!(store.list().is_empty());
}

#[test]
fn deleting_the_middle_of_three() {
    let mut store = TaskStore::new("unused.json");
    store.add("first").unwrap();
    store.add("second").unwrap();
    store.add("third").unwrap();
    store.mark_done(&[1]).unwrap();

    assert_eq!(store.delete(2).unwrap(), "second");
    assert_eq!(
        snapshot(&store),
        vec![("first".to_string(), true), ("third".to_string(), false)]
    );
}

#[test]
fn validation_failures_leave_the_list_alone() {
    let mut store = TaskStore::new("unused.json");
    store.add("only").unwrap();
    let before = snapshot(&store);

    for err in [
        store.add("   ").unwrap_err(),
        store.mark_done(&[2]).unwrap_err(),
        store.delete(5).unwrap_err(),
    ] {
        assert!(err.is_validation(), "{err}");
    }
    assert_eq!(snapshot(&store), before);
    assert!(matches!(
        store.delete(0),
        Err(StoreError::IndexOutOfRange { index: 0, len: 1 })
    ));
}
