//! Persistence through the store: save, open, delete, and failure handling.

use std::fs;

use ntest::timeout;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use tabledb_core::types::ColumnType;
use tabledb_core::{ErrorCategory, Store, StoreError};

use super::helpers::{add_people_table, row_values};

#[timeout(1000)]
#[test]
fn test_save_then_open_restores_database() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("people.db");

    let mut store = Store::default();
    store.create("people", &path).unwrap();
    add_people_table(&mut store, "staff", &[("1", "ann"), ("2", "bob")]);
    store
        .create_column(
            "staff",
            "level",
            ColumnType::Enum,
            vec!["junior".to_string(), "senior".to_string()],
        )
        .unwrap();
    store.edit_cell("staff", 2, 1, "senior").unwrap();
    store.create_table("empty").unwrap();
    store.save().unwrap();

    let mut reopened = Store::default();
    reopened.open(&path).unwrap();

    assert_eq!(reopened.database(), store.database());
    assert_eq!(
        row_values(&reopened, "staff"),
        vec![vec!["1", "ann", ""], vec!["2", "bob", "senior"]]
    );
}

#[timeout(1000)]
#[test]
fn test_saved_file_layout() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("layout.db");

    let mut store = Store::default();
    store.create("layout", &path).unwrap();
    add_people_table(&mut store, "t", &[("7", "x")]);
    store.save().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "layout\nt\nid\tInteger\t%name\tString\t%\n7\tx\n$\n"
    );
}

#[timeout(1000)]
#[test]
fn test_failed_open_keeps_previous_database() {
    let temp_dir = tempdir().unwrap();
    let mut store = Store::default();
    store.create("current", temp_dir.path().join("current.db")).unwrap();
    store.create_table("kept").unwrap();

    let err = store.open(temp_dir.path().join("missing.db")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Io);
    assert_eq!(store.database().unwrap().name, "current");
    assert_eq!(store.table_names().unwrap(), vec!["kept"]);

    let corrupt = temp_dir.path().join("corrupt.db");
    fs::write(&corrupt, "bad\nt\nid\tNoSuchType\t%\n$\n").unwrap();
    assert!(matches!(
        store.open(&corrupt),
        Err(StoreError::DataCorruption(_))
    ));
    assert_eq!(store.database().unwrap().name, "current");
}

#[timeout(1000)]
#[test]
fn test_open_replaces_active_database() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("other.db");
    fs::write(&path, "other\nt\n\n$\n").unwrap();

    let mut store = Store::default();
    store.create("first", temp_dir.path().join("first.db")).unwrap();
    store.open(&path).unwrap();

    let db = store.database().unwrap();
    assert_eq!(db.name, "other");
    assert_eq!(db.path, path);
    assert_eq!(db.table_names(), vec!["t"]);
}

#[timeout(1000)]
#[test]
fn test_delete_removes_file_and_database() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("doomed.db");

    let mut store = Store::default();
    store.create("doomed", &path).unwrap();
    store.save().unwrap();
    assert!(path.exists());

    store.delete().unwrap();

    assert!(!path.exists());
    assert!(!store.is_open());
    assert_eq!(store.delete(), Err(StoreError::NoActiveDatabase));
}

#[timeout(1000)]
#[test]
fn test_delete_unsaved_database() {
    let temp_dir = tempdir().unwrap();
    let mut store = Store::default();
    store.create("never-saved", temp_dir.path().join("never.db")).unwrap();

    store.delete().unwrap();
    assert!(!store.is_open());
}

#[timeout(1000)]
#[test]
fn test_save_to_unwritable_path_fails() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("no-such-dir").join("x.db");

    let mut store = Store::default();
    store.create("x", &path).unwrap();

    let err = store.save().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Io);
    assert!(store.is_open());
}

#[timeout(1000)]
#[test]
fn test_failed_save_keeps_previous_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("people.db");

    let mut store = Store::default();
    store.create("people", &path).unwrap();
    add_people_table(&mut store, "people", &[("1", "Ann")]);
    store.save().unwrap();
    let before = fs::read_to_string(&path).unwrap();

    // A directory in the way of the scratch file makes the next save fail
    fs::create_dir(temp_dir.path().join("people.db.tmp")).unwrap();
    store.create_row("people").unwrap();

    let err = store.save().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Io);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    let mut reopened = Store::default();
    reopened.open(&path).unwrap();
    assert_eq!(reopened.table("people").unwrap().row_count(), 1);
}
