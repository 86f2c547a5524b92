//! Full workflow: create, populate, save, reopen, intersect, delete.

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use tabledb_core::config::StoreConfig;
use tabledb_core::types::ColumnType;
use tabledb_core::Store;

#[test]
fn test_full_lifecycle() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("crm.db");

    let mut store = Store::new(StoreConfig {
        sync_on_save: false,
        ..Default::default()
    });
    store.create("crm", &path)?;

    store.create_table("customers")?;
    store.create_column("customers", "id", ColumnType::Integer, Vec::new())?;
    store.create_column("customers", "email", ColumnType::Email, Vec::new())?;
    store.create_column("customers", "initial", ColumnType::Char, Vec::new())?;

    store.create_table("subscribers")?;
    store.create_column("subscribers", "email", ColumnType::Email, Vec::new())?;
    store.create_column("subscribers", "score", ColumnType::Real, Vec::new())?;

    for (i, email) in ["ann@mail.com", "bob@mail.com", "cy@mail.org"].iter().enumerate() {
        let row = store.create_row("customers")?;
        store.edit_cell("customers", 0, row, &(i + 1).to_string())?;
        store.edit_cell("customers", 1, row, email)?;
        store.edit_cell("customers", 2, row, &email[..1])?;
    }
    for (email, score) in [("bob@mail.com", "4.5"), ("cy@mail.org", "3")] {
        let row = store.create_row("subscribers")?;
        store.edit_cell("subscribers", 0, row, email)?;
        store.edit_cell("subscribers", 1, row, score)?;
    }

    assert!(store.edit_cell("customers", 1, 0, "not-an-email").is_err());

    store.save()?;

    let mut reopened = Store::default();
    reopened.open(&path)?;
    assert_eq!(reopened.database(), store.database());

    let result = reopened
        .intersect("customers", "subscribers")?
        .expect("tables share the email column");
    let emails: Vec<&str> = result.rows().iter().filter_map(|r| r.get(0)).collect();
    assert_eq!(emails, vec!["bob@mail.com", "cy@mail.org"]);

    reopened.delete_column("customers", 2)?;
    reopened.delete_row("customers", 0)?;
    reopened.delete_table("subscribers")?;
    reopened.save()?;

    let mut third = Store::default();
    third.open(&path)?;
    let customers = third.table("customers")?;
    assert_eq!(customers.column_count(), 2);
    assert_eq!(customers.row_count(), 2);
    assert_eq!(third.table_names()?, vec!["customers"]);

    third.delete()?;
    assert!(!path.exists());
    Ok(())
}
