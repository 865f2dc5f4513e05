use concessionaria_core::db::migrations::latest_version;
use concessionaria_core::db::open_db_in_memory;
use concessionaria_core::{
    CrudRepository, EntityKind, Manufacturer, Record, RepoError, SqliteManufacturerRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn toyota() -> Manufacturer {
    Manufacturer::new("Toyota", "Japan", 1937)
}

#[test]
fn create_assigns_id_and_get_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();

    let created = repo.create(&toyota()).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.data, toyota());

    let loaded = repo.get_by_id(created.id).unwrap();
    assert_eq!(loaded, Record::new(created.id, toyota()));
}

#[test]
fn get_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();

    let err = repo.get_by_id(42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Manufacturer,
            id: 42
        }
    ));
}

#[test]
fn update_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();
    let created = repo.create(&toyota()).unwrap();

    let replacement = Manufacturer::new("Honda", "Japão", 1948);
    let updated = repo.update(created.id, &replacement).unwrap();
    assert_eq!(updated, Record::new(created.id, replacement.clone()));

    let loaded = repo.get_by_id(created.id).unwrap();
    assert_eq!(loaded.data, replacement);
}

#[test]
fn update_and_delete_missing_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();

    let update_err = repo.update(7, &toyota()).unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound { id: 7, .. }));

    let delete_err = repo.delete(7).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound { id: 7, .. }));
}

#[test]
fn delete_is_not_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();
    let created = repo.create(&toyota()).unwrap();

    repo.delete(created.id).unwrap();

    let err = repo.delete(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id, .. } if id == created.id));
    assert!(matches!(
        repo.get_by_id(created.id),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn ids_are_never_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();

    let mut seen = HashSet::new();
    for round in 0..3 {
        let first = repo.create(&toyota()).unwrap();
        let second = repo
            .create(&Manufacturer::new("Fiat", "Italy", 1899 + round))
            .unwrap();
        assert!(seen.insert(first.id));
        assert!(seen.insert(second.id));
        repo.delete(second.id).unwrap();
    }
    let last = repo.create(&toyota()).unwrap();
    assert!(seen.insert(last.id));
}

#[test]
fn list_all_returns_every_record_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteManufacturerRepository::try_new(&conn).unwrap();
    let a = repo.create(&toyota()).unwrap();
    let b = repo
        .create(&Manufacturer::new("Volkswagen", "Germany", 1937))
        .unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all, vec![a, b]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteManufacturerRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE montadora (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            pais TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteManufacturerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "montadora",
            column: "ano_fundacao"
        })
    ));
}

#[test]
fn repository_rejects_connection_without_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteManufacturerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("montadora"))
    ));
}

#[test]
fn record_serializes_with_column_names() {
    let record = Record::new(3, toyota());
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": 3,
            "nome": "Toyota",
            "pais": "Japan",
            "ano_fundacao": 1937
        })
    );
}
