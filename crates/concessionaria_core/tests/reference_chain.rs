use concessionaria_core::db::open_db_in_memory;
use concessionaria_core::{
    CrudRepository, EntityKind, Manufacturer, Record, RepoError, SqliteManufacturerRepository,
    SqliteVehicleModelRepository, SqliteVehicleRepository, Vehicle, VehicleModel,
};
use rusqlite::Connection;

fn corolla(manufacturer_id: i64) -> VehicleModel {
    VehicleModel {
        name: "Corolla".to_string(),
        manufacturer_id,
        reference_price: 25000.0,
        displacement: 2.0,
        turbo: false,
        automatic: true,
    }
}

fn vehicle(model_id: i64) -> Vehicle {
    Vehicle {
        model_id,
        color: "Prata".to_string(),
        manufacture_year: 2022,
        model_year: 2023,
        price: 118_900.5,
        license_plate: "BRA2E19".to_string(),
        sold: false,
    }
}

fn seed_manufacturer(conn: &Connection) -> Record<Manufacturer> {
    let repo = SqliteManufacturerRepository::try_new(conn).unwrap();
    repo.create(&Manufacturer::new("Toyota", "Japan", 1937))
        .unwrap()
}

#[test]
fn create_model_with_existing_manufacturer_keeps_reference() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let repo = SqliteVehicleModelRepository::try_new(&conn).unwrap();

    let created = repo.create(&corolla(toyota.id)).unwrap();
    assert_eq!(created.data.manufacturer_id, toyota.id);

    let loaded = repo.get_by_id(created.id).unwrap();
    assert_eq!(loaded, Record::new(created.id, corolla(toyota.id)));
}

#[test]
fn create_model_with_missing_manufacturer_is_reference_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVehicleModelRepository::try_new(&conn).unwrap();

    let err = repo.create(&corolla(999)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Reference {
            entity: EntityKind::Manufacturer,
            id: 999
        }
    ));
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn update_model_checks_existence_before_reference() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let repo = SqliteVehicleModelRepository::try_new(&conn).unwrap();

    let missing = repo.update(5, &corolla(999)).unwrap_err();
    assert!(matches!(missing, RepoError::NotFound { id: 5, .. }));

    let created = repo.create(&corolla(toyota.id)).unwrap();
    let dangling = repo.update(created.id, &corolla(999)).unwrap_err();
    assert!(matches!(dangling, RepoError::Reference { id: 999, .. }));

    let unchanged = repo.get_by_id(created.id).unwrap();
    assert_eq!(unchanged.data, corolla(toyota.id));
}

#[test]
fn update_model_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let honda = SqliteManufacturerRepository::try_new(&conn)
        .unwrap()
        .create(&Manufacturer::new("Honda", "Japan", 1948))
        .unwrap();
    let repo = SqliteVehicleModelRepository::try_new(&conn).unwrap();
    let created = repo.create(&corolla(toyota.id)).unwrap();

    let civic = VehicleModel {
        name: "Civic".to_string(),
        manufacturer_id: honda.id,
        reference_price: 31000.0,
        displacement: 1.5,
        turbo: true,
        automatic: false,
    };
    repo.update(created.id, &civic).unwrap();

    assert_eq!(repo.get_by_id(created.id).unwrap().data, civic);
}

#[test]
fn list_models_is_enriched_with_manufacturer() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let repo = SqliteVehicleModelRepository::try_new(&conn).unwrap();
    let created = repo.create(&corolla(toyota.id)).unwrap();

    let listings = repo.list_all().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].model, created);
    assert_eq!(listings[0].manufacturer.as_ref(), Some(&toyota));
}

#[test]
fn deleting_referenced_manufacturer_leaves_dangling_model() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let manufacturers = SqliteManufacturerRepository::try_new(&conn).unwrap();
    let models = SqliteVehicleModelRepository::try_new(&conn).unwrap();
    let created = models.create(&corolla(toyota.id)).unwrap();

    manufacturers.delete(toyota.id).unwrap();

    let listings = models.list_all().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].model, created);
    assert!(listings[0].manufacturer.is_none());
    assert_eq!(
        models.get_by_id(created.id).unwrap().data.manufacturer_id,
        toyota.id
    );
}

#[test]
fn create_vehicle_requires_existing_model() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let model = SqliteVehicleModelRepository::try_new(&conn)
        .unwrap()
        .create(&corolla(toyota.id))
        .unwrap();
    let repo = SqliteVehicleRepository::try_new(&conn).unwrap();

    let err = repo.create(&vehicle(model.id + 100)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Reference {
            entity: EntityKind::VehicleModel,
            ..
        }
    ));

    let created = repo.create(&vehicle(model.id)).unwrap();
    assert_eq!(created.data.model_id, model.id);
    assert_eq!(repo.get_by_id(created.id).unwrap(), created);
}

#[test]
fn vehicle_update_replaces_fields_and_list_is_enriched_with_model() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let model = SqliteVehicleModelRepository::try_new(&conn)
        .unwrap()
        .create(&corolla(toyota.id))
        .unwrap();
    let repo = SqliteVehicleRepository::try_new(&conn).unwrap();
    let created = repo.create(&vehicle(model.id)).unwrap();

    let sold = Vehicle {
        color: "Preto".to_string(),
        price: 99_000.0,
        license_plate: "XYZ1A23".to_string(),
        sold: true,
        ..vehicle(model.id)
    };
    repo.update(created.id, &sold).unwrap();

    let listings = repo.list_all().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].vehicle, Record::new(created.id, sold));
    assert_eq!(listings[0].model.as_ref(), Some(&model));
}

#[test]
fn vehicle_missing_ids_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVehicleRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.get_by_id(1),
        Err(RepoError::NotFound {
            entity: EntityKind::Vehicle,
            id: 1
        })
    ));
    assert!(matches!(
        repo.update(1, &vehicle(1)),
        Err(RepoError::NotFound { .. })
    ));
    assert!(matches!(repo.delete(1), Err(RepoError::NotFound { .. })));
}

#[test]
fn invalid_persisted_boolean_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let toyota = seed_manufacturer(&conn);
    let model = SqliteVehicleModelRepository::try_new(&conn)
        .unwrap()
        .create(&corolla(toyota.id))
        .unwrap();
    let repo = SqliteVehicleRepository::try_new(&conn).unwrap();
    let created = repo.create(&vehicle(model.id)).unwrap();

    conn.execute("UPDATE veiculo SET vendido = 7 WHERE id = ?1;", [created.id])
        .unwrap();

    let err = repo.get_by_id(created.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("veiculo.vendido")));
}
