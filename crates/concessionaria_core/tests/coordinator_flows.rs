use concessionaria_core::db::open_db_in_memory;
use concessionaria_core::{
    CrudRepository, EntityKind, FormMode, Manufacturer, ManufacturerFlows, RepoError,
    VehicleFlows, VehicleModel, VehicleModelFlows,
};

fn fiat() -> Manufacturer {
    Manufacturer::new("Fiat", "Italy", 1899)
}

fn uno(manufacturer_id: i64) -> VehicleModel {
    VehicleModel {
        name: "Uno".to_string(),
        manufacturer_id,
        reference_price: 45000.0,
        displacement: 1.0,
        turbo: false,
        automatic: false,
    }
}

#[test]
fn manufacturer_create_flow_reports_success_without_parents() {
    let conn = open_db_in_memory().unwrap();
    let flows = ManufacturerFlows::open(&conn).unwrap();

    let form = flows.show_create().unwrap();
    assert_eq!(form.entity, EntityKind::Manufacturer);
    assert_eq!(form.mode, FormMode::Create);
    assert!(!form.success);
    assert!(form.record.is_none());
    assert!(form.parents.is_empty());

    let submitted = flows.submit_create(&fiat()).unwrap();
    assert!(submitted.success);
    let created = submitted.record.unwrap();
    assert_eq!(created.data, fiat());

    let list = flows.list(false).unwrap();
    assert_eq!(list.items, vec![created]);
    assert!(!list.deleted);
}

#[test]
fn model_create_flow_supplies_manufacturer_choices() {
    let conn = open_db_in_memory().unwrap();
    let manufacturer = ManufacturerFlows::open(&conn)
        .unwrap()
        .repository()
        .create(&fiat())
        .unwrap();
    let flows = VehicleModelFlows::open(&conn).unwrap();

    let form = flows.show_create().unwrap();
    assert_eq!(form.parents, vec![manufacturer.clone()]);

    let submitted = flows.submit_create(&uno(manufacturer.id)).unwrap();
    assert!(submitted.success);
    assert_eq!(submitted.parents, vec![manufacturer]);
}

#[test]
fn model_create_flow_surfaces_reference_error() {
    let conn = open_db_in_memory().unwrap();
    let flows = VehicleModelFlows::open(&conn).unwrap();

    let err = flows.submit_create(&uno(999)).unwrap_err();
    assert!(matches!(err, RepoError::Reference { id: 999, .. }));
}

#[test]
fn edit_flow_loads_record_and_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let flows = ManufacturerFlows::open(&conn).unwrap();
    let created = flows.submit_create(&fiat()).unwrap().record.unwrap();

    let form = flows.show_edit(created.id).unwrap();
    assert_eq!(form.mode, FormMode::Edit(created.id));
    assert_eq!(form.record.as_ref(), Some(&created));

    let renamed = Manufacturer::new("Stellantis", "Netherlands", 2021);
    let saved = flows.submit_edit(created.id, &renamed).unwrap();
    assert!(saved.success);
    assert_eq!(saved.record.unwrap().data, renamed);

    assert!(matches!(
        flows.show_edit(404),
        Err(RepoError::NotFound { id: 404, .. })
    ));
    assert!(matches!(
        flows.submit_edit(404, &renamed),
        Err(RepoError::NotFound { id: 404, .. })
    ));
}

#[test]
fn delete_flow_redirects_to_list_with_deleted_flag() {
    let conn = open_db_in_memory().unwrap();
    let manufacturer = ManufacturerFlows::open(&conn)
        .unwrap()
        .submit_create(&fiat())
        .unwrap()
        .record
        .unwrap();
    let model = VehicleModelFlows::open(&conn)
        .unwrap()
        .submit_create(&uno(manufacturer.id))
        .unwrap()
        .record
        .unwrap();

    let flows = VehicleModelFlows::open(&conn).unwrap();
    let redirect = flows.delete(model.id).unwrap();
    assert_eq!(redirect.location, "/modelos_veiculo?deleted=True");

    assert!(matches!(
        flows.delete(model.id),
        Err(RepoError::NotFound { .. })
    ));
    assert!(flows.list(true).unwrap().deleted);
}

#[test]
fn vehicle_form_offers_models_as_parents() {
    let conn = open_db_in_memory().unwrap();
    let manufacturer = ManufacturerFlows::open(&conn)
        .unwrap()
        .submit_create(&fiat())
        .unwrap()
        .record
        .unwrap();
    let model = VehicleModelFlows::open(&conn)
        .unwrap()
        .submit_create(&uno(manufacturer.id))
        .unwrap()
        .record
        .unwrap();

    let form = VehicleFlows::open(&conn).unwrap().show_create().unwrap();
    assert_eq!(form.entity, EntityKind::Vehicle);
    assert_eq!(form.parents, vec![model]);
}
