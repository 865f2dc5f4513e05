//! Core records and persistence for the dealership record manager.
//! This crate owns the schema, referential checks and request flows.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, Storage};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::manufacturer::Manufacturer;
pub use model::vehicle::Vehicle;
pub use model::vehicle_model::VehicleModel;
pub use model::{Entity, EntityKind, Record, RecordId};
pub use repo::manufacturer_repo::SqliteManufacturerRepository;
pub use repo::vehicle_model_repo::{SqliteVehicleModelRepository, VehicleModelListing};
pub use repo::vehicle_repo::{SqliteVehicleRepository, VehicleListing};
pub use repo::{CrudRepository, RepoError, RepoResult};
pub use service::coordinator::{
    FormMode, FormPage, ListPage, ManufacturerFlows, NoParents, ParentSource, Redirect,
    VehicleFlows, VehicleModelFlows, ViewCoordinator, DELETED_QUERY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
