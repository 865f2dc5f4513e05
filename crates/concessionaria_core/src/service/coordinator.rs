//! View coordinator: one request-level flow per call.
//!
//! # Responsibility
//! - Map list/create/edit/delete interactions onto a `CrudRepository`.
//! - Return renderer-independent page models or redirect instructions.
//!
//! # Invariants
//! - Flows are stateless; nothing survives between calls.
//! - Repository errors (`NotFound`, `Reference`) are returned unchanged.

use crate::model::manufacturer::Manufacturer;
use crate::model::vehicle_model::VehicleModel;
use crate::model::{Entity, EntityKind, Record, RecordId};
use crate::repo::manufacturer_repo::SqliteManufacturerRepository;
use crate::repo::vehicle_model_repo::SqliteVehicleModelRepository;
use crate::repo::vehicle_repo::SqliteVehicleRepository;
use crate::repo::{CrudRepository, RepoResult};
use rusqlite::Connection;
use std::convert::Infallible;

/// Query parameter appended to list redirects after a delete.
pub const DELETED_QUERY: &str = "deleted=True";

/// Supplies the selectable parent records of a child entity form.
pub trait ParentSource {
    type Parent;
    fn parents(&self) -> RepoResult<Vec<Record<Self::Parent>>>;
}

/// Parent source for root entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParents;

impl ParentSource for NoParents {
    type Parent = Infallible;

    fn parents(&self) -> RepoResult<Vec<Record<Infallible>>> {
        Ok(Vec::new())
    }
}

impl ParentSource for SqliteManufacturerRepository<'_> {
    type Parent = Manufacturer;

    fn parents(&self) -> RepoResult<Vec<Record<Manufacturer>>> {
        self.list_records()
    }
}

impl ParentSource for SqliteVehicleModelRepository<'_> {
    type Parent = VehicleModel;

    fn parents(&self) -> RepoResult<Vec<Record<VehicleModel>>> {
        self.list_records()
    }
}

/// List page model.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<L> {
    pub entity: EntityKind,
    pub items: Vec<L>,
    /// Set when the request arrived through a post-delete redirect.
    pub deleted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// Create/edit form page model.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPage<T, P> {
    pub entity: EntityKind,
    pub mode: FormMode,
    /// Edit: the record being edited. Create: the record just created.
    pub record: Option<Record<T>>,
    /// Valid choices for the foreign-key field; empty for root entities.
    pub parents: Vec<Record<P>>,
    pub success: bool,
}

/// Instruction for the navigation layer to answer with a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    /// Redirect to the entity list, flagged as following a delete.
    pub fn after_delete(entity: EntityKind) -> Self {
        Self {
            location: format!("{}?{DELETED_QUERY}", entity.list_path()),
        }
    }
}

/// Request flows for one entity.
pub struct ViewCoordinator<R, P> {
    repo: R,
    parents: P,
}

pub type ManufacturerFlows<'conn> = ViewCoordinator<SqliteManufacturerRepository<'conn>, NoParents>;
pub type VehicleModelFlows<'conn> =
    ViewCoordinator<SqliteVehicleModelRepository<'conn>, SqliteManufacturerRepository<'conn>>;
pub type VehicleFlows<'conn> =
    ViewCoordinator<SqliteVehicleRepository<'conn>, SqliteVehicleModelRepository<'conn>>;

impl<'conn> ManufacturerFlows<'conn> {
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(SqliteManufacturerRepository::try_new(conn)?, NoParents))
    }
}

impl<'conn> VehicleModelFlows<'conn> {
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteVehicleModelRepository::try_new(conn)?,
            SqliteManufacturerRepository::try_new(conn)?,
        ))
    }
}

impl<'conn> VehicleFlows<'conn> {
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteVehicleRepository::try_new(conn)?,
            SqliteVehicleModelRepository::try_new(conn)?,
        ))
    }
}

impl<R, P> ViewCoordinator<R, P>
where
    R: CrudRepository,
    P: ParentSource,
{
    pub fn new(repo: R, parents: P) -> Self {
        Self { repo, parents }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn entity(&self) -> EntityKind {
        <R::Fields as Entity>::KIND
    }

    pub fn list(&self, deleted: bool) -> RepoResult<ListPage<R::Listing>> {
        Ok(ListPage {
            entity: self.entity(),
            items: self.repo.list_all()?,
            deleted,
        })
    }

    /// Empty create form with the current parent choices.
    pub fn show_create(&self) -> RepoResult<FormPage<R::Fields, P::Parent>> {
        self.form(FormMode::Create, None, false)
    }

    /// Persists a new record and re-renders the create form.
    pub fn submit_create(&self, fields: &R::Fields) -> RepoResult<FormPage<R::Fields, P::Parent>> {
        let created = self.repo.create(fields)?;
        self.form(FormMode::Create, Some(created), true)
    }

    pub fn show_edit(&self, id: RecordId) -> RepoResult<FormPage<R::Fields, P::Parent>> {
        let record = self.repo.get_by_id(id)?;
        self.form(FormMode::Edit(id), Some(record), false)
    }

    /// Replaces every field of `id` and re-renders the edit form.
    pub fn submit_edit(
        &self,
        id: RecordId,
        fields: &R::Fields,
    ) -> RepoResult<FormPage<R::Fields, P::Parent>> {
        let updated = self.repo.update(id, fields)?;
        self.form(FormMode::Edit(id), Some(updated), true)
    }

    pub fn delete(&self, id: RecordId) -> RepoResult<Redirect> {
        self.repo.delete(id)?;
        Ok(Redirect::after_delete(self.entity()))
    }

    fn form(
        &self,
        mode: FormMode,
        record: Option<Record<R::Fields>>,
        success: bool,
    ) -> RepoResult<FormPage<R::Fields, P::Parent>> {
        Ok(FormPage {
            entity: self.entity(),
            mode,
            record,
            parents: self.parents.parents()?,
            success,
        })
    }
}
