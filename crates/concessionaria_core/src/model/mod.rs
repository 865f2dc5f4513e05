//! Dealership record shapes.
//!
//! # Responsibility
//! - Define the field data of manufacturers, vehicle models and vehicles.
//! - Describe the reference chain `Manufacturer <- VehicleModel <- Vehicle`.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - Field structs never carry an identifier; `Record<T>` pairs them.

pub mod manufacturer;
pub mod vehicle;
pub mod vehicle_model;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned surrogate key shared by every entity.
pub type RecordId = i64;

/// A persisted entity: storage identifier plus the full field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: RecordId, data: T) -> Self {
        Self { id, data }
    }
}

/// The three managed entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Manufacturer,
    VehicleModel,
    Vehicle,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Manufacturer => "montadora",
            Self::VehicleModel => "modeloveiculo",
            Self::Vehicle => "veiculo",
        }
    }

    /// Route prefix of the entity's list page.
    pub fn list_path(self) -> &'static str {
        match self {
            Self::Manufacturer => "/montadoras",
            Self::VehicleModel => "/modelos_veiculo",
            Self::Vehicle => "/veiculos",
        }
    }

    /// Singular user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manufacturer => "Montadora",
            Self::VehicleModel => "Modelo de Veículo",
            Self::Vehicle => "Veículo",
        }
    }

    /// Plural user-facing label used as list page title.
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Manufacturer => "Montadoras",
            Self::VehicleModel => "Modelos de Veículo",
            Self::Vehicle => "Veículos",
        }
    }

    /// Human-readable reason returned with 404 responses.
    pub fn not_found_message(self) -> &'static str {
        match self {
            Self::Manufacturer => "Montadora não encontrada",
            Self::VehicleModel => "Modelo de Veículo não encontrado",
            Self::Vehicle => "Veículo não encontrado",
        }
    }

    /// Entity referenced through this entity's foreign key, if any.
    pub fn parent(self) -> Option<EntityKind> {
        match self {
            Self::Manufacturer => None,
            Self::VehicleModel => Some(Self::Manufacturer),
            Self::Vehicle => Some(Self::VehicleModel),
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// Field data type bound to one entity kind.
pub trait Entity {
    const KIND: EntityKind;
}
