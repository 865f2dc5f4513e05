//! Vehicle model ("modelo de veículo") fields.
//!
//! # Invariants
//! - `manufacturer_id` must name an existing manufacturer at write time.

use super::{Entity, EntityKind, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleModel {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "montadora_id")]
    pub manufacturer_id: RecordId,
    /// Reference (list) price.
    #[serde(rename = "valor_referencia")]
    pub reference_price: f64,
    /// Engine displacement in litres.
    #[serde(rename = "motorizacao")]
    pub displacement: f64,
    pub turbo: bool,
    #[serde(rename = "automatico")]
    pub automatic: bool,
}

impl Entity for VehicleModel {
    const KIND: EntityKind = EntityKind::VehicleModel;
}
