//! Vehicle ("veículo") fields: one physical unit of a vehicle model.
//!
//! # Invariants
//! - `model_id` must name an existing vehicle model at write time.
//! - No semantic checks: years, price and plate are stored as given.

use super::{Entity, EntityKind, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "modelo_id")]
    pub model_id: RecordId,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "ano_fabricacao")]
    pub manufacture_year: i32,
    #[serde(rename = "ano_modelo")]
    pub model_year: i32,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(rename = "placa")]
    pub license_plate: String,
    #[serde(rename = "vendido")]
    pub sold: bool,
}

impl Entity for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;
}
