//! Manufacturer ("montadora") fields. Root of the reference chain.

use super::{Entity, EntityKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "ano_fundacao")]
    pub founded_year: i32,
}

impl Manufacturer {
    pub fn new(name: impl Into<String>, country: impl Into<String>, founded_year: i32) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            founded_year,
        }
    }
}

impl Entity for Manufacturer {
    const KIND: EntityKind = EntityKind::Manufacturer;
}
