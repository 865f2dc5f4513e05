//! Submitted form shapes and their conversion into record fields.
//!
//! # Invariants
//! - Every non-boolean field is required; absence rejects the request.
//! - Boolean fields are checkboxes: absent means `false`.

use concessionaria_core::{Manufacturer, RecordId, Vehicle, VehicleModel};
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Parses one checkbox value.
///
/// Browsers send `on` for a ticked checkbox and nothing for an unticked one;
/// the missing case is covered by `#[serde(default)]` on the field.
pub fn parse_form_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn form_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_form_bool(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid boolean value `{raw}`")))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManufacturerForm {
    pub nome: String,
    pub pais: String,
    pub ano_fundacao: i32,
}

impl From<ManufacturerForm> for Manufacturer {
    fn from(form: ManufacturerForm) -> Self {
        Manufacturer {
            name: form.nome,
            country: form.pais,
            founded_year: form.ano_fundacao,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleModelForm {
    pub nome: String,
    pub montadora_id: RecordId,
    pub valor_referencia: f64,
    pub motorizacao: f64,
    #[serde(default, deserialize_with = "form_bool")]
    pub turbo: bool,
    #[serde(default, deserialize_with = "form_bool")]
    pub automatico: bool,
}

impl From<VehicleModelForm> for VehicleModel {
    fn from(form: VehicleModelForm) -> Self {
        VehicleModel {
            name: form.nome,
            manufacturer_id: form.montadora_id,
            reference_price: form.valor_referencia,
            displacement: form.motorizacao,
            turbo: form.turbo,
            automatic: form.automatico,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleForm {
    pub modelo_id: RecordId,
    pub cor: String,
    pub ano_fabricacao: i32,
    pub ano_modelo: i32,
    pub valor: f64,
    pub placa: String,
    #[serde(default, deserialize_with = "form_bool")]
    pub vendido: bool,
}

impl From<VehicleForm> for Vehicle {
    fn from(form: VehicleForm) -> Self {
        Vehicle {
            model_id: form.modelo_id,
            color: form.cor,
            manufacture_year: form.ano_fabricacao,
            model_year: form.ano_modelo,
            price: form.valor,
            license_plate: form.placa,
            sold: form.vendido,
        }
    }
}

/// Query string of list pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub deleted: Option<String>,
}

impl ListQuery {
    /// `true` after the post-delete redirect (`?deleted=True`).
    pub fn deleted(&self) -> bool {
        self.deleted
            .as_deref()
            .and_then(parse_form_bool)
            .unwrap_or(false)
    }
}
