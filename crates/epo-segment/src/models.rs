//! Registry segmentation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One identity row fetched from the registry source
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RegistryRow {
    pub dni: String,
    pub fecha_nac: Option<NaiveDate>,
    pub padre: Option<String>,
    pub madre: Option<String>,
    pub ubigeo_nac: Option<String>,
}

/// One row of the ubigeo geographic reference table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UbigeoRow {
    #[sqlx(rename = "Ubigeo")]
    pub ubigeo: String,
    #[sqlx(rename = "Departamento")]
    pub departamento: String,
    #[sqlx(rename = "Provincia")]
    pub provincia: String,
    #[sqlx(rename = "Distrito")]
    pub distrito: String,
}

/// The enriched output record: registry attributes joined with the
/// geographic reference, names reduced to their first token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub dni: String,
    pub fecha_nac: Option<NaiveDate>,
    pub new_padre: String,
    pub new_madre: String,
    pub departamento: String,
    pub provincia: String,
    pub distrito: String,
}

/// First whitespace-delimited token of a name field, empty when the
/// source field is absent
pub fn first_token(value: Option<&str>) -> String {
    value
        .and_then(|v| v.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}
