//! Portability record models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker phrase the upstream robot prints when a number has no
/// portability history. Lines carrying it become not-found records and
/// are dropped again during cleaning.
pub const NOT_FOUND_MARKER: &str = "No se encontraron resultados";

/// Status assigned to truncated lines that still carry a number token
pub const PARTIAL_STATUS: &str = "Línea procesada parcialmente";

/// Sentinel used by the exports for "no data"
pub const NA: &str = "N/A";

/// A record parsed from one line of a portability export, before
/// cleaning. All fields are raw text; absent fields hold [`NA`].
///
/// Invariant: `numero` is non-empty and all-digits. The extractor
/// never emits a record that violates this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub fecha_procesamiento: String,
    pub numero: String,
    pub receptor: String,
    pub cedente: String,
    pub asignatario_original: String,
    pub fecha_ventana: String,
    pub estado: String,
}

impl CandidateRecord {
    /// Build a record carrying only a number and a status, with every
    /// other field set to the [`NA`] sentinel
    pub fn number_only(numero: impl Into<String>, estado: impl Into<String>) -> Self {
        Self {
            fecha_procesamiento: NA.to_string(),
            numero: numero.into(),
            receptor: NA.to_string(),
            cedente: NA.to_string(),
            asignatario_original: NA.to_string(),
            fecha_ventana: NA.to_string(),
            estado: estado.into(),
        }
    }

    /// Whether this record came from a not-found banner
    pub fn is_not_found(&self) -> bool {
        self.estado.contains(NOT_FOUND_MARKER)
    }
}

/// A portability record after cleaning: deduplicated, typed, with
/// sentinels normalized to `None`. Matches the `bot_moviles` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub fecha_procesamiento: Option<NaiveDate>,
    pub numero: String,
    pub receptor: Option<String>,
    pub cedente: Option<String>,
    pub asignatario_original: Option<String>,
    pub fecha_ventana: Option<NaiveDate>,
    pub estado: Option<String>,
    /// Whole days between the cleaning date and `fecha_ventana`;
    /// `None` whenever the window date failed to parse
    pub dias_permanencia: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_only_fills_sentinels() {
        let record = CandidateRecord::number_only("987654321", NOT_FOUND_MARKER);
        assert_eq!(record.numero, "987654321");
        assert_eq!(record.fecha_procesamiento, NA);
        assert_eq!(record.fecha_ventana, NA);
        assert!(record.is_not_found());
    }

    #[test]
    fn test_is_not_found_on_partial() {
        let record = CandidateRecord::number_only("987654321", PARTIAL_STATUS);
        assert!(!record.is_not_found());
    }
}
