use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of raw cells as produced by a row source. Column count varies
/// from row to row.
pub type Row = Vec<String>;

/// A reconstructed unit price analysis record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub clave: String,
    pub descripcion: String,
    pub unidad: String,
    /// `None` when the card has no JORNADA row, `Some("")` when the row
    /// exists but the value is blank.
    pub jornada: Option<String>,
    pub rendimiento: Option<String>,
    pub recursos: Vec<Resource>,
}

/// A material, labor or equipment line nested under a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub clave: String,
    pub descripcion: String,
    pub unidad: String,
    pub cantidad: String,
    pub precio: String,
}

/// A row of a plain price list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub codigo: String,
    pub descripcion: String,
    pub unidad: String,
    pub precio: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatField {
    Code,
    Description,
    Unit,
    Price,
}

impl FlatField {
    /// Fields in column-assignment priority order.
    pub const ALL: [FlatField; 4] = [
        FlatField::Code,
        FlatField::Description,
        FlatField::Unit,
        FlatField::Price,
    ];

    /// Column label used in the persisted flat table.
    pub fn label(self) -> &'static str {
        match self {
            FlatField::Code => "Código",
            FlatField::Description => "Descripción",
            FlatField::Unit => "Unidad",
            FlatField::Price => "Precio",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<FlatField> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "code" | "codigo" | "código" | "clave" => Some(FlatField::Code),
            "description" | "descripcion" | "descripción" => Some(FlatField::Description),
            "unit" | "unidad" => Some(FlatField::Unit),
            "price" | "precio" => Some(FlatField::Price),
            _ => None,
        }
    }
}

impl fmt::Display for FlatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatField::Code => write!(f, "code"),
            FlatField::Description => write!(f, "description"),
            FlatField::Unit => write!(f, "unit"),
            FlatField::Price => write!(f, "price"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_labor_fields_serialize_as_null() {
        let card = Card {
            clave: "C-01".into(),
            jornada: Some(String::new()),
            ..Default::default()
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["jornada"], serde_json::json!(""));
        assert!(json["rendimiento"].is_null());
    }

    #[test]
    fn flat_field_loose_names() {
        assert_eq!(FlatField::from_str_loose(" Código "), Some(FlatField::Code));
        assert_eq!(FlatField::from_str_loose("PRICE"), Some(FlatField::Price));
        assert_eq!(FlatField::from_str_loose("total"), None);
    }
}
