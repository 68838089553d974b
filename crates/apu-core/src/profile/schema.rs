use serde::{Deserialize, Serialize};

use crate::model::FlatField;

/// Keyword profile driving flat (price list) extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// A row whose joined text contains any of these is the header row.
    pub header_keywords: Vec<String>,
    pub columns: ColumnKeywords,
}

/// Synonyms that assign a header cell to each flat field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnKeywords {
    pub code: Vec<String>,
    pub description: Vec<String>,
    pub unit: Vec<String>,
    pub price: Vec<String>,
}

impl ColumnKeywords {
    pub fn for_field(&self, field: FlatField) -> &[String] {
        match field {
            FlatField::Code => &self.code,
            FlatField::Description => &self.description,
            FlatField::Unit => &self.unit,
            FlatField::Price => &self.price,
        }
    }
}
