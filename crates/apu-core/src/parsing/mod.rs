//! Row-sequence parsers.
//!
//! `cards` rebuilds nested unit price analysis cards from a marker-delimited
//! row stream; `flat` handles plain price lists with a single header row.

pub mod cards;
pub mod flat;
pub mod labor;
pub mod resource;

pub use cards::{is_marker, parse_cards, CardParser, CARD_MARKER};
pub use flat::{extract_flat, find_headers, map_flat_columns, map_flat_columns_with, ColumnMapping};
pub use labor::{LaborFields, LaborRowClassifier, TokenLaborClassifier};
pub use resource::{is_resource_key, parse_resource};
