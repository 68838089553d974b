pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod session;

use error::ApuError;
use extraction::RowSource;
use model::{Card, FlatRecord, Row};
use parsing::flat::ColumnMapping;
use profile::schema::FlatProfile;

/// Main API entry point: read a document and rebuild its analysis cards.
///
/// Extraction failures propagate; the parse itself never fails and yields
/// an empty list for documents without any card marker.
pub fn parse_cards_from(bytes: &[u8], source: &dyn RowSource) -> Result<Vec<Card>, ApuError> {
    let rows = source.read_rows(bytes)?;
    let cards = parsing::parse_cards(&rows);
    tracing::info!(
        backend = source.backend_name(),
        rows = rows.len(),
        cards = cards.len(),
        "cards parsed"
    );
    Ok(cards)
}

/// Read a flat price list, detecting the header and columns with `profile`.
pub fn extract_flat_from(
    bytes: &[u8],
    source: &dyn RowSource,
    profile: &FlatProfile,
) -> Result<Vec<FlatRecord>, ApuError> {
    let rows = source.read_rows(bytes)?;
    let records = parsing::extract_flat(&rows, profile);
    tracing::info!(
        backend = source.backend_name(),
        profile = %profile.name,
        records = records.len(),
        "flat records extracted"
    );
    Ok(records)
}

/// Read a flat price list with a caller-supplied column mapping.
///
/// The header row is still located with `profile`; only the column
/// assignment is replaced. Documents without a header yield no records.
pub fn extract_flat_mapped(
    bytes: &[u8],
    source: &dyn RowSource,
    profile: &FlatProfile,
    mapping: &ColumnMapping,
) -> Result<Vec<FlatRecord>, ApuError> {
    let rows = source.read_rows(bytes)?;
    let Some(header) = parsing::find_headers(&rows, profile) else {
        tracing::warn!(rows = rows.len(), "no header row found, nothing extracted");
        return Ok(Vec::new());
    };
    Ok(parsing::map_flat_columns_with(&rows, header.index, mapping))
}

/// Locate the flat header row of a document, returning its index and cells.
pub fn detect_header(
    bytes: &[u8],
    source: &dyn RowSource,
    profile: &FlatProfile,
) -> Result<Option<(usize, Row)>, ApuError> {
    let rows = source.read_rows(bytes)?;
    Ok(parsing::find_headers(&rows, profile).map(|h| (h.index, h.cells.to_vec())))
}
