use crate::error::ApuError;
use crate::model::{FlatField, FlatRecord, Row};
use crate::profile::builtin::default_profile;
use crate::profile::schema::FlatProfile;

/// The detected header row of a flat price list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    pub index: usize,
    pub cells: &'a [String],
}

/// Find the first row whose joined text contains any header keyword.
///
/// `None` means the document has nothing extractable in flat mode.
pub fn find_headers<'a>(rows: &'a [Row], profile: &FlatProfile) -> Option<HeaderMatch<'a>> {
    rows.iter().enumerate().find_map(|(index, row)| {
        let text = row.join(" ");
        profile
            .header_keywords
            .iter()
            .any(|k| text.contains(k.as_str()))
            .then_some(HeaderMatch { index, cells: row })
    })
}

/// Column index of each flat field; `None` leaves the field empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub code: Option<usize>,
    pub description: Option<usize>,
    pub unit: Option<usize>,
    pub price: Option<usize>,
}

impl ColumnMapping {
    /// Map header cells to fields by keyword.
    ///
    /// Columns are scanned left to right. A column goes to the first field
    /// (code, description, unit, price) with a synonym contained in its
    /// text; a later column matching the same field replaces the earlier one.
    pub fn detect(header: &[String], profile: &FlatProfile) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();
        for (idx, cell) in header.iter().enumerate() {
            let field = FlatField::ALL.into_iter().find(|&field| {
                profile
                    .columns
                    .for_field(field)
                    .iter()
                    .any(|k| cell.contains(k.as_str()))
            });
            if let Some(field) = field {
                mapping.set(field, idx);
            }
        }
        mapping
    }

    /// Parse a manual mapping such as `code=0,description=2,price=5`.
    ///
    /// Field names accept English or Spanish labels. Fields left out stay
    /// unassigned.
    pub fn parse_manual(text: &str) -> Result<ColumnMapping, ApuError> {
        let mut mapping = ColumnMapping::default();
        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, idx) = part.split_once('=').ok_or_else(|| {
                ApuError::ColumnMapping(format!("expected FIELD=INDEX, got '{part}'"))
            })?;
            let field = FlatField::from_str_loose(name).ok_or_else(|| {
                ApuError::ColumnMapping(format!("unknown field '{}'", name.trim()))
            })?;
            let idx: usize = idx.trim().parse().map_err(|_| {
                ApuError::ColumnMapping(format!("invalid column index '{}'", idx.trim()))
            })?;
            if mapping.get(field).is_some() {
                return Err(ApuError::ColumnMapping(format!(
                    "field '{field}' assigned more than once"
                )));
            }
            mapping.set(field, idx);
        }
        Ok(mapping)
    }

    pub fn get(&self, field: FlatField) -> Option<usize> {
        match field {
            FlatField::Code => self.code,
            FlatField::Description => self.description,
            FlatField::Unit => self.unit,
            FlatField::Price => self.price,
        }
    }

    pub fn set(&mut self, field: FlatField, idx: usize) {
        let slot = match field {
            FlatField::Code => &mut self.code,
            FlatField::Description => &mut self.description,
            FlatField::Unit => &mut self.unit,
            FlatField::Price => &mut self.price,
        };
        *slot = Some(idx);
    }

    pub fn is_empty(&self) -> bool {
        FlatField::ALL.iter().all(|&f| self.get(f).is_none())
    }
}

/// Map every row after `header_index` with the default profile's keywords.
pub fn map_flat_columns(rows: &[Row], header_index: usize) -> Vec<FlatRecord> {
    let Some(header) = rows.get(header_index) else {
        return Vec::new();
    };
    let mapping = ColumnMapping::detect(header, &default_profile());
    map_flat_columns_with(rows, header_index, &mapping)
}

/// Map every row after `header_index` through an explicit mapping.
///
/// Short rows are padded with empty cells to the header width. A row that
/// still lacks a mapped column yields no record.
pub fn map_flat_columns_with(
    rows: &[Row],
    header_index: usize,
    mapping: &ColumnMapping,
) -> Vec<FlatRecord> {
    let Some(header) = rows.get(header_index) else {
        return Vec::new();
    };
    let width = header.len();

    rows.iter()
        .enumerate()
        .skip(header_index + 1)
        .filter_map(|(i, row)| {
            let mut padded: Vec<&str> = row.iter().map(String::as_str).collect();
            if padded.len() < width {
                padded.resize(width, "");
            }

            let record = build_record(&padded, mapping);
            if record.is_none() {
                tracing::trace!(row = i, "flat row shorter than mapped column, skipped");
            }
            record
        })
        .collect()
}

fn build_record(cells: &[&str], mapping: &ColumnMapping) -> Option<FlatRecord> {
    let value = |field: FlatField| match mapping.get(field) {
        Some(idx) => cells.get(idx).map(|s| s.to_string()),
        None => Some(String::new()),
    };

    Some(FlatRecord {
        codigo: value(FlatField::Code)?,
        descripcion: value(FlatField::Description)?,
        unidad: value(FlatField::Unit)?,
        precio: value(FlatField::Price)?,
    })
}

/// Detect the header with `profile`, map its columns and extract records.
///
/// Documents without a header row yield no records.
pub fn extract_flat(rows: &[Row], profile: &FlatProfile) -> Vec<FlatRecord> {
    let Some(header) = find_headers(rows, profile) else {
        tracing::warn!(rows = rows.len(), "no header row found, nothing extracted");
        return Vec::new();
    };
    let mapping = ColumnMapping::detect(header.cells, profile);
    tracing::debug!(header_row = header.index, ?mapping, "flat columns detected");
    map_flat_columns_with(rows, header.index, &mapping)
}
