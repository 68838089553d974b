//! Tabular output in the column layout downstream consumers expect.
//!
//! Card tables carry one row per card and the card's resources serialized
//! as a JSON array in the `Insumos/Recursos` column.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ApuError;
use crate::model::{Card, FlatRecord, Resource};

pub const RESOURCES_COLUMN: &str = "Insumos/Recursos";

/// Card table header, in output order.
pub const CARD_COLUMNS: [&str; 6] = [
    "Clave",
    "Descripción",
    "Unidad",
    "Jornada",
    "Rendimiento",
    RESOURCES_COLUMN,
];

/// Cell written for a labor row whose value is blank, so it reads back as
/// `Some("")` rather than `None` (no labor row at all, an empty cell).
pub const BLANK_LABOR_CELL: &str = "\"\"";

/// Flat table header, in output order.
pub const FLAT_COLUMNS: [&str; 4] = ["Código", "Descripción", "Unidad", "Precio"];

/// A resource as it appears inside the `Insumos/Recursos` JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceExport {
    #[serde(rename = "Clave")]
    pub clave: String,
    #[serde(rename = "Descripción")]
    pub descripcion: String,
    #[serde(rename = "Unidad")]
    pub unidad: String,
    #[serde(rename = "Cantidad")]
    pub cantidad: String,
    #[serde(rename = "Costo")]
    pub costo: String,
}

impl From<&Resource> for ResourceExport {
    fn from(r: &Resource) -> Self {
        ResourceExport {
            clave: r.clave.clone(),
            descripcion: r.descripcion.clone(),
            unidad: r.unidad.clone(),
            cantidad: r.cantidad.clone(),
            costo: r.precio.clone(),
        }
    }
}

/// Serialize a resource list for the `Insumos/Recursos` column.
pub fn resources_json(resources: &[Resource]) -> Result<String, ApuError> {
    let exported: Vec<ResourceExport> = resources.iter().map(ResourceExport::from).collect();
    Ok(serde_json::to_string(&exported)?)
}

/// One row of a card table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRow {
    pub clave: String,
    pub descripcion: String,
    pub unidad: String,
    pub jornada: Option<String>,
    pub rendimiento: Option<String>,
    /// JSON array text; kept as written so edited tables round-trip.
    pub recursos: String,
}

impl CardRow {
    pub fn from_card(card: &Card) -> Result<CardRow, ApuError> {
        Ok(CardRow {
            clave: card.clave.clone(),
            descripcion: card.descripcion.clone(),
            unidad: card.unidad.clone(),
            jornada: card.jornada.clone(),
            rendimiento: card.rendimiento.clone(),
            recursos: resources_json(&card.recursos)?,
        })
    }

    /// Value of the named card table column.
    pub fn value(&self, column: &str) -> Option<&str> {
        match column {
            "Clave" => Some(self.clave.as_str()),
            "Descripción" => Some(self.descripcion.as_str()),
            "Unidad" => Some(self.unidad.as_str()),
            "Jornada" => Some(labor_cell(self.jornada.as_deref())),
            "Rendimiento" => Some(labor_cell(self.rendimiento.as_deref())),
            RESOURCES_COLUMN => Some(self.recursos.as_str()),
            _ => None,
        }
    }

    /// Decode the `Insumos/Recursos` column.
    pub fn resources(&self) -> Result<Vec<ResourceExport>, ApuError> {
        if self.recursos.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&self.recursos)?)
    }

    fn to_record(&self) -> [&str; 6] {
        CARD_COLUMNS.map(|c| self.value(c).unwrap_or(""))
    }
}

fn labor_cell(value: Option<&str>) -> &str {
    match value {
        None => "",
        Some("") => BLANK_LABOR_CELL,
        Some(v) => v,
    }
}

fn labor_value(cell: &str) -> Option<String> {
    match cell {
        "" => None,
        BLANK_LABOR_CELL => Some(String::new()),
        v => Some(v.to_string()),
    }
}

/// Build card table rows for a parsed document.
pub fn card_rows(cards: &[Card]) -> Result<Vec<CardRow>, ApuError> {
    cards.iter().map(CardRow::from_card).collect()
}

/// Write card table rows as CSV with the standard header.
pub fn write_card_rows<W: Write>(writer: W, rows: &[CardRow]) -> Result<(), ApuError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CARD_COLUMNS)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write cards as a CSV card table.
pub fn write_cards_csv<W: Write>(writer: W, cards: &[Card]) -> Result<(), ApuError> {
    write_card_rows(writer, &card_rows(cards)?)
}

/// Write flat records as CSV with the `Código, Descripción, Unidad, Precio` header.
pub fn write_flat_csv<W: Write>(writer: W, records: &[FlatRecord]) -> Result<(), ApuError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FLAT_COLUMNS)?;
    for r in records {
        wtr.write_record([&r.codigo, &r.descripcion, &r.unidad, &r.precio])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a card table. Column order may differ and extra columns are
/// ignored, but every standard column must be present.
///
/// Empty `Jornada`/`Rendimiento` cells read back as `None`, and
/// [`BLANK_LABOR_CELL`] as `Some("")`.
pub fn read_card_rows_csv<R: Read>(reader: R) -> Result<Vec<CardRow>, ApuError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let header = rdr.headers()?.clone();
    let positions = column_positions(&header)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cell = |col: usize| record.get(positions[col]).unwrap_or("").to_string();
        rows.push(CardRow {
            clave: cell(0),
            descripcion: cell(1),
            unidad: cell(2),
            jornada: labor_value(record.get(positions[3]).unwrap_or("")),
            rendimiento: labor_value(record.get(positions[4]).unwrap_or("")),
            recursos: cell(5),
        });
    }
    Ok(rows)
}

/// Append rows to an existing card table file.
///
/// The existing header is verified and kept as is (including any extra
/// columns, which are left empty for the new rows). The merged table is
/// written to a temporary file beside `path` and moved over it only once
/// complete, so a failed write leaves the original untouched. Returns the
/// number of rows appended.
pub fn append_card_rows(path: &Path, rows: &[CardRow]) -> Result<usize, ApuError> {
    let existing = std::fs::read(path)?;
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(existing.as_slice());
    let header = rdr.headers()?.clone();
    column_positions(&header)?;
    let records = rdr.records().collect::<Result<Vec<StringRecord>, _>>()?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = WriterBuilder::new()
            .flexible(true)
            .from_writer(tmp.as_file_mut());
        wtr.write_record(&header)?;
        for record in &records {
            wtr.write_record(record)?;
        }
        for row in rows {
            wtr.write_record(header.iter().map(|name| row.value(name.trim()).unwrap_or("")))?;
        }
        wtr.flush()?;
    }
    let permissions = std::fs::metadata(path)?.permissions();
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(path).map_err(|e| ApuError::Io(e.error))?;

    tracing::debug!(
        path = %path.display(),
        existing = records.len(),
        appended = rows.len(),
        "card table updated"
    );
    Ok(rows.len())
}

/// Index of each standard column in `header`, in `CARD_COLUMNS` order.
fn column_positions(header: &StringRecord) -> Result<[usize; 6], ApuError> {
    let found: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
    let mut positions = [0usize; 6];
    for (slot, name) in CARD_COLUMNS.iter().enumerate() {
        match found.iter().position(|h| h.as_str() == *name) {
            Some(idx) => positions[slot] = idx,
            None => {
                return Err(ApuError::HeaderMismatch {
                    expected: CARD_COLUMNS.iter().map(|c| c.to_string()).collect(),
                    found,
                })
            }
        }
    }
    Ok(positions)
}
