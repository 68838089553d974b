use std::io::Cursor;

use calamine::{Data, Reader};

use crate::error::ApuError;
use crate::extraction::RowSource;
use crate::model::Row;

/// Reads xlsx/xls/ods workbooks with calamine. Every row of the used range
/// is returned at full width, empty cells as `""`.
pub struct SpreadsheetRowSource {
    sheet: Option<String>,
}

impl SpreadsheetRowSource {
    /// `sheet` selects a worksheet by name; `None` reads the first one.
    pub fn new(sheet: Option<String>) -> Self {
        SpreadsheetRowSource { sheet }
    }
}

impl RowSource for SpreadsheetRowSource {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>, ApuError> {
        let cursor = Cursor::new(bytes);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| ApuError::Spreadsheet(format!("failed to open workbook: {e}")))?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ApuError::Spreadsheet("workbook has no sheets".into()))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ApuError::Spreadsheet(format!("sheet '{sheet_name}' not readable: {e}")))?;

        let rows: Vec<Row> = range
            .rows()
            .map(|cells| cells.iter().map(cell_as_string).collect())
            .collect();

        tracing::debug!(sheet = %sheet_name, rows = rows.len(), "extracted rows from sheet");
        Ok(rows)
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        _ => format!("{cell}"),
    }
}
