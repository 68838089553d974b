use csv::ReaderBuilder;

use crate::error::ApuError;
use crate::extraction::RowSource;
use crate::model::Row;

/// Reads delimited spreadsheet dumps. No header row is assumed and rows
/// may have different lengths.
pub struct CsvRowSource {
    delimiter: u8,
}

impl CsvRowSource {
    pub fn new(delimiter: u8) -> Self {
        CsvRowSource { delimiter }
    }
}

impl Default for CsvRowSource {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl RowSource for CsvRowSource {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>, ApuError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(rows = rows.len(), "extracted rows from delimited text");
        Ok(rows)
    }

    fn backend_name(&self) -> &str {
        "csv"
    }
}
