pub mod delimited;
pub mod layout;
pub mod pdftotext;
pub mod spreadsheet;

use std::path::Path;

use crate::error::ApuError;
use crate::model::Row;
use delimited::CsvRowSource;
use layout::{split_line, CellSplit};
use pdftotext::PdftotextExtractor;
use spreadsheet::SpreadsheetRowSource;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ApuError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Anything that turns a document into an ordered sequence of rows.
///
/// Missing cells must come back as empty strings. The card parser and the
/// flat mapper only ever see the output of this trait.
pub trait RowSource: Send + Sync {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>, ApuError>;

    fn backend_name(&self) -> &str;
}

/// Adapts a [`PdfExtractor`] to [`RowSource`] by splitting each text line
/// into cells. Pages are concatenated in order.
pub struct PdfRowSource<E> {
    extractor: E,
    split: CellSplit,
}

impl<E: PdfExtractor> PdfRowSource<E> {
    pub fn new(extractor: E, split: CellSplit) -> Self {
        PdfRowSource { extractor, split }
    }
}

impl<E: PdfExtractor> RowSource for PdfRowSource<E> {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Row>, ApuError> {
        let pages = self.extractor.extract_pages(bytes)?;
        let rows: Vec<Row> = pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|line| split_line(line, self.split)))
            .collect();
        tracing::debug!(
            backend = self.extractor.backend_name(),
            pages = pages.len(),
            rows = rows.len(),
            "extracted rows from PDF"
        );
        Ok(rows)
    }

    fn backend_name(&self) -> &str {
        self.extractor.backend_name()
    }
}

/// Knobs shared by the concrete row sources.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// How PDF text lines are cut into cells.
    pub split: CellSplit,
    /// Worksheet to read; the first sheet when unset.
    pub sheet: Option<String>,
    /// Field delimiter for delimited text; inferred from the extension when unset.
    pub delimiter: Option<u8>,
}

/// Pick a row source from the file extension of `path`.
pub fn source_for_path(path: &Path, options: &SourceOptions) -> Result<Box<dyn RowSource>, ApuError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "pdf" => Ok(Box::new(PdfRowSource::new(
            PdftotextExtractor::new(),
            options.split,
        ))),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(Box::new(SpreadsheetRowSource::new(
            options.sheet.clone(),
        ))),
        "csv" | "tsv" => {
            let delimiter = options
                .delimiter
                .unwrap_or(if ext == "tsv" { b'\t' } else { b',' });
            Ok(Box::new(CsvRowSource::new(delimiter)))
        }
        _ => Err(ApuError::UnsupportedInput(path.display().to_string())),
    }
}
