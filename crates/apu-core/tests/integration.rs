//! Integration tests for the document-to-table pipelines.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use apu_core::error::ApuError;
use apu_core::export::{read_card_rows_csv, write_cards_csv, write_flat_csv};
use apu_core::extraction::delimited::CsvRowSource;
use apu_core::extraction::layout::CellSplit;
use apu_core::extraction::{PageContent, PdfExtractor, PdfRowSource};
use apu_core::parsing::flat::ColumnMapping;
use apu_core::profile::builtin::load_preset;
use apu_core::session::Session;
use apu_core::{detect_header, extract_flat_from, extract_flat_mapped, parse_cards_from};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ApuError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingExtractor;

impl PdfExtractor for FailingExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ApuError> {
        Err(ApuError::Extraction("corrupt xref table".into()))
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

fn quotation() -> MockExtractor {
    MockExtractor {
        pages: vec![
            page(
                1,
                &[
                    "CONSTRUCTORA DEL NORTE          Obra: Bodega 3",
                    "ANÁLISIS DE PRECIO UNITARIO",
                    "C-01    Excavación manual en zanja    M3",
                    "JORNADA    8    RENDIMIENTO    2.5",
                    "MO-1    Cuadrilla de peones    JOR    0.125    450.00    56.25",
                    "EQ-3    Pala recta    PZA    0.01    180.00    1.80",
                    "Subtotal mano de obra    58.05",
                    "",
                ],
            ),
            page(
                2,
                &[
                    "ANÁLISIS DE PRECIO UNITARIO",
                    "C-02    Relleno compactado    M3",
                    "MAT-10    2    10.5",
                    "ANÁLISIS DE PRECIO UNITARIO",
                    "C-03    Muro de block    M2",
                ],
            ),
        ],
    }
}

// ---------------------------------------------------------------------------
// Cards: multi-page quotation with labor rows, noise and back-to-back cards
// ---------------------------------------------------------------------------
#[test]
fn cards_from_layout_pdf() {
    let source = PdfRowSource::new(quotation(), CellSplit::Gaps);
    let cards = parse_cards_from(&[], &source).unwrap();

    assert_eq!(cards.len(), 3);

    let c1 = &cards[0];
    assert_eq!(c1.clave, "C-01");
    assert_eq!(c1.descripcion, "Excavación manual en zanja");
    assert_eq!(c1.unidad, "M3");
    assert_eq!(c1.jornada.as_deref(), Some("8"));
    assert_eq!(c1.rendimiento.as_deref(), Some("2.5"));
    assert_eq!(c1.recursos.len(), 2);
    // Trailing importe column is dropped.
    assert_eq!(c1.recursos[0].descripcion, "Cuadrilla de peones");
    assert_eq!(c1.recursos[0].unidad, "JOR");
    assert_eq!(c1.recursos[0].cantidad, "0.125");
    assert_eq!(c1.recursos[0].precio, "450.00");

    let c2 = &cards[1];
    assert_eq!(c2.clave, "C-02");
    assert_eq!(c2.jornada, None);
    assert_eq!(c2.recursos.len(), 1);
    assert_eq!(c2.recursos[0].unidad, "MAT-10");
    assert_eq!(c2.recursos[0].cantidad, "2");

    let c3 = &cards[2];
    assert_eq!(c3.clave, "C-03");
    assert!(c3.recursos.is_empty());
}

#[test]
fn card_count_bounded_by_markers() {
    let source = PdfRowSource::new(quotation(), CellSplit::Gaps);
    let cards = parse_cards_from(&[], &source).unwrap();
    let markers = quotation()
        .pages
        .iter()
        .flat_map(|p| p.lines.iter())
        .filter(|l| l.contains("ANÁLISIS DE PRECIO UNITARIO"))
        .count();
    assert!(cards.len() <= markers);
}

#[test]
fn whitespace_split_breaks_multiword_cells() {
    let source = PdfRowSource::new(quotation(), CellSplit::Whitespace);
    let cards = parse_cards_from(&[], &source).unwrap();

    // The marker still matches once cells are re-joined with spaces.
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].descripcion, "Excavación manual en zanja");
    // Six tokens truncated to five: MO-1 Cuadrilla de peones JOR.
    assert_eq!(cards[0].recursos[0].descripcion, "Cuadrilla");
    assert_eq!(cards[0].recursos[0].precio, "JOR");
}

#[test]
fn document_without_markers_yields_no_cards() {
    let source = PdfRowSource::new(
        MockExtractor {
            pages: vec![page(1, &["Lista de precios", "A-1  Cemento  245.00"])],
        },
        CellSplit::Gaps,
    );
    assert!(parse_cards_from(&[], &source).unwrap().is_empty());
}

#[test]
fn extraction_error_propagates() {
    let source = PdfRowSource::new(FailingExtractor, CellSplit::Gaps);
    let err = parse_cards_from(&[], &source).unwrap_err();
    assert!(matches!(err, ApuError::Extraction(_)));
}

// ---------------------------------------------------------------------------
// Flat: CSV price list through the preset profile and a manual mapping
// ---------------------------------------------------------------------------
const PRICE_LIST: &str = "\
Materiales Ramírez,,,,
Lista vigente,,,,
Código,Descripción,U.M,Existencia,Precio unitario
A-1,Cemento gris,BTO,40,245.00
A-2,Varilla 3/8,,,
";

#[test]
fn flat_from_csv_with_preset() {
    let profile = load_preset("standard").unwrap();
    let records =
        extract_flat_from(PRICE_LIST.as_bytes(), &CsvRowSource::default(), &profile).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].codigo, "A-1");
    assert_eq!(records[0].unidad, "BTO");
    assert_eq!(records[0].precio, "245.00");
    assert_eq!(records[1].descripcion, "Varilla 3/8");
    assert_eq!(records[1].precio, "");
}

#[test]
fn flat_with_manual_mapping() {
    let profile = load_preset("standard").unwrap();
    let mapping = ColumnMapping::parse_manual("code=0,description=1,price=3").unwrap();
    let records = extract_flat_mapped(
        PRICE_LIST.as_bytes(),
        &CsvRowSource::default(),
        &profile,
        &mapping,
    )
    .unwrap();

    assert_eq!(records[0].precio, "40");
    assert_eq!(records[0].unidad, "");
}

#[test]
fn header_detection() {
    let profile = load_preset("standard").unwrap();
    let (index, cells) = detect_header(PRICE_LIST.as_bytes(), &CsvRowSource::default(), &profile)
        .unwrap()
        .unwrap();
    assert_eq!(index, 2);
    assert_eq!(cells[4], "Precio unitario");

    let none = detect_header(b"1,2\n3,4\n", &CsvRowSource::default(), &profile).unwrap();
    assert!(none.is_none());
}

#[test]
fn flat_export_header() {
    let profile = load_preset("standard").unwrap();
    let records =
        extract_flat_from(PRICE_LIST.as_bytes(), &CsvRowSource::default(), &profile).unwrap();
    let mut out = Vec::new();
    write_flat_csv(&mut out, &records).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Código,Descripción,Unidad,Precio\nA-1,Cemento gris,BTO,245.00\n"));
}

// ---------------------------------------------------------------------------
// Export and session round trips
// ---------------------------------------------------------------------------
#[test]
fn card_table_round_trip() {
    let source = PdfRowSource::new(quotation(), CellSplit::Gaps);
    let cards = parse_cards_from(&[], &source).unwrap();

    let mut out = Vec::new();
    write_cards_csv(&mut out, &cards).unwrap();
    let rows = read_card_rows_csv(out.as_slice()).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].rendimiento.as_deref(), Some("2.5"));
    let resources = rows[0].resources().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[1].clave, "EQ-3");
    assert_eq!(resources[1].costo, "180.00");
    assert!(rows[2].resources().unwrap().is_empty());
}

#[test]
fn session_accumulates_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tarjetas.csv");

    let source = PdfRowSource::new(quotation(), CellSplit::Gaps);
    let mut session = Session::new();
    session
        .extend_cards(&parse_cards_from(&[], &source).unwrap())
        .unwrap();
    session.remove(&[1]);
    session.save(&path).unwrap();

    let mut later = Session::new();
    later
        .extend_cards(&parse_cards_from(&[], &source).unwrap()[..1])
        .unwrap();
    later.append_to(&path).unwrap();

    let reopened = Session::open(&path).unwrap();
    let claves: Vec<&str> = reopened.rows().iter().map(|r| r.clave.as_str()).collect();
    assert_eq!(claves, vec!["C-01", "C-03", "C-01"]);
}
