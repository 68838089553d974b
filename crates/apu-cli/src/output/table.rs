use std::fmt::Write;

use apu_core::export::FLAT_COLUMNS;
use apu_core::model::{Card, FlatField, FlatRecord};
use apu_core::parsing::flat::ColumnMapping;

pub fn format_cards(cards: &[Card]) -> String {
    let mut out = String::new();

    if cards.is_empty() {
        out.push_str("No cards found.\n");
        return out;
    }

    for card in cards {
        let _ = writeln!(out, "=== {} ===", card.clave);
        let _ = writeln!(out, "  {}", card.descripcion);
        let _ = writeln!(out, "  Unidad: {}", card.unidad);
        if let Some(ref jornada) = card.jornada {
            let _ = writeln!(out, "  Jornada: {}", jornada);
        }
        if let Some(ref rendimiento) = card.rendimiento {
            let _ = writeln!(out, "  Rendimiento: {}", rendimiento);
        }

        if card.recursos.is_empty() {
            out.push_str("  (no resources)\n\n");
            continue;
        }

        out.push('\n');
        let clave_w = width(card.recursos.iter().map(|r| r.clave.as_str()), "Clave");
        let desc_w = width(card.recursos.iter().map(|r| r.descripcion.as_str()), "Descripción");
        let unit_w = width(card.recursos.iter().map(|r| r.unidad.as_str()), "Unidad");
        let qty_w = width(card.recursos.iter().map(|r| r.cantidad.as_str()), "Cantidad");

        let _ = writeln!(
            out,
            "  {:<clave_w$}  {:<desc_w$}  {:<unit_w$}  {:>qty_w$}  {}",
            "Clave", "Descripción", "Unidad", "Cantidad", "Costo"
        );
        for r in &card.recursos {
            let _ = writeln!(
                out,
                "  {:<clave_w$}  {:<desc_w$}  {:<unit_w$}  {:>qty_w$}  {}",
                r.clave, r.descripcion, r.unidad, r.cantidad, r.precio
            );
        }
        out.push('\n');
    }

    let resources: usize = cards.iter().map(|c| c.recursos.len()).sum();
    let _ = writeln!(out, "{} card(s), {} resource(s)", cards.len(), resources);
    out
}

pub fn format_flat(records: &[FlatRecord]) -> String {
    let mut out = String::new();

    if records.is_empty() {
        out.push_str("No records found.\n");
        return out;
    }

    let code_w = width(records.iter().map(|r| r.codigo.as_str()), FLAT_COLUMNS[0]);
    let desc_w = width(records.iter().map(|r| r.descripcion.as_str()), FLAT_COLUMNS[1]);
    let unit_w = width(records.iter().map(|r| r.unidad.as_str()), FLAT_COLUMNS[2]);

    let _ = writeln!(
        out,
        "{:<code_w$}  {:<desc_w$}  {:<unit_w$}  {}",
        FLAT_COLUMNS[0], FLAT_COLUMNS[1], FLAT_COLUMNS[2], FLAT_COLUMNS[3]
    );
    let _ = writeln!(out, "{}", "-".repeat(code_w + desc_w + unit_w + 6 + 10));
    for r in records {
        let _ = writeln!(
            out,
            "{:<code_w$}  {:<desc_w$}  {:<unit_w$}  {}",
            r.codigo, r.descripcion, r.unidad, r.precio
        );
    }
    let _ = writeln!(out, "\n{} record(s)", records.len());
    out
}

/// Header row cells with the field each one was assigned to.
pub fn format_header(index: usize, cells: &[String], mapping: &ColumnMapping) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Header row: {}\n", index);

    let cell_w = width(cells.iter().map(String::as_str), "Cell");
    for (i, cell) in cells.iter().enumerate() {
        let field = FlatField::ALL
            .into_iter()
            .find(|&f| mapping.get(f) == Some(i))
            .map(|f| format!("-> {}", f.label()))
            .unwrap_or_default();
        let _ = writeln!(out, "  {:>3}  {:<cell_w$}  {}", i, cell, field);
    }

    let unmapped: Vec<&str> = FlatField::ALL
        .into_iter()
        .filter(|&f| mapping.get(f).is_none())
        .map(FlatField::label)
        .collect();
    if !unmapped.is_empty() {
        let _ = writeln!(out, "\n  Not detected: {}", unmapped.join(", "));
    }
    out
}

/// Display width of the widest value, at least as wide as the heading.
fn width<'a>(values: impl Iterator<Item = &'a str>, heading: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(heading.chars().count()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apu_core::model::Resource;

    #[test]
    fn test_format_cards_lists_resources() {
        let cards = vec![Card {
            clave: "C-01".into(),
            descripcion: "Excavación".into(),
            unidad: "M3".into(),
            jornada: Some("8".into()),
            rendimiento: None,
            recursos: vec![Resource {
                clave: "MO-1".into(),
                descripcion: "Peón".into(),
                unidad: "JOR".into(),
                cantidad: "0.125".into(),
                precio: "450.00".into(),
            }],
        }];
        let text = format_cards(&cards);
        assert!(text.starts_with("=== C-01 ===\n"));
        assert!(text.contains("Jornada: 8"));
        assert!(!text.contains("Rendimiento"));
        assert!(text.contains("MO-1"));
        assert!(text.ends_with("1 card(s), 1 resource(s)\n"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_cards(&[]), "No cards found.\n");
        assert_eq!(format_flat(&[]), "No records found.\n");
    }

    #[test]
    fn test_format_header_marks_fields() {
        let cells: Vec<String> = vec!["Código".into(), "Existencia".into(), "Precio unitario".into()];
        let mapping = ColumnMapping {
            code: Some(0),
            price: Some(2),
            ..Default::default()
        };
        let text = format_header(3, &cells, &mapping);
        assert!(text.starts_with("Header row: 3\n"));
        assert!(text.contains("-> Código"));
        assert!(text.contains("-> Precio"));
        assert!(text.contains("Not detected: Descripción, Unidad"));
    }
}
