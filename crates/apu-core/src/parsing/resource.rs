use crate::model::Resource;

/// Trailing columns beyond this count (typically a total/importe column)
/// are discarded before fields are assigned.
const MAX_RESOURCE_CELLS: usize = 5;

/// Check whether a first cell looks like a resource code.
///
/// Full match of `[A-Z0-9][A-Z0-9.-]*` (ASCII only). Material, labor and
/// equipment codes all pass; blank cells and lowercase text do not.
pub fn is_resource_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() || first.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '.')
}

/// Parse a resource row into a [`Resource`]. Never fails.
///
/// Fields are assigned purely by cell count:
///
/// | cells | clave | descripcion | unidad | cantidad | precio |
/// |-------|-------|-------------|--------|----------|--------|
/// | 0     | ""    | ""          | ""     | ""       | ""     |
/// | 1     | c0    | ""          | ""     | ""       | c0     |
/// | 2     | c0    | c1          | ""     | ""       | c1     |
/// | 3     | c0    | ""          | c0     | c1       | c2     |
/// | 4     | c0    | ""          | c1     | c2       | c3     |
/// | 5     | c0    | c1          | c2     | c3       | c4     |
pub fn parse_resource(row: &[String]) -> Resource {
    let cleaned: Vec<&str> = row
        .iter()
        .take(MAX_RESOURCE_CELLS)
        .map(|c| c.trim())
        .collect();
    let n = cleaned.len();

    let cell = |i: usize| cleaned[i].to_string();

    match n {
        0 => Resource::default(),
        1 => Resource {
            clave: cell(0),
            precio: cell(0),
            ..Default::default()
        },
        2 => Resource {
            clave: cell(0),
            descripcion: cell(1),
            precio: cell(1),
            ..Default::default()
        },
        _ => Resource {
            clave: cell(0),
            // Interior cells ahead of the unidad/cantidad/precio tail.
            descripcion: cleaned[1..(n - 3).max(1)].join(" "),
            unidad: cell(n - 3),
            cantidad: cell(n - 2),
            precio: cell(n - 1),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resource_key_pattern() {
        assert!(is_resource_key("M001"));
        assert!(is_resource_key("A-12.3"));
        assert!(is_resource_key("1A"));
        assert!(is_resource_key("7"));
        assert!(!is_resource_key(""));
        assert!(!is_resource_key("mano de obra"));
        assert!(!is_resource_key("M 001"));
        assert!(!is_resource_key("-M001"));
        assert!(!is_resource_key("Ñ01"));
        assert!(!is_resource_key("M001a"));
    }

    #[test]
    fn test_empty_row() {
        assert_eq!(parse_resource(&[]), Resource::default());
    }

    #[test]
    fn test_single_cell_is_key_and_price() {
        let r = parse_resource(&row(&[" X1 "]));
        assert_eq!(r.clave, "X1");
        assert_eq!(r.precio, "X1");
        assert_eq!(r.descripcion, "");
        assert_eq!(r.cantidad, "");
    }

    #[test]
    fn test_two_cells_duplicate_description_into_price() {
        let r = parse_resource(&row(&["X1", "Agua"]));
        assert_eq!(
            r,
            Resource {
                clave: "X1".into(),
                descripcion: "Agua".into(),
                unidad: "".into(),
                cantidad: "".into(),
                precio: "Agua".into(),
            }
        );
    }

    #[test]
    fn test_three_cells_take_unit_from_first_cell() {
        let r = parse_resource(&row(&["X1", "2", "15.00"]));
        assert_eq!(r.clave, "X1");
        assert_eq!(r.descripcion, "");
        assert_eq!(r.unidad, "X1");
        assert_eq!(r.cantidad, "2");
        assert_eq!(r.precio, "15.00");
    }

    #[test]
    fn test_four_cells_have_no_description() {
        let r = parse_resource(&row(&["X1", "PZA", "2", "15.00"]));
        assert_eq!(r.descripcion, "");
        assert_eq!(r.unidad, "PZA");
        assert_eq!(r.cantidad, "2");
        assert_eq!(r.precio, "15.00");
    }

    #[test]
    fn test_five_cells_standard_layout() {
        let r = parse_resource(&row(&["M-100", " Pala ", "PZA", "2", "15.00 "]));
        assert_eq!(
            r,
            Resource {
                clave: "M-100".into(),
                descripcion: "Pala".into(),
                unidad: "PZA".into(),
                cantidad: "2".into(),
                precio: "15.00".into(),
            }
        );
    }

    #[test]
    fn test_trailing_total_column_is_dropped() {
        let r = parse_resource(&row(&["M-100", "Pala", "PZA", "2", "15.00", "30.00"]));
        assert_eq!(r.precio, "15.00");
        assert_eq!(r.cantidad, "2");
        assert_eq!(r.unidad, "PZA");
        assert_eq!(r.descripcion, "Pala");
    }
}
