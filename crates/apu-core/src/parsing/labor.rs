/// Labor metadata found on a card body row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaborFields {
    pub jornada: Option<String>,
    pub rendimiento: Option<String>,
}

/// Decides whether a card body row carries labor metadata.
///
/// Returning `Some` marks the row as metadata: it is never considered as a
/// resource, even when both fields are `None`.
pub trait LaborRowClassifier {
    fn classify(&self, row: &[String]) -> Option<LaborFields>;
}

/// Exact-token detection: a cell equal to `JORNADA` marks the row, and the
/// cell after it holds the value. `RENDIMIENTO` is only looked up on rows
/// that also carry `JORNADA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenLaborClassifier;

pub const JORNADA_TOKEN: &str = "JORNADA";
pub const RENDIMIENTO_TOKEN: &str = "RENDIMIENTO";

impl LaborRowClassifier for TokenLaborClassifier {
    fn classify(&self, row: &[String]) -> Option<LaborFields> {
        let jornada_idx = row.iter().position(|c| c == JORNADA_TOKEN)?;

        Some(LaborFields {
            jornada: value_after(row, jornada_idx),
            rendimiento: row
                .iter()
                .position(|c| c == RENDIMIENTO_TOKEN)
                .and_then(|idx| value_after(row, idx)),
        })
    }
}

fn value_after(row: &[String], idx: usize) -> Option<String> {
    row.get(idx + 1).map(|v| v.trim().to_string())
}
