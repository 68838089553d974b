use crate::model::{Card, Row};
use crate::parsing::labor::{LaborRowClassifier, TokenLaborClassifier};
use crate::parsing::resource::{is_resource_key, parse_resource};

/// Phrase that opens a card. Matched case- and accent-sensitively against
/// the space-joined cells of a row.
pub const CARD_MARKER: &str = "ANÁLISIS DE PRECIO UNITARIO";

/// Segments a flat row sequence into cards.
///
/// Stateless between calls: the same rows always produce the same cards.
#[derive(Debug, Clone, Default)]
pub struct CardParser<C = TokenLaborClassifier> {
    classifier: C,
}

impl<C: LaborRowClassifier> CardParser<C> {
    pub fn with_classifier(classifier: C) -> Self {
        CardParser { classifier }
    }

    /// Parse every card in `rows`.
    ///
    /// Rows outside a marker span are ignored. A marker on the last row has
    /// no concept row and is dropped.
    pub fn parse(&self, rows: &[Row]) -> Vec<Card> {
        let mut cards = Vec::new();
        let mut i = 0;

        while i < rows.len() {
            if !is_marker(&rows[i]) {
                i += 1;
                continue;
            }

            let Some(concept) = rows.get(i + 1) else {
                tracing::debug!(row = i, "marker without concept row, card dropped");
                break;
            };

            let (card, next) = self.parse_card(rows, concept, i + 2);
            tracing::trace!(
                clave = %card.clave,
                resources = card.recursos.len(),
                "card parsed"
            );
            cards.push(card);
            i = next;
        }

        tracing::debug!(rows = rows.len(), cards = cards.len(), "card parse finished");
        cards
    }

    /// Read the card body starting at `start`. Returns the card and the
    /// index where the outer scan resumes.
    fn parse_card(&self, rows: &[Row], concept: &Row, start: usize) -> (Card, usize) {
        let mut card = concept_fields(concept);
        let mut j = start;

        while let Some(row) = rows.get(j) {
            if is_blank(row) {
                j += 1;
                break;
            }
            if is_marker(row) {
                // Left in place: it opens the next card.
                break;
            }

            if let Some(labor) = self.classifier.classify(row) {
                if labor.jornada.is_some() {
                    card.jornada = labor.jornada;
                }
                if labor.rendimiento.is_some() {
                    card.rendimiento = labor.rendimiento;
                }
            } else {
                let first = row.first().map(|c| c.trim()).unwrap_or("");
                if is_resource_key(first) {
                    card.recursos.push(parse_resource(row));
                } else {
                    tracing::trace!(row = j, "card body row skipped");
                }
            }
            j += 1;
        }

        (card, j)
    }
}

/// Parse cards with the default JORNADA/RENDIMIENTO token classifier.
pub fn parse_cards(rows: &[Row]) -> Vec<Card> {
    CardParser::<TokenLaborClassifier>::default().parse(rows)
}

/// Check whether a row opens a card.
pub fn is_marker(row: &[String]) -> bool {
    row.join(" ").contains(CARD_MARKER)
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Header fields of a card from its concept row.
fn concept_fields(concept: &[String]) -> Card {
    let clave = concept.first().map(|c| c.trim().to_string()).unwrap_or_default();

    let (descripcion, unidad) = match concept {
        [_, interior @ .., last] if concept.len() > 2 => {
            (interior.join(" ").trim().to_string(), last.trim().to_string())
        }
        _ => (String::new(), String::new()),
    };

    Card {
        clave,
        descripcion,
        unidad,
        ..Default::default()
    }
}
