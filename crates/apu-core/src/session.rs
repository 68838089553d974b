use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::ApuError;
use crate::export::{append_card_rows, card_rows, read_card_rows_csv, write_card_rows, CardRow};
use crate::model::Card;

/// An editable card table and the file it was loaded from or saved to.
///
/// Parsing never touches a session; callers feed parsed cards in.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_file: Option<PathBuf>,
    rows: Vec<CardRow>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing card table. The file's header must carry every
    /// standard column.
    pub fn open(path: &Path) -> Result<Self, ApuError> {
        let file = File::open(path)?;
        let rows = read_card_rows_csv(file)?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "card table opened");
        Ok(Session {
            current_file: Some(path.to_path_buf()),
            rows,
        })
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn rows(&self) -> &[CardRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add parsed cards at the end of the table. Returns the number added.
    pub fn extend_cards(&mut self, cards: &[Card]) -> Result<usize, ApuError> {
        let new_rows = card_rows(cards)?;
        let added = new_rows.len();
        self.rows.extend(new_rows);
        Ok(added)
    }

    /// Remove rows by index. Out-of-range and repeated indices are ignored.
    /// Returns the number of rows removed.
    pub fn remove(&mut self, indices: &[usize]) -> usize {
        let doomed: HashSet<usize> = indices.iter().copied().collect();
        let before = self.rows.len();
        let mut idx = 0;
        self.rows.retain(|_| {
            let keep = !doomed.contains(&idx);
            idx += 1;
            keep
        });
        before - self.rows.len()
    }

    /// Replace the `Insumos/Recursos` text of one row.
    ///
    /// The new text must be a JSON array of resource objects.
    pub fn set_resources(&mut self, index: usize, json: &str) -> Result<(), ApuError> {
        let row = self.rows.get_mut(index).ok_or(ApuError::RowNotFound(index))?;
        let candidate = CardRow {
            recursos: json.to_string(),
            ..Default::default()
        };
        candidate.resources()?;
        row.recursos = candidate.recursos;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Write the whole table to `path`, which becomes the current file.
    pub fn save(&mut self, path: &Path) -> Result<(), ApuError> {
        let file = File::create(path)?;
        write_card_rows(BufWriter::new(file), &self.rows)?;
        self.current_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Append the table to an existing card table file.
    pub fn append_to(&self, path: &Path) -> Result<usize, ApuError> {
        append_card_rows(path, &self.rows)
    }
}
