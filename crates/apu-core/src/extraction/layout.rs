use serde::{Deserialize, Serialize};

use crate::model::Row;

/// How a line of extracted PDF text is cut into cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSplit {
    /// Every run of whitespace separates two cells.
    #[default]
    Whitespace,
    /// Only runs of two or more whitespace characters separate cells, so
    /// single-spaced phrases stay together in column-aligned layouts.
    Gaps,
}

impl CellSplit {
    pub fn from_str_loose(s: &str) -> Option<CellSplit> {
        match s.trim().to_lowercase().as_str() {
            "whitespace" | "ws" => Some(CellSplit::Whitespace),
            "gaps" | "layout" => Some(CellSplit::Gaps),
            _ => None,
        }
    }
}

/// Split a text line into a row. Blank lines yield an empty row.
pub fn split_line(line: &str, split: CellSplit) -> Row {
    match split {
        CellSplit::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        CellSplit::Gaps => split_by_whitespace_gaps(line)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

/// Split a line by gaps of 2+ whitespace characters.
fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;
    // Byte offset where the current whitespace run began, and its length in chars.
    let mut run_start = 0;
    let mut run_len = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
            if run_len == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..run_start]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            run_len = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}
