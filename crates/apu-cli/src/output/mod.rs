pub mod json;
pub mod table;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for the terminal
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with the export column headers
    Csv,
}
