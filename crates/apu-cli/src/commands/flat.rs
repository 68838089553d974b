use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use apu_core::error::ApuError;
use apu_core::export::write_flat_csv;
use apu_core::extraction::SourceOptions;
use apu_core::model::FlatRecord;
use apu_core::parsing::flat::ColumnMapping;
use apu_core::{extract_flat_from, extract_flat_mapped};

use crate::commands::{open_input, resolve_profile};
use crate::output::{self, OutputFormat};

pub fn run(
    inputs: &[PathBuf],
    preset: Option<&str>,
    profile_file: Option<&Path>,
    map: Option<&str>,
    format: OutputFormat,
    out: Option<&Path>,
    options: &SourceOptions,
) -> Result<(), ApuError> {
    let profile = resolve_profile(preset, profile_file)?;
    let mapping = map.map(ColumnMapping::parse_manual).transpose()?;
    if let Some(m) = &mapping {
        tracing::debug!(?m, "manual column mapping");
    }

    let mut records: Vec<FlatRecord> = Vec::new();
    for input in inputs {
        let (bytes, source) = open_input(input, options)?;
        let found = match &mapping {
            Some(m) => extract_flat_mapped(&bytes, source.as_ref(), &profile, m)?,
            None => extract_flat_from(&bytes, source.as_ref(), &profile)?,
        };
        if found.is_empty() {
            tracing::warn!(input = %input.display(), "no records extracted");
        }
        records.extend(found);
    }

    match out {
        Some(path) => {
            let file = File::create(path)?;
            write_flat_csv(BufWriter::new(file), &records)?;
            eprintln!("Wrote {} record(s) to {}", records.len(), path.display());
        }
        None => match format {
            OutputFormat::Table => print!("{}", output::table::format_flat(&records)),
            OutputFormat::Json => output::json::print(&records)?,
            OutputFormat::Csv => write_flat_csv(std::io::stdout().lock(), &records)?,
        },
    }

    Ok(())
}
