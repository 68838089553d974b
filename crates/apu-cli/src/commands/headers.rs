use std::path::Path;

use apu_core::detect_header;
use apu_core::error::ApuError;
use apu_core::extraction::SourceOptions;
use apu_core::parsing::flat::ColumnMapping;

use crate::commands::{open_input, resolve_profile};
use crate::output;

pub fn run(
    input: &Path,
    preset: Option<&str>,
    profile_file: Option<&Path>,
    options: &SourceOptions,
) -> Result<(), ApuError> {
    let profile = resolve_profile(preset, profile_file)?;
    let (bytes, source) = open_input(input, options)?;

    match detect_header(&bytes, source.as_ref(), &profile)? {
        Some((index, cells)) => {
            let mapping = ColumnMapping::detect(&cells, &profile);
            print!("{}", output::table::format_header(index, &cells, &mapping));
        }
        None => println!("No header row found (profile '{}').", profile.name),
    }

    Ok(())
}
