pub mod cards;
pub mod flat;
pub mod headers;
pub mod profiles;

use std::path::Path;

use apu_core::error::ApuError;
use apu_core::extraction::layout::CellSplit;
use apu_core::extraction::{source_for_path, RowSource, SourceOptions};
use apu_core::profile::builtin::{load_preset, DEFAULT_PRESET};
use apu_core::profile::load_profile;
use apu_core::profile::schema::FlatProfile;

pub fn source_options(split: CellSplit, sheet: Option<String>) -> SourceOptions {
    SourceOptions {
        split,
        sheet,
        delimiter: None,
    }
}

/// Read an input file and pick the row source for its extension.
pub fn open_input(
    path: &Path,
    options: &SourceOptions,
) -> Result<(Vec<u8>, Box<dyn RowSource>), ApuError> {
    let source = source_for_path(path, options)?;
    let bytes = std::fs::read(path)?;
    tracing::debug!(
        input = %path.display(),
        bytes = bytes.len(),
        backend = source.backend_name(),
        "input opened"
    );
    Ok((bytes, source))
}

/// A custom profile file wins over a preset; the default preset otherwise.
pub fn resolve_profile(
    preset: Option<&str>,
    profile_file: Option<&Path>,
) -> Result<FlatProfile, ApuError> {
    match (profile_file, preset) {
        (Some(path), _) => load_profile(path),
        (None, Some(name)) => load_preset(name),
        (None, None) => load_preset(DEFAULT_PRESET),
    }
}
