use apu_core::error::ApuError;
use apu_core::profile::builtin::{self, DEFAULT_PRESET};
use apu_core::profile::load_profile;
use std::path::Path;

pub fn list() -> Result<(), ApuError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let default_marker = if *name == DEFAULT_PRESET { " (default)" } else { "" };
        println!("  {:<10} {}{}", name, profile.name, default_marker);
        if let Some(ref desc) = profile.description {
            println!("             {}", desc);
        }
        println!(
            "             {} header keyword(s)",
            profile.header_keywords.len()
        );
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), ApuError> {
    let profile = builtin::load_preset(preset)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ApuError> {
    let profile = load_profile(file)?;
    println!(
        "Valid profile: {} ({} header keyword(s))",
        profile.name,
        profile.header_keywords.len()
    );
    Ok(())
}
