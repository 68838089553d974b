use crate::error::ApuError;
use crate::profile::schema::FlatProfile;

const STANDARD_JSON: &str = include_str!("../../../../profiles/standard.json");
const EXTENDED_JSON: &str = include_str!("../../../../profiles/extended.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["standard", "extended"];

/// Name of the profile used when none is given.
pub const DEFAULT_PRESET: &str = "standard";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<FlatProfile, ApuError> {
    match name {
        "standard" => Ok(serde_json::from_str(STANDARD_JSON)?),
        "extended" => Ok(serde_json::from_str(EXTENDED_JSON)?),
        _ => Err(ApuError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The default profile, or an empty one if the embedded preset fails to parse.
pub fn default_profile() -> FlatProfile {
    load_preset(DEFAULT_PRESET).unwrap_or_else(|e| {
        tracing::error!(error = %e, "embedded default profile is invalid");
        FlatProfile::default()
    })
}
