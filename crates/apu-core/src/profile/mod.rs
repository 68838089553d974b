pub mod builtin;
pub mod schema;

use crate::error::ApuError;
use crate::model::FlatField;
use schema::FlatProfile;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<FlatProfile, ApuError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApuError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<FlatProfile, ApuError> {
    let profile: FlatProfile = serde_json::from_str(json).map_err(|e| ApuError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<FlatProfile, ApuError> {
    let profile: FlatProfile = serde_json::from_str(json).map_err(ApuError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is usable.
pub fn validate_profile(profile: &FlatProfile) -> Result<(), ApuError> {
    if profile.name.trim().is_empty() {
        return Err(ApuError::ProfileInvalid("name must not be empty".into()));
    }

    if profile.header_keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(ApuError::ProfileInvalid(
            "header_keywords must contain at least one keyword".into(),
        ));
    }

    // A blank keyword would match every cell.
    if profile.header_keywords.iter().any(|k| k.is_empty()) {
        return Err(ApuError::ProfileInvalid(
            "header_keywords must not contain empty strings".into(),
        ));
    }

    for field in FlatField::ALL {
        let synonyms = profile.columns.for_field(field);
        if synonyms.is_empty() {
            return Err(ApuError::ProfileInvalid(format!(
                "column '{}' has no keywords",
                field
            )));
        }
        if synonyms.iter().any(|k| k.trim().is_empty()) {
            return Err(ApuError::ProfileInvalid(format!(
                "column '{}' has a blank keyword",
                field
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_profile() {
        let json = r#"{
            "name": "proveedor",
            "header_keywords": ["Clave"],
            "columns": {
                "code": ["Clave"],
                "description": ["Concepto"],
                "unit": ["Unidad"],
                "price": ["Importe"]
            }
        }"#;
        let p = parse_profile_str(json).unwrap();
        assert_eq!(p.name, "proveedor");
        assert!(p.description.is_none());
        assert_eq!(p.columns.price, vec!["Importe"]);
    }

    #[test]
    fn test_empty_header_keywords_rejected() {
        let json = r#"{
            "name": "bad",
            "header_keywords": [],
            "columns": {"code": ["a"], "description": ["b"], "unit": ["c"], "price": ["d"]}
        }"#;
        assert!(matches!(
            parse_profile_str(json),
            Err(ApuError::ProfileInvalid(_))
        ));
    }

    #[test]
    fn test_blank_header_keyword_rejected() {
        let json = r#"{
            "name": "bad",
            "header_keywords": ["Clave", ""],
            "columns": {"code": ["a"], "description": ["b"], "unit": ["c"], "price": ["d"]}
        }"#;
        assert!(parse_profile_str(json).is_err());
    }

    #[test]
    fn test_missing_column_keywords_rejected() {
        let json = r#"{
            "name": "bad",
            "header_keywords": ["Clave"],
            "columns": {"code": ["a"], "description": ["b"], "unit": [], "price": ["d"]}
        }"#;
        let err = parse_profile_str(json).unwrap_err();
        assert!(err.to_string().contains("unit"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, ApuError::ProfileLoad { .. }));
    }
}
