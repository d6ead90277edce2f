//! Loader for the JSON configuration file.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::debug;

use crate::model::RawConfig;

/// Parse a configuration document into `RawConfig`.
///
/// The document must be a single JSON object. Unknown keys are rejected so
/// that a misspelled option does not silently fall back to its default.
pub fn load(json: &str) -> Result<RawConfig> {
    debug!(bytes = json.len(), "configuration loaded");

    let root: Value = serde_json::from_str(json)?;
    if !root.is_object() {
        return Err(anyhow!("configuration must be a JSON object"));
    }

    let config: RawConfig =
        serde_json::from_value(root).map_err(|e| anyhow!("invalid configuration: {e}"))?;
    debug!(
        symbols = config.symbols.len(),
        replace_standard = config.replace_standard,
        "configuration parsed"
    );
    Ok(config)
}

pub fn load_file(path: &Path) -> Result<RawConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Reading {}", path.display()))?;
    load(&json).with_context(|| format!("Parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ControlMarker, SymbolEntry};

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(load("{}").expect("valid"), RawConfig::default());
    }

    #[test]
    fn test_load_all_fields() {
        let json = r#"{
            "symbols": [{ "glyphs": "찢찢", "code": 9731 }],
            "replace_standard": true,
            "control_marker": "line-break",
            "numeral_fallback": true,
            "max_steps": 1000
        }"#;
        let config = load(json).expect("valid");
        assert_eq!(
            config,
            RawConfig {
                symbols: vec![SymbolEntry {
                    glyphs: "찢찢".into(),
                    code: 9731,
                }],
                replace_standard: true,
                control_marker: ControlMarker::LineBreak,
                numeral_fallback: true,
                max_steps: Some(1000),
            }
        );
    }

    #[test]
    fn test_rejects_bad_documents() {
        let test_cases = vec![
            ("[]", "configuration must be a JSON object"),
            (r#"{ "max_step": 3 }"#, "invalid configuration"),
            (r#"{ "control_marker": "loop" }"#, "invalid configuration"),
            (r#"{ "symbols": [{ "glyphs": "x", "code": -1 }] }"#, "invalid configuration"),
        ];

        for (json, expected) in test_cases {
            let err = load(json).unwrap_err();
            assert!(err.to_string().starts_with(expected), "got error message: {err}");
        }
        assert!(load("{").is_err());
    }
}
