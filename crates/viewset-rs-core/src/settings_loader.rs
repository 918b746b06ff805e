//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `VIEWSET_DEBUG` | `debug` |
//! | `VIEWSET_LOG_LEVEL` | `log_level` |
//! | `VIEWSET_URLNAME_SEPARATOR` | `urlname_separator` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use viewset_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/viewsets.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/viewsets.json").unwrap();
//! ```

use std::path::Path;

use crate::error::ViewSetError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, ViewSetError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| ViewSetError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, ViewSetError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, ViewSetError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, ViewSetError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| ViewSetError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, ViewSetError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, ViewSetError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `VIEWSET_DEBUG` accepts "true"/"1"/"yes" as true, anything else as false.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("VIEWSET_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("VIEWSET_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("VIEWSET_URLNAME_SEPARATOR") {
        settings.urlname_separator = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, ViewSetError> {
    std::fs::read_to_string(path).map_err(|e| {
        ViewSetError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Deep-merges `value` over the serialized defaults and deserializes the result.
fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, ViewSetError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        ViewSetError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        ViewSetError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, override_v),
                    None => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            urlname_separator = "_"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.urlname_separator, "_");
        // Defaults preserved
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_extra() {
        let toml = r#"
            [extra]
            api_version = 2
            owner = "crud"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.extra.get("api_version").unwrap(), &serde_json::json!(2));
        assert_eq!(settings.extra.get("owner").unwrap(), &serde_json::json!("crud"));
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.urlname_separator, "-");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(ViewSetError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to deserialize settings from TOML"));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "debug": false,
            "log_level": "debug"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.urlname_separator, "-");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "urlname_separator = \":\"").unwrap();

        let settings = from_toml_file(file.path()).unwrap();
        assert_eq!(settings.urlname_separator, ":");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"log_level\": \"warn\"}}").unwrap();

        let settings = from_json_file(file.path()).unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_from_missing_file() {
        let err = from_toml_file("/nonexistent/viewsets.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"x": 1, "y": 2}, "b": 3});
        let over = serde_json::json!({"a": {"y": 20}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"x": 1, "y": 20}, "b": 3}));
    }
}
