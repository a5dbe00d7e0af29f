//! Configuration loading
//!
//! Settings files may be TOML, JSON or YAML; the format is picked from the
//! file extension. Values from a file are deep-merged over the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Merge two JSON values (second overrides first)
fn merge_json_values(base: &mut serde_json::Value, override_value: serde_json::Value) {
    match (base, override_value) {
        (serde_json::Value::Object(base_obj), serde_json::Value::Object(override_obj)) => {
            for (key, value) in override_obj {
                match base_obj.get_mut(&key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_obj.insert(key, value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

/// Parse a config file into a JSON value, without committing to a type
pub fn load_value(path: &Path) -> crate::Result<serde_json::Value> {
    let extension = crate::extension_of(path);
    let content = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "toml" => {
            let toml_value: toml::Value = toml::from_str(&content)
                .map_err(|e| crate::UtilError::Config(format!("TOML parse error: {}", e)))?;
            serde_json::to_value(toml_value)
                .map_err(|e| crate::UtilError::Config(format!("TOML conversion error: {}", e)))
        }
        "json" => serde_json::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("JSON parse error: {}", e))),
        "yml" | "yaml" => serde_yaml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("YAML parse error: {}", e))),
        _ => Err(crate::UtilError::Config(format!(
            "Unsupported config format: '{}' (expected one of {})",
            extension,
            crate::supported_config_extensions().join(", ")
        ))),
    }
}

/// Merge two configurations (second overrides first)
pub fn merge_configs<T>(base: &mut T, override_value: serde_json::Value) -> crate::Result<()>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut base_value = serde_json::to_value(&*base)
        .map_err(|e| crate::UtilError::Serialization(format!("Base serialization error: {}", e)))?;

    merge_json_values(&mut base_value, override_value);

    *base = serde_json::from_value(base_value)
        .map_err(|e| crate::UtilError::Serialization(format!("Result deserialization error: {}", e)))?;

    Ok(())
}

/// Configuration builder for fluent API
#[derive(Debug)]
pub struct ConfigBuilder<T> {
    config: T,
}

impl<T> ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    /// Create new config builder with defaults
    pub fn new() -> Self {
        Self {
            config: T::default(),
        }
    }

    /// Load from file and merge. Keys absent from the file keep their value.
    pub fn load_file(mut self, path: &Path) -> crate::Result<Self> {
        let file_value = load_value(path)?;
        merge_configs(&mut self.config, file_value)?;
        Ok(self)
    }

    /// Load from file if one was given
    pub fn load_optional(self, path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => self.load_file(path),
            None => Ok(self),
        }
    }

    /// Apply in-code overrides
    pub fn apply(mut self, f: impl FnOnce(&mut T)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn build(self) -> T {
        self.config
    }
}

impl<T> Default for ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    fn default() -> Self {
        Self::new()
    }
}
