//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use lumen_commerce::cart::{DEFAULT_ADD_LATENCY, MAX_PICK_QUANTITY};
use lumen_observability::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["lumen.toml", ".lumen.toml", "lumen.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart behaviour.
    #[serde(default)]
    pub cart: CartConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.cart.max_quantity == 0 {
            errors.push("cart.max_quantity must be at least 1".to_string());
        }

        if let Some(path) = &self.catalog.path {
            if !path.ends_with(".json") {
                errors.push(format!("catalog.path '{}' must be a .json file", path));
            }
        }

        errors
    }
}

/// Where product records come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in range is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Cart behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Simulated add-to-cart round trip in milliseconds.
    #[serde(default = "default_add_latency_ms")]
    pub add_latency_ms: u64,

    /// Upper bound of the quantity picker.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_add_latency_ms() -> u64 {
    DEFAULT_ADD_LATENCY.as_millis() as u64
}

fn default_max_quantity() -> u32 {
    MAX_PICK_QUANTITY
}

impl CartConfig {
    /// Add-to-cart latency as a duration.
    pub fn add_latency(&self) -> Duration {
        Duration::from_millis(self.add_latency_ms)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            add_latency_ms: default_add_latency_ms(),
            max_quantity: default_max_quantity(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Minimum level; `RUST_LOG` overrides it.
    #[serde(default)]
    pub level: LogLevel,
}

/// Generate a default lumen.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Lumen storefront configuration

[catalog]
# JSON file of the form {{"products": [...]}}; the built-in range is used when unset
# path = "catalog.json"

[cart]
add_latency_ms = {latency}
max_quantity = {max_quantity}

[log]
format = "human"
level = "info"
"#,
        latency = default_add_latency_ms(),
        max_quantity = default_max_quantity(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = CliConfig::parse("lumen.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = CliConfig::parse(
            "lumen.toml",
            "[cart]\nadd_latency_ms = 50\n\n[log]\nformat = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.cart.add_latency(), Duration::from_millis(50));
        assert_eq!(config.cart.max_quantity, 99);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "lumen.json",
            r#"{"catalog": {"path": "products.json"}, "cart": {"max_quantity": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("products.json"));
        assert_eq!(config.cart.max_quantity, 5);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate() {
        let mut config = CliConfig::default();
        config.cart.max_quantity = 0;
        config.catalog.path = Some("products.csv".to_string());
        assert_eq!(config.validate().len(), 2);
    }
}
