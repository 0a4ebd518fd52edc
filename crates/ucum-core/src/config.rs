//! Engine configuration
//!
//! Settings come from, in increasing priority:
//!
//! 1. built-in defaults
//! 2. `config.json` in the platform config directory (e.g. `~/.config/ucum/config.json`)
//! 3. `UCUM_*` environment variables

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheConfig;
use crate::error::ConfigError;
use crate::special::DEFAULT_SCALE;

/// Environment variable names
const ENV_PREFIX_ON_NON_METRIC: &str = "UCUM_ENABLE_PREFIX_ON_NON_METRIC_UNITS";
const ENV_MOL_MASS: &str = "UCUM_ENABLE_MOL_MASS_CONVERSION";
const ENV_ANNOT_AFTER_PARENS: &str = "UCUM_ALLOW_ANNOT_AFTER_PARENS";
const ENV_SPECIAL_SCALE: &str = "UCUM_SPECIAL_FUNCTION_SCALE";
const ENV_CACHE_ENABLED: &str = "UCUM_CACHE_ENABLED";
const ENV_CACHE_CAPACITY: &str = "UCUM_CACHE_CAPACITY";

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Accept prefixes on non-metric units such as `k[in_i]`
    pub enable_prefix_on_non_metric_units: bool,
    /// Allow converting between amounts of substance and masses
    pub enable_mol_mass_conversion: bool,
    /// Accept annotations directly after parentheses, `(m/s){speed}`
    pub allow_annot_after_parens: bool,
    /// Fractional digits kept from special-unit function results
    pub special_function_scale: u32,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_prefix_on_non_metric_units: true,
            enable_mol_mass_conversion: true,
            allow_annot_after_parens: true,
            special_function_scale: DEFAULT_SCALE,
            cache: CacheConfig::default(),
        }
    }
}

/// The flags that change results, used as part of cache keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureFlags {
    pub prefix_on_non_metric_units: bool,
    pub mol_mass_conversion: bool,
    pub annot_after_parens: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Config::default().flags()
    }
}

impl Config {
    /// Load from the config file and environment, falling back to defaults
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable config file");
                Self::default()
            }),
            _ => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Path of the user config file
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ucum").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply `UCUM_*` overrides. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let flag = |name: &str| lookup(name).and_then(|value| parse_bool(&value));
        let number = |name: &str| lookup(name).and_then(|value| value.trim().parse::<usize>().ok());

        if let Some(value) = flag(ENV_PREFIX_ON_NON_METRIC) {
            self.enable_prefix_on_non_metric_units = value;
        }
        if let Some(value) = flag(ENV_MOL_MASS) {
            self.enable_mol_mass_conversion = value;
        }
        if let Some(value) = flag(ENV_ANNOT_AFTER_PARENS) {
            self.allow_annot_after_parens = value;
        }
        if let Some(value) = number(ENV_SPECIAL_SCALE).and_then(|n| u32::try_from(n).ok()) {
            self.special_function_scale = value;
        }
        if let Some(value) = flag(ENV_CACHE_ENABLED) {
            self.cache.enabled = value;
        }
        if let Some(value) = number(ENV_CACHE_CAPACITY) {
            self.cache.capacity = value;
        }
    }

    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags {
            prefix_on_non_metric_units: self.enable_prefix_on_non_metric_units,
            mol_mass_conversion: self.enable_mol_mass_conversion,
            annot_after_parens: self.allow_annot_after_parens,
        }
    }

    pub fn with_prefix_on_non_metric_units(mut self, enabled: bool) -> Self {
        self.enable_prefix_on_non_metric_units = enabled;
        self
    }

    pub fn with_mol_mass_conversion(mut self, enabled: bool) -> Self {
        self.enable_mol_mass_conversion = enabled;
        self
    }

    pub fn with_annot_after_parens(mut self, enabled: bool) -> Self {
        self.allow_annot_after_parens = enabled;
        self
    }

    pub fn with_special_function_scale(mut self, scale: u32) -> Self {
        self.special_function_scale = scale;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enable_prefix_on_non_metric_units);
        assert!(config.enable_mol_mass_conversion);
        assert!(config.allow_annot_after_parens);
        assert_eq!(config.special_function_scale, 10);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "allow_annot_after_parens": false }"#).unwrap();
        assert!(!config.allow_annot_after_parens);
        assert!(config.enable_mol_mass_conversion);

        let config = Config::from_json(r#"{ "cache": { "capacity": 16 } }"#).unwrap();
        assert_eq!(config.cache.capacity, 16);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Config::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/ucum/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PREFIX_ON_NON_METRIC, "false"),
            (ENV_SPECIAL_SCALE, "4"),
            (ENV_CACHE_CAPACITY, "0"),
            (ENV_MOL_MASS, "maybe"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert!(!config.enable_prefix_on_non_metric_units);
        assert_eq!(config.special_function_scale, 4);
        assert_eq!(config.cache.capacity, 0);
        assert!(config.enable_mol_mass_conversion);
    }

    #[test]
    fn test_flags() {
        let flags = Config::default().with_mol_mass_conversion(false).flags();
        assert!(!flags.mol_mass_conversion);
        assert!(flags.prefix_on_non_metric_units);
    }
}
