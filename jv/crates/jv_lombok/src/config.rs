//! Augmentation settings loaded from a TOML file.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration keys of the built-in processors.
pub const PROCESSOR_KEYS: &[&str] = &[
    "all_args_constructor",
    "builder",
    "equals_and_hash_code",
    "to_string",
    "wither",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown processor '{0}' in [processors]; expected one of: {keys}", keys = PROCESSOR_KEYS.join(", "))]
    UnknownProcessor(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct AugmentConfig {
    /// Per-processor switches; missing keys mean enabled.
    pub processors: BTreeMap<String, bool>,
    pub accessors: AccessorDefaults,
    pub equals_and_hash_code: EqualsAndHashCodeSettings,
}

/// Accessor conventions applied when neither field nor class carries `@Accessors`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct AccessorDefaults {
    pub prefix: Vec<String>,
    pub fluent: bool,
    pub chain: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EqualsAndHashCodeSettings {
    /// Warn when `callSuper` is omitted on a class with a superclass.
    pub call_super_warning: bool,
}

impl Default for EqualsAndHashCodeSettings {
    fn default() -> Self {
        Self {
            call_super_warning: true,
        }
    }
}

impl AugmentConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AugmentConfig = toml::from_str(source)?;
        if let Some(unknown) = config
            .processors
            .keys()
            .find(|key| !PROCESSOR_KEYS.contains(&key.as_str()))
        {
            return Err(ConfigError::UnknownProcessor(unknown.clone()));
        }
        Ok(config)
    }

    pub fn is_enabled(&self, processor: &str) -> bool {
        self.processors.get(processor).copied().unwrap_or(true)
    }
}
