// Path: crates/types/src/config/mod.rs

//! Configuration structures for the template engine.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed parameters passed to the native PoSt verifier on every call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PostVerifierConfig {
    /// Sector size in bytes the proofs were generated for.
    #[serde(default = "default_sector_size")]
    pub sector_size: u64,
    /// Number of challenges per proof.
    #[serde(default = "default_challenge_count")]
    pub challenge_count: u64,
}

fn default_sector_size() -> u64 {
    1024
}
fn default_challenge_count() -> u64 {
    2
}

impl Default for PostVerifierConfig {
    fn default() -> Self {
        Self {
            sector_size: default_sector_size(),
            challenge_count: default_challenge_count(),
        }
    }
}

/// Top-level configuration for template evaluation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TemplateEngineConfig {
    /// PoSt verifier parameters.
    #[serde(default)]
    pub verifier: PostVerifierConfig,
}

impl TemplateEngineConfig {
    /// Parses a configuration from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
