// Path: crates/cli/src/util.rs

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use vesta_types::app::Hash32;
use vesta_types::config::TemplateEngineConfig;

/// Loads the engine configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<TemplateEngineConfig> {
    match path {
        Some(p) => TemplateEngineConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(TemplateEngineConfig::default()),
    }
}

/// Reads an argument that is either `@path` (file contents) or a literal value.
pub fn read_arg(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Failed to read {}", path)),
        None => Ok(value.trim().to_string()),
    }
}

/// Decodes hex, tolerating a `0x` prefix.
pub fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).context("Invalid hex")
}

/// Decodes a 32-byte hash from hex.
pub fn decode_hash(value: &str) -> Result<Hash32> {
    let bytes = decode_hex(value)?;
    Hash32::try_from(bytes.as_slice())
        .map_err(|_| anyhow!("Expected 32 bytes, got {}", bytes.len()))
}
