//! Sync extension configuration (`dbsync.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::io::runner::DEFAULT_TOOL_BIN;

/// Sentinel cache name meaning "skip cache invalidation".
pub const CACHE_TARGET_NONE: &str = "none";

/// Cache bucket to invalidate after each sync, or the `none` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheTarget {
    None,
    Named(String),
}

impl CacheTarget {
    pub fn parse(raw: &str) -> Self {
        if raw == CACHE_TARGET_NONE {
            CacheTarget::None
        } else {
            CacheTarget::Named(raw.to_string())
        }
    }
}

/// Resolved extension configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing optional fields default to the inert behavior: no
/// triggers fire, no cache is cleared, no config file is passed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Source alias, without the leading `@`.
    pub source: String,

    /// Destination alias, without the leading `@`.
    pub destination: String,

    /// Sync before the suite starts.
    pub populate: bool,

    /// Sync after each test ends.
    pub cleanup: bool,

    /// Pass the fixed tool configuration file via `-c`.
    pub use_config_file: bool,

    /// Re-emit the executed command and captured stdout through the sink.
    pub verbose: bool,

    /// Cache bucket to clear on the destination after each sync, or `none`.
    pub clear_cache: String,

    /// External tool binary.
    pub tool_bin: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            populate: false,
            cleanup: false,
            use_config_file: false,
            verbose: false,
            clear_cache: CACHE_TARGET_NONE.to_string(),
            tool_bin: DEFAULT_TOOL_BIN.to_string(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.source.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(SyncError::Configuration(
                "source and destination aliases are not configured".to_string(),
            ));
        }
        if self.clear_cache.trim().is_empty() {
            return Err(SyncError::Configuration(format!(
                "clear_cache must be a cache name or \"{CACHE_TARGET_NONE}\""
            )));
        }
        if self.tool_bin.trim().is_empty() {
            return Err(SyncError::Configuration(
                "tool_bin must be a non-empty command".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cache_target(&self) -> CacheTarget {
        CacheTarget::parse(&self.clear_cache)
    }
}

/// Load config from a TOML file. The file is required: without aliases the
/// extension has nothing to do.
pub fn load_config(path: &Path) -> Result<SyncConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
