use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const MAX_DEPTH_LIMIT: u32 = 64;

/// What the builder does with a point outside the extent.
///
/// Non-finite points are never clamped: under `Clamp` they are skipped like
/// under `Skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Leave the point out and report it on the built tree.
    #[default]
    Skip,
    /// Fail the whole build on the first offending point.
    Strict,
    /// Move the point to the nearest location inside the extent.
    Clamp,
}

/// ```toml
/// max_depth = 20
/// bounds_policy = "clamp"
/// dedup = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Nodes at this depth never subdivide; extra points bucket there.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
    /// Drop points equal to one already held by the target leaf.
    #[serde(default)]
    pub dedup: bool,
}

fn default_max_depth() -> u32 { 32 }

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            bounds_policy: BoundsPolicy::default(),
            dedup: false,
        }
    }
}

impl BuildConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded build config from {:?}: {:?}", path, config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidMaxDepth { got: self.max_depth, limit: MAX_DEPTH_LIMIT });
        }
        Ok(())
    }
}
