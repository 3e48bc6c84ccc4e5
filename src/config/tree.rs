//! Registry tree configuration module.
//!
//! Settings applied to every [`LanaiGlobTree`](crate::data_structures::LanaiGlobTree)
//! built by the application.

use super::{ConfigResult, Validate};
use crate::data_structures::LanaiGlobTreeConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `tree.max_depth`.
pub const MAX_TREE_DEPTH: usize = 4096;

/// Registry tree configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of segments below the root a stored path may reach
    pub max_depth: usize,

    /// Whether queries include matching stored patterns unless told otherwise
    pub matchers_by_default: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        let defaults = LanaiGlobTreeConfig::default();
        Self {
            max_depth: defaults.max_depth,
            matchers_by_default: defaults.matchers_by_default,
        }
    }
}

impl Validate for TreeConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 || self.max_depth > MAX_TREE_DEPTH {
            return Err(ConfigError::ValueOutOfRange {
                key: "tree.max_depth".to_string(),
                message: format!("must be between 1 and {MAX_TREE_DEPTH}"),
            });
        }
        Ok(())
    }
}

impl From<&TreeConfig> for LanaiGlobTreeConfig {
    fn from(config: &TreeConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            matchers_by_default: config.matchers_by_default,
        }
    }
}
