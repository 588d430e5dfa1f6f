use serde::Deserialize;

use crate::error::ConfigError;

/// When a freshly (re)created fold region starts out expanded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FoldPolicy {
    /// Leave the last block's fold open when its overflow is small.
    pub expand_last_block: bool,
    /// Largest overflow, in lines past the source height, still considered small.
    pub max_expanded_overflow: usize,
}

impl Default for FoldPolicy {
    fn default() -> Self {
        Self {
            expand_last_block: true,
            max_expanded_overflow: 3,
        }
    }
}

impl FoldPolicy {
    /// Policy that keeps every fold collapsed.
    pub fn collapsed() -> Self {
        Self {
            expand_last_block: false,
            ..Self::default()
        }
    }

    pub fn is_expanded(&self, is_last_block: bool, overflow: usize) -> bool {
        self.expand_last_block && is_last_block && overflow <= self.max_expanded_overflow
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub fold: FoldPolicy,
    /// Drop output fragments that are empty or whitespace only.
    pub skip_blank_output: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fold: FoldPolicy::default(),
            skip_blank_output: true,
        }
    }
}

impl PreviewConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
