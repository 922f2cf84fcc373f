//! Comparison configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a comparison run.
///
/// Defaults mirror the tool's interactive sweet spot: short excerpts,
/// block statements skippable, no per-round output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Truncation bound (in bytes) for rendered excerpts of container
    /// nodes. Default: 50
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,
    /// Whether a lone `BlockStatement` on one side of a type mismatch may
    /// be skipped without arbitration. Default: true
    #[serde(default = "default_skip_blocks")]
    pub skip_blocks: bool,
    /// Whether to log the matched pair of every `Same` round.
    /// Default: false
    #[serde(default)]
    pub display_intermediate: bool,
    /// Whether rendered excerpts replace newlines with spaces.
    /// Default: false
    #[serde(default)]
    pub flatten_newlines: bool,
}

fn default_snippet_length() -> usize {
    50
}

fn default_skip_blocks() -> bool {
    true
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            snippet_length: default_snippet_length(),
            skip_blocks: default_skip_blocks(),
            display_intermediate: false,
            flatten_newlines: false,
        }
    }
}

impl CompareConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the excerpt truncation bound.
    pub fn snippet_length(mut self, n: usize) -> Self {
        self.snippet_length = n;
        self
    }

    /// Enables or disables block-statement auto-skip.
    pub fn skip_blocks(mut self, yes: bool) -> Self {
        self.skip_blocks = yes;
        self
    }

    /// Enables or disables per-round matched-pair logging.
    pub fn display_intermediate(mut self, yes: bool) -> Self {
        self.display_intermediate = yes;
        self
    }

    /// Enables or disables newline flattening in excerpts.
    pub fn flatten_newlines(mut self, yes: bool) -> Self {
        self.flatten_newlines = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompareConfig::default();
        assert_eq!(config.snippet_length, 50);
        assert!(config.skip_blocks);
        assert!(!config.display_intermediate);
        assert!(!config.flatten_newlines);
    }

    #[test]
    fn test_builder() {
        let config = CompareConfig::new()
            .snippet_length(80)
            .skip_blocks(false)
            .display_intermediate(true)
            .flatten_newlines(true);

        assert_eq!(config.snippet_length, 80);
        assert!(!config.skip_blocks);
        assert!(config.display_intermediate);
        assert!(config.flatten_newlines);
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let config: CompareConfig = serde_json::from_str(r#"{"skip_blocks": false}"#).unwrap();
        assert_eq!(config.snippet_length, 50);
        assert!(!config.skip_blocks);
    }
}
