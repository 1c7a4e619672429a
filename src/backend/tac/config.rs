//! Code generation configuration

use crate::frontend::symbols::DEFAULT_WORD_SIZE;

/// Settings for one TAC generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// Bytes per storage slot; arrays reserve `size * word_size`
    pub word_size: usize,
    /// Prefix of generated temporaries (`t0`, `t1`, ...)
    pub temp_prefix: String,
    /// Prefix of generated branch labels (`L0`, `L1`, ...)
    pub label_prefix: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            word_size: DEFAULT_WORD_SIZE,
            temp_prefix: "t".to_string(),
            label_prefix: "L".to_string(),
        }
    }
}

impl GenConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage slot size
    pub fn with_word_size(mut self, word_size: usize) -> Self {
        self.word_size = word_size;
        self
    }

    /// Set the temporary name prefix
    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Set the label name prefix
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }
}
