// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

/// Default limit of locals and parameters per function.
pub const DEFAULT_MAX_VARIABLES: usize = 256;

/// Default limit of distinct string literals per compilation unit.
pub const DEFAULT_MAX_STRINGS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenConfig {
    pub max_variables: usize,
    pub max_strings: usize
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
            max_strings: DEFAULT_MAX_STRINGS
        }
    }
}

pub struct CodegenConfigBuilder {
    max_variables: Option<usize>,
    max_strings: Option<usize>
}

impl CodegenConfigBuilder {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            max_variables: None,
            max_strings: None
        }
    }

    pub fn max_variables(mut self, limit: usize) -> Self {
        self.max_variables = Some(limit);
        self
    }

    pub fn max_strings(mut self, limit: usize) -> Self {
        self.max_strings = Some(limit);
        self
    }

    pub fn build(self) -> CodegenConfig {
        CodegenConfig {
            max_variables: self.max_variables.unwrap_or(DEFAULT_MAX_VARIABLES),
            max_strings: self.max_strings.unwrap_or(DEFAULT_MAX_STRINGS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_falls_back_to_defaults() {
        assert_eq!(CodegenConfigBuilder::new().build(), CodegenConfig::default());

        let config = CodegenConfigBuilder::new().max_variables(64).build();
        assert_eq!(config.max_variables, 64);
        assert_eq!(config.max_strings, DEFAULT_MAX_STRINGS);
    }
}
