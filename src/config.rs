/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      config.rs
 * Purpose:   Options controlling a single parse.
 *
 * License:
 * This file is part of the Carmen programming language project.
 *
 * Carmen is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use serde::{Deserialize, Serialize};

/// Default limit for nested expressions and blocks.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Options for one parse.
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```text
/// { "require_terminators": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Name used in positions produced by `parse_source`.
    pub source_name: String,

    /// Treat a final statement without `.` as an error instead of a warning.
    pub require_terminators: bool,

    /// Maximum recursion depth of the cascades.
    pub max_nesting_depth: usize,

    /// Log a warning for expression statements whose value is discarded.
    pub warn_on_discarded_values: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_name: "<input>".to_string(),
            require_terminators: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            warn_on_discarded_values: true,
        }
    }
}

impl ParseOptions {
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn with_require_terminators(mut self, require: bool) -> Self {
        self.require_terminators = require;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_warn_on_discarded_values(mut self, warn: bool) -> Self {
        self.warn_on_discarded_values = warn;
        self
    }

    /// Reads options from a JSON document; missing fields keep defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options = ParseOptions::from_json(r#"{ "require_terminators": true }"#).unwrap();
        assert!(options.require_terminators);
        assert_eq!(options.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(options.source_name, "<input>");
    }

    #[test]
    fn builders_chain() {
        let options = ParseOptions::default()
            .with_source_name("main.carmen")
            .with_max_nesting_depth(8)
            .with_warn_on_discarded_values(false);
        assert_eq!(options.source_name, "main.carmen");
        assert_eq!(options.max_nesting_depth, 8);
        assert!(!options.warn_on_discarded_values);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ParseOptions::from_json(r#"{ "max_nesting_depth": "deep" }"#).is_err());
    }
}
