/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      span.rs
 * Purpose:   Source positions carried by every token and every AST node.
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

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A location in a Carmen source unit.
///
/// Lines and columns are **1-based**. The source name is shared between all
/// tokens of one unit, so cloning a `Position` never copies the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub source: Arc<str>,
}

impl Position {
    pub fn new(line: usize, column: usize, source: Arc<str>) -> Self {
        Self {
            line,
            column,
            source,
        }
    }

    /// Position used by synthesized tokens in tests and by nodes built
    /// without a backing source.
    pub fn unknown() -> Self {
        Self {
            line: 0,
            column: 0,
            source: Arc::from("<unknown>"),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}
