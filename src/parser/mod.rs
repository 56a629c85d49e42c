/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Root module for the Carmen priority-cascade parser.
 *
 * This module wires together all parser sub-modules, including:
 *   - The parser entry point
 *   - Block segmentation and `if` chains
 *   - The statement and expression cascades
 *   - The depth-aware scanner and shared helpers
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

/// Statement segmentation, chain collection, error recovery.
pub mod blocks;

/// Per-parse state.
pub mod context;

/// Expression productions and their priority table.
pub mod expressions;

/// Rule tables and the cascade drivers.
pub mod grammar;

/// Slice utilities.
pub mod helpers;

/// `Parser`, `ParseOutput` and the `parse()` entry points.
#[allow(clippy::module_inception)]
pub mod parser;

/// Depth-zero keyword search.
pub mod scanner;

/// Statement productions and their priority table.
pub mod statements;

pub use blocks::{collect_if_else_chain, split_block, Segment};
pub use context::ParseContext;
pub use grammar::{ExpressionRule, Fixity, Grammar, GrammarError, StatementRule};
pub use parser::{parse, parse_source, ParseOutput, Parser};
