/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:     ast/mod.rs
 * Purpose:  The abstract syntax tree produced by the parser.
 *
 * Every node carries the position of its first token and is fully
 * resolved: numbers are decimals, strings are unescaped, and no node
 * refers back to a token.
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

pub mod expr;
pub mod literal;
pub mod param;
pub mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind, MatchArm, UnaryOp};
pub use literal::{Literal, TypeName};
pub use param::Param;
pub use stmt::{ConditionalBranch, Stmt, StmtKind};

/// Serialises a whole program as pretty-printed JSON.
pub fn to_json(nodes: &[Stmt]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(nodes)
}
