/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      stmt.rs
 * Purpose:   Statement nodes of the Carmen AST.
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

use crate::ast::expr::Expr;
use crate::ast::param::Param;
use crate::span::Position;

/// A statement node together with the position of its first token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub position: Position,
}

/// All Carmen statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /* ----------------------------- */
    /* DEFINITIONS                   */
    /* ----------------------------- */
    EntryPoint {
        body: Vec<Stmt>,
    },

    FunctionDefinition {
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
    },

    StructureDefinition {
        name: String,
        fields: Vec<Param>,
    },

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */
    Block(Vec<Stmt>),

    /// One node for a whole `if` / `otherwise if` / `otherwise` chain.
    Conditional {
        condition: Expr,
        body: Vec<Stmt>,
        else_ifs: Vec<ConditionalBranch>,
        else_body: Option<Vec<Stmt>>,
    },

    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    Until {
        condition: Expr,
        body: Vec<Stmt>,
    },

    DoWhile {
        body: Vec<Stmt>,
        condition: Expr,
    },

    DoUntil {
        body: Vec<Stmt>,
        condition: Expr,
    },

    ForEach {
        variable: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },

    ForRange {
        variable: String,
        from: Expr,
        to: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
    },

    Repeat {
        count: Expr,
        body: Vec<Stmt>,
    },

    TryCatch {
        body: Vec<Stmt>,
        error_name: Option<String>,
        handler: Vec<Stmt>,
        finally: Option<Vec<Stmt>>,
    },

    Return(Option<Expr>),
    Break,
    Continue,
    Exit,
    Throw(Expr),

    /* ----------------------------- */
    /* VARIABLES                     */
    /* ----------------------------- */

    /// `set TARGET equal to VALUE`; the target is an identifier or an index.
    Assignment {
        target: Expr,
        value: Expr,
    },

    Declaration {
        name: String,
        value: Expr,
    },

    Increment {
        name: String,
        amount: Option<Expr>,
    },

    Decrement {
        name: String,
        amount: Option<Expr>,
    },

    Swap {
        left: String,
        right: String,
    },

    /* ----------------------------- */
    /* LISTS                         */
    /* ----------------------------- */
    ListAdd {
        value: Expr,
        list: Expr,
    },

    ListRemove {
        value: Expr,
        list: Expr,
    },

    /* ----------------------------- */
    /* INPUT / OUTPUT                */
    /* ----------------------------- */
    Print(Expr),
    ReadInto(String),
    Assert(Expr),
    Import(String),

    Expression(Expr),
}

/// An `otherwise if C then BODY` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalBranch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Returns the node name of this statement (for diagnostics and logs).
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            StmtKind::EntryPoint { .. } => "EntryPoint",
            StmtKind::FunctionDefinition { .. } => "FunctionDefinition",
            StmtKind::StructureDefinition { .. } => "StructureDefinition",
            StmtKind::Block(_) => "Block",
            StmtKind::Conditional { .. } => "Conditional",
            StmtKind::While { .. } => "While",
            StmtKind::Until { .. } => "Until",
            StmtKind::DoWhile { .. } => "DoWhile",
            StmtKind::DoUntil { .. } => "DoUntil",
            StmtKind::ForEach { .. } => "ForEach",
            StmtKind::ForRange { .. } => "ForRange",
            StmtKind::Repeat { .. } => "Repeat",
            StmtKind::TryCatch { .. } => "TryCatch",
            StmtKind::Return(_) => "Return",
            StmtKind::Break => "Break",
            StmtKind::Continue => "Continue",
            StmtKind::Exit => "Exit",
            StmtKind::Throw(_) => "Throw",
            StmtKind::Assignment { .. } => "Assignment",
            StmtKind::Declaration { .. } => "Declaration",
            StmtKind::Increment { .. } => "Increment",
            StmtKind::Decrement { .. } => "Decrement",
            StmtKind::Swap { .. } => "Swap",
            StmtKind::ListAdd { .. } => "ListAdd",
            StmtKind::ListRemove { .. } => "ListRemove",
            StmtKind::Print(_) => "Print",
            StmtKind::ReadInto(_) => "ReadInto",
            StmtKind::Assert(_) => "Assert",
            StmtKind::Import(_) => "Import",
            StmtKind::Expression(_) => "Expression",
        }
    }

    /// Serialises the statement tree as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
