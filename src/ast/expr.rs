/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      expr.rs
 * Purpose:   Expression nodes of the Carmen AST.
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

use serde::{Deserialize, Serialize};

use crate::ast::literal::{Literal, TypeName};
use crate::span::Position;

/// An expression node together with the position of its first token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    Grouping(Box<Expr>),
    List(Vec<Expr>),

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// `$x is null` / `$x is not null`
    NullCheck {
        operand: Box<Expr>,
        negated: bool,
    },

    /// `$x is a number`
    TypeCheck {
        operand: Box<Expr>,
        type_name: TypeName,
    },

    Cast {
        operand: Box<Expr>,
        target: TypeName,
    },

    /// `item 2 of $list`, `the third element of $list`
    Index {
        collection: Box<Expr>,
        index: Box<Expr>,
    },

    Slice {
        collection: Box<Expr>,
        from: Box<Expr>,
        to: Box<Expr>,
    },

    Call {
        callee: String,
        arguments: Vec<Expr>,
    },

    Ternary {
        condition: Box<Expr>,
        then_value: Box<Expr>,
        else_value: Box<Expr>,
    },

    Match {
        subject: Box<Expr>,
        arms: Vec<MatchArm>,
        default: Option<Box<Expr>>,
    },
}

/// `PATTERN gives RESULT` inside a `match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchArm {
    pub pattern: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    And,
    Or,
    Equal,
    NotEqual,
    Greater,
    Less,
    AtLeast,
    AtMost,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    Concat,
    Contains,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "^",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Greater => ">",
            BinaryOp::Less => "<",
            BinaryOp::AtLeast => ">=",
            BinaryOp::AtMost => "<=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "xor",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Concat => "++",
            BinaryOp::Contains => "contains",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
    Absolute,
    SquareRoot,
    Length,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Negate => "neg",
            UnaryOp::BitNot => "~",
            UnaryOp::Absolute => "abs",
            UnaryOp::SquareRoot => "sqrt",
            UnaryOp::Length => "len",
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Returns the node name of this expression (for diagnostics and logs).
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Literal(_) => "Literal",
            ExprKind::Identifier(_) => "Identifier",
            ExprKind::Grouping(_) => "Grouping",
            ExprKind::List(_) => "List",
            ExprKind::Binary { .. } => "Binary",
            ExprKind::Unary { .. } => "Unary",
            ExprKind::NullCheck { .. } => "NullCheck",
            ExprKind::TypeCheck { .. } => "TypeCheck",
            ExprKind::Cast { .. } => "Cast",
            ExprKind::Index { .. } => "Index",
            ExprKind::Slice { .. } => "Slice",
            ExprKind::Call { .. } => "Call",
            ExprKind::Ternary { .. } => "Ternary",
            ExprKind::Match { .. } => "Match",
        }
    }

    /// Pretty-prints the expression as a parenthesised prefix form.
    ///
    /// ```text
    /// the sum of $a and $b multiplied by 2  →  (* (+ $a $b) 2)
    /// ```
    pub fn pretty(&self) -> String {
        match &self.kind {
            ExprKind::Literal(value) => value.to_string(),
            ExprKind::Identifier(name) => name.clone(),
            ExprKind::Grouping(inner) => inner.pretty(),
            ExprKind::List(items) => {
                let inner = items.iter().map(Expr::pretty).collect::<Vec<_>>().join(" ");
                format!("[{}]", inner)
            }
            ExprKind::Binary { left, op, right } => {
                format!("({} {} {})", op.symbol(), left.pretty(), right.pretty())
            }
            ExprKind::Unary { op, operand } => format!("({} {})", op.symbol(), operand.pretty()),
            ExprKind::NullCheck { operand, negated } => {
                let op = if *negated { "not-null?" } else { "null?" };
                format!("({} {})", op, operand.pretty())
            }
            ExprKind::TypeCheck { operand, type_name } => {
                format!("(is-a {} {})", operand.pretty(), type_name)
            }
            ExprKind::Cast { operand, target } => format!("(cast {} {})", operand.pretty(), target),
            ExprKind::Index { collection, index } => {
                format!("(item {} {})", index.pretty(), collection.pretty())
            }
            ExprKind::Slice {
                collection,
                from,
                to,
            } => format!(
                "(slice {} {} {})",
                collection.pretty(),
                from.pretty(),
                to.pretty()
            ),
            ExprKind::Call { callee, arguments } => {
                let mut s = format!("(call {}", callee);
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&arg.pretty());
                }
                s.push(')');
                s
            }
            ExprKind::Ternary {
                condition,
                then_value,
                else_value,
            } => format!(
                "(if {} {} {})",
                condition.pretty(),
                then_value.pretty(),
                else_value.pretty()
            ),
            ExprKind::Match {
                subject,
                arms,
                default,
            } => {
                let mut s = format!("(match {}", subject.pretty());
                for arm in arms {
                    s.push_str(&format!(" ({} {})", arm.pattern.pretty(), arm.result.pretty()));
                }
                if let Some(default) = default {
                    s.push_str(&format!(" (otherwise {})", default.pretty()));
                }
                s.push(')');
                s
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
