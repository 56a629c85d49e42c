/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      grammar.rs
 * Purpose:   The priority-ordered production tables and the two cascade
 *            drivers, `parse_expression` and `parse_statement`.
 *
 * A cascade tries its productions from the highest priority down and
 * returns the first one that accepts the slice:
 *
 *   Ok(Some(node))  the production matched
 *   Ok(None)        soft rejection, try the next production
 *   Err(error)      the production committed and then failed; stop
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

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::ast::{Expr, Stmt};
use crate::error::ParseResult;
use crate::lexer::token::Token;
use crate::parser::context::ParseContext;
use crate::parser::{expressions, statements};

pub type ExpressionFn = fn(&Grammar, &mut ParseContext<'_>, &[Token]) -> ParseResult<Option<Expr>>;
pub type StatementFn = fn(&Grammar, &mut ParseContext<'_>, &[Token]) -> ParseResult<Option<Stmt>>;

/// Which ends of its slice a production leaves open to an operand.
///
/// `not X` and `call $f with A` are prefix forms: their last operand runs
/// to the end of the slice. `X is null` is postfix. `A plus B` is open on
/// both sides. `( X )`, literals and `cast X as a T` are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Closed,
    Prefix,
    Postfix,
    Infix,
    /// Takes the fixity of whatever follows its first token (articles).
    Transparent,
}

impl Fixity {
    pub fn open_left(self) -> bool {
        matches!(self, Fixity::Postfix | Fixity::Infix)
    }

    pub fn open_right(self) -> bool {
        matches!(self, Fixity::Prefix | Fixity::Infix)
    }
}

/// One entry of the expression cascade.
#[derive(Clone, Copy)]
pub struct ExpressionRule {
    pub name: &'static str,
    pub priority: u16,
    pub fixity: Fixity,
    pub try_parse: ExpressionFn,
}

/// One entry of the statement cascade.
#[derive(Clone, Copy)]
pub struct StatementRule {
    pub name: &'static str,
    pub priority: u16,
    pub try_parse: StatementFn,
}

impl fmt::Debug for ExpressionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.priority)
    }
}

impl fmt::Debug for StatementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.priority)
    }
}

/// Raised when a table does not define a total order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{table} rules `{first}` and `{second}` share priority {priority}")]
pub struct GrammarError {
    pub table: &'static str,
    pub priority: u16,
    pub first: &'static str,
    pub second: &'static str,
}

static SHARED: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new(expressions::RULES, statements::RULES)
        .expect("built-in rule priorities are unique")
});

/// Both cascades, each sorted from the highest priority down.
///
/// Holds no per-parse state and is shared read-only by every parse.
#[derive(Debug)]
pub struct Grammar {
    expressions: Vec<ExpressionRule>,
    statements: Vec<StatementRule>,
}

impl Grammar {
    /// Builds a grammar from unsorted rule tables.
    ///
    /// # Errors
    /// Two rules of the same table with equal priority.
    pub fn new(
        expressions: &[ExpressionRule],
        statements: &[StatementRule],
    ) -> Result<Self, GrammarError> {
        let mut expressions = expressions.to_vec();
        expressions.sort_by(|a, b| b.priority.cmp(&a.priority));
        if let Some(pair) = expressions.windows(2).find(|w| w[0].priority == w[1].priority) {
            return Err(GrammarError {
                table: "expression",
                priority: pair[0].priority,
                first: pair[0].name,
                second: pair[1].name,
            });
        }

        let mut statements = statements.to_vec();
        statements.sort_by(|a, b| b.priority.cmp(&a.priority));
        if let Some(pair) = statements.windows(2).find(|w| w[0].priority == w[1].priority) {
            return Err(GrammarError {
                table: "statement",
                priority: pair[0].priority,
                first: pair[0].name,
                second: pair[1].name,
            });
        }

        Ok(Self {
            expressions,
            statements,
        })
    }

    /// The standard Carmen grammar, built once per process.
    pub fn shared() -> &'static Grammar {
        &SHARED
    }

    pub fn expression_rules(&self) -> &[ExpressionRule] {
        &self.expressions
    }

    pub fn statement_rules(&self) -> &[StatementRule] {
        &self.statements
    }

    /// Parses `tokens` as one complete expression.
    ///
    /// # Returns
    /// - `Ok(Some(expr))` from the first production that accepts the slice
    /// - `Ok(None)` if every production rejects it (including an empty slice)
    /// - `Err(error)` as soon as a committed production fails
    pub fn parse_expression(
        &self,
        ctx: &mut ParseContext<'_>,
        tokens: &[Token],
    ) -> ParseResult<Option<Expr>> {
        Ok(self.select_rule(ctx, tokens)?.map(|(_, expr)| expr))
    }

    /// Like [`Grammar::parse_expression`], also naming the production
    /// that matched.
    pub fn select_expression(
        &self,
        ctx: &mut ParseContext<'_>,
        tokens: &[Token],
    ) -> ParseResult<Option<(&'static str, Expr)>> {
        Ok(self
            .select_rule(ctx, tokens)?
            .map(|(rule, expr)| (rule.name, expr)))
    }

    /// Runs the expression cascade once per slice; repeats come from the
    /// context's memo.
    pub(crate) fn select_rule(
        &self,
        ctx: &mut ParseContext<'_>,
        tokens: &[Token],
    ) -> ParseResult<Option<(ExpressionRule, Expr)>> {
        if tokens.is_empty() {
            return Ok(None);
        }
        if let Some(selection) = ctx.remembered(tokens) {
            return Ok(selection.clone());
        }

        let selection = ctx.nested("parse_expression", tokens, |ctx| {
            for rule in &self.expressions {
                if let Some(expr) = (rule.try_parse)(self, ctx, tokens)? {
                    log::trace!(target: "carmen", "expression `{}` via {}", expr, rule.name);
                    return Ok(Some((*rule, expr)));
                }
            }
            Ok(None)
        })?;
        ctx.remember(tokens, &selection);
        Ok(selection)
    }

    /// Parses `tokens` (one statement slice, terminator included) as a
    /// single statement.
    pub fn parse_statement(
        &self,
        ctx: &mut ParseContext<'_>,
        tokens: &[Token],
    ) -> ParseResult<Option<Stmt>> {
        Ok(self.select_statement(ctx, tokens)?.map(|(_, stmt)| stmt))
    }

    pub fn select_statement(
        &self,
        ctx: &mut ParseContext<'_>,
        tokens: &[Token],
    ) -> ParseResult<Option<(&'static str, Stmt)>> {
        if tokens.is_empty() {
            return Ok(None);
        }

        ctx.nested("parse_statement", tokens, |ctx| {
            for rule in &self.statements {
                if let Some(stmt) = (rule.try_parse)(self, ctx, tokens)? {
                    log::trace!(target: "carmen", "statement {} via {}", stmt.type_name(), rule.name);
                    return Ok(Some((rule.name, stmt)));
                }
            }
            Ok(None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::events::ParseObserver;
    use crate::lexer::{condense, tokenize};

    fn never(_: &Grammar, _: &mut ParseContext<'_>, _: &[Token]) -> ParseResult<Option<Expr>> {
        Ok(None)
    }

    #[test]
    fn shared_tables_are_sorted_and_unique() {
        let grammar = Grammar::shared();
        for table in [
            grammar.expression_rules().iter().map(|r| r.priority).collect::<Vec<_>>(),
            grammar.statement_rules().iter().map(|r| r.priority).collect::<Vec<_>>(),
        ] {
            assert!(table.windows(2).all(|w| w[0] > w[1]), "{:?}", table);
        }
    }

    #[test]
    fn duplicate_priorities_are_rejected() {
        let rules = [
            ExpressionRule { name: "one", priority: 5, fixity: Fixity::Closed, try_parse: never },
            ExpressionRule { name: "two", priority: 5, fixity: Fixity::Closed, try_parse: never },
        ];
        let error = Grammar::new(&rules, &[]).unwrap_err();
        assert_eq!(error.priority, 5);
        assert_eq!(error.table, "expression");
    }

    #[test]
    fn identifiers_are_tried_last() {
        let grammar = Grammar::shared();
        let last = grammar.expression_rules().last().unwrap();
        assert_eq!(last.name, "identifier");
        assert_eq!(last.priority, 0);
    }

    #[test]
    fn empty_slice_is_a_soft_rejection() {
        let options = ParseOptions::default();
        let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
        let mut ctx = ParseContext::new(&options, &observers);
        assert!(Grammar::shared().parse_expression(&mut ctx, &[]).unwrap().is_none());
        assert!(Grammar::shared().parse_statement(&mut ctx, &[]).unwrap().is_none());
    }

    #[test]
    fn repeated_selection_is_served_from_the_memo() {
        let tokens = condense(&tokenize("$a plus $b multiplied by 2", "t").unwrap()).unwrap();
        let options = ParseOptions::default();
        let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
        let mut ctx = ParseContext::new(&options, &observers);

        let first = Grammar::shared().select_expression(&mut ctx, &tokens).unwrap();
        let second = Grammar::shared().select_expression(&mut ctx, &tokens).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.map(|(name, _)| name), Some("additive"));
    }
}
