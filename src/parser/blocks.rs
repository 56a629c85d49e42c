/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:     blocks.rs
 * Purpose:  Statement segmentation, `if` chain collection, and the
 *           statement-level error recovery point.
 *
 * --------------------------------------------------------------------------
 *  LICENSE
 * --------------------------------------------------------------------------
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
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * A block's tokens go through three steps:
 *
 *   1. `split_block` cuts them into statement segments. A segment with
 *      broken block structure carries its error instead.
 *   2. `parse_block` walks the slices. A slice starting with `if` pulls
 *      in the `otherwise if` / `otherwise` slices after it
 *      (`collect_if_else_chain`) and the group becomes one conditional.
 *   3. Every other slice goes to the statement cascade.
 *
 * Carmen has no keyword that closes an `if` chain. Whether a chain
 * continues is only visible from the first keyword of the next slice,
 * which is why chains are assembled here and not inside a production.
 *
 * `parse_block` is also where hard errors stop: an error is recorded and
 * parsing resumes at the next statement.
 *
 * ==========================================================================
 */

use crate::ast::{ConditionalBranch, Stmt, StmtKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::Token;
use crate::parser::context::ParseContext;
use crate::parser::expressions::required;
use crate::parser::grammar::Grammar;
use crate::parser::helpers::{enclosed, is_only_terminators, starts_with, strip_terminator};
use crate::parser::scanner::{all_at_depth_zero, first_at_depth_zero};

use Keyword as K;

/* ----------------------------- */
/* SEGMENTATION                  */
/* ----------------------------- */

/// One statement's worth of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'t> {
    /// A slice for the statement cascade.
    Statement(&'t [Token]),
    /// Tokens whose block structure is broken. Only this segment is lost.
    Broken {
        tokens: &'t [Token],
        error: ParseError,
    },
}

impl<'t> Segment<'t> {
    pub fn tokens(&self) -> &'t [Token] {
        match self {
            Segment::Statement(tokens) | Segment::Broken { tokens, .. } => tokens,
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, Segment::Broken { .. })
    }
}

/// Cuts the inside of a block into statement segments.
///
/// # Boundaries
/// - a `.` at depth zero ends a statement and stays in its slice
/// - a `}` / `fin` that returns to depth zero ends a statement, unless the
///   next token continues it:
///     - `while` / `until` after a statement that began with `do`
///     - `otherwise if` / `otherwise`
///     - `catch` / `finally`
///
/// Slices holding nothing but `.` are dropped.
///
/// # Broken segments (`C0005`)
/// - a closer with no opener ends a broken segment; scanning resumes after
///   it at depth zero
/// - an opener never closed breaks the trailing segment
/// - a trailing statement without `.` when `require_terminators` is set
///
/// # Example
/// ```text
/// do { set $x equal to 1 . } while $x is less than 10 .  print $x .
/// └──────────────────── one slice ──────────────────────┘ └─ two ─┘
/// ```
pub fn split_block<'t>(ctx: &mut ParseContext<'_>, tokens: &'t [Token]) -> Vec<Segment<'t>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_do_block = false;
    let mut i = 0;

    while i < tokens.len() {
        let keyword = tokens[i].keyword;

        if i == start {
            in_do_block = keyword == K::Do;
        }

        if keyword.is_opener() {
            depth += 1;
        } else if keyword.is_closer() {
            if depth == 0 {
                segments.push(Segment::Broken {
                    tokens: &tokens[start..=i],
                    error: ParseError::block_structure(
                        "split_block",
                        format!("`{}` closes a block that was never opened", tokens[i].text),
                        &tokens[i..=i],
                    ),
                });
                start = i + 1;
                i += 1;
                continue;
            }
            depth -= 1;

            if depth == 0 && keyword == K::BlockEnd {
                match tokens.get(i + 1).map(|t| t.keyword) {
                    Some(K::While | K::Until) if in_do_block => {
                        in_do_block = false;
                        i += 1;
                    }
                    Some(K::OtherwiseIf | K::Otherwise | K::Catch | K::Finally) => {}
                    _ => {
                        push(&mut segments, &tokens[start..=i]);
                        start = i + 1;
                    }
                }
            }
        } else if keyword == K::EndOfStatement && depth == 0 {
            push(&mut segments, &tokens[start..=i]);
            start = i + 1;
        }

        i += 1;
    }

    let rest = &tokens[start..];
    if depth > 0 {
        segments.push(Segment::Broken {
            tokens: rest,
            error: ParseError::block_structure(
                "split_block",
                "statement opens a block that is never closed",
                rest,
            )
            .with_help("close it with `}` or `fin`"),
        });
    } else if !is_only_terminators(rest) {
        if ctx.options().require_terminators {
            segments.push(Segment::Broken {
                tokens: rest,
                error: ParseError::block_structure(
                    "split_block",
                    "statement is missing its closing `.`",
                    rest,
                ),
            });
        } else {
            let at = &rest[0].position;
            ctx.warn(format!("{}: statement is missing its closing `.`", at));
            push(&mut segments, rest);
        }
    }

    segments
}

fn push<'t>(segments: &mut Vec<Segment<'t>>, slice: &'t [Token]) {
    if !is_only_terminators(slice) {
        segments.push(Segment::Statement(slice));
    }
}

/* ----------------------------- */
/* CHAIN COLLECTION              */
/* ----------------------------- */

/// Collects an `if` chain starting at `slices[start]`.
///
/// Takes the `if` slice, every following slice that starts with
/// `otherwise if`, then one slice starting with `otherwise` if present.
/// Anything else ends the chain.
///
/// # Returns
/// The collected slices and how many were consumed (at least one).
pub fn collect_if_else_chain<'t>(slices: &[&'t [Token]], start: usize) -> (Vec<&'t [Token]>, usize) {
    let mut chain = vec![slices[start]];
    let mut next = start + 1;

    while let Some(&slice) = slices.get(next).filter(|s| starts_with(s, K::OtherwiseIf)) {
        chain.push(slice);
        next += 1;
    }
    if let Some(&slice) = slices.get(next).filter(|s| starts_with(s, K::Otherwise)) {
        chain.push(slice);
        next += 1;
    }

    let consumed = next - start;
    (chain, consumed)
}

/// Splits one slice into clauses at each top-level `}` directly followed
/// by `otherwise if` / `otherwise`.
fn split_clauses(slice: &[Token]) -> Vec<&[Token]> {
    let mut clauses = Vec::new();
    let mut start = 0;

    for end in all_at_depth_zero(slice, K::BlockEnd) {
        let continues = slice
            .get(end + 1)
            .is_some_and(|t| matches!(t.keyword, K::OtherwiseIf | K::Otherwise));
        if continues {
            clauses.push(&slice[start..=end]);
            start = end + 1;
        }
    }
    clauses.push(&slice[start..]);

    clauses
}

/// Parses a collected chain into one `Conditional` statement.
///
/// # Errors (`C0004`)
/// - the first clause does not start with `if`
/// - an `otherwise` clause is followed by more clauses
/// - an `if` / `otherwise if` clause has no `then`, or its condition or
///   body does not parse
pub fn parse_conditional(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    chain: &[&[Token]],
) -> ParseResult<Stmt> {
    const FUNCTION: &str = "parse_conditional";

    let clauses: Vec<&[Token]> = chain.iter().flat_map(|slice| split_clauses(slice)).collect();

    let Some((first, rest)) = clauses.split_first() else {
        return Err(ParseError::malformed_chain(FUNCTION, "empty conditional", &[]));
    };
    if !starts_with(first, K::If) {
        return Err(ParseError::malformed_chain(
            FUNCTION,
            "a conditional must start with `if`",
            first,
        ));
    }

    let (condition, body) = parse_clause(grammar, ctx, first)?;
    let mut else_ifs = Vec::new();
    let mut else_body = None;

    for (i, clause) in rest.iter().enumerate() {
        match clause.first().map(|t| t.keyword) {
            Some(K::OtherwiseIf) => {
                let (condition, body) = parse_clause(grammar, ctx, clause)?;
                else_ifs.push(ConditionalBranch {
                    condition,
                    body,
                    position: clause[0].position.clone(),
                });
            }
            Some(K::Otherwise) if i + 1 == rest.len() => {
                else_body = Some(parse_body(grammar, ctx, FUNCTION, &clause[1..], clause)?);
            }
            Some(K::Otherwise) => {
                return Err(ParseError::malformed_chain(
                    FUNCTION,
                    "`otherwise` must be the last branch of a conditional",
                    clause,
                ))
            }
            _ => {
                return Err(ParseError::malformed_chain(
                    FUNCTION,
                    format!("unexpected `{}` in a conditional", crate::lexer::token::render(clause)),
                    clause,
                ))
            }
        }
    }

    Ok(Stmt::new(
        StmtKind::Conditional {
            condition,
            body,
            else_ifs,
            else_body,
        },
        first[0].position.clone(),
    ))
}

/// `if C then BODY` or `otherwise if C then BODY`.
fn parse_clause(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    clause: &[Token],
) -> ParseResult<(crate::ast::Expr, Vec<Stmt>)> {
    const FUNCTION: &str = "parse_conditional";

    let then = first_at_depth_zero(clause, K::Then, 1).ok_or_else(|| {
        ParseError::malformed_chain(
            FUNCTION,
            format!("`{}` has no `then`", clause[0].text),
            clause,
        )
        .with_help("write `if CONDITION then ...`")
    })?;

    let condition = required(grammar, ctx, FUNCTION, "a condition", &clause[1..then], clause)
        .map_err(|e| match e.function {
            FUNCTION => ParseError::malformed_chain(FUNCTION, e.message, &e.tokens),
            _ => e,
        })?;
    let body = parse_body(grammar, ctx, FUNCTION, &clause[then + 1..], clause)?;

    Ok((condition, body))
}

/* ----------------------------- */
/* BODIES & BLOCKS               */
/* ----------------------------- */

/// Parses the body of a compound statement.
///
/// A body is either a block (`{ … }` or `execute the following ; … fin`,
/// optionally followed by `.`) or a plain run of statements.
///
/// # Errors
/// An empty body is a missing part of `whole`.
pub fn parse_body(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    function: &'static str,
    tokens: &[Token],
    whole: &[Token],
) -> ParseResult<Vec<Stmt>> {
    let trimmed = strip_terminator(tokens);
    if trimmed.is_empty() {
        return Err(ParseError::missing(function, "a body", whole));
    }

    match enclosed(trimmed, K::BlockStart) {
        Some(inner) => ctx.nested(function, whole, |ctx| Ok(parse_block(grammar, ctx, inner))),
        None => ctx.nested(function, whole, |ctx| Ok(parse_block(grammar, ctx, tokens))),
    }
}

/// Parses a list of statements, recovering from errors.
///
/// Each statement unit (one slice, or a collected `if` chain) is parsed on
/// its own. A hard error, a broken segment, or a unit no production
/// accepts is recorded in `ctx` and parsing continues with the next unit.
pub fn parse_block(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> Vec<Stmt> {
    let mut nodes = Vec::new();
    let mut run: Vec<&[Token]> = Vec::new();

    for segment in split_block(ctx, tokens) {
        match segment {
            Segment::Statement(slice) => run.push(slice),
            Segment::Broken { error, .. } => {
                parse_run(grammar, ctx, &run, &mut nodes);
                run.clear();
                ctx.report_error(error);
            }
        }
    }
    parse_run(grammar, ctx, &run, &mut nodes);

    nodes
}

/// Parses consecutive well-formed slices. A chain never reaches across a
/// broken segment.
fn parse_run(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    slices: &[&[Token]],
    nodes: &mut Vec<Stmt>,
) {
    let mut i = 0;

    while i < slices.len() {
        let slice = slices[i];

        let result = match slice[0].keyword {
            K::If => {
                let (chain, consumed) = collect_if_else_chain(slices, i);
                i += consumed;
                parse_conditional(grammar, ctx, &chain).map(Some)
            }
            K::OtherwiseIf | K::Otherwise => {
                i += 1;
                Err(ParseError::malformed_chain(
                    "parse_block",
                    format!("`{}` without a preceding `if`", slice[0].text),
                    slice,
                ))
            }
            _ => {
                i += 1;
                grammar.parse_statement(ctx, slice)
            }
        };

        match result {
            Ok(Some(stmt)) => nodes.push(stmt),
            Ok(None) => {
                ctx.report_error(ParseError::unrecognized("parse_block", "statement", slice))
            }
            Err(error) => ctx.report_error(error),
        }
    }
}
