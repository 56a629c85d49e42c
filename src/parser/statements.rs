/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * Statement-Level Parsing Logic
 *
 * This file contains the statement productions of the Carmen grammar and
 * their priority table.
 *
 * It handles:
 * - Definitions (`define entry point`, `define function`, `define structure`)
 * - Control flow (`if`, `while`, `until`, `do … while`, `for each`, `for`,
 *   `repeat`, `try`)
 * - Variables (`set`, `let`, `increment`, `decrement`, `swap`)
 * - Lists (`add … to`, `remove … from`)
 * - Input and output (`print`, `display`, `read into`, `import`)
 * - Expression statements as a fallback
 *
 * Every production receives one statement slice, usually ending in `.`,
 * and follows the same soft/hard discipline as the expression productions.
 * Nested bodies are handed back to `parse_block`, which is where errors
 * inside them are caught.
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

use crate::ast::{Expr, ExprKind, Param, Stmt, StmtKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::{render, Token, TokenKind};
use crate::parser::blocks::{parse_block, parse_body, parse_conditional};
use crate::parser::context::ParseContext;
use crate::parser::expressions::required;
use crate::parser::grammar::{Grammar, StatementRule};
use crate::parser::helpers::{
    enclosed, expect_identifier, identifier_name, matching_close, starts_with, strip_terminator,
    unescape,
};
use crate::parser::scanner::{first_at_depth_zero, split_on};

use Keyword as K;

/// The statement cascade, in priority order.
pub static RULES: &[StatementRule] = &[
    StatementRule { name: "block", priority: 1000, try_parse: parse_block_statement },
    StatementRule { name: "entry point", priority: 950, try_parse: parse_entry_point },
    StatementRule { name: "function definition", priority: 940, try_parse: parse_function_definition },
    StatementRule { name: "structure definition", priority: 930, try_parse: parse_structure_definition },
    StatementRule { name: "conditional", priority: 920, try_parse: parse_if },
    StatementRule { name: "while", priority: 910, try_parse: parse_while },
    StatementRule { name: "until", priority: 905, try_parse: parse_until },
    StatementRule { name: "do loop", priority: 900, try_parse: parse_do_loop },
    StatementRule { name: "for each", priority: 890, try_parse: parse_for_each },
    StatementRule { name: "for range", priority: 880, try_parse: parse_for_range },
    StatementRule { name: "repeat", priority: 870, try_parse: parse_repeat },
    StatementRule { name: "try", priority: 860, try_parse: parse_try },
    StatementRule { name: "assignment", priority: 850, try_parse: parse_assignment },
    StatementRule { name: "declaration", priority: 845, try_parse: parse_declaration },
    StatementRule { name: "increment", priority: 840, try_parse: parse_increment },
    StatementRule { name: "print", priority: 830, try_parse: parse_print },
    StatementRule { name: "return", priority: 820, try_parse: parse_return },
    StatementRule { name: "break", priority: 815, try_parse: parse_break },
    StatementRule { name: "continue", priority: 814, try_parse: parse_continue },
    StatementRule { name: "exit", priority: 813, try_parse: parse_exit },
    StatementRule { name: "throw", priority: 810, try_parse: parse_throw },
    StatementRule { name: "assert", priority: 800, try_parse: parse_assert },
    StatementRule { name: "import", priority: 790, try_parse: parse_import },
    StatementRule { name: "list add", priority: 780, try_parse: parse_list_add },
    StatementRule { name: "list remove", priority: 775, try_parse: parse_list_remove },
    StatementRule { name: "swap", priority: 770, try_parse: parse_swap },
    StatementRule { name: "read", priority: 760, try_parse: parse_read_into },
    StatementRule { name: "expression", priority: 100, try_parse: parse_expression_statement },
];

fn stmt(kind: StmtKind, at: &Token) -> Stmt {
    Stmt::new(kind, at.position.clone())
}

/// Parses `tokens` as exactly one `{ … }` block.
///
/// # Errors
/// A committed production found something other than a block.
fn expect_block(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    function: &'static str,
    tokens: &[Token],
    whole: &[Token],
) -> ParseResult<Vec<Stmt>> {
    if tokens.is_empty() {
        return Err(ParseError::missing(function, "a block", whole));
    }
    let inner = enclosed(tokens, K::BlockStart).ok_or_else(|| {
        ParseError::missing(function, "a block", tokens)
            .with_help("wrap the statements in `{ }` or `execute the following ; … fin`")
    })?;
    ctx.nested(function, tokens, |ctx| Ok(parse_block(grammar, ctx, inner)))
}

/// Parses a comma-separated list of `$names`.
fn parse_names(function: &'static str, tokens: &[Token], whole: &[Token]) -> ParseResult<Vec<Param>> {
    if tokens.is_empty() {
        return Err(ParseError::missing(function, "at least one name after `with`", whole));
    }
    split_on(tokens, K::Comma)
        .into_iter()
        .map(|part| {
            let name = expect_identifier(function, "a name", part, whole)?;
            Ok(Param {
                name,
                position: part[0].position.clone(),
            })
        })
        .collect()
}

/* ----------------------------- */
/* DEFINITIONS                   */
/* ----------------------------- */

/// `{ … }` on its own.
fn parse_block_statement(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Stmt>> {
    let Some(inner) = enclosed(strip_terminator(tokens), K::BlockStart) else {
        return Ok(None);
    };
    let body = ctx.nested("parse_block_statement", tokens, |ctx| Ok(parse_block(grammar, ctx, inner)))?;
    Ok(Some(stmt(StmtKind::Block(body), &tokens[0])))
}

/// `define entry point as BODY`
fn parse_entry_point(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_entry_point";

    if !starts_with(tokens, K::DefineEntryPoint) {
        return Ok(None);
    }
    let Some(as_at) = first_at_depth_zero(tokens, K::As, 1) else {
        return Ok(None);
    };
    if as_at != 1 {
        return Err(ParseError::unrecognized(FUNCTION, "words before `as`", &tokens[1..as_at]));
    }

    let body = parse_body(grammar, ctx, FUNCTION, &tokens[as_at + 1..], tokens)?;
    Ok(Some(stmt(StmtKind::EntryPoint { body }, &tokens[0])))
}

/// `define function $name [with $a , $b] as BODY`
fn parse_function_definition(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_function_definition";

    if !starts_with(tokens, K::DefineFunction) {
        return Ok(None);
    }
    let Some(as_at) = first_at_depth_zero(tokens, K::As, 1) else {
        return Ok(None);
    };

    let header = &tokens[1..as_at];
    let name = expect_identifier(FUNCTION, "a function name", header.get(..1).unwrap_or(&[]), tokens)?;

    let params = match &header[1..] {
        [] => Vec::new(),
        [with, names @ ..] if with.is(K::With) => parse_names(FUNCTION, names, tokens)?,
        other => {
            return Err(ParseError::missing(FUNCTION, "`with` before the parameters", other)
                .with_help("write `define function $name with $a , $b as …`"))
        }
    };

    let body = parse_body(grammar, ctx, FUNCTION, &tokens[as_at + 1..], tokens)?;
    Ok(Some(stmt(
        StmtKind::FunctionDefinition { name, params, body },
        &tokens[0],
    )))
}

/// `define structure $Name with $a , $b .`
fn parse_structure_definition(
    _: &Grammar,
    _: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_structure_definition";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::DefineStructure) {
        return Ok(None);
    }

    let name = expect_identifier(FUNCTION, "a structure name", body.get(1..2).unwrap_or(&[]), tokens)?;
    let fields = match body.get(2..).unwrap_or(&[]) {
        [] => Vec::new(),
        [with, names @ ..] if with.is(K::With) => parse_names(FUNCTION, names, tokens)?,
        other => return Err(ParseError::missing(FUNCTION, "`with` before the fields", other)),
    };

    Ok(Some(stmt(StmtKind::StructureDefinition { name, fields }, &tokens[0])))
}

/* ----------------------------- */
/* CONTROL FLOW                  */
/* ----------------------------- */

/// A lone `if` slice. Chains spanning several slices are collected by
/// `parse_block` before they get here.
fn parse_if(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    if !starts_with(tokens, K::If) {
        return Ok(None);
    }
    parse_conditional(grammar, ctx, &[tokens]).map(Some)
}

/// `LEAD C do BODY` for `while` and `until`.
fn parse_condition_loop(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
    lead: Keyword,
    function: &'static str,
) -> ParseResult<Option<(Expr, Vec<Stmt>)>> {
    if !starts_with(tokens, lead) {
        return Ok(None);
    }
    let Some(do_at) = first_at_depth_zero(tokens, K::Do, 1) else {
        return Ok(None);
    };

    let condition = required(grammar, ctx, function, "a condition", &tokens[1..do_at], tokens)?;
    let body = parse_body(grammar, ctx, function, &tokens[do_at + 1..], tokens)?;
    Ok(Some((condition, body)))
}

fn parse_while(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    Ok(parse_condition_loop(grammar, ctx, tokens, K::While, "parse_while")?
        .map(|(condition, body)| stmt(StmtKind::While { condition, body }, &tokens[0])))
}

fn parse_until(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    Ok(parse_condition_loop(grammar, ctx, tokens, K::Until, "parse_until")?
        .map(|(condition, body)| stmt(StmtKind::Until { condition, body }, &tokens[0])))
}

/// `do BLOCK while C .` and `do BLOCK until C .`
fn parse_do_loop(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_do_loop";

    let body_tokens = strip_terminator(tokens);
    if !starts_with(body_tokens, K::Do) || !body_tokens.get(1).is_some_and(|t| t.is(K::BlockStart)) {
        return Ok(None);
    }
    let Some(close) = matching_close(body_tokens, 1) else {
        return Err(ParseError::block_structure(FUNCTION, "`do` block is never closed", tokens));
    };
    let Some(kind) = body_tokens.get(close + 1).map(|t| t.keyword) else {
        return Ok(None);
    };
    if !matches!(kind, K::While | K::Until) {
        return Ok(None);
    }

    let condition = required(
        grammar,
        ctx,
        FUNCTION,
        "a condition",
        &body_tokens[close + 2..],
        tokens,
    )?;
    let body = ctx.nested(FUNCTION, tokens, |ctx| {
        Ok(parse_block(grammar, ctx, &body_tokens[2..close]))
    })?;

    let kind = if kind == K::While {
        StmtKind::DoWhile { body, condition }
    } else {
        StmtKind::DoUntil { body, condition }
    };
    Ok(Some(stmt(kind, &tokens[0])))
}

/// `for each $x in E do BODY`
fn parse_for_each(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_for_each";

    if !starts_with(tokens, K::ForEach) {
        return Ok(None);
    }
    let Some(in_at) = first_at_depth_zero(tokens, K::In, 1) else {
        return Ok(None);
    };
    let Some(do_at) = first_at_depth_zero(tokens, K::Do, in_at + 1) else {
        return Ok(None);
    };

    let variable = expect_identifier(FUNCTION, "a loop variable", &tokens[1..in_at], tokens)?;
    let iterable = required(grammar, ctx, FUNCTION, "a list after `in`", &tokens[in_at + 1..do_at], tokens)?;
    let body = parse_body(grammar, ctx, FUNCTION, &tokens[do_at + 1..], tokens)?;

    Ok(Some(stmt(
        StmtKind::ForEach {
            variable,
            iterable,
            body,
        },
        &tokens[0],
    )))
}

/// `for $i from A to B [by S] do BODY`
fn parse_for_range(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_for_range";

    if !starts_with(tokens, K::For) {
        return Ok(None);
    }
    let Some(from_at) = first_at_depth_zero(tokens, K::From, 1) else {
        return Ok(None);
    };
    let Some(to_at) = first_at_depth_zero(tokens, K::To, from_at + 1) else {
        return Ok(None);
    };
    let Some(do_at) = first_at_depth_zero(tokens, K::Do, to_at + 1) else {
        return Ok(None);
    };
    let by_at = first_at_depth_zero(&tokens[..do_at], K::By, to_at + 1);

    let variable = expect_identifier(FUNCTION, "a loop variable", &tokens[1..from_at], tokens)?;
    let from = required(grammar, ctx, FUNCTION, "a start after `from`", &tokens[from_at + 1..to_at], tokens)?;
    let to = required(
        grammar,
        ctx,
        FUNCTION,
        "an end after `to`",
        &tokens[to_at + 1..by_at.unwrap_or(do_at)],
        tokens,
    )?;
    let step = match by_at {
        Some(by_at) => Some(required(
            grammar,
            ctx,
            FUNCTION,
            "a step after `by`",
            &tokens[by_at + 1..do_at],
            tokens,
        )?),
        None => None,
    };
    let body = parse_body(grammar, ctx, FUNCTION, &tokens[do_at + 1..], tokens)?;

    Ok(Some(stmt(
        StmtKind::ForRange {
            variable,
            from,
            to,
            step,
            body,
        },
        &tokens[0],
    )))
}

/// `repeat E times BODY`
fn parse_repeat(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_repeat";

    if !starts_with(tokens, K::Repeat) {
        return Ok(None);
    }
    let Some(times_at) = first_at_depth_zero(tokens, K::Times, 1) else {
        return Ok(None);
    };

    let count = required(grammar, ctx, FUNCTION, "a count", &tokens[1..times_at], tokens)?;
    let body = parse_body(grammar, ctx, FUNCTION, &tokens[times_at + 1..], tokens)?;

    Ok(Some(stmt(StmtKind::Repeat { count, body }, &tokens[0])))
}

/// `try BLOCK catch [$e] BLOCK [finally BLOCK]`
fn parse_try(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_try";

    let all = strip_terminator(tokens);
    if !starts_with(all, K::Try) {
        return Ok(None);
    }
    let Some(catch_at) = first_at_depth_zero(all, K::Catch, 1) else {
        return Ok(None);
    };
    let finally_at = first_at_depth_zero(all, K::Finally, catch_at + 1);

    let body = expect_block(grammar, ctx, FUNCTION, &all[1..catch_at], tokens)?;

    let handler_tokens = &all[catch_at + 1..finally_at.unwrap_or(all.len())];
    let (error_name, handler_block) = match handler_tokens.split_first() {
        Some((first, rest)) if first.kind == TokenKind::Identifier => {
            (identifier_name(std::slice::from_ref(first)), rest)
        }
        _ => (None, handler_tokens),
    };
    let handler = expect_block(grammar, ctx, FUNCTION, handler_block, tokens)?;

    let finally = match finally_at {
        Some(at) => Some(expect_block(grammar, ctx, FUNCTION, &all[at + 1..], tokens)?),
        None => None,
    };

    Ok(Some(stmt(
        StmtKind::TryCatch {
            body,
            error_name,
            handler,
            finally,
        },
        &tokens[0],
    )))
}

/// `return [E] .`
fn parse_return(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    let body = strip_terminator(tokens);
    if !starts_with(body, K::Return) {
        return Ok(None);
    }
    let value = match &body[1..] {
        [] => None,
        rest => Some(required(grammar, ctx, "parse_return", "a value", rest, tokens)?),
    };
    Ok(Some(stmt(StmtKind::Return(value), &tokens[0])))
}

/// A statement that is a single keyword.
fn parse_bare(
    tokens: &[Token],
    lead: Keyword,
    kind: StmtKind,
    function: &'static str,
) -> ParseResult<Option<Stmt>> {
    let body = strip_terminator(tokens);
    if !starts_with(body, lead) {
        return Ok(None);
    }
    if body.len() > 1 {
        return Err(ParseError::unrecognized(
            function,
            &format!("words after `{}`", body[0].text),
            &body[1..],
        ));
    }
    Ok(Some(stmt(kind, &tokens[0])))
}

fn parse_break(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    parse_bare(tokens, K::Break, StmtKind::Break, "parse_break")
}

fn parse_continue(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    parse_bare(tokens, K::Continue, StmtKind::Continue, "parse_continue")
}

fn parse_exit(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    parse_bare(tokens, K::Exit, StmtKind::Exit, "parse_exit")
}

/// `LEAD E .` where the value is required.
fn parse_keyword_value(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
    leads: &[Keyword],
    function: &'static str,
) -> ParseResult<Option<Expr>> {
    let body = strip_terminator(tokens);
    match body.first() {
        Some(first) if leads.contains(&first.keyword) => {
            required(grammar, ctx, function, "a value", &body[1..], tokens).map(Some)
        }
        _ => Ok(None),
    }
}

fn parse_throw(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    Ok(parse_keyword_value(grammar, ctx, tokens, &[K::Throw, K::Raise], "parse_throw")?
        .map(|value| stmt(StmtKind::Throw(value), &tokens[0])))
}

/* ----------------------------- */
/* VARIABLES                     */
/* ----------------------------- */

/// `set TARGET equal to E .`
fn parse_assignment(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_assignment";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::Set) {
        return Ok(None);
    }
    let Some(equal_at) = first_at_depth_zero(body, K::EqualTo, 1) else {
        return Ok(None);
    };

    let target = required(grammar, ctx, FUNCTION, "a variable to set", &body[1..equal_at], tokens)?;
    if !matches!(target.kind, ExprKind::Identifier(_) | ExprKind::Index { .. }) {
        return Err(ParseError::invalid(FUNCTION, "assignment target", &body[1..equal_at])
            .with_help("only a `$name` or a list item can be set"));
    }
    let value = required(grammar, ctx, FUNCTION, "a value after `equal to`", &body[equal_at + 1..], tokens)?;

    Ok(Some(stmt(StmtKind::Assignment { target, value }, &tokens[0])))
}

/// `let $x be E .`
fn parse_declaration(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_declaration";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::Let) {
        return Ok(None);
    }
    let Some(be_at) = first_at_depth_zero(body, K::Be, 1) else {
        return Ok(None);
    };

    let name = expect_identifier(FUNCTION, "a variable name", &body[1..be_at], tokens)?;
    let value = required(grammar, ctx, FUNCTION, "a value after `be`", &body[be_at + 1..], tokens)?;

    Ok(Some(stmt(StmtKind::Declaration { name, value }, &tokens[0])))
}

/// `increment $x [by E] .` and `decrement $x [by E] .`
fn parse_increment(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_increment";

    let body = strip_terminator(tokens);
    let Some(lead) = body.first().map(|t| t.keyword) else {
        return Ok(None);
    };
    if !matches!(lead, K::Increment | K::Decrement) {
        return Ok(None);
    }

    let by_at = first_at_depth_zero(body, K::By, 1);
    let name = expect_identifier(FUNCTION, "a variable name", &body[1..by_at.unwrap_or(body.len())], tokens)?;
    let amount = match by_at {
        Some(at) => Some(required(grammar, ctx, FUNCTION, "an amount after `by`", &body[at + 1..], tokens)?),
        None => None,
    };

    let kind = if lead == K::Increment {
        StmtKind::Increment { name, amount }
    } else {
        StmtKind::Decrement { name, amount }
    };
    Ok(Some(stmt(kind, &tokens[0])))
}

/// `swap $a and $b .`
fn parse_swap(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_swap";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::Swap) {
        return Ok(None);
    }
    let Some(and_at) = first_at_depth_zero(body, K::And, 1) else {
        return Ok(None);
    };

    let left = expect_identifier(FUNCTION, "a variable before `and`", &body[1..and_at], tokens)?;
    let right = expect_identifier(FUNCTION, "a variable after `and`", &body[and_at + 1..], tokens)?;

    Ok(Some(stmt(StmtKind::Swap { left, right }, &tokens[0])))
}

/* ----------------------------- */
/* LISTS                         */
/* ----------------------------- */

/// `add E to LIST .`
fn parse_list_add(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_list_add";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::Add) {
        return Ok(None);
    }
    let Some(to_at) = first_at_depth_zero(body, K::To, 1) else {
        return Ok(None);
    };

    let value = required(grammar, ctx, FUNCTION, "a value to add", &body[1..to_at], tokens)?;
    let list = required(grammar, ctx, FUNCTION, "a list after `to`", &body[to_at + 1..], tokens)?;

    Ok(Some(stmt(StmtKind::ListAdd { value, list }, &tokens[0])))
}

/// `remove E from LIST .`
fn parse_list_remove(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_list_remove";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::Remove) {
        return Ok(None);
    }
    let Some(from_at) = first_at_depth_zero(body, K::From, 1) else {
        return Ok(None);
    };

    let value = required(grammar, ctx, FUNCTION, "a value to remove", &body[1..from_at], tokens)?;
    let list = required(grammar, ctx, FUNCTION, "a list after `from`", &body[from_at + 1..], tokens)?;

    Ok(Some(stmt(StmtKind::ListRemove { value, list }, &tokens[0])))
}

/* ----------------------------- */
/* INPUT / OUTPUT                */
/* ----------------------------- */

fn parse_print(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    Ok(parse_keyword_value(grammar, ctx, tokens, &[K::Print, K::Display], "parse_print")?
        .map(|value| stmt(StmtKind::Print(value), &tokens[0])))
}

fn parse_assert(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    Ok(parse_keyword_value(grammar, ctx, tokens, &[K::Assert], "parse_assert")?
        .map(|value| stmt(StmtKind::Assert(value), &tokens[0])))
}

/// `import "module" .`
fn parse_import(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    const FUNCTION: &str = "parse_import";

    let body = strip_terminator(tokens);
    if !starts_with(body, K::Import) {
        return Ok(None);
    }
    match &body[1..] {
        [module] if module.kind == TokenKind::String => {
            let name = unescape(FUNCTION, module)?;
            Ok(Some(stmt(StmtKind::Import(name), &tokens[0])))
        }
        [] => Err(ParseError::missing(FUNCTION, "a module name", tokens)),
        rest => Err(ParseError::invalid(FUNCTION, "module name", rest)
            .with_help("module names are quoted: `import \"math\" .`")),
    }
}

/// `read into $x .`
fn parse_read_into(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Stmt>> {
    let body = strip_terminator(tokens);
    if !starts_with(body, K::ReadInto) {
        return Ok(None);
    }
    let name = expect_identifier("parse_read_into", "a variable name", &body[1..], tokens)?;
    Ok(Some(stmt(StmtKind::ReadInto(name), &tokens[0])))
}

/// Any expression used as a statement.
fn parse_expression_statement(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Stmt>> {
    let body = strip_terminator(tokens);
    let Some(expr) = grammar.parse_expression(ctx, body)? else {
        return Ok(None);
    };

    if ctx.options().warn_on_discarded_values && !matches!(expr.kind, ExprKind::Call { .. }) {
        ctx.warn(format!("{}: the value of `{}` is never used", expr.position, render(body)));
    }

    Ok(Some(stmt(StmtKind::Expression(expr), &tokens[0])))
}
