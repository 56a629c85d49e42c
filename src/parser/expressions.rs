/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  The expression productions and their priority table.
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
 * Carmen expressions have no operator symbols, only phrases, so there is
 * no precedence climbing. Instead every production is an independent
 * function that looks at a whole token slice and either
 *
 *   - rejects it softly (`Ok(None)`), letting the next production try,
 *   - accepts it (`Ok(Some(expr))`), or
 *   - commits to it and fails (`Err(ParseError)`).
 *
 * A production commits once its leading keyword and every delimiter it
 * needs have been found. From then on a part that does not parse is a
 * hard error pointing at that part.
 *
 * Binding strength comes from trial order: loosely binding forms (`or`)
 * are tried first and split the slice at their operator, so tighter forms
 * only ever see the pieces.
 *
 *   or → and → not → comparison → … → additive → multiplicative → power
 *      → prefix phrases → postfix forms → literals → identifier
 *
 * Infix forms try each top-level occurrence of their operator, right to
 * left (left to right for `to the power of`), and keep the first split
 * where both sides parse. The context remembers the outcome for every
 * slice, so overlapping splits never run the cascade over the same
 * tokens twice.
 *
 * ==========================================================================
 */

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ast::{BinaryOp, Expr, ExprKind, Literal, MatchArm, TypeName, UnaryOp};
use crate::error::{ParseError, ParseResult};
use crate::lexer::keywords::{classify, fold, ordinal_value, Keyword, LiteralShape};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::context::ParseContext;
use crate::parser::grammar::{ExpressionRule, Fixity, Grammar};
use crate::parser::helpers::{enclosed, identifier_name, operator_positions, starts_with, unescape};
use crate::parser::scanner::{all_at_depth_zero, first_at_depth_zero, first_of_at_depth_zero, split_on};

use Keyword as K;

/// Priorities of the productions that own operand slots.
mod level {
    pub const TERNARY: u16 = 980;
    pub const MATCH: u16 = 970;
    pub const OR: u16 = 900;
    pub const AND: u16 = 890;
    pub const NOT: u16 = 880;
    pub const COMPARISON: u16 = 870;
    pub const CONTAINS: u16 = 865;
    pub const TYPE_CHECK: u16 = 860;
    pub const NULL_CHECK: u16 = 855;
    pub const BITWISE_OR: u16 = 850;
    pub const BITWISE_XOR: u16 = 845;
    pub const BITWISE_AND: u16 = 840;
    pub const SHIFT: u16 = 835;
    pub const CONCATENATION: u16 = 830;
    pub const ADDITIVE: u16 = 820;
    pub const MULTIPLICATIVE: u16 = 810;
    pub const POWER: u16 = 800;
    pub const NEGATE: u16 = 790;
    pub const BITWISE_NOT: u16 = 785;
    pub const SUM_OF: u16 = 700;
    pub const DIFFERENCE_OF: u16 = 690;
    pub const PRODUCT_OF: u16 = 680;
    pub const QUOTIENT_OF: u16 = 670;
    pub const REMAINDER_OF: u16 = 660;
    pub const LENGTH: u16 = 640;
    pub const ABSOLUTE_VALUE: u16 = 630;
    pub const SQUARE_ROOT: u16 = 625;
    pub const SLICE: u16 = 620;
    pub const INDEX: u16 = 610;
    pub const CALL: u16 = 600;
    pub const LIST_LITERAL: u16 = 590;
    /// Binds tighter than every operator.
    pub const NOUN: u16 = 0;
}

use Fixity::{Closed, Infix, Postfix, Prefix, Transparent};

/// The expression cascade, in priority order.
pub static RULES: &[ExpressionRule] = &[
    ExpressionRule { name: "parenthesized", priority: 1000, fixity: Closed, try_parse: parse_parenthesized },
    ExpressionRule { name: "article", priority: 990, fixity: Transparent, try_parse: parse_article },
    ExpressionRule { name: "ternary", priority: level::TERNARY, fixity: Prefix, try_parse: parse_ternary },
    ExpressionRule { name: "match", priority: level::MATCH, fixity: Prefix, try_parse: parse_match },
    ExpressionRule { name: "or", priority: level::OR, fixity: Infix, try_parse: parse_or },
    ExpressionRule { name: "and", priority: level::AND, fixity: Infix, try_parse: parse_and },
    ExpressionRule { name: "not", priority: level::NOT, fixity: Prefix, try_parse: parse_not },
    ExpressionRule { name: "comparison", priority: level::COMPARISON, fixity: Infix, try_parse: parse_comparison },
    ExpressionRule { name: "contains", priority: level::CONTAINS, fixity: Infix, try_parse: parse_contains },
    ExpressionRule { name: "type check", priority: level::TYPE_CHECK, fixity: Postfix, try_parse: parse_type_check },
    ExpressionRule { name: "null check", priority: level::NULL_CHECK, fixity: Postfix, try_parse: parse_null_check },
    ExpressionRule { name: "bitwise or", priority: level::BITWISE_OR, fixity: Infix, try_parse: parse_bitwise_or },
    ExpressionRule { name: "bitwise xor", priority: level::BITWISE_XOR, fixity: Infix, try_parse: parse_bitwise_xor },
    ExpressionRule { name: "bitwise and", priority: level::BITWISE_AND, fixity: Infix, try_parse: parse_bitwise_and },
    ExpressionRule { name: "shift", priority: level::SHIFT, fixity: Infix, try_parse: parse_shift },
    ExpressionRule { name: "concatenation", priority: level::CONCATENATION, fixity: Infix, try_parse: parse_concatenation },
    ExpressionRule { name: "additive", priority: level::ADDITIVE, fixity: Infix, try_parse: parse_additive },
    ExpressionRule { name: "multiplicative", priority: level::MULTIPLICATIVE, fixity: Infix, try_parse: parse_multiplicative },
    ExpressionRule { name: "power", priority: level::POWER, fixity: Infix, try_parse: parse_power },
    ExpressionRule { name: "negate", priority: level::NEGATE, fixity: Prefix, try_parse: parse_negate },
    ExpressionRule { name: "bitwise not", priority: level::BITWISE_NOT, fixity: Prefix, try_parse: parse_bitwise_not },
    ExpressionRule { name: "sum of", priority: level::SUM_OF, fixity: Prefix, try_parse: parse_sum_of },
    ExpressionRule { name: "difference of", priority: level::DIFFERENCE_OF, fixity: Prefix, try_parse: parse_difference_of },
    ExpressionRule { name: "product of", priority: level::PRODUCT_OF, fixity: Prefix, try_parse: parse_product_of },
    ExpressionRule { name: "quotient of", priority: level::QUOTIENT_OF, fixity: Prefix, try_parse: parse_quotient_of },
    ExpressionRule { name: "remainder of", priority: level::REMAINDER_OF, fixity: Prefix, try_parse: parse_remainder_of },
    ExpressionRule { name: "cast", priority: 650, fixity: Closed, try_parse: parse_cast },
    ExpressionRule { name: "length", priority: level::LENGTH, fixity: Prefix, try_parse: parse_length },
    ExpressionRule { name: "absolute value", priority: level::ABSOLUTE_VALUE, fixity: Prefix, try_parse: parse_absolute_value },
    ExpressionRule { name: "square root", priority: level::SQUARE_ROOT, fixity: Prefix, try_parse: parse_square_root },
    ExpressionRule { name: "slice", priority: level::SLICE, fixity: Prefix, try_parse: parse_slice },
    ExpressionRule { name: "index", priority: level::INDEX, fixity: Prefix, try_parse: parse_index },
    ExpressionRule { name: "call", priority: level::CALL, fixity: Prefix, try_parse: parse_call },
    ExpressionRule { name: "list literal", priority: level::LIST_LITERAL, fixity: Prefix, try_parse: parse_list_literal },
    ExpressionRule { name: "number", priority: 30, fixity: Closed, try_parse: parse_number },
    ExpressionRule { name: "ordinal", priority: 25, fixity: Closed, try_parse: parse_ordinal },
    ExpressionRule { name: "text", priority: 20, fixity: Closed, try_parse: parse_text },
    ExpressionRule { name: "boolean or null", priority: 10, fixity: Closed, try_parse: parse_boolean_or_null },
    ExpressionRule { name: "identifier", priority: 0, fixity: Closed, try_parse: parse_identifier },
];

/* ----------------------------- */
/* SHARED PIECES                 */
/* ----------------------------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum Associativity {
    Left,
    Right,
}

fn node(kind: ExprKind, at: &Token) -> Expr {
    Expr::new(kind, at.position.clone())
}

/// Parses a part of a committed production.
///
/// An empty part is reported as missing, an unparseable one as invalid;
/// both name `whole` or the part so the diagnostic points at the right
/// place.
pub(crate) fn required(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    function: &'static str,
    part: &str,
    tokens: &[Token],
    whole: &[Token],
) -> ParseResult<Expr> {
    if tokens.is_empty() {
        return Err(ParseError::missing(function, part, whole));
    }
    grammar
        .parse_expression(ctx, tokens)?
        .ok_or_else(|| ParseError::invalid(function, part, tokens))
}

/// Reads a single type-name token (`number`, `text`, …).
fn expect_type(function: &'static str, tokens: &[Token], whole: &[Token]) -> ParseResult<TypeName> {
    match tokens {
        [] => Err(ParseError::missing(function, "a type name", whole)),
        [token] => TypeName::from_keyword(token.keyword).ok_or_else(|| {
            ParseError::invalid(function, "type name", tokens)
                .with_help("use one of: number, text, boolean, character, list")
        }),
        _ => Err(ParseError::invalid(function, "type name", tokens)
            .with_help("use one of: number, text, boolean, character, list")),
    }
}

/// Which side of the owning operator an operand sits on.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    /// `A` in `A plus B`, `X` in `X is null`
    Before,
    /// `B` in `A plus B`, `X` in `not X`
    After,
}

/// An operand position: the priority of the production that owns it and
/// the side of the operator it is on.
#[derive(Clone, Copy)]
struct Slot {
    owner: u16,
    side: Side,
}

impl Slot {
    fn before(owner: u16) -> Self {
        Self { owner, side: Side::Before }
    }

    fn after(owner: u16) -> Self {
        Self { owner, side: Side::After }
    }
}

enum Operand {
    Bound(Expr),
    /// Parses, but as a looser production that is open towards the owner's
    /// operator. The whole slice belongs to that production.
    Looser,
    Unparsed,
}

/// Parses the tokens of an operand slot.
///
/// # Behavior
/// A side such as `1 plus 2` in `1 plus 2 multiplied by 3` parses on its
/// own, but its `plus` is looser than `multiplied by` and faces it, so
/// the split is refused and the additive production keeps the slice.
/// Articles are looked through: `the length of $a` has the fixity of
/// `length of`.
fn operand(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
    slot: Slot,
) -> ParseResult<Operand> {
    let Some((mut rule, expr)) = grammar.select_rule(ctx, tokens)? else {
        return Ok(Operand::Unparsed);
    };

    let mut rest = tokens;
    while rule.fixity == Fixity::Transparent && rest.len() > 1 {
        rest = &rest[1..];
        match grammar.select_rule(ctx, rest)? {
            Some((inner, _)) => rule = inner,
            None => break,
        }
    }

    let open = match slot.side {
        Side::Before => rule.fixity.open_right(),
        Side::After => rule.fixity.open_left(),
    };
    if open && rule.priority > slot.owner {
        Ok(Operand::Looser)
    } else {
        Ok(Operand::Bound(expr))
    }
}

/// [`required`] for an operand slot of a committed production.
///
/// `Ok(None)` means the operand belongs to a looser production and the
/// caller rejects softly.
fn required_operand(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    function: &'static str,
    part: &str,
    tokens: &[Token],
    whole: &[Token],
    slot: Slot,
) -> ParseResult<Option<Expr>> {
    if tokens.is_empty() {
        return Err(ParseError::missing(function, part, whole));
    }
    match operand(grammar, ctx, tokens, slot)? {
        Operand::Bound(expr) => Ok(Some(expr)),
        Operand::Looser => Ok(None),
        Operand::Unparsed => Err(ParseError::invalid(function, part, tokens)),
    }
}

/// Splits at a top-level binary operator.
///
/// # Parameters
/// - `operators`: operator keywords and the `BinaryOp` each produces
/// - `priority`: this production's place in the cascade
/// - `associativity`: `Left` tries the rightmost operator first
///
/// # Behavior
/// Operators at the first or last position are skipped, as are splits
/// whose sides belong to a looser operator. If no split is left the slice
/// is rejected softly: the operator may belong to some other production
/// (`the sum of A and B`).
fn parse_infix(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
    operators: &[(Keyword, BinaryOp)],
    priority: u16,
    associativity: Associativity,
) -> ParseResult<Option<Expr>> {
    let keywords: Vec<Keyword> = operators.iter().map(|&(keyword, _)| keyword).collect();
    let mut positions = operator_positions(tokens, &keywords);
    if associativity == Associativity::Left {
        positions.reverse();
    }

    for index in positions {
        if index == 0 || index + 1 == tokens.len() {
            continue;
        }
        let Some(op) = operators
            .iter()
            .find(|&&(keyword, _)| keyword == tokens[index].keyword)
            .map(|&(_, op)| op)
        else {
            continue;
        };

        let Operand::Bound(left) = operand(grammar, ctx, &tokens[..index], Slot::before(priority))? else {
            continue;
        };
        let Operand::Bound(right) = operand(grammar, ctx, &tokens[index + 1..], Slot::after(priority))? else {
            continue;
        };

        return Ok(Some(node(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            &tokens[0],
        )));
    }

    Ok(None)
}

/// `LEAD operand`, e.g. `the length of $list`.
fn parse_prefix(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
    lead: Keyword,
    (op, priority): (UnaryOp, u16),
    function: &'static str,
) -> ParseResult<Option<Expr>> {
    if !starts_with(tokens, lead) || tokens.len() < 2 {
        return Ok(None);
    }
    let Some(operand) =
        required_operand(grammar, ctx, function, "operand", &tokens[1..], tokens, Slot::after(priority))?
    else {
        return Ok(None);
    };
    Ok(Some(node(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        &tokens[0],
    )))
}

/// `the sum of A and B` and its siblings.
///
/// Committed once the lead and at least one top-level `and` are present.
/// The first `and` that leaves two parseable operands is the split.
fn parse_phrase(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
    lead: Keyword,
    (op, priority): (BinaryOp, u16),
    function: &'static str,
) -> ParseResult<Option<Expr>> {
    if !starts_with(tokens, lead) {
        return Ok(None);
    }
    let operands = &tokens[1..];
    let ands = all_at_depth_zero(operands, K::And);
    if ands.is_empty() {
        return Ok(None);
    }

    let inner: Vec<usize> = ands
        .into_iter()
        .filter(|&index| index > 0 && index + 1 < operands.len())
        .collect();
    if inner.is_empty() {
        return Err(ParseError::missing(function, "an operand on each side of `and`", tokens)
            .with_help(format!("write it as `{} A and B`", tokens[0].text)));
    }

    let mut looser = false;
    for index in inner {
        let Some(left) = grammar.parse_expression(ctx, &operands[..index])? else {
            continue;
        };
        let right = match operand(grammar, ctx, &operands[index + 1..], Slot::after(priority))? {
            Operand::Bound(right) => right,
            Operand::Looser => {
                looser = true;
                continue;
            }
            Operand::Unparsed => continue,
        };
        return Ok(Some(node(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            &tokens[0],
        )));
    }

    if looser {
        return Ok(None);
    }
    Err(ParseError::invalid(function, "operands", tokens)
        .with_help(format!("write it as `{} A and B`", tokens[0].text)))
}

/* ----------------------------- */
/* GROUPING                      */
/* ----------------------------- */

/// `( E )` where the closing parenthesis is the last token.
fn parse_parenthesized(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    let Some(inner) = enclosed(tokens, K::OpenParen) else {
        return Ok(None);
    };
    let expr = required(
        grammar,
        ctx,
        "parse_parenthesized",
        "an expression inside `( )`",
        inner,
        tokens,
    )?;
    Ok(Some(node(ExprKind::Grouping(Box::new(expr)), &tokens[0])))
}

/// `the E`, `a E`, `an E`.
///
/// Articles carry no meaning, so this never commits: if the rest does not
/// parse, neither does the whole.
fn parse_article(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    match tokens.split_first() {
        Some((article, rest)) if article.keyword.is_article() && !rest.is_empty() => {
            // `the $x plus 1` is an addition whose left side has an article.
            match operand(grammar, ctx, rest, Slot::after(level::NOUN))? {
                Operand::Bound(mut expr) => {
                    expr.position = article.position.clone();
                    Ok(Some(expr))
                }
                Operand::Looser | Operand::Unparsed => Ok(None),
            }
        }
        _ => Ok(None),
    }
}

/* ----------------------------- */
/* CONDITIONAL FORMS             */
/* ----------------------------- */

/// `if C then A otherwise B`
///
/// `otherwise if` continues the chain:
/// `if C1 then A otherwise if C2 then B otherwise D`. A ternary nested in
/// the `then` part needs parentheses.
fn parse_ternary(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    if !starts_with(tokens, K::If) {
        return Ok(None);
    }
    ternary_from(grammar, ctx, tokens)
}

/// Ternary starting at an `if` or `otherwise if` token.
fn ternary_from(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_ternary";

    let Some(then) = first_at_depth_zero(tokens, K::Then, 1) else {
        return Ok(None);
    };
    let Some((offset, branch)) =
        first_of_at_depth_zero(&tokens[then + 1..], &[K::Otherwise, K::OtherwiseIf])
    else {
        return Ok(None);
    };
    let otherwise = then + 1 + offset;

    let condition = required(grammar, ctx, FUNCTION, "a condition", &tokens[1..then], tokens)?;
    let then_value = required(
        grammar,
        ctx,
        FUNCTION,
        "a value after `then`",
        &tokens[then + 1..otherwise],
        tokens,
    )?;

    let else_value = if branch == K::OtherwiseIf {
        let rest = &tokens[otherwise..];
        ternary_from(grammar, ctx, rest)?.ok_or_else(|| {
            ParseError::missing(FUNCTION, "`then` and `otherwise` after `otherwise if`", rest)
        })?
    } else {
        required(
            grammar,
            ctx,
            FUNCTION,
            "a value after `otherwise`",
            &tokens[otherwise + 1..],
            tokens,
        )?
    };

    Ok(Some(node(
        ExprKind::Ternary {
            condition: Box::new(condition),
            then_value: Box::new(then_value),
            else_value: Box::new(else_value),
        },
        &tokens[0],
    )))
}

/// `match E with P gives R , P gives R , otherwise gives R`
fn parse_match(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_match";

    if !starts_with(tokens, K::Match) {
        return Ok(None);
    }
    let Some(with) = first_at_depth_zero(tokens, K::With, 1) else {
        return Ok(None);
    };

    let subject = required(grammar, ctx, FUNCTION, "a value to match", &tokens[1..with], tokens)?;

    let arms_tokens = &tokens[with + 1..];
    if arms_tokens.is_empty() {
        return Err(ParseError::missing(FUNCTION, "at least one `gives` arm", tokens));
    }

    let parts = split_on(arms_tokens, K::Comma);
    let mut arms = Vec::new();
    let mut default = None;

    for (i, &arm) in parts.iter().enumerate() {
        let Some(gives) = first_at_depth_zero(arm, K::Gives, 0) else {
            return Err(ParseError::missing(FUNCTION, "`gives`", if arm.is_empty() { tokens } else { arm }));
        };
        let pattern = &arm[..gives];
        let result = required(grammar, ctx, FUNCTION, "a result after `gives`", &arm[gives + 1..], arm)?;

        if matches!(pattern, [only] if only.is(K::Otherwise)) {
            if i + 1 != parts.len() {
                return Err(ParseError::invalid(FUNCTION, "arm order", arm)
                    .with_help("`otherwise gives` must be the last arm"));
            }
            default = Some(Box::new(result));
        } else {
            let pattern = required(grammar, ctx, FUNCTION, "a pattern before `gives`", pattern, arm)?;
            arms.push(MatchArm { pattern, result });
        }
    }

    Ok(Some(node(
        ExprKind::Match {
            subject: Box::new(subject),
            arms,
            default,
        },
        &tokens[0],
    )))
}

/* ----------------------------- */
/* LOGICAL                       */
/* ----------------------------- */

fn parse_or(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_infix(grammar, ctx, tokens, &[(K::Or, BinaryOp::Or)], level::OR, Associativity::Left)
}

fn parse_and(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_infix(grammar, ctx, tokens, &[(K::And, BinaryOp::And)], level::AND, Associativity::Left)
}

fn parse_not(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_prefix(grammar, ctx, tokens, K::Not, (UnaryOp::Not, level::NOT), "parse_not")
}

/* ----------------------------- */
/* COMPARISON & TESTS            */
/* ----------------------------- */

fn parse_comparison(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(
        grammar,
        ctx,
        tokens,
        &[
            (K::IsEqualTo, BinaryOp::Equal),
            (K::IsNotEqualTo, BinaryOp::NotEqual),
            (K::IsGreaterThan, BinaryOp::Greater),
            (K::IsLessThan, BinaryOp::Less),
            (K::IsAtLeast, BinaryOp::AtLeast),
            (K::IsAtMost, BinaryOp::AtMost),
        ],
        level::COMPARISON,
        Associativity::Left,
    )
}

fn parse_contains(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(grammar, ctx, tokens, &[(K::Contains, BinaryOp::Contains)], level::CONTAINS, Associativity::Left)
}

/// `E is a TYPE`
fn parse_type_check(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_type_check";

    let Some(&is_a) = all_at_depth_zero(tokens, K::IsA).last() else {
        return Ok(None);
    };
    if is_a == 0 || is_a + 1 == tokens.len() {
        return Ok(None);
    }

    let type_name = expect_type(FUNCTION, &tokens[is_a + 1..], tokens)?;
    let slot = Slot::before(level::TYPE_CHECK);
    let Some(operand) = required_operand(grammar, ctx, FUNCTION, "a value to test", &tokens[..is_a], tokens, slot)?
    else {
        return Ok(None);
    };

    Ok(Some(node(
        ExprKind::TypeCheck {
            operand: Box::new(operand),
            type_name,
        },
        &tokens[0],
    )))
}

/// `E is null`, `E is not null`
fn parse_null_check(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    let Some((last, operand)) = tokens.split_last() else {
        return Ok(None);
    };
    let negated = match last.keyword {
        K::IsNull => false,
        K::IsNotNull => true,
        _ => return Ok(None),
    };
    if operand.is_empty() {
        return Ok(None);
    }

    let slot = Slot::before(level::NULL_CHECK);
    let Some(operand) = required_operand(grammar, ctx, "parse_null_check", "a value to test", operand, tokens, slot)?
    else {
        return Ok(None);
    };
    Ok(Some(node(
        ExprKind::NullCheck {
            operand: Box::new(operand),
            negated,
        },
        &tokens[0],
    )))
}

/* ----------------------------- */
/* BITWISE                       */
/* ----------------------------- */

fn parse_bitwise_or(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(grammar, ctx, tokens, &[(K::BitwiseOr, BinaryOp::BitOr)], level::BITWISE_OR, Associativity::Left)
}

fn parse_bitwise_xor(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(grammar, ctx, tokens, &[(K::BitwiseXor, BinaryOp::BitXor)], level::BITWISE_XOR, Associativity::Left)
}

fn parse_bitwise_and(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(grammar, ctx, tokens, &[(K::BitwiseAnd, BinaryOp::BitAnd)], level::BITWISE_AND, Associativity::Left)
}

fn parse_shift(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_infix(
        grammar,
        ctx,
        tokens,
        &[
            (K::ShiftedLeftBy, BinaryOp::ShiftLeft),
            (K::ShiftedRightBy, BinaryOp::ShiftRight),
        ],
        level::SHIFT,
        Associativity::Left,
    )
}

fn parse_bitwise_not(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_prefix(grammar, ctx, tokens, K::BitwiseNot, (UnaryOp::BitNot, level::BITWISE_NOT), "parse_bitwise_not")
}

/* ----------------------------- */
/* ARITHMETIC                    */
/* ----------------------------- */

fn parse_concatenation(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(
        grammar,
        ctx,
        tokens,
        &[(K::ConcatenatedWith, BinaryOp::Concat)],
        level::CONCATENATION,
        Associativity::Left,
    )
}

fn parse_additive(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(
        grammar,
        ctx,
        tokens,
        &[(K::Plus, BinaryOp::Add), (K::Minus, BinaryOp::Subtract)],
        level::ADDITIVE,
        Associativity::Left,
    )
}

fn parse_multiplicative(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_infix(
        grammar,
        ctx,
        tokens,
        &[
            (K::MultipliedBy, BinaryOp::Multiply),
            (K::DividedBy, BinaryOp::Divide),
            (K::Modulo, BinaryOp::Modulo),
        ],
        level::MULTIPLICATIVE,
        Associativity::Left,
    )
}

fn parse_power(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_infix(
        grammar,
        ctx,
        tokens,
        &[(K::ToThePowerOf, BinaryOp::Power)],
        level::POWER,
        Associativity::Right,
    )
}

fn parse_negate(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_prefix(grammar, ctx, tokens, K::Negative, (UnaryOp::Negate, level::NEGATE), "parse_negate")
}

fn parse_sum_of(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_phrase(grammar, ctx, tokens, K::SumOf, (BinaryOp::Add, level::SUM_OF), "parse_sum_of")
}

fn parse_difference_of(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_phrase(grammar, ctx, tokens, K::DifferenceOf, (BinaryOp::Subtract, level::DIFFERENCE_OF), "parse_difference_of")
}

fn parse_product_of(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_phrase(grammar, ctx, tokens, K::ProductOf, (BinaryOp::Multiply, level::PRODUCT_OF), "parse_product_of")
}

fn parse_quotient_of(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_phrase(grammar, ctx, tokens, K::QuotientOf, (BinaryOp::Divide, level::QUOTIENT_OF), "parse_quotient_of")
}

fn parse_remainder_of(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_phrase(grammar, ctx, tokens, K::RemainderOf, (BinaryOp::Modulo, level::REMAINDER_OF), "parse_remainder_of")
}

/* ----------------------------- */
/* PREFIX PHRASES                */
/* ----------------------------- */

/// `cast E as a TYPE`
fn parse_cast(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_cast";

    if !starts_with(tokens, K::Cast) {
        return Ok(None);
    }
    let Some(as_a) = first_at_depth_zero(tokens, K::AsA, 1) else {
        return Ok(None);
    };

    let operand = required(grammar, ctx, FUNCTION, "a value to cast", &tokens[1..as_a], tokens)?;
    let target = expect_type(FUNCTION, &tokens[as_a + 1..], tokens)?;

    Ok(Some(node(
        ExprKind::Cast {
            operand: Box::new(operand),
            target,
        },
        &tokens[0],
    )))
}

fn parse_length(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    parse_prefix(grammar, ctx, tokens, K::LengthOf, (UnaryOp::Length, level::LENGTH), "parse_length")
}

fn parse_absolute_value(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_prefix(grammar, ctx, tokens, K::AbsoluteValueOf, (UnaryOp::Absolute, level::ABSOLUTE_VALUE), "parse_absolute_value")
}

fn parse_square_root(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    parse_prefix(grammar, ctx, tokens, K::SquareRootOf, (UnaryOp::SquareRoot, level::SQUARE_ROOT), "parse_square_root")
}

/* ----------------------------- */
/* COLLECTIONS                   */
/* ----------------------------- */

/// `slice E from A to B`
fn parse_slice(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_slice";

    if !starts_with(tokens, K::Slice) {
        return Ok(None);
    }
    let Some(from) = first_at_depth_zero(tokens, K::From, 1) else {
        return Ok(None);
    };
    let Some(to) = first_at_depth_zero(tokens, K::To, from + 1) else {
        return Ok(None);
    };

    let collection = required(grammar, ctx, FUNCTION, "a list to slice", &tokens[1..from], tokens)?;
    let start = required(grammar, ctx, FUNCTION, "a start after `from`", &tokens[from + 1..to], tokens)?;
    let slot = Slot::after(level::SLICE);
    let Some(end) = required_operand(grammar, ctx, FUNCTION, "an end after `to`", &tokens[to + 1..], tokens, slot)?
    else {
        return Ok(None);
    };

    Ok(Some(node(
        ExprKind::Slice {
            collection: Box::new(collection),
            from: Box::new(start),
            to: Box::new(end),
        },
        &tokens[0],
    )))
}

/// `item I of E`, `element I of E`, `third item of E`
fn parse_index(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_index";

    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let (index, rest) = match first.keyword {
        K::Item | K::Element => {
            let Some(of) = first_at_depth_zero(tokens, K::Of, 1) else {
                return Ok(None);
            };
            let index = required(grammar, ctx, FUNCTION, "a position", &tokens[1..of], tokens)?;
            (index, &tokens[of + 1..])
        }
        K::Ordinal => {
            let shaped = tokens.len() >= 3
                && matches!(tokens[1].keyword, K::Item | K::Element)
                && tokens[2].is(K::Of);
            if !shaped {
                return Ok(None);
            }
            (ordinal_literal(FUNCTION, first)?, &tokens[3..])
        }
        _ => return Ok(None),
    };

    let slot = Slot::after(level::INDEX);
    let Some(collection) = required_operand(grammar, ctx, FUNCTION, "a list after `of`", rest, tokens, slot)? else {
        return Ok(None);
    };
    Ok(Some(node(
        ExprKind::Index {
            collection: Box::new(collection),
            index: Box::new(index),
        },
        &tokens[0],
    )))
}

/// `call $f` or `call $f with A , B`
fn parse_call(grammar: &Grammar, ctx: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    const FUNCTION: &str = "parse_call";

    if !starts_with(tokens, K::Call) || tokens.len() < 2 {
        return Ok(None);
    }

    let callee = identifier_name(&tokens[1..2]).ok_or_else(|| {
        ParseError::invalid(FUNCTION, "function name", &tokens[1..2])
            .with_help("function names start with `$`, as in `call $greet`")
    })?;

    let mut arguments = Vec::new();
    if tokens.len() > 2 {
        if !tokens[2].is(K::With) {
            return Err(ParseError::missing(FUNCTION, "`with` before the arguments", tokens));
        }
        let list = &tokens[3..];
        if list.is_empty() {
            return Err(ParseError::missing(FUNCTION, "arguments after `with`", tokens));
        }
        let pieces = split_on(list, K::Comma);
        let last = pieces.len() - 1;
        for (i, argument) in pieces.into_iter().enumerate() {
            if i < last {
                arguments.push(required(grammar, ctx, FUNCTION, "an argument", argument, tokens)?);
                continue;
            }
            let slot = Slot::after(level::CALL);
            match required_operand(grammar, ctx, FUNCTION, "an argument", argument, tokens, slot)? {
                Some(argument) => arguments.push(argument),
                None => return Ok(None),
            }
        }
    }

    Ok(Some(node(ExprKind::Call { callee, arguments }, &tokens[0])))
}

/// `a list of A , B , C` or `an empty list`
fn parse_list_literal(
    grammar: &Grammar,
    ctx: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    match tokens {
        [only] if only.is(K::EmptyList) => Ok(Some(node(ExprKind::List(Vec::new()), only))),
        [lead, items @ ..] if lead.is(K::ListOf) && !items.is_empty() => {
            const FUNCTION: &str = "parse_list_literal";

            let pieces = split_on(items, K::Comma);
            let last = pieces.len() - 1;
            let mut values = Vec::new();
            for (i, item) in pieces.into_iter().enumerate() {
                if i < last {
                    values.push(required(grammar, ctx, FUNCTION, "a list item", item, tokens)?);
                    continue;
                }
                let slot = Slot::after(level::LIST_LITERAL);
                match required_operand(grammar, ctx, FUNCTION, "a list item", item, tokens, slot)? {
                    Some(item) => values.push(item),
                    None => return Ok(None),
                }
            }
            Ok(Some(node(ExprKind::List(values), lead)))
        }
        _ => Ok(None),
    }
}

/* ----------------------------- */
/* LITERALS                      */
/* ----------------------------- */

fn ordinal_literal(function: &'static str, token: &Token) -> ParseResult<Expr> {
    let value = ordinal_value(&fold(&token.text)).ok_or_else(|| {
        ParseError::invalid_literal(
            function,
            format!("`{}` is not an ordinal", token.text),
            std::slice::from_ref(token),
        )
    })?;
    Ok(node(ExprKind::Literal(Literal::Number(Decimal::from(value))), token))
}

fn parse_number(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    let [token] = tokens else {
        return Ok(None);
    };
    if token.kind != TokenKind::Number {
        return Ok(None);
    }

    let invalid = || {
        ParseError::invalid_literal(
            "parse_number",
            format!("`{}` is not a valid number", token.text),
            tokens,
        )
    };
    if classify(&token.text) != LiteralShape::Number {
        return Err(invalid());
    }
    let value = Decimal::from_str(&token.text).map_err(|_| invalid())?;

    Ok(Some(node(ExprKind::Literal(Literal::Number(value)), token)))
}

/// A standalone ordinal word is its value: `third` is 3.
fn parse_ordinal(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    match tokens {
        [token] if token.is(K::Ordinal) => ordinal_literal("parse_ordinal", token).map(Some),
        _ => Ok(None),
    }
}

fn parse_text(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    let [token] = tokens else {
        return Ok(None);
    };

    let literal = match token.kind {
        TokenKind::String => Literal::Text(unescape("parse_text", token)?),
        TokenKind::Character => {
            let value = unescape("parse_text", token)?;
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Literal::Character(c),
                _ => {
                    return Err(ParseError::invalid_literal(
                        "parse_text",
                        format!("{} is not a single character", token.text),
                        tokens,
                    ))
                }
            }
        }
        _ => return Ok(None),
    };

    Ok(Some(node(ExprKind::Literal(literal), token)))
}

fn parse_boolean_or_null(
    _: &Grammar,
    _: &mut ParseContext<'_>,
    tokens: &[Token],
) -> ParseResult<Option<Expr>> {
    let [token] = tokens else {
        return Ok(None);
    };
    let literal = match token.keyword {
        K::True => Literal::Boolean(true),
        K::False => Literal::Boolean(false),
        K::Null => Literal::Null,
        _ => return Ok(None),
    };
    Ok(Some(node(ExprKind::Literal(literal), token)))
}

fn parse_identifier(_: &Grammar, _: &mut ParseContext<'_>, tokens: &[Token]) -> ParseResult<Option<Expr>> {
    Ok(identifier_name(tokens).map(|name| node(ExprKind::Identifier(name), &tokens[0])))
}
