/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      condenser.rs
 * Purpose:   Rewrites runs of raw tokens that spell one grammar particle
 *            ("otherwise if", "is not null", "one hundred and five") into
 *            single compound tokens.
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

use rust_decimal::Decimal;

use crate::error::{ParseError, ParseResult};
use crate::lexer::keywords::{fold, number_word_value, scale_value, Keyword};
use crate::lexer::token::{Token, TokenKind};

/// One condensing rule: a lead keyword followed by up to four keywords.
struct CondenseRule {
    lead: Keyword,
    followers: &'static [Keyword],
    result: Keyword,
}

const fn rule(lead: Keyword, followers: &'static [Keyword], result: Keyword) -> CondenseRule {
    CondenseRule {
        lead,
        followers,
        result,
    }
}

use Keyword as K;

/// Ordered rule table. Within one lead, longer rules come first; the first
/// match at a position wins and nothing shorter is reconsidered.
///
/// Leads are always raw single-word keywords and no result is itself a
/// lead, so a second pass over condensed output finds nothing to do.
static RULES: &[CondenseRule] = &[
    rule(K::Execute, &[K::The, K::Following, K::Semicolon], K::BlockStart),
    rule(K::Otherwise, &[K::If], K::OtherwiseIf),
    rule(K::Equal, &[K::To], K::EqualTo),
    rule(K::Is, &[K::Not, K::Equal, K::To], K::IsNotEqualTo),
    rule(K::Is, &[K::Not, K::Null], K::IsNotNull),
    rule(K::Is, &[K::Equal, K::To], K::IsEqualTo),
    rule(K::Is, &[K::Greater, K::Than], K::IsGreaterThan),
    rule(K::Is, &[K::Less, K::Than], K::IsLessThan),
    rule(K::Is, &[K::At, K::Least], K::IsAtLeast),
    rule(K::Is, &[K::At, K::Most], K::IsAtMost),
    rule(K::Is, &[K::Null], K::IsNull),
    rule(K::Is, &[K::A], K::IsA),
    rule(K::Is, &[K::An], K::IsA),
    rule(K::As, &[K::A], K::AsA),
    rule(K::As, &[K::An], K::AsA),
    rule(K::Divided, &[K::By], K::DividedBy),
    rule(K::Multiplied, &[K::By], K::MultipliedBy),
    rule(K::To, &[K::The, K::Power, K::Of], K::ToThePowerOf),
    rule(K::Shifted, &[K::Left, K::By], K::ShiftedLeftBy),
    rule(K::Shifted, &[K::Right, K::By], K::ShiftedRightBy),
    rule(K::Bitwise, &[K::And], K::BitwiseAnd),
    rule(K::Bitwise, &[K::Or], K::BitwiseOr),
    rule(K::Bitwise, &[K::Xor], K::BitwiseXor),
    rule(K::Bitwise, &[K::Not], K::BitwiseNot),
    rule(K::Concatenated, &[K::With], K::ConcatenatedWith),
    rule(K::The, &[K::Sum, K::Of], K::SumOf),
    rule(K::The, &[K::Difference, K::Of], K::DifferenceOf),
    rule(K::The, &[K::Product, K::Of], K::ProductOf),
    rule(K::The, &[K::Quotient, K::Of], K::QuotientOf),
    rule(K::The, &[K::Remainder, K::Of], K::RemainderOf),
    rule(K::The, &[K::Length, K::Of], K::LengthOf),
    rule(K::The, &[K::Absolute, K::Value, K::Of], K::AbsoluteValueOf),
    rule(K::The, &[K::Square, K::Root, K::Of], K::SquareRootOf),
    rule(K::Sum, &[K::Of], K::SumOf),
    rule(K::Difference, &[K::Of], K::DifferenceOf),
    rule(K::Product, &[K::Of], K::ProductOf),
    rule(K::Quotient, &[K::Of], K::QuotientOf),
    rule(K::Remainder, &[K::Of], K::RemainderOf),
    rule(K::Length, &[K::Of], K::LengthOf),
    rule(K::Absolute, &[K::Value, K::Of], K::AbsoluteValueOf),
    rule(K::Square, &[K::Root, K::Of], K::SquareRootOf),
    rule(K::A, &[K::List, K::Of], K::ListOf),
    rule(K::List, &[K::Of], K::ListOf),
    rule(K::An, &[K::Empty, K::List], K::EmptyList),
    rule(K::Empty, &[K::List], K::EmptyList),
    rule(K::For, &[K::Each], K::ForEach),
    rule(K::Define, &[K::Entry, K::Point], K::DefineEntryPoint),
    rule(K::Define, &[K::Function], K::DefineFunction),
    rule(K::Define, &[K::Structure], K::DefineStructure),
    rule(K::Read, &[K::Into], K::ReadInto),
];

/// Condenses a raw token array into the **working token array**.
///
/// Single forward pass with at most four tokens of lookahead. At each
/// position, in order:
/// 1. a spelled-out number run becomes one `Number` token
/// 2. `fin` becomes `BlockEnd`
/// 3. the first matching compound rule replaces its whole run
/// 4. otherwise the token is copied unchanged
///
/// # Errors
/// Only structurally invalid number words (`five point five point five`,
/// `two point twenty`) fail.
///
/// # Example
/// ```text
/// is not null       → [IsNotNull "is not null"]
/// negative five point five → [Number "-5.5"]
/// ```
pub fn condense(tokens: &[Token]) -> ParseResult<Vec<Token>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if let Some((token, consumed)) = condense_number(tokens, i)? {
            out.push(token);
            i += consumed;
            continue;
        }

        let token = &tokens[i];

        if token.keyword == Keyword::Fin {
            out.push(Token::with_keyword(
                token.text.clone(),
                token.kind,
                Keyword::BlockEnd,
                token.position.clone(),
            ));
            i += 1;
            continue;
        }

        if let Some(rule) = match_rule(tokens, i) {
            let end = i + 1 + rule.followers.len();
            let text = tokens[i..end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            out.push(Token::with_keyword(
                text,
                token.kind,
                rule.result,
                token.position.clone(),
            ));
            i = end;
            continue;
        }

        out.push(token.clone());
        i += 1;
    }

    Ok(out)
}

fn match_rule(tokens: &[Token], at: usize) -> Option<&'static CondenseRule> {
    let lead = tokens[at].keyword;

    RULES.iter().find(|rule| {
        rule.lead == lead
            && rule.followers.iter().enumerate().all(|(offset, expected)| {
                tokens
                    .get(at + 1 + offset)
                    .is_some_and(|t| t.keyword == *expected)
            })
    })
}

/// Accumulates a spelled-out number starting at `start`.
///
/// Returns the condensed token and the number of raw tokens it replaces,
/// or `None` when no number run starts here.
fn condense_number(tokens: &[Token], start: usize) -> ParseResult<Option<(Token, usize)>> {
    let first = &tokens[start];
    let negative = first.keyword == Keyword::Negative;
    let run_start = if negative { start + 1 } else { start };

    let Some(lead) = tokens.get(run_start) else {
        return Ok(None);
    };

    // `negative 5` and `negative 2.5`
    if negative && lead.kind == TokenKind::Number && !lead.text.starts_with('-') {
        let token = Token::with_keyword(
            format!("-{}", lead.text),
            TokenKind::Number,
            Keyword::NumericLiteral,
            first.position.clone(),
        );
        return Ok(Some((token, 2)));
    }

    if lead.keyword != Keyword::NumberWord {
        return Ok(None);
    }

    let mut total = Decimal::ZERO;
    let mut current = Decimal::ZERO;
    let mut fraction = Decimal::ZERO;
    let mut fraction_digits: u32 = 0;
    let mut in_fraction = false;
    let mut previous_was_scale = false;
    let mut i = run_start;

    while let Some(token) = tokens.get(i) {
        let word = fold(&token.text);

        match token.keyword {
            Keyword::NumberWord => {
                let value = number_word_value(&word).unwrap_or(0);
                if in_fraction {
                    if value >= 10 {
                        return Err(ParseError::invalid_literal(
                            "condense_number",
                            format!("only digit words may follow `point`, found `{}`", token.text),
                            &tokens[start..=i],
                        ));
                    }
                    fraction_digits += 1;
                    fraction += Decimal::new(i64::from(value), fraction_digits);
                } else {
                    current = checked(current.checked_add(Decimal::from(value)), tokens, start, i)?;
                }
                previous_was_scale = false;
            }

            Keyword::Hundred | Keyword::Thousand | Keyword::Million | Keyword::Billion => {
                if in_fraction {
                    return Err(ParseError::invalid_literal(
                        "condense_number",
                        format!("`{}` cannot follow `point`", token.text),
                        &tokens[start..=i],
                    ));
                }
                let scale = Decimal::from(scale_value(&word).unwrap_or(1));
                let base = if current.is_zero() { Decimal::ONE } else { current };
                if token.keyword == Keyword::Hundred {
                    current = checked(base.checked_mul(scale), tokens, start, i)?;
                } else {
                    let scaled = checked(base.checked_mul(scale), tokens, start, i)?;
                    total = checked(total.checked_add(scaled), tokens, start, i)?;
                    current = Decimal::ZERO;
                }
                previous_was_scale = true;
            }

            Keyword::And
                if previous_was_scale
                    && !in_fraction
                    && tokens
                        .get(i + 1)
                        .is_some_and(|t| t.keyword == Keyword::NumberWord) =>
            {
                previous_was_scale = false;
            }

            Keyword::Point => {
                if in_fraction {
                    return Err(ParseError::invalid_literal(
                        "condense_number",
                        "a number cannot contain two decimal points",
                        &tokens[start..=i],
                    ));
                }
                if !tokens
                    .get(i + 1)
                    .is_some_and(|t| t.keyword == Keyword::NumberWord)
                {
                    break;
                }
                in_fraction = true;
                previous_was_scale = false;
            }

            _ => break,
        }

        i += 1;
    }

    let mut value = checked(total.checked_add(current), tokens, start, i - 1)?;
    value = checked(value.checked_add(fraction), tokens, start, i - 1)?;
    if negative {
        value = -value;
    }

    let token = Token::with_keyword(
        value.to_string(),
        TokenKind::Number,
        Keyword::NumericLiteral,
        first.position.clone(),
    );

    Ok(Some((token, i - start)))
}

fn checked(value: Option<Decimal>, tokens: &[Token], start: usize, end: usize) -> ParseResult<Decimal> {
    value.ok_or_else(|| {
        ParseError::invalid_literal("condense_number", "number is too large", &tokens[start..=end])
    })
}
