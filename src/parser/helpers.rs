/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      helpers.rs
 * Purpose:   Small slice utilities shared by the expression and statement
 *            productions.
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

use crate::error::{ParseError, ParseResult};
use crate::lexer::keywords::{classify, Keyword, LiteralShape};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::scanner::{all_at_depth_zero, first_at_depth_zero_from};

/// Returns `true` if the slice starts with `keyword`.
pub fn starts_with(tokens: &[Token], keyword: Keyword) -> bool {
    tokens.first().is_some_and(|t| t.is(keyword))
}

/// Removes **one** trailing `.` if present.
pub fn strip_terminator(tokens: &[Token]) -> &[Token] {
    match tokens.split_last() {
        Some((last, rest)) if last.is(Keyword::EndOfStatement) => rest,
        _ => tokens,
    }
}

/// Returns `true` if the slice consists only of `.` tokens (or nothing).
pub fn is_only_terminators(tokens: &[Token]) -> bool {
    tokens.iter().all(|t| t.is(Keyword::EndOfStatement))
}

/// Index of the closer matching the opener at `open`.
///
/// # Example
/// ```text
/// {  print 1 .  }  otherwise  {  }
/// ^ open          ^ matching_close(.., 0) → Some(4)
/// ```
pub fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let closer = match tokens.get(open)?.keyword {
        Keyword::BlockStart => Keyword::BlockEnd,
        Keyword::OpenParen => Keyword::CloseParen,
        _ => return None,
    };
    first_at_depth_zero_from(tokens, closer, open + 1, 1)
}

/// If the whole slice is one bracketed region, returns what is inside.
///
/// `{ a . } otherwise { b . }` is **not** enclosed: the first `{` closes
/// before the end.
pub fn enclosed(tokens: &[Token], opener: Keyword) -> Option<&[Token]> {
    if !starts_with(tokens, opener) {
        return None;
    }
    let close = matching_close(tokens, 0)?;
    (close == tokens.len() - 1).then(|| &tokens[1..close])
}

/// Depth-zero positions of any of `operators`, in source order.
pub fn operator_positions(tokens: &[Token], operators: &[Keyword]) -> Vec<usize> {
    let mut positions: Vec<usize> = operators
        .iter()
        .flat_map(|&op| all_at_depth_zero(tokens, op))
        .collect();
    positions.sort_unstable();
    positions
}

/// The name of a lone `$identifier` token.
pub fn identifier_name(tokens: &[Token]) -> Option<String> {
    match tokens {
        [token] if token.kind == TokenKind::Identifier
            && classify(&token.text) == LiteralShape::Identifier =>
        {
            Some(token.text.clone())
        }
        _ => None,
    }
}

/// Like [`identifier_name`], but a committed production calls it, so a
/// missing or malformed name is a hard error.
pub fn expect_identifier(
    function: &'static str,
    what: &str,
    tokens: &[Token],
    whole: &[Token],
) -> ParseResult<String> {
    if tokens.is_empty() {
        return Err(ParseError::missing(function, what, whole));
    }
    identifier_name(tokens).ok_or_else(|| {
        ParseError::invalid(function, what, tokens).with_help("names start with `$`, as in `$total`")
    })
}

/// Converts the text of a string or character token to its value.
///
/// Understands `\"`, `\'`, `\\`, `\n`, `\t`, `\r` and `\0`.
pub fn unescape(function: &'static str, token: &Token) -> ParseResult<String> {
    let text = &token.text;
    let inner = text
        .get(1..text.len().saturating_sub(1))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| {
            ParseError::invalid_literal(function, "literal is missing its quotes", std::slice::from_ref(token))
        })?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some(c @ ('"' | '\'' | '\\')) => c,
            Some(other) => {
                return Err(ParseError::invalid_literal(
                    function,
                    format!("unknown escape `\\{}`", other),
                    std::slice::from_ref(token),
                ))
            }
            None => {
                return Err(ParseError::invalid_literal(
                    function,
                    "literal ends with a lone `\\`",
                    std::slice::from_ref(token),
                ))
            }
        };
        out.push(escaped);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn tok(text: &str, kind: TokenKind) -> Token {
        Token::new(text, kind, Position::unknown())
    }

    fn punct(text: &str) -> Token {
        tok(text, TokenKind::Punctuation)
    }

    #[test]
    fn strips_one_terminator_only() {
        let tokens = vec![tok("$x", TokenKind::Identifier), punct("."), punct(".")];
        assert_eq!(strip_terminator(&tokens).len(), 2);
    }

    #[test]
    fn enclosed_requires_closer_at_end() {
        let whole = vec![punct("{"), tok("$x", TokenKind::Identifier), punct("}")];
        assert_eq!(enclosed(&whole, Keyword::BlockStart).map(<[Token]>::len), Some(1));

        let split = vec![punct("{"), punct("}"), tok("otherwise", TokenKind::Word), punct("{"), punct("}")];
        assert!(enclosed(&split, Keyword::BlockStart).is_none());
    }

    #[test]
    fn identifier_needs_sigil() {
        assert_eq!(identifier_name(&[tok("$total", TokenKind::Identifier)]).as_deref(), Some("$total"));
        assert!(identifier_name(&[tok("total", TokenKind::Word)]).is_none());
    }

    #[test]
    fn unescapes_strings() {
        let token = tok(r#""say \"hi\"\n""#, TokenKind::String);
        assert_eq!(unescape("test", &token).unwrap(), "say \"hi\"\n");
    }

    #[test]
    fn rejects_unknown_escape() {
        let token = tok(r#""\q""#, TokenKind::String);
        assert!(unescape("test", &token).is_err());
    }
}
