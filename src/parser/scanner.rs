/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      scanner.rs
 * Purpose:   Nesting-aware keyword search over token slices.
 *
 * These are the only functions in the parser that track bracket depth.
 * Every production that needs "the top-level `and`" or "the matching
 * `)`" composes them instead of counting brackets itself.
 *
 * Depth rules:
 *   - `BlockStart` / `OpenParen` belong to the outer level: they are
 *     checked first, then depth goes up by one.
 *   - `BlockEnd` / `CloseParen` belong to the level they return to:
 *     depth goes down by one first, then they are checked.
 *   - A closer that would make depth negative stops the scan. Nothing
 *     past an over-closed region is ever reported.
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

use crate::lexer::keywords::Keyword;
use crate::lexer::token::Token;

/// Iterator over the indices of tokens that sit at depth zero.
struct DepthZero<'t> {
    tokens: &'t [Token],
    index: usize,
    depth: isize,
    stopped: bool,
}

impl<'t> DepthZero<'t> {
    fn new(tokens: &'t [Token], start: usize, initial_depth: usize) -> Self {
        Self {
            tokens,
            index: start,
            depth: initial_depth as isize,
            stopped: false,
        }
    }
}

impl Iterator for DepthZero<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while !self.stopped && self.index < self.tokens.len() {
            let i = self.index;
            let keyword = self.tokens[i].keyword;
            self.index += 1;

            if keyword.is_closer() {
                self.depth -= 1;
                if self.depth < 0 {
                    self.stopped = true;
                    return None;
                }
            }

            let at_zero = self.depth == 0;

            if keyword.is_opener() {
                self.depth += 1;
            }

            if at_zero {
                return Some(i);
            }
        }
        None
    }
}

/// Finds the first `keyword` at depth zero, scanning from `start`.
///
/// # Returns
/// - `Some(index)` into `tokens` (not relative to `start`)
/// - `None` if there is no depth-zero match, or the region is over-closed
///   before one is found
///
/// # Example
/// ```text
/// tokens:  $a  and  ( $b  and  $c )
/// first_at_depth_zero(tokens, And, 0)  →  Some(1)
/// first_at_depth_zero(tokens, And, 2)  →  None
/// ```
pub fn first_at_depth_zero(tokens: &[Token], keyword: Keyword, start: usize) -> Option<usize> {
    first_at_depth_zero_from(tokens, keyword, start, 0)
}

/// Same as [`first_at_depth_zero`] with a caller-supplied starting depth.
///
/// Starting at depth one from just inside an opener finds its matching
/// closer:
///
/// ```text
/// tokens:  {  print 1 .  {  }  }
/// first_at_depth_zero_from(tokens, BlockEnd, 1, 1)  →  Some(6)
/// ```
pub fn first_at_depth_zero_from(
    tokens: &[Token],
    keyword: Keyword,
    start: usize,
    initial_depth: usize,
) -> Option<usize> {
    DepthZero::new(tokens, start, initial_depth).find(|&i| tokens[i].keyword == keyword)
}

/// Finds the first depth-zero token whose keyword is any of `keywords`,
/// and reports which one matched.
pub fn first_of_at_depth_zero(tokens: &[Token], keywords: &[Keyword]) -> Option<(usize, Keyword)> {
    DepthZero::new(tokens, 0, 0)
        .find(|&i| keywords.contains(&tokens[i].keyword))
        .map(|i| (i, tokens[i].keyword))
}

/// Collects every depth-zero index of `keyword`, in source order.
pub fn all_at_depth_zero(tokens: &[Token], keyword: Keyword) -> Vec<usize> {
    DepthZero::new(tokens, 0, 0)
        .filter(|&i| tokens[i].keyword == keyword)
        .collect()
}

/// Partitions `tokens` at every depth-zero `keyword`.
///
/// Separators are not part of any piece. Joining the pieces back with the
/// separator reproduces the input exactly.
///
/// # Returns
/// - an empty vector for empty input
/// - the whole slice as the only part when there is no separator
/// - possibly empty parts around leading, trailing or doubled separators
pub fn split_on(tokens: &[Token], keyword: Keyword) -> Vec<&[Token]> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut start = 0;

    for index in all_at_depth_zero(tokens, keyword) {
        parts.push(&tokens[start..index]);
        start = index + 1;
    }
    parts.push(&tokens[start..]);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenKind;
    use crate::span::Position;

    fn toks(src: &str) -> Vec<Token> {
        src.split_whitespace()
            .map(|w| {
                let kind = if w.starts_with('$') {
                    TokenKind::Identifier
                } else if matches!(w, "(" | ")" | "{" | "}" | "." | ",") {
                    TokenKind::Punctuation
                } else {
                    TokenKind::Word
                };
                Token::new(w, kind, Position::unknown())
            })
            .collect()
    }

    #[test]
    fn skips_parenthesised_matches() {
        let tokens = toks("( $a and $b ) and $c");
        assert_eq!(first_at_depth_zero(&tokens, Keyword::And, 0), Some(5));
    }

    #[test]
    fn opener_is_seen_at_outer_level() {
        let tokens = toks("( $a )");
        assert_eq!(first_at_depth_zero(&tokens, Keyword::OpenParen, 0), Some(0));
        assert_eq!(first_at_depth_zero(&tokens, Keyword::CloseParen, 0), Some(2));
    }

    #[test]
    fn over_closed_region_stops_the_scan() {
        let tokens = toks("$a ) and $b");
        assert_eq!(first_at_depth_zero(&tokens, Keyword::And, 0), None);
    }

    #[test]
    fn initial_depth_finds_matching_closer() {
        let tokens = toks("{ print 1 . { } } .");
        assert_eq!(first_at_depth_zero_from(&tokens, Keyword::BlockEnd, 1, 1), Some(6));
    }

    #[test]
    fn first_of_reports_keyword() {
        let tokens = toks("$a plus ( $b minus $c ) minus $d");
        assert_eq!(
            first_of_at_depth_zero(&tokens, &[Keyword::Minus, Keyword::Or]),
            Some((7, Keyword::Minus))
        );
    }

    #[test]
    fn split_keeps_nested_separators() {
        let tokens = toks("$a , ( $b , $c ) , $d");
        let parts = split_on(&tokens, Keyword::Comma);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 5);
    }

    #[test]
    fn split_edge_cases() {
        assert!(split_on(&[], Keyword::Comma).is_empty());

        let tokens = toks("$a");
        assert_eq!(split_on(&tokens, Keyword::Comma).len(), 1);

        let tokens = toks(", $a ,");
        let parts = split_on(&tokens, Keyword::Comma);
        assert_eq!(parts.len(), 3);
        assert!(parts[0].is_empty() && parts[2].is_empty());
    }
}
