/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Defines the fundamental lexical token types used by the Carmen
 *            front end during the lexing, condensing and parsing stages.
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

use crate::lexer::keywords::{resolve, Keyword};
use crate::span::Position;

/// The **raw lexical shape** of a token.
///
/// `TokenKind` says what the characters looked like; the grammar role is
/// carried separately by [`Keyword`].
///
/// # Compiler Pipeline Role
/// ```text
/// Source → Lexer → TokenKind + Keyword → Condenser → Parser → AST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A plain word such as `set`, `otherwise` or `banana`.
    Word,

    /// A sigil-prefixed name: `$total`, `$list_of_names`.
    Identifier,

    /// A numeric literal, written with digits (`42`, `3.25`) or condensed
    /// from number words (`one hundred and twenty three`).
    Number,

    /// A double-quoted string literal. The text keeps quotes and escapes.
    String,

    /// A single-quoted character literal: `'x'`, `'\n'`.
    Character,

    /// Structural punctuation: `. , ; : ( ) { }`.
    Punctuation,

    /// Any other symbol the lexer passes through.
    Operator,
}

/// A **single immutable token** of a Carmen source unit.
///
/// # Example Tokens
/// ```text
/// set     →  { kind: Word,        keyword: Set,            text: "set" }
/// $x      →  { kind: Identifier,  keyword: Unknown,        text: "$x" }
/// .       →  { kind: Punctuation, keyword: EndOfStatement, text: "." }
/// ```
///
/// Tokens are produced once and never mutated. Parsing works on slices of
/// one token array, so positions always point back into the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The exact source text (space-joined for condensed compounds).
    pub text: String,

    /// Position of the first character of the token.
    pub position: Position,

    pub kind: TokenKind,

    /// Grammar role, `Keyword::Unknown` for identifiers and literals.
    pub keyword: Keyword,
}

impl Token {
    /// Builds a token and resolves its keyword from the text.
    ///
    /// String, character, number and identifier tokens never carry a
    /// keyword, whatever their text happens to spell.
    pub fn new(text: impl Into<String>, kind: TokenKind, position: Position) -> Self {
        let text = text.into();
        let keyword = match kind {
            TokenKind::String
            | TokenKind::Character
            | TokenKind::Identifier
            | TokenKind::Number => Keyword::Unknown,
            _ => resolve(&text),
        };

        Self {
            text,
            position,
            kind,
            keyword,
        }
    }

    /// Builds a token with an explicit keyword (used by the condenser).
    pub fn with_keyword(
        text: impl Into<String>,
        kind: TokenKind,
        keyword: Keyword,
        position: Position,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            kind,
            keyword,
        }
    }

    pub fn is(&self, keyword: Keyword) -> bool {
        self.keyword == keyword
    }
}

impl fmt::Display for Token {
    /// Prints only the source text; diagnostics want what the user wrote.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Joins the text of a token slice for messages and debug output.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
