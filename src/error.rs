/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      error.rs
 * Purpose:   Hard parse errors and lexer errors.
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

use serde::Serialize;
use thiserror::Error;

use crate::lexer::token::{render, Token};
use crate::span::Position;

/// Stable error codes.
pub mod codes {
    /// Nothing in the grammar accepts the tokens.
    pub const UNRECOGNIZED: &str = "C0001";
    /// A production was identified but a required part is missing.
    pub const MISSING_PART: &str = "C0002";
    /// A literal (or spelled-out number) could not be converted.
    pub const INVALID_LITERAL: &str = "C0003";
    /// An `if` / `otherwise if` / `otherwise` chain is malformed.
    pub const MALFORMED_CHAIN: &str = "C0004";
    /// Unbalanced blocks or missing statement terminators.
    pub const BLOCK_STRUCTURE: &str = "C0005";
    /// Expressions or blocks nested deeper than the configured limit.
    pub const NESTING_LIMIT: &str = "C0006";
    /// A required part is present but nothing in the grammar accepts it.
    pub const INVALID_PART: &str = "C0007";
}

/// A **hard parse failure**.
///
/// Raised once a production has been uniquely identified by its leading
/// token(s) but a required part fails to parse. Carries the name of the
/// function that raised it and the exact offending token slice, so the
/// position and the text can be reproduced.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("error[{code}] in {function}: {message}")]
pub struct ParseError {
    /// Stable error code (C0001, C0002, …)
    pub code: &'static str,

    /// Name of the parsing function that raised the error.
    pub function: &'static str,

    /// Human-readable error message
    pub message: String,

    /// The offending tokens.
    pub tokens: Vec<Token>,

    /// Optional note / help text
    pub help: Option<String>,
}

impl ParseError {
    /// Generic constructor
    pub fn new(
        code: &'static str,
        function: &'static str,
        message: impl Into<String>,
        tokens: &[Token],
    ) -> Self {
        Self {
            code,
            function,
            message: message.into(),
            tokens: tokens.to_vec(),
            help: None,
        }
    }

    /// No production accepted the tokens.
    pub fn unrecognized(function: &'static str, what: &str, tokens: &[Token]) -> Self {
        Self::new(
            codes::UNRECOGNIZED,
            function,
            format!("could not understand {} `{}`", what, render(tokens)),
            tokens,
        )
    }

    /// A committed production is missing a required part.
    pub fn missing(function: &'static str, part: &str, tokens: &[Token]) -> Self {
        Self::new(
            codes::MISSING_PART,
            function,
            format!("expected {} in `{}`", part, render(tokens)),
            tokens,
        )
    }

    /// A committed production found a part but could not parse it.
    pub fn invalid(function: &'static str, part: &str, tokens: &[Token]) -> Self {
        Self::new(
            codes::INVALID_PART,
            function,
            format!("{} `{}` could not be parsed", part, render(tokens)),
            tokens,
        )
    }

    pub fn invalid_literal(function: &'static str, message: impl Into<String>, tokens: &[Token]) -> Self {
        Self::new(codes::INVALID_LITERAL, function, message, tokens)
    }

    pub fn malformed_chain(function: &'static str, message: impl Into<String>, tokens: &[Token]) -> Self {
        Self::new(codes::MALFORMED_CHAIN, function, message, tokens)
    }

    pub fn block_structure(function: &'static str, message: impl Into<String>, tokens: &[Token]) -> Self {
        Self::new(codes::BLOCK_STRUCTURE, function, message, tokens)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Position of the first offending token, if any.
    pub fn position(&self) -> Option<&Position> {
        self.tokens.first().map(|t| &t.position)
    }
}

/// Result of a parsing step. `Ok(None)` is a soft rejection, `Err` a hard
/// parse error.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised by the reference lexer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("unterminated character literal at {position}")]
    UnterminatedCharacter { position: Position },

    #[error("unexpected character `{found}` at {position}")]
    UnexpectedCharacter { found: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> &Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::UnterminatedCharacter { position }
            | LexError::UnexpectedCharacter { position, .. } => position,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let message = err.to_string();
        let position = err.position().clone();
        let token = Token::with_keyword(
            "",
            crate::lexer::token::TokenKind::Operator,
            crate::lexer::keywords::Keyword::Unknown,
            position,
        );
        ParseError::new(codes::UNRECOGNIZED, "tokenize", message, &[token])
    }
}
