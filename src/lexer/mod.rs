/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:     lexer/mod.rs
 * Purpose:  Root module for everything that happens before parsing.
 *
 * This module wires together:
 *   - Token and token kind definitions
 *   - The keyword resolver
 *   - The reference character-level lexer
 *   - The token condenser
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

/// Compound-particle and number-word condensing.
pub mod condenser;

/// Closed keyword enumeration and the text → keyword resolver.
pub mod keywords;

/// Source text → raw tokens.
#[allow(clippy::module_inception)]
pub mod lexer;

/// `Token`, `TokenKind`.
pub mod token;

pub use condenser::condense;
pub use keywords::{classify, resolve, Keyword, LiteralShape};
pub use lexer::tokenize;
pub use token::{Token, TokenKind};
