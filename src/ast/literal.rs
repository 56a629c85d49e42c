/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      literal.rs
 * Purpose:   Resolved literal values and the type names usable in casts
 *            and type checks.
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

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lexer::keywords::Keyword;

/// A literal value, already converted from its quoted source form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Exact decimal; `five point five` is `5.5`, not `5.4999…`.
    Number(Decimal),

    /// Unescaped text.
    Text(String),

    Character(char),

    Boolean(bool),

    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => write!(f, "{:?}", s),
            Literal::Character(c) => write!(f, "{:?}", c),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
        }
    }
}

/// Built-in type names (`cast $x as a number`, `$y is a list`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeName {
    Number,
    Text,
    Boolean,
    Character,
    List,
}

impl TypeName {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::NumberType => Some(TypeName::Number),
            Keyword::TextType => Some(TypeName::Text),
            Keyword::BooleanType => Some(TypeName::Boolean),
            Keyword::CharacterType => Some(TypeName::Character),
            Keyword::List => Some(TypeName::List),
            _ => None,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeName::Number => "number",
            TypeName::Text => "text",
            TypeName::Boolean => "boolean",
            TypeName::Character => "character",
            TypeName::List => "list",
        };
        write!(f, "{}", name)
    }
}
