/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      lib.rs
 * Purpose:   Crate root of the Carmen front end.
 *
 * Carmen programs are written as English sentences:
 *
 *   define entry point as {
 *       let $total be the sum of 2 and 3 .
 *       if $total is greater than 4 then print "big" .
 *       otherwise print "small" .
 *   }
 *
 * The crate turns such text into an AST:
 *
 *   Source → Lexer → Condenser → Statement cascade → Expression cascade
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

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod lexer;
pub mod parser;
pub mod span;

pub use ast::{Expr, ExprKind, Stmt, StmtKind};
pub use config::ParseOptions;
pub use diagnostics::DiagnosticPrinter;
pub use error::{codes, LexError, ParseError, ParseResult};
pub use events::{FnObserver, LogEntry, LogLevel, ParseObserver};
pub use lexer::{condense, tokenize, Keyword, Token, TokenKind};
pub use parser::{parse, parse_source, Grammar, ParseOutput, Parser};
pub use span::Position;
