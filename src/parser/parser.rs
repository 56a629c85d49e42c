/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * Parser Entry Point
 *
 * This file defines the `Parser` structure and the public `parse()` driver
 * used to turn a raw token stream into the statement list of a Carmen
 * program.
 *
 * The grammar itself is split across several modules:
 * - `blocks.rs`       → Statement segmentation and `if` chains
 * - `statements.rs`   → Statement productions
 * - `expressions.rs`  → Expression productions
 * - `grammar.rs`      → Priority tables and the cascade drivers
 *
 * This file is the **root coordinator** of the parsing process.
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

use crate::ast::Stmt;
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::events::{LogEntry, LogLevel, ParseObserver};
use crate::lexer::{condense, tokenize, Token};
use crate::parser::blocks::parse_block;
use crate::parser::context::ParseContext;
use crate::parser::grammar::Grammar;

/// Everything one parse produced.
///
/// Parsing never stops at the first error: `nodes` holds every statement
/// that parsed, `errors` every statement that did not.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutput {
    pub nodes: Vec<Stmt>,
    pub errors: Vec<ParseError>,
    pub logs: Vec<LogEntry>,
}

impl ParseOutput {
    /// `true` if no errors were recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn failed(error: ParseError) -> Self {
        Self {
            nodes: Vec::new(),
            errors: vec![error],
            logs: Vec::new(),
        }
    }
}

/// The Carmen parser.
///
/// Holds the options and the observers; the grammar is shared. A `Parser`
/// can be reused for any number of inputs.
///
/// # Example
/// ```rust
/// use carmen::{ParseOptions, Parser};
///
/// let parser = Parser::new(ParseOptions::default());
/// let output = parser.parse_source("print 1 plus 2 .");
/// assert!(output.is_clean());
/// assert_eq!(output.nodes.len(), 1);
/// ```
#[derive(Default)]
pub struct Parser {
    options: ParseOptions,
    observers: Vec<Box<dyn ParseObserver>>,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            observers: Vec::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Registers an observer for errors and log entries of every later
    /// parse.
    pub fn subscribe(&mut self, observer: impl ParseObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Parses an already tokenized program.
    ///
    /// # Behavior
    /// 1. Condenses compound particles and spelled-out numbers
    /// 2. Splits the program into statements and parses each one
    /// 3. Collects the nodes, the recovered errors and the log entries
    ///
    /// A condenser error ends the parse: the output then carries that one
    /// error and no nodes.
    pub fn parse(&self, tokens: &[Token]) -> ParseOutput {
        let condensed = match condense(tokens) {
            Ok(condensed) => condensed,
            Err(error) => {
                self.notify(&error);
                return ParseOutput::failed(error);
            }
        };

        let mut ctx = ParseContext::new(&self.options, &self.observers);
        ctx.log(
            LogLevel::Debug,
            format!(
                "parsing `{}`: {} tokens ({} after condensing)",
                self.options.source_name,
                tokens.len(),
                condensed.len()
            ),
        );

        let nodes = parse_block(Grammar::shared(), &mut ctx, &condensed);

        ctx.log(
            LogLevel::Info,
            format!(
                "parsed {} statements with {} errors",
                nodes.len(),
                ctx.errors().len()
            ),
        );

        let (errors, logs) = ctx.finish();
        ParseOutput {
            nodes,
            errors,
            logs,
        }
    }

    /// Tokenizes `source` under the configured source name, then parses it.
    pub fn parse_source(&self, source: &str) -> ParseOutput {
        match tokenize(source, &self.options.source_name) {
            Ok(tokens) => self.parse(&tokens),
            Err(error) => {
                let error = ParseError::from(error);
                self.notify(&error);
                ParseOutput::failed(error)
            }
        }
    }

    fn notify(&self, error: &ParseError) {
        log::debug!(target: "carmen", "parse aborted: {}", error);
        for observer in &self.observers {
            observer.on_error(error);
        }
    }
}

/// Parses `tokens` with the default options.
///
/// # Carmen Pipeline
/// ```text
/// Source → Lexer → Tokens → Condenser → Parser → AST
/// ```
pub fn parse(tokens: &[Token]) -> ParseOutput {
    Parser::default().parse(tokens)
}

/// Tokenizes and parses `source`, naming it `source_name` in positions.
pub fn parse_source(source: &str, source_name: &str) -> ParseOutput {
    Parser::new(ParseOptions::default().with_source_name(source_name)).parse_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::ast::StmtKind;
    use crate::error::codes;
    use crate::events::FnObserver;

    #[test]
    fn empty_input_yields_nothing() {
        let output = parse(&[]);
        assert!(output.nodes.is_empty());
        assert!(output.is_clean());
    }

    #[test]
    fn errors_do_not_stop_the_parse() {
        let output = parse_source("print 1 . set $x equal to . print 2 .", "t.carmen");
        assert_eq!(output.nodes.len(), 2);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].code, codes::MISSING_PART);
        assert!(matches!(output.nodes[1].kind, StmtKind::Print(_)));
    }

    #[test]
    fn lexer_errors_become_parse_errors() {
        let output = parse_source("print \"open .", "t.carmen");
        assert!(output.nodes.is_empty());
        assert_eq!(output.errors.len(), 1);
    }

    #[test]
    fn observers_hear_about_recovered_errors() {
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);

        let mut parser = Parser::new(ParseOptions::default());
        parser.subscribe(FnObserver::new(
            move |_: &ParseError| *seen.borrow_mut() += 1,
            |_: &LogEntry| {},
        ));

        let output = parser.parse_source("frobnicate wildly . print 1 .");
        assert_eq!(*count.borrow(), 1);
        assert_eq!(output.errors[0].code, codes::UNRECOGNIZED);
    }

    #[test]
    fn summary_is_logged() {
        let output = parse_source("print 1 .", "t.carmen");
        assert!(output
            .logs
            .iter()
            .any(|entry| entry.level == LogLevel::Info && entry.message.contains("1 statements")));
    }
}
