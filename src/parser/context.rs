/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      context.rs
 * Purpose:   Mutable state owned by a single parse.
 *
 * The grammar tables are shared and immutable. Everything a parse writes
 * (errors, log entries, the current nesting depth) lives here instead, so
 * any number of parses may share one grammar.
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

use std::collections::HashMap;

use crate::ast::Expr;
use crate::config::ParseOptions;
use crate::error::{codes, ParseError, ParseResult};
use crate::events::{LogEntry, LogLevel, ParseObserver};
use crate::lexer::token::Token;
use crate::parser::grammar::ExpressionRule;

/// Identifies a sub-slice of the token stream being parsed: its start
/// address and length.
type SliceKey = (usize, usize);

/// Outcome of a completed expression cascade over one slice.
pub(crate) type Selection = Option<(ExpressionRule, Expr)>;

/// Per-parse state: collected errors and logs, observers, the recursion
/// guard, and the expression memo.
///
/// A context belongs to one token stream. Every slice handed to the
/// grammar through it must borrow from that stream, since the memo is
/// keyed by slice address.
pub struct ParseContext<'a> {
    options: &'a ParseOptions,
    observers: &'a [Box<dyn ParseObserver>],
    errors: Vec<ParseError>,
    logs: Vec<LogEntry>,
    depth: usize,
    memo: HashMap<SliceKey, Selection>,
}

impl<'a> ParseContext<'a> {
    pub fn new(options: &'a ParseOptions, observers: &'a [Box<dyn ParseObserver>]) -> Self {
        Self {
            options,
            observers,
            errors: Vec::new(),
            logs: Vec::new(),
            depth: 0,
            memo: HashMap::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        self.options
    }

    /// Writes a structured log entry.
    ///
    /// The entry is stored for the output, handed to every observer, and
    /// forwarded to the `log` facade at the matching level.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry::now(level, message);
        log::log!(target: "carmen", level.as_log_level(), "{}", entry.message);

        for observer in self.observers {
            observer.on_log(&entry);
        }
        self.logs.push(entry);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Records a hard error that was caught at a statement boundary.
    pub fn report_error(&mut self, error: ParseError) {
        log::debug!(target: "carmen", "recovered from {}", error);

        for observer in self.observers {
            observer.on_error(&error);
        }
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// # Errors
    /// Fails with `C0006` instead of calling `f` once the configured
    /// `max_nesting_depth` is reached.
    pub fn nested<T>(
        &mut self,
        function: &'static str,
        tokens: &[Token],
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.options.max_nesting_depth {
            return Err(ParseError::new(
                codes::NESTING_LIMIT,
                function,
                format!("nesting is deeper than {} levels", self.options.max_nesting_depth),
                tokens,
            ));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn slice_key(tokens: &[Token]) -> SliceKey {
        (tokens.as_ptr() as usize, tokens.len())
    }

    /// The cascade result already computed for exactly this slice.
    ///
    /// Only completed cascades are remembered. Hard errors are never
    /// cached: they end the statement being parsed.
    pub(crate) fn remembered(&self, tokens: &[Token]) -> Option<&Selection> {
        self.memo.get(&Self::slice_key(tokens))
    }

    pub(crate) fn remember(&mut self, tokens: &[Token], selection: &Selection) {
        self.memo.insert(Self::slice_key(tokens), selection.clone());
    }

    /// Consumes the context, returning everything it collected.
    pub fn finish(self) -> (Vec<ParseError>, Vec<LogEntry>) {
        (self.errors, self.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::events::FnObserver;

    #[test]
    fn observers_see_logs_and_errors() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let errors_seen = Rc::clone(&seen);
        let logs_seen = Rc::clone(&seen);

        let observers: Vec<Box<dyn ParseObserver>> = vec![Box::new(FnObserver::new(
            move |e: &ParseError| errors_seen.borrow_mut().push(format!("error {}", e.code)),
            move |l: &LogEntry| logs_seen.borrow_mut().push(format!("log {}", l.message)),
        ))];
        let options = ParseOptions::default();
        let mut ctx = ParseContext::new(&options, &observers);

        ctx.warn("careful");
        ctx.report_error(ParseError::new(codes::UNRECOGNIZED, "test", "bad", &[]));

        assert_eq!(*seen.borrow(), vec!["log careful", "error C0001"]);
        let (errors, logs) = ctx.finish();
        assert_eq!(errors.len(), 1);
        assert_eq!(logs[0].level, LogLevel::Warning);
    }

    #[test]
    fn nesting_limit_is_a_hard_error() {
        let options = ParseOptions::default().with_max_nesting_depth(2);
        let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
        let mut ctx = ParseContext::new(&options, &observers);

        let result = ctx.nested("a", &[], |ctx| {
            ctx.nested("b", &[], |ctx| ctx.nested("c", &[], |_| Ok(())))
        });

        let error = result.unwrap_err();
        assert_eq!(error.code, codes::NESTING_LIMIT);
        assert_eq!(error.function, "c");
    }

    #[test]
    fn memo_is_keyed_by_the_exact_slice() {
        let tokens = crate::lexer::tokenize("$a plus $b", "t").unwrap();
        let options = ParseOptions::default();
        let observers: Vec<Box<dyn ParseObserver>> = Vec::new();
        let mut ctx = ParseContext::new(&options, &observers);

        ctx.remember(&tokens[..1], &None);
        assert!(matches!(ctx.remembered(&tokens[..1]), Some(None)));
        assert!(ctx.remembered(&tokens[..2]).is_none());
        assert!(ctx.remembered(&tokens[1..2]).is_none());
    }
}
