/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      diagnostics.rs
 * Purpose:   Renders parse errors as compiler-style messages.
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

use crate::error::ParseError;

/// Renders human-friendly, compiler-style diagnostics for Carmen parse
/// errors.
///
/// The printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the error position with a caret (`^`)
/// - Optionally shows a help line
///
/// Output stays readable without color.
pub struct DiagnosticPrinter {
    /// Full text of the source unit.
    source: String,

    /// Display name of the source unit (e.g. `main.carmen`).
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats one error.
    ///
    /// # Output Example
    /// ```text
    /// error[C0002]: expected a value after `equal to` in `set $x equal to .`
    ///   --> main.carmen:3:1
    ///    |
    ///  3 | set $x equal to .
    ///    | ^
    /// help: …
    /// ```
    ///
    /// Errors without a position (nothing to point at) render the header
    /// only.
    pub fn render(&self, error: &ParseError) -> String {
        let mut out = format!("error[{}]: {}\n", error.code, error.message);

        if let Some(position) = error.position().filter(|p| p.line > 0) {
            let line = position.line;
            let column = position.column.max(1);
            let src_line = self.source.lines().nth(line - 1).unwrap_or("");

            out.push_str(&format!("  --> {}:{}:{}\n", self.file_name, line, column));
            out.push_str("   |\n");
            out.push_str(&format!("{:>3} | {}\n", line, src_line));
            out.push_str(&format!("   | {}^\n", " ".repeat(column - 1)));
        }

        if let Some(help) = &error.help {
            out.push_str(&format!("help: {}\n", help));
        }

        out
    }

    /// Prints [`DiagnosticPrinter::render`] to stderr.
    pub fn print(&self, error: &ParseError) {
        eprint!("{}", self.render(error));
    }
}
