/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      lexer.rs
 * Purpose:   Character-level scanner turning Carmen source text into raw
 *            tokens for the condenser.
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

use std::sync::Arc;

use crate::error::LexError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Position;

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    source: Arc<str>,
    pub tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a new Carmen lexer instance from raw source code.
    ///
    /// # Parameters
    /// - `source`: The source text.
    /// - `source_name`: Name recorded in every token position.
    ///
    /// # Returns
    /// A lexer with the cursor at line 1, column 1 and an empty output
    /// buffer.
    pub fn new(source: &str, source_name: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            source: Arc::from(source_name),
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire source input.
    ///
    /// # Behavior
    /// - Ignores whitespace and `#` line comments
    /// - Emits raw tokens with their keyword already resolved
    /// - Does **not** append an end marker; parsing works on slices
    ///
    /// # Errors
    /// Unterminated strings or characters and stray symbols.
    pub fn scan_tokens(&mut self) -> Result<(), LexError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        Ok(())
    }

    /// Scans and emits a single token from the source stream.
    fn scan_token(&mut self) -> Result<(), LexError> {
        let start = self.position();
        let ch = self.advance();

        match ch {
            ' ' | '\r' | '\t' | '\n' => {}

            '#' => {
                while self.peek() != '\n' && !self.is_at_end() {
                    self.advance();
                }
            }

            '.' | ',' | ';' | ':' | '(' | ')' | '{' | '}' => {
                self.push(ch.to_string(), TokenKind::Punctuation, start);
            }

            '"' => self.string(start)?,

            '\'' => self.character(start)?,

            '$' => {
                if self.peek().is_alphabetic() || self.peek() == '_' {
                    let text = self.take_while(ch, |c| c.is_alphanumeric() || c == '_');
                    self.push(text, TokenKind::Identifier, start);
                } else {
                    return Err(LexError::UnexpectedCharacter {
                        found: ch,
                        position: start,
                    });
                }
            }

            c if c.is_ascii_digit() => self.number(c, start),

            c if c.is_alphabetic() || c == '_' => {
                let text = self.take_while(c, |c| c.is_alphanumeric() || c == '_');
                self.push(text, TokenKind::Word, start);
            }

            '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!' | '%' | '&' | '|' | '^' | '?' => {
                self.push(ch.to_string(), TokenKind::Operator, start);
            }

            other => {
                return Err(LexError::UnexpectedCharacter {
                    found: other,
                    position: start,
                })
            }
        }

        Ok(())
    }

    /// Parses a double-quoted string literal.
    ///
    /// The token text keeps both quotes and any escapes; unescaping is the
    /// literal production's job.
    fn string(&mut self, start: Position) -> Result<(), LexError> {
        let mut text = String::from('"');

        loop {
            if self.is_at_end() {
                return Err(LexError::UnterminatedString { position: start });
            }

            let c = self.advance();
            text.push(c);

            if c == '\\' {
                if self.is_at_end() {
                    return Err(LexError::UnterminatedString { position: start });
                }
                text.push(self.advance());
                continue;
            }

            if c == '"' {
                break;
            }
        }

        self.push(text, TokenKind::String, start);
        Ok(())
    }

    /// Parses `'x'` or an escaped `'\n'`.
    fn character(&mut self, start: Position) -> Result<(), LexError> {
        let mut text = String::from('\'');

        if self.is_at_end() || self.peek() == '\n' {
            return Err(LexError::UnterminatedCharacter { position: start });
        }

        let c = self.advance();
        text.push(c);
        if c == '\\' {
            if self.is_at_end() {
                return Err(LexError::UnterminatedCharacter { position: start });
            }
            text.push(self.advance());
        }

        if self.peek() != '\'' {
            return Err(LexError::UnterminatedCharacter { position: start });
        }
        text.push(self.advance());

        self.push(text, TokenKind::Character, start);
        Ok(())
    }

    /// Parses an integer or decimal literal.
    ///
    /// A `.` only belongs to the number when a digit follows it, so
    /// `set $x equal to 5.` still ends the statement.
    fn number(&mut self, first: char, start: Position) {
        let mut text = self.take_while(first, |c| c.is_ascii_digit());

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            text.push(self.advance());
            while self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
        }

        self.push(text, TokenKind::Number, start);
    }

    fn take_while(&mut self, first: char, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::from(first);
        while !self.is_at_end() && accept(self.peek()) {
            text.push(self.advance());
        }
        text
    }

    fn push(&mut self, text: String, kind: TokenKind, position: Position) {
        self.tokens.push(Token::new(text, kind, position));
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, Arc::clone(&self.source))
    }

    /// Advances the cursor by one character, keeping line and column.
    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

/// Tokenizes a whole source unit.
///
/// # Example
/// ```text
/// tokenize("print 5 .", "main.crm") → [print] [5] [.]
/// ```
pub fn tokenize(source: &str, source_name: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source, source_name);
    lexer.scan_tokens()?;
    Ok(lexer.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::keywords::Keyword;

    #[test]
    fn words_identifiers_and_punctuation() {
        let tokens = tokenize("set $x equal to 5 .", "t").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Identifier,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Number,
                TokenKind::Punctuation,
            ]
        );
        assert_eq!(tokens[0].keyword, Keyword::Set);
        assert_eq!(tokens[5].keyword, Keyword::EndOfStatement);
    }

    #[test]
    fn decimal_numbers_keep_their_point_but_terminators_split() {
        let tokens = tokenize("3.25 5.", "t").unwrap();
        assert_eq!(tokens[0].text, "3.25");
        assert_eq!(tokens[1].text, "5");
        assert_eq!(tokens[2].keyword, Keyword::EndOfStatement);
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = tokenize("print 1 .\n  print 2 .", "main.crm").unwrap();
        assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
        assert_eq!((tokens[3].position.line, tokens[3].position.column), (2, 3));
        assert_eq!(&*tokens[3].position.source, "main.crm");
    }

    #[test]
    fn strings_keep_quotes_and_escapes() {
        let tokens = tokenize(r#"print "say \"hi\"" ."#, "t").unwrap();
        assert_eq!(tokens[1].text, r#""say \"hi\"""#);
        assert_eq!(tokens[1].keyword, Keyword::Unknown);
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = tokenize("# nothing here\n# or here", "t").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = tokenize("print \"oops", "t").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }
}
