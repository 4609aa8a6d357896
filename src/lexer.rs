// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lexer for the Gettext PO file format.
//!
//! The lexer turns a complete in-memory PO source text into a flat,
//! ordered stream of tokens: `msgid`/`msgstr` keywords and decoded
//! quoted string literals. Comments and whitespace are consumed and
//! discarded. The grammar that assembles tokens into catalog entries
//! lives downstream of this module.
//!
//! Every token and every error carries the 1-based line number where
//! it starts, so callers can produce `file:line` diagnostics.

use thiserror::Error;

/// A structural keyword recognized at the top level of a PO file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Keyword {
    Msgid,
    Msgstr,
}

impl Keyword {
    fn as_str(self) -> &'static str {
        match self {
            Keyword::Msgid => "msgid",
            Keyword::Msgstr => "msgstr",
        }
    }
}

/// A single lexed token.
///
/// The token stream preserves source order, so line numbers are
/// non-decreasing across a successful [`tokenize`] result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A quoted string literal with its escapes decoded.
    Str { line: usize, content: String },
    /// A `msgid` or `msgstr` keyword.
    Keyword { kind: Keyword, line: usize },
}

impl Token {
    /// The 1-based line where the token's first character appears.
    pub fn line(&self) -> usize {
        match self {
            Token::Str { line, .. } | Token::Keyword { line, .. } => *line,
        }
    }
}

/// Failure to lex a PO source text.
///
/// Lexing is atomic: on failure no prefix of the token stream is
/// returned, only the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// Malformed input: a keyword without a following space, an
    /// unsupported escape code, a literal newline inside a string, or
    /// a byte no rule accepts.
    #[error("{line}: {message}")]
    Syntax { line: usize, message: String },
    /// The input ended while a token was still open. `expected` is
    /// the character that would have closed it.
    #[error("{line}: missing token: expected `{expected}`")]
    TokenMissing { line: usize, expected: char },
}

/// Split a PO source text into tokens.
///
/// # Examples
///
/// ```
/// use po_merge_helpers::lexer::{tokenize, Keyword, Token};
///
/// assert_eq!(
///     tokenize("msgid \"hi\"").unwrap(),
///     vec![
///         Token::Keyword { kind: Keyword::Msgid, line: 1 },
///         Token::Str { line: 1, content: String::from("hi") },
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new(text).run()
}

/// Cursor over the raw bytes of the source text.
///
/// All scanning decisions are made on single ASCII bytes, so the
/// cursor only ever stops on UTF-8 character boundaries and slicing
/// the underlying `&str` between stops is safe.
struct Lexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Lexer {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn syntax_error(&self, message: impl Into<String>) -> TokenizeError {
        TokenizeError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, TokenizeError> {
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'#' => self.comment(),
                b'"' => {
                    self.pos += 1;
                    let token = self.string()?;
                    self.tokens.push(token);
                }
                _ => self.keyword()?,
            }
        }
        Ok(self.tokens)
    }

    /// Consume a `#` comment up to (not including) the next newline.
    fn comment(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    /// Recognize a keyword at the cursor and emit it.
    ///
    /// A keyword must be followed by a whitespace byte. A keyword
    /// followed by anything else is a hard error rather than a
    /// fallthrough: `msgid"x"` is a common typo and deserves a precise
    /// diagnostic. There is no identifier token, so any other byte
    /// here is itself an error.
    fn keyword(&mut self) -> Result<(), TokenizeError> {
        let rest = &self.bytes[self.pos..];
        let kind = [Keyword::Msgid, Keyword::Msgstr]
            .into_iter()
            .find(|kind| rest.starts_with(kind.as_str().as_bytes()));
        let Some(kind) = kind else {
            return Err(self.syntax_error("unexpected character"));
        };
        match rest.get(kind.as_str().len()) {
            Some(b' ' | b'\t' | b'\r' | b'\n') => {
                self.tokens.push(Token::Keyword {
                    kind,
                    line: self.line,
                });
                // The separator is left for the main loop, which also
                // counts the line if it is a newline.
                self.pos += kind.as_str().len();
                Ok(())
            }
            _ => Err(self.syntax_error(format!("no space after '{}'", kind.as_str()))),
        }
    }

    /// Scan a string literal, starting just after the opening quote.
    ///
    /// The returned token carries the line of the opening quote.
    /// Unescaped bytes are accumulated as literal runs and pushed in
    /// slices rather than one byte at a time.
    fn string(&mut self) -> Result<Token, TokenizeError> {
        let start_line = self.line;
        let mut content = String::new();
        let mut run_start = self.pos;
        loop {
            match self.bytes.get(self.pos) {
                None => {
                    return Err(TokenizeError::TokenMissing {
                        line: self.line,
                        expected: '"',
                    })
                }
                Some(b'"') => {
                    content.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(Token::Str {
                        line: start_line,
                        content,
                    });
                }
                Some(b'\n') => return Err(self.syntax_error("newline in string")),
                Some(b'\\') => {
                    content.push_str(&self.text[run_start..self.pos]);
                    let decoded = match self.bytes.get(self.pos + 1) {
                        Some(b'"') => '"',
                        Some(b'n') => '\n',
                        Some(b't') => '\t',
                        Some(b'\\') => '\\',
                        Some(_) => return Err(self.syntax_error("unsupported escape code")),
                        None => {
                            return Err(TokenizeError::TokenMissing {
                                line: self.line,
                                expected: '"',
                            })
                        }
                    };
                    content.push(decoded);
                    self.pos += 2;
                    run_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }
}
