//! Lexer for policy source.
//!
//! Logos classifies the raw token shapes; the driving loop in [`lex`] adds
//! what a regular scanner cannot express:
//! - bracket balance, tracked on a stack of open brackets
//! - the terminator check after identifiers, keywords, fields and numbers
//! - line and column bookkeeping
//!
//! ## Error handling
//!
//! The first lexical error ends the scan: a single `Illegal` token carrying
//! the message is appended and nothing follows it. Otherwise the stream ends
//! with an `Eof` token.

mod token_kind;


use std::borrow::Cow;
use std::ops::Range;

use logos::Logos;
use rowan::TextRange;
use serde::Serialize;
use tracing::{debug, trace};

pub use token_kind::{TokenKind, TokenSet, token_sets};

/// A lexical item. `text` is a slice of the source, except for `Illegal`
/// tokens where it holds the error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    #[serde(serialize_with = "serialize_kind")]
    pub kind: TokenKind,
    pub text: Cow<'src, str>,
    #[serde(skip)]
    pub span: TextRange,
    pub line: u32,
    /// 1-based, in characters.
    pub column: u32,
}

impl Token<'_> {
    pub fn offset(&self) -> u32 {
        self.span.start().into()
    }
}

fn serialize_kind<S: serde::Serializer>(kind: &TokenKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.name())
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes `source`. `name` only labels log output.
pub fn lex<'src>(name: &str, source: &'src str) -> Vec<Token<'src>> {
    let mut scanner = Scanner::new(source);
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let checked = match result {
            Ok(kind) => scanner.check(kind, span.clone()).map(|()| kind),
            Err(()) => Err(unrecognized(source, span.start)),
        };
        match checked {
            Ok(kind) => scanner.emit(kind, span),
            Err(message) => {
                debug!(
                    name,
                    line = scanner.line,
                    column = scanner.column,
                    %message,
                    "lexing halted"
                );
                scanner.fail(message, span);
                return scanner.tokens;
            }
        }
    }

    scanner.finish();
    trace!(name, tokens = scanner.tokens.len(), "lexed");
    scanner.tokens
}

/// Concatenated token texts; reproduces the source of any input that lexes
/// without errors.
pub fn token_texts(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text.as_ref()).collect()
}

struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    brackets: Vec<TokenKind>,
    line: u32,
    column: u32,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            brackets: Vec::with_capacity(8),
            line: 1,
            column: 1,
        }
    }

    /// Validates a token against its context before it is emitted.
    fn check(&mut self, kind: TokenKind, span: Range<usize>) -> Result<(), String> {
        let next = self.source[span.end..].chars().next();
        match kind {
            kind if token_sets::OPEN_BRACKETS.contains(kind) => {
                self.brackets.push(kind);
            }
            kind if token_sets::CLOSE_BRACKETS.contains(kind) => {
                if self.brackets.pop() != kind.opening() {
                    let closer = &self.source[span.clone()];
                    let what = match kind {
                        TokenKind::ParenClose => "paren",
                        TokenKind::BracketClose => "bracket",
                        _ => "brace",
                    };
                    return Err(format!(
                        "unexpected right {what} {}",
                        quote_char(closer.chars().next().unwrap_or_default())
                    ));
                }
            }
            TokenKind::Colon => return Err("expected :=".to_owned()),
            TokenKind::Bang => return Err("illegal ! character".to_owned()),
            TokenKind::Dot => {
                return Err(match next {
                    Some(c) if !is_terminator(Some(c)) => format!("bad character {}", quote_char(c)),
                    _ => "expected field".to_owned(),
                });
            }
            TokenKind::Whitespace | TokenKind::Eol => {
                if starts_field_access(&self.source[span.end..]) {
                    return Err("expected identifier".to_owned());
                }
            }
            TokenKind::Number => {
                if let Some(c) = next.filter(|c| zego_core::keywords::is_identifier_char(*c)) {
                    let end = span.end + c.len_utf8();
                    return Err(format!(
                        "bad number syntax: {:?}",
                        &self.source[span.start..end]
                    ));
                }
            }
            TokenKind::UnterminatedString => return Err("unterminated quoted string".to_owned()),
            TokenKind::UnterminatedRawString => {
                return Err("unterminated raw quoted string".to_owned());
            }
            kind if token_sets::WORDS.contains(kind) => {
                if let Some(c) = next.filter(|c| !is_terminator(Some(*c))) {
                    return Err(format!("bad character {}", quote_char(c)));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, span: Range<usize>) {
        let text = &self.source[span.clone()];
        self.tokens.push(Token {
            kind,
            text: Cow::Borrowed(text),
            span: range_to_text_range(span),
            line: self.line,
            column: self.column,
        });
        self.advance(text);
    }

    fn fail(&mut self, message: String, span: Range<usize>) {
        self.tokens.push(Token {
            kind: TokenKind::Illegal,
            text: Cow::Owned(message),
            span: range_to_text_range(span),
            line: self.line,
            column: self.column,
        });
    }

    fn finish(&mut self) {
        let end = self.source.len();
        if self.brackets.is_empty() {
            self.emit(TokenKind::Eof, end..end);
        } else {
            self.fail("unexpected EOF".to_owned(), end..end);
        }
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

fn unrecognized(source: &str, offset: usize) -> String {
    let c = source[offset..].chars().next().unwrap_or_default();
    format!("unrecognized character in action: {}", quote_char(c))
}

/// `U+0040 '@'`
fn quote_char(c: char) -> String {
    format!("U+{:04X} {:?}", u32::from(c), c)
}

/// Characters allowed right after an identifier, keyword, field or number.
fn is_terminator(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => matches!(
            c,
            ' ' | '\t'
                | '\r'
                | '\n'
                | '+'
                | '-'
                | '/'
                | '%'
                | '*'
                | '&'
                | '|'
                | '.'
                | ','
                | ':'
                | '='
                | '!'
                | '<'
                | '>'
                | '['
                | ']'
                | '('
                | ')'
                | '}'
        ),
    }
}

/// A `.` that is not the start of a number: `.field` after whitespace.
fn starts_field_access(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('.') && !chars.next().is_some_and(|c| c.is_ascii_digit())
}
