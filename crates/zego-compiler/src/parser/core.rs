//! Parser state machine and low-level operations.

use std::sync::Arc;

use zego_core::Location;

use super::ParseOptions;
use crate::diagnostics::{DiagnosticKind, Diagnostics, location_range};
use crate::lexer::{Token, TokenKind};

/// Token cursor over one lexed source.
///
/// The token list always ends in `Eof` or `Illegal`; the cursor never moves
/// past that last token. The first reported error ends the parse.
pub struct Parser<'src> {
    pub(super) file: Option<Arc<str>>,
    pub(super) tokens: Vec<Token<'src>>,
    pub(super) pos: usize,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    recursion_limit: u32,
}

impl<'src> Parser<'src> {
    pub fn new(file: &str, tokens: Vec<Token<'src>>, options: &ParseOptions) -> Self {
        Self {
            file: (!file.is_empty()).then(|| Arc::from(file)),
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            recursion_limit: options.recursion_limit,
        }
    }

    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }

    pub(super) fn failed(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Kind of the next significant token, skipping trivia.
    pub(super) fn current(&mut self) -> TokenKind {
        self.skip_trivia();
        self.raw()
    }

    /// Kind of the token under the cursor, trivia included.
    pub(super) fn raw(&self) -> TokenKind {
        self.token().kind
    }

    pub(super) fn token(&self) -> &Token<'src> {
        self.ensure_in_bounds();
        &self.tokens[self.pos]
    }

    pub(super) fn text(&self) -> &str {
        &self.token().text
    }

    pub(super) fn at(&mut self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(super) fn skip_trivia(&mut self) {
        while self.raw().is_trivia() {
            self.pos += 1;
        }
    }

    /// Advance past the token under the cursor.
    pub(super) fn bump(&mut self) {
        self.ensure_not_terminal();
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Location of the token under the cursor.
    pub(super) fn location(&self) -> Location {
        let token = self.token();
        let location = Location::new(token.line, token.column)
            .with_span(token.offset(), u32::from(token.span.len()));
        match &self.file {
            Some(file) => location.with_file(file.clone()),
            None => location,
        }
    }

    /// Reports an error at the current token and returns `None` so that
    /// productions can bail out with `return self.error(..)`.
    pub(super) fn error<T>(&mut self, kind: DiagnosticKind, detail: Option<&str>) -> Option<T> {
        let location = self.location();
        self.error_at(kind, detail, location)
    }

    pub(super) fn error_at<T>(
        &mut self,
        kind: DiagnosticKind,
        detail: Option<&str>,
        location: Location,
    ) -> Option<T> {
        if self.failed() {
            return None;
        }
        let range = location_range(&location);
        let builder = self.diagnostics.report(kind, range).at(Some(location));
        match detail {
            Some(detail) => builder.message(detail).emit(),
            None => builder.emit(),
        }
        None
    }

    /// Reports the token under the cursor as unexpected. Illegal tokens
    /// surface the lexer's message.
    pub(super) fn unexpected<T>(&mut self) -> Option<T> {
        let kind = self.current();
        if kind == TokenKind::Illegal {
            let message = self.text().to_owned();
            return self.error(DiagnosticKind::IllegalToken, Some(&message));
        }
        if kind.is_keyword() {
            return self.error(DiagnosticKind::UnexpectedKeyword, Some(kind.name()));
        }
        self.error(DiagnosticKind::UnexpectedToken, Some(&kind.describe()))
    }

    /// Expects `kind` (after trivia) and consumes it, reporting `error` otherwise.
    /// Illegal tokens always report the lexer's message instead.
    pub(super) fn expect(&mut self, kind: TokenKind, error: DiagnosticKind) -> Option<()> {
        if self.eat(kind) {
            return Some(());
        }
        if self.raw() == TokenKind::Illegal {
            return self.unexpected();
        }
        self.error(error, None)
    }

    pub(super) fn enter_recursion(&mut self) -> Option<()> {
        if self.depth >= self.recursion_limit {
            return self.error(DiagnosticKind::RecursionLimitExceeded, None);
        }
        self.depth += 1;
        Some(())
    }

    pub(super) fn exit_recursion(&mut self) {
        self.ensure_depth();
        self.depth -= 1;
    }
}
