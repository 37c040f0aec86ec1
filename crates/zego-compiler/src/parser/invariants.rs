//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use crate::lexer::TokenKind;

impl Parser<'_> {
    #[inline]
    pub(super) fn ensure_in_bounds(&self) {
        assert!(
            self.pos < self.tokens.len(),
            "broken parser invariant: cursor {} past the last token ({} tokens)",
            self.pos,
            self.tokens.len()
        );
    }

    #[inline]
    pub(super) fn ensure_not_terminal(&self) {
        let kind = self.raw();
        assert!(
            !matches!(kind, TokenKind::Eof | TokenKind::Illegal),
            "broken parser invariant: bump over terminal {kind:?} token (upstream caller's responsibility)"
        );
    }

    #[inline]
    pub(super) fn ensure_depth(&self) {
        assert!(
            self.depth > 0,
            "broken parser invariant: exit_recursion without matching enter_recursion"
        );
    }
}
