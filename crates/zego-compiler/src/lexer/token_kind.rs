//! Token kinds for policy source.
//!
//! Logos is derived directly on `TokenKind`. Kinds without a `#[token]` or
//! `#[regex]` attribute (`Eof`, `Illegal`) are only ever produced by the
//! driving loop in [`lex`](super::lex).

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace = 0,

    /// Line break plus any whitespace around and after it
    #[regex(r"[ \t]*[\r\n][\r\n \t]*")]
    Eol,

    #[regex(r"#[^\r\n]*", allow_greedy = true)]
    Comment,

    #[token("package")]
    KwPackage,

    #[token("import")]
    KwImport,

    #[token("else")]
    KwElse,

    #[token("null")]
    KwNull,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    /// Defined after the keywords so they take precedence.
    #[regex(r"[\p{Alphabetic}_][\p{Alphabetic}\p{N}_]*")]
    Identifier,

    /// Field access: `.name`
    #[regex(r"\.[\p{Alphabetic}_][\p{Alphabetic}\p{N}_]*")]
    Field,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]*)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]*)?")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?([pP][+-]?[0-9_]*)?")]
    #[regex(r"0[oO][0-7_]*(\.[0-7_]*)?")]
    #[regex(r"0[bB][01_]*(\.[01_]*)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    StringLiteral,

    /// Quoted string cut short by a line break or end of input
    #[regex(r#""([^"\\\n]|\\[^\n])*\\?"#)]
    UnterminatedString,

    #[regex(r"`[^`]*`")]
    RawString,

    #[regex(r"`[^`]*")]
    UnterminatedRawString,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    /// Lone colon; only valid as part of `:=`
    #[token(":")]
    Colon,

    #[token(":=")]
    Declare,

    #[token("=")]
    Assign,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("==")]
    EqEq,

    #[token("!=")]
    NotEq,

    /// Lone bang; only valid as part of `!=`
    #[token("!")]
    Bang,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    /// Dot not followed by a field name or digits
    #[token(".")]
    Dot,

    Eof,

    /// Lexical error; the token text is the error message
    Illegal,
}

use TokenKind::*;

impl TokenKind {
    /// Whitespace, line breaks and comments carry no grammatical meaning.
    #[inline]
    pub fn is_trivia(self) -> bool {
        token_sets::TRIVIA.contains(self)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        token_sets::KEYWORDS.contains(self)
    }

    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Whitespace => "whitespace",
            Eol => "eol",
            Comment => "comment",
            KwPackage => "package",
            KwImport => "import",
            KwElse => "else",
            KwNull => "null",
            KwTrue => "true",
            KwFalse => "false",
            Identifier => "identifier",
            Field => "field",
            Number => "number",
            StringLiteral | UnterminatedString => "string",
            RawString | UnterminatedRawString => "raw string",
            ParenOpen => "(",
            ParenClose => ")",
            BracketOpen => "[",
            BracketClose => "]",
            BraceOpen => "{",
            BraceClose => "}",
            Comma => ",",
            Colon => ":",
            Declare => ":=",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Ampersand => "&",
            Pipe => "|",
            EqEq => "==",
            NotEq => "!=",
            Bang => "!",
            Lt => "<",
            Gt => ">",
            LtEq => "<=",
            GtEq => ">=",
            Dot => ".",
            Eof => "eof",
            Illegal => "illegal",
        }
    }

    /// `name()` with punctuation wrapped in backticks.
    pub fn describe(self) -> String {
        let name = self.name();
        if name.starts_with(|c: char| c.is_ascii_punctuation()) {
            format!("`{name}`")
        } else {
            name.to_owned()
        }
    }

    /// Opening counterpart of a closing bracket.
    pub fn opening(self) -> Option<TokenKind> {
        match self {
            ParenClose => Some(ParenOpen),
            BracketClose => Some(BracketOpen),
            BraceClose => Some(BraceOpen),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of `TokenKind`s implemented as a 64-bit bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u8;
            assert!(kind < 64, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let kind = kind as u8;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

/// Pre-defined token sets used by the lexer and parser.
pub mod token_sets {
    use super::*;

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Eol, Comment]);

    pub const KEYWORDS: TokenSet =
        TokenSet::new(&[KwPackage, KwImport, KwElse, KwNull, KwTrue, KwFalse]);

    /// Tokens after which the terminator check runs.
    pub const WORDS: TokenSet = KEYWORDS.union(TokenSet::new(&[Identifier, Field]));

    pub const OPEN_BRACKETS: TokenSet = TokenSet::new(&[ParenOpen, BracketOpen, BraceOpen]);

    pub const CLOSE_BRACKETS: TokenSet = TokenSet::new(&[ParenClose, BracketClose, BraceClose]);

    /// Continuations of a reference when directly adjacent to it.
    pub const REF_SUFFIX: TokenSet = TokenSet::new(&[Field, ParenOpen, BracketOpen]);
}
