//! Reserved words of the surface syntax.

/// Words the lexer never classifies as identifiers.
pub const KEYWORDS: [&str; 6] = ["package", "import", "else", "null", "true", "false"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Characters allowed after the first one in an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Whether `word` would lex back as a single non-keyword identifier.
///
/// Used when rendering references: segments passing this check render as
/// `.segment`, everything else goes between brackets.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_alphabetic()) && chars.all(is_identifier_char) && !is_keyword(word)
}
