use rowan::TextRange;
use zego_core::Location;

/// Diagnostic kinds, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexer gave up; the detail is the lexer's own message
    IllegalToken,

    // Syntax errors, first one ends the parse
    UnexpectedToken,
    UnexpectedKeyword,
    ExpectedIdentifier,
    ExpectedDeclare,
    UnclosedParen,
    UnclosedBracket,
    ExpectedArgumentSeparator,
    EmptyBody,
    InvalidString,
    InvalidNumber,
    NumberTooBig,
    InvalidPackagePath,
    RecursionLimitExceeded,

    // Module assembly
    EmptyModule,
    ExpectedPackage,
    UnexpectedPackage,
    ExpectedOneStatement,

    // Compiler passes
    UndefinedReference,
    ShadowedRule,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ShadowedRule => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::IllegalToken => "illegal token",

            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedKeyword => "unexpected keyword",
            Self::ExpectedIdentifier => "expected identifier",
            Self::ExpectedDeclare => "rules must use `:=` operator",
            Self::UnclosedParen => "non-terminated expression",
            Self::UnclosedBracket => "expected ]",
            Self::ExpectedArgumentSeparator => "expected \",\" or \")\"",
            Self::EmptyBody => "found empty body",
            Self::InvalidString => "illegal string literal",
            Self::InvalidNumber => "expected number",
            Self::NumberTooBig => "number too big",
            Self::InvalidPackagePath => "invalid package path",
            Self::RecursionLimitExceeded => "recursion limit exceeded",

            Self::EmptyModule => "empty module",
            Self::ExpectedPackage => "package expected",
            Self::UnexpectedPackage => "unexpected package",
            Self::ExpectedOneStatement => "expected exactly one statement",

            Self::UndefinedReference => "undefined reference",
            Self::ShadowedRule => "local variable shadows a rule",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::IllegalToken => "{}".to_string(),
            Self::UnexpectedToken => "unexpected {} token".to_string(),
            Self::UnexpectedKeyword => "unexpected {} keyword".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::ShadowedRule => "local variable `{}` shadows a rule of the same package".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Byte range in the source named by `location`, underlined when rendered.
    pub(crate) range: TextRange,
    pub(crate) location: Option<Location>,
    pub(crate) message: String,
    pub(crate) severity: Severity,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            location: None,
            message: message.into(),
            severity: kind.default_severity(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub(crate) fn file(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.file.as_deref())
            .filter(|f| !f.is_empty())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// `file:line: message` when the file is known, `line:column: message` otherwise.
impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.location, self.file()) {
            (Some(loc), Some(file)) => write!(f, "{}:{}: {}", file, loc.line, self.message),
            (Some(loc), None) => write!(f, "{}:{}: {}", loc.line, loc.column, self.message),
            (None, _) => f.write_str(&self.message),
        }
    }
}
