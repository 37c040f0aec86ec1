//! Diagnostics: collected messages from lexing, parsing, assembly and compilation.
//!
//! Each message has a kind (which fixes its severity and message template),
//! a byte range for snippet rendering and an optional source [`Location`].

mod message;
mod printer;


use rowan::TextRange;
use zego_core::Location;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter().filter(|d| d.is_warning())
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn at(mut self, location: Option<Location>) -> Self {
        self.message.location = location;
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

/// Byte range covered by a location.
pub(crate) fn location_range(location: &Location) -> TextRange {
    TextRange::at(location.offset.into(), location.len.into())
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Aggregate of the error messages: `1 error occurred: ...` or
/// `N errors occurred:` followed by one message per line. Without errors the
/// warnings are listed the same way, and an empty collection renders nothing.
impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let errors: Vec<_> = self.errors().collect();
        if !errors.is_empty() {
            return write_aggregate(f, "error", &errors);
        }
        let warnings: Vec<_> = self.warnings().collect();
        if warnings.is_empty() {
            return Ok(());
        }
        write_aggregate(f, "warning", &warnings)
    }
}

fn write_aggregate(
    f: &mut std::fmt::Formatter<'_>,
    noun: &str,
    messages: &[&DiagnosticMessage],
) -> std::fmt::Result {
    match messages {
        [single] => write!(f, "1 {noun} occurred: {single}"),
        many => {
            write!(f, "{} {noun}s occurred:", many.len())?;
            for message in many {
                write!(f, "\n{message}")?;
            }
            Ok(())
        }
    }
}
