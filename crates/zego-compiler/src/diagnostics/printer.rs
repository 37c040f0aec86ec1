//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};
use crate::SourceMap;

/// Builder for rendering diagnostics with various options.
///
/// A diagnostic is rendered as an annotated snippet when its source can be
/// found: by file name in the attached [`SourceMap`], or the fallback
/// `source` for diagnostics without a file. Everything else is printed as a
/// plain `severity: file:line: message` line.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: Option<&'s SourceMap>,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sources: None,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn sources(mut self, sources: &'s SourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.lookup(diag) {
                Some((source, path)) => {
                    let range = adjust_range(diag.range, source.len());
                    let mut snippet = Snippet::source(source).line_start(1).annotation(
                        AnnotationKind::Primary
                            .span(range)
                            .label(&diag.message),
                    );
                    if let Some(p) = path {
                        snippet = snippet.path(p);
                    }
                    let level = severity_to_level(diag.severity);
                    let report = vec![level.primary_title(&diag.message).element(snippet)];
                    write!(w, "{}", renderer.render(&report))?;
                }
                None => format_plain(w, diag)?,
            }
        }

        Ok(())
    }

    fn lookup(&self, diag: &DiagnosticMessage) -> Option<(&'s str, Option<&'s str>)> {
        match diag.file() {
            Some(file) => {
                let source = self.sources?.find(file)?;
                Some((source.content, Some(source.kind.display_name())))
            }
            None => self.source.map(|s| (s, self.path)),
        }
    }
}

fn format_plain(w: &mut impl Write, diag: &DiagnosticMessage) -> std::fmt::Result {
    write!(w, "{}: {}", diag.severity, diag)
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = usize::from(range.start()).min(limit);
    let end: usize = usize::from(range.end()).min(limit);

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
