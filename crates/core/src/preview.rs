//! Preview rendering and clipboard output.
//!
//! The on-screen preview wraps highlighted lines in markup tokens. The clipboard always receives
//! plain text: the generated report's plain projection, or, when the user edited the preview
//! directly, that edited text with every markup token removed.

use crate::constants::{DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN};
use crate::error::{ReportError, ReportResult};
use crate::generator::Report;
use std::path::PathBuf;

/// Tokens placed around highlighted preview lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightMarkup {
    open: String,
    close: String,
}

impl Default for HighlightMarkup {
    fn default() -> Self {
        Self {
            open: DEFAULT_HIGHLIGHT_OPEN.to_string(),
            close: DEFAULT_HIGHLIGHT_CLOSE.to_string(),
        }
    }
}

impl HighlightMarkup {
    /// Creates markup from explicit tokens.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidInput` if a token is blank, contains a line break, or both
    /// tokens are identical.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> ReportResult<Self> {
        let open = open.into();
        let close = close.into();
        for token in [&open, &close] {
            if token.trim().is_empty() || token.contains(['\n', '\r']) {
                return Err(ReportError::InvalidInput(
                    "highlight tokens must be non-empty single-line strings".into(),
                ));
            }
        }
        if open == close {
            return Err(ReportError::InvalidInput(
                "highlight open and close tokens must differ".into(),
            ));
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Renders the report with highlighted lines wrapped in the markup tokens.
    pub fn render(&self, report: &Report) -> String {
        report
            .lines
            .iter()
            .map(|line| {
                if line.highlighted {
                    format!("{}{}{}", self.open, line.text, self.close)
                } else {
                    line.text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Removes every occurrence of the markup tokens from `text`.
    pub fn strip(&self, text: &str) -> String {
        text.replace(&self.open, "").replace(&self.close, "")
    }
}

/// Generated report as shown in the preview pane.
#[derive(Clone, Debug)]
pub struct Preview {
    report: Report,
    markup: HighlightMarkup,
    edited: Option<String>,
}

impl Preview {
    pub fn new(report: Report, markup: HighlightMarkup) -> Self {
        Self {
            report,
            markup,
            edited: None,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Text shown on screen, including highlight markup.
    pub fn display_text(&self) -> String {
        match &self.edited {
            Some(text) => text.clone(),
            None => self.markup.render(&self.report),
        }
    }

    /// Replaces the shown text with a manual edit. The edit may still contain markup.
    pub fn set_edited_text(&mut self, text: impl Into<String>) {
        self.edited = Some(text.into());
    }

    pub fn is_edited(&self) -> bool {
        self.edited.is_some()
    }

    /// Plain text to copy.
    pub fn clipboard_text(&self) -> String {
        match &self.edited {
            Some(text) => self.markup.strip(text),
            None => self.report.plain_text(),
        }
    }

    /// Writes the clipboard text to `clipboard`.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> ReportResult<()> {
        let text = self.clipboard_text();
        tracing::debug!(bytes = text.len(), "copying report");
        clipboard.write_text(&text)
    }
}

/// Destination of a copy action.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> ReportResult<()>;
}

/// Clipboard kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> ReportResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard backed by a file; each copy overwrites it.
#[derive(Clone, Debug)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> ReportResult<()> {
        std::fs::write(&self.path, text).map_err(ReportError::FileWrite)
    }
}
