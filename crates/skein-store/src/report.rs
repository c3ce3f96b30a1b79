//! Issue reporting for storylet directory loads.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// Severity level for load issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The record could not be used and was skipped.
    Error,
    /// The record loaded, but something about it looks wrong.
    Warning,
}

/// A problem found while loading one file from the storylet directory.
#[derive(Debug, Clone)]
pub struct LoadIssue {
    /// File the issue was found in.
    pub path: PathBuf,
    /// How serious the issue is.
    pub severity: Severity,
    /// Byte range in the file contents, or `0..0` when unknown.
    pub span: Range<usize>,
    /// Human-readable description.
    pub message: String,
    /// The file contents, kept so the issue can be rendered in place.
    pub source: String,
}

impl LoadIssue {
    /// An issue that caused the record to be skipped.
    pub fn error(path: impl Into<PathBuf>, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            severity: Severity::Error,
            span,
            message: message.into(),
            source: String::new(),
        }
    }

    /// An issue worth flagging on a record that still loaded.
    pub fn warning(
        path: impl Into<PathBuf>,
        span: Range<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            severity: Severity::Warning,
            span,
            message: message.into(),
            source: String::new(),
        }
    }

    /// Attach the file contents for rendering.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Render the issue using ariadne for pretty terminal output.
    pub fn render(&self) -> String {
        let kind = match self.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let color = match self.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let filename = self.path.display().to_string();
        let filename = filename.as_str();
        let mut output = Vec::new();

        Report::build(kind, (filename, self.span.clone()))
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(&self.message)
                    .with_color(color),
            )
            .finish()
            .write((filename, Source::from(self.source.as_str())), &mut output)
            .ok();

        String::from_utf8(output).unwrap_or_default()
    }
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}: {}", self.path.display(), self.message)
    }
}

/// Translate a one-based line and column into a byte offset in `source`.
///
/// Used to anchor parser issues, which report positions as line and
/// column pairs rather than byte ranges.
pub fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_display_names_the_file() {
        let issue = LoadIssue::error("stories/broken.jsonc", 0..0, "invalid json: trailing data");
        assert_eq!(
            issue.to_string(),
            "error: stories/broken.jsonc: invalid json: trailing data"
        );
    }

    #[test]
    fn warning_display_uses_warning_prefix() {
        let issue = LoadIssue::warning("stories/odd.jsonc", 0..0, "never unlocked");
        assert_eq!(issue.to_string(), "warning: stories/odd.jsonc: never unlocked");
    }

    #[test]
    fn render_produces_output() {
        let source = "{\n    \"id\": \"broken\"\n";
        let issue = LoadIssue::error("stories/broken.jsonc", 20..21, "invalid json: EOF")
            .with_source(source);
        let output = issue.render();
        assert!(!output.is_empty());
        assert!(output.contains("invalid json: EOF"));
    }

    #[test]
    fn byte_offset_walks_lines() {
        let source = "first\nsecond\nthird\n";
        assert_eq!(byte_offset(source, 1, 1), 0);
        assert_eq!(byte_offset(source, 2, 1), 6);
        assert_eq!(byte_offset(source, 2, 4), 9);
        assert_eq!(byte_offset(source, 3, 1), 13);
    }

    #[test]
    fn byte_offset_clamps_to_source_length() {
        assert_eq!(byte_offset("short", 10, 10), 5);
        assert_eq!(byte_offset("", 1, 1), 0);
    }
}
