//! Diagnostics and the severity setting that decides their category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Configured severity for path diagnostics.
///
/// `Off` does not suppress anything: diagnostics are still produced, at the
/// advisory [`DiagnosticCategory::Message`] category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warn,
    Off,
}

impl Severity {
    /// The diagnostic category this severity maps to.
    pub const fn category(self) -> DiagnosticCategory {
        match self {
            Severity::Error => DiagnosticCategory::Error,
            Severity::Warn => DiagnosticCategory::Warning,
            Severity::Off => DiagnosticCategory::Message,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Off => "off",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected: error, warn, off)")]
pub struct SeverityParseError(pub String);

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warn" => Ok(Severity::Warn),
            "off" => Ok(Severity::Off),
            other => Err(SeverityParseError(other.to_string())),
        }
    }
}

/// Category of a reported diagnostic.
///
/// Discriminants follow the numbering language-service hosts use on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// Byte offset and length into a source file's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub const fn end(&self) -> usize {
        self.start + self.length
    }
}

impl From<std::ops::Range<usize>> for TextSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            length: range.end.saturating_sub(range.start),
        }
    }
}

/// 1-based line and column of a position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// A single finding reported against a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message: String,
    /// Name of the source file the finding belongs to, if any.
    pub file_name: Option<String>,
    /// Location of the offending text, if any.
    pub span: Option<TextSpan>,
}

impl Diagnostic {
    /// Line and column of the span start within `text`.
    ///
    /// Columns count characters, not bytes. Returns `None` for diagnostics
    /// without a span or with a span past the end of `text`.
    pub fn line_col(&self, text: &str) -> Option<LineCol> {
        let start = self.span?.start;
        let before = text.get(..start)?;
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Some(LineCol { line, column })
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file_name {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "@{}+{}", span.start, span.length)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{}[{}]: {}", self.category, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn diag(start: usize) -> Diagnostic {
        Diagnostic {
            category: DiagnosticCategory::Error,
            code: 9999,
            message: "boom".into(),
            file_name: Some("a.ts".into()),
            span: Some(TextSpan::new(start, 3)),
        }
    }

    #[rstest]
    #[case(Severity::Error, DiagnosticCategory::Error)]
    #[case(Severity::Warn, DiagnosticCategory::Warning)]
    #[case(Severity::Off, DiagnosticCategory::Message)]
    fn severity_maps_to_category(#[case] severity: Severity, #[case] expected: DiagnosticCategory) {
        assert_eq!(severity.category(), expected);
    }

    #[rstest]
    #[case("error", Severity::Error)]
    #[case("warn", Severity::Warn)]
    #[case("off", Severity::Off)]
    fn severity_from_str(#[case] input: &str, #[case] expected: Severity) {
        assert_eq!(input.parse::<Severity>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn severity_rejects_unknown() {
        let err = "warning".parse::<Severity>().unwrap_err();
        assert!(err.to_string().contains("warning"));
    }

    #[test]
    fn severity_defaults_to_error() {
        assert_eq!(Severity::default(), Severity::Error);
    }

    #[test]
    fn severity_serde_lowercase() {
        let s: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(s, Severity::Warn);
        assert_eq!(serde_json::to_string(&Severity::Off).unwrap(), "\"off\"");
    }

    #[test]
    fn category_discriminants() {
        assert_eq!(DiagnosticCategory::Warning as u8, 0);
        assert_eq!(DiagnosticCategory::Error as u8, 1);
        assert_eq!(DiagnosticCategory::Message as u8, 3);
    }

    #[test]
    fn line_col_first_line() {
        let text = "const a = \"x\";";
        assert_eq!(diag(10).line_col(text), Some(LineCol { line: 1, column: 11 }));
    }

    #[test]
    fn line_col_later_line() {
        let text = "// header\nconst a = \"x\";\n";
        let lc = diag(20).line_col(text).unwrap();
        assert_eq!(lc, LineCol { line: 2, column: 11 });
    }

    #[test]
    fn line_col_out_of_range() {
        assert_eq!(diag(100).line_col("short"), None);
    }

    #[test]
    fn span_from_range() {
        assert_eq!(TextSpan::from(4..9), TextSpan::new(4, 5));
        assert_eq!(TextSpan::new(4, 5).end(), 9);
    }

    #[test]
    fn display_includes_location() {
        assert_eq!(diag(2).to_string(), "a.ts@2+3: error[9999]: boom");
    }
}
