use std::{cmp::Ordering, fmt};

use crate::{FileId, TextRange};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompleteDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub sub_diagnostics: Vec<SubDiagnostic>,
    pub notes: Vec<String>,
    pub error_code: GlobalErrorCode,
}

impl CompleteDiagnostic {
    pub fn new(
        severity: Severity,
        message: String,
        sub_diagnostics: Vec<SubDiagnostic>,
        notes: Vec<String>,
        error_code: GlobalErrorCode,
    ) -> Self {
        Self {
            severity,
            message,
            sub_diagnostics,
            notes,
            error_code,
        }
    }

    /// Returns the span of the first primary sub diagnostic, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.sub_diagnostics
            .iter()
            .find(|sub| sub.is_primary())
            .and_then(|sub| sub.span)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalErrorCode {
    pub pass: DiagnosticPass,
    pub local_code: u16,
}

impl GlobalErrorCode {
    pub fn new(pass: DiagnosticPass, local_code: u16) -> Self {
        Self { pass, local_code }
    }
}

impl fmt::Display for GlobalErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{:03}",
            self.pass.prefix(),
            self.pass.code(),
            self.local_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubDiagnostic {
    pub style: LabelStyle,
    pub message: String,
    pub span: Option<Span>,
}

impl SubDiagnostic {
    pub fn new(style: LabelStyle, message: String, span: Option<Span>) -> Self {
        Self {
            style,
            message,
            span,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.style, LabelStyle::Primary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub file: FileId,
    pub range: TextRange,
}

impl Span {
    pub fn new(file: FileId, range: TextRange) -> Self {
        Self { file, range }
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then_with(|| self.range.start().cmp(&other.range.start()))
            .then_with(|| self.range.end().cmp(&other.range.end()))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pass a diagnostic originates from. The pass determines the prefix and
/// the thousands digit of the rendered error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticPass {
    ExhaustiveSwitch,
}

impl DiagnosticPass {
    pub fn code(&self) -> u16 {
        match self {
            Self::ExhaustiveSwitch => 1,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::ExhaustiveSwitch => "EC",
        }
    }
}
