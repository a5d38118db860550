use common::diagnostics::{
    CompleteDiagnostic, DiagnosticPass, GlobalErrorCode, LabelStyle, Severity, Span,
    SubDiagnostic,
};
use hir::hir_def::NamedType;
use smol_str::SmolStr;

use crate::diagnostics::DiagnosticVoucher;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumSwitchDiag {
    UncoveredCases {
        /// The `switch` keyword.
        span: Span,
        enum_ty: NamedType,
        /// Never empty, in declaration order.
        missing: Vec<SmolStr>,
        severity: Severity,
    },
}

impl EnumSwitchDiag {
    pub fn local_code(&self) -> u16 {
        match self {
            Self::UncoveredCases { .. } => 0,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UncoveredCases { span, .. } => *span,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::UncoveredCases { severity, .. } => *severity,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::UncoveredCases {
                enum_ty, missing, ..
            } => {
                let mut message = format!("uncovered cases for {enum_ty} enum switch");
                for name in missing {
                    message.push_str("\n\t- ");
                    message.push_str(name);
                }
                message
            }
        }
    }

    fn sub_diags(&self) -> Vec<SubDiagnostic> {
        match self {
            Self::UncoveredCases {
                span,
                enum_ty,
                missing,
                ..
            } => {
                let count = missing.len();
                let label = if count == 1 {
                    format!("`{enum_ty}` switch misses 1 constant")
                } else {
                    format!("`{enum_ty}` switch misses {count} constants")
                };
                vec![SubDiagnostic::new(LabelStyle::Primary, label, Some(*span))]
            }
        }
    }

    fn notes(&self) -> Vec<String> {
        match self {
            Self::UncoveredCases { .. } => {
                vec!["add the missing constants or a `default` clause".to_string()]
            }
        }
    }
}

impl DiagnosticVoucher for EnumSwitchDiag {
    fn error_code(&self) -> GlobalErrorCode {
        GlobalErrorCode::new(DiagnosticPass::ExhaustiveSwitch, self.local_code())
    }

    fn to_complete(&self) -> CompleteDiagnostic {
        CompleteDiagnostic::new(
            self.severity(),
            self.message(),
            self.sub_diags(),
            self.notes(),
            self.error_code(),
        )
    }
}

/// Collects the diagnostics of one file.
#[derive(Debug)]
pub struct DiagnosticEmitter {
    severity: Severity,
    diags: Vec<EnumSwitchDiag>,
}

impl DiagnosticEmitter {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            diags: Vec::new(),
        }
    }

    /// Records an uncovered switch. Nothing is recorded if `missing` is
    /// empty.
    pub fn emit(&mut self, span: Span, enum_ty: &NamedType, missing: Vec<SmolStr>) {
        if missing.is_empty() {
            return;
        }
        self.diags.push(EnumSwitchDiag::UncoveredCases {
            span,
            enum_ty: enum_ty.clone(),
            missing,
            severity: self.severity,
        });
    }

    pub fn finish(self) -> Vec<EnumSwitchDiag> {
        self.diags
    }
}

#[cfg(test)]
mod tests {
    use common::{FileStore, InputFile, TextRange};
    use hir::hir_def::PackagePath;

    use super::*;

    fn span() -> Span {
        let file = FileStore::new().add(InputFile::new("a.go", "package a\n"));
        Span::new(file, TextRange::new(0.into(), 7.into()))
    }

    #[test]
    fn message_lists_missing_constants() {
        let mut emitter = DiagnosticEmitter::new(Severity::Warning);
        let ty = NamedType::new(PackagePath::new("adhoc"), "myType");
        emitter.emit(span(), &ty, vec!["my1".into(), "my2".into()]);
        emitter.emit(span(), &ty, vec![]);

        let diags = emitter.finish();
        assert_eq!(diags.len(), 1);

        let complete = diags[0].to_complete();
        assert_eq!(
            complete.message,
            "uncovered cases for myType enum switch\n\t- my1\n\t- my2"
        );
        assert_eq!(complete.severity, Severity::Warning);
        assert_eq!(complete.error_code.to_string(), "EC1000");
        assert_eq!(complete.primary_span(), Some(span()));
    }
}
