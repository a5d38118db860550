use codespan_reporting::diagnostic as cs_diag;
use common::{
    diagnostics::{CompleteDiagnostic, LabelStyle, Severity},
    FileId,
};

pub trait ToCsDiag {
    fn to_cs(&self) -> cs_diag::Diagnostic<FileId>;
}

impl ToCsDiag for CompleteDiagnostic {
    fn to_cs(&self) -> cs_diag::Diagnostic<FileId> {
        let severity = convert_severity(self.severity);
        let code = Some(self.error_code.to_string());
        let message = self.message.clone();

        let labels = self
            .sub_diagnostics
            .iter()
            .filter_map(|sub_diag| {
                let span = sub_diag.span?;
                match sub_diag.style {
                    LabelStyle::Primary => {
                        cs_diag::Label::new(cs_diag::LabelStyle::Primary, span.file, span.range)
                    }
                    LabelStyle::Secondary => {
                        cs_diag::Label::new(cs_diag::LabelStyle::Secondary, span.file, span.range)
                    }
                }
                .with_message(sub_diag.message.clone())
                .into()
            })
            .collect();

        cs_diag::Diagnostic {
            severity,
            code,
            message,
            labels,
            notes: self.notes.clone(),
        }
    }
}

fn convert_severity(severity: Severity) -> cs_diag::Severity {
    match severity {
        Severity::Error => cs_diag::Severity::Error,
        Severity::Warning => cs_diag::Severity::Warning,
        Severity::Note => cs_diag::Severity::Note,
    }
}
