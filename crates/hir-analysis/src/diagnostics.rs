//! Analysis passes report compact, pass specific diagnostic values. All of
//! them implement [`DiagnosticVoucher`], which defines the conversion into a
//! [`CompleteDiagnostic`] once the host surfaces them.

use common::diagnostics::{CompleteDiagnostic, GlobalErrorCode};

pub trait DiagnosticVoucher: Send {
    fn error_code(&self) -> GlobalErrorCode;

    /// Makes a [`CompleteDiagnostic`].
    fn to_complete(&self) -> CompleteDiagnostic;
}

impl DiagnosticVoucher for CompleteDiagnostic {
    fn error_code(&self) -> GlobalErrorCode {
        self.error_code.clone()
    }

    fn to_complete(&self) -> CompleteDiagnostic {
        self.clone()
    }
}

impl DiagnosticVoucher for Box<dyn DiagnosticVoucher> {
    fn error_code(&self) -> GlobalErrorCode {
        self.as_ref().error_code()
    }

    fn to_complete(&self) -> CompleteDiagnostic {
        self.as_ref().to_complete()
    }
}
