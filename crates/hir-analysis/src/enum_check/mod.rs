//! Exhaustiveness of switches over enum-like types.
//!
//! An expression switch whose discriminant has an enum-like named type must
//! either name every constant of that type in its case labels or carry a
//! `default` clause. Switches that do neither are reported with the missing
//! constants in declaration order.

pub mod coverage;
pub mod diagnostics;
pub mod registry;
pub mod resolve;

use common::{config::EnumSwitchConfig, diagnostics::Span};
use hir::{
    hir_def::{SourceFile, StmtId, SwitchStmt},
    visitor::prelude::*,
    Program,
};

pub use self::{
    coverage::{CoverageChecker, CoverageResult},
    diagnostics::{DiagnosticEmitter, EnumSwitchDiag},
    registry::{EnumConstant, EnumRegistry},
    resolve::TypeResolver,
};
use crate::{analysis_pass::FileAnalysisPass, diagnostics::DiagnosticVoucher};

/// Checks every expression switch of a file against the enum registry of the
/// file's dependency closure.
pub struct ExhaustiveSwitchPass<'a> {
    program: &'a Program,
    registry: &'a EnumRegistry,
    config: &'a EnumSwitchConfig,
}

impl<'a> ExhaustiveSwitchPass<'a> {
    pub fn new(
        program: &'a Program,
        registry: &'a EnumRegistry,
        config: &'a EnumSwitchConfig,
    ) -> Self {
        Self {
            program,
            registry,
            config,
        }
    }
}

impl FileAnalysisPass for ExhaustiveSwitchPass<'_> {
    fn run_on_file(&mut self, file: &SourceFile) -> Vec<Box<dyn DiagnosticVoucher>> {
        check_file(self.program, self.registry, self.config, file)
            .into_iter()
            .map(|diag| Box::new(diag) as _)
            .collect()
    }
}

/// Diagnostics of `file` in traversal order, which is source order.
pub fn check_file(
    program: &Program,
    registry: &EnumRegistry,
    config: &EnumSwitchConfig,
    file: &SourceFile,
) -> Vec<EnumSwitchDiag> {
    let mut collector = SwitchCollector {
        program,
        registry,
        config,
        emitter: DiagnosticEmitter::new(config.severity),
    };
    collector.visit_file(file);
    collector.emitter.finish()
}

struct SwitchCollector<'a> {
    program: &'a Program,
    registry: &'a EnumRegistry,
    config: &'a EnumSwitchConfig,
    emitter: DiagnosticEmitter,
}

impl SwitchCollector<'_> {
    fn check_switch(&mut self, ctxt: &VisitorCtxt<'_>, stmt: StmtId, switch: &SwitchStmt) {
        let Some(tag) = switch.tag else {
            tracing::trace!("switch without discriminant");
            return;
        };

        let resolver = TypeResolver::new(&self.program.types, ctxt.types());
        let Some(enum_ty) = resolver.resolve(tag) else {
            return;
        };

        let Some(constants) = self.registry.constants_of(enum_ty) else {
            tracing::trace!(ty = %enum_ty.qualified(), "discriminant type is not enum-like");
            return;
        };

        let checker =
            CoverageChecker::new(self.config, &self.program.types, ctxt.body(), ctxt.types());
        if let Some(result) = checker.check(switch, enum_ty, constants) {
            let span = Span::new(ctxt.file.file, ctxt.body().stmt_span(stmt));
            self.emitter.emit(span, enum_ty, result.missing());
        }
    }
}

impl<'a> Visitor<'a> for SwitchCollector<'_> {
    fn visit_switch(&mut self, ctxt: &VisitorCtxt<'a>, stmt: StmtId, switch: &'a SwitchStmt) {
        self.check_switch(ctxt, stmt, switch);
        // Switches nested in case bodies are checked on their own.
        walk_switch(self, ctxt, switch);
    }
}
