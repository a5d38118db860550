#![allow(dead_code)]

use common::{config::EnumSwitchConfig, FileId};
use enumck_hir_analysis::{
    diagnostics::DiagnosticVoucher,
    enum_check::{check_file, EnumRegistry, EnumSwitchDiag},
};
use hir::{
    hir_def::{CaseClause, StmtId},
    FuncBuilder, Program,
};

pub struct TestDb {
    pub program: Program,
    pub config: EnumSwitchConfig,
}

impl TestDb {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            config: EnumSwitchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EnumSwitchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn diags(&self, file: FileId) -> Vec<EnumSwitchDiag> {
        let source = self.program.source_file(file).expect("unknown file");
        let closure = self.program.dependency_closure(&source.package);
        let registry = EnumRegistry::build(&self.program, &closure, self.config.integer_kinds);
        check_file(&self.program, &registry, &self.config, source)
    }

    /// Missing constants of every reported switch, in report order.
    pub fn missing(&self, file: FileId) -> Vec<Vec<String>> {
        self.diags(file)
            .into_iter()
            .map(|diag| match diag {
                EnumSwitchDiag::UncoveredCases { missing, .. } => {
                    missing.into_iter().map(|name| name.to_string()).collect()
                }
            })
            .collect()
    }

    /// `path:line:col: message (code)` for every diagnostic.
    pub fn lint_lines(&self, file: FileId) -> Vec<String> {
        self.diags(file)
            .iter()
            .map(|diag| {
                let complete = diag.to_complete();
                let span = complete.primary_span().expect("diagnostic without span");
                let input = self.program.files.get(span.file).expect("unknown file");
                let (line, col) = input.line_col(span.range.start());
                format!(
                    "{}:{line}:{col}: {} ({})",
                    input.path, complete.message, complete.error_code
                )
            })
            .collect()
    }
}

pub enum Clause<'s> {
    Case(&'s [&'s str]),
    Default,
}

/// Builds `switch tag { ... }` whose labels are plain identifiers and whose
/// clause bodies are empty.
pub fn switch_on(f: &mut FuncBuilder<'_, '_>, tag: &str, clauses: &[Clause<'_>]) -> StmtId {
    let keyword = f.keyword("switch").unwrap();
    let tag = f.ident(tag).unwrap();

    let mut built: Vec<CaseClause> = Vec::new();
    for clause in clauses {
        let clause = match clause {
            Clause::Case(labels) => {
                let mut exprs = Vec::new();
                for label in labels.iter() {
                    exprs.push(f.ident(label).unwrap());
                }
                f.case(exprs, vec![]).unwrap()
            }
            Clause::Default => f.default_case(vec![]),
        };
        built.push(clause);
    }

    f.switch(keyword, None, Some(tag), built)
}
