use hir::hir_def::SourceFile;

use crate::diagnostics::DiagnosticVoucher;

/// All analysis passes that run analysis on source file granularity should
/// implement this trait.
pub trait FileAnalysisPass {
    fn run_on_file(&mut self, file: &SourceFile) -> Vec<Box<dyn DiagnosticVoucher>>;
}

#[derive(Default)]
pub struct AnalysisPassManager<'a> {
    file_passes: Vec<Box<dyn FileAnalysisPass + 'a>>,
}

impl<'a> AnalysisPassManager<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file_pass(&mut self, pass: Box<dyn FileAnalysisPass + 'a>) {
        self.file_passes.push(pass);
    }

    pub fn run_on_file(&mut self, file: &SourceFile) -> Vec<Box<dyn DiagnosticVoucher>> {
        let mut diags = vec![];
        for pass in self.file_passes.iter_mut() {
            diags.extend(pass.run_on_file(file));
        }
        diags
    }

    pub fn run_on_files<'f>(
        &mut self,
        files: impl IntoIterator<Item = &'f SourceFile>,
    ) -> Vec<Box<dyn DiagnosticVoucher>> {
        let mut diags = vec![];
        for file in files {
            diags.extend(self.run_on_file(file));
        }
        diags
    }
}
