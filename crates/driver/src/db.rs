use std::sync::Arc;

use codespan_reporting::term::{
    self,
    termcolor::{Buffer, BufferWriter, ColorChoice},
};
use common::{
    config::{EnumSwitchConfig, LintConfig},
    diagnostics::CompleteDiagnostic,
    FileId, FileStore,
};
use hir::{
    hir_def::{PackagePath, SourceFile},
    DependencyClosure, Program,
};
use hir_analysis::{
    analysis_pass::AnalysisPassManager,
    diagnostics::DiagnosticVoucher,
    enum_check::{EnumRegistry, ExhaustiveSwitchPass},
};
use rustc_hash::FxHashMap;

use crate::diagnostics::ToCsDiag;

/// Owns a checked program and runs the lint passes over it.
///
/// Enum registries are built lazily, once per dependency closure, and shared
/// by every file whose package has that closure.
pub struct DriverDataBase {
    program: Program,
    config: LintConfig,
    registries: FxHashMap<DependencyClosure, Arc<EnumRegistry>>,
}

impl DriverDataBase {
    pub fn new(program: Program, config: LintConfig) -> Self {
        if let Some(diags) = config.formatted_diagnostics() {
            tracing::warn!("invalid entries in the lint configuration:\n{diags}");
        }

        Self {
            program,
            config,
            registries: FxHashMap::default(),
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    pub fn files(&self) -> &FileStore {
        &self.program.files
    }

    /// Number of registries built so far.
    pub fn cached_registries(&self) -> usize {
        self.registries.len()
    }

    /// The enum registry of the dependency closure of `package`.
    pub fn registry_for(&mut self, package: &PackagePath) -> Arc<EnumRegistry> {
        let closure = self.program.dependency_closure(package);
        let program = &self.program;
        let kinds = self.config.enum_switch.integer_kinds;

        self.registries
            .entry(closure)
            .or_insert_with_key(|closure| {
                tracing::debug!(%package, packages = closure.len(), "building enum registry");
                Arc::new(EnumRegistry::build(program, closure, kinds))
            })
            .clone()
    }

    pub fn run_on_file(&mut self, file: FileId) -> DiagnosticsCollection {
        let Some(package) = self
            .program
            .source_file(file)
            .map(|source| source.package.clone())
        else {
            tracing::warn!(?file, "file is not part of the program");
            return DiagnosticsCollection::default();
        };

        let registry = self.registry_for(&package);
        run_passes(
            &self.program,
            &registry,
            &self.config.enum_switch,
            self.program.source_file(file),
        )
    }

    pub fn run_on_package(&mut self, package: &PackagePath) -> DiagnosticsCollection {
        if self.program.package(package).is_none() {
            tracing::warn!(%package, "package is not part of the program");
            return DiagnosticsCollection::default();
        }

        let registry = self.registry_for(package);
        run_passes(
            &self.program,
            &registry,
            &self.config.enum_switch,
            self.program.source_files_of(package),
        )
    }

    /// Checks every file of every package.
    pub fn run_all(&mut self) -> DiagnosticsCollection {
        let packages: Vec<_> = self.program.packages.keys().cloned().collect();

        let mut diags = DiagnosticsCollection::default();
        for package in &packages {
            diags.extend(self.run_on_package(package));
        }
        tracing::info!(
            packages = packages.len(),
            diagnostics = diags.len(),
            "checked program"
        );
        diags
    }
}

fn run_passes<'a>(
    program: &'a Program,
    registry: &'a EnumRegistry,
    config: &'a EnumSwitchConfig,
    files: impl IntoIterator<Item = &'a SourceFile>,
) -> DiagnosticsCollection {
    let mut pass_manager = initialize_analysis_pass(program, registry, config);
    let diags = pass_manager
        .run_on_files(files)
        .iter()
        .map(|diag| diag.to_complete())
        .collect();
    DiagnosticsCollection::new(diags)
}

pub fn initialize_analysis_pass<'a>(
    program: &'a Program,
    registry: &'a EnumRegistry,
    config: &'a EnumSwitchConfig,
) -> AnalysisPassManager<'a> {
    let mut pass_manager = AnalysisPassManager::new();
    pass_manager.add_file_pass(Box::new(ExhaustiveSwitchPass::new(
        program, registry, config,
    )));
    pass_manager
}

/// Diagnostics ordered by file, then position, then error code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticsCollection(Vec<CompleteDiagnostic>);

impl DiagnosticsCollection {
    pub fn new(mut diags: Vec<CompleteDiagnostic>) -> Self {
        sort_diags(&mut diags);
        Self(diags)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompleteDiagnostic> {
        self.0.iter()
    }

    pub fn extend(&mut self, other: DiagnosticsCollection) {
        self.0.extend(other.0);
        sort_diags(&mut self.0);
    }

    pub fn into_vec(self) -> Vec<CompleteDiagnostic> {
        self.0
    }

    /// Writes the rendered diagnostics to stderr, colored when the terminal
    /// supports it.
    pub fn emit(&self, files: &FileStore) {
        let writer = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = writer.buffer();
        self.render(&mut buffer, files);

        if let Err(err) = writer.print(&buffer) {
            tracing::error!(%err, "failed to write diagnostics");
        }
    }

    /// Format the accumulated diagnostics to a string.
    pub fn format_diags(&self, files: &FileStore) -> String {
        let writer = BufferWriter::stderr(ColorChoice::Never);
        let mut buffer = writer.buffer();
        self.render(&mut buffer, files);

        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    fn render(&self, buffer: &mut Buffer, files: &FileStore) {
        let config = term::Config::default();
        for diag in &self.0 {
            if let Err(err) = term::emit(&mut *buffer, &config, files, &diag.to_cs()) {
                tracing::error!(%err, "failed to render diagnostic");
            }
        }
    }

    /// One `path:line:col: message (code)` entry per diagnostic, with
    /// 1-based line and column of the primary span.
    pub fn format_lint_lines(&self, files: &FileStore) -> Vec<String> {
        self.0
            .iter()
            .map(|diag| {
                let position = diag.primary_span().and_then(|span| {
                    let file = files.get(span.file)?;
                    let (line, col) = file.line_col(span.range.start());
                    Some(format!("{}:{line}:{col}", file.path))
                });
                match position {
                    Some(position) => {
                        format!("{position}: {} ({})", diag.message, diag.error_code)
                    }
                    None => format!("{} ({})", diag.message, diag.error_code),
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a DiagnosticsCollection {
    type Item = &'a CompleteDiagnostic;
    type IntoIter = std::slice::Iter<'a, CompleteDiagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn sort_diags(diags: &mut [CompleteDiagnostic]) {
    diags.sort_by(|lhs, rhs| {
        lhs.primary_span()
            .cmp(&rhs.primary_span())
            .then_with(|| lhs.error_code.cmp(&rhs.error_code))
    });
}
