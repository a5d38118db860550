use common::{indexmap::IndexMap, FileId, FileStore};

use crate::{
    graph::{DependencyClosure, PackageGraph},
    hir_def::{NamedType, Package, PackagePath, SourceFile, TypeNameDecl, TypeTable},
};

/// Everything the host hands over after type checking: packages with their
/// scopes, checked source files, the type interner and the import graph.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub files: FileStore,
    pub types: TypeTable,
    pub packages: IndexMap<PackagePath, Package>,
    pub source_files: IndexMap<FileId, SourceFile>,
    pub graph: PackageGraph,
}

impl Program {
    pub fn package(&self, path: &PackagePath) -> Option<&Package> {
        self.packages.get(path)
    }

    pub fn source_file(&self, file: FileId) -> Option<&SourceFile> {
        self.source_files.get(&file)
    }

    pub fn source_files_of<'a>(
        &'a self,
        package: &'a PackagePath,
    ) -> impl Iterator<Item = &'a SourceFile> + 'a {
        self.source_files
            .values()
            .filter(move |file| &file.package == package)
    }

    pub fn dependency_closure(&self, package: &PackagePath) -> DependencyClosure {
        self.graph.dependency_closure(package)
    }

    /// The declaration introducing `ty` in its package scope.
    pub fn type_decl(&self, ty: &NamedType) -> Option<&TypeNameDecl> {
        self.package(&ty.package)?.scope.type_decl(&ty.name)
    }
}
