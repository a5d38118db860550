use common::{FileId, TextRange};
use smol_str::SmolStr;

use super::{Body, PackagePath, TypeInfo};

/// A checked source file of a package.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file: FileId,
    pub package: PackagePath,
    pub imports: Vec<Import>,
    pub funcs: Vec<Func>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The name the package is referred to by in this file.
    pub alias: SmolStr,
    pub path: PackagePath,
}

#[derive(Debug, Clone)]
pub struct Func {
    pub name: SmolStr,
    /// Range of the function name.
    pub span: TextRange,
    pub body: Body,
    pub types: TypeInfo,
}
