//! Typed syntax of checked packages.
//!
//! The host hands over packages with their scopes, the type of every
//! checked expression and the import graph. Rules walk this model through
//! [`visitor::Visitor`] and never re-check types themselves.

pub mod builder;
pub mod graph;
pub mod hir_def;
pub mod program;
pub mod visitor;

pub use builder::{BuildError, FileBuilder, FuncBuilder, ProgramBuilder};
pub use graph::{DependencyClosure, PackageGraph};
pub use program::Program;
