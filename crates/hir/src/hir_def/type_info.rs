use rustc_hash::FxHashMap;

use super::{ConstValue, ExprId, PackagePath, TyId};

/// Type checking results of a function body, as handed over by the host.
/// Expressions the host failed to check have no entry.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    types: FxHashMap<ExprId, TypeAndValue>,
    package_refs: FxHashMap<ExprId, PackagePath>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAndValue {
    pub ty: TyId,
    /// Set for constant expressions.
    pub value: Option<ConstValue>,
}

impl TypeAndValue {
    pub fn new(ty: TyId, value: Option<ConstValue>) -> Self {
        Self { ty, value }
    }
}

impl TypeInfo {
    pub fn record(&mut self, expr: ExprId, tv: TypeAndValue) {
        self.types.insert(expr, tv);
    }

    /// Records that `expr` is an identifier naming an imported package.
    pub fn record_package_ref(&mut self, expr: ExprId, package: PackagePath) {
        self.package_refs.insert(expr, package);
    }

    pub fn type_and_value(&self, expr: ExprId) -> Option<&TypeAndValue> {
        self.types.get(&expr)
    }

    pub fn type_of(&self, expr: ExprId) -> Option<TyId> {
        self.types.get(&expr).map(|tv| tv.ty)
    }

    pub fn value_of(&self, expr: ExprId) -> Option<&ConstValue> {
        self.types.get(&expr)?.value.as_ref()
    }

    pub fn package_ref(&self, expr: ExprId) -> Option<&PackagePath> {
        self.package_refs.get(&expr)
    }
}
