use hir::hir_def::{ExprId, NamedType, TypeInfo, TypeTable};

/// Finds the named type a switch dispatches on, using the types the host
/// assigned to expressions.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    table: &'a TypeTable,
    types: &'a TypeInfo,
}

impl<'a> TypeResolver<'a> {
    pub fn new(table: &'a TypeTable, types: &'a TypeInfo) -> Self {
        Self { table, types }
    }

    /// Returns `None` when the expression was not typed or its type is not a
    /// declared named type, e.g. `int`, `*Kind` or an interface.
    pub fn resolve(&self, expr: ExprId) -> Option<&'a NamedType> {
        let Some(ty) = self.types.type_of(expr) else {
            tracing::trace!(?expr, "discriminant has no type information");
            return None;
        };

        let named = self.table.as_named(ty);
        if named.is_none() {
            tracing::trace!(ty = %self.table.display(ty), "discriminant is not a named type");
        }
        named
    }
}
