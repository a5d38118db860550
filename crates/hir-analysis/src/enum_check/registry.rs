use common::{config::IntegerKinds, indexmap::IndexMap};
use hir::{
    hir_def::{ConstValue, IntTy, NamedType, Package, PrimTy, TypeTable},
    DependencyClosure, Program,
};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub name: SmolStr,
    /// Position of the declaration in its package scope.
    pub index: usize,
    pub value: Option<ConstValue>,
}

/// Enum-like types of a dependency closure with their constants in
/// declaration order.
///
/// A type is enum-like if it is a declared, non-alias named type whose
/// underlying type is an accepted integer kind, and its own package declares
/// at least one constant of exactly that type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
    enums: FxHashMap<NamedType, Vec<EnumConstant>>,
}

impl EnumRegistry {
    pub fn build(program: &Program, closure: &DependencyClosure, kinds: IntegerKinds) -> Self {
        let mut enums = FxHashMap::default();
        for path in closure.iter() {
            let Some(package) = program.package(path) else {
                tracing::trace!(%path, "package of the closure is not loaded");
                continue;
            };
            collect_package(&program.types, package, kinds, &mut enums);
        }

        tracing::debug!(
            packages = closure.len(),
            enums = enums.len(),
            "built enum registry"
        );
        Self { enums }
    }

    /// Constants of `ty` in declaration order, or `None` if `ty` is not an
    /// enum-like type of the closure.
    pub fn constants_of(&self, ty: &NamedType) -> Option<&[EnumConstant]> {
        self.enums.get(ty).map(Vec::as_slice)
    }

    /// Names of the constants of `ty` in declaration order.
    pub fn constant_names(&self, ty: &NamedType) -> Option<Vec<SmolStr>> {
        self.constants_of(ty)
            .map(|constants| constants.iter().map(|c| c.name.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

fn collect_package(
    table: &TypeTable,
    package: &Package,
    kinds: IntegerKinds,
    enums: &mut FxHashMap<NamedType, Vec<EnumConstant>>,
) {
    let mut candidates: IndexMap<&NamedType, Vec<EnumConstant>> = IndexMap::default();
    for (index, name, decl) in package.scope.consts() {
        let Some(named) = table.as_named(decl.ty) else {
            continue;
        };
        // Constants of a type declared elsewhere never extend that type.
        if named.package != package.path {
            continue;
        }
        candidates.entry(named).or_default().push(EnumConstant {
            name: name.clone(),
            index,
            value: decl.value.clone(),
        });
    }

    for (named, constants) in candidates {
        if is_enum_like(table, package, named, kinds) {
            enums.insert(named.clone(), constants);
        } else {
            tracing::trace!(ty = %named.qualified(), "type has constants but is not enum-like");
        }
    }
}

fn is_enum_like(table: &TypeTable, package: &Package, ty: &NamedType, kinds: IntegerKinds) -> bool {
    let Some(decl) = package.scope.type_decl(&ty.name) else {
        return false;
    };
    if decl.is_alias || table.as_named(decl.ty) != Some(ty) {
        return false;
    }
    table
        .as_prim(decl.underlying)
        .is_some_and(|prim| accepts(kinds, prim))
}

fn accepts(kinds: IntegerKinds, prim: PrimTy) -> bool {
    match kinds {
        IntegerKinds::Int => prim == PrimTy::Int(IntTy::Int),
        IntegerKinds::Signed => prim.is_signed_integer(),
        IntegerKinds::Any => prim.is_integer() && !prim.is_untyped(),
    }
}
