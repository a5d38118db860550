use std::fmt;

use cranelift_entity::{entity_impl, PrimaryMap};
use num_bigint::BigInt;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{PackagePath, PrimTy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TyId(u32);
entity_impl!(TyId);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TyData {
    Prim(PrimTy),
    Named(NamedType),
    Pointer(TyId),
    Slice(TyId),
    Interface,
    Signature { params: Vec<TyId>, results: Vec<TyId> },
    /// A type that failed to check in the host.
    Invalid,
}

/// A declared (non-alias) type, identified by its package and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedType {
    pub package: PackagePath,
    pub name: SmolStr,
}

impl NamedType {
    pub fn new(package: PackagePath, name: impl Into<SmolStr>) -> Self {
        Self {
            package,
            name: name.into(),
        }
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Interner of all types appearing in a program. Structurally equal types
/// share one id.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    tys: PrimaryMap<TyId, TyData>,
    interned: FxHashMap<TyData, TyId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, data: TyData) -> TyId {
        if let Some(&ty) = self.interned.get(&data) {
            return ty;
        }
        let ty = self.tys.push(data.clone());
        self.interned.insert(data, ty);
        ty
    }

    pub fn prim(&mut self, prim: PrimTy) -> TyId {
        self.intern(TyData::Prim(prim))
    }

    pub fn data(&self, ty: TyId) -> &TyData {
        &self.tys[ty]
    }

    pub fn as_named(&self, ty: TyId) -> Option<&NamedType> {
        match self.data(ty) {
            TyData::Named(named) => Some(named),
            _ => None,
        }
    }

    pub fn as_prim(&self, ty: TyId) -> Option<PrimTy> {
        match self.data(ty) {
            TyData::Prim(prim) => Some(*prim),
            _ => None,
        }
    }

    /// Results of a signature type, `None` for every other type.
    pub fn results(&self, ty: TyId) -> Option<&[TyId]> {
        match self.data(ty) {
            TyData::Signature { results, .. } => Some(results),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tys.is_empty()
    }

    pub fn display(&self, ty: TyId) -> String {
        match self.data(ty) {
            TyData::Prim(prim) => prim.name().to_string(),
            TyData::Named(named) => named.name.to_string(),
            TyData::Pointer(elem) => format!("*{}", self.display(*elem)),
            TyData::Slice(elem) => format!("[]{}", self.display(*elem)),
            TyData::Interface => "interface{}".to_string(),
            TyData::Signature { params, results } => {
                let params: Vec<_> = params.iter().map(|ty| self.display(*ty)).collect();
                let results: Vec<_> = results.iter().map(|ty| self.display(*ty)).collect();
                match results.len() {
                    0 => format!("func({})", params.join(", ")),
                    1 => format!("func({}) {}", params.join(", "), results[0]),
                    _ => format!("func({}) ({})", params.join(", "), results.join(", ")),
                }
            }
            TyData::Invalid => "invalid type".to_string(),
        }
    }
}

/// Compile-time value of a constant expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::From)]
pub enum ConstValue {
    Int(BigInt),
    Bool(bool),
    Str(SmolStr),
}

impl ConstValue {
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            ConstValue::Int(value) => Some(value),
            _ => None,
        }
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        ConstValue::Int(value.into())
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(value) => write!(f, "{value}"),
            ConstValue::Bool(value) => write!(f, "{value}"),
            ConstValue::Str(value) => write!(f, "{value:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir_def::IntTy;

    #[test]
    fn interning_is_structural() {
        let mut table = TypeTable::new();
        let kind = NamedType::new("color".into(), "Kind");
        let a = table.intern(TyData::Named(kind.clone()));
        let b = table.intern(TyData::Named(kind));
        let int = table.prim(PrimTy::Int(IntTy::Int));
        assert_eq!(a, b);
        assert_ne!(a, int);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn display_types() {
        let mut table = TypeTable::new();
        let kind = table.intern(TyData::Named(NamedType::new("color".into(), "Kind")));
        let int = table.prim(PrimTy::Int(IntTy::Int));
        let ptr = table.intern(TyData::Pointer(kind));
        let sig = table.intern(TyData::Signature {
            params: vec![int],
            results: vec![kind],
        });
        assert_eq!(table.display(ptr), "*Kind");
        assert_eq!(table.display(sig), "func(int) Kind");
        assert_eq!(table.results(sig), Some(&[kind][..]));
    }
}
