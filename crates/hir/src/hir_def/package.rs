use common::{
    indexmap::{IndexMap, IndexSet},
    FileId,
};
use smol_str::SmolStr;

use super::{ConstValue, TyId};

/// Import path of a package, e.g. `example.com/app/color`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct PackagePath(SmolStr);

impl PackagePath {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last `/` separated segment, which is the default import name.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl From<&str> for PackagePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[derive(Debug, Clone)]
pub struct Package {
    pub path: PackagePath,
    pub name: SmolStr,
    pub imports: IndexSet<PackagePath>,
    pub scope: Scope,
    pub files: Vec<FileId>,
}

impl Package {
    pub fn new(path: PackagePath, name: impl Into<SmolStr>) -> Self {
        Self {
            path,
            name: name.into(),
            imports: IndexSet::default(),
            scope: Scope::default(),
            files: Vec::new(),
        }
    }
}

/// Package level declarations in source order.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    items: IndexMap<SmolStr, ScopeItem>,
}

impl Scope {
    /// Declares `name`. Returns `false` and leaves the scope untouched if the
    /// name is already taken.
    pub fn declare(&mut self, name: SmolStr, item: ScopeItem) -> bool {
        if self.items.contains_key(&name) {
            return false;
        }
        self.items.insert(name, item);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&ScopeItem> {
        self.items.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &ScopeItem)> {
        self.items.iter()
    }

    /// Constant declarations with their position among all declarations of
    /// the scope.
    pub fn consts(&self) -> impl Iterator<Item = (usize, &SmolStr, &ConstDecl)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(idx, (name, item))| match item {
                ScopeItem::Const(decl) => Some((idx, name, decl)),
                _ => None,
            })
    }

    pub fn type_decl(&self, name: &str) -> Option<&TypeNameDecl> {
        match self.lookup(name)? {
            ScopeItem::TypeName(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeItem {
    TypeName(TypeNameDecl),
    Const(ConstDecl),
    Var(VarDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameDecl {
    /// The denoted type. For a defined type this is the named type itself,
    /// for an alias it is the aliased type.
    pub ty: TyId,
    pub underlying: TyId,
    pub is_alias: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub ty: TyId,
    pub value: Option<ConstValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub ty: TyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// Interned signature type.
    pub ty: TyId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment() {
        assert_eq!(PackagePath::new("example.com/app/color").last_segment(), "color");
        assert_eq!(PackagePath::new("color").last_segment(), "color");
    }
}
