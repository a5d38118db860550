#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimTy {
    Bool,
    Int(IntTy),
    Uint(UintTy),
    Float(FloatTy),
    String,
    /// The type of an untyped constant, e.g. the literal `1` before it is
    /// given a type by its context.
    Untyped(UntypedKind),
}

impl PrimTy {
    pub fn name(self) -> &'static str {
        match self {
            PrimTy::Bool => "bool",
            PrimTy::Int(ty) => ty.name(),
            PrimTy::Uint(ty) => ty.name(),
            PrimTy::Float(ty) => ty.name(),
            PrimTy::String => "string",
            PrimTy::Untyped(kind) => kind.name(),
        }
    }

    /// Resolves a predeclared type name, including the `byte` and `rune`
    /// aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let prim = match name {
            "bool" => PrimTy::Bool,
            "int" => PrimTy::Int(IntTy::Int),
            "int8" => PrimTy::Int(IntTy::I8),
            "int16" => PrimTy::Int(IntTy::I16),
            "int32" | "rune" => PrimTy::Int(IntTy::I32),
            "int64" => PrimTy::Int(IntTy::I64),
            "uint" => PrimTy::Uint(UintTy::Uint),
            "uint8" | "byte" => PrimTy::Uint(UintTy::U8),
            "uint16" => PrimTy::Uint(UintTy::U16),
            "uint32" => PrimTy::Uint(UintTy::U32),
            "uint64" => PrimTy::Uint(UintTy::U64),
            "uintptr" => PrimTy::Uint(UintTy::Uintptr),
            "float32" => PrimTy::Float(FloatTy::F32),
            "float64" => PrimTy::Float(FloatTy::F64),
            "string" => PrimTy::String,
            _ => return None,
        };
        Some(prim)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimTy::Int(_) | PrimTy::Uint(_) | PrimTy::Untyped(UntypedKind::Int)
        )
    }

    /// Typed signed integers only; untyped constants are never the
    /// underlying type of a declared type.
    pub fn is_signed_integer(self) -> bool {
        matches!(self, PrimTy::Int(_))
    }

    pub fn is_untyped(self) -> bool {
        matches!(self, PrimTy::Untyped(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntTy {
    Int,
    I8,
    I16,
    I32,
    I64,
}

impl IntTy {
    pub fn name(self) -> &'static str {
        match self {
            IntTy::Int => "int",
            IntTy::I8 => "int8",
            IntTy::I16 => "int16",
            IntTy::I32 => "int32",
            IntTy::I64 => "int64",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UintTy {
    Uint,
    U8,
    U16,
    U32,
    U64,
    Uintptr,
}

impl UintTy {
    pub fn name(self) -> &'static str {
        match self {
            UintTy::Uint => "uint",
            UintTy::U8 => "uint8",
            UintTy::U16 => "uint16",
            UintTy::U32 => "uint32",
            UintTy::U64 => "uint64",
            UintTy::Uintptr => "uintptr",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatTy {
    F32,
    F64,
}

impl FloatTy {
    pub fn name(self) -> &'static str {
        match self {
            FloatTy::F32 => "float32",
            FloatTy::F64 => "float64",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UntypedKind {
    Bool,
    Int,
    Float,
    String,
    Nil,
}

impl UntypedKind {
    pub fn name(self) -> &'static str {
        match self {
            UntypedKind::Bool => "untyped bool",
            UntypedKind::Int => "untyped int",
            UntypedKind::Float => "untyped float",
            UntypedKind::String => "untyped string",
            UntypedKind::Nil => "untyped nil",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predeclared_aliases() {
        assert_eq!(PrimTy::from_name("byte"), Some(PrimTy::Uint(UintTy::U8)));
        assert_eq!(PrimTy::from_name("rune"), Some(PrimTy::Int(IntTy::I32)));
        assert_eq!(PrimTy::from_name("myType"), None);
    }

    #[test]
    fn integer_predicates() {
        assert!(PrimTy::Int(IntTy::I16).is_signed_integer());
        assert!(!PrimTy::Uint(UintTy::U16).is_signed_integer());
        assert!(PrimTy::Uint(UintTy::U16).is_integer());
        assert!(!PrimTy::String.is_integer());
        assert!(!PrimTy::Untyped(UntypedKind::Int).is_signed_integer());
    }
}
