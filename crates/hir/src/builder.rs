//! Construction of a [`Program`] from source text plus the declarations and
//! type facts a host type checker would provide.
//!
//! Nodes are built in source order. Every node that has a token of its own
//! is located in the file text by searching forward from the end of the
//! previously located token, so spans point at real source positions.

use std::fmt;

use common::{numeric::Literal, FileId, InputFile, TextRange, TextSize};
use num_bigint::BigInt;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::{
    hir_def::{
        ArithBinOp, BinOp, Body, CaseClause, CaseKind, ConstDecl, ConstValue, Expr, ExprId,
        FloatTy, Func, FuncDecl, Import, IntTy, LitKind, NamedType, Package, PackagePath, PrimTy,
        ScopeItem, SourceFile, Stmt, StmtId, SwitchStmt, TyData, TyId, TypeAndValue, TypeInfo,
        TypeNameDecl, TypeSwitchStmt, UnOp, UntypedKind, VarDecl,
    },
    program::Program,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    DuplicatePackage(PackagePath),
    UnknownPackage(PackagePath),
    DuplicateDeclaration { package: PackagePath, name: SmolStr },
    /// The token was not found after the current position of the file.
    NotInSource { needle: SmolStr, offset: usize },
    EmptyCase,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicatePackage(path) => write!(f, "package `{path}` is already defined"),
            BuildError::UnknownPackage(path) => write!(f, "unknown package `{path}`"),
            BuildError::DuplicateDeclaration { package, name } => {
                write!(f, "`{name}` is declared twice in package `{package}`")
            }
            BuildError::NotInSource { needle, offset } => {
                write!(f, "`{needle}` not found in source after offset {offset}")
            }
            BuildError::EmptyCase => write!(f, "case clause without labels"),
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&mut self, path: &str, name: &str) -> Result<PackagePath, BuildError> {
        let path = PackagePath::new(path);
        if self.program.packages.contains_key(&path) {
            return Err(BuildError::DuplicatePackage(path));
        }
        self.program.graph.add_package(path.clone());
        self.program
            .packages
            .insert(path.clone(), Package::new(path.clone(), name));
        Ok(path)
    }

    pub fn import(&mut self, from: &PackagePath, to: &PackagePath) -> Result<(), BuildError> {
        self.package_mut(to)?;
        self.package_mut(from)?.imports.insert(to.clone());
        self.program.graph.add_import(from, to);
        Ok(())
    }

    pub fn prim(&mut self, prim: PrimTy) -> TyId {
        self.program.types.prim(prim)
    }

    pub fn ty(&mut self, data: TyData) -> TyId {
        self.program.types.intern(data)
    }

    /// `type name underlying`
    pub fn named_type(
        &mut self,
        package: &PackagePath,
        name: &str,
        underlying: TyId,
    ) -> Result<TyId, BuildError> {
        let underlying = self.underlying(underlying);
        let ty = self
            .program
            .types
            .intern(TyData::Named(NamedType::new(package.clone(), name)));
        self.declare(
            package,
            name,
            ScopeItem::TypeName(TypeNameDecl {
                ty,
                underlying,
                is_alias: false,
            }),
        )?;
        Ok(ty)
    }

    /// `type name = target`
    pub fn alias_type(
        &mut self,
        package: &PackagePath,
        name: &str,
        target: TyId,
    ) -> Result<TyId, BuildError> {
        let underlying = self.underlying(target);
        self.declare(
            package,
            name,
            ScopeItem::TypeName(TypeNameDecl {
                ty: target,
                underlying,
                is_alias: true,
            }),
        )?;
        Ok(target)
    }

    pub fn constant(
        &mut self,
        package: &PackagePath,
        name: &str,
        ty: TyId,
        value: Option<ConstValue>,
    ) -> Result<(), BuildError> {
        self.declare(package, name, ScopeItem::Const(ConstDecl { ty, value }))
    }

    /// Declares `names` as constants of `ty` valued `0, 1, 2, ...`, the way a
    /// `const` block driven by `iota` does.
    pub fn iota_constants(
        &mut self,
        package: &PackagePath,
        ty: TyId,
        names: &[&str],
    ) -> Result<(), BuildError> {
        for (value, name) in names.iter().enumerate() {
            self.constant(package, name, ty, Some(BigInt::from(value).into()))?;
        }
        Ok(())
    }

    pub fn var(&mut self, package: &PackagePath, name: &str, ty: TyId) -> Result<(), BuildError> {
        self.declare(package, name, ScopeItem::Var(VarDecl { ty }))
    }

    pub fn func_decl(
        &mut self,
        package: &PackagePath,
        name: &str,
        params: Vec<TyId>,
        results: Vec<TyId>,
    ) -> Result<TyId, BuildError> {
        let ty = self
            .program
            .types
            .intern(TyData::Signature { params, results });
        self.declare(package, name, ScopeItem::Func(FuncDecl { ty }))?;
        Ok(ty)
    }

    pub fn file(
        &mut self,
        package: &PackagePath,
        path: &str,
        text: &str,
    ) -> Result<FileBuilder<'_>, BuildError> {
        self.package_mut(package)?;
        let file = self.program.files.add(InputFile::new(path, text));
        Ok(FileBuilder {
            builder: self,
            file,
            package: package.clone(),
            imports: Vec::new(),
            funcs: Vec::new(),
            cursor: 0,
        })
    }

    pub fn finish(self) -> Program {
        self.program
    }

    fn package_mut(&mut self, path: &PackagePath) -> Result<&mut Package, BuildError> {
        self.program
            .packages
            .get_mut(path)
            .ok_or_else(|| BuildError::UnknownPackage(path.clone()))
    }

    fn declare(
        &mut self,
        package: &PackagePath,
        name: &str,
        item: ScopeItem,
    ) -> Result<(), BuildError> {
        if self.package_mut(package)?.scope.declare(name.into(), item) {
            Ok(())
        } else {
            Err(BuildError::DuplicateDeclaration {
                package: package.clone(),
                name: name.into(),
            })
        }
    }

    fn underlying(&self, ty: TyId) -> TyId {
        match self
            .program
            .types
            .as_named(ty)
            .and_then(|named| self.program.type_decl(named))
        {
            Some(decl) => decl.underlying,
            None => ty,
        }
    }

    fn lookup(&self, package: &PackagePath, name: &str) -> Option<ScopeItem> {
        self.program.package(package)?.scope.lookup(name).cloned()
    }
}

pub struct FileBuilder<'b> {
    builder: &'b mut ProgramBuilder,
    file: FileId,
    package: PackagePath,
    imports: Vec<Import>,
    funcs: Vec<Func>,
    cursor: usize,
}

impl<'b> FileBuilder<'b> {
    pub fn file_id(&self) -> FileId {
        self.file
    }

    /// Imports `path` under its package name.
    pub fn import(&mut self, path: &PackagePath) -> Result<(), BuildError> {
        let name = self
            .builder
            .program
            .package(path)
            .map(|package| package.name.clone())
            .ok_or_else(|| BuildError::UnknownPackage(path.clone()))?;
        self.import_as(&name, path)
    }

    pub fn import_as(&mut self, alias: &str, path: &PackagePath) -> Result<(), BuildError> {
        self.builder.import(&self.package, path)?;
        self.imports.push(Import {
            alias: alias.into(),
            path: path.clone(),
        });
        Ok(())
    }

    pub fn func(&mut self, name: &str) -> Result<FuncBuilder<'_, 'b>, BuildError> {
        self.locate("func")?;
        let span = self.locate(name)?;
        Ok(FuncBuilder {
            file: self,
            name: name.into(),
            span,
            body: Body::new(),
            types: TypeInfo::default(),
            locals: FxHashMap::default(),
            type_exprs: FxHashSet::default(),
        })
    }

    pub fn finish(self) -> FileId {
        let FileBuilder {
            builder,
            file,
            package,
            imports,
            funcs,
            ..
        } = self;

        if let Some(package) = builder.program.packages.get_mut(&package) {
            package.files.push(file);
        }
        builder.program.source_files.insert(
            file,
            SourceFile {
                file,
                package,
                imports,
                funcs,
            },
        );
        file
    }

    fn locate(&mut self, needle: &str) -> Result<TextRange, BuildError> {
        let text = self
            .builder
            .program
            .files
            .get(self.file)
            .map_or("", |file| file.text.as_str());

        match find_token(text, self.cursor, needle) {
            Some(start) => {
                let end = start + needle.len();
                self.cursor = end;
                Ok(TextRange::new(
                    TextSize::from(start as u32),
                    TextSize::from(end as u32),
                ))
            }
            None => Err(BuildError::NotInSource {
                needle: needle.into(),
                offset: self.cursor,
            }),
        }
    }

    fn resolve_import(&self, alias: &str) -> Option<PackagePath> {
        self.imports
            .iter()
            .find(|import| import.alias == alias)
            .map(|import| import.path.clone())
    }
}

/// Builds one function body, recording type facts for every expression the
/// way a type checker would.
pub struct FuncBuilder<'f, 'b> {
    file: &'f mut FileBuilder<'b>,
    name: SmolStr,
    span: TextRange,
    body: Body,
    types: TypeInfo,
    locals: FxHashMap<SmolStr, TyId>,
    /// Expressions denoting a type rather than a value.
    type_exprs: FxHashSet<ExprId>,
}

impl FuncBuilder<'_, '_> {
    /// Locates the keyword, e.g. `switch`, and returns its range.
    pub fn keyword(&mut self, keyword: &str) -> Result<TextRange, BuildError> {
        self.file.locate(keyword)
    }

    pub fn param(&mut self, name: &str, ty: TyId) -> Result<(), BuildError> {
        self.file.locate(name)?;
        self.locals.insert(name.into(), ty);
        Ok(())
    }

    /// `var name ty`
    pub fn var(&mut self, name: &str, ty: TyId) -> Result<(), BuildError> {
        self.file.locate("var")?;
        self.param(name, ty)
    }

    pub fn ident(&mut self, name: &str) -> Result<ExprId, BuildError> {
        let range = self.file.locate(name)?;
        let expr = self.body.push_expr(Expr::Ident(name.into()), range);
        self.resolve_ident(expr, name);
        Ok(expr)
    }

    /// `base.member` where `base` is a plain identifier.
    pub fn selector(&mut self, base: &str, member: &str) -> Result<ExprId, BuildError> {
        let base = self.ident(base)?;
        self.select(base, member)
    }

    pub fn select(&mut self, base: ExprId, member: &str) -> Result<ExprId, BuildError> {
        let member_range = self.file.locate(member)?;
        let range = self.body.expr_span(base).cover(member_range);
        let expr = self
            .body
            .push_expr(Expr::Selector(base, member.into()), range);

        if let Some(package) = self.types.package_ref(base).cloned() {
            match self.file.builder.lookup(&package, member) {
                Some(item) => self.record_item(expr, &item),
                None => tracing::debug!(%package, member, "unresolved package member"),
            }
        }
        Ok(expr)
    }

    pub fn int_lit(&mut self, text: &str) -> Result<ExprId, BuildError> {
        let range = self.file.locate(text)?;
        let expr = self
            .body
            .push_expr(Expr::Lit(LitKind::Int(text.into())), range);
        let ty = self.prim(PrimTy::Untyped(UntypedKind::Int));
        let value = Literal::new(text).parse().map(ConstValue::Int);
        self.types.record(expr, TypeAndValue::new(ty, value));
        Ok(expr)
    }

    pub fn string_lit(&mut self, value: &str) -> Result<ExprId, BuildError> {
        let range = self.file.locate(&format!("\"{value}\""))?;
        let expr = self
            .body
            .push_expr(Expr::Lit(LitKind::String(value.into())), range);
        let ty = self.prim(PrimTy::Untyped(UntypedKind::String));
        self.types
            .record(expr, TypeAndValue::new(ty, Some(ConstValue::Str(value.into()))));
        Ok(expr)
    }

    /// A call or, if `callee` denotes a type, a conversion. Arguments must be
    /// built before the call so the closing parenthesis is the call's own.
    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>) -> Result<ExprId, BuildError> {
        let close = self.file.locate(")")?;
        let range = self.body.expr_span(callee).cover(close);
        let tv = self.call_type(callee, &args);
        let expr = self.body.push_expr(Expr::Call(callee, args), range);
        if let Some(tv) = tv {
            self.types.record(expr, tv);
        }
        Ok(expr)
    }

    /// `(inner)`, with `open` the range of the opening parenthesis.
    pub fn paren(&mut self, open: TextRange, inner: ExprId) -> Result<ExprId, BuildError> {
        let close = self.file.locate(")")?;
        let expr = self.body.push_expr(Expr::Paren(inner), open.cover(close));
        if let Some(tv) = self.types.type_and_value(inner).cloned() {
            self.types.record(expr, tv);
        }
        if self.type_exprs.contains(&inner) {
            self.type_exprs.insert(expr);
        }
        Ok(expr)
    }

    pub fn binary(&mut self, lhs: ExprId, op: BinOp, rhs: ExprId) -> ExprId {
        let range = self.body.expr_span(lhs).cover(self.body.expr_span(rhs));
        let tv = self.binary_type(lhs, op, rhs);
        let expr = self.body.push_expr(Expr::Binary(lhs, op, rhs), range);
        if let Some(tv) = tv {
            self.types.record(expr, tv);
        }
        expr
    }

    /// `op operand`, with `op_range` the range of the operator token.
    pub fn unary(&mut self, op_range: TextRange, op: UnOp, operand: ExprId) -> ExprId {
        let range = op_range.cover(self.body.expr_span(operand));
        let tv = self.types.type_and_value(operand).cloned().map(|tv| {
            let value = match (op, tv.value) {
                (UnOp::Plus, value) => value,
                (UnOp::Minus, Some(ConstValue::Int(value))) => Some(ConstValue::Int(-value)),
                (UnOp::Not, Some(ConstValue::Bool(value))) => Some(ConstValue::Bool(!value)),
                _ => None,
            };
            TypeAndValue::new(tv.ty, value)
        });
        let expr = self.body.push_expr(Expr::Unary(op, operand), range);
        if let Some(tv) = tv {
            self.types.record(expr, tv);
        }
        expr
    }

    /// `func() { ... }` whose body statements are already built.
    pub fn func_lit(&mut self, keyword: TextRange, stmts: Vec<StmtId>) -> ExprId {
        let range = self.span_from(keyword);
        let ty = self.file.builder.ty(TyData::Signature {
            params: Vec::new(),
            results: Vec::new(),
        });
        let expr = self.body.push_expr(Expr::FuncLit(stmts), range);
        self.types.record(expr, TypeAndValue::new(ty, None));
        expr
    }

    /// Identifier on the left of `:=`. It is typed once the defining
    /// statement is built with [`Self::define`].
    pub fn binding(&mut self, name: &str) -> Result<ExprId, BuildError> {
        let range = self.file.locate(name)?;
        Ok(self.body.push_expr(Expr::Ident(name.into()), range))
    }

    /// `lhs := rhs`
    pub fn define(&mut self, lhs: ExprId, rhs: ExprId) -> StmtId {
        if let (Expr::Ident(name), Some(ty)) = (self.body.expr(lhs).clone(), self.types.type_of(rhs))
        {
            let ty = self.default_type(ty);
            self.locals.insert(name, ty);
            self.types.record(lhs, TypeAndValue::new(ty, None));
        }
        let range = self.body.expr_span(lhs).cover(self.body.expr_span(rhs));
        self.body.push_stmt(
            Stmt::Assign {
                lhs: vec![lhs],
                rhs: vec![rhs],
                define: true,
            },
            range,
        )
    }

    /// `lhs = rhs`
    pub fn assign(&mut self, lhs: ExprId, rhs: ExprId) -> StmtId {
        let range = self.body.expr_span(lhs).cover(self.body.expr_span(rhs));
        self.body.push_stmt(
            Stmt::Assign {
                lhs: vec![lhs],
                rhs: vec![rhs],
                define: false,
            },
            range,
        )
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        let range = self.body.expr_span(expr);
        self.body.push_stmt(Stmt::Expr(expr), range)
    }

    pub fn block(&mut self, stmts: Vec<StmtId>) -> StmtId {
        let range = match (stmts.first(), stmts.last()) {
            (Some(first), Some(last)) => self
                .body
                .stmt_span(*first)
                .cover(self.body.stmt_span(*last)),
            _ => TextRange::empty(TextSize::from(self.file.cursor as u32)),
        };
        self.body.push_stmt(Stmt::Block(stmts), range)
    }

    pub fn return_stmt(&mut self, keyword: TextRange, exprs: Vec<ExprId>) -> StmtId {
        let range = self.span_from(keyword);
        self.body.push_stmt(Stmt::Return(exprs), range)
    }

    pub fn if_stmt(
        &mut self,
        keyword: TextRange,
        cond: ExprId,
        then: Vec<StmtId>,
        else_: Option<StmtId>,
    ) -> StmtId {
        let range = self.span_from(keyword);
        self.body.push_stmt(
            Stmt::If {
                init: None,
                cond,
                then,
                else_,
            },
            range,
        )
    }

    pub fn for_stmt(
        &mut self,
        keyword: TextRange,
        cond: Option<ExprId>,
        body: Vec<StmtId>,
    ) -> StmtId {
        let range = self.span_from(keyword);
        self.body.push_stmt(Stmt::For { cond, body }, range)
    }

    /// An expression switch; its span is the range of the `switch` keyword.
    pub fn switch(
        &mut self,
        keyword: TextRange,
        init: Option<StmtId>,
        tag: Option<ExprId>,
        clauses: Vec<CaseClause>,
    ) -> StmtId {
        self.body
            .push_stmt(Stmt::Switch(SwitchStmt { init, tag, clauses }), keyword)
    }

    pub fn type_switch(
        &mut self,
        keyword: TextRange,
        subject: ExprId,
        clauses: Vec<CaseClause>,
    ) -> StmtId {
        self.body.push_stmt(
            Stmt::TypeSwitch(TypeSwitchStmt { subject, clauses }),
            keyword,
        )
    }

    pub fn case(
        &mut self,
        labels: Vec<ExprId>,
        body: Vec<StmtId>,
    ) -> Result<CaseClause, BuildError> {
        if labels.is_empty() {
            return Err(BuildError::EmptyCase);
        }
        Ok(CaseClause {
            kind: CaseKind::Labels(labels),
            body,
        })
    }

    pub fn default_case(&self, body: Vec<StmtId>) -> CaseClause {
        CaseClause {
            kind: CaseKind::Default,
            body,
        }
    }

    /// Completes the function with its top level statements.
    pub fn finish(self, root: Vec<StmtId>) {
        let FuncBuilder {
            file,
            name,
            span,
            mut body,
            types,
            ..
        } = self;
        body.root = root;
        file.funcs.push(Func {
            name,
            span,
            body,
            types,
        });
    }

    fn prim(&mut self, prim: PrimTy) -> TyId {
        self.file.builder.prim(prim)
    }

    fn span_from(&self, start: TextRange) -> TextRange {
        let end = TextSize::from(self.file.cursor as u32).max(start.end());
        TextRange::new(start.start(), end)
    }

    fn resolve_ident(&mut self, expr: ExprId, name: &str) {
        if let Some(&ty) = self.locals.get(name) {
            self.types.record(expr, TypeAndValue::new(ty, None));
            return;
        }

        if let Some(item) = self.file.builder.lookup(&self.file.package, name) {
            self.record_item(expr, &item);
            return;
        }

        if let Some(package) = self.file.resolve_import(name) {
            self.types.record_package_ref(expr, package);
            return;
        }

        match name {
            "true" | "false" => {
                let ty = self.prim(PrimTy::Untyped(UntypedKind::Bool));
                self.types.record(
                    expr,
                    TypeAndValue::new(ty, Some(ConstValue::Bool(name == "true"))),
                );
            }
            "nil" => {
                let ty = self.prim(PrimTy::Untyped(UntypedKind::Nil));
                self.types.record(expr, TypeAndValue::new(ty, None));
            }
            _ => match PrimTy::from_name(name) {
                Some(prim) => {
                    let ty = self.prim(prim);
                    self.types.record(expr, TypeAndValue::new(ty, None));
                    self.type_exprs.insert(expr);
                }
                None => tracing::debug!(name, "unresolved identifier"),
            },
        }
    }

    fn record_item(&mut self, expr: ExprId, item: &ScopeItem) {
        let tv = match item {
            ScopeItem::TypeName(decl) => {
                self.type_exprs.insert(expr);
                TypeAndValue::new(decl.ty, None)
            }
            ScopeItem::Const(decl) => TypeAndValue::new(decl.ty, decl.value.clone()),
            ScopeItem::Var(decl) => TypeAndValue::new(decl.ty, None),
            ScopeItem::Func(decl) => TypeAndValue::new(decl.ty, None),
        };
        self.types.record(expr, tv);
    }

    fn call_type(&self, callee: ExprId, args: &[ExprId]) -> Option<TypeAndValue> {
        let callee_ty = self.types.type_of(callee)?;
        if self.type_exprs.contains(&callee) {
            // A conversion keeps the constant value of its operand.
            let value = match args {
                [arg] => self.types.value_of(*arg).cloned(),
                _ => None,
            };
            return Some(TypeAndValue::new(callee_ty, value));
        }

        match self.file.builder.program.types.results(callee_ty)? {
            [result] => Some(TypeAndValue::new(*result, None)),
            _ => None,
        }
    }

    fn binary_type(&mut self, lhs: ExprId, op: BinOp, rhs: ExprId) -> Option<TypeAndValue> {
        let arith = match op {
            BinOp::Arith(arith) => arith,
            BinOp::Comp(_) | BinOp::Logical(_) => {
                let ty = self.prim(PrimTy::Untyped(UntypedKind::Bool));
                return Some(TypeAndValue::new(ty, None));
            }
        };

        let lhs = self.types.type_and_value(lhs)?;
        let rhs = self.types.type_and_value(rhs)?;
        let lhs_untyped = self
            .file
            .builder
            .program
            .types
            .as_prim(lhs.ty)
            .is_some_and(PrimTy::is_untyped);
        // The typed operand decides the type of the result.
        let ty = if lhs_untyped { rhs.ty } else { lhs.ty };

        let value = match (
            lhs.value.as_ref().and_then(ConstValue::as_int),
            rhs.value.as_ref().and_then(ConstValue::as_int),
        ) {
            (Some(lhs), Some(rhs)) => fold_int(arith, lhs, rhs).map(ConstValue::Int),
            _ => None,
        };
        Some(TypeAndValue::new(ty, value))
    }

    /// The type a variable gets when initialized with a value of `ty`.
    fn default_type(&mut self, ty: TyId) -> TyId {
        let prim = match self.file.builder.program.types.as_prim(ty) {
            Some(PrimTy::Untyped(kind)) => match kind {
                UntypedKind::Bool => PrimTy::Bool,
                UntypedKind::Int => PrimTy::Int(IntTy::Int),
                UntypedKind::Float => PrimTy::Float(FloatTy::F64),
                UntypedKind::String => PrimTy::String,
                UntypedKind::Nil => return ty,
            },
            _ => return ty,
        };
        self.prim(prim)
    }
}

fn fold_int(op: ArithBinOp, lhs: &BigInt, rhs: &BigInt) -> Option<BigInt> {
    let zero = BigInt::from(0);
    match op {
        ArithBinOp::Add => Some(lhs + rhs),
        ArithBinOp::Sub => Some(lhs - rhs),
        ArithBinOp::Mul => Some(lhs * rhs),
        ArithBinOp::Div if *rhs != zero => Some(lhs / rhs),
        ArithBinOp::Rem if *rhs != zero => Some(lhs % rhs),
        ArithBinOp::BitOr => Some(lhs | rhs),
        ArithBinOp::BitAnd => Some(lhs & rhs),
        ArithBinOp::BitXor => Some(lhs ^ rhs),
        _ => None,
    }
}

/// Finds the next occurrence of `needle` at or after `from` that is a whole
/// token and not inside a line comment.
fn find_token(text: &str, from: usize, needle: &str) -> Option<usize> {
    let starts_ident = needle.chars().next().is_some_and(is_ident_char);
    let ends_ident = needle.chars().next_back().is_some_and(is_ident_char);

    text.get(from..)?
        .match_indices(needle)
        .map(|(idx, _)| from + idx)
        .find(|&start| {
            let end = start + needle.len();
            let bounded_before =
                !starts_ident || !text[..start].chars().next_back().is_some_and(is_ident_char);
            let bounded_after =
                !ends_ident || !text[end..].chars().next().is_some_and(is_ident_char);
            bounded_before && bounded_after && !in_line_comment(text, start)
        })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `offset` follows a `//` on its line. Slashes inside string and
/// rune literals opened on the same line do not start a comment.
fn in_line_comment(text: &str, offset: usize) -> bool {
    let line_start = text[..offset].rfind('\n').map_or(0, |idx| idx + 1);
    let mut chars = text[line_start..offset].chars().peekable();
    let mut quote = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if q != '`' && c == '\\' => {
                chars.next();
            }
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => return true,
                _ => {}
            },
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir_def::IntTy;

    const SRC: &str = r#"package color

// Kind is not used by Kinder.
func paint(k Kind) {
	switch k {
	case Red, Kind(2):
	}
}
"#;

    #[test]
    fn tokens_respect_identifier_boundaries_and_comments() {
        assert_eq!(find_token(SRC, 0, "Kind"), SRC.find("(k Kind)").map(|i| i + 3));
        assert_eq!(find_token(SRC, 0, "k"), SRC.find("(k ").map(|i| i + 1));
        assert_eq!(find_token(SRC, 0, "Kinder"), None);
        assert_eq!(find_token(SRC, SRC.len(), "k"), None);
    }

    #[test]
    fn slashes_in_literals_do_not_start_comments() {
        let src = "u := \"http://x\"; k := '/'; v := `a\\` // k\nk\n";
        let after_raw = src.find("; k :=").map(|i| i + 2);
        assert_eq!(find_token(src, 0, "k"), after_raw);
        let next_line = src.rfind("\nk").map(|i| i + 1);
        assert_eq!(find_token(src, src.find("// k").unwrap_or(0), "k"), next_line);
        assert!(in_line_comment(src, src.find("// k").unwrap_or(0) + 3));
        assert!(!in_line_comment(src, src.find("x\"").unwrap_or(0)));
    }

    #[test]
    fn records_types_and_values() {
        let mut builder = ProgramBuilder::new();
        let pkg = builder.package("color", "color").unwrap();
        let int = builder.prim(PrimTy::Int(IntTy::Int));
        let kind = builder.named_type(&pkg, "Kind", int).unwrap();
        builder
            .iota_constants(&pkg, kind, &["Red", "Green", "Blue"])
            .unwrap();

        let mut file = builder.file(&pkg, "color.go", SRC).unwrap();
        let mut func = file.func("paint").unwrap();
        func.param("k", kind).unwrap();
        let kw = func.keyword("switch").unwrap();
        let tag = func.ident("k").unwrap();
        let red = func.ident("Red").unwrap();
        let conv_callee = func.ident("Kind").unwrap();
        let two = func.int_lit("2").unwrap();
        let conv = func.call(conv_callee, vec![two]).unwrap();
        let case = func.case(vec![red, conv], vec![]).unwrap();
        let switch = func.switch(kw, None, Some(tag), vec![case]);

        assert_eq!(func.types.type_of(tag), Some(kind));
        assert_eq!(func.types.value_of(red), Some(&ConstValue::from(0i64)));
        assert_eq!(func.types.type_of(conv), Some(kind));
        assert_eq!(func.types.value_of(conv), Some(&ConstValue::from(2i64)));
        assert_eq!(
            func.body.stmt_span(switch),
            TextRange::at(TextSize::from(SRC.find("switch").unwrap() as u32), 6.into())
        );
        func.finish(vec![switch]);
        let file_id = file.finish();

        let program = builder.finish();
        let source = program.source_file(file_id).unwrap();
        assert_eq!(source.funcs.len(), 1);
        assert_eq!(program.package(&pkg).unwrap().files, vec![file_id]);
    }

    #[test]
    fn underlying_is_resolved_through_named_types() {
        let mut builder = ProgramBuilder::new();
        let pkg = builder.package("p", "p").unwrap();
        let int8 = builder.prim(PrimTy::Int(IntTy::I8));
        let base = builder.named_type(&pkg, "Base", int8).unwrap();
        builder.named_type(&pkg, "Derived", base).unwrap();
        builder.alias_type(&pkg, "Alias", base).unwrap();

        let program = builder.finish();
        let scope = &program.package(&pkg).unwrap().scope;
        assert_eq!(scope.type_decl("Derived").unwrap().underlying, int8);
        let alias = scope.type_decl("Alias").unwrap();
        assert!(alias.is_alias);
        assert_eq!(alias.ty, base);
    }

    #[test]
    fn misuse_is_reported() {
        let mut builder = ProgramBuilder::new();
        let pkg = builder.package("p", "p").unwrap();
        assert_eq!(
            builder.package("p", "p"),
            Err(BuildError::DuplicatePackage(pkg.clone()))
        );
        let int = builder.prim(PrimTy::Int(IntTy::Int));
        builder.constant(&pkg, "A", int, None).unwrap();
        assert!(matches!(
            builder.constant(&pkg, "A", int, None),
            Err(BuildError::DuplicateDeclaration { .. })
        ));

        let mut file = builder.file(&pkg, "p.go", "package p\n").unwrap();
        assert!(matches!(
            file.func("missing"),
            Err(BuildError::NotInSource { .. })
        ));
    }
}
