use crate::hir_def::{
    Body, CaseClause, Expr, ExprId, Func, SourceFile, Stmt, StmtId, SwitchStmt, TypeInfo,
    TypeSwitchStmt,
};

pub mod prelude {
    pub use super::{
        walk_case_clause, walk_expr, walk_file, walk_func, walk_stmt, walk_switch,
        walk_type_switch, Visitor, VisitorCtxt,
    };
}

/// A visitor for traversing the statements and expressions of a source file.
pub trait Visitor<'a> {
    fn visit_file(&mut self, file: &'a SourceFile) {
        walk_file(self, file)
    }

    fn visit_func(&mut self, ctxt: &VisitorCtxt<'a>, func: &'a Func) {
        walk_func(self, ctxt, func)
    }

    fn visit_stmt(&mut self, ctxt: &VisitorCtxt<'a>, stmt: StmtId) {
        walk_stmt(self, ctxt, stmt)
    }

    fn visit_switch(&mut self, ctxt: &VisitorCtxt<'a>, stmt: StmtId, switch: &'a SwitchStmt) {
        let _ = stmt;
        walk_switch(self, ctxt, switch)
    }

    fn visit_type_switch(
        &mut self,
        ctxt: &VisitorCtxt<'a>,
        stmt: StmtId,
        switch: &'a TypeSwitchStmt,
    ) {
        let _ = stmt;
        walk_type_switch(self, ctxt, switch)
    }

    fn visit_case_clause(&mut self, ctxt: &VisitorCtxt<'a>, clause: &'a CaseClause) {
        walk_case_clause(self, ctxt, clause)
    }

    fn visit_expr(&mut self, ctxt: &VisitorCtxt<'a>, expr: ExprId) {
        walk_expr(self, ctxt, expr)
    }
}

/// The file and function a visited node belongs to.
#[derive(Debug, Clone, Copy)]
pub struct VisitorCtxt<'a> {
    pub file: &'a SourceFile,
    pub func: &'a Func,
}

impl<'a> VisitorCtxt<'a> {
    pub fn new(file: &'a SourceFile, func: &'a Func) -> Self {
        Self { file, func }
    }

    pub fn body(&self) -> &'a Body {
        &self.func.body
    }

    pub fn types(&self) -> &'a TypeInfo {
        &self.func.types
    }
}

pub fn walk_file<'a, V>(visitor: &mut V, file: &'a SourceFile)
where
    V: Visitor<'a> + ?Sized,
{
    for func in &file.funcs {
        let ctxt = VisitorCtxt::new(file, func);
        visitor.visit_func(&ctxt, func);
    }
}

pub fn walk_func<'a, V>(visitor: &mut V, ctxt: &VisitorCtxt<'a>, func: &'a Func)
where
    V: Visitor<'a> + ?Sized,
{
    for &stmt in &func.body.root {
        visitor.visit_stmt(ctxt, stmt);
    }
}

pub fn walk_stmt<'a, V>(visitor: &mut V, ctxt: &VisitorCtxt<'a>, stmt: StmtId)
where
    V: Visitor<'a> + ?Sized,
{
    match ctxt.body().stmt(stmt) {
        Stmt::Expr(expr) => visitor.visit_expr(ctxt, *expr),

        Stmt::Assign { lhs, rhs, .. } => {
            for &expr in lhs.iter().chain(rhs) {
                visitor.visit_expr(ctxt, expr);
            }
        }

        Stmt::Block(stmts) => {
            for &stmt in stmts {
                visitor.visit_stmt(ctxt, stmt);
            }
        }

        Stmt::If {
            init,
            cond,
            then,
            else_,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt(ctxt, *init);
            }
            visitor.visit_expr(ctxt, *cond);
            for &stmt in then {
                visitor.visit_stmt(ctxt, stmt);
            }
            if let Some(else_) = else_ {
                visitor.visit_stmt(ctxt, *else_);
            }
        }

        Stmt::For { cond, body } => {
            if let Some(cond) = cond {
                visitor.visit_expr(ctxt, *cond);
            }
            for &stmt in body {
                visitor.visit_stmt(ctxt, stmt);
            }
        }

        Stmt::Return(exprs) => {
            for &expr in exprs {
                visitor.visit_expr(ctxt, expr);
            }
        }

        Stmt::Switch(switch) => visitor.visit_switch(ctxt, stmt, switch),

        Stmt::TypeSwitch(switch) => visitor.visit_type_switch(ctxt, stmt, switch),
    }
}

pub fn walk_switch<'a, V>(visitor: &mut V, ctxt: &VisitorCtxt<'a>, switch: &'a SwitchStmt)
where
    V: Visitor<'a> + ?Sized,
{
    if let Some(init) = switch.init {
        visitor.visit_stmt(ctxt, init);
    }
    if let Some(tag) = switch.tag {
        visitor.visit_expr(ctxt, tag);
    }
    for clause in &switch.clauses {
        visitor.visit_case_clause(ctxt, clause);
    }
}

pub fn walk_type_switch<'a, V>(visitor: &mut V, ctxt: &VisitorCtxt<'a>, switch: &'a TypeSwitchStmt)
where
    V: Visitor<'a> + ?Sized,
{
    visitor.visit_expr(ctxt, switch.subject);
    // Labels of a type switch are types, not values.
    for clause in &switch.clauses {
        for &stmt in &clause.body {
            visitor.visit_stmt(ctxt, stmt);
        }
    }
}

pub fn walk_case_clause<'a, V>(visitor: &mut V, ctxt: &VisitorCtxt<'a>, clause: &'a CaseClause)
where
    V: Visitor<'a> + ?Sized,
{
    for &label in clause.labels() {
        visitor.visit_expr(ctxt, label);
    }
    for &stmt in &clause.body {
        visitor.visit_stmt(ctxt, stmt);
    }
}

pub fn walk_expr<'a, V>(visitor: &mut V, ctxt: &VisitorCtxt<'a>, expr: ExprId)
where
    V: Visitor<'a> + ?Sized,
{
    match ctxt.body().expr(expr) {
        Expr::Ident(_) | Expr::Lit(_) => {}

        Expr::Selector(base, _) => visitor.visit_expr(ctxt, *base),

        Expr::Call(callee, args) => {
            visitor.visit_expr(ctxt, *callee);
            for &arg in args {
                visitor.visit_expr(ctxt, arg);
            }
        }

        Expr::Paren(inner) | Expr::Unary(_, inner) => visitor.visit_expr(ctxt, *inner),

        Expr::Binary(lhs, _, rhs) => {
            visitor.visit_expr(ctxt, *lhs);
            visitor.visit_expr(ctxt, *rhs);
        }

        Expr::FuncLit(stmts) => {
            for &stmt in stmts {
                visitor.visit_stmt(ctxt, stmt);
            }
        }
    }
}
