use common::TextRange;
use cranelift_entity::{PrimaryMap, SecondaryMap};

use super::{Expr, ExprId, Stmt, StmtId};

/// Statements and expressions of one function, with the source range of
/// every node.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub stmts: PrimaryMap<StmtId, Stmt>,
    pub exprs: PrimaryMap<ExprId, Expr>,
    /// Top level statements in source order.
    pub root: Vec<StmtId>,

    stmt_spans: SecondaryMap<StmtId, TextRange>,
    expr_spans: SecondaryMap<ExprId, TextRange>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_expr(&mut self, expr: Expr, range: TextRange) -> ExprId {
        let id = self.exprs.push(expr);
        self.expr_spans[id] = range;
        id
    }

    pub fn push_stmt(&mut self, stmt: Stmt, range: TextRange) -> StmtId {
        let id = self.stmts.push(stmt);
        self.stmt_spans[id] = range;
        id
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id]
    }

    pub fn expr_span(&self, id: ExprId) -> TextRange {
        self.expr_spans[id]
    }

    /// For a switch statement this is the range of the `switch` keyword.
    pub fn stmt_span(&self, id: StmtId) -> TextRange {
        self.stmt_spans[id]
    }

    /// The expression behind any number of parentheses.
    pub fn unparen(&self, id: ExprId) -> ExprId {
        let mut id = id;
        while let Expr::Paren(inner) = self.expr(id) {
            id = *inner;
        }
        id
    }
}
