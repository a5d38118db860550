use cranelift_entity::entity_impl;

use super::ExprId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StmtId(u32);
entity_impl!(StmtId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(ExprId),
    /// `lhs = rhs` or, if `define` is set, `lhs := rhs`.
    Assign {
        lhs: Vec<ExprId>,
        rhs: Vec<ExprId>,
        define: bool,
    },
    Block(Vec<StmtId>),
    If {
        init: Option<StmtId>,
        cond: ExprId,
        then: Vec<StmtId>,
        else_: Option<StmtId>,
    },
    For {
        cond: Option<ExprId>,
        body: Vec<StmtId>,
    },
    Return(Vec<ExprId>),
    /// Expression switch.
    Switch(SwitchStmt),
    /// `switch x := v.(type)`. Never checked for exhaustiveness; kept so
    /// statements nested in its clauses are still reachable.
    TypeSwitch(TypeSwitchStmt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStmt {
    pub init: Option<StmtId>,
    /// The switched expression. `None` for a bare `switch {`.
    pub tag: Option<ExprId>,
    pub clauses: Vec<CaseClause>,
}

impl SwitchStmt {
    pub fn has_default(&self) -> bool {
        self.clauses.iter().any(CaseClause::is_default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSwitchStmt {
    pub subject: ExprId,
    pub clauses: Vec<CaseClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseClause {
    pub kind: CaseKind,
    pub body: Vec<StmtId>,
}

impl CaseClause {
    pub fn is_default(&self) -> bool {
        matches!(self.kind, CaseKind::Default)
    }

    /// Label expressions, empty for the default clause.
    pub fn labels(&self) -> &[ExprId] {
        match &self.kind {
            CaseKind::Default => &[],
            CaseKind::Labels(labels) => labels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseKind {
    Default,
    /// Non-empty list of `case` labels.
    Labels(Vec<ExprId>),
}
