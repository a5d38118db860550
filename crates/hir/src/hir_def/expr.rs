use cranelift_entity::entity_impl;
use smol_str::SmolStr;

use super::StmtId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(u32);
entity_impl!(ExprId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(SmolStr),
    /// `base.member`, where `base` is either a value or a package name.
    Selector(ExprId, SmolStr),
    Call(ExprId, Vec<ExprId>),
    Lit(LitKind),
    Paren(ExprId),
    Unary(UnOp, ExprId),
    Binary(ExprId, BinOp, ExprId),
    /// Function literal; its statements live in the enclosing body.
    FuncLit(Vec<StmtId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LitKind {
    /// Source text of an integer literal.
    Int(SmolStr),
    String(SmolStr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Not,
    /// `^`
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Arith(ArithBinOp),
    Comp(CompBinOp),
    Logical(LogicalBinOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithBinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `|`
    BitOr,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `<<`
    LShift,
    /// `>>`
    RShift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompBinOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalBinOp {
    And,
    Or,
}
