use std::slice::Iter;

use super::{expressions::Expr, types::Type};

/// An ordered sequence of statements. Bodies of `if`, `else` and `while`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub body: Vec<Stmt>,
}

impl Block {
    pub fn new(body: Vec<Stmt>) -> Self {
        Block { body }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    /// `if` and `else if` arms, in source order.
    pub cases: Vec<(Expr, Block)>,
    /// Empty when the source has no `else`.
    pub else_body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub identifier: String,
    pub explicit_type: Type,
    pub assigned_value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Block),
    NoOp,
    Expression(Expr),
    If(IfStmt),
    While(WhileStmt),
    VarDecl(Vec<VarDecl>),
    Assign { target: Expr, value: Expr },
    Return(Option<Expr>),
    Break,
    Continue,
}
