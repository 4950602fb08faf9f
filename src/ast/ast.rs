use std::{fmt::Display, slice::Iter};

use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BooleanExpr, CallExpr, GroupingExpr, MemberExpr, NullExpr, NumberExpr,
        PrefixExpr, StringExpr, SymbolExpr,
    },
    statements::{
        AssignStmt, BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt,
        WhileStmt,
    },
};

/// Expression
///
/// The closed set of expression nodes. Every consumer matches on it
/// exhaustively.
#[derive(Debug, Clone)]
pub enum Expr {
    Boolean(BooleanExpr),
    Number(NumberExpr),
    String(StringExpr),
    Null(NullExpr),
    Symbol(SymbolExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Member(MemberExpr),
    Call(CallExpr),
    Grouping(GroupingExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Boolean(expr) => &expr.span,
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Null(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Member(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Grouping(expr) => &expr.span,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Boolean(expr) => Display::fmt(expr, f),
            Expr::Number(expr) => Display::fmt(expr, f),
            Expr::String(expr) => Display::fmt(expr, f),
            Expr::Null(expr) => Display::fmt(expr, f),
            Expr::Symbol(expr) => Display::fmt(expr, f),
            Expr::Prefix(expr) => Display::fmt(expr, f),
            Expr::Binary(expr) => Display::fmt(expr, f),
            Expr::Member(expr) => Display::fmt(expr, f),
            Expr::Call(expr) => Display::fmt(expr, f),
            Expr::Grouping(expr) => Display::fmt(expr, f),
        }
    }
}

/// Statement
///
/// The closed set of statement nodes. Only `FnDecl` and `VarDecl` appear at
/// the top level of a program.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Block(BlockStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    Assign(AssignStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Expression(stmt) => Display::fmt(stmt, f),
            Stmt::Block(stmt) => Display::fmt(stmt, f),
            Stmt::VarDecl(stmt) => Display::fmt(stmt, f),
            Stmt::FnDecl(stmt) => Display::fmt(stmt, f),
            Stmt::Assign(stmt) => Display::fmt(stmt, f),
            Stmt::Return(stmt) => Display::fmt(stmt, f),
            Stmt::If(stmt) => Display::fmt(stmt, f),
            Stmt::While(stmt) => Display::fmt(stmt, f),
        }
    }
}

/// A parsed source file: the ordered top-level declarations.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, stmt) in self.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", stmt)?;
        }

        Ok(())
    }
}
