use std::{fmt::Display, slice::Iter};

use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::SymbolType,
};

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// A call used as a statement. Its value is discarded.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `type name;` or `type name = value;`
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub explicit_type: SymbolType,
    pub identifier: String,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

/// `type name(type param, ...) { ... }`
#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub return_type: SymbolType,
    pub identifier: String,
    pub parameters: Vec<(String, SymbolType)>,
    pub body: BlockStmt,
    pub span: Span,
}

/// `name = value;`
#[derive(Debug, Clone)]
pub struct AssignStmt {
    pub identifier: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

/// `if (condition) { ... } else { ... }`
///
/// `else if` is stored as an else block holding the nested `IfStmt` as its
/// only statement.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
}

impl IfStmt {
    /// Returns the nested if when the else block came from `else if`.
    pub fn else_if(&self) -> Option<&IfStmt> {
        match self.else_body.as_ref().map(|block| block.body.as_slice()) {
            Some([Stmt::If(nested)]) => Some(nested),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.body.is_empty() {
            return write!(f, "{{}}");
        }

        writeln!(f, "{{")?;
        for stmt in self.iter() {
            for line in stmt.to_string().lines() {
                writeln!(f, "{}{}", INDENT, line)?;
            }
        }
        write!(f, "}}")
    }
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

impl Display for VarDeclStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.assigned_value {
            Some(value) => write!(f, "{} {} = {};", self.explicit_type, self.identifier, value),
            None => write!(f, "{} {};", self.explicit_type, self.identifier),
        }
    }
}

impl Display for FnDeclStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|(name, ty)| format!("{} {}", ty, name))
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{} {}({}) {}", self.return_type, self.identifier, parameters, self.body)
    }
}

impl Display for AssignStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {};", self.identifier, self.value)
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

impl Display for IfStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.then_body)?;

        if let Some(nested) = self.else_if() {
            write!(f, " else {}", nested)
        } else if let Some(else_body) = &self.else_body {
            write!(f, " else {}", else_body)
        } else {
            Ok(())
        }
    }
}

impl Display for WhileStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}
