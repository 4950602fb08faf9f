use std::fmt::Display;

use crate::{lexer::tokens::Token, Position, Span};

use super::ast::Expr;

// LITERALS

/// Boolean Expression
/// Represents `true` or `false`.
#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Number Expression
/// Represents a numeric literal. The lexeme is kept as written: a decimal
/// point makes it a float, its absence an int.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: String,
    pub span: Span,
}

impl NumberExpr {
    pub fn is_float(&self) -> bool {
        self.value.contains('.')
    }
}

/// String Expression
/// Represents a string literal, stored unescaped.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// Null Expression
#[derive(Debug, Clone)]
pub struct NullExpr {
    pub span: Span,
}

/// Symbol Expression
/// Represents a reference to a variable or function by name.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// Prefix Expression
/// Represents `!operand` or `-operand`.
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: Box<Expr>,
    pub span: Span,
}

/// Binary Expression
/// Represents a binary operation between two expressions.
///
/// Chains of the same precedence are always left-associated:
/// `a - b - c` is `(a - b) - c`.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Member Expression
/// Represents `parent.member`.
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub parent: Box<Expr>,
    pub member: String,
    pub member_position: Position,
    pub span: Span,
}

/// Call Expression
/// Represents `callee(arguments...)`.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// Grouping Expression
/// Represents a parenthesised expression. It has the type of its contents.
#[derive(Debug, Clone)]
pub struct GroupingExpr {
    pub expression: Box<Expr>,
    pub span: Span,
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for NumberExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for StringExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", escape_string(&self.value))
    }
}

impl Display for NullExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "null")
    }
}

impl Display for SymbolExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator.value, self.right_expr)
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.value, self.right)
    }
}

impl Display for MemberExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.parent.as_ref() {
            // `1.x` would scan as the float `1.` followed by `x`.
            Expr::Number(number) if !number.is_float() => write!(f, "{} .{}", number, self.member),
            parent => write!(f, "{}.{}", parent, self.member),
        }
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{}({})", self.callee, arguments)
    }
}

impl Display for GroupingExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.expression)
    }
}
