use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BooleanExpr, CallExpr, GroupingExpr, MemberExpr, NullExpr, NumberExpr,
            PrefixExpr, StringExpr, SymbolExpr,
        },
    },
    errors::errors::Error,
    lexer::tokens::{Keyword, TokenKind},
    Span,
};

use super::{
    lookups::{BindingPower, BP_LOOKUP, PREFIX_OPERATORS},
    parser::Parser,
};

/// Parses a full expression, starting from the loosest binary level.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::LogicalOr)
}

/// Parses a left-associated chain of operators at level `bp`.
///
/// Operands are parsed at the next tighter level, so `a - b - c` folds into
/// `(a - b) - c` and `a + b * c` into `a + (b * c)`.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let mut left = parse_operand(parser, bp)?;

    while BP_LOOKUP.get(&parser.current_token_kind()) == Some(&bp) {
        let operator = parser.advance();
        let right = parse_operand(parser, bp)?;

        left = Expr::Binary(BinaryExpr {
            span: Span {
                start: left.get_span().start.clone(),
                end: right.get_span().end.clone(),
            },
            left: Box::new(left),
            operator,
            right: Box::new(right),
        });
    }

    Ok(left)
}

fn parse_operand(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    match bp.tighter() {
        Some(tighter) => parse_binary_expr(parser, tighter),
        None => parse_prefix_expr(parser),
    }
}

/// Parses `!operand` and `-operand`. Prefix operators stack: `!!x`, `--x`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if !parser.current_token().is_one_of_many(PREFIX_OPERATORS) {
        return parse_call_expr(parser);
    }

    let operator = parser.advance();
    let right = parse_prefix_expr(parser)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator.span.start.clone(),
            end: right.get_span().end.clone(),
        },
        operator,
        right_expr: Box::new(right),
    }))
}

/// Parses an atom followed by any chain of calls and member accesses.
///
/// `a.b(1).c` is `Member(Call(Member(a, b), [1]), c)`.
pub fn parse_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_primary_expr(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => {
                parser.advance();
                let member = parser.expect_error(TokenKind::Identifier, "expected member name after '.'")?;

                expr = Expr::Member(MemberExpr {
                    span: Span {
                        start: expr.get_span().start.clone(),
                        end: member.span.end.clone(),
                    },
                    parent: Box::new(expr),
                    member: member.value,
                    member_position: member.span.start,
                });
            }
            TokenKind::OpenParen => {
                parser.advance();
                let arguments = parse_arguments(parser)?;
                let end = parser.expect_error(TokenKind::CloseParen, "expected ')' after function call arguments")?;

                expr = Expr::Call(CallExpr {
                    span: Span {
                        start: expr.get_span().start.clone(),
                        end: end.span.end,
                    },
                    callee: Box::new(expr),
                    arguments,
                });
            }
            _ => break,
        }
    }

    Ok(expr)
}

// A trailing comma before ')' is accepted.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {}
            _ => return Err(parser.error_here("expected ',' or ')' after function call argument")),
        }
    }

    Ok(arguments)
}

/// Parses literals, identifiers and parenthesised expressions.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenParen => parse_grouping_expr(parser),
        TokenKind::Number => {
            let token = parser.advance();
            Ok(Expr::Number(NumberExpr { value: token.value, span: token.span }))
        }
        TokenKind::String => {
            let token = parser.advance();
            Ok(Expr::String(StringExpr { value: token.value, span: token.span }))
        }
        TokenKind::Identifier => {
            let token = parser.advance();

            return Ok(match token.keyword() {
                Some(Keyword::True) => Expr::Boolean(BooleanExpr { value: true, span: token.span }),
                Some(Keyword::False) => Expr::Boolean(BooleanExpr { value: false, span: token.span }),
                Some(Keyword::Null) => Expr::Null(NullExpr { span: token.span }),
                _ => Expr::Symbol(SymbolExpr { value: token.value, span: token.span }),
            });
        }
        _ => Err(parser.error_here("expected expression")),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?;
    let expression = parse_expr(parser)?;
    let end = parser.expect_error(TokenKind::CloseParen, "expected ')' to close grouping")?;

    Ok(Expr::Grouping(GroupingExpr {
        span: Span {
            start: start.span.start,
            end: end.span.end,
        },
        expression: Box::new(expression),
    }))
}
