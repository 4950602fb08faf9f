use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            AssignStmt, BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt,
            WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, TokenKind},
    Span,
};

use super::{
    expr::{parse_call_expr, parse_expr},
    parser::Parser,
    types::parse_symbol_type,
};

/// Parses a statement allowed at the top level of a program.
///
/// Only function and variable declarations are accepted here.
pub fn parse_top_level_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.matches_n(2, &[TokenKind::OpenParen]) {
        return parse_fn_decl_stmt(parser);
    }

    if parser.matches_n(2, &[TokenKind::Assignment, TokenKind::Semicolon]) {
        return parse_var_decl_stmt(parser);
    }

    Err(Error::new(
        ErrorImpl::UnknownTopLevelStatement {
            token: parser.current_token().value.clone(),
        },
        parser.get_position(),
    ))
}

/// Parses a statement inside a block.
///
/// The production is picked by looking at most two tokens ahead, never
/// backtracking.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.current_token().keyword() {
        Some(Keyword::Return) => return parse_return_stmt(parser),
        Some(Keyword::While) => return parse_while_stmt(parser),
        Some(Keyword::If) => return parse_if_stmt(parser),
        _ => {}
    }

    if parser.current_token_kind() == TokenKind::OpenCurly {
        return Ok(Stmt::Block(parse_block_stmt(parser)?));
    }

    if parser.matches_n(1, &[TokenKind::Assignment]) {
        return parse_assignment_stmt(parser);
    }

    if parser.matches_n(2, &[TokenKind::OpenParen]) {
        return parse_fn_decl_stmt(parser);
    }

    if parser.matches_n(2, &[TokenKind::Assignment, TokenKind::Semicolon]) {
        return parse_var_decl_stmt(parser);
    }

    parse_expression_stmt(parser)
}

/// Parses `{ stmt* }`. Stray `;` tokens between statements are skipped.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect_error(TokenKind::OpenCurly, "expected '{' to open block")?;
    let mut body = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::EOF => return Err(parser.error_here("expected '}' to close block")),
            _ => body.push(parse_stmt(parser)?),
        }
    }

    let end = parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: Span {
            start: start.span.start,
            end: end.span.end,
        },
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let return_type = parse_symbol_type(parser, "expected function return type")?;
    let identifier = parser.expect_error(TokenKind::Identifier, "expected function name")?.value;
    parser.expect_error(TokenKind::OpenParen, "expected '(' to open function parameters")?;

    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let parameter_type = parse_symbol_type(parser, "expected function parameter type")?;
        let parameter_name = parser.expect_error(TokenKind::Identifier, "expected function parameter name")?;
        parameters.push((parameter_name.value, parameter_type));

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {}
            _ => return Err(parser.error_here("expected ',' or ')' after function parameter")),
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let body = parse_block_stmt(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        span: Span {
            start: return_type.get_position(),
            end: body.span.end.clone(),
        },
        return_type,
        identifier,
        parameters,
        body,
    }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let explicit_type = parse_symbol_type(parser, "expected variable type")?;
    let identifier = parser.expect_error(TokenKind::Identifier, "expected variable name")?.value;

    let assigned_value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        parser.expect_error(TokenKind::Assignment, "expected '=' or ';' after variable name")?;
        Some(parse_expr(parser)?)
    };

    let end = parser.expect_error(TokenKind::Semicolon, "expected ';' after variable declaration")?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        span: Span {
            start: explicit_type.get_position(),
            end: end.span.end,
        },
        explicit_type,
        identifier,
        assigned_value,
    }))
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let target = parser.expect_error(TokenKind::Identifier, "expected assignment target")?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser)?;
    let end = parser.expect_error(TokenKind::Semicolon, "expected ';' after assignment")?;

    Ok(Stmt::Assign(AssignStmt {
        span: Span {
            start: target.span.start,
            end: end.span.end,
        },
        identifier: target.value,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();
    let value = parse_expr(parser)?;
    let end = parser.expect_error(TokenKind::Semicolon, "expected ';' after return value")?;

    Ok(Stmt::Return(ReturnStmt {
        span: Span {
            start: start.span.start,
            end: end.span.end,
        },
        value,
    }))
}

fn parse_condition(parser: &mut Parser, keyword: &str) -> Result<Expr, Error> {
    parser.expect_error(TokenKind::OpenParen, &format!("expected '(' after '{}'", keyword))?;
    let condition = parse_expr(parser)?;
    parser.expect_error(TokenKind::CloseParen, &format!("expected ')' after {} condition", keyword))?;

    Ok(condition)
}

/// Parses `if (cond) { ... }` with an optional `else { ... }` or `else if`.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();
    let condition = parse_condition(parser, "if")?;
    let then_body = parse_block_stmt(parser)?;

    let else_body = if parser.at_keyword(Keyword::Else) {
        parser.advance();

        if parser.at_keyword(Keyword::If) {
            let nested = parse_if_stmt(parser)?;
            Some(BlockStmt {
                span: nested.get_span().clone(),
                body: vec![nested],
            })
        } else {
            Some(parse_block_stmt(parser)?)
        }
    } else {
        None
    };

    let end = match &else_body {
        Some(block) => block.span.end.clone(),
        None => then_body.span.end.clone(),
    };

    Ok(Stmt::If(IfStmt {
        span: Span {
            start: start.span.start,
            end,
        },
        condition,
        then_body,
        else_body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();
    let condition = parse_condition(parser, "while")?;
    let body = parse_block_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        span: Span {
            start: start.span.start,
            end: body.span.end.clone(),
        },
        condition,
        body,
    }))
}

/// Parses a call used as a statement. Any other expression is rejected.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_call_expr(parser)?;

    if !matches!(expression, Expr::Call(_)) {
        return Err(Error::new(
            ErrorImpl::ExpectedCallStatement,
            expression.get_span().start.clone(),
        ));
    }

    let end = parser.expect_error(TokenKind::Semicolon, "expected ';' after function call")?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expression.get_span().start.clone(),
            end: end.span.end,
        },
        expression,
    }))
}
