//! Type annotation parsing.
//!
//! Types are written as a single identifier (`int`, `string`, or any name a
//! scope declares). Resolving the name is left to the type checker.

use crate::{ast::types::SymbolType, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

pub fn parse_symbol_type(parser: &mut Parser, message: &str) -> Result<SymbolType, Error> {
    let token = parser.expect_error(TokenKind::Identifier, message)?;

    Ok(SymbolType {
        name: token.value,
        position: token.span.start,
    })
}
