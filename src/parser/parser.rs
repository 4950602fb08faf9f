//! Parser implementation for building the program tree.
//!
//! This module contains the `Parser` cursor over the token stream and the
//! `parse` entry point. Expressions are parsed by precedence climbing (see
//! `expr`), statements by fixed-distance lookahead (see `stmt`).
//!
//! Every failure is fatal: the first mismatched token aborts the parse with
//! an error naming the construct that was expected.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::stmt::parse_top_level_stmt;

/// The main parser structure that maintains parsing state.
///
/// The token stream always ends with an `EOF` token, so the cursor can never
/// run past the end of the input.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended if the stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position::new(0, 0, file));

            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: position.clone(), end: position }
            ));
        }

        Parser { tokens, pos: 0 }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `n` places ahead of the current one, if any.
    pub fn peek_n(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    /// Checks whether the token `n` places ahead is one of `kinds`.
    pub fn matches_n(&self, n: usize, kinds: &[TokenKind]) -> bool {
        self.peek_n(n).is_some_and(|token| token.is_one_of_many(kinds))
    }

    /// Checks whether the current token is the identifier spelling `keyword`.
    pub fn at_keyword(&self, keyword: Keyword) -> bool {
        self.current_token().is_keyword(keyword)
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor stays on `EOF` once it gets there.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, failing with `message` otherwise.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        Err(self.error_here(message))
    }

    /// Expects a token of the specified kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();

        if token.kind == expected_kind {
            return Ok(self.advance());
        }

        let error = match (token.kind, expected_kind.symbol()) {
            (TokenKind::EOF, Some(symbol)) => ErrorImpl::UnexpectedEof {
                expected: format!("expected '{}'", symbol),
            },
            (TokenKind::EOF, None) => ErrorImpl::UnexpectedEof {
                expected: format!("expected {}", expected_kind),
            },
            _ => ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
        };

        Err(Error::new(error, token.span.start.clone()))
    }

    /// Builds an error at the current token.
    ///
    /// At the end of input this is always `UnexpectedEof`.
    pub fn error_here(&self, message: &str) -> Error {
        let token = self.current_token();

        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEof {
                expected: String::from(message),
            }
        } else {
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            }
        };

        Error::new(error, token.span.start.clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of tokens into a program.
///
/// This is the main entry point for parsing. Only function and variable
/// declarations are accepted at the top level.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `file` - Reference-counted string containing the source file name
///
/// # Returns
///
/// The parsed `Program`, or the first syntax error encountered.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    let start = parser.get_position();

    let mut body = vec![];

    while parser.has_tokens() {
        let stmt = parse_top_level_stmt(&mut parser)?;
        trace!(span = %stmt.get_span().start, "parsed top-level statement");
        body.push(stmt);
    }

    debug!(file = %file, statements = body.len(), "parsed program");

    Ok(Program {
        body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}
