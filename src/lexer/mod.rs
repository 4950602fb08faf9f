//! Lexical analysis module for the front end.
//!
//! This module contains the scanner that converts source text into a
//! stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Identifiers (keywords are identifiers the parser recognises), numbers and strings
//! - Token row/column tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
