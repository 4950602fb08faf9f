//! Parser module for building the program tree.
//!
//! This module transforms a stream of tokens into a `Program`. It handles:
//!
//! - Top-level declarations (functions and variables only)
//! - Statement parsing by fixed lookahead (declarations, assignment, control flow)
//! - Expression parsing by precedence climbing, folding each level to the left
//! - Type annotations
//!
//! Parsing stops at the first error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
