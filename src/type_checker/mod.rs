//! Type checking and semantic analysis module.
//!
//! This module checks a parsed program for type correctness:
//!
//! - Resolving type names and variable references through nested scopes
//! - Checking expressions against the type their context expects
//! - Checking call sites against function signatures
//! - Validating member access on compound types
//!
//! Type errors are collected rather than returned, so a single run reports
//! every fault in the program.

pub mod type_checker;
