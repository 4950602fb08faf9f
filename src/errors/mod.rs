//! Error types and error handling for the front end.
//!
//! This module defines the error types used by every phase. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for scanning, parsing and type checking
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
