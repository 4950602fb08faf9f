//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed tokens

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a default lexer handler for fixed-lexeme tokens.
///
/// The handler pushes a token of the given kind spanning the lexeme and
/// advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer,
         _regex: &regex::Regex|
         -> Result<(), $crate::errors::errors::Error> {
            let start = lexer.position();
            lexer.advance_n($value.len());
            let span = $crate::Span {
                start,
                end: lexer.position(),
            };
            lexer.push($crate::MK_TOKEN!($kind, String::from($value), span));
            Ok(())
        }
    };
}
