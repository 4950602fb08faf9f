use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Identifiers with a special meaning to the parser.
    ///
    /// The scanner never produces keyword tokens, keywords are identifiers
    /// recognised by their lexeme.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("return", Keyword::Return);
        map.insert("if", Keyword::If);
        map.insert("else", Keyword::Else);
        map.insert("while", Keyword::While);
        map.insert("true", Keyword::True);
        map.insert("false", Keyword::False);
        map.insert("null", Keyword::Null);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Return,
    If,
    Else,
    While,
    True,
    False,
    Null,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Dot,
    Comma,
    Semicolon,

    Plus,
    Dash,
    Star,
    Slash,

    Equals,    // ==
    NotEquals, // !=
    Greater,
    GreaterEquals,
    Less,
    LessEquals,

    Not, // !
    And,
    Or,

    Assignment, // =

    String,
    Number,
    EOF,
}

impl TokenKind {
    /// The source text of fixed-lexeme tokens.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenCurly => Some("{"),
            TokenKind::CloseCurly => Some("}"),
            TokenKind::Dot => Some("."),
            TokenKind::Comma => Some(","),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Plus => Some("+"),
            TokenKind::Dash => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Equals => Some("=="),
            TokenKind::NotEquals => Some("!="),
            TokenKind::Greater => Some(">"),
            TokenKind::GreaterEquals => Some(">="),
            TokenKind::Less => Some("<"),
            TokenKind::LessEquals => Some("<="),
            TokenKind::Not => Some("!"),
            TokenKind::And => Some("&&"),
            TokenKind::Or => Some("||"),
            TokenKind::Assignment => Some("="),
            TokenKind::Identifier | TokenKind::String | TokenKind::Number | TokenKind::EOF => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{:?}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Returns the keyword this token spells, if it is an identifier naming one.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind != TokenKind::Identifier {
            return None;
        }

        RESERVED_LOOKUP.get(self.value.as_str()).copied()
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub fn row(&self) -> u32 {
        self.span.start.row
    }

    pub fn col(&self) -> u32 {
        self.span.start.col
    }
}
