#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A 0-indexed row/column location inside a named source file.
#[derive(Debug, Clone)]
pub struct Position {
    pub row: u32,
    pub col: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(row: u32, col: u32, file: Rc<String>) -> Self {
        Position { row, col, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the 1-based line number, the line text and the column of `position`.
pub fn get_line_at_position(source: &str, position: &Position) -> Option<(usize, String, usize)> {
    let row = position.row as usize;
    let line = source.lines().nth(row)?;

    Some((row + 1, line.to_string(), position.col as usize))
}

pub fn display_error(error: &Error, file: &str, source: &str) {
    /*
        Error: UnexpectedToken (...)
        -> main.c
           |
         3 | int x = ;
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}:{}", file, error.get_position());

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position()) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
