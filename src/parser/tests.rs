//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable and function declarations
//! - Operator precedence and associativity
//! - Call and member chains
//! - Control flow statements
//! - Syntax errors
//! - Re-serialization of the parsed tree

use std::rc::Rc;

use regex::Regex;

use crate::{
    ast::ast::{Expr, Program, Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::parser::{parse, Parser};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.c".to_string())).unwrap();
    parse(tokens, Rc::new("test.c".to_string()))
}

/// Parses `int x = <expr>;` and returns the initializer.
fn parse_initializer(expr: &str) -> Expr {
    let program = parse_source(&format!("int x = {};", expr)).unwrap();

    match &program.body[0] {
        Stmt::VarDecl(decl) => decl.assigned_value.clone().unwrap(),
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

fn binary_parts(expr: &Expr) -> (&Expr, &str, &Expr) {
    match expr {
        Expr::Binary(binary) => (&binary.left, binary.operator.value.as_str(), &binary.right),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

/// Debug form of a program with every source position blanked out.
fn tree_shape(program: &Program) -> String {
    let positions = Regex::new(r"Position \{[^}]*\}").unwrap();
    positions.replace_all(&format!("{:?}", program.body), "Position").into_owned()
}

fn symbol_name(expr: &Expr) -> &str {
    match expr {
        Expr::Symbol(symbol) => symbol.value.as_str(),
        other => panic!("expected symbol, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_source("int add(int a, int b) { return a + b; }").unwrap();
    assert_eq!(program.len(), 1);

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };

    assert_eq!(function.identifier, "add");
    assert_eq!(function.return_type.name, "int");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0].0, "a");
    assert_eq!(function.parameters[0].1.name, "int");
    assert_eq!(function.parameters[1].0, "b");
    assert_eq!(function.parameters[1].1.name, "int");
    assert!(matches!(function.body.body[0], Stmt::Return(_)));
}

#[test]
fn test_parse_function_without_parameters() {
    let program = parse_source("float pi() { return 3.14; }").unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };
    assert!(function.parameters.is_empty());
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_source("int x = 42; string s;").unwrap();
    assert_eq!(program.len(), 2);

    let Stmt::VarDecl(first) = &program.body[0] else {
        panic!("expected variable declaration");
    };
    assert_eq!(first.identifier, "x");
    assert_eq!(first.explicit_type.name, "int");
    assert!(matches!(first.assigned_value, Some(Expr::Number(_))));

    let Stmt::VarDecl(second) = &program.body[1] else {
        panic!("expected variable declaration");
    };
    assert_eq!(second.identifier, "s");
    assert!(second.assigned_value.is_none());
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("  // nothing here\n").unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_subtraction_is_left_associative() {
    let expr = parse_initializer("a - b - c");
    let (left, operator, right) = binary_parts(&expr);

    assert_eq!(operator, "-");
    assert_eq!(symbol_name(right), "c");

    let (inner_left, inner_operator, inner_right) = binary_parts(left);
    assert_eq!(inner_operator, "-");
    assert_eq!(symbol_name(inner_left), "a");
    assert_eq!(symbol_name(inner_right), "b");
}

#[test]
fn test_division_is_left_associative() {
    let expr = parse_initializer("a / b * c");
    let (left, operator, _) = binary_parts(&expr);

    assert_eq!(operator, "*");
    assert_eq!(binary_parts(left).1, "/");
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_initializer("a + b * c");
    let (left, operator, right) = binary_parts(&expr);

    assert_eq!(operator, "+");
    assert_eq!(symbol_name(left), "a");
    assert_eq!(binary_parts(right).1, "*");
}

#[test]
fn test_precedence_ladder() {
    // a || ((b && (c == (d < (e + (f * g))))))
    let expr = parse_initializer("a || b && c == d < e + f * g");

    let (_, operator, right) = binary_parts(&expr);
    assert_eq!(operator, "||");
    let (_, operator, right) = binary_parts(right);
    assert_eq!(operator, "&&");
    let (_, operator, right) = binary_parts(right);
    assert_eq!(operator, "==");
    let (_, operator, right) = binary_parts(right);
    assert_eq!(operator, "<");
    let (_, operator, right) = binary_parts(right);
    assert_eq!(operator, "+");
    let (_, operator, _) = binary_parts(right);
    assert_eq!(operator, "*");
}

#[test]
fn test_not_equals_shares_equality_level() {
    let expr = parse_initializer("a == b != c");
    let (left, operator, _) = binary_parts(&expr);

    assert_eq!(operator, "!=");
    assert_eq!(binary_parts(left).1, "==");
}

#[test]
fn test_grouping_overrides_precedence() {
    let expr = parse_initializer("(a + b) * c");
    let (left, operator, _) = binary_parts(&expr);

    assert_eq!(operator, "*");
    let Expr::Grouping(group) = left else {
        panic!("expected grouping, got {:?}", left);
    };
    assert_eq!(binary_parts(&group.expression).1, "+");
}

#[test]
fn test_prefix_operators_stack() {
    let expr = parse_initializer("--x");
    let Expr::Prefix(outer) = &expr else {
        panic!("expected prefix expression");
    };
    assert_eq!(outer.operator.value, "-");
    let Expr::Prefix(inner) = outer.right_expr.as_ref() else {
        panic!("expected nested prefix expression");
    };
    assert_eq!(symbol_name(&inner.right_expr), "x");

    let expr = parse_initializer("!!done");
    let Expr::Prefix(outer) = &expr else {
        panic!("expected prefix expression");
    };
    assert_eq!(outer.operator.value, "!");
    assert!(matches!(outer.right_expr.as_ref(), Expr::Prefix(_)));
}

#[test]
fn test_prefix_binds_tighter_than_binary() {
    let expr = parse_initializer("-a * b");
    let (left, operator, _) = binary_parts(&expr);

    assert_eq!(operator, "*");
    assert!(matches!(left, Expr::Prefix(_)));
}

#[test]
fn test_literals() {
    assert!(matches!(parse_initializer("true"), Expr::Boolean(ref b) if b.value));
    assert!(matches!(parse_initializer("false"), Expr::Boolean(ref b) if !b.value));
    assert!(matches!(parse_initializer("null"), Expr::Null(_)));
    assert!(matches!(parse_initializer("\"hi\""), Expr::String(ref s) if s.value == "hi"));
    assert!(matches!(parse_initializer("2.5"), Expr::Number(ref n) if n.is_float()));
    assert!(matches!(parse_initializer("2"), Expr::Number(ref n) if !n.is_float()));
}

#[test]
fn test_call_and_member_chain() {
    // Member(Call(Member(a, b), [1]), c)
    let expr = parse_initializer("a.b(1).c");

    let Expr::Member(outer) = &expr else {
        panic!("expected member expression, got {:?}", expr);
    };
    assert_eq!(outer.member, "c");

    let Expr::Call(call) = outer.parent.as_ref() else {
        panic!("expected call expression");
    };
    assert_eq!(call.arguments.len(), 1);

    let Expr::Member(inner) = call.callee.as_ref() else {
        panic!("expected member expression");
    };
    assert_eq!(inner.member, "b");
    assert_eq!(symbol_name(&inner.parent), "a");
}

#[test]
fn test_call_arguments() {
    let Expr::Call(call) = parse_initializer("f()") else {
        panic!("expected call expression");
    };
    assert!(call.arguments.is_empty());

    let Expr::Call(call) = parse_initializer("f(1, a + b, g(2))") else {
        panic!("expected call expression");
    };
    assert_eq!(call.arguments.len(), 3);
    assert!(matches!(call.arguments[1], Expr::Binary(_)));
    assert!(matches!(call.arguments[2], Expr::Call(_)));

    let Expr::Call(call) = parse_initializer("f(1,)") else {
        panic!("expected call expression");
    };
    assert_eq!(call.arguments.len(), 1);
}

#[test]
fn test_parse_statements_in_block() {
    let source = r#"
        int main() {
            int i = 0;
            i = i + 1;
            print(i);;
            { string s = "inner"; }
            while (i < 10) { i = i + 1; }
            return i;
        }
    "#;
    let program = parse_source(source).unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };
    let body = &function.body.body;

    assert_eq!(body.len(), 6);
    assert!(matches!(body[0], Stmt::VarDecl(_)));
    assert!(matches!(body[1], Stmt::Assign(_)));
    assert!(matches!(body[2], Stmt::Expression(_)));
    assert!(matches!(body[3], Stmt::Block(_)));
    assert!(matches!(body[4], Stmt::While(_)));
    assert!(matches!(body[5], Stmt::Return(_)));
}

#[test]
fn test_parse_nested_function_declaration() {
    let program = parse_source("int outer() { int inner(int x) { return x; } return inner(1); }").unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };
    assert!(matches!(function.body.body[0], Stmt::FnDecl(_)));
}

#[test]
fn test_parse_if_else() {
    let program = parse_source("int f(bool c) { if (c) { return 1; } else { return 2; } }").unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };
    let Stmt::If(if_stmt) = &function.body.body[0] else {
        panic!("expected if statement");
    };

    assert_eq!(symbol_name(&if_stmt.condition), "c");
    assert_eq!(if_stmt.then_body.body.len(), 1);
    assert_eq!(if_stmt.else_body.as_ref().unwrap().body.len(), 1);
    assert!(if_stmt.else_if().is_none());
}

#[test]
fn test_else_if_nests_inside_else_block() {
    let source = "int f(int n) { if (n < 0) { return 0; } else if (n == 0) { return 1; } else { return 2; } }";
    let program = parse_source(source).unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };
    let Stmt::If(if_stmt) = &function.body.body[0] else {
        panic!("expected if statement");
    };

    let else_body = if_stmt.else_body.as_ref().unwrap();
    assert_eq!(else_body.body.len(), 1);

    let nested = if_stmt.else_if().unwrap();
    assert_eq!(binary_parts(&nested.condition).1, "==");
    assert!(nested.else_body.is_some());
    assert!(nested.else_if().is_none());
}

#[test]
fn test_if_without_else() {
    let program = parse_source("int f(bool c) { if (c) { print(1); } return 0; }").unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected function declaration");
    };
    let Stmt::If(if_stmt) = &function.body.body[0] else {
        panic!("expected if statement");
    };
    assert!(if_stmt.else_body.is_none());
}

#[test]
fn test_unknown_top_level_statement() {
    let error = parse_source("x = 1;").unwrap_err();
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnknownTopLevelStatement {
            token: "x".to_string()
        }
    );

    let error = parse_source("print(1);").unwrap_err();
    assert_eq!(error.get_error_name(), "UnknownTopLevelStatement");

    let error = parse_source("return a + b;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnknownTopLevelStatement");

    let error = parse_source("{}").unwrap_err();
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnknownTopLevelStatement {
            token: "{".to_string()
        }
    );
}

#[test]
fn test_expression_statement_must_be_call() {
    let error = parse_source("int main() { x + 1; }").unwrap_err();
    assert_eq!(*error.get_impl(), ErrorImpl::ExpectedCallStatement);
    assert_eq!(error.get_position().row, 0);
    assert_eq!(error.get_position().col, 13);

    let error = parse_source("int main() { a.b; }").unwrap_err();
    assert_eq!(*error.get_impl(), ErrorImpl::ExpectedCallStatement);
}

#[test]
fn test_missing_comma_in_arguments() {
    let error = parse_source("int x = f(1 2);").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().col, 12);
}

#[test]
fn test_unclosed_argument_list() {
    let error = parse_source("int x = f(1, 2").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_missing_semicolon() {
    let error = parse_source("int x = 1 int y = 2;").unwrap_err();

    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnexpectedTokenDetailed {
            token: "int".to_string(),
            message: "expected ';' after variable declaration".to_string(),
        }
    );
}

#[test]
fn test_unclosed_grouping() {
    let error = parse_source("int x = (1 + 2;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_unclosed_block() {
    let error = parse_source("int main() { return 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_condition_requires_parentheses() {
    let error = parse_source("int main() { while true { print(1); } }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_missing_expression() {
    let error = parse_source("int x = ;").unwrap_err();
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnexpectedTokenDetailed {
            token: ";".to_string(),
            message: "expected expression".to_string(),
        }
    );
}

#[test]
fn test_scenario_unterminated_string_fails_before_parsing() {
    let result = tokenize("string s = \"abc;".to_string(), Some("test.c".to_string()));

    let error = result.unwrap_err();
    assert_eq!(*error.get_impl(), ErrorImpl::UnterminatedString);
}

#[test]
fn test_display_canonical_form() {
    let program = parse_source("int  f( int a,int b ){return (a+b)*-a;}").unwrap();

    assert_eq!(
        program.to_string(),
        "int f(int a, int b) {\n    return (a + b) * -a;\n}\n"
    );
}

#[test]
fn test_display_else_if() {
    let source = "int f(int n) { if (n < 0) { return 0; } else if (n == 0) { return 1; } else { return 2; } }";
    let program = parse_source(source).unwrap();

    let expected = "\
int f(int n) {
    if (n < 0) {
        return 0;
    } else if (n == 0) {
        return 1;
    } else {
        return 2;
    }
}
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_round_trip() {
    let source = r#"
        string greeting = "hi\n\"there\"";
        float scale;
        int digit = 1 .x + 2.5.y;

        int fib(int n) {
            if (n < 2) { return n; }
            return fib(n - 1) + fib(n - 2);
        }

        bool check(int a, float b) {
            int count = 0;
            while (count <= a && !(b > 1.5)) {
                count = count + 1;
                log.write(count, "step");
            }
            {}
            int local(int y) { return -y; }
            if (count == a || a != 3) { return true; } else if (false) { return null; } else { return count > -local(2); }
        }
    "#;

    let first = parse_source(source).unwrap();
    let printed = first.to_string();
    let second = parse_source(&printed).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(printed, second.to_string());
    assert_eq!(tree_shape(&first), tree_shape(&second));
}

#[test]
fn test_member_of_integer_literal_reprints() {
    let first = parse_source("int y = 1 .x;").unwrap();
    let printed = first.to_string();
    assert_eq!(printed, "int y = 1 .x;\n");

    let second = parse_source(&printed).unwrap();
    assert_eq!(tree_shape(&first), tree_shape(&second));
}

#[test]
fn test_parser_cursor() {
    let tokens = tokenize("int x".to_string(), Some("test.c".to_string())).unwrap();
    let mut parser = Parser::new(tokens, Rc::new("test.c".to_string()));

    assert!(parser.matches_n(1, &[TokenKind::Identifier]));
    assert!(parser.peek_n(5).is_none());

    let error = parser.expect(TokenKind::Semicolon).unwrap_err();
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnexpectedToken {
            token: "int".to_string()
        }
    );

    parser.advance();
    parser.advance();
    assert!(!parser.has_tokens());

    // The cursor never moves past the end.
    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert_eq!(parser.advance().kind, TokenKind::EOF);

    let error = parser.expect(TokenKind::Semicolon).unwrap_err();
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::UnexpectedEof {
            expected: "expected ';'".to_string()
        }
    );
}

#[test]
fn test_parser_appends_missing_eof() {
    let parser = Parser::new(vec![], Rc::new("test.c".to_string()));

    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
    assert!(parse(vec![], Rc::new("test.c".to_string())).unwrap().is_empty());
}
