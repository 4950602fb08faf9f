use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryExpr, CallExpr, MemberExpr, PrefixExpr},
        statements::{BlockStmt, FnDeclStmt, VarDeclStmt},
        types::{FunctionType, SymbolType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

/// A single scope frame.
///
/// Frames live in the checker's arena and point at their parent by index.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Type>,
    pub type_lookup: HashMap<String, Type>,
    pub parent: Option<usize>,
}

impl Environment {
    pub fn new(parent: Option<usize>) -> Self {
        Environment {
            variable_lookup: HashMap::new(),
            type_lookup: HashMap::new(),
            parent,
        }
    }

    /// Binds `variable_name` in this frame. A second binding of the same name
    /// is rejected and the first one is kept.
    pub fn declare_variable(&mut self, variable_name: &str, variable_type: Type, current_position: Position) -> Result<(), Error> {
        if self.variable_lookup.contains_key(variable_name) {
            Err(Error::new(ErrorImpl::VariableAlreadyDeclared { variable: variable_name.to_string() }, current_position))
        } else {
            self.variable_lookup.insert(variable_name.to_string(), variable_type);
            Ok(())
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&Type> {
        self.variable_lookup.get(variable_name)
    }

    pub fn get_type(&self, type_name: &str) -> Option<&Type> {
        self.type_lookup.get(type_name)
    }
}

/// Collects type errors over a whole program.
///
/// Type errors never stop the checker. Each one is recorded in `errors` and
/// checking carries on with the next node. A node whose type could not be
/// determined makes its parents fail without adding further errors.
#[derive(Debug)]
pub struct TypeChecker {
    pub environments: Vec<Environment>,
    pub errors: Vec<Error>,
    current_environment: usize,
    return_types: Vec<Type>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    /// Creates a checker whose root frame knows the primitive types.
    pub fn new() -> Self {
        let mut root = Environment::new(None);

        for (name, ty) in [
            ("bool", Type::Bool),
            ("float", Type::Float),
            ("int", Type::Int),
            ("string", Type::String),
        ] {
            root.type_lookup.insert(name.to_string(), ty);
        }

        TypeChecker {
            environments: vec![root],
            errors: vec![],
            current_environment: 0,
            return_types: vec![],
        }
    }

    /// Binds a name in the root frame, e.g. a host-provided function.
    pub fn declare_global(&mut self, name: &str, ty: Type) {
        self.environments[0].variable_lookup.insert(name.to_string(), ty);
    }

    /// Makes a type name resolvable in the root frame.
    pub fn declare_type(&mut self, name: &str, ty: Type) {
        self.environments[0].type_lookup.insert(name.to_string(), ty);
    }

    pub fn get_current_environment(&mut self) -> &mut Environment {
        &mut self.environments[self.current_environment]
    }

    pub fn enter_scope(&mut self) {
        self.environments.push(Environment::new(Some(self.current_environment)));
        self.current_environment = self.environments.len() - 1;
        trace!(depth = self.environments.len(), "entered scope");
    }

    /// Leaves the innermost scope. Frames are pushed and popped in strict
    /// nesting order, so the innermost frame is always the last one.
    pub fn exit_scope(&mut self) {
        if let Some(environment) = self.environments.pop() {
            self.current_environment = environment.parent.unwrap_or(0);
        }
        trace!(depth = self.environments.len(), "exited scope");
    }

    /// Resolves a variable through the scope chain, innermost frame first.
    pub fn fetch_variable_type(&self, variable: &str) -> Option<Type> {
        let mut index = Some(self.current_environment);

        while let Some(current) = index {
            let environment = &self.environments[current];
            if let Some(ty) = environment.get_variable(variable) {
                return Some(ty.clone());
            }
            index = environment.parent;
        }

        None
    }

    /// Resolves a type name through the scope chain, innermost frame first.
    pub fn fetch_type(&self, type_name: &str) -> Option<Type> {
        let mut index = Some(self.current_environment);

        while let Some(current) = index {
            let environment = &self.environments[current];
            if let Some(ty) = environment.get_type(type_name) {
                return Some(ty.clone());
            }
            index = environment.parent;
        }

        None
    }

    fn report(&mut self, error: ErrorImpl, position: Position) {
        let error = Error::new(error, position);
        debug!(error = %error, "type error");
        self.errors.push(error);
    }

    fn record(&mut self, result: Result<(), Error>) {
        if let Err(error) = result {
            debug!(error = %error, "type error");
            self.errors.push(error);
        }
    }

    fn convert_type(&mut self, symbol: &SymbolType, report: bool) -> Option<Type> {
        let ty = self.fetch_type(&symbol.name);

        if ty.is_none() && report {
            self.report(ErrorImpl::UnknownType { type_: symbol.name.clone() }, symbol.get_position());
        }

        ty
    }

    /// Resolves every type in a function signature. Returns `None` if any of
    /// them is unknown.
    fn convert_signature(&mut self, function: &FnDeclStmt, report: bool) -> Option<FunctionType> {
        let return_type = self.convert_type(&function.return_type, report);
        let parameters: Vec<Option<Type>> = function
            .parameters
            .iter()
            .map(|(_, ty)| self.convert_type(ty, report))
            .collect();

        Some(FunctionType::new(return_type?, parameters.into_iter().collect::<Option<Vec<Type>>>()?))
    }

    fn declare_function(&mut self, function: &FnDeclStmt, signature: FunctionType) {
        if self.get_current_environment().get_variable(&function.identifier).is_some() {
            self.report(
                ErrorImpl::FunctionAlreadyDeclared { function: function.identifier.clone() },
                function.span.start.clone(),
            );
        } else {
            self.get_current_environment()
                .variable_lookup
                .insert(function.identifier.clone(), Type::Function(signature));
        }
    }

    /// Checks a whole program and returns whether it is well typed.
    ///
    /// Top-level signatures and variables are registered first, so functions
    /// can refer to each other regardless of order. Bodies are checked in a
    /// second pass.
    pub fn check_program(&mut self, program: &Program) -> bool {
        let errors_before = self.errors.len();

        for stmt in program.iter() {
            match stmt {
                Stmt::FnDecl(function) => {
                    if let Some(signature) = self.convert_signature(function, true) {
                        self.declare_function(function, signature);
                    }
                }
                Stmt::VarDecl(variable) => {
                    if let Some(ty) = self.convert_type(&variable.explicit_type, true) {
                        let result = self.get_current_environment().declare_variable(
                            &variable.identifier,
                            ty,
                            variable.span.start.clone(),
                        );
                        self.record(result);
                    }
                }
                _ => {}
            }
        }

        for stmt in program.iter() {
            match stmt {
                Stmt::FnDecl(function) => self.check_fn(function),
                Stmt::VarDecl(variable) => {
                    let ty = self.convert_type(&variable.explicit_type, false);
                    if let Some(value) = &variable.assigned_value {
                        self.is_type(value, ty.as_ref());
                    }
                }
                other => self.check_stmt(other, None, false),
            }
        }

        let found = self.errors.len() - errors_before;
        debug!(statements = program.len(), errors = found, "type checked program");

        found == 0
    }

    /// Checks a function body in a frame holding its parameters.
    ///
    /// The function must already be bound by the caller. A signature with an
    /// unknown type leaves the body unchecked.
    fn check_fn(&mut self, function: &FnDeclStmt) {
        let Some(signature) = self.convert_signature(function, false) else {
            return;
        };

        self.enter_scope();

        for ((name, symbol), ty) in function.parameters.iter().zip(signature.parameters) {
            let result = self.get_current_environment().declare_variable(name, ty, symbol.get_position());
            self.record(result);
        }

        let return_type = *signature.return_type;
        self.return_types.push(return_type.clone());
        self.check_block(&function.body, Some(&return_type));
        self.return_types.pop();

        self.exit_scope();
    }

    /// Checks a block in its own frame.
    ///
    /// `expected` is forwarded to nested blocks unchanged and applies to a
    /// call in the last position.
    pub fn check_block(&mut self, block: &BlockStmt, expected: Option<&Type>) {
        self.enter_scope();

        let last = block.body.len().saturating_sub(1);
        for (index, stmt) in block.iter().enumerate() {
            self.check_stmt(stmt, expected, index == last);
        }

        self.exit_scope();
    }

    pub fn check_stmt(&mut self, stmt: &Stmt, expected: Option<&Type>, is_final: bool) {
        match stmt {
            Stmt::Expression(stmt) => {
                self.is_type(&stmt.expression, if is_final { expected } else { None });
            }
            Stmt::Block(block) => self.check_block(block, expected),
            Stmt::VarDecl(variable) => self.check_var_decl(variable),
            Stmt::FnDecl(function) => {
                if let Some(signature) = self.convert_signature(function, true) {
                    self.declare_function(function, signature);
                    self.check_fn(function);
                }
            }
            Stmt::Assign(assignment) => match self.fetch_variable_type(&assignment.identifier) {
                Some(ty) => {
                    self.is_type(&assignment.value, Some(&ty));
                }
                None => {
                    self.report(
                        ErrorImpl::VariableNotDeclared { variable: assignment.identifier.clone() },
                        assignment.span.start.clone(),
                    );
                    self.get_type(&assignment.value);
                }
            },
            Stmt::Return(stmt) => {
                let return_type = self.return_types.last().cloned();
                self.is_type(&stmt.value, return_type.as_ref());
            }
            Stmt::If(stmt) => {
                self.is_type(&stmt.condition, Some(&Type::Bool));
                self.check_block(&stmt.then_body, expected);
                if let Some(else_body) = &stmt.else_body {
                    self.check_block(else_body, expected);
                }
            }
            Stmt::While(stmt) => {
                self.is_type(&stmt.condition, Some(&Type::Bool));
                self.check_block(&stmt.body, expected);
            }
        }
    }

    // The initializer is checked before the name is bound, so `int x = x;`
    // refers to an outer `x`.
    fn check_var_decl(&mut self, variable: &VarDeclStmt) {
        let ty = self.convert_type(&variable.explicit_type, true);

        if let Some(value) = &variable.assigned_value {
            self.is_type(value, ty.as_ref());
        }

        if let Some(ty) = ty {
            let result = self.get_current_environment().declare_variable(
                &variable.identifier,
                ty,
                variable.span.start.clone(),
            );
            self.record(result);
        }
    }

    /// Checks `expr` against `expected`. With no expectation, any well-typed
    /// expression passes.
    pub fn is_type(&mut self, expr: &Expr, expected: Option<&Type>) -> bool {
        let Some(actual) = self.get_type(expr) else {
            return false;
        };

        match expected {
            Some(expected) if *expected != actual => {
                self.report(
                    ErrorImpl::TypeMatchError {
                        expected: expected.to_string(),
                        received: actual.to_string(),
                    },
                    expr.get_span().start.clone(),
                );
                false
            }
            _ => true,
        }
    }

    /// Infers the type of `expr`, recording an error and returning `None` if it
    /// has none.
    pub fn get_type(&mut self, expr: &Expr) -> Option<Type> {
        match expr {
            Expr::Boolean(_) => Some(Type::Bool),
            Expr::Number(number) => Some(if number.is_float() { Type::Float } else { Type::Int }),
            Expr::String(_) => Some(Type::String),
            Expr::Null(_) => Some(Type::Null),
            Expr::Symbol(symbol) => {
                let ty = self.fetch_variable_type(&symbol.value);
                if ty.is_none() {
                    self.report(
                        ErrorImpl::VariableNotDeclared { variable: symbol.value.clone() },
                        symbol.span.start.clone(),
                    );
                }
                ty
            }
            Expr::Grouping(group) => self.get_type(&group.expression),
            Expr::Prefix(prefix) => self.get_prefix_type(prefix),
            Expr::Binary(binary) => self.get_binary_type(binary),
            Expr::Member(member) => self.get_member_type(member),
            Expr::Call(call) => self.get_call_type(call),
        }
    }

    fn get_prefix_type(&mut self, prefix: &PrefixExpr) -> Option<Type> {
        let operand = self.get_type(&prefix.right_expr)?;

        let valid = match prefix.operator.kind {
            TokenKind::Not => operand == Type::Bool,
            TokenKind::Dash => operand.is_numeric(),
            _ => {
                self.report(
                    ErrorImpl::InternalError {
                        message: format!("Unknown prefix operator `{}`", prefix.operator.value),
                    },
                    prefix.operator.span.start.clone(),
                );
                return None;
            }
        };

        if !valid {
            self.report(
                ErrorImpl::InvalidOperand {
                    operator: prefix.operator.value.clone(),
                    operand: operand.to_string(),
                },
                prefix.span.start.clone(),
            );
            return None;
        }

        Some(operand)
    }

    fn get_binary_type(&mut self, binary: &BinaryExpr) -> Option<Type> {
        let left = self.get_type(&binary.left);
        let right = self.get_type(&binary.right);
        let (left, right) = (left?, right?);

        let result = match binary.operator.kind {
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash => {
                (left == right && left.is_numeric()).then(|| left.clone())
            }
            TokenKind::Greater | TokenKind::GreaterEquals | TokenKind::Less | TokenKind::LessEquals => {
                (left == right && left.is_numeric()).then_some(Type::Bool)
            }
            TokenKind::Equals | TokenKind::NotEquals => (left == right
                && matches!(left, Type::Int | Type::Float | Type::Bool | Type::String))
            .then_some(Type::Bool),
            TokenKind::And | TokenKind::Or => {
                (left == Type::Bool && right == Type::Bool).then_some(Type::Bool)
            }
            _ => {
                self.report(
                    ErrorImpl::InternalError {
                        message: format!("Unknown binary operator `{}`", binary.operator.value),
                    },
                    binary.operator.span.start.clone(),
                );
                return None;
            }
        };

        if result.is_none() {
            self.report(
                ErrorImpl::InvalidOperands {
                    operator: binary.operator.value.clone(),
                    left: left.to_string(),
                    right: right.to_string(),
                },
                binary.operator.span.start.clone(),
            );
        }

        result
    }

    fn get_member_type(&mut self, member: &MemberExpr) -> Option<Type> {
        let parent = self.get_type(&member.parent)?;

        if !matches!(parent, Type::Compound(_)) {
            self.report(
                ErrorImpl::InvalidMemberAccess { received: parent.to_string() },
                member.member_position.clone(),
            );
            return None;
        }

        let ty = parent.get_property_type(&member.member).cloned();
        if ty.is_none() {
            self.report(
                ErrorImpl::UnknownMember {
                    member: member.member.clone(),
                    received: parent.to_string(),
                },
                member.member_position.clone(),
            );
        }

        ty
    }

    /// Checks a call site: the callee must be a function, the argument count
    /// must match and every argument must have its parameter's type.
    fn get_call_type(&mut self, call: &CallExpr) -> Option<Type> {
        let callee = self.get_type(&call.callee);
        let arguments: Vec<Option<Type>> = call.arguments.iter().map(|argument| self.get_type(argument)).collect();

        let function = match callee? {
            Type::Function(function) => function,
            other => {
                self.report(
                    ErrorImpl::NotCallable { received: other.to_string() },
                    call.callee.get_span().start.clone(),
                );
                return None;
            }
        };

        let expected = function.parameters.len();
        let received = arguments.len();
        let mut valid = true;

        if received > expected {
            self.report(
                ErrorImpl::UnexpectedArguments { expected, received },
                call.arguments[expected].get_span().start.clone(),
            );
            valid = false;
        } else if received < expected {
            self.report(
                ErrorImpl::MissingArguments { expected, received },
                call.span.end.clone(),
            );
            valid = false;
        }

        for ((parameter, argument), expr) in function.parameters.iter().zip(&arguments).zip(&call.arguments) {
            match argument {
                Some(argument) if argument != parameter => {
                    self.report(
                        ErrorImpl::ArgumentTypeMatchError {
                            expected: parameter.to_string(),
                            received: argument.to_string(),
                        },
                        expr.get_span().start.clone(),
                    );
                    valid = false;
                }
                Some(_) => {}
                None => valid = false,
            }
        }

        if valid {
            Some(*function.return_type)
        } else {
            None
        }
    }
}

/// Type checks a program, returning the checker with its collected errors and
/// whether the program is well typed.
pub fn type_check(program: &Program) -> (TypeChecker, bool) {
    let mut type_checker = TypeChecker::new();
    let passed = type_checker.check_program(program);

    (type_checker, passed)
}

/// Type checks a program, printing one line per type error.
pub fn check(program: &Program) -> bool {
    let (type_checker, passed) = type_check(program);

    for error in &type_checker.errors {
        println!("{}", error);
    }

    passed
}
