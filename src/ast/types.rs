//! Type system definitions for the AST.
//!
//! This module defines two things:
//!
//! - `SymbolType`, a type name as written in the source (`int`, `float`, ...)
//! - `Type`, the structural type values the type checker resolves those names to
//!
//! Types are values, not declarations: two compound types with the same fields
//! compare equal.

use std::{collections::BTreeMap, fmt::Display};

use crate::Position;

/// A type name written in a declaration, resolved later by the type checker.
#[derive(Debug, Clone)]
pub struct SymbolType {
    pub name: String,
    pub position: Position,
}

impl SymbolType {
    pub fn get_position(&self) -> Position {
        self.position.clone()
    }
}

impl Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    Int,
    Float,
    String,
    /// Type of the `null` literal. It is not assignable to any other type.
    Null,
    Function(FunctionType),
    Compound(CompoundType),
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// Returns the type of a member, if this is a compound type that has it.
    pub fn get_property_type(&self, property: &str) -> Option<&Type> {
        match self {
            Type::Compound(compound) => compound.fields.get(property),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Null => write!(f, "null"),
            Type::Function(function) => write!(f, "{}", function),
            Type::Compound(compound) => write!(f, "{}", compound),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub return_type: Box<Type>,
    pub parameters: Vec<Type>,
}

impl FunctionType {
    pub fn new(return_type: Type, parameters: Vec<Type>) -> Self {
        FunctionType {
            return_type: Box::new(return_type),
            parameters,
        }
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{}({})", self.return_type, parameters)
    }
}

/// A structural record type, accessed with `.`.
///
/// Fields are kept ordered so that display output is stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundType {
    pub fields: BTreeMap<String, Type>,
}

impl CompoundType {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Type)>,
        S: Into<String>,
    {
        CompoundType {
            fields: fields.into_iter().map(|(name, ty)| (name.into(), ty)).collect(),
        }
    }
}

impl Display for CompoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{{ {} }}", fields)
    }
}
