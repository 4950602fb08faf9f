/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the program tree
///
/// Submodules:
/// - ast: The `Expr` and `Stmt` sum types and the `Program` root
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - types: Written type names and the structural types they resolve to
///
/// Every node implements `Display`, printing it back as source text.
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
