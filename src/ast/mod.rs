/// AST (Abstract Syntax Tree) module
/// Contains the explicit tree the parser builds and every later pass walks
///
/// Submodules:
/// - ast: Program-level nodes (declarations, definitions, main)
/// - expressions: Atoms and terms
/// - statements: Instructions and calls
pub mod ast;
pub mod expressions;
pub mod statements;
