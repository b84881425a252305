/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: Expression nodes, operators and literals
/// - statements: Statement nodes and blocks
/// - types: The structural type algebra used for annotations and checking
pub mod expressions;
pub mod statements;
pub mod types;
