/// NOSJ value tree types.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// NOSJ parser: converts source text into a value tree.
pub mod parser;
