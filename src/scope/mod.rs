//! Scope analysis.
//!
//! Builds the symbol table shared by the later passes and checks that every
//! name resolves to exactly one visible declaration.

pub mod scope_resolver;
pub mod symbols;

#[cfg(test)]
mod tests;
