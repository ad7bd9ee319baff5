//! Code generation module for the compiler.
//!
//! Lowers a checked program to target instructions with symbolic labels.
//! It handles:
//!
//! - Mapping storage keys to target variable names
//! - Short-circuit lowering of boolean conditions to jumps
//! - Layout of subroutines, calls and function results

pub mod allocator;
pub mod compiler;
pub mod expr;
pub mod instruction;
pub mod stmt;

#[cfg(test)]
mod tests;
