//! Parser module for building the program tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into the explicit tree every later pass walks. It handles:
//!
//! - The fixed program layout (glob, proc, func, main sections)
//! - Procedure and function definitions with their parameter and local lists
//! - Instruction parsing dispatched through a handler lookup table
//! - Fully parenthesised terms
//!
//! Parsing stops at the first error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
