//! Two-pass assembler.
//!
//! Numbers the instruction stream, records where every label lives, then
//! rewrites each symbolic jump target to its line number.

pub mod assembler;
pub mod label_map;

#[cfg(test)]
mod tests;
