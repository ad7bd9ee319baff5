//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts SPL source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered regex pattern table
//! - Recognition of keywords, identifiers, numbers and string literals
//! - Line and column tracking for error reporting

pub mod lexer;
pub mod tokens;
