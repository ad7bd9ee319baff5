//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for every compilation phase
//! - The accumulating `AnalysisResult` returned by the scope and type passes
//! - Helpful error messages and suggestions

pub mod errors;
