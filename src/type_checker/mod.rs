//! Type checking module.
//!
//! Runs after scope analysis over the same tree and symbol table. It:
//!
//! - Infers a numeric or boolean type for every term
//! - Checks that conditions are boolean and that assignments, prints,
//!   arguments and return values are numeric
//! - Checks that callees are procedures or functions and that calls pass
//!   as many arguments as the callee declares
//!
//! Every diagnostic is collected; checking does not stop at the first one.

pub mod type_checker;
