use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Builds an error for a stage that has no source position (assembly).
    pub fn without_position(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, Position::null())
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_phase(&self) -> Phase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::LeadingZero { .. }
            | ErrorImpl::InvalidStringCharacter { .. }
            | ErrorImpl::StringTooLong { .. }
            | ErrorImpl::UnterminatedString => Phase::Lexer,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::TooManyNames { .. } => Phase::Parser,
            ErrorImpl::DuplicateSymbol { .. }
            | ErrorImpl::UndeclaredName { .. }
            | ErrorImpl::WrongKind { .. }
            | ErrorImpl::NamingConflict { .. }
            | ErrorImpl::ShadowingError { .. } => Phase::Scope,
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::NumericOperatorRequiresNumericOperands { .. }
            | ErrorImpl::BooleanOperatorRequiresBooleanOperands { .. }
            | ErrorImpl::ComparisonOperatorRequiresNumericOperands { .. }
            | ErrorImpl::ConditionNotBoolean { .. }
            | ErrorImpl::AssignmentNotNumeric { .. }
            | ErrorImpl::ReturnNotNumeric { .. }
            | ErrorImpl::PrintNotNumeric { .. }
            | ErrorImpl::ArgumentNotNumeric { .. }
            | ErrorImpl::VariableNotNumeric { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. } => Phase::Type,
            ErrorImpl::CodeGeneration { .. } | ErrorImpl::CapacityError { .. } => {
                Phase::CodeGeneration
            }
            ErrorImpl::DuplicateLabel { .. } | ErrorImpl::UndefinedLabel { .. } => {
                Phase::Assembly
            }
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::LeadingZero { .. } => "LeadingZero",
            ErrorImpl::InvalidStringCharacter { .. } => "InvalidStringCharacter",
            ErrorImpl::StringTooLong { .. } => "StringTooLong",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::TooManyNames { .. } => "TooManyNames",
            ErrorImpl::DuplicateSymbol { .. } => "DuplicateSymbol",
            ErrorImpl::UndeclaredName { .. } => "UndeclaredName",
            ErrorImpl::WrongKind { .. } => "WrongKind",
            ErrorImpl::NamingConflict { .. } => "NamingConflict",
            ErrorImpl::ShadowingError { .. } => "ShadowingError",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::NumericOperatorRequiresNumericOperands { .. } => {
                "NumericOperatorRequiresNumericOperands"
            }
            ErrorImpl::BooleanOperatorRequiresBooleanOperands { .. } => {
                "BooleanOperatorRequiresBooleanOperands"
            }
            ErrorImpl::ComparisonOperatorRequiresNumericOperands { .. } => {
                "ComparisonOperatorRequiresNumericOperands"
            }
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::AssignmentNotNumeric { .. } => "AssignmentNotNumeric",
            ErrorImpl::ReturnNotNumeric { .. } => "ReturnNotNumeric",
            ErrorImpl::PrintNotNumeric { .. } => "PrintNotNumeric",
            ErrorImpl::ArgumentNotNumeric { .. } => "ArgumentNotNumeric",
            ErrorImpl::VariableNotNumeric { .. } => "VariableNotNumeric",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::CodeGeneration { .. } => "CodeGeneration",
            ErrorImpl::CapacityError { .. } => "CapacityError",
            ErrorImpl::DuplicateLabel { .. } => "DuplicateLabel",
            ErrorImpl::UndefinedLabel { .. } => "UndefinedLabel",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LeadingZero { .. } => ErrorTip::Suggestion(String::from(
                "Numbers other than 0 cannot start with a zero",
            )),
            ErrorImpl::InvalidStringCharacter { .. } | ErrorImpl::StringTooLong { .. } => {
                ErrorTip::Suggestion(String::from(
                    "Strings hold at most 15 lowercase letters, digits and spaces",
                ))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, did you miss a semicolon?", token))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::TooManyNames { .. } => ErrorTip::Suggestion(String::from(
                "Parameter, local and argument lists hold at most three entries",
            )),
            ErrorImpl::UndeclaredName { name, .. } => ErrorTip::Suggestion(format!(
                "Declare `{}` in the glob, var or local block before using it",
                name
            )),
            ErrorImpl::ShadowingError { name } => {
                ErrorTip::Suggestion(format!("Rename the local variable `{}`", name))
            }
            ErrorImpl::ConditionNotBoolean { .. } => ErrorTip::Suggestion(String::from(
                "Conditions must be a comparison (eq, >) or a boolean combination of them",
            )),
            ErrorImpl::UnexpectedArguments { expected, received }
            | ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::CapacityError { .. } => ErrorTip::Suggestion(String::from(
                "The target language only has a limited set of variable names and line numbers",
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Error: {}", self.get_phase(), self.internal_error)?;
        if !self.position.is_null() {
            write!(f, " at {}", self.position)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// The compilation stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Parser,
    Scope,
    Type,
    CodeGeneration,
    Assembly,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Lexer => write!(f, "Lexer"),
            Phase::Parser => write!(f, "Parse"),
            Phase::Scope => write!(f, "Scope"),
            Phase::Type => write!(f, "Type"),
            Phase::CodeGeneration => write!(f, "Code Generation"),
            Phase::Assembly => write!(f, "Assembly"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexer
    #[error("Unexpected character '{token}'")]
    UnrecognisedToken { token: String },
    #[error("Invalid number {token}: leading zero not allowed")]
    LeadingZero { token: String },
    #[error("Invalid character '{character}' in string")]
    InvalidStringCharacter { character: char },
    #[error("String exceeds maximum length of 15: \"{value}\"")]
    StringTooLong { value: String },
    #[error("Unterminated string")]
    UnterminatedString,

    // Parser
    #[error("Unexpected token '{token}'")]
    UnexpectedToken { token: String },
    #[error("Unexpected token '{token}', {message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("Invalid number '{token}'")]
    NumberParseError { token: String },
    #[error("Too many {what}: at most three are allowed")]
    TooManyNames { what: String },

    // Scope
    #[error("Duplicate symbol {name} in {scope} scope")]
    DuplicateSymbol { name: String, scope: String },
    #[error("Undeclared {kind}: {name}")]
    UndeclaredName { name: String, kind: String },
    #[error("'{name}' is a {found}, not a {expected}")]
    WrongKind { name: String, found: String, expected: String },
    #[error("Naming error: {first_kind} '{name}' conflicts with {second_kind} name")]
    NamingConflict { name: String, first_kind: String, second_kind: String },
    #[error("Shadowing of parameter '{name}' by local variable declaration")]
    ShadowingError { name: String },

    // Type
    #[error("Type mismatch: {operator} operator with {operand} operand")]
    TypeMismatch { operator: String, operand: String },
    #[error("Numeric operator '{operator}' requires numeric operands")]
    NumericOperatorRequiresNumericOperands { operator: String },
    #[error("Boolean operator '{operator}' requires boolean operands")]
    BooleanOperatorRequiresBooleanOperands { operator: String },
    #[error("Comparison operator '{operator}' requires numeric operands")]
    ComparisonOperatorRequiresNumericOperands { operator: String },
    #[error("{construct} condition must be boolean, but got {found}")]
    ConditionNotBoolean { construct: String, found: String },
    #[error("Assignment requires numeric type, but got {found}")]
    AssignmentNotNumeric { found: String },
    #[error("Return value must be numeric, but got {found}")]
    ReturnNotNumeric { found: String },
    #[error("Print output must be numeric or string, but got {found}")]
    PrintNotNumeric { found: String },
    #[error("Function/procedure argument must be numeric, but got {found}")]
    ArgumentNotNumeric { found: String },
    #[error("Expected numeric variable, but '{name}' is {found}")]
    VariableNotNumeric { name: String, found: String },
    #[error("'{name}' is {found}, not a procedure/function")]
    NotCallable { name: String, found: String },
    #[error("Unexpected arguments: expected {expected}, received {received}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("Missing arguments: expected {expected}, received {received}")]
    MissingArguments { expected: usize, received: usize },

    // Code generation
    #[error("{message}")]
    CodeGeneration { message: String },
    #[error("{message}")]
    CapacityError { message: String },

    // Assembly
    #[error("Duplicate definition for label: {label}")]
    DuplicateLabel { label: String },
    #[error("Undefined label reference: {label}")]
    UndefinedLabel { label: String },
}

/// Outcome of an accumulating analysis pass (scope or type).
///
/// The pass keeps going after a failure so that every diagnostic of a run is
/// reported at once; `success` is true exactly when `errors` is empty.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub success: bool,
    pub errors: Vec<Error>,
}

impl AnalysisResult {
    pub fn from_errors(errors: Vec<Error>) -> Self {
        AnalysisResult {
            success: errors.is_empty(),
            errors,
        }
    }

    /// The diagnostics rendered as strings, in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }
}
