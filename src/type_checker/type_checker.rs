use std::{collections::HashMap, fmt::Display};

use crate::{
    ast::{
        ast::{Definition, Program},
        expressions::{Atom, BinaryOp, Term, UnaryOp, VarRef},
        statements::{Call, Instr, InstrKind, Output},
    },
    errors::errors::{AnalysisResult, Error, ErrorImpl},
    scope::symbols::{Symbol, SymbolKind, SymbolTable},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Numeric,
    Boolean,
    Typeless,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Numeric => write!(f, "numeric"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Typeless => write!(f, "type-less"),
        }
    }
}

/// Storage key of every symbol mapped to its fixed type.
pub type TypeTable = HashMap<String, DataType>;

pub struct TypeChecker<'a> {
    symbols: &'a SymbolTable,
    /// Parameter count of every procedure and function.
    arity: HashMap<&'a str, usize>,
    /// Name of the definition being checked, `None` in main.
    context: Option<&'a str>,
    pub types: TypeTable,
    pub errors: Vec<Error>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(program: &'a Program, symbols: &'a SymbolTable) -> Self {
        let arity = program
            .definitions()
            .map(|definition| (definition.name.as_str(), definition.parameters.len()))
            .collect();

        let types = symbols
            .iter()
            .map(|symbol| (symbol.storage_key(), symbol.declared_type))
            .collect();

        TypeChecker {
            symbols,
            arity,
            context: None,
            types,
            errors: vec![],
        }
    }

    fn lookup_variable(&self, var: &VarRef) -> Result<&'a Symbol, Error> {
        self.symbols
            .resolve(&var.name, self.context, SymbolKind::Variable, var.span.start)
    }

    pub fn infer_atom(&self, atom: &Atom) -> Result<DataType, Error> {
        match atom {
            Atom::Number { .. } => Ok(DataType::Numeric),
            Atom::Variable(var) => Ok(self.lookup_variable(var)?.declared_type),
        }
    }

    /// Infers the type of a term following the operator table:
    ///
    /// | operator                | operands         | result  |
    /// |-------------------------|------------------|---------|
    /// | neg                     | numeric          | numeric |
    /// | not                     | boolean          | boolean |
    /// | plus, minus, mult, div  | numeric, numeric | numeric |
    /// | or, and                 | boolean, boolean | boolean |
    /// | eq, >                   | numeric, numeric | boolean |
    pub fn infer_term(&self, term: &Term) -> Result<DataType, Error> {
        match term {
            Term::Atom(atom) => self.infer_atom(atom),
            Term::Unary { op, operand, span } => {
                let operand_type = self.infer_term(operand)?;
                let (required, result) = match op {
                    UnaryOp::Neg => (DataType::Numeric, DataType::Numeric),
                    UnaryOp::Not => (DataType::Boolean, DataType::Boolean),
                };

                if operand_type != required {
                    return Err(Error::new(
                        ErrorImpl::TypeMismatch {
                            operator: op.to_string(),
                            operand: operand_type.to_string(),
                        },
                        span.start,
                    ));
                }

                Ok(result)
            }
            Term::Binary {
                op,
                left,
                right,
                span,
            } => {
                let left_type = self.infer_term(left)?;
                let right_type = self.infer_term(right)?;
                let operator = op.to_string();

                let (required, result, error) = match op {
                    BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Mult | BinaryOp::Div => (
                        DataType::Numeric,
                        DataType::Numeric,
                        ErrorImpl::NumericOperatorRequiresNumericOperands { operator },
                    ),
                    BinaryOp::Or | BinaryOp::And => (
                        DataType::Boolean,
                        DataType::Boolean,
                        ErrorImpl::BooleanOperatorRequiresBooleanOperands { operator },
                    ),
                    BinaryOp::Eq | BinaryOp::Gt => (
                        DataType::Numeric,
                        DataType::Boolean,
                        ErrorImpl::ComparisonOperatorRequiresNumericOperands { operator },
                    ),
                };

                if left_type != required || right_type != required {
                    return Err(Error::new(error, span.start));
                }

                Ok(result)
            }
        }
    }

    fn check_condition(&mut self, construct: &str, condition: &Term) {
        match self.infer_term(condition) {
            Ok(DataType::Boolean) => {}
            Ok(found) => self.errors.push(Error::new(
                ErrorImpl::ConditionNotBoolean {
                    construct: String::from(construct),
                    found: found.to_string(),
                },
                condition.get_span().start,
            )),
            Err(error) => self.errors.push(error),
        }
    }

    fn check_numeric_atom(&mut self, atom: &Atom, make_error: fn(String) -> ErrorImpl) {
        match self.infer_atom(atom) {
            Ok(DataType::Numeric) => {}
            Ok(found) => self
                .errors
                .push(Error::new(make_error(found.to_string()), atom.get_span().start)),
            Err(error) => self.errors.push(error),
        }
    }

    fn check_target(&mut self, target: &VarRef) {
        match self.lookup_variable(target) {
            Ok(symbol) if symbol.declared_type == DataType::Numeric => {}
            Ok(symbol) => self.errors.push(Error::new(
                ErrorImpl::VariableNotNumeric {
                    name: target.name.clone(),
                    found: symbol.declared_type.to_string(),
                },
                target.span.start,
            )),
            Err(error) => self.errors.push(error),
        }
    }

    fn check_call(&mut self, call: &Call) {
        let position: Position = call.span.start;
        let symbols = self.symbols;

        match symbols.lookup_callable(&call.name) {
            Some(symbol) if symbol.declared_type == DataType::Typeless => {}
            Some(symbol) => self.errors.push(Error::new(
                ErrorImpl::NotCallable {
                    name: call.name.clone(),
                    found: format!("a {} ({})", symbol.kind, symbol.declared_type),
                },
                position,
            )),
            None => {
                let found = match symbols.lookup_variable(&call.name, self.context) {
                    Some(symbol) => format!("a {} ({})", symbol.kind, symbol.declared_type),
                    None => String::from("undeclared"),
                };
                self.errors.push(Error::new(
                    ErrorImpl::NotCallable {
                        name: call.name.clone(),
                        found,
                    },
                    position,
                ));
                return;
            }
        }

        for argument in &call.arguments {
            self.check_numeric_atom(argument, |found| ErrorImpl::ArgumentNotNumeric { found });
        }

        if let Some(&expected) = self.arity.get(call.name.as_str()) {
            let received = call.arguments.len();
            if received > expected {
                self.errors.push(Error::new(
                    ErrorImpl::UnexpectedArguments { expected, received },
                    position,
                ));
            } else if received < expected {
                self.errors.push(Error::new(
                    ErrorImpl::MissingArguments { expected, received },
                    position,
                ));
            }
        }
    }

    pub fn check_instr(&mut self, instr: &Instr) {
        match &instr.kind {
            InstrKind::Halt => {}
            InstrKind::Print(Output::Text(_)) => {}
            InstrKind::Print(Output::Atom(atom)) => {
                self.check_numeric_atom(atom, |found| ErrorImpl::PrintNotNumeric { found })
            }
            InstrKind::Call(call) => self.check_call(call),
            InstrKind::Assign { target, value } => {
                self.check_target(target);
                match self.infer_term(value) {
                    Ok(DataType::Numeric) => {}
                    Ok(found) => self.errors.push(Error::new(
                        ErrorImpl::AssignmentNotNumeric {
                            found: found.to_string(),
                        },
                        value.get_span().start,
                    )),
                    Err(error) => self.errors.push(error),
                }
            }
            InstrKind::AssignCall { target, call } => {
                self.check_target(target);
                self.check_call(call);
            }
            InstrKind::While { condition, body } => {
                self.check_condition("While", condition);
                self.check_body(body);
            }
            InstrKind::DoUntil { body, condition } => {
                self.check_body(body);
                self.check_condition("Until", condition);
            }
            InstrKind::If {
                condition,
                then_body,
                else_body,
            } => {
                self.check_condition("If", condition);
                self.check_body(then_body);
                if let Some(else_body) = else_body {
                    self.check_body(else_body);
                }
            }
        }
    }

    pub fn check_body(&mut self, body: &[Instr]) {
        for instr in body {
            self.check_instr(instr);
        }
    }

    fn check_definition(&mut self, definition: &'a Definition) {
        self.context = Some(definition.name.as_str());

        self.check_body(&definition.body);
        if let Some(return_value) = &definition.return_value {
            self.check_numeric_atom(return_value, |found| ErrorImpl::ReturnNotNumeric { found });
        }

        self.context = None;
    }

    pub fn check_program(&mut self, program: &'a Program) {
        for definition in program.definitions() {
            self.check_definition(definition);
        }

        self.check_body(&program.main.body);
    }
}

/// Type checks `program` against the resolved symbol table.
///
/// Expects scope analysis to have succeeded; a name the table cannot resolve
/// is reported rather than assumed.
pub fn type_check(program: &Program, symbols: &SymbolTable) -> (TypeTable, AnalysisResult) {
    let mut checker = TypeChecker::new(program, symbols);
    checker.check_program(program);

    (checker.types, AnalysisResult::from_errors(checker.errors))
}
