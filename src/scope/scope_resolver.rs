use std::collections::BTreeMap;

use crate::{
    ast::{
        ast::{Definition, DefinitionKind, Program},
        expressions::{Atom, Term, VarRef},
        statements::{Call, Instr, InstrKind, Output},
    },
    errors::errors::{AnalysisResult, Error, ErrorImpl},
    Position,
};

use super::symbols::{Scope, Symbol, SymbolKind, SymbolTable};

/// Walks the program once, building the symbol table and collecting every
/// scope diagnostic on the way.
pub struct ScopeResolver {
    pub table: SymbolTable,
    pub errors: Vec<Error>,
    /// Name of the definition whose body is being visited, `None` in main.
    current_context: Option<String>,
}

impl ScopeResolver {
    pub fn new() -> Self {
        ScopeResolver {
            table: SymbolTable::new(),
            errors: vec![],
            current_context: None,
        }
    }

    fn report(&mut self, result: Result<(), Error>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                self.errors.push(error);
                false
            }
        }
    }

    fn declare(&mut self, name: &str, kind: SymbolKind, scope: Scope, position: Position) -> bool {
        let symbol = Symbol::new(name, kind, scope, self.current_context.as_deref(), position);
        let result = self.table.declare(symbol);
        self.report(result)
    }

    fn resolve(&mut self, name: &str, expected: SymbolKind, position: Position) {
        let result = self
            .table
            .resolve(name, self.current_context.as_deref(), expected, position)
            .map(|_| ());
        self.report(result);
    }

    fn resolve_var(&mut self, var: &VarRef) {
        self.resolve(&var.name, SymbolKind::Variable, var.span.start);
    }

    fn resolve_atom(&mut self, atom: &Atom) {
        if let Atom::Variable(var) = atom {
            self.resolve_var(var);
        }
    }

    fn resolve_term(&mut self, term: &Term) {
        match term {
            Term::Atom(atom) => self.resolve_atom(atom),
            Term::Unary { operand, .. } => self.resolve_term(operand),
            Term::Binary { left, right, .. } => {
                self.resolve_term(left);
                self.resolve_term(right);
            }
        }
    }

    fn resolve_call(&mut self, call: &Call, expected: SymbolKind) {
        self.resolve(&call.name, expected, call.span.start);
        for argument in &call.arguments {
            self.resolve_atom(argument);
        }
    }

    fn resolve_body(&mut self, body: &[Instr]) {
        for instr in body {
            self.resolve_instr(instr);
        }
    }

    fn resolve_instr(&mut self, instr: &Instr) {
        match &instr.kind {
            InstrKind::Halt => {}
            InstrKind::Print(Output::Text(_)) => {}
            InstrKind::Print(Output::Atom(atom)) => self.resolve_atom(atom),
            InstrKind::Call(call) => self.resolve_call(call, SymbolKind::Procedure),
            InstrKind::Assign { target, value } => {
                self.resolve_var(target);
                self.resolve_term(value);
            }
            InstrKind::AssignCall { target, call } => {
                self.resolve_var(target);
                self.resolve_call(call, SymbolKind::Function);
            }
            InstrKind::While { condition, body } | InstrKind::DoUntil { body, condition } => {
                self.resolve_term(condition);
                self.resolve_body(body);
            }
            InstrKind::If {
                condition,
                then_body,
                else_body,
            } => {
                self.resolve_term(condition);
                self.resolve_body(then_body);
                if let Some(else_body) = else_body {
                    self.resolve_body(else_body);
                }
            }
        }
    }

    fn declare_definition_name(&mut self, definition: &Definition) -> bool {
        let kind = match definition.kind {
            DefinitionKind::Procedure => SymbolKind::Procedure,
            DefinitionKind::Function => SymbolKind::Function,
        };
        self.declare(&definition.name, kind, Scope::Everywhere, definition.span.start)
    }

    fn resolve_definition(&mut self, definition: &Definition) {
        self.current_context = Some(definition.name.clone());

        let parameter_scope = match definition.kind {
            DefinitionKind::Procedure => Scope::Procedure,
            DefinitionKind::Function => Scope::Function,
        };

        for parameter in &definition.parameters {
            self.declare(&parameter.name, SymbolKind::Parameter, parameter_scope, parameter.span.start);
        }

        for local in &definition.locals {
            if definition.parameters.iter().any(|parameter| parameter.name == local.name) {
                self.errors.push(Error::new(
                    ErrorImpl::ShadowingError {
                        name: local.name.clone(),
                    },
                    local.span.start,
                ));
                continue;
            }

            self.declare(&local.name, SymbolKind::Variable, Scope::Local, local.span.start);
        }

        self.resolve_body(&definition.body);

        if let Some(return_value) = &definition.return_value {
            self.resolve_atom(return_value);
        }

        self.current_context = None;
    }

    /// Global variable, procedure and function names must be pairwise disjoint.
    fn check_naming_conflicts(&mut self) {
        let mut variables = BTreeMap::new();
        let mut procedures = BTreeMap::new();
        let mut functions = BTreeMap::new();

        for symbol in self.table.iter() {
            let set = match (symbol.kind, symbol.scope) {
                (SymbolKind::Variable, Scope::Global) => &mut variables,
                (SymbolKind::Procedure, _) => &mut procedures,
                (SymbolKind::Function, _) => &mut functions,
                _ => continue,
            };
            set.entry(symbol.name.clone()).or_insert(symbol.position);
        }

        let pairs = [
            (&variables, SymbolKind::Variable, &procedures, SymbolKind::Procedure),
            (&variables, SymbolKind::Variable, &functions, SymbolKind::Function),
            (&procedures, SymbolKind::Procedure, &functions, SymbolKind::Function),
        ];

        for (first, first_kind, second, second_kind) in pairs {
            for (name, position) in second.iter() {
                if first.contains_key(name) {
                    self.errors.push(Error::new(
                        ErrorImpl::NamingConflict {
                            name: name.clone(),
                            first_kind: first_kind.to_string(),
                            second_kind: second_kind.to_string(),
                        },
                        *position,
                    ));
                }
            }
        }
    }

    pub fn resolve_program(&mut self, program: &Program) {
        for global in &program.globals {
            self.declare(&global.name, SymbolKind::Variable, Scope::Global, global.span.start);
        }

        // Names first, so bodies can call definitions further down
        let declared: Vec<bool> = program
            .definitions()
            .map(|definition| self.declare_definition_name(definition))
            .collect();

        // A duplicate definition was already reported by name; its body would
        // only repeat the parameter declarations of the first one.
        for (definition, declared) in program.definitions().zip(declared) {
            if declared {
                self.resolve_definition(definition);
            }
        }

        for variable in &program.main.variables {
            self.declare(&variable.name, SymbolKind::Variable, Scope::Main, variable.span.start);
        }
        self.resolve_body(&program.main.body);

        self.check_naming_conflicts();
    }
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the symbol table of `program` and checks every name in it.
///
/// Analysis does not stop at the first problem: the returned result lists
/// all diagnostics in the order they were found, and the table holds every
/// declaration that succeeded.
pub fn analyze_scopes(program: &Program) -> (SymbolTable, AnalysisResult) {
    let mut resolver = ScopeResolver::new();
    resolver.resolve_program(program);

    (resolver.table, AnalysisResult::from_errors(resolver.errors))
}
