//! Main compiler module.
//!
//! This module contains the core Compiler structure and the `compile` entry
//! point, which lowers a scope- and type-checked program into a flat list of
//! target instructions with symbolic jump targets.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Definition, DefinitionKind, Program},
        expressions::VarRef,
    },
    errors::errors::{Error, ErrorImpl},
    scope::symbols::SymbolTable,
};

use super::{
    allocator::{LabelGenerator, VariableMapper, RETURN_VARIABLE},
    expr::gen_atom,
    instruction::{Instruction, Target},
    stmt::gen_block,
};

/// The state of one lowering run.
///
/// Owns the label generator and the variable mapper, so two compilations
/// never share labels or variable names.
pub struct Compiler<'a> {
    /// The program being lowered
    pub program: &'a Program,
    /// Symbols resolved by scope analysis
    pub symbols: &'a SymbolTable,
    pub labels: LabelGenerator,
    pub variables: VariableMapper,
    /// Output of the block currently being generated
    pub instructions: Vec<Instruction>,
    /// Name of the definition whose body is being lowered, `None` in main
    pub context: Option<&'a str>,
    /// Entry label of every procedure and function
    pub entry_labels: HashMap<&'a str, String>,
}

impl<'a> Compiler<'a> {
    pub fn new(program: &'a Program, symbols: &'a SymbolTable) -> Self {
        Compiler {
            program,
            symbols,
            labels: LabelGenerator::new(),
            variables: VariableMapper::new(),
            instructions: vec![],
            context: None,
            entry_labels: HashMap::new(),
        }
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn emit_all(&mut self, instructions: Vec<Instruction>) {
        self.instructions.extend(instructions);
    }

    pub fn new_label(&mut self, prefix: &str) -> String {
        self.labels.new_label(prefix)
    }

    /// Target name of a variable reference, resolved from the current context.
    pub fn variable_name(&mut self, var: &VarRef) -> Result<String, Error> {
        let key = match self.symbols.lookup_variable(&var.name, self.context) {
            Some(symbol) => symbol.storage_key(),
            None => {
                return Err(Error::new(
                    ErrorImpl::CodeGeneration {
                        message: format!("Variable '{}' has no resolved declaration", var.name),
                    },
                    var.span.start,
                ))
            }
        };

        self.variables.map(&key)
    }

    /// Target name of the `index`-th parameter of `callee`.
    pub fn parameter_name(&mut self, callee: &Definition, index: usize) -> Result<String, Error> {
        match callee.parameters.get(index) {
            Some(parameter) => self.variables.map(&format!("{}.{}", callee.name, parameter.name)),
            None => Err(Error::new(
                ErrorImpl::CodeGeneration {
                    message: format!(
                        "'{}' takes {} arguments, got more",
                        callee.name,
                        callee.parameters.len()
                    ),
                },
                callee.span.start,
            )),
        }
    }

    pub fn entry_label(&self, name: &str) -> Option<&String> {
        self.entry_labels.get(name)
    }

    fn gen_definition(&mut self, definition: &'a Definition) -> Result<(), Error> {
        self.context = Some(definition.name.as_str());

        let entry = match self.entry_labels.get(definition.name.as_str()) {
            Some(entry) => entry.clone(),
            None => self.new_label("P"),
        };
        self.emit(Instruction::Label(entry));

        let body = gen_block(self, &definition.body)?;
        self.emit_all(body);

        if let (DefinitionKind::Function, Some(return_value)) = (definition.kind, &definition.return_value) {
            let value = gen_atom(self, return_value)?;
            self.emit(Instruction::Let {
                target: String::from(RETURN_VARIABLE),
                value,
            });
        }
        self.emit(Instruction::Return);

        self.context = None;
        Ok(())
    }

    /// Lays out the whole program.
    ///
    /// Without procedures or functions only the main body is emitted.
    /// Otherwise a jump over the subroutines comes first, then every
    /// subroutine, then the main body under its own label.
    pub fn gen_program(&mut self) -> Result<(), Error> {
        let program = self.program;

        if program.definitions().next().is_none() {
            let body = gen_block(self, &program.main.body)?;
            self.emit_all(body);
            return Ok(());
        }

        let main_label = self.new_label("M");
        self.emit(Instruction::Goto(Target::Symbolic(main_label.clone())));

        for definition in program.definitions() {
            let prefix = match definition.kind {
                DefinitionKind::Procedure => "P",
                DefinitionKind::Function => "F",
            };
            let label = self.new_label(prefix);
            self.entry_labels.insert(definition.name.as_str(), label);
        }

        for definition in program.definitions() {
            self.gen_definition(definition)?;
        }

        self.emit(Instruction::Label(main_label));
        let body = gen_block(self, &program.main.body)?;
        self.emit_all(body);

        Ok(())
    }
}

/// Lowers `program` to target instructions.
///
/// Assumes scope and type analysis both succeeded; a residual mismatch is
/// reported as a fatal code generation error.
pub fn compile(program: &Program, symbols: &SymbolTable) -> Result<Vec<Instruction>, Error> {
    let mut compiler = Compiler::new(program, symbols);
    compiler.gen_program()?;

    Ok(compiler.instructions)
}
