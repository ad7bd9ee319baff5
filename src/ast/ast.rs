use std::fmt::Display;

use crate::Span;

use super::{expressions::Atom, statements::Instr};

/// A declared name: a global, a main variable, a parameter or a local.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Procedure,
    Function,
}

impl Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionKind::Procedure => write!(f, "procedure"),
            DefinitionKind::Function => write!(f, "function"),
        }
    }
}

/// A procedure or function definition.
///
/// Functions always carry a `return_value`; procedures never do.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    pub parameters: Vec<VarDecl>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Instr>,
    pub return_value: Option<Atom>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainProgram {
    pub variables: Vec<VarDecl>,
    pub body: Vec<Instr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub globals: Vec<VarDecl>,
    pub procedures: Vec<Definition>,
    pub functions: Vec<Definition>,
    pub main: MainProgram,
}

impl Program {
    /// Procedures first, then functions, in source order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.procedures.iter().chain(self.functions.iter())
    }

    pub fn find_definition(&self, name: &str) -> Option<&Definition> {
        self.definitions().find(|definition| definition.name == name)
    }
}
