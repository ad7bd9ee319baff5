use crate::Span;

use super::expressions::{Atom, Term, VarRef};

/// `NAME ( INPUT )`, used both as a procedure call statement and as the
/// right-hand side of a function call assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<Atom>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Text(String),
    Atom(Atom),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstrKind {
    Halt,
    Print(Output),
    Call(Call),
    Assign {
        target: VarRef,
        value: Term,
    },
    AssignCall {
        target: VarRef,
        call: Call,
    },
    While {
        condition: Term,
        body: Vec<Instr>,
    },
    DoUntil {
        body: Vec<Instr>,
        condition: Term,
    },
    If {
        condition: Term,
        then_body: Vec<Instr>,
        else_body: Option<Vec<Instr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    pub kind: InstrKind,
    pub span: Span,
}

impl Instr {
    pub fn get_span(&self) -> &Span {
        &self.span
    }
}
