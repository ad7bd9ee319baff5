use std::fmt::Display;

use crate::Span;

/// A use of a variable name inside an instruction or term.
#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Number { value: u64, span: Span },
    Variable(VarRef),
}

impl Atom {
    pub fn get_span(&self) -> &Span {
        match self {
            Atom::Number { span, .. } => span,
            Atom::Variable(var) => &var.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "neg"),
            UnaryOp::Not => write!(f, "not"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Gt,
    Or,
    And,
    Plus,
    Minus,
    Mult,
    Div,
}

impl BinaryOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Mult | BinaryOp::Div)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::Or | BinaryOp::And)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::Gt)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Eq => write!(f, "eq"),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::Or => write!(f, "or"),
            BinaryOp::And => write!(f, "and"),
            BinaryOp::Plus => write!(f, "plus"),
            BinaryOp::Minus => write!(f, "minus"),
            BinaryOp::Mult => write!(f, "mult"),
            BinaryOp::Div => write!(f, "div"),
        }
    }
}

/// TERM ::= ATOM | ( UNOP TERM ) | ( TERM BINOP TERM )
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(Atom),
    Unary {
        op: UnaryOp,
        operand: Box<Term>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Term>,
        right: Box<Term>,
        span: Span,
    },
}

impl Term {
    pub fn get_span(&self) -> &Span {
        match self {
            Term::Atom(atom) => atom.get_span(),
            Term::Unary { span, .. } => span,
            Term::Binary { span, .. } => span,
        }
    }
}
