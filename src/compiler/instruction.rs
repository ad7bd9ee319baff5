//! Target instructions.
//!
//! Lowering produces these with symbolic jump targets; the assembler numbers
//! them and rewrites every target to a line number.

use std::fmt::Display;

/// Where a jump goes: a label before assembly, a line number after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Symbolic(String),
    Line(u32),
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Symbolic(label) => write!(f, "{}", label),
            Target::Line(line) => write!(f, "{}", line),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Gt,
}

impl Display for BasicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasicOp::Add => write!(f, "+"),
            BasicOp::Sub => write!(f, "-"),
            BasicOp::Mul => write!(f, "*"),
            BasicOp::Div => write!(f, "/"),
            BasicOp::Eq => write!(f, "="),
            BasicOp::Gt => write!(f, ">"),
        }
    }
}

/// A numeric expression or comparison over target variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(u64),
    Variable(String),
    Negate(Box<Expression>),
    Binary {
        op: BasicOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BasicOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Writes the expression as an operand of another one: binary
    /// expressions get parentheses.
    fn fmt_operand(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Binary { .. } => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Negate(operand) => {
                write!(f, "-")?;
                operand.fmt_operand(f)
            }
            Expression::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {} ", op)?;
                right.fmt_operand(f)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrintItem {
    Text(String),
    Value(Expression),
}

impl Display for PrintItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintItem::Text(text) => write!(f, "\"{}\"", text),
            PrintItem::Value(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Stop,
    Print(PrintItem),
    Let { target: String, value: Expression },
    Gosub(Target),
    Goto(Target),
    IfThen { condition: Expression, target: Target },
    Return,
    /// Defines a label; renders as a `REM` no-op.
    Label(String),
}

impl Instruction {
    /// The jump target of `GOTO`, `GOSUB` and `IF … THEN`.
    pub fn target_mut(&mut self) -> Option<&mut Target> {
        match self {
            Instruction::Gosub(target)
            | Instruction::Goto(target)
            | Instruction::IfThen { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&Target> {
        match self {
            Instruction::Gosub(target)
            | Instruction::Goto(target)
            | Instruction::IfThen { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Stop => write!(f, "STOP"),
            Instruction::Print(item) => write!(f, "PRINT {}", item),
            Instruction::Let { target, value } => write!(f, "LET {} = {}", target, value),
            Instruction::Gosub(target) => write!(f, "GOSUB {}", target),
            Instruction::Goto(target) => write!(f, "GOTO {}", target),
            Instruction::IfThen { condition, target } => {
                write!(f, "IF {} THEN {}", condition, target)
            }
            Instruction::Return => write!(f, "RETURN"),
            Instruction::Label(label) => write!(f, "REM {}", label),
        }
    }
}
