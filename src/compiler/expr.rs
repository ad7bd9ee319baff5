use crate::{
    ast::expressions::{Atom, BinaryOp, Term, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    compiler::Compiler,
    instruction::{BasicOp, Expression, Instruction, Target},
};

pub fn gen_atom(compiler: &mut Compiler, atom: &Atom) -> Result<Expression, Error> {
    match atom {
        Atom::Number { value, .. } => Ok(Expression::Number(*value)),
        Atom::Variable(var) => Ok(Expression::Variable(compiler.variable_name(var)?)),
    }
}

fn basic_op(op: BinaryOp) -> Option<BasicOp> {
    match op {
        BinaryOp::Plus => Some(BasicOp::Add),
        BinaryOp::Minus => Some(BasicOp::Sub),
        BinaryOp::Mult => Some(BasicOp::Mul),
        BinaryOp::Div => Some(BasicOp::Div),
        BinaryOp::Eq => Some(BasicOp::Eq),
        BinaryOp::Gt => Some(BasicOp::Gt),
        BinaryOp::Or | BinaryOp::And => None,
    }
}

fn not_a_value(op: &dyn std::fmt::Display, position: Position) -> Error {
    Error::new(
        ErrorImpl::CodeGeneration {
            message: format!("Boolean operator '{}' cannot be used as a value", op),
        },
        position,
    )
}

/// Lowers a numeric term, or a single comparison, to a target expression.
pub fn gen_expression(compiler: &mut Compiler, term: &Term) -> Result<Expression, Error> {
    match term {
        Term::Atom(atom) => gen_atom(compiler, atom),
        Term::Unary { op, operand, span } => match op {
            UnaryOp::Neg => Ok(Expression::Negate(Box::new(gen_expression(compiler, operand)?))),
            UnaryOp::Not => Err(not_a_value(op, span.start)),
        },
        Term::Binary {
            op,
            left,
            right,
            span,
        } => match basic_op(*op) {
            Some(basic) => Ok(Expression::binary(
                basic,
                gen_expression(compiler, left)?,
                gen_expression(compiler, right)?,
            )),
            None => Err(not_a_value(op, span.start)),
        },
    }
}

/// Emits code that jumps to `target` when `condition` holds and falls
/// through otherwise.
///
/// `or` tests each side against the target. `and` only reaches the second
/// test through an intermediate label, and skips it when the first side is
/// false. A nested `not` jumps past an unconditional `GOTO target` when its
/// operand holds.
pub fn gen_branch(compiler: &mut Compiler, condition: &Term, target: &str) -> Result<(), Error> {
    match condition {
        Term::Binary {
            op: BinaryOp::Or,
            left,
            right,
            ..
        } => {
            gen_branch(compiler, left, target)?;
            gen_branch(compiler, right, target)
        }
        Term::Binary {
            op: BinaryOp::And,
            left,
            right,
            ..
        } => {
            let mid = compiler.new_label("C");
            let skip = compiler.new_label("S");

            gen_branch(compiler, left, &mid)?;
            compiler.emit(Instruction::Goto(Target::Symbolic(skip.clone())));
            compiler.emit(Instruction::Label(mid));
            gen_branch(compiler, right, target)?;
            compiler.emit(Instruction::Label(skip));
            Ok(())
        }
        Term::Unary {
            op: UnaryOp::Not,
            operand,
            ..
        } => {
            let skip = compiler.new_label("N");

            gen_branch(compiler, operand, &skip)?;
            compiler.emit(Instruction::Goto(Target::Symbolic(String::from(target))));
            compiler.emit(Instruction::Label(skip));
            Ok(())
        }
        Term::Binary { op, .. } if op.is_comparison() => {
            let condition = gen_expression(compiler, condition)?;
            compiler.emit(Instruction::IfThen {
                condition,
                target: Target::Symbolic(String::from(target)),
            });
            Ok(())
        }
        other => Err(Error::new(
            ErrorImpl::CodeGeneration {
                message: String::from("Condition is not a comparison or a boolean combination"),
            },
            other.get_span().start,
        )),
    }
}
