use crate::{
    ast::{
        expressions::{Term, UnaryOp},
        statements::{Call, Instr, InstrKind, Output},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    allocator::RETURN_VARIABLE,
    compiler::Compiler,
    expr::{gen_atom, gen_branch, gen_expression},
    instruction::{Expression, Instruction, PrintItem, Target},
};

/// Generates `body` into a fresh buffer and hands it back, leaving the
/// enclosing buffer untouched.
pub fn gen_block(compiler: &mut Compiler, body: &[Instr]) -> Result<Vec<Instruction>, Error> {
    let outer = std::mem::take(&mut compiler.instructions);

    let result = body
        .iter()
        .try_for_each(|instr| gen_statement(compiler, instr));

    let block = std::mem::replace(&mut compiler.instructions, outer);
    result.map(|_| block)
}

fn gen_call(compiler: &mut Compiler, call: &Call) -> Result<(), Error> {
    let program = compiler.program;
    let callee = match program.find_definition(&call.name) {
        Some(callee) => callee,
        None => {
            return Err(Error::new(
                ErrorImpl::CodeGeneration {
                    message: format!("No procedure or function named '{}'", call.name),
                },
                call.span.start,
            ))
        }
    };

    for (index, argument) in call.arguments.iter().enumerate() {
        let value = gen_atom(compiler, argument)?;
        let target = compiler.parameter_name(callee, index)?;
        compiler.emit(Instruction::Let { target, value });
    }

    let entry = match compiler.entry_label(&call.name) {
        Some(entry) => entry.clone(),
        None => {
            return Err(Error::new(
                ErrorImpl::CodeGeneration {
                    message: format!("'{}' has no entry label", call.name),
                },
                call.span.start,
            ))
        }
    };
    compiler.emit(Instruction::Gosub(Target::Symbolic(entry)));

    Ok(())
}

fn gen_if(
    compiler: &mut Compiler,
    condition: &Term,
    then_body: &[Instr],
    else_body: Option<&[Instr]>,
) -> Result<(), Error> {
    let then_label = compiler.new_label("T");
    let exit_label = compiler.new_label("E");

    let mut then_code = gen_block(compiler, then_body)?;
    let mut else_code = match else_body {
        Some(else_body) => gen_block(compiler, else_body)?,
        None => vec![],
    };

    // if (not c) runs the else side when c holds
    let condition = match condition {
        Term::Unary {
            op: UnaryOp::Not,
            operand,
            ..
        } => {
            std::mem::swap(&mut then_code, &mut else_code);
            operand.as_ref()
        }
        condition => condition,
    };

    gen_branch(compiler, condition, &then_label)?;
    compiler.emit_all(else_code);
    compiler.emit(Instruction::Goto(Target::Symbolic(exit_label.clone())));
    compiler.emit(Instruction::Label(then_label));
    compiler.emit_all(then_code);
    compiler.emit(Instruction::Label(exit_label));

    Ok(())
}

fn gen_while(compiler: &mut Compiler, condition: &Term, body: &[Instr]) -> Result<(), Error> {
    let start_label = compiler.new_label("W");
    let body_label = compiler.new_label("WB");
    let exit_label = compiler.new_label("WE");

    let body_code = gen_block(compiler, body)?;

    compiler.emit(Instruction::Label(start_label.clone()));
    gen_branch(compiler, condition, &body_label)?;
    compiler.emit(Instruction::Goto(Target::Symbolic(exit_label.clone())));
    compiler.emit(Instruction::Label(body_label));
    compiler.emit_all(body_code);
    compiler.emit(Instruction::Goto(Target::Symbolic(start_label)));
    compiler.emit(Instruction::Label(exit_label));

    Ok(())
}

fn gen_do_until(compiler: &mut Compiler, body: &[Instr], condition: &Term) -> Result<(), Error> {
    let body_label = compiler.new_label("D");
    let exit_label = compiler.new_label("DE");

    let body_code = gen_block(compiler, body)?;

    compiler.emit(Instruction::Label(body_label.clone()));
    compiler.emit_all(body_code);
    gen_branch(compiler, condition, &exit_label)?;
    compiler.emit(Instruction::Goto(Target::Symbolic(body_label)));
    compiler.emit(Instruction::Label(exit_label));

    Ok(())
}

pub fn gen_statement(compiler: &mut Compiler, instr: &Instr) -> Result<(), Error> {
    match &instr.kind {
        InstrKind::Halt => compiler.emit(Instruction::Stop),
        InstrKind::Print(Output::Text(text)) => {
            compiler.emit(Instruction::Print(PrintItem::Text(text.clone())))
        }
        InstrKind::Print(Output::Atom(atom)) => {
            let value = gen_atom(compiler, atom)?;
            compiler.emit(Instruction::Print(PrintItem::Value(value)));
        }
        InstrKind::Call(call) => gen_call(compiler, call)?,
        InstrKind::Assign { target, value } => {
            let value = gen_expression(compiler, value)?;
            let target = compiler.variable_name(target)?;
            compiler.emit(Instruction::Let { target, value });
        }
        InstrKind::AssignCall { target, call } => {
            gen_call(compiler, call)?;
            let target = compiler.variable_name(target)?;
            compiler.emit(Instruction::Let {
                target,
                value: Expression::Variable(String::from(RETURN_VARIABLE)),
            });
        }
        InstrKind::While { condition, body } => gen_while(compiler, condition, body)?,
        InstrKind::DoUntil { body, condition } => gen_do_until(compiler, body, condition)?,
        InstrKind::If {
            condition,
            then_body,
            else_body,
        } => gen_if(compiler, condition, then_body, else_body.as_deref())?,
    }

    Ok(())
}
