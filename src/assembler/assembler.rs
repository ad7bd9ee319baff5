use std::fmt::Display;

use crate::{
    compiler::instruction::{Instruction, Target},
    errors::errors::{Error, ErrorImpl},
};

use super::label_map::LabelMap;

pub const DEFAULT_BASE: u32 = 10;
pub const DEFAULT_STEP: u32 = 10;

/// Line numbering of the assembled program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Number of the first line
    pub base: u32,
    /// Distance between two consecutive lines
    pub step: u32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        AssemblerConfig {
            base: DEFAULT_BASE,
            step: DEFAULT_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberedInstruction {
    pub line: u32,
    pub instruction: Instruction,
}

impl Display for NumberedInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.line, self.instruction)
    }
}

/// A program whose jumps all point at line numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledProgram {
    pub lines: Vec<NumberedInstruction>,
}

impl AssembledProgram {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NumberedInstruction> {
        self.lines.iter()
    }
}

impl Display for AssembledProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

fn out_of_lines(config: &AssemblerConfig) -> Error {
    Error::without_position(ErrorImpl::CapacityError {
        message: format!(
            "Line numbers overflow with base {} and step {}",
            config.base, config.step
        ),
    })
}

/// Pass 1: gives every instruction its line and records the labels.
fn number(instructions: Vec<Instruction>, config: &AssemblerConfig) -> Result<(Vec<NumberedInstruction>, LabelMap), Error> {
    if config.step == 0 {
        return Err(Error::without_position(ErrorImpl::CapacityError {
            message: String::from("Line step must be at least 1"),
        }));
    }

    let mut labels = LabelMap::new();
    let mut numbered = Vec::with_capacity(instructions.len());
    let mut next = Some(config.base);

    for instruction in instructions {
        let line = next.ok_or_else(|| out_of_lines(config))?;

        if let Instruction::Label(label) = &instruction {
            labels.put(label, line)?;
        }

        numbered.push(NumberedInstruction { line, instruction });
        next = line.checked_add(config.step);
    }

    Ok((numbered, labels))
}

/// Pass 2: rewrites every symbolic target to the line of its label.
fn resolve(numbered: &mut [NumberedInstruction], labels: &LabelMap) -> Result<(), Error> {
    for entry in numbered.iter_mut() {
        let target = match entry.instruction.target_mut() {
            Some(target) => target,
            None => continue,
        };

        let line = match target {
            Target::Symbolic(label) => labels.get(label)?,
            Target::Line(_) => continue,
        };
        *target = Target::Line(line);
    }

    Ok(())
}

/// Turns lowered instructions into a numbered program.
///
/// The whole stream is numbered before any jump is resolved, so forward
/// references work the same as backward ones.
pub fn assemble(instructions: Vec<Instruction>, config: &AssemblerConfig) -> Result<AssembledProgram, Error> {
    let (mut lines, labels) = number(instructions, config)?;
    resolve(&mut lines, &labels)?;

    Ok(AssembledProgram { lines })
}
