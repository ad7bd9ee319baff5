#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    assembler::assembler::{assemble, AssembledProgram, AssemblerConfig},
    ast::ast::Program,
    compiler::compiler::compile,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::scope_resolver::analyze_scopes,
    type_checker::type_checker::type_check,
};

pub mod assembler;
pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// A source location as reported by the lexer: 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0, 0)
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Knobs of a single compilation run.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub assembler: AssemblerConfig,
}

/// Runs the whole pipeline on source text.
///
/// Lexing, parsing, lowering and assembly stop at their first error. Scope and
/// type analysis report every diagnostic they find, and lowering only runs when
/// both of them succeeded.
pub fn compile_source(source: &str, options: &CompileOptions) -> Result<AssembledProgram, Vec<Error>> {
    let tokens = tokenize(source).map_err(|error| vec![error])?;
    let program = parse(tokens).map_err(|error| vec![error])?;

    compile_program(&program, options)
}

/// Runs analysis, lowering and assembly on an already parsed program.
pub fn compile_program(program: &Program, options: &CompileOptions) -> Result<AssembledProgram, Vec<Error>> {
    let (symbols, scope_result) = analyze_scopes(program);
    if !scope_result.success {
        return Err(scope_result.errors);
    }

    let (_, type_result) = type_check(program, &symbols);
    if !type_result.success {
        return Err(type_result.errors);
    }

    let instructions = compile(program, &symbols).map_err(|error| vec![error])?;
    assemble(instructions, &options.assembler).map_err(|error| vec![error])
}

pub fn get_line_at_position(source: &str, position: &Position) -> Option<String> {
    if position.is_null() {
        return None;
    }

    source
        .lines()
        .nth((position.line() - 1) as usize)
        .map(|line| line.to_string())
}

#[cfg(test)]
mod tests {
    use super::{get_line_at_position, Position};

    #[test]
    fn test_get_line_at_position() {
        let source = "glob { x }\nproc { }\nfunc { }\nmain { var { } halt }";

        assert_eq!(get_line_at_position(source, &Position(1, 3)).unwrap(), "glob { x }");
        assert_eq!(
            get_line_at_position(source, &Position(4, 8)).unwrap(),
            "main { var { } halt }"
        );
        assert!(get_line_at_position(source, &Position::null()).is_none());
        assert!(get_line_at_position(source, &Position(9, 1)).is_none());
    }

    #[test]
    fn test_format_error_points_at_column() {
        let source = "glob { x x }\nproc { }\nfunc { }\nmain { var { } halt }";
        let error = crate::errors::errors::Error::new(
            crate::errors::errors::ErrorImpl::DuplicateSymbol {
                name: String::from("x"),
                scope: String::from("Global"),
            },
            Position(1, 10),
        );

        let rendered = super::format_error(&error, source, "test.spl");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: DuplicateSymbol");
        assert_eq!(lines[1], "-> test.spl:1:10");
        assert_eq!(lines[3], "1 | glob { x x }");
        assert!(lines[4].ends_with("---------^"));
    }
}

/// Renders an error with the offending source line underneath it.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: UndeclaredName (Declare `y` ...)
        -> prog.spl:4:18
          |
        4 | main { var { } y = 1 }
          | ---------------^
    */

    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }

    let position = error.get_position();
    let line_text = match get_line_at_position(source, position) {
        Some(line_text) => line_text,
        None => {
            output.push_str(&format!("-> {}\n", file));
            output.push_str(&format!("   {}\n", error));
            return output;
        }
    };

    output.push_str(&format!("-> {}:{}:{}\n", file, position.line(), position.column()));

    let line_string = position.line().to_string();
    let padding = line_string.len() + 2;
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column() as usize).saturating_sub(removed_whitespace).max(1);
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
