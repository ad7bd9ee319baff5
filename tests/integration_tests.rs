//! Integration tests for end-to-end compilation.
//!
//! These tests drive the whole pipeline from SPL source to numbered BASIC and
//! run the result on a small interpreter for the target instructions.

use std::collections::HashMap;

use splc::{
    assembler::assembler::{AssembledProgram, AssemblerConfig},
    compile_source,
    compiler::instruction::{BasicOp, Expression, Instruction, PrintItem, Target},
    errors::errors::Error,
    CompileOptions,
};

fn compile_ok(source: &str) -> AssembledProgram {
    match compile_source(source, &CompileOptions::default()) {
        Ok(program) => program,
        Err(errors) => panic!(
            "{:?}",
            errors.iter().map(|error| error.to_string()).collect::<Vec<_>>()
        ),
    }
}

fn compile_err(source: &str) -> Vec<String> {
    compile_source(source, &CompileOptions::default())
        .unwrap_err()
        .iter()
        .map(Error::to_string)
        .collect()
}

fn eval(expression: &Expression, variables: &HashMap<String, i64>) -> i64 {
    match expression {
        Expression::Number(value) => *value as i64,
        Expression::Variable(name) => variables.get(name).copied().unwrap_or(0),
        Expression::Negate(operand) => -eval(operand, variables),
        Expression::Binary { op, left, right } => {
            let left = eval(left, variables);
            let right = eval(right, variables);
            match op {
                BasicOp::Add => left + right,
                BasicOp::Sub => left - right,
                BasicOp::Mul => left * right,
                BasicOp::Div if right == 0 => 0,
                BasicOp::Div => left / right,
                BasicOp::Eq => (left == right) as i64,
                BasicOp::Gt => (left > right) as i64,
            }
        }
    }
}

/// Runs a numbered program and returns what it printed.
fn run(program: &AssembledProgram) -> Vec<String> {
    let index: HashMap<u32, usize> = program
        .iter()
        .enumerate()
        .map(|(position, line)| (line.line, position))
        .collect();
    let jump = |target: &Target| match target {
        Target::Line(line) => index[line],
        Target::Symbolic(label) => panic!("unresolved label {}", label),
    };

    let mut variables = HashMap::new();
    let mut returns = vec![];
    let mut output = vec![];
    let mut pc = 0;

    for _ in 0..100_000 {
        let Some(line) = program.lines.get(pc) else {
            return output;
        };
        pc += 1;

        match &line.instruction {
            Instruction::Stop => return output,
            Instruction::Print(PrintItem::Text(text)) => output.push(text.clone()),
            Instruction::Print(PrintItem::Value(value)) => output.push(eval(value, &variables).to_string()),
            Instruction::Let { target, value } => {
                let value = eval(value, &variables);
                variables.insert(target.clone(), value);
            }
            Instruction::Gosub(target) => {
                returns.push(pc);
                pc = jump(target);
            }
            Instruction::Goto(target) => pc = jump(target),
            Instruction::IfThen { condition, target } => {
                if eval(condition, &variables) != 0 {
                    pc = jump(target);
                }
            }
            Instruction::Return => pc = returns.pop().expect("RETURN without GOSUB"),
            Instruction::Label(_) => {}
        }
    }

    panic!("program did not terminate");
}

#[test]
fn test_straight_line_program() {
    let program = compile_ok("glob { x } proc { } func { } main { var { } x = 5; print x; halt }");

    assert_eq!(program.to_string(), "10 LET A = 5\n20 PRINT A\n30 STOP\n");
}

#[test]
fn test_duplicate_global_is_reported() {
    let errors = compile_err("glob { x x } proc { } func { } main { var { } halt }");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Duplicate symbol x"));
}

#[test]
fn test_numeric_if_condition_is_reported() {
    let errors = compile_err("glob { x y } proc { } func { } main { var { } if (x plus y) { x = 0 } }");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("If condition must be boolean"));
}

#[test]
fn test_every_analysis_error_is_reported() {
    let errors = compile_err("glob { x } proc { } func { } main { var { } y = 1; z = 2 }");

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|error| error.starts_with("Scope Error:")));
}

#[test]
fn test_lexer_error_stops_the_run() {
    let errors = compile_err("glob { x } proc { } func { } main { var { } x = 007 }");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Lexer Error:"));
}

#[test]
fn test_while_resolves_forward_jumps() {
    let program = compile_ok(
        "glob { x } proc { } func { } main { var { } x = 3; while (x > 0) { print x; x = (x minus 1) }; print \"done\" }",
    );

    let rendered = program.to_string();
    assert!(rendered.contains("30 IF A > 0 THEN 50"));
    assert!(rendered.contains("40 GOTO 90"));
    assert_eq!(run(&program), vec!["3", "2", "1", "done"]);
}

#[test]
fn test_do_until_runs_at_least_once() {
    let program = compile_ok(
        "glob { x } proc { } func { } main { var { } x = 9; do { print x; x = (x plus 1) } until (x > 5) }",
    );

    assert_eq!(run(&program), vec!["9"]);
}

#[test]
fn test_procedures_and_functions() {
    let program = compile_ok(
        "glob { x } \
         proc { show(v) { local { } print v } } \
         func { fact(n) { local { r } r = 1; while (n > 1) { r = (r mult n); n = (n minus 1) }; return r } } \
         main { var { y } x = 5; y = fact(x); show(y); show(x) }",
    );

    assert!(program.to_string().starts_with("10 GOTO "));
    assert_eq!(run(&program), vec!["120", "5"]);
}

#[test]
fn test_custom_line_numbers() {
    let options = CompileOptions {
        assembler: AssemblerConfig { base: 100, step: 1 },
    };
    let program = compile_source("glob { } proc { } func { } main { var { } print \"hi\"; halt }", &options).unwrap();

    assert_eq!(program.to_string(), "100 PRINT \"hi\"\n101 STOP\n");
}

#[test]
fn test_no_symbolic_target_remains() {
    let program = compile_ok(
        "glob { a b } proc { p(c) { local { } if ((c > 1) and (not (c eq 3))) { print c } } } func { } main { var { } do { p(a); a = (a plus 1) } until ((a > 4) or (b eq 1)) }",
    );

    assert!(program
        .iter()
        .filter_map(|line| line.instruction.target())
        .all(|target| matches!(target, Target::Line(_))));
    assert_eq!(run(&program), vec!["2", "4"]);
}

const CONDITIONS: [(&str, fn(bool, bool, bool) -> bool); 7] = [
    ("((a > 0) or (b > 0))", |a, b, _| a || b),
    ("((a > 0) and (b > 0))", |a, b, _| a && b),
    ("(not (a > 0))", |a, _, _| !a),
    ("(not ((a > 0) and (b > 0)))", |a, b, _| !(a && b)),
    ("((a > 0) and ((b eq 1) or (not (c > 0))))", |a, b, c| a && (b || !c)),
    ("((not (a > 0)) or ((b > 0) and (c > 0)))", |a, b, c| !a || (b && c)),
    ("(not ((not (a > 0)) and (not (b > 0))))", |a, b, _| a || b),
];

#[test]
fn test_conditions_preserve_truth() {
    for (condition, expected) in CONDITIONS {
        for bits in 0..8u8 {
            let (a, b, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let source = format!(
                "glob {{ a b c }} proc {{ }} func {{ }} main {{ var {{ }} a = {}; b = {}; c = {}; if {} {{ print \"yes\" }} else {{ print \"no\" }} }}",
                a as u8, b as u8, c as u8, condition
            );

            let printed = run(&compile_ok(&source));
            let wanted = if expected(a, b, c) { "yes" } else { "no" };
            assert_eq!(printed, vec![wanted], "{} with a={} b={} c={}", condition, a, b, c);
        }
    }
}

#[test]
fn test_loop_conditions_preserve_truth() {
    for (condition, expected) in CONDITIONS {
        for bits in 0..8u8 {
            let (a, b, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let source = format!(
                "glob {{ a b c }} proc {{ }} func {{ }} main {{ var {{ }} a = {}; b = {}; c = {}; while {} {{ print \"yes\"; halt }}; print \"no\" }}",
                a as u8, b as u8, c as u8, condition
            );

            let printed = run(&compile_ok(&source));
            let wanted = if expected(a, b, c) { "yes" } else { "no" };
            assert_eq!(printed, vec![wanted], "{} with a={} b={} c={}", condition, a, b, c);
        }
    }
}
