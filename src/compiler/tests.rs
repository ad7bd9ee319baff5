use super::{
    compiler::compile,
    instruction::{Expression, Instruction, PrintItem},
};
use crate::{
    errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse,
    scope::scope_resolver::analyze_scopes, type_checker::type_checker::type_check,
};

fn lower_checked(source: &str) -> Result<Vec<Instruction>, Error> {
    let program = parse(tokenize(source).unwrap()).unwrap();
    let (symbols, scope_result) = analyze_scopes(&program);
    assert!(scope_result.success, "{:?}", scope_result.messages());
    let (_, type_result) = type_check(&program, &symbols);
    assert!(type_result.success, "{:?}", type_result.messages());

    compile(&program, &symbols)
}

fn lower(source: &str) -> Vec<String> {
    lower_checked(source)
        .unwrap()
        .iter()
        .map(|instruction| instruction.to_string())
        .collect()
}

fn lower_main(body: &str) -> Vec<String> {
    lower(&format!(
        "glob {{ x y }} proc {{ }} func {{ }} main {{ var {{ }} {} }}",
        body
    ))
}

#[test]
fn test_straight_line_program() {
    let instructions = lower_checked("glob { x } proc { } func { } main { var { } x = 5; print x; halt }").unwrap();

    assert_eq!(
        instructions,
        vec![
            Instruction::Let {
                target: String::from("A"),
                value: Expression::Number(5),
            },
            Instruction::Print(PrintItem::Value(Expression::Variable(String::from("A")))),
            Instruction::Stop,
        ]
    );
    assert!(instructions.iter().all(|instruction| instruction.target().is_none()));
}

#[test]
fn test_print_text() {
    assert_eq!(lower_main("print \"hello\""), vec!["PRINT \"hello\""]);
}

#[test]
fn test_expression_rendering() {
    assert_eq!(
        lower_main("x = ((x plus 1) mult 2); y = (neg x); y = (neg (x minus y)); x = (x div 3)"),
        vec![
            "LET A = (A + 1) * 2",
            "LET B = -A",
            "LET B = -(A - B)",
            "LET A = A / 3",
        ]
    );
}

#[test]
fn test_if_else_layout() {
    assert_eq!(
        lower_main("if (x > 1) { print x } else { halt }"),
        vec!["IF A > 1 THEN T1", "STOP", "GOTO E2", "REM T1", "PRINT A", "REM E2"]
    );
}

#[test]
fn test_if_without_else() {
    assert_eq!(
        lower_main("if (x eq 1) { halt }"),
        vec!["IF A = 1 THEN T1", "GOTO E2", "REM T1", "STOP", "REM E2"]
    );
}

#[test]
fn test_if_not_swaps_branches() {
    assert_eq!(
        lower_main("if (not (x > 1)) { print x }"),
        vec!["IF A > 1 THEN T1", "PRINT A", "GOTO E2", "REM T1", "REM E2"]
    );
}

#[test]
fn test_while_layout() {
    assert_eq!(
        lower_main("while (x > 0) { x = (x minus 1) }"),
        vec![
            "REM W1",
            "IF A > 0 THEN WB2",
            "GOTO WE3",
            "REM WB2",
            "LET A = A - 1",
            "GOTO W1",
            "REM WE3",
        ]
    );
}

#[test]
fn test_do_until_layout() {
    assert_eq!(
        lower_main("do { x = (x plus 1) } until (x > 9)"),
        vec!["REM D1", "LET A = A + 1", "IF A > 9 THEN DE2", "GOTO D1", "REM DE2"]
    );
}

#[test]
fn test_or_branches_twice() {
    assert_eq!(
        lower_main("if ((x > 1) or (y > 2)) { halt }"),
        vec![
            "IF A > 1 THEN T1",
            "IF B > 2 THEN T1",
            "GOTO E2",
            "REM T1",
            "STOP",
            "REM E2",
        ]
    );
}

#[test]
fn test_and_skips_second_test() {
    assert_eq!(
        lower_main("if ((x > 1) and (y > 2)) { halt }"),
        vec![
            "IF A > 1 THEN C3",
            "GOTO S4",
            "REM C3",
            "IF B > 2 THEN T1",
            "REM S4",
            "GOTO E2",
            "REM T1",
            "STOP",
            "REM E2",
        ]
    );
}

#[test]
fn test_nested_not() {
    assert_eq!(
        lower_main("if ((x > 1) and (not (y > 2))) { halt }"),
        vec![
            "IF A > 1 THEN C3",
            "GOTO S4",
            "REM C3",
            "IF B > 2 THEN N5",
            "GOTO T1",
            "REM N5",
            "REM S4",
            "GOTO E2",
            "REM T1",
            "STOP",
            "REM E2",
        ]
    );
}

#[test]
fn test_calls_and_function_results() {
    assert_eq!(
        lower(
            "glob { x } proc { p(a) { local { } print a } } func { f(b) { local { } return b } } main { var { y } p(x); y = f(x); print y }"
        ),
        vec![
            "GOTO M1",
            "REM P2",
            "PRINT A",
            "RETURN",
            "REM F3",
            "LET Z = B",
            "RETURN",
            "REM M1",
            "LET A = C",
            "GOSUB P2",
            "LET B = C",
            "GOSUB F3",
            "LET D = Z",
            "PRINT D",
        ]
    );
}

#[test]
fn test_parameter_and_global_map_apart() {
    assert_eq!(
        lower("glob { x } proc { p(x) { local { } x = 1 } } func { } main { var { } x = 2; p(x) }"),
        vec![
            "GOTO M1",
            "REM P2",
            "LET A = 1",
            "RETURN",
            "REM M1",
            "LET B = 2",
            "LET A = B",
            "GOSUB P2",
        ]
    );
}

#[test]
fn test_compilations_are_independent() {
    let source = "glob { x } proc { } func { } main { var { } while (x > 0) { x = (x minus 1) } }";

    assert_eq!(lower(source), lower(source));
    assert_eq!(lower(source)[0], "REM W1");
}

#[test]
fn test_boolean_value_is_rejected() {
    // no type analysis
    let program = parse(
        tokenize("glob { x } proc { } func { } main { var { } x = ((x > 1) or (x > 2)) }").unwrap(),
    )
    .unwrap();
    let (symbols, _) = analyze_scopes(&program);

    let error = compile(&program, &symbols).unwrap_err();
    assert_eq!(error.get_error_name(), "CodeGeneration");
}
