use super::{
    scope_resolver::analyze_scopes,
    symbols::{Scope, Symbol, SymbolKind, SymbolTable},
};
use crate::{
    ast::ast::Program, errors::errors::AnalysisResult, lexer::lexer::tokenize,
    parser::parser::parse, Position,
};

fn program(source: &str) -> Program {
    parse(tokenize(source).unwrap()).unwrap()
}

fn analyze(source: &str) -> (SymbolTable, AnalysisResult) {
    analyze_scopes(&program(source))
}

fn names(result: &AnalysisResult) -> Vec<&str> {
    result.errors.iter().map(|error| error.get_error_name()).collect()
}

#[test]
fn test_valid_program() {
    let (table, result) = analyze(
        "glob { x } proc { p(a) { local { t } t = a; x = t } } func { f(b) { local { } return b } } main { var { y } y = f(x); p(y); print y }",
    );

    assert!(result.success, "{:?}", result.messages());
    // x, p, f, a, t, b, y
    assert_eq!(table.len(), 7);
}

#[test]
fn test_duplicate_global() {
    let (_, result) = analyze("glob { x x } proc { } func { } main { var { } halt }");

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert!(result.messages()[0].contains("Duplicate symbol x"));
    assert_eq!(
        result.messages()[0],
        "Scope Error: Duplicate symbol x in Global scope at line 1, column 10"
    );
}

#[test]
fn test_same_name_in_different_scopes() {
    let (_, result) = analyze(
        "glob { x } proc { p(x) { local { } print x } q(y) { local { x } x = y } } func { } main { var { x } x = 1 }",
    );

    assert!(result.success, "{:?}", result.messages());
}

#[test]
fn test_duplicate_parameter() {
    let (_, result) = analyze("glob { } proc { p(a a) { local { } halt } } func { } main { var { } halt }");

    assert_eq!(names(&result), vec!["DuplicateSymbol"]);
}

#[test]
fn test_local_shadowing_parameter() {
    let (_, result) = analyze("glob { } proc { p(a) { local { a } halt } } func { } main { var { } halt }");

    assert_eq!(names(&result), vec!["ShadowingError"]);
}

#[test]
fn test_undeclared_variable() {
    let (_, result) = analyze("glob { } proc { } func { } main { var { } x = 1 }");

    assert!(!result.success);
    assert!(result.messages()[0].contains("Undeclared variable: x"));
}

#[test]
fn test_locals_are_not_visible_in_main() {
    let (_, result) = analyze("glob { } proc { p() { local { t } t = 1 } } func { } main { var { } t = 2 }");

    assert_eq!(names(&result), vec!["UndeclaredName"]);
}

#[test]
fn test_locals_are_not_visible_in_other_definitions() {
    let (_, result) = analyze(
        "glob { } proc { p() { local { t } t = 1 } q() { local { } t = 2 } } func { } main { var { } halt }",
    );

    assert_eq!(names(&result), vec!["UndeclaredName"]);
}

#[test]
fn test_naming_conflicts() {
    let (_, result) = analyze(
        "glob { p f } proc { p() { local { } halt } } func { f() { local { } return 1 } } main { var { } halt }",
    );

    let messages = result.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("Naming error: variable 'p' conflicts with procedure name"));
    assert!(messages[1].contains("Naming error: variable 'f' conflicts with function name"));
}

#[test]
fn test_procedure_function_conflict() {
    let (_, result) = analyze(
        "glob { } proc { g() { local { } halt } } func { g() { local { } return 1 } } main { var { } halt }",
    );

    assert_eq!(names(&result), vec!["NamingConflict"]);
    assert!(result.messages()[0].contains("procedure 'g' conflicts with function name"));
}

#[test]
fn test_duplicate_procedure() {
    let (_, result) = analyze(
        "glob { } proc { p(a) { local { } halt } p(a) { local { } halt } } func { } main { var { } halt }",
    );

    assert_eq!(names(&result), vec!["DuplicateSymbol"]);
}

#[test]
fn test_call_kind_is_checked() {
    let (_, result) = analyze(
        "glob { x } proc { p() { local { } halt } } func { f() { local { } return 1 } } main { var { } f(); x = p(); x() }",
    );

    assert_eq!(names(&result), vec!["WrongKind", "WrongKind", "WrongKind"]);
    assert!(result.messages()[0].contains("'f' is a function, not a procedure"));
    assert!(result.messages()[1].contains("'p' is a procedure, not a function"));
}

#[test]
fn test_undeclared_procedure() {
    let (_, result) = analyze("glob { } proc { } func { } main { var { } missing() }");

    assert!(result.messages()[0].contains("Undeclared procedure: missing"));
}

#[test]
fn test_forward_calls_resolve() {
    let (_, result) = analyze(
        "glob { x } proc { first() { local { } second() } second() { local { } x = later() } } func { later() { local { } return 1 } } main { var { } first() }",
    );

    assert!(result.success, "{:?}", result.messages());
}

#[test]
fn test_procedure_name_used_as_variable() {
    let (_, result) = analyze("glob { } proc { p() { local { } halt } } func { } main { var { } print p }");

    assert_eq!(names(&result), vec!["WrongKind"]);
}

#[test]
fn test_errors_accumulate() {
    let (_, result) = analyze("glob { x x } proc { } func { } main { var { } a = 1; b = 2; print c }");

    assert_eq!(
        names(&result),
        vec!["DuplicateSymbol", "UndeclaredName", "UndeclaredName", "UndeclaredName"]
    );
}

#[test]
fn test_storage_keys() {
    let (table, _) = analyze(
        "glob { x } proc { p(a) { local { t } halt } } func { } main { var { m } halt }",
    );

    let keys: Vec<String> = table.iter().map(|symbol| symbol.storage_key()).collect();
    assert_eq!(keys, vec!["x", "p", "p.a", "p.t", "main.m"]);
}

#[test]
fn test_lookup_prefers_inner_declarations() {
    let (table, _) = analyze(
        "glob { x } proc { p(x) { local { } halt } } func { } main { var { x } halt }",
    );

    assert_eq!(table.lookup_variable("x", Some("p")).unwrap().storage_key(), "p.x");
    assert_eq!(table.lookup_variable("x", None).unwrap().storage_key(), "main.x");
    assert_eq!(table.lookup_variable("x", Some("q")).unwrap().storage_key(), "x");
}

#[test]
fn test_declare_compatibility() {
    let mut table = SymbolTable::new();
    let position = Position(1, 1);

    assert!(table
        .declare(Symbol::new("v", SymbolKind::Variable, Scope::Global, None, position))
        .is_ok());
    assert!(table
        .declare(Symbol::new("v", SymbolKind::Variable, Scope::Main, None, position))
        .is_ok());
    assert!(table
        .declare(Symbol::new("v", SymbolKind::Procedure, Scope::Everywhere, None, position))
        .is_ok());
    assert!(table
        .declare(Symbol::new("v", SymbolKind::Variable, Scope::Global, None, position))
        .is_err());
    assert!(table
        .declare(Symbol::new("v", SymbolKind::Procedure, Scope::Everywhere, None, position))
        .is_err());
}
