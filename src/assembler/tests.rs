use super::{
    assembler::{assemble, AssemblerConfig},
    label_map::LabelMap,
};
use crate::compiler::instruction::{BasicOp, Expression, Instruction, PrintItem, Target};

fn goto(label: &str) -> Instruction {
    Instruction::Goto(Target::Symbolic(String::from(label)))
}

fn label(name: &str) -> Instruction {
    Instruction::Label(String::from(name))
}

fn rendered(instructions: Vec<Instruction>, config: &AssemblerConfig) -> Vec<String> {
    assemble(instructions, config)
        .unwrap()
        .iter()
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn test_label_map() {
    let mut labels = LabelMap::new();
    assert!(labels.is_empty());

    labels.put("T1", 30).unwrap();
    assert_eq!(labels.get("T1").unwrap(), 30);
    assert_eq!(labels.len(), 1);

    assert_eq!(labels.put("T1", 40).unwrap_err().get_error_name(), "DuplicateLabel");
    assert_eq!(labels.get("E2").unwrap_err().get_error_name(), "UndefinedLabel");
}

#[test]
fn test_straight_line_numbering() {
    let instructions = vec![
        Instruction::Let {
            target: String::from("A"),
            value: Expression::Number(5),
        },
        Instruction::Print(PrintItem::Value(Expression::Variable(String::from("A")))),
        Instruction::Stop,
    ];

    assert_eq!(
        rendered(instructions, &AssemblerConfig::default()),
        vec!["10 LET A = 5", "20 PRINT A", "30 STOP"]
    );
}

#[test]
fn test_forward_and_backward_jumps() {
    let instructions = vec![
        label("W1"),
        Instruction::IfThen {
            condition: Expression::binary(
                BasicOp::Gt,
                Expression::Variable(String::from("A")),
                Expression::Number(0),
            ),
            target: Target::Symbolic(String::from("WB2")),
        },
        goto("WE3"),
        label("WB2"),
        goto("W1"),
        label("WE3"),
    ];

    assert_eq!(
        rendered(instructions, &AssemblerConfig::default()),
        vec![
            "10 REM W1",
            "20 IF A > 0 THEN 40",
            "30 GOTO 60",
            "40 REM WB2",
            "50 GOTO 10",
            "60 REM WE3",
        ]
    );
}

#[test]
fn test_no_symbolic_target_remains() {
    let instructions = vec![
        goto("M1"),
        label("P2"),
        Instruction::Return,
        label("M1"),
        Instruction::Gosub(Target::Symbolic(String::from("P2"))),
    ];

    let program = assemble(instructions, &AssemblerConfig::default()).unwrap();

    assert!(program
        .iter()
        .filter_map(|line| line.instruction.target())
        .all(|target| matches!(target, Target::Line(_))));
}

#[test]
fn test_label_text_inside_another_label() {
    let instructions = vec![goto("T1"), goto("T11"), label("T11"), label("T1")];

    assert_eq!(
        rendered(instructions, &AssemblerConfig::default()),
        vec!["10 GOTO 40", "20 GOTO 30", "30 REM T11", "40 REM T1"]
    );
}

#[test]
fn test_custom_numbering() {
    let config = AssemblerConfig { base: 100, step: 5 };

    assert_eq!(
        rendered(vec![label("L1"), goto("L1")], &config),
        vec!["100 REM L1", "105 GOTO 100"]
    );
}

#[test]
fn test_program_display() {
    let program = assemble(vec![Instruction::Stop, Instruction::Return], &AssemblerConfig::default()).unwrap();

    assert_eq!(program.to_string(), "10 STOP\n20 RETURN\n");
    assert_eq!(program.len(), 2);
}

#[test]
fn test_duplicate_label() {
    let error = assemble(vec![label("T1"), label("T1")], &AssemblerConfig::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "DuplicateLabel");
    assert_eq!(error.to_string(), "Assembly Error: Duplicate definition for label: T1");
}

#[test]
fn test_undefined_label() {
    let error = assemble(vec![goto("E9")], &AssemblerConfig::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UndefinedLabel");
}

#[test]
fn test_line_overflow() {
    let config = AssemblerConfig {
        base: u32::MAX - 1,
        step: 1,
    };

    assert!(assemble(vec![Instruction::Stop, Instruction::Stop], &config).is_ok());

    let error = assemble(vec![Instruction::Stop; 3], &config).unwrap_err();
    assert_eq!(error.get_error_name(), "CapacityError");
}

#[test]
fn test_zero_step() {
    let config = AssemblerConfig { base: 10, step: 0 };

    assert_eq!(
        assemble(vec![Instruction::Stop], &config).unwrap_err().get_error_name(),
        "CapacityError"
    );
}

#[test]
fn test_empty_program() {
    let program = assemble(vec![], &AssemblerConfig::default()).unwrap();

    assert!(program.is_empty());
    assert_eq!(program.to_string(), "");
}
