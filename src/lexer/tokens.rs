use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("glob", TokenKind::Glob);
        map.insert("proc", TokenKind::Proc);
        map.insert("func", TokenKind::Func);
        map.insert("main", TokenKind::Main);
        map.insert("var", TokenKind::Var);
        map.insert("local", TokenKind::Local);
        map.insert("return", TokenKind::Return);
        map.insert("halt", TokenKind::Halt);
        map.insert("print", TokenKind::Print);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("until", TokenKind::Until);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("neg", TokenKind::Neg);
        map.insert("not", TokenKind::Not);
        map.insert("eq", TokenKind::Eq);
        map.insert("or", TokenKind::Or);
        map.insert("and", TokenKind::And);
        map.insert("plus", TokenKind::Plus);
        map.insert("minus", TokenKind::Minus);
        map.insert("mult", TokenKind::Mult);
        map.insert("div", TokenKind::Div);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Greater,    // >
    Semicolon,
    Comma,

    // Reserved
    Glob,
    Proc,
    Func,
    Main,
    Var,
    Local,
    Return,
    Halt,
    Print,
    While,
    Do,
    Until,
    If,
    Else,

    // Operator words
    Neg,
    Not,
    Eq,
    Or,
    And,
    Plus,
    Minus,
    Mult,
    Div,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token({}, '{}', {}:{})",
            self.kind,
            self.value,
            self.span.start.line(),
            self.span.start.column()
        )
    }
}

impl Token {
    /// Builds a token the way an external tokenizer would hand it over:
    /// kind, literal text, line and column.
    pub fn new(kind: TokenKind, value: &str, line: u32, column: u32) -> Self {
        let start = crate::Position(line, column);
        let end = crate::Position(line, column + value.chars().count() as u32);

        Token {
            kind,
            value: String::from(value),
            span: Span { start, end },
        }
    }

    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }
}
