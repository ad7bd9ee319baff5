use std::collections::HashMap;

use crate::{
    ast::{
        expressions::{BinaryOp, Term, UnaryOp},
        statements::Instr,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

pub type InstrHandler = fn(&mut Parser) -> Result<Instr, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Term, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Unary
    parser.unary(TokenKind::Neg, UnaryOp::Neg);
    parser.unary(TokenKind::Not, UnaryOp::Not);

    // Comparison
    parser.binary(TokenKind::Eq, BinaryOp::Eq);
    parser.binary(TokenKind::Greater, BinaryOp::Gt);

    // Logical
    parser.binary(TokenKind::Or, BinaryOp::Or);
    parser.binary(TokenKind::And, BinaryOp::And);

    // Arithmetic
    parser.binary(TokenKind::Plus, BinaryOp::Plus);
    parser.binary(TokenKind::Minus, BinaryOp::Minus);
    parser.binary(TokenKind::Mult, BinaryOp::Mult);
    parser.binary(TokenKind::Div, BinaryOp::Div);

    // Atoms and groups
    parser.nud(TokenKind::Number, parse_atom_term);
    parser.nud(TokenKind::Identifier, parse_atom_term);
    parser.nud(TokenKind::OpenParen, parse_grouped_term);

    // Instructions
    parser.instr(TokenKind::Halt, parse_halt_instr);
    parser.instr(TokenKind::Print, parse_print_instr);
    parser.instr(TokenKind::Identifier, parse_name_instr);
    parser.instr(TokenKind::While, parse_while_instr);
    parser.instr(TokenKind::Do, parse_do_until_instr);
    parser.instr(TokenKind::If, parse_if_instr);
}

// Lookup tables inside parser struct, so it's easier
pub type InstrLookup = HashMap<TokenKind, InstrHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type UnaryLookup = HashMap<TokenKind, UnaryOp>;
pub type BinaryLookup = HashMap<TokenKind, BinaryOp>;
