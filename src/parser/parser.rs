//! Parser implementation for building the program tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! SPL terms are fully parenthesised, so no precedence climbing is needed;
//! the parser keeps the lookup-table shape anyway:
//! - Instruction handlers keyed by the first token of an instruction
//! - NUD (null denotation) handlers for the first token of a term
//! - Operator tables mapping operator keywords to unary/binary operators

use std::collections::HashMap;

use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryOp, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BinaryLookup, InstrHandler, InstrLookup, NUDHandler, NUDLookup,
        UnaryLookup,
    },
    stmt::parse_program,
};

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream, the position of the current token and the lookup
/// tables used to dispatch on token kinds.
pub struct Parser {
    /// The list of tokens to parse, always terminated by an EOF token
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for instruction parsing handlers
    instr_lookup: InstrLookup,
    /// Lookup table for term handlers
    nud_lookup: NUDLookup,
    /// Operator keywords allowed in `( UNOP TERM )`
    unary_lookup: UnaryLookup,
    /// Operator keywords allowed in `( TERM BINOP TERM )`
    binary_lookup: BinaryLookup,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or(Position(1, 1));

            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span { start: end, end },
            });
        }

        Parser {
            tokens,
            pos: 0,
            instr_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            unary_lookup: HashMap::new(),
            binary_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing. Past the end this keeps
    /// returning the trailing EOF token.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `offset` positions after the current one.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        self.pos += 1;
        &self.tokens[index]
    }

    /// Consumes the current token when it has the given kind.
    pub fn skip(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: token.value.clone(),
                        message: format!("expected {}", expected_kind),
                    },
                    token.span.start,
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    pub fn get_instr_lookup(&self) -> &InstrLookup {
        &self.instr_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_unary_lookup(&self) -> &UnaryLookup {
        &self.unary_lookup
    }

    pub fn get_binary_lookup(&self) -> &BinaryLookup {
        &self.binary_lookup
    }

    /// Registers an instruction handler for the token an instruction starts with.
    pub fn instr(&mut self, kind: TokenKind, instr_fn: InstrHandler) {
        self.instr_lookup.insert(kind, instr_fn);
    }

    /// Registers a null denotation handler for the token a term starts with.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn unary(&mut self, kind: TokenKind, op: UnaryOp) {
        self.unary_lookup.insert(kind, op);
    }

    pub fn binary(&mut self, kind: TokenKind, op: BinaryOp) {
        self.binary_lookup.insert(kind, op);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// Returns the end position of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => token.span.end,
            None => self.get_position(),
        }
    }

    /// Builds an UnexpectedToken error for the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.span.start,
        )
    }
}

/// Parses a stream of tokens into a program tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables and parses one `SPL_PROG`, which must be
/// followed by the end of input.
pub fn parse(tokens: Vec<Token>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let program = parse_program(&mut parser)?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(parser.unexpected("expected end of program"));
    }

    Ok(program)
}
