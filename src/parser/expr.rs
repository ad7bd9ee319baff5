use crate::{
    ast::expressions::{Atom, Term, VarRef},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

pub fn parse_term(parser: &mut Parser) -> Result<Term, Error> {
    let token_kind = parser.current_token_kind();

    match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("expected a term")),
    }
}

/// ATOM ::= NAME | number
pub fn parse_atom(parser: &mut Parser) -> Result<Atom, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.current_token();
            match token.value.parse::<u64>() {
                Ok(value) => Ok(Atom::Number {
                    value,
                    span: parser.advance().span.clone(),
                }),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start,
                )),
            }
        }
        TokenKind::Identifier => Ok(Atom::Variable(parse_var_ref(parser)?)),
        _ => Err(parser.unexpected("expected a variable name or a number")),
    }
}

pub fn parse_var_ref(parser: &mut Parser) -> Result<VarRef, Error> {
    let error = parser.unexpected("expected a variable name");
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(VarRef {
        name: token.value,
        span: token.span,
    })
}

pub fn parse_atom_term(parser: &mut Parser) -> Result<Term, Error> {
    Ok(Term::Atom(parse_atom(parser)?))
}

/// `( UNOP TERM )` or `( TERM BINOP TERM )`
pub fn parse_grouped_term(parser: &mut Parser) -> Result<Term, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    if let Some(op) = parser.get_unary_lookup().get(&parser.current_token_kind()).copied() {
        parser.advance();
        let operand = parse_term(parser)?;
        parser.expect(TokenKind::CloseParen)?;

        return Ok(Term::Unary {
            op,
            operand: Box::new(operand),
            span: Span {
                start,
                end: parser.previous_end(),
            },
        });
    }

    let left = parse_term(parser)?;

    let op = match parser.get_binary_lookup().get(&parser.current_token_kind()).copied() {
        Some(op) => op,
        None => return Err(parser.unexpected("expected a binary operator")),
    };
    parser.advance();

    let right = parse_term(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Term::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}
