use crate::{
    ast::{
        ast::{Definition, DefinitionKind, MainProgram, Program, VarDecl},
        statements::{Call, Instr, InstrKind, Output},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_atom, parse_term, parse_var_ref},
    parser::Parser,
};

/// Upper bound of parameter, local and argument lists.
pub const MAX_THREE: usize = 3;

/// SPL_PROG ::= glob { VARIABLES } proc { PDEF* } func { FDEF* } main { MAINPROG }
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    parser.expect(TokenKind::Glob)?;
    parser.expect(TokenKind::OpenCurly)?;
    let globals = parse_variables(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    parser.expect(TokenKind::Proc)?;
    parser.expect(TokenKind::OpenCurly)?;
    let mut procedures = vec![];
    while parser.current_token_kind() == TokenKind::Identifier {
        procedures.push(parse_definition(parser, DefinitionKind::Procedure)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    parser.expect(TokenKind::Func)?;
    parser.expect(TokenKind::OpenCurly)?;
    let mut functions = vec![];
    while parser.current_token_kind() == TokenKind::Identifier {
        functions.push(parse_definition(parser, DefinitionKind::Function)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    let main = parse_main(parser)?;

    Ok(Program {
        globals,
        procedures,
        functions,
        main,
    })
}

/// VARIABLES ::= ( NAME [;] )*
fn parse_variables(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let mut variables = vec![];

    while parser.current_token_kind() == TokenKind::Identifier {
        let var = parse_var_ref(parser)?;
        variables.push(VarDecl {
            name: var.name,
            span: var.span,
        });
        parser.skip(TokenKind::Semicolon);
    }

    Ok(variables)
}

/// MAXTHREE ::= up to three NAMEs
fn parse_max_three(parser: &mut Parser, what: &str) -> Result<Vec<VarDecl>, Error> {
    let mut names = vec![];

    while parser.current_token_kind() == TokenKind::Identifier {
        if names.len() == MAX_THREE {
            return Err(Error::new(
                ErrorImpl::TooManyNames {
                    what: String::from(what),
                },
                parser.get_position(),
            ));
        }

        let var = parse_var_ref(parser)?;
        names.push(VarDecl {
            name: var.name,
            span: var.span,
        });

        if !parser.skip(TokenKind::Comma) {
            parser.skip(TokenKind::Semicolon);
        }
    }

    Ok(names)
}

/// PDEF ::= NAME ( MAXTHREE ) { local { MAXTHREE } ALGO }
/// FDEF ::= NAME ( MAXTHREE ) { local { MAXTHREE } ALGO ; return ATOM }
fn parse_definition(parser: &mut Parser, kind: DefinitionKind) -> Result<Definition, Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_max_three(parser, "parameters")?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;
    parser.expect(TokenKind::Local)?;
    parser.expect(TokenKind::OpenCurly)?;
    let locals = parse_max_three(parser, "local variables")?;
    parser.expect(TokenKind::CloseCurly)?;

    let body = parse_algo(parser)?;

    let return_value = match kind {
        DefinitionKind::Procedure => None,
        DefinitionKind::Function => {
            parser.skip(TokenKind::Semicolon);
            let error = parser.unexpected("expected 'return' at the end of a function body");
            parser.expect_error(TokenKind::Return, Some(error))?;
            Some(parse_atom(parser)?)
        }
    };

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Definition {
        name: name_token.value,
        kind,
        parameters,
        locals,
        body,
        return_value,
        span: Span {
            start: name_token.span.start,
            end: parser.previous_end(),
        },
    })
}

/// MAINPROG ::= var { VARIABLES } ALGO
fn parse_main(parser: &mut Parser) -> Result<MainProgram, Error> {
    let start = parser.expect(TokenKind::Main)?.span.start;
    parser.expect(TokenKind::OpenCurly)?;

    parser.expect(TokenKind::Var)?;
    parser.expect(TokenKind::OpenCurly)?;
    let variables = parse_variables(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    let body = parse_algo(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(MainProgram {
        variables,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

fn ends_algo(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::CloseCurly | TokenKind::Return | TokenKind::EOF)
}

/// ALGO ::= INSTR ( ; INSTR )* [;]
///
/// An ALGO may be empty; it ends before a closing brace or a `return`.
pub fn parse_algo(parser: &mut Parser) -> Result<Vec<Instr>, Error> {
    let mut instructions = vec![];

    if ends_algo(parser.current_token_kind()) {
        return Ok(instructions);
    }

    instructions.push(parse_instr(parser)?);

    while parser.skip(TokenKind::Semicolon) {
        if ends_algo(parser.current_token_kind()) {
            break;
        }
        instructions.push(parse_instr(parser)?);
    }

    Ok(instructions)
}

pub fn parse_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let token_kind = parser.current_token_kind();

    match parser.get_instr_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("expected an instruction")),
    }
}

pub fn parse_halt_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let span = parser.advance().span.clone();

    Ok(Instr {
        kind: InstrKind::Halt,
        span,
    })
}

/// print OUTPUT, OUTPUT ::= ATOM | string
pub fn parse_print_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let start = parser.advance().span.start;

    let output = if parser.current_token_kind() == TokenKind::String {
        Output::Text(parser.advance().value.clone())
    } else {
        Output::Atom(parse_atom(parser)?)
    };

    Ok(Instr {
        kind: InstrKind::Print(output),
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

/// INPUT ::= up to three ATOMs, optionally comma separated
fn parse_call(parser: &mut Parser) -> Result<Call, Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if arguments.len() == MAX_THREE {
            return Err(Error::new(
                ErrorImpl::TooManyNames {
                    what: String::from("arguments"),
                },
                parser.get_position(),
            ));
        }

        arguments.push(parse_atom(parser)?);
        parser.skip(TokenKind::Comma);
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(Call {
        name: name_token.value,
        arguments,
        span: Span {
            start: name_token.span.start,
            end: parser.previous_end(),
        },
    })
}

/// NAME ( INPUT ) | NAME = NAME ( INPUT ) | NAME = TERM
pub fn parse_name_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let start = parser.get_position();

    if parser.peek_kind(1) == TokenKind::OpenParen {
        let call = parse_call(parser)?;
        return Ok(Instr {
            span: call.span.clone(),
            kind: InstrKind::Call(call),
        });
    }

    let target = parse_var_ref(parser)?;
    let error = parser.unexpected("expected '=' or '(' after a name");
    parser.expect_error(TokenKind::Assignment, Some(error))?;

    let kind = if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::OpenParen
    {
        InstrKind::AssignCall {
            target,
            call: parse_call(parser)?,
        }
    } else {
        InstrKind::Assign {
            target,
            value: parse_term(parser)?,
        }
    };

    Ok(Instr {
        kind,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

fn parse_block(parser: &mut Parser) -> Result<Vec<Instr>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_algo(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(body)
}

/// while TERM { ALGO }
pub fn parse_while_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let start = parser.advance().span.start;

    let condition = parse_term(parser)?;
    let body = parse_block(parser)?;

    Ok(Instr {
        kind: InstrKind::While { condition, body },
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

/// do { ALGO } until TERM
pub fn parse_do_until_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let start = parser.advance().span.start;

    let body = parse_block(parser)?;
    parser.expect(TokenKind::Until)?;
    let condition = parse_term(parser)?;

    Ok(Instr {
        kind: InstrKind::DoUntil { body, condition },
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

/// if TERM { ALGO } [ else { ALGO } ]
pub fn parse_if_instr(parser: &mut Parser) -> Result<Instr, Error> {
    let start = parser.advance().span.start;

    let condition = parse_term(parser)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.skip(TokenKind::Else) {
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Instr {
        kind: InstrKind::If {
            condition,
            then_body,
            else_body,
        },
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}
