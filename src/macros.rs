//! Lexer helper macros.
//!
//! `MK_TOKEN!` builds a `Token`; `MK_DEFAULT_HANDLER!` builds the handler
//! for a punctuation pattern whose text never varies.

/// `MK_TOKEN!(TokenKind::Number, String::from("42"), span)`
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Handler for a fixed-text token such as `{` or `;`.
///
/// Pushes a token of `$kind` and moves past `$value`. The text never holds a
/// line break, so only the column advances.
///
/// ```ignore
/// pattern("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| -> Result<(), Error> {
            let start = lexer.position();
            lexer.advance_n($value.len());
            lexer.push(MK_TOKEN!(
                $kind,
                String::from($value),
                Span {
                    start,
                    end: lexer.position(),
                }
            ));
            Ok(())
        }
    };
}
