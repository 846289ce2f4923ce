use logos::{Lexer, Logos};

/// Tokens of the GraphQL type system definition language.
///
/// Strings are kept as raw source slices. The schema reader only needs to step over descriptions
/// and default values, so escape sequences are never decoded.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("=")]
    Equal,

    #[token("!")]
    Exclam,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[regex(r"@[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    DirectiveName(&'a str),

    #[regex(r"\$[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    Variable(&'a str),

    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*", |lex| lex.slice())]
    Name(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)[.][0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    #[regex("-?([1-9][0-9]*|0)[eE][+-]?[0-9]+", |lex| lex.slice())]
    Float(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)", |lex| lex.slice())]
    Integer(&'a str),

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#, |lex| { let slice = lex.slice(); &slice[1..slice.len() - 1] })]
    String(&'a str),

    #[token(r#"""""#, lex_block_string)]
    BlockString(&'a str),

    #[error]
    #[regex(r"([ ,\t\n\r\f]+|#[^\n\r]*)+", logos::skip)]
    Error,

    /// Token indicates the end of the input
    End,
}

/// Scans for the closing `"""` of a block string, stepping over escaped `\"""` sequences.
fn lex_block_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let remainder = lex.remainder();
    let mut offset = 0;
    while let Some(index) = remainder[offset..].find(r#"""""#) {
        let end = offset + index;
        if remainder[..end].ends_with('\\') {
            offset = end + 3;
            continue;
        }
        lex.bump(end + 3);
        return Some(&remainder[..end]);
    }
    None
}
