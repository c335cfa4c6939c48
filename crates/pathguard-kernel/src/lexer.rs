//! Lexer for typed declaration sources.
//!
//! Built on logos. The token set only distinguishes what the declaration
//! parser needs; every other non-whitespace character becomes
//! [`Token::Other`], so foreign syntax never stops the scan.

use std::fmt;
use std::ops::Range;

use logos::{Lexer, Logos};

/// A lexical token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\u{feff}]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("var")]
    Var,

    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("=>")]
    Arrow,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("|")]
    Pipe,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    /// Single- or double-quoted string, escapes resolved.
    #[regex(r#""([^"\\\n]|\\(.|\n))*""#, unescape)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'", unescape)]
    Str(String),

    /// Backtick template literal, kept opaque.
    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    Template,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?", priority = 3)]
    Number,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Any other single character.
    #[regex(r"[^\s]", |lex| lex.slice().chars().next(), priority = 0)]
    Other(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Const => write!(f, "const"),
            Token::Let => write!(f, "let"),
            Token::Var => write!(f, "var"),
            Token::Colon => write!(f, ":"),
            Token::Eq => write!(f, "="),
            Token::Arrow => write!(f, "=>"),
            Token::Semi => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Pipe => write!(f, "|"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Str(s) => write!(f, "{:?}", s),
            Token::Template => write!(f, "template literal"),
            Token::Number => write!(f, "number"),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Other(c) => write!(f, "{}", c),
        }
    }
}

/// A token with its byte range in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

/// Text the lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: Range<usize>,
    pub text: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized input {:?} at {}..{}",
            self.text, self.span.start, self.span.end
        )
    }
}

/// Tokenize `source`, collecting errors instead of stopping at them.
pub fn tokenize(source: &str) -> (Vec<Spanned>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => errors.push(LexError {
                text: lexer.slice().to_string(),
                span,
            }),
        }
    }

    (tokens, errors)
}

/// Resolve escape sequences in a quoted string token.
fn unescape(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            // Line continuation.
            Some('\n') => {}
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

fn push_code_point(out: &mut String, hex: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => out.push('\u{fffd}'),
    }
}
