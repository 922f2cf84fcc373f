//! Lexical analysis.
//!
//! Tokens are produced by a [`logos`]-derived lexer. Whitespace and both
//! comment forms are skipped. Regular-expression literals are not lexed
//! here: `/` is context-sensitive, so the parser scans them from the lexer
//! remainder when a value is expected.

use logos::Logos;

/// A lexical token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("var")]
    Var,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("typeof")]
    Typeof,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Assignment operators
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,

    // Comparison and logic
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    StrictEq,
    #[token("!==")]
    StrictNotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
}

impl Token {
    /// Returns the assignment operator text, if this token is one.
    pub const fn assign_op(&self) -> Option<&'static str> {
        match self {
            Token::Assign => Some("="),
            Token::PlusAssign => Some("+="),
            Token::MinusAssign => Some("-="),
            Token::StarAssign => Some("*="),
            Token::SlashAssign => Some("/="),
            _ => None,
        }
    }

    /// Returns `(operator text, precedence)` for binary operators.
    ///
    /// Higher binds tighter; the parser climbs from 1.
    pub const fn binary_op(&self) -> Option<(&'static str, u8)> {
        match self {
            Token::OrOr => Some(("||", 1)),
            Token::AndAnd => Some(("&&", 2)),
            Token::EqEq => Some(("==", 3)),
            Token::NotEq => Some(("!=", 3)),
            Token::StrictEq => Some(("===", 3)),
            Token::StrictNotEq => Some(("!==", 3)),
            Token::Lt => Some(("<", 4)),
            Token::Gt => Some((">", 4)),
            Token::Le => Some(("<=", 4)),
            Token::Ge => Some((">=", 4)),
            Token::Plus => Some(("+", 5)),
            Token::Minus => Some(("-", 5)),
            Token::Star => Some(("*", 6)),
            Token::Slash => Some(("/", 6)),
            Token::Percent => Some(("%", 6)),
            _ => None,
        }
    }

    /// Returns the unary operator text, if this token starts a unary
    /// expression.
    pub const fn unary_op(&self) -> Option<&'static str> {
        match self {
            Token::Bang => Some("!"),
            Token::Minus => Some("-"),
            Token::Typeof => Some("typeof"),
            _ => None,
        }
    }
}

/// Decodes the interior of a string literal (without its quotes).
///
/// Handles the common single-character escapes; unknown escapes keep the
/// escaped character, matching lenient script engines.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
