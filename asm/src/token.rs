use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, offset: usize) -> Self {
        Token { kind, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    // Literals
    Number(u16),

    // Identifier, borrowed from the source text
    Ident(&'a str),

    // Single character tokens
    LParen,    // '('
    RParen,    // ')'
    Atmark,    // '@'
    Equal,     // '='
    Semicolon, // ';'
    Plus,      // '+'
    Minus,     // '-'
    Excl,      // '!'
    Ampersand, // '&'
    Pipe,      // '|'
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number `{n}`"),
            TokenKind::Ident(s) => write!(f, "identifier `{s}`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Atmark => write!(f, "`@`"),
            TokenKind::Equal => write!(f, "`=`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Excl => write!(f, "`!`"),
            TokenKind::Ampersand => write!(f, "`&`"),
            TokenKind::Pipe => write!(f, "`|`"),
        }
    }
}
