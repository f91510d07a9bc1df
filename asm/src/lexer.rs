use crate::config::Limits;
use crate::error::{Error, Resource};
use crate::token::{Token, TokenKind};
use arch::inst::MAX_ADDRESS;

pub struct Lexer<'a> {
    code: &'a str,
    pos: usize,
    tokens: Vec<Token<'a>>,
    capacity: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str, limits: &Limits) -> Self {
        Self {
            code,
            pos: 0,
            tokens: Vec::with_capacity(limits.tokens.min(code.len())),
            capacity: limits.tokens,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<u8> {
        self.code.as_bytes().get(self.pos).copied()
    }

    fn push(&mut self, kind: TokenKind<'a>, offset: usize) -> Result<(), Error> {
        if self.tokens.len() >= self.capacity {
            return Err(Error::Capacity(Resource::Tokens, self.capacity));
        }
        self.tokens.push(Token::new(kind, offset));
        Ok(())
    }

    fn unexpected(&self, offset: usize) -> Error {
        let ch = self.code[offset..].chars().next().unwrap_or('\0');
        Error::UnexpectedChar(offset, ch)
    }
}

// ----------------------------------------------------------------------------
// Lexer
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    pub fn parse(mut self) -> Result<Vec<Token<'a>>, Error> {
        while let Some(ch) = self.peek() {
            let start = self.pos;

            // 0. Skip whitespaces
            if matches!(ch, b' ' | b'\t' | b'\r' | b'\n') {
                self.pos += 1;
                continue;
            }

            // 1. Comment
            if ch == b'/' {
                self.skip_comment()?;
                continue;
            }

            // 2. Single character token
            if let Some(kind) = single_char_token(ch) {
                self.pos += 1;
                self.push(kind, start)?;
                continue;
            }

            // 3. Number literal
            if ch.is_ascii_digit() {
                let value = self.parse_number()?;
                self.push(TokenKind::Number(value), start)?;
                continue;
            }

            // 4. Identifier
            let ident = self.parse_ident();
            if ident.is_empty() {
                return Err(self.unexpected(start));
            }
            self.push(TokenKind::Ident(ident), start)?;
        }
        Ok(self.tokens)
    }

    fn skip_comment(&mut self) -> Result<(), Error> {
        self.pos += 1; // consume '/'
        match self.peek() {
            Some(b'/') => {}
            Some(_) => return Err(Error::MalformedComment(self.pos)),
            None => return Err(Error::MalformedComment(self.pos - 1)),
        }
        while self.peek().is_some_and(|ch| ch != b'\n') {
            self.pos += 1;
        }
        Ok(())
    }

    /// Reject on the first digit that pushes the value past 15 bits, so a
    /// long literal can never wrap around into range.
    fn parse_number(&mut self) -> Result<u16, Error> {
        let start = self.pos;
        let mut value: u16 = 0;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u16::from(digit - b'0')))
                .filter(|v| *v <= MAX_ADDRESS)
                .ok_or(Error::LiteralOverflow(start))?;
            self.pos += 1;
        }
        Ok(value)
    }

    fn parse_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        &self.code[start..self.pos]
    }
}

fn is_ident_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b'_' | b'.' | b'$' | b':')
}

fn single_char_token<'a>(ch: u8) -> Option<TokenKind<'a>> {
    match ch {
        b'(' => Some(TokenKind::LParen),
        b')' => Some(TokenKind::RParen),
        b'@' => Some(TokenKind::Atmark),
        b'=' => Some(TokenKind::Equal),
        b';' => Some(TokenKind::Semicolon),
        b'+' => Some(TokenKind::Plus),
        b'-' => Some(TokenKind::Minus),
        b'!' => Some(TokenKind::Excl),
        b'&' => Some(TokenKind::Ampersand),
        b'|' => Some(TokenKind::Pipe),
        _ => None,
    }
}
