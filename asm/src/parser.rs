use crate::config::Limits;
use crate::error::{Error, Resource};
use crate::table::SymbolTable;
use crate::token::{Token, TokenKind};
use arch::{
    alu::{Comp, Op},
    dest::Dest,
    inst::Inst,
    jump::Jump,
    reg::Reg,
    symbol::Predef,
};
use log::debug;

// ----------------------------------------------------------------------------
// Statement

/// An instruction whose address operand may still be symbolic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code<'a> {
    Symbol(&'a str),
    Inst(Inst),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stmt<'a> {
    pub code: Code<'a>,
    /// Byte offset of the token that starts the instruction.
    pub offset: usize,
}

pub struct Program<'a> {
    pub stmts: Vec<Stmt<'a>>,
    pub labels: SymbolTable<'a>,
}

// ----------------------------------------------------------------------------
// Parser

pub struct Parser<'a, 't> {
    tokens: &'t [Token<'a>],
    pos: usize,
    stmts: Vec<Stmt<'a>>,
    labels: SymbolTable<'a>,
    capacity: usize,
}

/// Next token must match one of the patterns; evaluates to the arm's value.
macro_rules! expect {
    ($parser:expr, $($kind:pat => $value:expr),+ $(,)?) => {{
        let token = $parser.next()?;
        match token.kind {
            $($kind => $value,)+
            kind => return Err(Error::UnexpectedToken(token.offset, kind.to_string())),
        }
    }};
}

impl<'a, 't> Parser<'a, 't> {
    pub fn new(tokens: &'t [Token<'a>], limits: &Limits) -> Self {
        Parser {
            tokens,
            pos: 0,
            stmts: Vec::with_capacity(limits.insts.min(tokens.len())),
            labels: SymbolTable::new(Resource::Labels, limits.labels),
            capacity: limits.insts,
        }
    }

    /// Peek : Watch next token without consuming it
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    /// Next : Consume next token; running out of tokens is an error
    /// located at the last token of the file.
    fn next(&mut self) -> Result<Token<'a>, Error> {
        let token = self.peek().ok_or_else(|| {
            Error::UnexpectedEOF(self.tokens.last().map_or(0, |token| token.offset))
        })?;
        self.pos += 1;
        Ok(token)
    }

    fn emit(&mut self, code: Code<'a>, offset: usize) -> Result<(), Error> {
        if self.stmts.len() >= self.capacity {
            return Err(Error::Capacity(Resource::Insts, self.capacity));
        }
        self.stmts.push(Stmt { code, offset });
        Ok(())
    }
}

impl<'a, 't> Parser<'a, 't> {
    pub fn parse(mut self) -> Result<Program<'a>, Error> {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Atmark => {
                    self.pos += 1;
                    self.parse_address(token.offset)?;
                }
                TokenKind::LParen => {
                    self.pos += 1;
                    self.parse_label()?;
                }
                TokenKind::Number(_) | TokenKind::Ident(_) => self.parse_compute(token.offset)?,
                kind => return Err(Error::UnexpectedToken(token.offset, kind.to_string())),
            }
        }
        Ok(Program {
            stmts: self.stmts,
            labels: self.labels,
        })
    }

    // @value | @symbol
    fn parse_address(&mut self, offset: usize) -> Result<(), Error> {
        let code = expect!(self,
            TokenKind::Number(value) => Code::Inst(Inst::Address(value)),
            TokenKind::Ident(name) => match Predef::lookup(name) {
                Some(addr) => Code::Inst(Inst::Address(addr)),
                None => Code::Symbol(name),
            }
        );
        self.emit(code, offset)
    }

    // (LABEL)
    fn parse_label(&mut self) -> Result<(), Error> {
        let name = expect!(self, TokenKind::Ident(name) => name);
        // Labels never exceed the instruction capacity, which fits 15 bits.
        let addr = self.stmts.len() as u16;
        if let Some(prev) = self.labels.insert(name, addr)? {
            debug!("label `{}` redefined: {} -> {}", name, prev, addr);
        } else {
            debug!("label `{}` = {}", name, addr);
        }
        expect!(self, TokenKind::RParen => ());
        Ok(())
    }

    // dest=comp;jump, with dest and jump optional
    fn parse_compute(&mut self, offset: usize) -> Result<(), Error> {
        let split = self.tokens[self.pos..]
            .iter()
            .position(|token| matches!(token.kind, TokenKind::Equal | TokenKind::Semicolon))
            .map(|idx| self.pos + idx);

        let (dest, comp, jump) = match split.map(|idx| (idx, self.tokens[idx].kind)) {
            Some((end, TokenKind::Equal)) => {
                let dest = self.parse_dest(end)?;
                let comp = self.parse_comp()?;
                let jump = match self.peek() {
                    Some(Token {
                        kind: TokenKind::Semicolon,
                        ..
                    }) => {
                        self.pos += 1;
                        self.parse_jump()?
                    }
                    _ => Jump::Null,
                };
                (dest, comp, jump)
            }
            Some((end, _)) => {
                let comp = self.parse_comp()?;
                if self.pos != end {
                    let token = self.tokens[self.pos];
                    return Err(Error::UnexpectedToken(token.offset, token.kind.to_string()));
                }
                self.pos += 1; // consume ';'
                (Dest::Null, comp, self.parse_jump()?)
            }
            None => (Dest::Null, self.parse_comp()?, Jump::Null),
        };

        self.emit(Code::Inst(Inst::Compute(comp, dest, jump)), offset)
    }

    /// Every token up to `end` (the `=`) contributes register flags.
    fn parse_dest(&mut self, end: usize) -> Result<Dest, Error> {
        let mut dest = Dest::Null;
        while self.pos < end {
            let token = self.next()?;
            let name = match token.kind {
                TokenKind::Ident(name) => name,
                kind => return Err(Error::UnexpectedToken(token.offset, kind.to_string())),
            };
            for (idx, ch) in name.char_indices() {
                let flag = &name[idx..idx + ch.len_utf8()];
                let reg = Reg::parse(flag)
                    .ok_or_else(|| Error::InvalidDest(token.offset, flag.to_string()))?;
                dest = dest
                    .with(reg)
                    .ok_or_else(|| Error::DuplicateDest(token.offset, flag.to_string()))?;
            }
        }
        self.pos += 1; // consume '='
        Ok(dest)
    }

    fn parse_comp(&mut self) -> Result<Comp, Error> {
        let left = self.next()?;
        let comp = match left.kind {
            TokenKind::Number(0) => Some(Comp::Zero),
            TokenKind::Number(1) => Some(Comp::One),
            TokenKind::Minus => match self.next()?.kind {
                TokenKind::Number(1) => Some(Comp::MinusOne),
                TokenKind::Ident(name) => Reg::parse(name).map(Comp::neg),
                _ => None,
            },
            TokenKind::Excl => match self.next()?.kind {
                TokenKind::Ident(name) => Reg::parse(name).map(Comp::not),
                _ => None,
            },
            TokenKind::Ident(name) => self.parse_comp_reg(name)?,
            _ => None,
        };
        comp.ok_or(Error::UnknownComp(left.offset))
    }

    /// `lhs`, `lhs+1`, `lhs-1` or `lhs op rhs`. When the two tokens after
    /// `lhs` do not form a known pair, they are left unconsumed and `lhs`
    /// alone is the comp; the tokens then start the next instruction.
    fn parse_comp_reg(&mut self, lhs: &'a str) -> Result<Option<Comp>, Error> {
        let lhs = Reg::parse(lhs);
        if self.pos == self.tokens.len() {
            return Ok(lhs.map(Comp::reg));
        }

        let op = self.next()?;
        let rhs = self.next()?;
        let comp = lhs.and_then(|lhs| match (op.kind, rhs.kind) {
            (TokenKind::Plus, TokenKind::Number(1)) => Some(Comp::inc(lhs)),
            (TokenKind::Minus, TokenKind::Number(1)) => Some(Comp::dec(lhs)),
            (kind, TokenKind::Ident(rhs)) => {
                let op = match kind {
                    TokenKind::Plus => Op::Add,
                    TokenKind::Minus => Op::Sub,
                    TokenKind::Ampersand => Op::And,
                    TokenKind::Pipe => Op::Or,
                    _ => return None,
                };
                Comp::binary(lhs, op, Reg::parse(rhs)?)
            }
            _ => None,
        });

        match comp {
            Some(comp) => Ok(Some(comp)),
            None => {
                self.pos -= 2;
                Ok(lhs.map(Comp::reg))
            }
        }
    }

    fn parse_jump(&mut self) -> Result<Jump, Error> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Ident(name) => {
                Jump::parse(name).ok_or(Error::UnknownJump(token.offset, format!("`{name}`")))
            }
            kind => Err(Error::UnknownJump(token.offset, kind.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    type Parsed = (Vec<Code<'static>>, Vec<(String, u16)>);

    fn parse_with(code: &str, limits: &Limits) -> Result<Parsed, Error> {
        let code: &'static str = Box::leak(code.to_string().into_boxed_str());
        let tokens = Lexer::new(code, limits).parse()?;
        let program = Parser::new(&tokens, limits).parse()?;
        let mut labels: Vec<(String, u16)> = program
            .labels
            .iter()
            .map(|s| (s.name.to_string(), s.address))
            .collect();
        labels.sort();
        Ok((program.stmts.iter().map(|s| s.code).collect(), labels))
    }

    fn parse(code: &str) -> Result<Vec<Code<'static>>, Error> {
        parse_with(code, &Limits::default()).map(|(codes, _)| codes)
    }

    fn compute(comp: Comp, dest: Dest, jump: Jump) -> Code<'static> {
        Code::Inst(Inst::Compute(comp, dest, jump))
    }

    macro_rules! case {
        ($($name:ident: $code:expr => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(parse($code).unwrap(), $expect);
                }
            )*
        }
    }

    macro_rules! fail {
        ($($name:ident: $code:expr => $err:pat,)*) => {
            $(
                #[test]
                fn $name() {
                    let result = parse($code);
                    assert!(matches!(result, Err($err)), "{:?}", result);
                }
            )*
        }
    }

    case! {
        address_literal: "@17" => vec![Code::Inst(Inst::Address(17))],
        address_symbol: "@foo" => vec![Code::Symbol("foo")],
        address_predef: "@SCREEN @THAT @R15" => vec![
            Code::Inst(Inst::Address(0x4000)),
            Code::Inst(Inst::Address(4)),
            Code::Inst(Inst::Address(15)),
        ],
        dest_comp: "D=A" => vec![compute(Comp::A, Dest::D, Jump::Null)],
        comp_jump: "D;JGT" => vec![compute(Comp::D, Dest::Null, Jump::JGT)],
        dest_comp_jump: "AM=M-1;JNE" => vec![compute(Comp::MMinusOne, Dest::AM, Jump::JNE)],
        zero_jump: "0;JMP" => vec![compute(Comp::Zero, Dest::Null, Jump::JMP)],
        one: "M=1" => vec![compute(Comp::One, Dest::M, Jump::Null)],
        minus_one: "D=-1" => vec![compute(Comp::MinusOne, Dest::D, Jump::Null)],
        negate: "A=-M" => vec![compute(Comp::NegM, Dest::A, Jump::Null)],
        not: "D=!D" => vec![compute(Comp::NotD, Dest::D, Jump::Null)],
        increment: "M=M+1" => vec![compute(Comp::MPlusOne, Dest::M, Jump::Null)],
        decrement: "D=A-1" => vec![compute(Comp::AMinusOne, Dest::D, Jump::Null)],
        d_plus_m: "M=D+M" => vec![compute(Comp::DPlusM, Dest::M, Jump::Null)],
        m_minus_d: "D=M-D" => vec![compute(Comp::MMinusD, Dest::D, Jump::Null)],
        d_and_a: "D=D&A" => vec![compute(Comp::DAndA, Dest::D, Jump::Null)],
        d_or_m: "AMD=D|M" => vec![compute(Comp::DOrM, Dest::AMD, Jump::Null)],
        dest_order: "DM=0" => vec![compute(Comp::Zero, Dest::MD, Jump::Null)],
        comp_alone_at_end: "D" => vec![compute(Comp::D, Dest::Null, Jump::Null)],
        sequence: "@2\nD=A\n@3\nD=D+A\n@0\nM=D" => vec![
            Code::Inst(Inst::Address(2)),
            compute(Comp::A, Dest::D, Jump::Null),
            Code::Inst(Inst::Address(3)),
            compute(Comp::DPlusA, Dest::D, Jump::Null),
            Code::Inst(Inst::Address(0)),
            compute(Comp::D, Dest::M, Jump::Null),
        ],
        // The unmatched `A` `=` is left for the next instruction.
        unknown_pair_rewinds: "D=M A=D" => vec![
            compute(Comp::M, Dest::D, Jump::Null),
            compute(Comp::D, Dest::A, Jump::Null),
        ],
    }

    fail! {
        bad_comp_operand: "D=Q" => Error::UnknownComp(2),
        bad_comp_literal: "D=2" => Error::UnknownComp(2),
        bad_negate: "D=-2" => Error::UnknownComp(2),
        bad_not: "D=!1" => Error::UnknownComp(2),
        bad_dest: "X=A" => Error::InvalidDest(0, _),
        repeated_dest: "MM=A" => Error::DuplicateDest(0, _),
        numeric_dest: "0=A" => Error::UnexpectedToken(0, _),
        bad_jump: "0;JXX" => Error::UnknownJump(2, _),
        jump_not_ident: "0;1" => Error::UnknownJump(2, _),
        comp_overruns_jump: "D+Q;JMP" => Error::UnexpectedToken(1, _),
        // `M&A` is not an ALU pair, so `M` is the comp and `&` starts
        // the next instruction.
        unpaired_operator: "D=M&A" => Error::UnexpectedToken(3, _),
        stray_rparen: "@1 )" => Error::UnexpectedToken(3, _),
        stray_operator: "+" => Error::UnexpectedToken(0, _),
        address_missing: "@1 @" => Error::UnexpectedEOF(3),
        address_bad_token: "@(" => Error::UnexpectedToken(1, _),
        label_missing: "(" => Error::UnexpectedEOF(0),
        label_number: "(12)" => Error::UnexpectedToken(1, _),
        label_unclosed: "(LOOP @1" => Error::UnexpectedToken(6, _),
        binary_missing_rhs: "M=D D" => Error::UnexpectedEOF(4),
    }

    #[test]
    fn labels_bind_next_instruction() {
        let (codes, labels) = parse_with(
            "(START) @1 D=A (MID) (ALSO) @START 0;JMP (END)",
            &Limits::default(),
        )
        .unwrap();
        assert_eq!(codes.len(), 4);
        assert_eq!(
            labels,
            vec![
                ("ALSO".to_string(), 2),
                ("END".to_string(), 4),
                ("MID".to_string(), 2),
                ("START".to_string(), 0),
            ]
        );
    }

    #[test]
    fn duplicate_label_overwrites() {
        let (_, labels) = parse_with("(X) @1 (X) @2", &Limits::default()).unwrap();
        assert_eq!(labels, vec![("X".to_string(), 1)]);
    }

    #[test]
    fn label_is_not_resolved_here() {
        assert_eq!(
            parse("@LOOP (LOOP)").unwrap(),
            vec![Code::Symbol("LOOP")]
        );
    }

    #[test]
    fn instruction_capacity() {
        let limits = Limits {
            insts: 2,
            ..Limits::default()
        };
        assert!(parse_with("@1 @2", &limits).is_ok());
        assert!(matches!(
            parse_with("@1 @2 @3", &limits),
            Err(Error::Capacity(Resource::Insts, 2))
        ));
    }

    #[test]
    fn label_capacity() {
        let limits = Limits {
            labels: 1,
            ..Limits::default()
        };
        assert!(matches!(
            parse_with("(A) (B)", &limits),
            Err(Error::Capacity(Resource::Labels, 1))
        ));
    }
}
