pub mod config;
pub mod encode;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolve;
pub mod source;
pub mod table;
pub mod token;
pub mod util;

use crate::config::Limits;
use crate::error::{Error, Resource};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::source::SourceBuffer;
use crate::table::SymbolTable;
use arch::inst::Inst;
use log::info;

/// Result of a successful translation. Symbol names borrow from the source.
pub struct Assembly<'a> {
    pub insts: Vec<Inst>,
    /// Byte offset of the statement each instruction came from.
    pub origins: Vec<usize>,
    pub labels: SymbolTable<'a>,
    pub vars: SymbolTable<'a>,
}

impl Assembly<'_> {
    pub fn encode(&self) -> String {
        encode::encode(&self.insts)
    }
}

pub fn assemble<'a>(source: &'a SourceBuffer, limits: &Limits) -> Result<Assembly<'a>, Error> {
    limits.validate()?;

    // One slot of the character budget is reserved for a terminator.
    if source.len() + 1 >= limits.chars {
        return Err(Error::Capacity(Resource::Chars, limits.chars));
    }
    info!("1. Read {} ({} bytes)", source.path(), source.len());

    let tokens = Lexer::new(source.code(), limits).parse()?;
    info!("2. Lexed {} tokens", tokens.len());

    let program = Parser::new(&tokens, limits).parse()?;
    info!(
        "3. Parsed {} instructions, {} labels",
        program.stmts.len(),
        program.labels.len()
    );

    let mut vars = SymbolTable::new(Resource::Vars, limits.vars);
    let insts = resolve::resolve(&program.stmts, &program.labels, &mut vars)?;
    info!("4. Resolved {} variables", vars.len());

    for (name, table) in [("labels", &program.labels), ("vars", &vars)] {
        info!(
            "   {:<6} len={} capacity={} collisions={}",
            name,
            table.len(),
            table.capacity(),
            table.collisions()
        );
    }

    Ok(Assembly {
        insts,
        origins: program.stmts.iter().map(|stmt| stmt.offset).collect(),
        labels: program.labels,
        vars,
    })
}

/// Source text to binary text in one call.
pub fn translate(source: &SourceBuffer, limits: &Limits) -> Result<String, Error> {
    assemble(source, limits).map(|assembly| assembly.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: &str) -> Result<String, Error> {
        translate(&SourceBuffer::new("test.asm", code), &Limits::default())
    }

    #[test]
    fn add() {
        let code = "// Computes R0 = 2 + 3\n@2\nD=A\n@3\nD=D+A\n@0\nM=D\n";
        assert_eq!(
            run(code).unwrap(),
            "0000000000000010\n\
             1110110000010000\n\
             0000000000000011\n\
             1110000010010000\n\
             0000000000000000\n\
             1110001100001000\n"
        );
    }

    #[test]
    fn empty_program() {
        assert_eq!(run("").unwrap(), "");
        assert_eq!(run("// only a comment\n\n").unwrap(), "");
    }

    #[test]
    fn origins_follow_statements() {
        let source = SourceBuffer::new("test.asm", "(TOP)\n@x\n  M=0\n@TOP\n0;JMP\n");
        let assembly = assemble(&source, &Limits::default()).unwrap();
        assert_eq!(assembly.origins, vec![6, 11, 15, 20]);
        assert_eq!(assembly.labels.get("TOP").unwrap(), Some(0));
        assert_eq!(assembly.vars.get("x").unwrap(), Some(16));
    }

    #[test]
    fn source_capacity() {
        let limits = Limits {
            chars: 8,
            ..Limits::default()
        };
        let fits = SourceBuffer::new("a.asm", "@12345");
        let too_long = SourceBuffer::new("b.asm", "@123456");
        assert!(translate(&fits, &limits).is_ok());
        assert!(matches!(
            translate(&too_long, &limits),
            Err(Error::Capacity(Resource::Chars, 8))
        ));
    }

    #[test]
    fn invalid_limits() {
        let limits = Limits {
            vars: 0,
            ..Limits::default()
        };
        let source = SourceBuffer::new("a.asm", "@1");
        assert!(matches!(translate(&source, &limits), Err(Error::Config(_))));
    }
}
