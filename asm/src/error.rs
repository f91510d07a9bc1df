use crate::source::SourceBuffer;
use color_print::ceprintln;
use std::error::Error as StdError;
use strum::Display;
use thiserror::Error;

/// Fixed-size storage that can run out during a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    #[strum(to_string = "source characters")]
    Chars,
    #[strum(to_string = "tokens")]
    Tokens,
    #[strum(to_string = "instructions")]
    Insts,
    #[strum(to_string = "labels")]
    Labels,
    #[strum(to_string = "variables")]
    Vars,
}

#[derive(Error, Debug)]
pub enum Error {
    // I/O
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    // Lexical
    #[error("Unexpected character `{1}`")]
    UnexpectedChar(usize, char),

    #[error("Expected `//` to start a comment")]
    MalformedComment(usize),

    #[error("Integer literal does not fit in 15 bits (max 32767)")]
    LiteralOverflow(usize),

    // Syntax
    #[error("Unexpected token: {1}")]
    UnexpectedToken(usize, String),

    #[error("Unexpected end of input")]
    UnexpectedEOF(usize),

    // Semantic
    #[error("Unknown comp expression")]
    UnknownComp(usize),

    #[error("Unknown jump: {1}")]
    UnknownJump(usize, String),

    #[error("Invalid dest register: `{1}`")]
    InvalidDest(usize, String),

    #[error("Dest register given twice: `{1}`")]
    DuplicateDest(usize, String),

    // Capacity
    #[error("Too many {0}: capacity is {1}")]
    Capacity(Resource, usize),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(String, #[source] serde_yaml::Error),

    // Internal consistency
    #[error("No free slot left in the {0} table (capacity {1})")]
    TableExhausted(Resource, usize),
}

impl Error {
    /// Byte offset into the source this error points at, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::UnexpectedChar(offset, _)
            | Error::MalformedComment(offset)
            | Error::LiteralOverflow(offset)
            | Error::UnexpectedToken(offset, _)
            | Error::UnexpectedEOF(offset)
            | Error::UnknownComp(offset)
            | Error::UnknownJump(offset, _)
            | Error::InvalidDest(offset, _)
            | Error::DuplicateDest(offset, _) => Some(*offset),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, source: Option<&SourceBuffer>) {
        ceprintln!("<red,bold>error</>: {}", self);

        let mut cause = StdError::source(self);
        while let Some(err) = cause {
            ceprintln!("  <red>caused by</>: {}", err);
            cause = err.source();
        }

        let (Some(source), Some(offset)) = (source, self.offset()) else {
            return;
        };
        let (row, col) = source.locate(offset);
        ceprintln!("     <blue>--></> <underline>{}:{}:{}</>", source.path(), row, col);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", row, source.line(row));
        ceprintln!("      <blue>|</> {}<red,bold>^</>", " ".repeat(col - 1));
    }
}
