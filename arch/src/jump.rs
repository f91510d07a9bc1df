use num_enum::IntoPrimitive;
use strum::{Display, EnumString};

/// Jump condition of a compute instruction, the `j1 j2 j3` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoPrimitive)]
#[repr(u8)]
pub enum Jump {
    #[strum(to_string = "")]
    Null = 0b000,
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

impl Jump {
    /// Parses a jump mnemonic. There is no mnemonic for "no jump".
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok().filter(|jump| *jump != Jump::Null)
    }
}
