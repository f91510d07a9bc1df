use num_enum::IntoPrimitive;
use strum::EnumString;

/// First RAM address handed out to variables; everything below is
/// reserved for the virtual registers `R0`..`R15`.
pub const VAR_BASE: u16 = 0x0010;

/// Symbols with a fixed address, resolved without any symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoPrimitive)]
#[repr(u16)]
pub enum Predef {
    #[strum(serialize = "R0", serialize = "SP")]
    R0 = 0x0000,
    #[strum(serialize = "R1", serialize = "LCL")]
    R1 = 0x0001,
    #[strum(serialize = "R2", serialize = "ARG")]
    R2 = 0x0002,
    #[strum(serialize = "R3", serialize = "THIS")]
    R3 = 0x0003,
    #[strum(serialize = "R4", serialize = "THAT")]
    R4 = 0x0004,
    R5 = 0x0005,
    R6 = 0x0006,
    R7 = 0x0007,
    R8 = 0x0008,
    R9 = 0x0009,
    R10 = 0x000A,
    R11 = 0x000B,
    R12 = 0x000C,
    R13 = 0x000D,
    R14 = 0x000E,
    R15 = 0x000F,
    SCREEN = 0x4000,
    KBD = 0x6000,
}

impl Predef {
    pub fn lookup(name: &str) -> Option<u16> {
        name.parse::<Predef>().ok().map(u16::from)
    }
}
