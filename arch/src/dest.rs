use crate::reg::Reg;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::Display;

/// Registers written by a compute instruction, as the `d1 d2 d3` mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Dest {
    #[strum(to_string = "")]
    Null = 0b000,
    M = 0b001,
    D = 0b010,
    MD = 0b011,
    A = 0b100,
    AM = 0b101,
    AD = 0b110,
    AMD = 0b111,
}

impl Dest {
    pub fn bit(reg: Reg) -> u8 {
        match reg {
            Reg::A => 0b100,
            Reg::D => 0b010,
            Reg::M => 0b001,
        }
    }

    pub fn contains(self, reg: Reg) -> bool {
        u8::from(self) & Dest::bit(reg) != 0
    }

    /// Adds `reg` to the mask. Returns `None` if it is already present.
    pub fn with(self, reg: Reg) -> Option<Dest> {
        if self.contains(reg) {
            return None;
        }
        Dest::try_from(u8::from(self) | Dest::bit(reg)).ok()
    }
}
