use crate::{alu::Comp, dest::Dest, jump::Jump};

use color_print::cformat;
use std::fmt;

/// Largest value an address instruction can carry (15 bits).
pub const MAX_ADDRESS: u16 = 0x7FFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    Address(u16),
    Compute(Comp, Dest, Jump),
}

impl Inst {
    pub fn to_bin(&self) -> u16 {
        match *self {
            Inst::Address(addr) => {
                debug_assert!(addr <= MAX_ADDRESS, "address out of range: {addr:#06X}");
                addr
            }
            Inst::Compute(comp, dest, jump) => {
                (0b111 << 13)
                    | (u16::from(u8::from(comp)) << 6)
                    | (u16::from(u8::from(dest)) << 3)
                    | u16::from(u8::from(jump))
            }
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Address(addr) => write!(f, "@{addr}"),
            Inst::Compute(comp, dest, jump) => {
                if *dest != Dest::Null {
                    write!(f, "{dest}=")?;
                }
                write!(f, "{comp}")?;
                if *jump != Jump::Null {
                    write!(f, ";{jump}")?;
                }
                Ok(())
            }
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self {
            Inst::Address(addr) => cformat!("<b>@</><y>{}</>", addr),
            Inst::Compute(comp, dest, jump) => {
                let dest = match dest {
                    Dest::Null => String::new(),
                    dest => cformat!("<c>{}</>=", dest),
                };
                let jump = match jump {
                    Jump::Null => String::new(),
                    jump => cformat!(";<g>{}</>", jump),
                };
                cformat!("{}<r>{}</>{}", dest, comp, jump)
            }
        }
    }
}
