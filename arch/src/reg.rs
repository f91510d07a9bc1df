use strum::{Display, EnumString};

/// Registers that appear as ALU operands and as destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Reg {
    A,
    D,
    M,
}

impl Reg {
    /// Register names are case sensitive: `d` is not `D`.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}
