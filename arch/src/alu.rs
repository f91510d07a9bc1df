use crate::reg::Reg;
use num_enum::IntoPrimitive;
use strum::Display;

/// Binary operators accepted between two registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    And,
    Or,
}

/// ALU function of a compute instruction: the `a` bit followed by `c1..c6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive)]
#[repr(u8)]
pub enum Comp {
    #[strum(to_string = "0")]
    Zero = 0x2A,
    #[strum(to_string = "1")]
    One = 0x3F,
    #[strum(to_string = "-1")]
    MinusOne = 0x3A,
    #[strum(to_string = "D")]
    D = 0x0C,
    #[strum(to_string = "A")]
    A = 0x30,
    #[strum(to_string = "M")]
    M = 0x70,
    #[strum(to_string = "!D")]
    NotD = 0x0D,
    #[strum(to_string = "!A")]
    NotA = 0x31,
    #[strum(to_string = "!M")]
    NotM = 0x71,
    #[strum(to_string = "-D")]
    NegD = 0x0F,
    #[strum(to_string = "-A")]
    NegA = 0x33,
    #[strum(to_string = "-M")]
    NegM = 0x73,
    #[strum(to_string = "D+1")]
    DPlusOne = 0x1F,
    #[strum(to_string = "A+1")]
    APlusOne = 0x37,
    #[strum(to_string = "M+1")]
    MPlusOne = 0x77,
    #[strum(to_string = "D-1")]
    DMinusOne = 0x0E,
    #[strum(to_string = "A-1")]
    AMinusOne = 0x32,
    #[strum(to_string = "M-1")]
    MMinusOne = 0x72,
    #[strum(to_string = "D+A")]
    DPlusA = 0x02,
    #[strum(to_string = "D+M")]
    DPlusM = 0x42,
    #[strum(to_string = "D-A")]
    DMinusA = 0x13,
    #[strum(to_string = "D-M")]
    DMinusM = 0x53,
    #[strum(to_string = "A-D")]
    AMinusD = 0x07,
    #[strum(to_string = "M-D")]
    MMinusD = 0x47,
    #[strum(to_string = "D&A")]
    DAndA = 0x00,
    #[strum(to_string = "D&M")]
    DAndM = 0x40,
    #[strum(to_string = "D|A")]
    DOrA = 0x15,
    #[strum(to_string = "D|M")]
    DOrM = 0x55,
}

impl Comp {
    pub fn reg(reg: Reg) -> Comp {
        match reg {
            Reg::D => Comp::D,
            Reg::A => Comp::A,
            Reg::M => Comp::M,
        }
    }

    pub fn not(reg: Reg) -> Comp {
        match reg {
            Reg::D => Comp::NotD,
            Reg::A => Comp::NotA,
            Reg::M => Comp::NotM,
        }
    }

    pub fn neg(reg: Reg) -> Comp {
        match reg {
            Reg::D => Comp::NegD,
            Reg::A => Comp::NegA,
            Reg::M => Comp::NegM,
        }
    }

    pub fn inc(reg: Reg) -> Comp {
        match reg {
            Reg::D => Comp::DPlusOne,
            Reg::A => Comp::APlusOne,
            Reg::M => Comp::MPlusOne,
        }
    }

    pub fn dec(reg: Reg) -> Comp {
        match reg {
            Reg::D => Comp::DMinusOne,
            Reg::A => Comp::AMinusOne,
            Reg::M => Comp::MMinusOne,
        }
    }

    /// Only the register pairs the ALU actually wires up are accepted;
    /// e.g. `A+D` has no encoding and yields `None`.
    pub fn binary(lhs: Reg, op: Op, rhs: Reg) -> Option<Comp> {
        match (lhs, op, rhs) {
            (Reg::D, Op::Add, Reg::A) => Some(Comp::DPlusA),
            (Reg::D, Op::Add, Reg::M) => Some(Comp::DPlusM),
            (Reg::D, Op::Sub, Reg::A) => Some(Comp::DMinusA),
            (Reg::D, Op::Sub, Reg::M) => Some(Comp::DMinusM),
            (Reg::A, Op::Sub, Reg::D) => Some(Comp::AMinusD),
            (Reg::M, Op::Sub, Reg::D) => Some(Comp::MMinusD),
            (Reg::D, Op::And, Reg::A) => Some(Comp::DAndA),
            (Reg::D, Op::And, Reg::M) => Some(Comp::DAndM),
            (Reg::D, Op::Or, Reg::A) => Some(Comp::DOrA),
            (Reg::D, Op::Or, Reg::M) => Some(Comp::DOrM),
            _ => None,
        }
    }
}
