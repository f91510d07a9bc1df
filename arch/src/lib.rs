pub mod alu;
pub mod dest;
pub mod inst;
pub mod jump;
pub mod reg;
pub mod symbol;
