use crate::error::Error;
use crate::parser::{Code, Stmt};
use crate::table::SymbolTable;
use arch::{inst::Inst, symbol::VAR_BASE};
use log::debug;

/// Binds every symbolic address. Labels win over variables; a name that is
/// neither becomes the next variable, allocated from `VAR_BASE` upward in
/// order of first use.
pub fn resolve<'a>(
    stmts: &[Stmt<'a>],
    labels: &SymbolTable<'a>,
    vars: &mut SymbolTable<'a>,
) -> Result<Vec<Inst>, Error> {
    stmts
        .iter()
        .map(|stmt| match stmt.code {
            Code::Inst(inst) => Ok(inst),
            Code::Symbol(name) => symbol(name, labels, vars).map(Inst::Address),
        })
        .collect()
}

fn symbol<'a>(
    name: &'a str,
    labels: &SymbolTable<'a>,
    vars: &mut SymbolTable<'a>,
) -> Result<u16, Error> {
    if let Some(addr) = labels.get(name)? {
        return Ok(addr);
    }
    if let Some(addr) = vars.get(name)? {
        return Ok(addr);
    }
    // Limits::validate keeps this below MAX_ADDRESS.
    let addr = VAR_BASE + vars.len() as u16;
    vars.insert(name, addr)?;
    debug!("variable `{}` = {}", name, addr);
    Ok(addr)
}
