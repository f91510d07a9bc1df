use crate::source::SourceBuffer;
use crate::table::{Symbol, SymbolTable};
use crate::Assembly;
use color_print::cformat;

const RULE: &str = "-------------------+-----------------------------------------------------";

pub fn print_dump(source: &SourceBuffer, assembly: &Assembly) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(19),
        source.path(),
        "-".repeat(45usize.saturating_sub(source.path().len()))
    );
    for (pc, (inst, &offset)) in assembly.insts.iter().zip(&assembly.origins).enumerate() {
        let (row, _) = source.locate(offset);
        println!(
            "[{:04X}] {:016b} | {:>4}:   {}",
            pc,
            inst.to_bin(),
            row,
            inst.cformat()
        );
    }
    println!("{}", RULE);
    print_table("labels", &assembly.labels, |name| cformat!("<g>{}:</>", name));
    print_table("vars", &assembly.vars, |name| cformat!("<c>{}</>", name));
}

/// Entries sorted by address, then name.
fn print_table(title: &str, table: &SymbolTable, style: impl Fn(&str) -> String) {
    let mut symbols: Vec<&Symbol> = table.iter().collect();
    symbols.sort_by_key(|symbol| (symbol.address, symbol.name));
    println!(
        "{:19}| {} ({} / {})",
        "",
        title,
        table.len(),
        table.capacity()
    );
    for symbol in symbols {
        println!("[{:04X}] {:16} | {}", symbol.address, "", style(symbol.name));
    }
    println!("{}", RULE);
}
