use arch::inst::Inst;

/// One 16-digit binary line per instruction, most significant bit first.
pub fn encode(insts: &[Inst]) -> String {
    let mut out = String::with_capacity(insts.len() * 17);
    for inst in insts {
        out.push_str(&format!("{:016b}\n", inst.to_bin()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::{alu::Comp, dest::Dest, jump::Jump};

    #[test]
    fn lines() {
        let insts = [
            Inst::Address(2),
            Inst::Compute(Comp::A, Dest::D, Jump::Null),
            Inst::Compute(Comp::Zero, Dest::Null, Jump::JMP),
        ];
        assert_eq!(
            encode(&insts),
            "0000000000000010\n1110110000010000\n1110101010000111\n"
        );
    }

    #[test]
    fn empty() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn every_address_is_its_own_value() {
        let insts: Vec<Inst> = (0..=0x7FFF).map(Inst::Address).collect();
        let text = encode(&insts);
        assert_eq!(text.len(), insts.len() * 17);
        for (value, line) in text.lines().enumerate() {
            assert_eq!(line.len(), 16);
            assert!(line.starts_with('0'));
            assert_eq!(usize::from_str_radix(line, 2).unwrap(), value);
        }
    }

    #[test]
    fn compute_prefix() {
        let text = encode(&[Inst::Compute(Comp::DOrM, Dest::AMD, Jump::JLE)]);
        assert_eq!(text, "1111010101111110\n");
    }
}
