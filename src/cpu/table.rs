/*!
The flat 256-entry opcode dispatch table.

Built once as a static const-initialized array: each entry pairs a
mnemonic with its operation variant, addressing-mode variant, base cycle
count, and byte length. Every opcode not claimed by a documented
instruction resolves to the `???` placeholder, which executes as a
zero-cycle no-op (illegal opcodes are silently skipped, matching the
permissive behavior of the hardware).
*/

use super::addressing::AddrMode;
use super::execute::Op;

#[derive(Copy, Clone, Debug)]
pub struct Instruction {
    pub name: &'static str,
    pub op: Op,
    pub mode: AddrMode,
    pub cycles: u8,
    pub bytes: u8,
}

const fn ins(name: &'static str, op: Op, mode: AddrMode, cycles: u8, bytes: u8) -> Instruction {
    Instruction {
        name,
        op,
        mode,
        cycles,
        bytes,
    }
}

const XXX: Instruction = ins("???", Op::Xxx, AddrMode::Implied, 0, 1);

/// Opcode -> instruction descriptor, for the whole 256-entry space.
pub static OPCODE_TABLE: [Instruction; 256] = build_table();

#[rustfmt::skip]
const fn build_table() -> [Instruction; 256] {
    use AddrMode::*;
    let mut t = [XXX; 256];

    t[0x69] = ins("ADC", Op::Adc, Immediate, 2, 2);
    t[0x65] = ins("ADC", Op::Adc, ZeroPage, 3, 2);
    t[0x75] = ins("ADC", Op::Adc, ZeroPageX, 4, 2);
    t[0x6D] = ins("ADC", Op::Adc, Absolute, 4, 3);
    t[0x7D] = ins("ADC", Op::Adc, AbsoluteX, 4, 3);
    t[0x79] = ins("ADC", Op::Adc, AbsoluteY, 4, 3);
    t[0x61] = ins("ADC", Op::Adc, IndirectX, 6, 2);
    t[0x71] = ins("ADC", Op::Adc, IndirectY, 5, 2);

    t[0x29] = ins("AND", Op::And, Immediate, 2, 2);
    t[0x25] = ins("AND", Op::And, ZeroPage, 3, 2);
    t[0x35] = ins("AND", Op::And, ZeroPageX, 4, 2);
    t[0x2D] = ins("AND", Op::And, Absolute, 4, 3);
    t[0x3D] = ins("AND", Op::And, AbsoluteX, 4, 3);
    t[0x39] = ins("AND", Op::And, AbsoluteY, 4, 3);
    t[0x21] = ins("AND", Op::And, IndirectX, 6, 2);
    t[0x31] = ins("AND", Op::And, IndirectY, 5, 2);

    t[0x0A] = ins("ASL", Op::Asl, Implied, 2, 1);
    t[0x06] = ins("ASL", Op::Asl, ZeroPage, 5, 2);
    t[0x16] = ins("ASL", Op::Asl, ZeroPageX, 6, 2);
    t[0x0E] = ins("ASL", Op::Asl, Absolute, 6, 3);
    t[0x1E] = ins("ASL", Op::Asl, AbsoluteX, 7, 3);

    t[0x90] = ins("BCC", Op::Bcc, Relative, 2, 2);
    t[0xB0] = ins("BCS", Op::Bcs, Relative, 2, 2);
    t[0xF0] = ins("BEQ", Op::Beq, Relative, 2, 2);
    t[0x30] = ins("BMI", Op::Bmi, Relative, 2, 2);
    t[0xD0] = ins("BNE", Op::Bne, Relative, 2, 2);
    t[0x10] = ins("BPL", Op::Bpl, Relative, 2, 2);
    t[0x50] = ins("BVC", Op::Bvc, Relative, 2, 2);
    t[0x70] = ins("BVS", Op::Bvs, Relative, 2, 2);

    t[0x24] = ins("BIT", Op::Bit, ZeroPage, 3, 2);
    t[0x2C] = ins("BIT", Op::Bit, Absolute, 4, 3);

    t[0x00] = ins("BRK", Op::Brk, Implied, 7, 1);

    t[0x18] = ins("CLC", Op::Clc, Implied, 2, 1);
    t[0xD8] = ins("CLD", Op::Cld, Implied, 2, 1);
    t[0x58] = ins("CLI", Op::Cli, Implied, 2, 1);
    t[0xB8] = ins("CLV", Op::Clv, Implied, 2, 1);

    t[0xC9] = ins("CMP", Op::Cmp, Immediate, 2, 2);
    t[0xC5] = ins("CMP", Op::Cmp, ZeroPage, 3, 2);
    t[0xD5] = ins("CMP", Op::Cmp, ZeroPageX, 4, 2);
    t[0xCD] = ins("CMP", Op::Cmp, Absolute, 4, 3);
    t[0xDD] = ins("CMP", Op::Cmp, AbsoluteX, 4, 3);
    t[0xD9] = ins("CMP", Op::Cmp, AbsoluteY, 4, 3);
    t[0xC1] = ins("CMP", Op::Cmp, IndirectX, 6, 2);
    t[0xD1] = ins("CMP", Op::Cmp, IndirectY, 5, 2);

    t[0xE0] = ins("CPX", Op::Cpx, Immediate, 2, 2);
    t[0xE4] = ins("CPX", Op::Cpx, ZeroPage, 3, 2);
    t[0xEC] = ins("CPX", Op::Cpx, Absolute, 4, 3);

    t[0xC0] = ins("CPY", Op::Cpy, Immediate, 2, 2);
    t[0xC4] = ins("CPY", Op::Cpy, ZeroPage, 3, 2);
    t[0xCC] = ins("CPY", Op::Cpy, Absolute, 4, 3);

    t[0xC6] = ins("DEC", Op::Dec, ZeroPage, 5, 2);
    t[0xD6] = ins("DEC", Op::Dec, ZeroPageX, 6, 2);
    t[0xCE] = ins("DEC", Op::Dec, Absolute, 6, 3);
    t[0xDE] = ins("DEC", Op::Dec, AbsoluteX, 7, 3);
    t[0xCA] = ins("DEX", Op::Dex, Implied, 2, 1);
    t[0x88] = ins("DEY", Op::Dey, Implied, 2, 1);

    t[0x49] = ins("EOR", Op::Eor, Immediate, 2, 2);
    t[0x45] = ins("EOR", Op::Eor, ZeroPage, 3, 2);
    t[0x55] = ins("EOR", Op::Eor, ZeroPageX, 4, 2);
    t[0x4D] = ins("EOR", Op::Eor, Absolute, 4, 3);
    t[0x5D] = ins("EOR", Op::Eor, AbsoluteX, 4, 3);
    t[0x59] = ins("EOR", Op::Eor, AbsoluteY, 4, 3);
    t[0x41] = ins("EOR", Op::Eor, IndirectX, 6, 2);
    t[0x51] = ins("EOR", Op::Eor, IndirectY, 5, 2);

    t[0xE6] = ins("INC", Op::Inc, ZeroPage, 5, 2);
    t[0xF6] = ins("INC", Op::Inc, ZeroPageX, 6, 2);
    t[0xEE] = ins("INC", Op::Inc, Absolute, 6, 3);
    t[0xFE] = ins("INC", Op::Inc, AbsoluteX, 7, 3);
    t[0xE8] = ins("INX", Op::Inx, Implied, 2, 1);
    t[0xC8] = ins("INY", Op::Iny, Implied, 2, 1);

    t[0x4C] = ins("JMP", Op::Jmp, Absolute, 3, 3);
    t[0x6C] = ins("JMP", Op::Jmp, Indirect, 5, 3);
    t[0x20] = ins("JSR", Op::Jsr, Absolute, 6, 3);

    t[0xA9] = ins("LDA", Op::Lda, Immediate, 2, 2);
    t[0xA5] = ins("LDA", Op::Lda, ZeroPage, 3, 2);
    t[0xB5] = ins("LDA", Op::Lda, ZeroPageX, 4, 2);
    t[0xAD] = ins("LDA", Op::Lda, Absolute, 4, 3);
    t[0xBD] = ins("LDA", Op::Lda, AbsoluteX, 4, 3);
    t[0xB9] = ins("LDA", Op::Lda, AbsoluteY, 4, 3);
    t[0xA1] = ins("LDA", Op::Lda, IndirectX, 6, 2);
    t[0xB1] = ins("LDA", Op::Lda, IndirectY, 5, 2);

    t[0xA2] = ins("LDX", Op::Ldx, Immediate, 2, 2);
    t[0xA6] = ins("LDX", Op::Ldx, ZeroPage, 3, 2);
    t[0xB6] = ins("LDX", Op::Ldx, ZeroPageY, 4, 2);
    t[0xAE] = ins("LDX", Op::Ldx, Absolute, 4, 3);
    t[0xBE] = ins("LDX", Op::Ldx, AbsoluteY, 4, 3);

    t[0xA0] = ins("LDY", Op::Ldy, Immediate, 2, 2);
    t[0xA4] = ins("LDY", Op::Ldy, ZeroPage, 3, 2);
    t[0xB4] = ins("LDY", Op::Ldy, ZeroPageX, 4, 2);
    t[0xAC] = ins("LDY", Op::Ldy, Absolute, 4, 3);
    t[0xBC] = ins("LDY", Op::Ldy, AbsoluteX, 4, 3);

    t[0x4A] = ins("LSR", Op::Lsr, Implied, 2, 1);
    t[0x46] = ins("LSR", Op::Lsr, ZeroPage, 5, 2);
    t[0x56] = ins("LSR", Op::Lsr, ZeroPageX, 6, 2);
    t[0x4E] = ins("LSR", Op::Lsr, Absolute, 6, 3);
    t[0x5E] = ins("LSR", Op::Lsr, AbsoluteX, 7, 3);

    t[0xEA] = ins("NOP", Op::Nop, Implied, 2, 1);

    t[0x09] = ins("ORA", Op::Ora, Immediate, 2, 2);
    t[0x05] = ins("ORA", Op::Ora, ZeroPage, 3, 2);
    t[0x15] = ins("ORA", Op::Ora, ZeroPageX, 4, 2);
    t[0x0D] = ins("ORA", Op::Ora, Absolute, 4, 3);
    t[0x1D] = ins("ORA", Op::Ora, AbsoluteX, 4, 3);
    t[0x19] = ins("ORA", Op::Ora, AbsoluteY, 4, 3);
    t[0x01] = ins("ORA", Op::Ora, IndirectX, 6, 2);
    t[0x11] = ins("ORA", Op::Ora, IndirectY, 5, 2);

    t[0x48] = ins("PHA", Op::Pha, Implied, 3, 1);
    t[0x08] = ins("PHP", Op::Php, Implied, 3, 1);
    t[0x68] = ins("PLA", Op::Pla, Implied, 4, 1);
    t[0x28] = ins("PLP", Op::Plp, Implied, 4, 1);

    t[0x2A] = ins("ROL", Op::Rol, Implied, 2, 1);
    t[0x26] = ins("ROL", Op::Rol, ZeroPage, 5, 2);
    t[0x36] = ins("ROL", Op::Rol, ZeroPageX, 6, 2);
    t[0x2E] = ins("ROL", Op::Rol, Absolute, 6, 3);
    t[0x3E] = ins("ROL", Op::Rol, AbsoluteX, 7, 3);

    t[0x6A] = ins("ROR", Op::Ror, Implied, 2, 1);
    t[0x66] = ins("ROR", Op::Ror, ZeroPage, 5, 2);
    t[0x76] = ins("ROR", Op::Ror, ZeroPageX, 6, 2);
    t[0x6E] = ins("ROR", Op::Ror, Absolute, 6, 3);
    t[0x7E] = ins("ROR", Op::Ror, AbsoluteX, 7, 3);

    t[0x40] = ins("RTI", Op::Rti, Implied, 6, 1);
    t[0x60] = ins("RTS", Op::Rts, Implied, 6, 1);

    t[0xE9] = ins("SBC", Op::Sbc, Immediate, 2, 2);
    t[0xE5] = ins("SBC", Op::Sbc, ZeroPage, 3, 2);
    t[0xF5] = ins("SBC", Op::Sbc, ZeroPageX, 4, 2);
    t[0xED] = ins("SBC", Op::Sbc, Absolute, 4, 3);
    t[0xFD] = ins("SBC", Op::Sbc, AbsoluteX, 4, 3);
    t[0xF9] = ins("SBC", Op::Sbc, AbsoluteY, 4, 3);
    t[0xE1] = ins("SBC", Op::Sbc, IndirectX, 6, 2);
    t[0xF1] = ins("SBC", Op::Sbc, IndirectY, 5, 2);

    t[0x38] = ins("SEC", Op::Sec, Implied, 2, 1);
    t[0xF8] = ins("SED", Op::Sed, Implied, 2, 1);
    t[0x78] = ins("SEI", Op::Sei, Implied, 2, 1);

    t[0x85] = ins("STA", Op::Sta, ZeroPage, 3, 2);
    t[0x95] = ins("STA", Op::Sta, ZeroPageX, 4, 2);
    t[0x8D] = ins("STA", Op::Sta, Absolute, 4, 3);
    t[0x9D] = ins("STA", Op::Sta, AbsoluteX, 5, 3);
    t[0x99] = ins("STA", Op::Sta, AbsoluteY, 5, 3);
    t[0x81] = ins("STA", Op::Sta, IndirectX, 6, 2);
    t[0x91] = ins("STA", Op::Sta, IndirectY, 6, 2);

    t[0x86] = ins("STX", Op::Stx, ZeroPage, 3, 2);
    t[0x96] = ins("STX", Op::Stx, ZeroPageY, 4, 2);
    t[0x8E] = ins("STX", Op::Stx, Absolute, 4, 3);

    t[0x84] = ins("STY", Op::Sty, ZeroPage, 3, 2);
    t[0x94] = ins("STY", Op::Sty, ZeroPageX, 4, 2);
    t[0x8C] = ins("STY", Op::Sty, Absolute, 4, 3);

    t[0xAA] = ins("TAX", Op::Tax, Implied, 2, 1);
    t[0xA8] = ins("TAY", Op::Tay, Implied, 2, 1);
    t[0xBA] = ins("TSX", Op::Tsx, Implied, 2, 1);
    t[0x8A] = ins("TXA", Op::Txa, Implied, 2, 1);
    t[0x9A] = ins("TXS", Op::Txs, Implied, 2, 1);
    t[0x98] = ins("TYA", Op::Tya, Implied, 2, 1);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count() {
        let mapped = OPCODE_TABLE.iter().filter(|i| i.name != "???").count();
        assert_eq!(mapped, 151);
    }

    #[test]
    fn placeholder_entries_cost_zero_cycles() {
        for i in OPCODE_TABLE.iter().filter(|i| i.name == "???") {
            assert_eq!(i.cycles, 0);
            assert_eq!(i.bytes, 1);
            assert_eq!(i.op, Op::Xxx);
        }
    }

    #[test]
    fn mapped_entries_have_sane_costs() {
        for i in OPCODE_TABLE.iter().filter(|i| i.name != "???") {
            assert!(i.cycles >= 2 && i.cycles <= 7, "{}: {}", i.name, i.cycles);
            assert!(i.bytes >= 1 && i.bytes <= 3);
        }
    }

    #[test]
    fn spot_check_well_known_opcodes() {
        assert_eq!(OPCODE_TABLE[0xA9].name, "LDA");
        assert_eq!(OPCODE_TABLE[0xA9].mode, AddrMode::Immediate);
        assert_eq!(OPCODE_TABLE[0xA9].cycles, 2);
        assert_eq!(OPCODE_TABLE[0xA9].bytes, 2);

        assert_eq!(OPCODE_TABLE[0x00].name, "BRK");
        assert_eq!(OPCODE_TABLE[0x00].cycles, 7);

        assert_eq!(OPCODE_TABLE[0x6C].name, "JMP");
        assert_eq!(OPCODE_TABLE[0x6C].mode, AddrMode::Indirect);
        assert_eq!(OPCODE_TABLE[0x6C].cycles, 5);

        assert_eq!(OPCODE_TABLE[0x91].name, "STA");
        assert_eq!(OPCODE_TABLE[0x91].mode, AddrMode::IndirectY);
        assert_eq!(OPCODE_TABLE[0x91].cycles, 6);
    }

    #[test]
    fn byte_lengths_follow_addressing_mode() {
        for i in OPCODE_TABLE.iter().filter(|i| i.name != "???") {
            let expected = match i.mode {
                AddrMode::Implied => 1,
                AddrMode::Immediate
                | AddrMode::ZeroPage
                | AddrMode::ZeroPageX
                | AddrMode::ZeroPageY
                | AddrMode::Relative
                | AddrMode::IndirectX
                | AddrMode::IndirectY => 2,
                AddrMode::Absolute | AddrMode::AbsoluteX | AddrMode::AbsoluteY | AddrMode::Indirect => 3,
            };
            assert_eq!(i.bytes, expected, "{}", i.name);
        }
    }
}
