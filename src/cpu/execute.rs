/*!
Operation semantics for the documented 6502 instruction set.

Every operation consumes the working address prepared by the resolver,
mutates registers/flags/memory, and returns 1 when it is eligible for
the indexed-addressing penalty cycle, else 0. Branch instructions manage
their cycle bookkeeping directly (one extra cycle when taken, one more
when the target crosses a page).

ADC and SBC share one binary adder; SBC inverts the operand's low byte
first, which makes the documented overflow law
`((result ^ A) & (result ^ operand) & 0x80) != 0` hold for both.
*/

use super::{AddrMode, BREAK, CARRY, Cpu, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO};
use crate::bus::Bus;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Placeholder for every unmapped opcode: a silent, zero-cost skip.
    Xxx,
}

impl Cpu {
    /// Execute one operation against the resolved working address.
    pub(crate) fn execute(&mut self, op: Op, bus: &mut Bus) -> u8 {
        match op {
            // ---------------- Arithmetic ----------------
            Op::Adc => {
                let m = self.fetch(bus);
                self.add_with_carry(m);
                1
            }
            Op::Sbc => {
                // Two's-complement-equivalent operand: invert the low byte
                // and reuse the adder.
                let m = self.fetch(bus) ^ 0xFF;
                self.add_with_carry(m);
                1
            }

            // ---------------- Logic ----------------
            Op::And => {
                let m = self.fetch(bus);
                self.a &= m;
                self.update_zn(self.a);
                1
            }
            Op::Ora => {
                let m = self.fetch(bus);
                self.a |= m;
                self.update_zn(self.a);
                1
            }
            Op::Eor => {
                let m = self.fetch(bus);
                self.a ^= m;
                self.update_zn(self.a);
                1
            }
            Op::Bit => {
                let m = self.fetch(bus);
                self.set_flag(ZERO, (self.a & m) == 0);
                self.set_flag(NEGATIVE, (m & 0x80) != 0);
                self.set_flag(OVERFLOW, (m & 0x40) != 0);
                0
            }

            // ---------------- Shifts and rotates ----------------
            Op::Asl => {
                let t = (self.fetch(bus) as u16) << 1;
                self.set_flag(CARRY, (t & 0xFF00) != 0);
                self.update_zn(t as u8);
                self.write_back(bus, t as u8);
                0
            }
            Op::Lsr => {
                let m = self.fetch(bus);
                self.set_flag(CARRY, (m & 0x01) != 0);
                let t = m >> 1;
                self.update_zn(t);
                self.write_back(bus, t);
                0
            }
            Op::Rol => {
                let t = ((self.fetch(bus) as u16) << 1) | self.get_flag(CARRY) as u16;
                self.set_flag(CARRY, (t & 0xFF00) != 0);
                self.update_zn(t as u8);
                self.write_back(bus, t as u8);
                0
            }
            Op::Ror => {
                let m = self.fetch(bus);
                let t = ((self.get_flag(CARRY) as u8) << 7) | (m >> 1);
                self.set_flag(CARRY, (m & 0x01) != 0);
                self.update_zn(t);
                self.write_back(bus, t);
                0
            }

            // ---------------- Compares ----------------
            Op::Cmp => {
                let m = self.fetch(bus);
                self.compare(self.a, m);
                1
            }
            Op::Cpx => {
                let m = self.fetch(bus);
                self.compare(self.x, m);
                0
            }
            Op::Cpy => {
                let m = self.fetch(bus);
                self.compare(self.y, m);
                0
            }

            // ---------------- Memory increments ----------------
            Op::Inc => {
                let t = self.fetch(bus).wrapping_add(1);
                bus.write(self.addr_abs, t);
                self.update_zn(t);
                0
            }
            Op::Dec => {
                let t = self.fetch(bus).wrapping_sub(1);
                bus.write(self.addr_abs, t);
                self.update_zn(t);
                0
            }
            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zn(self.x);
                0
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zn(self.y);
                0
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zn(self.x);
                0
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zn(self.y);
                0
            }

            // ---------------- Loads and stores ----------------
            Op::Lda => {
                self.a = self.fetch(bus);
                self.update_zn(self.a);
                1
            }
            Op::Ldx => {
                self.x = self.fetch(bus);
                self.update_zn(self.x);
                1
            }
            Op::Ldy => {
                self.y = self.fetch(bus);
                self.update_zn(self.y);
                1
            }
            Op::Sta => {
                bus.write(self.addr_abs, self.a);
                0
            }
            Op::Stx => {
                bus.write(self.addr_abs, self.x);
                0
            }
            Op::Sty => {
                bus.write(self.addr_abs, self.y);
                0
            }

            // ---------------- Transfers ----------------
            Op::Tax => {
                self.x = self.a;
                self.update_zn(self.x);
                0
            }
            Op::Tay => {
                self.y = self.a;
                self.update_zn(self.y);
                0
            }
            Op::Tsx => {
                self.x = self.sp;
                self.update_zn(self.x);
                0
            }
            Op::Txa => {
                self.a = self.x;
                self.update_zn(self.a);
                0
            }
            Op::Tya => {
                self.a = self.y;
                self.update_zn(self.a);
                0
            }
            Op::Txs => {
                self.sp = self.x;
                0
            }

            // ---------------- Stack ----------------
            Op::Pha => {
                let a = self.a;
                self.push(bus, a);
                0
            }
            Op::Php => {
                // Pushed copy carries Break and Unused set.
                let v = self.status | BREAK | UNUSED;
                self.push(bus, v);
                self.set_flag(BREAK, false);
                0
            }
            Op::Pla => {
                self.a = self.pop(bus);
                self.update_zn(self.a);
                0
            }
            Op::Plp => {
                let v = self.pop(bus);
                self.status = (v | UNUSED) & !BREAK;
                0
            }

            // ---------------- Control flow ----------------
            Op::Jmp => {
                self.pc = self.addr_abs;
                0
            }
            Op::Jsr => {
                // Push the address of the last byte of this instruction.
                let ret = self.pc.wrapping_sub(1);
                self.push_word(bus, ret);
                self.pc = self.addr_abs;
                0
            }
            Op::Rts => {
                self.pc = self.pop_word(bus).wrapping_add(1);
                0
            }
            Op::Brk => {
                // The byte after the opcode is padding; the pushed return
                // address skips it.
                self.pc = self.pc.wrapping_add(1);
                self.set_flag(IRQ_DISABLE, true);
                let pc = self.pc;
                self.push_word(bus, pc);
                self.set_flag(BREAK, true);
                let status = self.status;
                self.push(bus, status);
                self.set_flag(BREAK, false);
                self.pc = self.read_word(bus, 0xFFFE);
                0
            }
            Op::Rti => {
                let s = self.pop(bus);
                self.status = (s | UNUSED) & !BREAK;
                self.pc = self.pop_word(bus);
                0
            }

            // ---------------- Branches ----------------
            Op::Bcc => {
                let cond = !self.get_flag(CARRY);
                self.branch(cond);
                0
            }
            Op::Bcs => {
                let cond = self.get_flag(CARRY);
                self.branch(cond);
                0
            }
            Op::Beq => {
                let cond = self.get_flag(ZERO);
                self.branch(cond);
                0
            }
            Op::Bne => {
                let cond = !self.get_flag(ZERO);
                self.branch(cond);
                0
            }
            Op::Bmi => {
                let cond = self.get_flag(NEGATIVE);
                self.branch(cond);
                0
            }
            Op::Bpl => {
                let cond = !self.get_flag(NEGATIVE);
                self.branch(cond);
                0
            }
            Op::Bvc => {
                let cond = !self.get_flag(OVERFLOW);
                self.branch(cond);
                0
            }
            Op::Bvs => {
                let cond = self.get_flag(OVERFLOW);
                self.branch(cond);
                0
            }

            // ---------------- Flag manipulation ----------------
            Op::Clc => {
                self.set_flag(CARRY, false);
                0
            }
            Op::Cld => {
                self.set_flag(DECIMAL, false);
                0
            }
            Op::Cli => {
                self.set_flag(IRQ_DISABLE, false);
                0
            }
            Op::Clv => {
                self.set_flag(OVERFLOW, false);
                0
            }
            Op::Sec => {
                self.set_flag(CARRY, true);
                0
            }
            Op::Sed => {
                self.set_flag(DECIMAL, true);
                0
            }
            Op::Sei => {
                self.set_flag(IRQ_DISABLE, true);
                0
            }

            Op::Nop => 0,
            Op::Xxx => 0,
        }
    }

    /// Shared binary adder for ADC/SBC: A = A + m + C, with carry,
    /// overflow, zero, and negative updated from the 9-bit result.
    fn add_with_carry(&mut self, m: u8) {
        let result = self.a as u16 + m as u16 + self.get_flag(CARRY) as u16;
        self.set_flag(CARRY, result > 0x00FF);
        self.set_flag(
            OVERFLOW,
            ((result ^ self.a as u16) & (result ^ m as u16) & 0x0080) != 0,
        );
        self.a = result as u8;
        self.update_zn(self.a);
    }

    /// Compare: carry when the register is >= the operand, Z/N from the
    /// difference.
    fn compare(&mut self, reg: u8, m: u8) {
        self.set_flag(CARRY, reg >= m);
        self.update_zn(reg.wrapping_sub(m));
    }

    /// Taken branches cost one extra cycle, two when the target lands on
    /// a different page than the updated PC.
    fn branch(&mut self, condition: bool) {
        if condition {
            self.cycles += 1;
            let target = self.pc.wrapping_add(self.addr_rel);
            if (target & 0xFF00) != (self.pc & 0xFF00) {
                self.cycles += 1;
            }
            self.pc = target;
        }
    }

    /// Shift/rotate write-back: the accumulator in implied form, memory
    /// otherwise.
    #[inline]
    fn write_back(&mut self, bus: &mut Bus, value: u8) {
        if self.mode == AddrMode::Implied {
            self.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
    }
}
