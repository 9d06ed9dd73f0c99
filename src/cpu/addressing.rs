/*!
Addressing-mode resolvers.

Each resolver computes the effective address (or latches the implied
operand) into the CPU's working-address fields and returns 1 when an
indexed mode crossed a page boundary, else 0. That signal is ANDed with
the operation's own eligibility signal to grant the penalty cycle.

The relative mode stores a sign-extended displacement in `addr_rel`;
branch operations combine it with PC themselves.
*/

use super::Cpu;
use crate::bus::Bus;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

impl AddrMode {
    pub fn name(self) -> &'static str {
        match self {
            AddrMode::Implied => "implied",
            AddrMode::Immediate => "immediate",
            AddrMode::ZeroPage => "zeroPage",
            AddrMode::ZeroPageX => "zeroPageX",
            AddrMode::ZeroPageY => "zeroPageY",
            AddrMode::Relative => "relative",
            AddrMode::Absolute => "absolute",
            AddrMode::AbsoluteX => "absoluteX",
            AddrMode::AbsoluteY => "absoluteY",
            AddrMode::Indirect => "indirect",
            AddrMode::IndirectX => "indirectX",
            AddrMode::IndirectY => "indirectY",
        }
    }
}

/// 1 when the indexed address left the base page.
#[inline]
fn page_crossed(base: u16, addr: u16) -> u8 {
    ((base & 0xFF00) != (addr & 0xFF00)) as u8
}

impl Cpu {
    /// Resolve the operand location for the in-flight instruction.
    pub(crate) fn resolve(&mut self, mode: AddrMode, bus: &mut Bus) -> u8 {
        match mode {
            AddrMode::Implied => {
                // Operand is the accumulator (shift/rotate in A form).
                self.fetched = self.a;
                0
            }
            AddrMode::Immediate => {
                self.addr_abs = self.pc;
                self.pc = self.pc.wrapping_add(1);
                0
            }
            AddrMode::ZeroPage => {
                self.addr_abs = self.fetch_u8(bus) as u16;
                0
            }
            AddrMode::ZeroPageX => {
                // Indexing wraps within page zero; no carry, no penalty.
                self.addr_abs = self.fetch_u8(bus).wrapping_add(self.x) as u16;
                0
            }
            AddrMode::ZeroPageY => {
                self.addr_abs = self.fetch_u8(bus).wrapping_add(self.y) as u16;
                0
            }
            AddrMode::Relative => {
                let offset = self.fetch_u8(bus) as u16;
                self.addr_rel = if offset & 0x0080 != 0 {
                    offset | 0xFF00
                } else {
                    offset
                };
                0
            }
            AddrMode::Absolute => {
                self.addr_abs = self.fetch_u16(bus);
                0
            }
            AddrMode::AbsoluteX => {
                let base = self.fetch_u16(bus);
                self.addr_abs = base.wrapping_add(self.x as u16);
                page_crossed(base, self.addr_abs)
            }
            AddrMode::AbsoluteY => {
                let base = self.fetch_u16(bus);
                self.addr_abs = base.wrapping_add(self.y as u16);
                page_crossed(base, self.addr_abs)
            }
            AddrMode::Indirect => {
                let ptr = self.fetch_u16(bus);
                // Hardware bug: the high byte of the vector never crosses
                // the page; $xxFF wraps to $xx00.
                let lo = bus.read(ptr, false) as u16;
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let hi = bus.read(hi_addr, false) as u16;
                self.addr_abs = (hi << 8) | lo;
                0
            }
            AddrMode::IndirectX => {
                let zp = self.fetch_u8(bus).wrapping_add(self.x);
                self.addr_abs = self.read_word_zp(bus, zp);
                0
            }
            AddrMode::IndirectY => {
                let zp = self.fetch_u8(bus);
                let base = self.read_word_zp(bus, zp);
                self.addr_abs = base.wrapping_add(self.y as u16);
                page_crossed(base, self.addr_abs)
            }
        }
    }

    /// Little-endian pointer from page zero, with the high byte read
    /// through the zero-page wraparound.
    #[inline]
    fn read_word_zp(&mut self, bus: &mut Bus, base: u8) -> u16 {
        let lo = bus.read(base as u16, false) as u16;
        let hi = bus.read(base.wrapping_add(1) as u16, false) as u16;
        (hi << 8) | lo
    }
}
