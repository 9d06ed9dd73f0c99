/*!
PPU-side bus: pattern tables, nametables, and palette RAM.

Decode order for $0000-$3FFF:
- The cartridge gets first refusal (CHR ROM/RAM intercepts pattern space).
- $0000-$1FFF falls back to the PPU's internal pattern banks.
- $2000-$3EFF selects one of two physical nametable banks per the
  cartridge's mirroring mode.
- $3F00-$3FFF is the 32-byte palette RAM with the four backdrop entries
  folded ($3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C).
*/

use super::Ppu;
use crate::cartridge::{Cartridge, Mirroring};

/// Pick the physical nametable bank (0 or 1) for an address already
/// reduced to $0000-$0FFF of nametable space.
///
/// Vertical arranges the four logical tables as {0,1,0,1}; horizontal as
/// {0,0,1,1}. Single-screen boards pin everything to bank 0; four-screen
/// is approximated with the vertical arrangement (the extra VRAM such
/// boards carry is out of scope for the baseline mapper).
#[inline]
pub(crate) fn nametable_bank(mirroring: Mirroring, addr: u16) -> usize {
    let table = ((addr & 0x0FFF) >> 10) as usize; // 0..=3
    match mirroring {
        Mirroring::Vertical => table & 1,
        Mirroring::Horizontal => table >> 1,
        Mirroring::SingleScreen => 0,
        Mirroring::FourScreen => table & 1,
    }
}

/// Palette RAM index for an address in $3F00-$3FFF, with the backdrop
/// mirrors folded down.
#[inline]
pub(crate) fn palette_index(addr: u16) -> usize {
    let mut idx = (addr & 0x001F) as usize;
    if idx >= 0x10 && (idx & 0x03) == 0 {
        idx -= 0x10;
    }
    idx
}

impl Ppu {
    /// Read a byte over the PPU's own bus.
    pub fn ppu_read(&self, cart: &Cartridge, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;

        if let Some(data) = cart.ppu_read(addr) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => {
                self.pattern_table[((addr & 0x1000) >> 12) as usize][(addr & 0x0FFF) as usize]
            }
            0x2000..=0x3EFF => {
                let bank = nametable_bank(cart.mirroring(), addr);
                self.nametable[bank][(addr & 0x03FF) as usize]
            }
            0x3F00..=0x3FFF => self.palette_ram[palette_index(addr)],
            _ => 0,
        }
    }

    /// Write a byte over the PPU's own bus.
    pub fn ppu_write(&mut self, cart: &mut Cartridge, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;

        if cart.ppu_write(addr, data) {
            return;
        }

        match addr {
            0x0000..=0x1FFF => {
                self.pattern_table[((addr & 0x1000) >> 12) as usize][(addr & 0x0FFF) as usize] =
                    data;
            }
            0x2000..=0x3EFF => {
                let bank = nametable_bank(cart.mirroring(), addr);
                self.nametable[bank][(addr & 0x03FF) as usize] = data;
            }
            0x3F00..=0x3FFF => {
                self.palette_ram[palette_index(addr)] = data;
            }
            _ => {}
        }
    }
}
