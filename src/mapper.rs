/*!
Mapper subsystem: address-translation trait and the NROM (mapper 0)
implementation.

Purpose:
- Decouple CPU/PPU address translation from the `Cartridge` so additional
  mappers can be added without touching the bus.
- A mapper never touches memory itself; each operation turns a full bus
  address into a ROM/RAM-local offset, or declines with `None` so the
  bus/PPU fall through to their own RAM.

Semantics:
- All four operations take unmasked CPU or PPU addresses.
- `Some(offset)` means the cartridge claims the access and `offset` indexes
  the PRG (CPU ops) or CHR (PPU ops) byte array.
- `reset()` reinitializes mapper-internal bank state; NROM has none.
*/

/// Common interface all cartridge mappers implement.
pub trait Mapper {
    /// Mapper numeric identifier (0 for NROM).
    fn mapper_id(&self) -> u8;

    /// Translate a CPU read address into a PRG-local offset.
    fn map_cpu_read(&self, addr: u16) -> Option<usize>;

    /// Translate a CPU write address into a PRG-local offset.
    fn map_cpu_write(&self, addr: u16) -> Option<usize>;

    /// Translate a PPU read address into a CHR-local offset.
    fn map_ppu_read(&self, addr: u16) -> Option<usize>;

    /// Translate a PPU write address into a CHR-local offset.
    fn map_ppu_write(&self, addr: u16) -> Option<usize>;

    /// Reset bank-select state. The baseline mapper keeps none.
    fn reset(&mut self) {}
}

/// NROM (mapper 0).
///
/// Two configurations:
/// - NROM-128: one 16 KiB PRG bank, mirrored across $8000-$FFFF
/// - NROM-256: two 16 KiB PRG banks mapped directly
///
/// CHR is a flat 8 KiB bank; PPU writes are accepted only when the header
/// declared zero CHR banks (the board carries CHR RAM instead of ROM).
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_banks: u8,
    chr_banks: u8,
}

impl Nrom {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Self {
            prg_banks,
            chr_banks,
        }
    }

    // $8000-$FFFF folds onto 16 KiB or 32 KiB of PRG depending on bank count.
    #[inline]
    fn prg_offset(&self, addr: u16) -> Option<usize> {
        if addr >= 0x8000 {
            let mask = if self.prg_banks > 1 { 0x7FFF } else { 0x3FFF };
            Some((addr & mask) as usize)
        } else {
            None
        }
    }
}

impl Mapper for Nrom {
    fn mapper_id(&self) -> u8 {
        0
    }

    fn map_cpu_read(&self, addr: u16) -> Option<usize> {
        self.prg_offset(addr)
    }

    fn map_cpu_write(&self, addr: u16) -> Option<usize> {
        self.prg_offset(addr)
    }

    fn map_ppu_read(&self, addr: u16) -> Option<usize> {
        if addr <= 0x1FFF {
            Some(addr as usize)
        } else {
            None
        }
    }

    fn map_ppu_write(&self, addr: u16) -> Option<usize> {
        // Pattern space is writable only on CHR-RAM boards.
        if addr <= 0x1FFF && self.chr_banks == 0 {
            Some(addr as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mapper, Nrom};

    #[test]
    fn nrom_128_mirrors_single_bank() {
        let m = Nrom::new(1, 1);
        assert_eq!(m.map_cpu_read(0x8000), Some(0x0000));
        assert_eq!(m.map_cpu_read(0xBFFF), Some(0x3FFF));
        // Upper half mirrors the same 16 KiB bank.
        assert_eq!(m.map_cpu_read(0xC000), Some(0x0000));
        assert_eq!(m.map_cpu_read(0xFFFF), Some(0x3FFF));
    }

    #[test]
    fn nrom_256_maps_directly() {
        let m = Nrom::new(2, 1);
        assert_eq!(m.map_cpu_read(0x8000), Some(0x0000));
        assert_eq!(m.map_cpu_read(0xC000), Some(0x4000));
        assert_eq!(m.map_cpu_read(0xFFFF), Some(0x7FFF));
    }

    #[test]
    fn declines_addresses_below_prg_window() {
        let m = Nrom::new(1, 1);
        assert_eq!(m.map_cpu_read(0x0000), None);
        assert_eq!(m.map_cpu_read(0x2002), None);
        assert_eq!(m.map_cpu_read(0x7FFF), None);
    }

    #[test]
    fn pattern_space_is_passed_through() {
        let m = Nrom::new(1, 1);
        assert_eq!(m.map_ppu_read(0x0000), Some(0x0000));
        assert_eq!(m.map_ppu_read(0x1FFF), Some(0x1FFF));
        assert_eq!(m.map_ppu_read(0x2000), None);
    }

    #[test]
    fn chr_writes_gated_on_chr_ram() {
        let rom = Nrom::new(1, 1);
        assert_eq!(rom.map_ppu_write(0x0000), None);

        let ram = Nrom::new(1, 0);
        assert_eq!(ram.map_ppu_write(0x0000), Some(0x0000));
        assert_eq!(ram.map_ppu_write(0x2000), None);
    }
}
