/*!
Cartridge: header-derived metadata, owned PRG/CHR memory, and the selected
mapper strategy.

Features:
- Built from a parsed iNES image (`rom::RomImage`) or raw bytes/file path
- Allocates 8 KiB of CHR RAM when the header declares zero CHR banks
- Constructs the concrete mapper from the header's mapper id (NROM only)
- CPU/PPU accessors translate through the mapper and return `None`/`false`
  when the cartridge declines, letting the bus fall through

The mapper identity is fixed at load time; bank switching (in mappers that
have it) mutates offsets, never the identity.
*/

use std::path::Path;

use crate::mapper::{Mapper, Nrom};
use crate::rom::RomImage;

/// Nametable mirroring arrangement, from the header (bits 0 and 3 of
/// flags 6). `SingleScreen` exists for mapper-controlled boards; the
/// baseline mapper never selects it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    SingleScreen,
    FourScreen,
}

pub struct Cartridge {
    prg: Vec<u8>,
    chr: Vec<u8>,
    mapper: Box<dyn Mapper>,

    mapper_id: u8,
    mirroring: Mirroring,
    prg_banks: u8,
    chr_banks: u8,
    battery: bool,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("mirroring", &self.mirroring)
            .field("prg_banks", &self.prg_banks)
            .field("chr_banks", &self.chr_banks)
            .field("battery", &self.battery)
            .finish()
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Build a cartridge from a parsed iNES image.
    ///
    /// An unsupported mapper id is a hard failure: no mapper strategy can
    /// be constructed, so no cartridge is produced.
    pub fn from_rom(rom: RomImage) -> Result<Self, String> {
        let header = rom.header;
        let mapper_id = header.mapper_id();

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Nrom::new(header.prg_units, header.chr_units)),
            id => return Err(format!("unsupported mapper id: {id}")),
        };

        let mirroring = if header.four_screen() {
            Mirroring::FourScreen
        } else if header.vertical_mirroring() {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        // CHR size 0 means the board carries pattern RAM, not ROM.
        let chr = if header.chr_units == 0 {
            vec![0; 8 * 1024]
        } else {
            rom.chr
        };

        Ok(Self {
            prg: rom.prg,
            chr,
            mapper,
            mapper_id,
            mirroring,
            prg_banks: header.prg_units,
            chr_banks: header.chr_units,
            battery: header.battery_backed(),
        })
    }

    /// Build a cartridge from raw iNES bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, String> {
        Self::from_rom(RomImage::parse(data)?)
    }

    /// Build a cartridge from an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        Self::from_rom(RomImage::load(path)?)
    }

    // -------------- Bus-facing access --------------

    /// CPU read through the mapper. `None` means the cartridge does not
    /// claim this address and the bus should fall through.
    #[inline]
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        self.mapper.map_cpu_read(addr).map(|i| self.prg[i])
    }

    /// CPU write through the mapper. Returns true when the cartridge
    /// claimed the address (the bus stops decoding).
    #[inline]
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.map_cpu_write(addr) {
            Some(i) => {
                self.prg[i] = data;
                true
            }
            None => false,
        }
    }

    /// PPU read through the mapper (pattern space).
    #[inline]
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        self.mapper.map_ppu_read(addr).map(|i| self.chr[i])
    }

    /// PPU write through the mapper. Accepted only on CHR-RAM boards.
    #[inline]
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.map_ppu_write(addr) {
            Some(i) => {
                self.chr[i] = data;
                true
            }
            None => false,
        }
    }

    /// Reset mapper-internal bank state.
    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    // -------------- Accessors --------------

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    /// Raw PRG bytes, for inspection tooling.
    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    /// Raw CHR bytes, for inspection tooling.
    pub fn chr(&self) -> &[u8] {
        &self.chr
    }
}
