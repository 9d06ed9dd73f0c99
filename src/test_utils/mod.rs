//! Shared test utilities for building minimal iNES (v1) ROM images.
//!
//! These helpers de-duplicate iNES construction logic across the ROM,
//! cartridge, bus, CPU, and orchestrator tests. They intentionally
//! support just what the suite needs (NROM, simple flags).
//!
//! Vectors live at the top of the PRG payload: offsets 0x3FFA..=0x3FFF
//! for a 16 KiB bank (NROM-128), 0x7FFA..=0x7FFF for 32 KiB (NROM-256).

/// Build a minimal iNES (v1) image with configurable PRG/CHR sizes and
/// flags.
///
/// - `prg_16k`: number of 16 KiB PRG units
/// - `chr_8k`: number of 8 KiB CHR units (0 => the loader allocates CHR RAM)
/// - `flags6`: mirroring, battery, trainer, mapper low nibble
/// - `flags7`: mapper high nibble and NES 2.0 detection bits
/// - `prg_ram_8k`: PRG RAM size in 8 KiB units (header byte 8)
/// - `trainer`: optional 512-byte trainer inserted after the header
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    // Header
    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.push(prg_ram_8k);
    bytes.extend_from_slice(&[0u8; 7]);

    // Optional trainer
    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }

    // Pattern-filled payloads so tests can recognize mapped bytes.
    bytes.extend(std::iter::repeat_n(0xAA, prg_16k * 16 * 1024));
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k * 8 * 1024));

    bytes
}

/// Build an NROM image with a caller-provided program at the start of a
/// single 16 KiB PRG bank, CHR filled with zeros, and vectors patched.
///
/// - `prg`: program bytes placed at PRG offset 0 (maps to $8000)
/// - `chr_8k`: CHR units (0 => CHR RAM)
/// - `prg_ram_8k`: header byte 8
/// - `vectors`: optional (reset, nmi, irq); all default to $8000
pub fn build_nrom_with_prg(
    prg: &[u8],
    chr_8k: usize,
    prg_ram_8k: u8,
    vectors: Option<(u16, u16, u16)>,
) -> Vec<u8> {
    assert!(
        prg.len() <= 16 * 1024,
        "program must fit within a 16 KiB PRG bank"
    );

    let mut rom = build_ines(1, chr_8k, 0, 0, prg_ram_8k, None);

    // Zero the PRG bank, then drop the program in at the start.
    let prg_start = 16;
    let prg_end = prg_start + 16 * 1024;
    rom[prg_start..prg_end].fill(0);
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    // Zero the CHR payload too; pattern fetch tests poke their own data.
    if chr_8k > 0 {
        rom[prg_end..].fill(0);
    }

    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut rom[prg_start..prg_end], reset, nmi, irq);

    rom
}

/// Write the NMI/RESET/IRQ vectors into a 16 KiB or 32 KiB PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!("unsupported PRG length for vectors: {other} bytes"),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom[7], 0x00);
        assert_eq!(rom[8], 1);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn writes_vectors_for_16k_prg() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x3FFA], 0x56);
        assert_eq!(prg[0x3FFB], 0x84);
        assert_eq!(prg[0x3FFC], 0x23);
        assert_eq!(prg[0x3FFD], 0x81);
        assert_eq!(prg[0x3FFE], 0xBC);
        assert_eq!(prg[0x3FFF], 0x8A);
    }

    #[test]
    fn nrom_builder_places_program_and_vectors() {
        let prg = [0xA9, 0x01, 0x00]; // LDA #$01; BRK
        let rom = build_nrom_with_prg(&prg, 1, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[16], 0xA9);
        // RESET low byte at PRG offset 0x3FFC.
        assert_eq!(rom[16 + 0x3FFC], 0x00);
        assert_eq!(rom[16 + 0x3FFD], 0x80);
    }
}
