use famicore::Nes;

/// Build a small self-contained iNES image so the demo runs without a
/// ROM file: a short arithmetic loop with all vectors at $8000.
fn build_demo_ines() -> Vec<u8> {
    let mut rom = Vec::with_capacity(16 + 16 * 1024 + 8 * 1024);
    rom.extend_from_slice(b"NES\x1A");
    rom.push(1); // 1 x 16KB PRG
    rom.push(1); // 1 x 8KB CHR
    rom.push(0); // flags6: horizontal mirroring, no trainer
    rom.push(0); // flags7
    rom.push(1); // PRG-RAM size in 8KB units
    rom.extend_from_slice(&[0u8; 7]);

    let mut prg = vec![0u8; 16 * 1024];
    let program: &[u8] = &[
        0xA9, 0x10, // LDA #$10
        0x69, 0x05, // ADC #$05 => A = 0x15
        0x8D, 0x00, 0x02, // STA $0200
        0xE8, // INX
        0x4C, 0x07, 0x80, // JMP $8007 (spin on INX)
    ];
    prg[..program.len()].copy_from_slice(program);

    // NMI / RESET / IRQ vectors at the top of the 16KB bank.
    for (offset, vector) in [(0x3FFA, 0x8000u16), (0x3FFC, 0x8000), (0x3FFE, 0x8000)] {
        prg[offset] = (vector & 0xFF) as u8;
        prg[offset + 1] = (vector >> 8) as u8;
    }
    rom.extend_from_slice(&prg);

    rom.extend_from_slice(&[0u8; 8 * 1024]);
    rom
}

fn main() {
    // With a path argument, run that ROM; otherwise run the built-in demo.
    let nes = match std::env::args().nth(1) {
        Some(path) => match Nes::from_ines_file(&path) {
            Ok(nes) => nes,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Nes::from_ines_bytes(&build_demo_ines()).expect("demo image is valid"),
    };

    #[cfg(feature = "display")]
    {
        if let Err(e) = famicore::display::run(nes) {
            eprintln!("display error: {e}");
            std::process::exit(1);
        }
        return;
    }

    #[cfg(not(feature = "display"))]
    run_headless(nes);
}

#[cfg(not(feature = "display"))]
fn run_headless(mut nes: Nes) {
    // Run one full frame, then dump the machine state.
    nes.step_frame();

    let m0200 = nes.bus.peek(0x0200);
    println!("A: 0x{:02X}", nes.cpu.a);
    println!("X: 0x{:02X}", nes.cpu.x);
    println!("Y: 0x{:02X}", nes.cpu.y);
    println!("SP: 0x{:02X}", nes.cpu.sp);
    println!("PC: 0x{:04X}", nes.cpu.pc);
    println!("P (flags): 0b{:08b}", nes.cpu.status);
    println!("last op: {} ({})", nes.cpu.mnemonic(), nes.cpu.mode_name());
    println!("mem[0x0200]: 0x{:02X}", m0200);
    println!(
        "ppu: frame {} at scanline {}, cycle {}",
        nes.bus.ppu.frame_count(),
        nes.bus.ppu.scanline(),
        nes.bus.ppu.cycle()
    );
}
