/*!
System orchestrator: phase-locks the CPU, PPU, and DMA engine.

One `clock` call is one global tick. The PPU advances on every tick; the
CPU slot comes up on every third tick and is given either to a DMA
micro-step (while a transfer is armed) or to the CPU's own `clock`. An
NMI request raised by the PPU is delivered after the tick's CPU slot, so
it can never interrupt a CPU step mid-cycle.

The orchestrator owns the CPU and the bus; the bus owns the PPU,
cartridge, controllers, and DMA state. There are no back-references.
*/

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;

pub struct Nes {
    pub cpu: Cpu,
    pub bus: Bus,
    system_clock: u64,
}

impl Nes {
    /// Assemble a machine around a loaded cartridge and run the CPU's
    /// reset sequence.
    pub fn new(cart: Cartridge) -> Self {
        let mut nes = Self {
            cpu: Cpu::new(),
            bus: Bus::new(cart),
            system_clock: 0,
        };
        nes.cpu.reset(&mut nes.bus);
        nes
    }

    /// Build a machine straight from iNES bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, String> {
        Ok(Self::new(Cartridge::from_ines_bytes(data)?))
    }

    /// Build a machine from an iNES file on disk.
    pub fn from_ines_file(path: &str) -> Result<Self, String> {
        Ok(Self::new(Cartridge::from_ines_file(path)?))
    }

    /// Re-run the power-on sequence without reconstructing the machine.
    pub fn reset(&mut self) {
        self.bus.cart.reset();
        self.bus.ppu.reset();
        self.bus.dma.reset();
        self.cpu.reset(&mut self.bus);
        self.system_clock = 0;
    }

    /// Advance the whole machine by one global tick.
    pub fn clock(&mut self) {
        self.bus.clock_ppu();

        if self.system_clock % 3 == 0 {
            if self.bus.dma_active() {
                // The CPU is stalled; the slot drives one DMA micro-step.
                self.bus.clock_dma(self.system_clock);
            } else {
                self.cpu.clock(&mut self.bus);
            }
        }

        // NMI delivery happens after the CPU slot, so the request is
        // observed before the next instruction fetch, never inside one.
        if self.bus.ppu.take_nmi() {
            self.cpu.nmi(&mut self.bus);
        }

        self.system_clock += 1;
    }

    /// Run until the in-flight CPU instruction completes and the next
    /// one is about to fetch.
    pub fn step_instruction(&mut self) {
        loop {
            self.clock();
            if self.system_clock % 3 == 0 && !self.bus.dma_active() && self.cpu.complete() {
                break;
            }
        }
    }

    /// Run until the PPU signals frame completion.
    pub fn step_frame(&mut self) {
        while !self.bus.ppu.take_frame_complete() {
            self.clock();
        }
    }

    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    pub fn frame_complete(&self) -> bool {
        self.bus.ppu.frame_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{build_ines, build_nrom_with_prg};

    fn machine(prg: &[u8]) -> Nes {
        let rom = build_nrom_with_prg(prg, 1, 1, None);
        Nes::from_ines_bytes(&rom).expect("machine")
    }

    #[test]
    fn reset_scenario_loads_vector_and_mirroring() {
        // prgSize=1, chrSize=1, vertical mirroring; PC comes from the
        // bytes the cartridge maps at $FFFC/$FFFD.
        let mut rom = build_ines(1, 1, 0b0000_0001, 0, 1, None);
        let prg_start = 16;
        rom[prg_start + 0x3FFC] = 0x34;
        rom[prg_start + 0x3FFD] = 0x92;
        let nes = Nes::from_ines_bytes(&rom).expect("machine");

        assert_eq!(nes.cpu.pc, 0x9234);
        assert_eq!(
            nes.bus.cart.mirroring(),
            crate::cartridge::Mirroring::Vertical
        );
    }

    #[test]
    fn ppu_runs_three_to_one_against_the_cpu() {
        let mut nes = machine(&[0xEA]);

        let ppu_ticks = 341u64 * 3; // three scanlines worth
        for _ in 0..ppu_ticks {
            nes.clock();
        }
        // PPU position advanced exactly ppu_ticks cycles from (-1, 0).
        assert_eq!(nes.bus.ppu.scanline(), 2);
        assert_eq!(nes.bus.ppu.cycle(), 0);
        // The CPU consumed exactly a third of the ticks: decoded cost
        // minus the not-yet-burned remainder of the in-flight instruction.
        let consumed = nes.cpu.total_cycles() - nes.cpu.cycles_remaining() as u64;
        assert_eq!(consumed, ppu_ticks / 3);
    }

    #[test]
    fn dma_stalls_the_cpu_for_513_or_514_cycles() {
        // Program: STA $4014 with A = 2 arms a DMA from page 2.
        // LDA #$02 ; STA $4014 ; NOP ...
        let mut nes = machine(&[0xA9, 0x02, 0x8D, 0x14, 0x40, 0xEA, 0xEA]);

        // Finish the reset burn-off, then run until the DMA is armed.
        while !nes.bus.dma_active() {
            nes.clock();
        }
        let armed_at = nes.system_clock() - 1; // tick that performed the arm

        // Count CPU slots while the transfer stays active; the CPU's own
        // clock must not advance during the stall.
        let cpu_cycles_at_arm = nes.cpu.total_cycles();
        let mut stalled_slots = 0u64;
        while nes.bus.dma_active() {
            nes.clock();
            if (nes.system_clock() - 1) % 3 == 0 {
                stalled_slots += 1;
            }
        }

        // Even arming tick -> 513, odd -> 514.
        let expected = if armed_at % 2 == 0 { 513 } else { 514 };
        assert_eq!(stalled_slots, expected);
        assert_eq!(nes.cpu.total_cycles(), cpu_cycles_at_arm);
    }

    #[test]
    fn dma_copies_the_whole_page_into_oam() {
        let mut nes = machine(&[0xA9, 0x03, 0x8D, 0x14, 0x40, 0xEA]);
        // Fill page 3 through the bus.
        for i in 0..256u16 {
            nes.bus.write(0x0300 + i, (255 - i) as u8);
        }

        while !nes.bus.dma_active() {
            nes.clock();
        }
        while nes.bus.dma_active() {
            nes.clock();
        }

        for i in 0..=255u8 {
            assert_eq!(nes.bus.ppu.peek_oam(i), 255 - i);
        }
    }

    #[test]
    fn nmi_observed_before_next_instruction_fetch() {
        // Enable NMI (write $80 to PPUCTRL), then spin on NOPs. The NMI
        // vector points at $9000; when vblank begins the CPU must vector
        // there before fetching another NOP.
        let mut prg = vec![0xEA; 0x100];
        prg[0] = 0xA9; // LDA #$80
        prg[1] = 0x80;
        prg[2] = 0x8D; // STA $2000
        prg[3] = 0x00;
        prg[4] = 0x20;
        let rom = build_nrom_with_prg(&prg, 1, 1, Some((0x8000, 0x9000, 0x8000)));
        let mut nes = Nes::from_ines_bytes(&rom).expect("machine");

        // Run one frame; vblank onset must redirect the CPU.
        let mut vectored = false;
        for _ in 0..(341 * 262 + 3) {
            nes.clock();
            if nes.cpu.pc >= 0x9000 && nes.cpu.pc < 0xA000 {
                vectored = true;
                break;
            }
        }
        assert!(vectored, "NMI was not delivered during vblank");
        assert!(nes.bus.ppu.frame_count() <= 1);
    }

    #[test]
    fn frame_stepping_advances_the_frame_counter() {
        let mut nes = machine(&[0xEA]);
        nes.step_frame();
        assert_eq!(nes.bus.ppu.frame_count(), 1);
        nes.step_frame();
        assert_eq!(nes.bus.ppu.frame_count(), 2);
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut nes = machine(&[0xA9, 0x42, 0xEA]);
        nes.step_instruction();
        assert_eq!(nes.cpu.a, 0x42);

        nes.reset();
        assert_eq!(nes.cpu.a, 0);
        assert_eq!(nes.system_clock(), 0);
        assert_eq!(nes.cpu.pc, 0x8000);
    }
}
