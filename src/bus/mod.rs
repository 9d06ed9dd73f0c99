/*!
Memory bus: routes every CPU-originated access to its device.

Decode order (the cartridge may shadow anything, so it goes first):
1. Cartridge, via the mapper's decline sentinel
2. 2 KiB CPU RAM, mirrored every $0800 across $0000-$1FFF
3. PPU register window, 8 registers mirrored across $2000-$3FFF
4. $4014 OAM-DMA arm (write only)
5. Controller ports $4016/$4017 (latch on write, serial bit on read)

The bus owns every device on the CPU side: cartridge, PPU, controllers,
and the DMA state machine. The orchestrator owns the bus and the CPU.
*/

use crate::cartridge::Cartridge;
use crate::controller::Controller;
use crate::ppu::Ppu;

pub mod dma;

pub use dma::OamDma;

pub struct Bus {
    ram: [u8; 2048],
    pub cart: Cartridge,
    pub ppu: Ppu,
    pub controllers: [Controller; 2],
    pub(crate) dma: OamDma,
}

impl Bus {
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            cart,
            ppu: Ppu::new(),
            controllers: [Controller::new(), Controller::new()],
            dma: OamDma::new(),
        }
    }

    /// CPU read. With `read_only` set, the access is routed through the
    /// side-effect-free path (no status latch clears, no controller
    /// shifting) for inspection tooling.
    pub fn read(&mut self, addr: u16, read_only: bool) -> u8 {
        if read_only {
            return self.peek(addr);
        }

        if let Some(data) = self.cart.cpu_read(addr) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.read_register(addr & 0x0007, &self.cart),
            0x4016..=0x4017 => self.controllers[(addr & 1) as usize].read(),
            _ => 0,
        }
    }

    /// Side-effect-free read of the same address space.
    pub fn peek(&self, addr: u16) -> u8 {
        if let Some(data) = self.cart.cpu_read(addr) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.peek_register(addr & 0x0007),
            0x4016..=0x4017 => self.controllers[(addr & 1) as usize].peek(),
            _ => 0,
        }
    }

    /// CPU write.
    pub fn write(&mut self, addr: u16, data: u8) {
        if self.cart.cpu_write(addr, data) {
            return;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => {
                let Bus { ppu, cart, .. } = self;
                ppu.write_register(addr & 0x0007, data, cart);
            }
            0x4014 => self.dma.start(data),
            0x4016..=0x4017 => self.controllers[(addr & 1) as usize].latch(),
            _ => {}
        }
    }

    /// Advance the PPU by one of its cycles.
    pub(crate) fn clock_ppu(&mut self) {
        let Bus { ppu, cart, .. } = self;
        ppu.clock(cart);
    }

    /// One DMA micro-step, performed on a CPU slot while a transfer is
    /// active. Global-tick parity sequences the alignment step and the
    /// read/write halves of each byte pair.
    pub(crate) fn clock_dma(&mut self, system_clock: u64) {
        if self.dma.dummy {
            if system_clock & 1 == 1 {
                self.dma.dummy = false;
            }
        } else if system_clock & 1 == 0 {
            let addr = self.dma.source_addr();
            self.dma.data = self.read(addr, false);
        } else {
            self.ppu.write_oam(self.dma.addr, self.dma.data);
            self.dma.addr = self.dma.addr.wrapping_add(1);
            if self.dma.addr == 0 {
                self.dma.complete();
            }
        }
    }

    pub fn dma_active(&self) -> bool {
        self.dma.is_active()
    }

    /// Raw CPU RAM (2 KiB), for inspection tooling.
    pub fn ram(&self) -> &[u8; 2048] {
        &self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{build_ines, build_nrom_with_prg};

    fn bus() -> Bus {
        let rom = build_ines(1, 0, 0, 0, 1, None);
        Bus::new(Cartridge::from_ines_bytes(&rom).expect("cart"))
    }

    #[test]
    fn ram_mirrors_every_0x800() {
        let mut b = bus();
        b.write(0x0001, 0xAA);
        assert_eq!(b.read(0x0001, false), 0xAA);
        assert_eq!(b.read(0x0801, false), 0xAA);
        assert_eq!(b.read(0x1001, false), 0xAA);
        assert_eq!(b.read(0x1801, false), 0xAA);

        b.write(0x1801, 0x55);
        assert_eq!(b.read(0x0001, false), 0x55);
    }

    #[test]
    fn ppu_registers_mirror_every_8() {
        let mut b = bus();
        // PPUCTRL written through the mirror at $2008 must land in the
        // same Controller register.
        b.write(0x2008, 0x80);
        assert!(b.ppu.control().enable_nmi());
        b.write(0x2000, 0x00);
        assert!(!b.ppu.control().enable_nmi());
    }

    #[test]
    fn cartridge_claims_prg_window() {
        let prg = [0xEA, 0x00];
        let rom = build_nrom_with_prg(&prg, 1, 1, None);
        let mut b = Bus::new(Cartridge::from_ines_bytes(&rom).expect("cart"));
        assert_eq!(b.read(0x8000, false), 0xEA);
        // NROM-128 mirror of the same bank.
        assert_eq!(b.read(0xC000, false), 0xEA);
    }

    #[test]
    fn dma_write_arms_transfer() {
        let mut b = bus();
        assert!(!b.dma_active());
        b.write(0x4014, 0x02);
        assert!(b.dma_active());
        assert_eq!(b.dma.page, 0x02);
        assert_eq!(b.dma.addr, 0);
    }

    #[test]
    fn dma_micro_steps_copy_a_page() {
        let mut b = bus();
        for i in 0..256u16 {
            b.write(0x0200 + i, i as u8);
        }
        b.write(0x4014, 0x02);

        // Drive micro-steps on consecutive CPU slots with alternating
        // parity, starting on an odd tick so alignment takes one step.
        let mut tick = 1u64;
        let mut steps = 0u32;
        while b.dma_active() {
            b.clock_dma(tick);
            tick += 1;
            steps += 1;
        }

        assert_eq!(steps, 513);
        for i in 0..=255u8 {
            assert_eq!(b.ppu.peek_oam(i), i);
        }
    }

    #[test]
    fn controller_port_latch_and_shift() {
        use crate::controller::Button;
        let mut b = bus();
        b.controllers[0].press(Button::A);
        b.controllers[0].press(Button::Right);

        // Any write to $4016 latches the live state.
        b.write(0x4016, 0x01);
        let bits: Vec<u8> = (0..8).map(|_| b.read(0x4016, false)).collect();
        assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn read_only_reads_have_no_side_effects() {
        let mut b = bus();
        // Clock the PPU to vblank onset, then peek the status register twice.
        while !b.ppu.status_register().vertical_blank() {
            b.clock_ppu();
        }
        assert_ne!(b.read(0x2002, true) & 0x80, 0);
        assert_ne!(b.read(0x2002, true) & 0x80, 0);
        // A real read clears it.
        assert_ne!(b.read(0x2002, false) & 0x80, 0);
        assert_eq!(b.read(0x2002, false) & 0x80, 0);
    }

    #[test]
    fn unmapped_reads_return_zero() {
        let mut b = bus();
        assert_eq!(b.read(0x5000, false), 0);
        assert_eq!(b.read(0x4000, false), 0);
    }
}
