//! CPU-visible memory bus.
//!
//! [`SystemBus`] is the console's address decoder and the ownership root
//! for everything the CPU can reach: internal RAM, the PPU, the two
//! controller ports, and the cartridge (whose mapper also serves PPU
//! pattern fetches). The CPU itself only sees the narrow [`Bus`] trait, so
//! unit tests can substitute a flat 64 KiB memory.
//!
//! CPU address map:
//!
//! | Range             | Resolution                                   |
//! |-------------------|----------------------------------------------|
//! | `$0000-$1FFF`     | internal RAM, mirrored every `$0800`         |
//! | `$2000-$3FFF`     | PPU register `$2000 + (addr & 7)`            |
//! | `$4014`           | OAM DMA trigger (write); reads return 0      |
//! | `$4016`           | controller 1 serial read / strobe write      |
//! | `$4017`           | controller 2 serial read                     |
//! | other `$40xx`     | APU and test space, stubbed to 0 / ignored   |
//! | `$4020-$FFFF`     | cartridge mapper                             |

use crate::{
    cartridge::Cartridge,
    controller::Controller,
    mem_block::cpu as cpu_ram,
    memory::cpu as cpu_mem,
    ppu::{PatternBus, Ppu},
    reset_kind::ResetKind,
};

/// Memory interface the CPU core executes against.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);

    /// Side-effect-free read for reset vectors, debuggers, and tests.
    fn peek(&self, addr: u16) -> u8;

    /// Little-endian 16-bit read, used for interrupt vectors.
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }
}

/// Cycle cost of an OAM DMA transfer started on an even CPU cycle.
const DMA_BASE_STALL: u32 = 513;

/// The real console bus: owns all devices and decodes CPU traffic.
pub struct SystemBus {
    ram: cpu_ram::Ram,
    pub(crate) ppu: Ppu,
    pub(crate) cartridge: Cartridge,
    pub(crate) controllers: [Controller; 2],
    /// CPU cycles elapsed since power-on; timestamps mapper writes.
    cycles: u64,
    /// Stall cycles from an OAM DMA, folded into the next step's cost.
    dma_stall: u32,
}

impl SystemBus {
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            ram: cpu_ram::Ram::new(),
            ppu: Ppu::new(),
            cartridge,
            controllers: [Controller::new(); 2],
            cycles: 0,
            dma_stall: 0,
        }
    }

    /// Resets devices in hardware order: mapper first, then the PPU.
    /// The CPU reset (vector fetch) is driven separately by the caller.
    pub fn reset(&mut self, kind: ResetKind) {
        if matches!(kind, ResetKind::PowerOn) {
            self.ram.fill(0);
        }
        self.cartridge.reset(kind);
        self.ppu.reset();
        self.cycles = 0;
        self.dma_stall = 0;
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        &mut self.cartridge
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Advances the PPU by `dots` sub-cycles. Returns `true` when a frame
    /// boundary (scanline 260 wrapping to the prerender line) was crossed.
    pub fn tick_ppu(&mut self, dots: u32) -> bool {
        let mut pattern = PatternBus::new(self.cartridge.mapper_mut());
        let mut frame_complete = false;
        for _ in 0..dots {
            frame_complete |= self.ppu.tick(&mut pattern);
        }
        frame_complete
    }

    /// Credits executed CPU cycles; mapper writes see this as a timestamp.
    pub fn add_cycles(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Takes the stall cost of a DMA triggered during the last instruction.
    pub fn take_dma_stall(&mut self) -> u32 {
        std::mem::take(&mut self.dma_stall)
    }

    /// Level of the mapper IRQ line.
    pub fn irq_line(&self) -> bool {
        self.cartridge.mapper().irq_pending()
    }

    /// `$4014` write: copy a 256-byte page into OAM through the PPU's OAM
    /// port. The copy is atomic from the CPU's point of view; the bus only
    /// remembers the stall cycles so the driver can keep PPU timing aligned.
    fn oam_dma(&mut self, page: u8) {
        let base = u16::from(page) << 8;
        for offset in 0..=255u16 {
            let value = self.read(base | offset);
            self.ppu.write_oam_data(value);
        }
        // 513 cycles, plus one more when the write lands on an odd cycle.
        self.dma_stall = DMA_BASE_STALL + (self.cycles & 1) as u32;
    }
}

impl Bus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            cpu_mem::INTERNAL_RAM_START..=cpu_mem::INTERNAL_RAM_MIRROR_END => {
                self.ram[(addr & cpu_mem::INTERNAL_RAM_MASK) as usize]
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                let mut pattern = PatternBus::new(self.cartridge.mapper_mut());
                self.ppu.cpu_read(addr, &mut pattern)
            }
            cpu_mem::CONTROLLER_PORT_1 => self.controllers[0].read(),
            cpu_mem::CONTROLLER_PORT_2 => self.controllers[1].read(),
            // APU, OAM DMA, and test space read back as zero.
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::TEST_MODE_END => 0,
            cpu_mem::CARTRIDGE_SPACE_BASE..=cpu_mem::CPU_ADDR_END => {
                self.cartridge.mapper().cpu_read(addr)
            }
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            cpu_mem::INTERNAL_RAM_START..=cpu_mem::INTERNAL_RAM_MIRROR_END => {
                self.ram[(addr & cpu_mem::INTERNAL_RAM_MASK) as usize] = value;
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                let mut pattern = PatternBus::new(self.cartridge.mapper_mut());
                self.ppu.cpu_write(addr, value, &mut pattern);
            }
            cpu_mem::OAM_DMA => self.oam_dma(value),
            cpu_mem::CONTROLLER_PORT_1 => {
                // The strobe line is shared by both ports.
                self.controllers[0].write_strobe(value);
                self.controllers[1].write_strobe(value);
            }
            // APU register space and the frame counter are out of scope.
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::TEST_MODE_END => {}
            cpu_mem::CARTRIDGE_SPACE_BASE..=cpu_mem::CPU_ADDR_END => {
                let cycle = self.cycles;
                self.cartridge.mapper_mut().cpu_write(addr, value, cycle);
            }
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        match addr {
            cpu_mem::INTERNAL_RAM_START..=cpu_mem::INTERNAL_RAM_MIRROR_END => {
                self.ram[(addr & cpu_mem::INTERNAL_RAM_MASK) as usize]
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => self.ppu.peek(addr),
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::TEST_MODE_END => 0,
            cpu_mem::CARTRIDGE_SPACE_BASE..=cpu_mem::CPU_ADDR_END => {
                self.cartridge.mapper().cpu_read(addr)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::Bus;

    /// Flat 64 KiB memory standing in for the console bus in CPU tests.
    pub(crate) struct MockBus {
        pub(crate) mem: Box<[u8; 0x10000]>,
    }

    impl MockBus {
        pub(crate) fn new() -> Self {
            Self {
                mem: Box::new([0; 0x10000]),
            }
        }

        /// Loads bytes at `addr` and points the reset vector there.
        pub(crate) fn with_program(addr: u16, program: &[u8]) -> Self {
            let mut bus = Self::new();
            bus.mem[addr as usize..addr as usize + program.len()].copy_from_slice(program);
            bus.mem[0xFFFC] = addr as u8;
            bus.mem[0xFFFD] = (addr >> 8) as u8;
            bus
        }
    }

    impl Bus for MockBus {
        fn read(&mut self, addr: u16) -> u8 {
            self.mem[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.mem[addr as usize] = value;
        }

        fn peek(&self, addr: u16) -> u8 {
            self.mem[addr as usize]
        }
    }
}
