//! famicore-core: an NES emulator core.
//!
//! The crate models the console as four tightly coupled parts: a 6502 CPU
//! ([`cpu::Cpu`]), a scanline-granular PPU ([`ppu::Ppu`]), the address
//! decoder that owns all shared devices ([`bus::SystemBus`]), and the
//! cartridge mappers ([`cartridge::mapper::Mapper`]). [`Nes`] is the
//! driver that steps them in lockstep: one CPU instruction, then three PPU
//! dots per CPU cycle, then interrupt delivery.
//!
//! ROM parsing, video output, input translation, and audio synthesis live
//! outside the core; the public surface speaks decoded headers, palette
//! index framebuffers, and button states.

use crate::{
    bus::SystemBus,
    cartridge::Cartridge,
    controller::Button,
    cpu::{Cpu, CpuSnapshot},
    error::Error,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
    reset_kind::ResetKind,
};

pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mem_block;
pub mod memory;
pub mod ppu;
pub mod reset_kind;

/// Result of one driver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// CPU cycles consumed: the instruction itself, plus any OAM DMA stall
    /// and interrupt entry that followed it.
    pub cycles: u32,
    /// True once per frame, on the scanline 260 -> prerender transition.
    pub frame_complete: bool,
}

/// The assembled console.
///
/// Composes the CPU with the bus that owns every other device. There is no
/// shared-memory concurrency anywhere inside: all stepping happens in the
/// caller's thread, and interrupts are sampled between instructions.
pub struct Nes {
    cpu: Cpu,
    bus: SystemBus,
}

impl Nes {
    /// Builds and powers on a console around an inserted cartridge.
    /// Components reset in hardware order: mapper, then PPU, then CPU.
    pub fn power_on(cartridge: Cartridge) -> Self {
        tracing::debug!(mapper = cartridge.mapper().name(), "power-on");
        let mut bus = SystemBus::new(cartridge);
        bus.reset(ResetKind::PowerOn);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        Self { cpu, bus }
    }

    /// Reset-button press: reinitializes CPU, PPU, and mapper state without
    /// reconstructing anything. Work RAM survives.
    pub fn reset(&mut self) {
        self.bus.reset(ResetKind::Soft);
        self.cpu.reset(&mut self.bus);
    }

    /// Executes one CPU instruction and advances the PPU by three dots per
    /// cycle, then delivers pending interrupts: NMI is edge-delivered and
    /// acknowledged immediately, the mapper IRQ is level-sampled and gated
    /// by the CPU's interrupt-disable flag.
    pub fn step(&mut self) -> Result<Step, Error> {
        let instruction_cycles = self.cpu.step(&mut self.bus)?;
        // An OAM DMA triggered by this instruction stalls the CPU; the PPU
        // keeps running through the stall.
        let mut cycles = instruction_cycles + self.bus.take_dma_stall();
        let mut frame_complete = self.bus.tick_ppu(cycles * 3);
        self.bus.add_cycles(cycles);

        if self.bus.ppu().nmi_line() {
            let entry = self.cpu.nmi(&mut self.bus);
            self.bus.ppu.acknowledge_nmi();
            frame_complete |= self.bus.tick_ppu(entry * 3);
            self.bus.add_cycles(entry);
            cycles += entry;
        } else if self.bus.irq_line() && !self.cpu.interrupt_disabled() {
            let entry = self.cpu.irq(&mut self.bus);
            frame_complete |= self.bus.tick_ppu(entry * 3);
            self.bus.add_cycles(entry);
            cycles += entry;
        }

        Ok(Step {
            cycles,
            frame_complete,
        })
    }

    /// Runs instructions until the PPU finishes the current frame.
    /// Returns the CPU cycles spent.
    pub fn frame(&mut self) -> Result<u32, Error> {
        let mut total = 0;
        loop {
            let step = self.step()?;
            total += step.cycles;
            if step.frame_complete {
                return Ok(total);
            }
        }
    }

    /// Latest completed frame: 256x240 NES color indices (0..=63).
    pub fn framebuffer(&self) -> &[u8; SCREEN_WIDTH * SCREEN_HEIGHT] {
        self.bus.ppu().framebuffer()
    }

    /// Pushes host input into one of the two controller latches.
    pub fn set_button(&mut self, pad: usize, button: Button, pressed: bool) {
        if let Some(controller) = self.bus.controllers.get_mut(pad) {
            controller.set_button(button, pressed);
        }
    }

    /// Side-effect-free read of the CPU address space, for tests and
    /// debugging front-ends.
    pub fn peek(&self, addr: u16) -> u8 {
        crate::bus::Bus::peek(&self.bus, addr)
    }

    /// Current CPU registers.
    pub fn cpu_snapshot(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }

    /// Read-only PPU view (timing counters, OAM, framebuffer).
    pub fn ppu(&self) -> &ppu::Ppu {
        self.bus.ppu()
    }

    /// Frames completed since power-on.
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu().frame_count()
    }

    pub fn cartridge(&self) -> &Cartridge {
        self.bus.cartridge()
    }

    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        self.bus.cartridge_mut()
    }

    /// Battery-backed PRG-RAM bytes, when the cartridge persists them.
    pub fn save_ram(&self) -> Option<&[u8]> {
        self.bus.cartridge().save_ram()
    }

    /// Restores previously persisted battery RAM.
    pub fn restore_save_ram(&mut self, bytes: &[u8]) {
        self.bus.cartridge_mut().restore_save_ram(bytes);
    }
}

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    #[ctor]
    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
