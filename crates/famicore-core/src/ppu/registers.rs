//! CPU-visible PPU register state and internal VRAM latches.
//!
//! Mirrors the `$2000-$2007` register set and the internal `v/t/x/w`
//! registers. The concrete bit layouts live in submodules.

mod control;
mod mask;
mod status;
mod vram_addr;
mod vram_registers;

pub(crate) use control::Control;
pub(crate) use mask::Mask;
pub(crate) use status::Status;
pub(crate) use vram_addr::VramAddr;
pub(crate) use vram_registers::VramRegisters;

use crate::mem_block::ppu::OamRam;

/// Aggregate of all CPU-visible PPU register state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Registers {
    /// Control register (`$2000`).
    pub(crate) control: Control,
    /// Mask register (`$2001`).
    pub(crate) mask: Mask,
    /// Status register (`$2002`).
    pub(crate) status: Status,
    /// OAM pointer driven by `$2003`/`$2004` (and OAM DMA).
    pub(crate) oam_addr: u8,
    /// Primary sprite memory accessible through `$2004`.
    pub(crate) oam: OamRam,
    /// Internal scroll registers (`v`/`t`/`x`/`w`).
    pub(crate) vram: VramRegisters,
    /// Read buffer implementing the delayed `$2007` read path.
    pub(crate) vram_buffer: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub(crate) fn new() -> Self {
        Self {
            control: Control::default(),
            mask: Mask::default(),
            status: Status::default(),
            oam_addr: 0,
            oam: OamRam::new(),
            vram: VramRegisters::default(),
            vram_buffer: 0,
        }
    }

    /// Restores power-on defaults.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// `$2000` write: the nametable select bits also land in `t`.
    pub(crate) fn write_control(&mut self, value: u8) {
        self.control = Control::from_bits_retain(value);
        self.vram.t.set_nametable(self.control.nametable_index());
    }
}
