//! Cartridge mapper implementations.
//!
//! The supported board set is closed (NROM, MMC1, UxROM, MMC3), so dispatch
//! goes through a sum type instead of trait objects: the PPU and bus match
//! on the variant, the compiler sees every call target, and cloning the
//! mapper for savestate-style snapshots needs no machinery.
//!
//! Every variant owns its PRG-ROM, its CHR storage, and an 8 KiB PRG-RAM
//! block, and reports the active nametable [`Mirroring`]. MMC3 additionally
//! watches the PPU address bus (via [`Mapper::notify_ppu_address`]) to drive
//! its scanline IRQ counter.

mod chr_storage;
mod mapper0;
mod mapper1;
mod mapper2;
mod mapper4;

pub use chr_storage::ChrStorage;
pub use mapper0::Nrom;
pub use mapper1::Mmc1;
pub use mapper2::UxRom;
pub use mapper4::Mmc3;

use crate::{
    cartridge::header::{Header, Mirroring, PRG_RAM_DEFAULT},
    error::Error,
    reset_kind::ResetKind,
};

/// Allocates the cartridge work RAM mapped at `$6000-$7FFF`.
///
/// Real boards vary between 0 and 8 KiB; like most emulators we always
/// provide the full window so homebrew and test programs that assume work
/// RAM keep running.
pub(crate) fn allocate_prg_ram(_header: &Header) -> Box<[u8]> {
    vec![0; PRG_RAM_DEFAULT].into_boxed_slice()
}

/// Closed set of supported cartridge boards.
#[derive(Debug, Clone)]
pub enum Mapper {
    Nrom(Nrom),
    Mmc1(Mmc1),
    UxRom(UxRom),
    Mmc3(Mmc3),
}

impl Mapper {
    /// Builds the mapper selected by the header, taking ownership of the ROM
    /// payloads. Unknown mapper ids are refused before any state exists.
    pub fn for_cartridge(
        header: Header,
        prg_rom: Box<[u8]>,
        chr_rom: Box<[u8]>,
    ) -> Result<Self, Error> {
        if prg_rom.len() < header.prg_rom_size {
            return Err(Error::TruncatedPrgRom {
                expected: header.prg_rom_size,
                actual: prg_rom.len(),
            });
        }
        if chr_rom.len() < header.chr_rom_size {
            return Err(Error::TruncatedChrRom {
                expected: header.chr_rom_size,
                actual: chr_rom.len(),
            });
        }

        let mapper = match header.mapper {
            0 => Self::Nrom(Nrom::new(header, prg_rom, chr_rom)),
            1 => Self::Mmc1(Mmc1::new(header, prg_rom, chr_rom)),
            2 => Self::UxRom(UxRom::new(header, prg_rom, chr_rom)),
            4 => Self::Mmc3(Mmc3::new(header, prg_rom, chr_rom)),
            id => return Err(Error::UnsupportedMapper { id }),
        };
        tracing::debug!(mapper = mapper.name(), "cartridge mapper selected");
        Ok(mapper)
    }

    /// Human-readable board name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nrom(_) => "NROM",
            Self::Mmc1(_) => "MMC1",
            Self::UxRom(_) => "UxROM",
            Self::Mmc3(_) => "MMC3",
        }
    }

    /// iNES mapper number of the active board.
    pub fn id(&self) -> u16 {
        match self {
            Self::Nrom(_) => 0,
            Self::Mmc1(_) => 1,
            Self::UxRom(_) => 2,
            Self::Mmc3(_) => 4,
        }
    }

    /// Reinitializes board registers. ROM and (for soft resets) RAM survive.
    pub fn reset(&mut self, kind: ResetKind) {
        match self {
            Self::Nrom(m) => m.reset(kind),
            Self::Mmc1(m) => m.reset(kind),
            Self::UxRom(m) => m.reset(kind),
            Self::Mmc3(m) => m.reset(kind),
        }
    }

    /// CPU-side read of cartridge space (`$4020-$FFFF`).
    pub fn cpu_read(&self, addr: u16) -> u8 {
        match self {
            Self::Nrom(m) => m.cpu_read(addr),
            Self::Mmc1(m) => m.cpu_read(addr),
            Self::UxRom(m) => m.cpu_read(addr),
            Self::Mmc3(m) => m.cpu_read(addr),
        }
    }

    /// CPU-side write to cartridge space. `cpu_cycle` lets serial-protocol
    /// boards (MMC1) reject back-to-back writes from RMW instructions.
    pub fn cpu_write(&mut self, addr: u16, value: u8, cpu_cycle: u64) {
        match self {
            Self::Nrom(m) => m.cpu_write(addr, value),
            Self::Mmc1(m) => m.cpu_write(addr, value, cpu_cycle),
            Self::UxRom(m) => m.cpu_write(addr, value),
            Self::Mmc3(m) => m.cpu_write(addr, value),
        }
    }

    /// PPU-side read of pattern-table space (`$0000-$1FFF`).
    pub fn ppu_read(&self, addr: u16) -> u8 {
        match self {
            Self::Nrom(m) => m.ppu_read(addr),
            Self::Mmc1(m) => m.ppu_read(addr),
            Self::UxRom(m) => m.ppu_read(addr),
            Self::Mmc3(m) => m.ppu_read(addr),
        }
    }

    /// PPU-side write to pattern-table space (CHR-RAM boards only).
    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        match self {
            Self::Nrom(m) => m.ppu_write(addr, value),
            Self::Mmc1(m) => m.ppu_write(addr, value),
            Self::UxRom(m) => m.ppu_write(addr, value),
            Self::Mmc3(m) => m.ppu_write(addr, value),
        }
    }

    /// Reports an address observed on the PPU bus at the given dot. MMC3
    /// feeds this into its A12 edge filter; other boards ignore it.
    pub fn notify_ppu_address(&mut self, addr: u16, dot: u64) {
        if let Self::Mmc3(m) = self {
            m.observe_ppu_address(addr, dot);
        }
    }

    /// Active nametable layout.
    pub fn mirroring(&self) -> Mirroring {
        match self {
            Self::Nrom(m) => m.mirroring(),
            Self::Mmc1(m) => m.mirroring(),
            Self::UxRom(m) => m.mirroring(),
            Self::Mmc3(m) => m.mirroring(),
        }
    }

    /// Level state of the board's IRQ line. Stays asserted until the board's
    /// acknowledge register is written.
    pub fn irq_pending(&self) -> bool {
        match self {
            Self::Mmc3(m) => m.irq_pending(),
            _ => false,
        }
    }

    /// Cartridge work RAM contents, when the board has any.
    pub fn prg_ram(&self) -> Option<&[u8]> {
        let ram = match self {
            Self::Nrom(m) => m.prg_ram(),
            Self::Mmc1(m) => m.prg_ram(),
            Self::UxRom(m) => m.prg_ram(),
            Self::Mmc3(m) => m.prg_ram(),
        };
        (!ram.is_empty()).then_some(ram)
    }

    /// Mutable cartridge work RAM, for battery-save restore.
    pub fn prg_ram_mut(&mut self) -> Option<&mut [u8]> {
        let ram = match self {
            Self::Nrom(m) => m.prg_ram_mut(),
            Self::Mmc1(m) => m.prg_ram_mut(),
            Self::UxRom(m) => m.prg_ram_mut(),
            Self::Mmc3(m) => m.prg_ram_mut(),
        };
        (!ram.is_empty()).then_some(ram)
    }
}
