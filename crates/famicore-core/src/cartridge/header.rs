//! Decoded cartridge metadata.
//!
//! ROM file parsing happens outside the core; a loader hands over this
//! already-decoded header together with the raw PRG/CHR payloads. Only the
//! fields the core consumes are kept here.

/// Layout mirroring type for the PPU nametables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirroring {
    /// Two horizontal nametables that mirror vertically.
    Horizontal,
    /// Two vertical nametables that mirror horizontally.
    Vertical,
    /// Cartridge supplies its own four nametables. The core falls back to
    /// vertical layout since four-screen VRAM is not modelled.
    FourScreen,
}

/// Size of one PRG-ROM bank as counted by the header.
pub const PRG_BANK_UNIT: usize = 16 * 1024;
/// Size of one CHR-ROM bank as counted by the header.
pub const CHR_BANK_UNIT: usize = 8 * 1024;
/// Default PRG-RAM allocation when the header requests work RAM.
pub const PRG_RAM_DEFAULT: usize = 8 * 1024;

/// Decoded cartridge header, as provided by the external ROM loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// iNES mapper number. The core supports 0, 1, 2, and 4.
    pub mapper: u16,
    /// Hardwired nametable layout (mappers may override at runtime).
    pub mirroring: Mirroring,
    /// Set when PRG-RAM is battery backed and should be persisted.
    pub battery: bool,
    /// A 512-byte trainer preceded the PRG payload. Ignored by the core.
    pub trainer: bool,
    /// PRG-ROM size in bytes (multiple of 16 KiB).
    pub prg_rom_size: usize,
    /// CHR-ROM size in bytes (multiple of 8 KiB); zero requests CHR-RAM.
    pub chr_rom_size: usize,
}

impl Header {
    /// Builds a header for the given bank counts with common defaults.
    /// Primarily a convenience for tests and synthetic cartridges.
    pub fn with_banks(mapper: u16, prg_banks: usize, chr_banks: usize) -> Self {
        Self {
            mapper,
            mirroring: Mirroring::Horizontal,
            battery: false,
            trainer: false,
            prg_rom_size: prg_banks * PRG_BANK_UNIT,
            chr_rom_size: chr_banks * CHR_BANK_UNIT,
        }
    }

    /// CHR-RAM size to allocate when no CHR-ROM is present.
    pub fn chr_ram_size(&self) -> usize {
        if self.chr_rom_size == 0 {
            CHR_BANK_UNIT
        } else {
            0
        }
    }
}
