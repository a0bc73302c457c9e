//! Shared definitions for the NES memory map.
//!
//! Centralizing address-related constants keeps the hardware layout in one
//! location and makes it easier to cross-reference the console documentation
//! while reading the rest of the code base.

/// CPU memory map details.
pub mod cpu {
    /// Size of the console-internal work RAM.
    pub const INTERNAL_RAM_SIZE: usize = 0x0800;
    /// First address of the internal RAM region.
    pub const INTERNAL_RAM_START: u16 = 0x0000;
    /// Last address of the internal RAM mirror region (`$1FFF`).
    pub const INTERNAL_RAM_MIRROR_END: u16 = 0x1FFF;
    /// Mask that folds a mirrored RAM address onto the 2 KiB backing store.
    pub const INTERNAL_RAM_MASK: u16 = 0x07FF;

    /// First address of the hardware stack page.
    pub const STACK_PAGE_START: u16 = 0x0100;

    /// First CPU-visible PPU register mirror address.
    pub const PPU_REGISTER_BASE: u16 = 0x2000;
    /// Last CPU-visible PPU register mirror address.
    pub const PPU_REGISTER_END: u16 = 0x3FFF;

    /// Start of the CPU-mapped APU register range.
    pub const APU_REGISTER_BASE: u16 = 0x4000;
    /// Final APU channel register before the status/DMA bridge.
    pub const APU_CHANNEL_END: u16 = 0x4013;
    /// APU status register (`$4015`).
    pub const APU_STATUS: u16 = 0x4015;

    /// OAM DMA trigger register (`$4014`).
    pub const OAM_DMA: u16 = 0x4014;
    /// Controller port 1 (`$4016`).
    pub const CONTROLLER_PORT_1: u16 = 0x4016;
    /// Controller port 2 (`$4017`).
    pub const CONTROLLER_PORT_2: u16 = 0x4017;

    /// CPU test-mode register space (`$4018-$401F`), unused on retail units.
    pub const TEST_MODE_BASE: u16 = 0x4018;
    pub const TEST_MODE_END: u16 = 0x401F;

    /// First address decoded by the cartridge.
    pub const CARTRIDGE_SPACE_BASE: u16 = 0x4020;
    /// Start of the optional PRG-RAM window.
    pub const PRG_RAM_START: u16 = 0x6000;
    /// End of the optional PRG-RAM window.
    pub const PRG_RAM_END: u16 = 0x7FFF;
    /// Start of the PRG-ROM window.
    pub const PRG_ROM_START: u16 = 0x8000;
    /// Top of the CPU address space.
    pub const CPU_ADDR_END: u16 = 0xFFFF;

    /// NMI vector (`$FFFA/$FFFB`, little-endian).
    pub const NMI_VECTOR_LO: u16 = 0xFFFA;
    pub const NMI_VECTOR_HI: u16 = 0xFFFB;
    /// Reset vector (`$FFFC/$FFFD`, little-endian).
    pub const RESET_VECTOR_LO: u16 = 0xFFFC;
    pub const RESET_VECTOR_HI: u16 = 0xFFFD;
    /// IRQ/BRK vector (`$FFFE/$FFFF`, little-endian).
    pub const IRQ_VECTOR_LO: u16 = 0xFFFE;
    pub const IRQ_VECTOR_HI: u16 = 0xFFFF;
}

/// PPU register layout and VRAM mirror rules.
pub mod ppu {
    /// Mask for decoding register mirrors (`addr & 0x0007`).
    pub const REGISTER_SELECT_MASK: u16 = 0x0007;

    /// Address mask applied after each VRAM access (14-bit bus).
    pub const VRAM_MIRROR_MASK: u16 = 0x3FFF;

    /// Console-internal nametable RAM size (two logical tables).
    pub const CIRAM_SIZE: usize = 0x0800;
    /// Primary OAM size (64 sprites x 4 bytes).
    pub const OAM_RAM_SIZE: usize = 256;

    /// Palette RAM base address (`$3F00`).
    pub const PALETTE_BASE: u16 = 0x3F00;
    /// Palette RAM byte count (32 bytes mirrored every 32 bytes).
    pub const PALETTE_RAM_SIZE: usize = 0x20;

    /// Base address of nametable 0.
    pub const NAMETABLE_BASE: u16 = 0x2000;
    /// Size of a single nametable in bytes.
    pub const NAMETABLE_SIZE: u16 = 0x0400;

    /// Pattern table base address for table 0.
    pub const PATTERN_TABLE_0: u16 = 0x0000;
    /// Pattern table base address for table 1.
    pub const PATTERN_TABLE_1: u16 = 0x1000;
    /// First address past the pattern tables.
    pub const PATTERN_TABLE_END: u16 = 0x1FFF;

    /// CPU-visible PPU register identifiers.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$2000` - PPUCTRL
        Control = 0x2000,
        /// `$2001` - PPUMASK
        Mask = 0x2001,
        /// `$2002` - PPUSTATUS
        Status = 0x2002,
        /// `$2003` - OAMADDR
        OamAddr = 0x2003,
        /// `$2004` - OAMDATA
        OamData = 0x2004,
        /// `$2005` - PPUSCROLL
        Scroll = 0x2005,
        /// `$2006` - PPUADDR
        Addr = 0x2006,
        /// `$2007` - PPUDATA
        Data = 0x2007,
    }

    impl Register {
        /// Raw address backing the register.
        pub const fn addr(self) -> u16 {
            self as u16
        }

        /// Resolves the canonical register for a CPU address in `$2000-$3FFF`.
        pub const fn from_cpu_addr(addr: u16) -> Self {
            match addr & REGISTER_SELECT_MASK {
                0 => Self::Control,
                1 => Self::Mask,
                2 => Self::Status,
                3 => Self::OamAddr,
                4 => Self::OamData,
                5 => Self::Scroll,
                6 => Self::Addr,
                _ => Self::Data,
            }
        }
    }
}
