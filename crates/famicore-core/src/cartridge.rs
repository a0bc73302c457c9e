//! Cartridge container: decoded header plus the active mapper.
//!
//! The core never parses ROM files. An external loader decodes the iNES /
//! NES 2.0 container, slices out the PRG and CHR payloads, and hands the
//! result to [`Cartridge::new`]; everything past that point is board logic.

use crate::{
    cartridge::{header::Header, mapper::Mapper},
    error::Error,
    reset_kind::ResetKind,
};

pub mod a12_watcher;
pub mod header;
pub mod mapper;

/// An inserted cartridge.
///
/// Owns the mapper, which in turn owns PRG-ROM, CHR-ROM/RAM, and PRG-RAM.
/// The bus holds exactly one `Cartridge`; both the CPU (register writes) and
/// the PPU (pattern fetches, A12 taps) reach the same mapper instance
/// through it.
#[derive(Debug, Clone)]
pub struct Cartridge {
    header: Header,
    mapper: Mapper,
}

impl Cartridge {
    /// Builds a cartridge from loader output. Fails for mapper ids outside
    /// the supported set and for payloads shorter than the header claims.
    pub fn new(header: Header, prg_rom: Vec<u8>, chr_rom: Vec<u8>) -> Result<Self, Error> {
        let mapper = Mapper::for_cartridge(header, prg_rom.into(), chr_rom.into())?;
        Ok(Self { header, mapper })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut Mapper {
        &mut self.mapper
    }

    pub fn reset(&mut self, kind: ResetKind) {
        self.mapper.reset(kind);
    }

    /// Battery-backed work RAM, when the header marks the board as such.
    /// The returned bytes are the persistence format: saved verbatim.
    pub fn save_ram(&self) -> Option<&[u8]> {
        self.header.battery.then(|| self.mapper.prg_ram()).flatten()
    }

    /// Restores previously persisted battery RAM. Extra bytes are ignored;
    /// short input fills only the prefix.
    pub fn restore_save_ram(&mut self, bytes: &[u8]) {
        if !self.header.battery {
            return;
        }
        if let Some(ram) = self.mapper.prg_ram_mut() {
            let len = ram.len().min(bytes.len());
            ram[..len].copy_from_slice(&bytes[..len]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::header::{Mirroring, PRG_BANK_UNIT};

    #[test]
    fn battery_flag_gates_save_ram() {
        let mut header = Header::with_banks(0, 1, 0);
        let cart = Cartridge::new(header, vec![0; PRG_BANK_UNIT], vec![]).unwrap();
        assert!(cart.save_ram().is_none());

        header.battery = true;
        let mut cart = Cartridge::new(header, vec![0; PRG_BANK_UNIT], vec![]).unwrap();
        cart.mapper_mut().cpu_write(0x6000, 0x77, 0);
        assert_eq!(cart.save_ram().unwrap()[0], 0x77);
    }

    #[test]
    fn restore_fills_work_ram_prefix() {
        let mut header = Header::with_banks(0, 1, 0);
        header.battery = true;
        let mut cart = Cartridge::new(header, vec![0; PRG_BANK_UNIT], vec![]).unwrap();

        cart.restore_save_ram(&[1, 2, 3]);
        assert_eq!(cart.mapper().cpu_read(0x6000), 1);
        assert_eq!(cart.mapper().cpu_read(0x6002), 3);
        assert_eq!(cart.mapper().cpu_read(0x6003), 0);
    }

    #[test]
    fn header_mirroring_is_visible_through_mapper() {
        let mut header = Header::with_banks(0, 1, 0);
        header.mirroring = Mirroring::Vertical;
        let cart = Cartridge::new(header, vec![0; PRG_BANK_UNIT], vec![]).unwrap();
        assert_eq!(cart.mapper().mirroring(), Mirroring::Vertical);
    }
}
