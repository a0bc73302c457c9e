#![allow(dead_code)]

use anyhow::{Result, ensure};
use ctor::ctor;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use famicore_core::{
    Nes,
    cartridge::{
        Cartridge,
        header::{Header, Mirroring, PRG_BANK_UNIT},
    },
};

#[ctor]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Builds a 16 KiB PRG image with `program` at `$8000` and the reset vector
/// pointing there. Callers may patch in more code or vectors afterwards.
pub fn prg_16k(program: &[u8]) -> Vec<u8> {
    let mut prg = vec![0u8; PRG_BANK_UNIT];
    prg[..program.len()].copy_from_slice(program);
    // $FFFC/$FFFD fold onto the mirrored bank's last bytes.
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;
    prg
}

/// Points the NMI vector of a 16 KiB PRG image at `addr`.
pub fn set_nmi_vector(prg: &mut [u8], addr: u16) {
    prg[0x3FFA] = addr as u8;
    prg[0x3FFB] = (addr >> 8) as u8;
}

/// Points the IRQ/BRK vector of a 16 KiB PRG image at `addr`.
pub fn set_irq_vector(prg: &mut [u8], addr: u16) {
    prg[0x3FFE] = addr as u8;
    prg[0x3FFF] = (addr >> 8) as u8;
}

/// NROM cartridge with CHR-RAM around the given PRG image.
pub fn nrom(prg: Vec<u8>) -> Cartridge {
    let header = Header {
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        battery: false,
        trainer: false,
        prg_rom_size: prg.len(),
        chr_rom_size: 0,
    };
    Cartridge::new(header, prg, vec![]).expect("valid NROM cartridge")
}

/// MMC1 cartridge (CHR-RAM) around the given PRG image.
pub fn mmc1(prg: Vec<u8>) -> Cartridge {
    let header = Header {
        mapper: 1,
        mirroring: Mirroring::Horizontal,
        battery: false,
        trainer: false,
        prg_rom_size: prg.len(),
        chr_rom_size: 0,
    };
    Cartridge::new(header, prg, vec![]).expect("valid MMC1 cartridge")
}

/// MMC3 cartridge (CHR-RAM) around the given PRG image.
pub fn mmc3(prg: Vec<u8>) -> Cartridge {
    let header = Header {
        mapper: 4,
        mirroring: Mirroring::Horizontal,
        battery: false,
        trainer: false,
        prg_rom_size: prg.len(),
        chr_rom_size: 0,
    };
    Cartridge::new(header, prg, vec![]).expect("valid MMC3 cartridge")
}

/// NROM cartridge with an explicit 8 KiB CHR-ROM.
pub fn nrom_with_chr(prg: Vec<u8>, chr: Vec<u8>) -> Cartridge {
    let header = Header {
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        battery: false,
        trainer: false,
        prg_rom_size: prg.len(),
        chr_rom_size: chr.len(),
    };
    Cartridge::new(header, prg, chr).expect("valid NROM cartridge")
}

/// Steps until the PPU reaches (or passes) the given scanline within the
/// current frame. Fails if a frame boundary arrives first.
pub fn run_to_scanline(nes: &mut Nes, scanline: i16) -> Result<()> {
    loop {
        let step = nes.step()?;
        ensure!(
            !step.frame_complete,
            "frame ended before scanline {scanline}"
        );
        if nes.ppu().scanline() >= scanline {
            return Ok(());
        }
    }
}

/// Steps until the CPU parks on the given address (a spin loop in the test
/// program), with a step budget so broken programs fail instead of hanging.
pub fn run_to_pc(nes: &mut Nes, pc: u16) -> Result<()> {
    for _ in 0..2_000_000 {
        if nes.cpu_snapshot().pc == pc {
            return Ok(());
        }
        nes.step()?;
    }
    anyhow::bail!("program never reached {pc:#06X}")
}
