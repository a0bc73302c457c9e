//! Runs a synthetic cartridge for a few frames and reports frame timing,
//! the CPU trace position, and a histogram of the palette indices the PPU
//! produced. Handy as a smoke test of the whole core without a ROM loader.
//!
//! Usage: `cargo run --example frame_probe [frames]`

use anyhow::Result;
use famicore_core::{
    Nes,
    cartridge::{
        Cartridge,
        header::{Header, Mirroring},
    },
    cpu::opcode_meta,
};

/// Builds a minimal NROM image: an NMI counter in zero page, a visible
/// backdrop color, and a spin loop.
fn probe_cartridge() -> Result<Cartridge> {
    let mut prg = vec![0u8; 16 * 1024];
    let program: &[u8] = &[
        0xA9, 0x3F, 0x8D, 0x06, 0x20, // LDA #$3F / STA $2006
        0xA9, 0x00, 0x8D, 0x06, 0x20, // LDA #$00 / STA $2006
        0xA9, 0x21, 0x8D, 0x07, 0x20, // $3F00 = $21 (light blue backdrop)
        0xA9, 0x08, 0x8D, 0x01, 0x20, // PPUMASK: background on
        0xA9, 0x80, 0x8D, 0x00, 0x20, // PPUCTRL: NMI on
        0x4C, 0x19, 0x80, // JMP $8019
    ];
    prg[..program.len()].copy_from_slice(program);
    // NMI handler: INC $10 / RTI.
    prg[0x0100] = 0xE6;
    prg[0x0101] = 0x10;
    prg[0x0102] = 0x40;
    prg[0x3FFA] = 0x00;
    prg[0x3FFB] = 0x81;
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;

    let header = Header {
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        battery: false,
        trainer: false,
        prg_rom_size: prg.len(),
        chr_rom_size: 0,
    };
    Ok(Cartridge::new(header, prg, vec![])?)
}

fn main() -> Result<()> {
    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(60);

    let mut nes = Nes::power_on(probe_cartridge()?);
    let mut total_cycles: u64 = 0;
    for _ in 0..frames {
        total_cycles += u64::from(nes.frame()?);
    }

    let regs = nes.cpu_snapshot();
    let next_op = opcode_meta(nes.peek(regs.pc));
    println!("After {frames} frame(s): {total_cycles} CPU cycles");
    println!(
        "CPU at {:#06X} (next: {} {:?}), NMIs taken: {}",
        regs.pc,
        next_op.mnemonic,
        next_op.addressing,
        nes.peek(0x0010),
    );

    let mut histogram = [0u32; 64];
    for &index in nes.framebuffer().iter() {
        histogram[(index & 0x3F) as usize] += 1;
    }
    println!("Framebuffer palette indices:");
    for (index, count) in histogram.iter().enumerate().filter(|&(_, &c)| c > 0) {
        println!("  ${index:02X}: {count} pixels");
    }

    Ok(())
}
