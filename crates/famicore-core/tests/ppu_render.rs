//! Frame rendering scenarios: sprite-0 hit, layer composition, clipping.

mod common;

use anyhow::Result;
use common::{nrom, nrom_with_chr, prg_16k, run_to_pc};
use famicore_core::Nes;

/// CHR image whose tile 1 is fully opaque (both planes all ones, pattern
/// value 3); tile 0 stays transparent.
fn chr_with_solid_tile() -> Vec<u8> {
    let mut chr = vec![0u8; 8 * 1024];
    chr[16..32].fill(0xFF);
    chr
}

/// Program that paints one background tile at (1,1) and at (0,0), loads a
/// palette, places an opaque sprite 0 at (10,10), resets the scroll, and
/// enables both layers with left-edge clipping active (PPUMASK = $18).
fn sprite0_program() -> Vec<u8> {
    prg_16k(&[
        0xA9, 0x20, 0x8D, 0x06, 0x20, // LDA #$20 / STA $2006
        0xA9, 0x21, 0x8D, 0x06, 0x20, // LDA #$21 / STA $2006
        0xA9, 0x01, 0x8D, 0x07, 0x20, // nametable $2021 = tile 1
        0xA9, 0x20, 0x8D, 0x06, 0x20, //
        0xA9, 0x00, 0x8D, 0x06, 0x20, //
        0xA9, 0x01, 0x8D, 0x07, 0x20, // nametable $2000 = tile 1
        0xA9, 0x3F, 0x8D, 0x06, 0x20, //
        0xA9, 0x00, 0x8D, 0x06, 0x20, //
        0xA9, 0x0F, 0x8D, 0x07, 0x20, // $3F00 = $0F (backdrop)
        0xA9, 0x01, 0x8D, 0x07, 0x20, // $3F01 = $01
        0xA9, 0x02, 0x8D, 0x07, 0x20, // $3F02 = $02
        0xA9, 0x03, 0x8D, 0x07, 0x20, // $3F03 = $03
        0xA9, 0x3F, 0x8D, 0x06, 0x20, //
        0xA9, 0x13, 0x8D, 0x06, 0x20, //
        0xA9, 0x16, 0x8D, 0x07, 0x20, // $3F13 = $16 (sprite color)
        0xA9, 0x00, 0x8D, 0x03, 0x20, // OAMADDR = 0
        0xA9, 0x09, 0x8D, 0x04, 0x20, // sprite 0 Y = 9 (screen row 10)
        0xA9, 0x01, 0x8D, 0x04, 0x20, // tile 1
        0xA9, 0x00, 0x8D, 0x04, 0x20, // attributes: front, no flip
        0xA9, 0x0A, 0x8D, 0x04, 0x20, // X = 10
        0xA9, 0x20, 0x8D, 0x06, 0x20, //
        0xA9, 0x00, 0x8D, 0x06, 0x20, // scroll reset: v = t = $2000
        0xA9, 0x18, 0x8D, 0x01, 0x20, // PPUMASK: BG + sprites, clip left
        0x4C, 0x73, 0x80, // JMP $8073
    ])
}

#[test]
fn sprite0_hit_sets_and_prerender_clears() {
    let mut nes = Nes::power_on(nrom_with_chr(sprite0_program(), chr_with_solid_tile()));

    // Two frames: setup lands mid-frame 0, frame 1 renders steady state.
    nes.frame().expect("frame 0");
    nes.frame().expect("frame 1");
    assert_ne!(nes.peek(0x2002) & 0x40, 0, "sprite-0 hit flag");

    // The next instruction steps the PPU across the prerender clear.
    nes.step().expect("step into prerender");
    assert_eq!(nes.peek(0x2002) & 0x40, 0, "flag clears at prerender");
}

#[test]
fn frame_composition_layers_and_clipping() {
    let mut nes = Nes::power_on(nrom_with_chr(sprite0_program(), chr_with_solid_tile()));

    nes.frame().expect("frame 0");
    nes.frame().expect("frame 1");
    let fb = nes.framebuffer();
    let pixel = |x: usize, y: usize| fb[y * 256 + x];

    // Sprite 0 draws in front of the background tile.
    assert_eq!(pixel(10, 10), 0x16);
    // Background-only pixel of the tile at (1,1).
    assert_eq!(pixel(8, 10), 0x03);
    // The tile at (0,0) lies entirely inside the clipped left column.
    assert_eq!(pixel(0, 0), 0x0F);
    assert_eq!(pixel(7, 7), 0x0F);
    // Far away from both layers: backdrop.
    assert_eq!(pixel(100, 100), 0x0F);
}

#[test]
fn behind_priority_sprite_yields_to_opaque_background() {
    // Same scene, but sprite 0 carries the behind-background priority bit.
    let mut program = sprite0_program();
    // Patch the attribute byte load (the LDA before the third $2004 write).
    let attr_load = 0x5A; // offset of LDA #$00 for attributes
    assert_eq!(program[attr_load], 0xA9);
    program[attr_load + 1] = 0x20;

    let mut nes = Nes::power_on(nrom_with_chr(program, chr_with_solid_tile()));
    nes.frame().expect("frame 0");
    nes.frame().expect("frame 1");
    let fb = nes.framebuffer();

    // Over the opaque tile the background wins...
    assert_eq!(fb[10 * 256 + 10], 0x03);
    // ...but past the tile's right edge (x >= 16) the sprite shows.
    assert_eq!(fb[10 * 256 + 16], 0x16);
    // Sprite-0 hit still occurs; priority does not affect it.
    assert_ne!(nes.peek(0x2002) & 0x40, 0);
}

#[test]
fn chr_ram_round_trips_through_ppudata() -> Result<()> {
    // Write a byte into CHR-RAM via $2007 and read it back through the
    // buffered read path.
    //
    //   8000: LDA #$00 / STA $2006 / STA $2006   ; v = $0000
    //   8008: LDA #$5A / STA $2007
    //   800D: LDA #$00 / STA $2006 / STA $2006   ; v = $0000
    //   8015: LDA $2007                          ; prime the buffer
    //   8018: LDA $2007                          ; actual value
    //   801B: STA $00
    //   801D: JMP $801D
    let prg = prg_16k(&[
        0xA9, 0x00, 0x8D, 0x06, 0x20, 0x8D, 0x06, 0x20, 0xA9, 0x5A, 0x8D, 0x07, 0x20, 0xA9, 0x00,
        0x8D, 0x06, 0x20, 0x8D, 0x06, 0x20, 0xAD, 0x07, 0x20, 0xAD, 0x07, 0x20, 0x85, 0x00, 0x4C,
        0x1D, 0x80,
    ]);
    let mut nes = Nes::power_on(nrom(prg));

    run_to_pc(&mut nes, 0x801D)?;
    assert_eq!(nes.peek(0x0000), 0x5A);
    Ok(())
}
