use std::fmt;

/// Fatal failures surfaced by the emulator core.
///
/// Everything here is terminal for the current run: cartridge problems are
/// refused at power-on, and a jammed CPU stops the driver loop. Soft
/// anomalies (unmapped reads, writes to CHR-ROM, reads of write-only
/// registers) are not errors and never reach this type.
#[derive(Debug)]
pub enum Error {
    /// Cartridge requests a mapper outside the supported set {0, 1, 2, 4}.
    UnsupportedMapper { id: u16 },
    /// PRG-ROM payload is shorter than the header advertises.
    TruncatedPrgRom { expected: usize, actual: usize },
    /// CHR-ROM payload is shorter than the header advertises.
    TruncatedChrRom { expected: usize, actual: usize },
    /// The CPU fetched one of the KIL/JAM opcodes and halted.
    CpuJam { opcode: u8, pc: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMapper { id } => write!(f, "unsupported mapper id {id}"),
            Self::TruncatedPrgRom { expected, actual } => {
                write!(f, "PRG ROM expected {expected} bytes, got {actual}")
            }
            Self::TruncatedChrRom { expected, actual } => {
                write!(f, "CHR ROM expected {expected} bytes, got {actual}")
            }
            Self::CpuJam { opcode, pc } => {
                write!(f, "CPU jammed on opcode {opcode:#04X} at {pc:#06X}")
            }
        }
    }
}

impl std::error::Error for Error {}
