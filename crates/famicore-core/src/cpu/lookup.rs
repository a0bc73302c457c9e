use crate::cpu::addressing::Addressing as A;
use crate::cpu::instruction::{Mnemonic as M, Op};

// Short aliases keep the 16x16 table readable.
const IMP: A = A::Implied;
const ACC: A = A::Accumulator;
const IMM: A = A::Immediate;
const REL: A = A::Relative;
const ZP: A = A::ZeroPage;
const ZPX: A = A::ZeroPageX;
const ZPY: A = A::ZeroPageY;
const ABS: A = A::Absolute;
const ABX: A = A::AbsoluteX;
const ABY: A = A::AbsoluteY;
const IND: A = A::Indirect;
const INX: A = A::IndirectX;
const INY: A = A::IndirectY;

macro_rules! op {
    ($mnemonic:ident, $mode:ident) => {
        Op::new(M::$mnemonic, $mode)
    };
}

/// Full opcode dispatch table, fixed at compile time. Rows are the opcode
/// high nibble; every slot is populated, with the JAM slots marking the
/// opcodes that halt the CPU.
#[rustfmt::skip]
pub(crate) static LOOKUP_TABLE: [Op; 256] = [
    // 0x00
    op!(Brk, IMP), op!(Ora, INX), op!(Jam, IMP), op!(Slo, INX), op!(Nop, ZP),  op!(Ora, ZP),  op!(Asl, ZP),  op!(Slo, ZP),
    op!(Php, IMP), op!(Ora, IMM), op!(Asl, ACC), op!(Anc, IMM), op!(Nop, ABS), op!(Ora, ABS), op!(Asl, ABS), op!(Slo, ABS),
    // 0x10
    op!(Bpl, REL), op!(Ora, INY), op!(Jam, IMP), op!(Slo, INY), op!(Nop, ZPX), op!(Ora, ZPX), op!(Asl, ZPX), op!(Slo, ZPX),
    op!(Clc, IMP), op!(Ora, ABY), op!(Nop, IMP), op!(Slo, ABY), op!(Nop, ABX), op!(Ora, ABX), op!(Asl, ABX), op!(Slo, ABX),
    // 0x20
    op!(Jsr, ABS), op!(And, INX), op!(Jam, IMP), op!(Rla, INX), op!(Bit, ZP),  op!(And, ZP),  op!(Rol, ZP),  op!(Rla, ZP),
    op!(Plp, IMP), op!(And, IMM), op!(Rol, ACC), op!(Anc, IMM), op!(Bit, ABS), op!(And, ABS), op!(Rol, ABS), op!(Rla, ABS),
    // 0x30
    op!(Bmi, REL), op!(And, INY), op!(Jam, IMP), op!(Rla, INY), op!(Nop, ZPX), op!(And, ZPX), op!(Rol, ZPX), op!(Rla, ZPX),
    op!(Sec, IMP), op!(And, ABY), op!(Nop, IMP), op!(Rla, ABY), op!(Nop, ABX), op!(And, ABX), op!(Rol, ABX), op!(Rla, ABX),
    // 0x40
    op!(Rti, IMP), op!(Eor, INX), op!(Jam, IMP), op!(Sre, INX), op!(Nop, ZP),  op!(Eor, ZP),  op!(Lsr, ZP),  op!(Sre, ZP),
    op!(Pha, IMP), op!(Eor, IMM), op!(Lsr, ACC), op!(Asr, IMM), op!(Jmp, ABS), op!(Eor, ABS), op!(Lsr, ABS), op!(Sre, ABS),
    // 0x50
    op!(Bvc, REL), op!(Eor, INY), op!(Jam, IMP), op!(Sre, INY), op!(Nop, ZPX), op!(Eor, ZPX), op!(Lsr, ZPX), op!(Sre, ZPX),
    op!(Cli, IMP), op!(Eor, ABY), op!(Nop, IMP), op!(Sre, ABY), op!(Nop, ABX), op!(Eor, ABX), op!(Lsr, ABX), op!(Sre, ABX),
    // 0x60
    op!(Rts, IMP), op!(Adc, INX), op!(Jam, IMP), op!(Rra, INX), op!(Nop, ZP),  op!(Adc, ZP),  op!(Ror, ZP),  op!(Rra, ZP),
    op!(Pla, IMP), op!(Adc, IMM), op!(Ror, ACC), op!(Arr, IMM), op!(Jmp, IND), op!(Adc, ABS), op!(Ror, ABS), op!(Rra, ABS),
    // 0x70
    op!(Bvs, REL), op!(Adc, INY), op!(Jam, IMP), op!(Rra, INY), op!(Nop, ZPX), op!(Adc, ZPX), op!(Ror, ZPX), op!(Rra, ZPX),
    op!(Sei, IMP), op!(Adc, ABY), op!(Nop, IMP), op!(Rra, ABY), op!(Nop, ABX), op!(Adc, ABX), op!(Ror, ABX), op!(Rra, ABX),
    // 0x80
    op!(Nop, IMM), op!(Sta, INX), op!(Nop, IMM), op!(Sax, INX), op!(Sty, ZP),  op!(Sta, ZP),  op!(Stx, ZP),  op!(Sax, ZP),
    op!(Dey, IMP), op!(Nop, IMM), op!(Txa, IMP), op!(Xaa, IMM), op!(Sty, ABS), op!(Sta, ABS), op!(Stx, ABS), op!(Sax, ABS),
    // 0x90
    op!(Bcc, REL), op!(Sta, INY), op!(Jam, IMP), op!(Sha, INY), op!(Sty, ZPX), op!(Sta, ZPX), op!(Stx, ZPY), op!(Sax, ZPY),
    op!(Tya, IMP), op!(Sta, ABY), op!(Txs, IMP), op!(Shs, ABY), op!(Shy, ABX), op!(Sta, ABX), op!(Shx, ABY), op!(Sha, ABY),
    // 0xA0
    op!(Ldy, IMM), op!(Lda, INX), op!(Ldx, IMM), op!(Lax, INX), op!(Ldy, ZP),  op!(Lda, ZP),  op!(Ldx, ZP),  op!(Lax, ZP),
    op!(Tay, IMP), op!(Lda, IMM), op!(Tax, IMP), op!(Lax, IMM), op!(Ldy, ABS), op!(Lda, ABS), op!(Ldx, ABS), op!(Lax, ABS),
    // 0xB0
    op!(Bcs, REL), op!(Lda, INY), op!(Jam, IMP), op!(Lax, INY), op!(Ldy, ZPX), op!(Lda, ZPX), op!(Ldx, ZPY), op!(Lax, ZPY),
    op!(Clv, IMP), op!(Lda, ABY), op!(Tsx, IMP), op!(Las, ABY), op!(Ldy, ABX), op!(Lda, ABX), op!(Ldx, ABY), op!(Lax, ABY),
    // 0xC0
    op!(Cpy, IMM), op!(Cmp, INX), op!(Nop, IMM), op!(Dcp, INX), op!(Cpy, ZP),  op!(Cmp, ZP),  op!(Dec, ZP),  op!(Dcp, ZP),
    op!(Iny, IMP), op!(Cmp, IMM), op!(Dex, IMP), op!(Sbx, IMM), op!(Cpy, ABS), op!(Cmp, ABS), op!(Dec, ABS), op!(Dcp, ABS),
    // 0xD0
    op!(Bne, REL), op!(Cmp, INY), op!(Jam, IMP), op!(Dcp, INY), op!(Nop, ZPX), op!(Cmp, ZPX), op!(Dec, ZPX), op!(Dcp, ZPX),
    op!(Cld, IMP), op!(Cmp, ABY), op!(Nop, IMP), op!(Dcp, ABY), op!(Nop, ABX), op!(Cmp, ABX), op!(Dec, ABX), op!(Dcp, ABX),
    // 0xE0
    op!(Cpx, IMM), op!(Sbc, INX), op!(Nop, IMM), op!(Isc, INX), op!(Cpx, ZP),  op!(Sbc, ZP),  op!(Inc, ZP),  op!(Isc, ZP),
    op!(Inx, IMP), op!(Sbc, IMM), op!(Nop, IMP), op!(Sbc, IMM), op!(Cpx, ABS), op!(Sbc, ABS), op!(Inc, ABS), op!(Isc, ABS),
    // 0xF0
    op!(Beq, REL), op!(Sbc, INY), op!(Jam, IMP), op!(Isc, INY), op!(Nop, ZPX), op!(Sbc, ZPX), op!(Inc, ZPX), op!(Isc, ZPX),
    op!(Sed, IMP), op!(Sbc, ABY), op!(Nop, IMP), op!(Isc, ABY), op!(Nop, ABX), op!(Sbc, ABX), op!(Inc, ABX), op!(Isc, ABX),
];
