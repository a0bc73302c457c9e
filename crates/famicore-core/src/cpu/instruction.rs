use crate::cpu::addressing::Addressing;

/// Every mnemonic the dispatch table can name, documented and undocumented.
///
/// The undocumented entries carry the semantics licensed-era software
/// actually relies on; the twelve JAM slots are the only opcodes that halt
/// the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Mnemonic {
    // Loads and stores
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    // Transfers
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Shifts and rotates
    Asl,
    Lsr,
    Rol,
    Ror,
    // Logic
    And,
    Bit,
    Eor,
    Ora,
    // Arithmetic and compares
    Adc,
    Sbc,
    Cmp,
    Cpx,
    Cpy,
    // Increments and decrements
    Dec,
    Dex,
    Dey,
    Inc,
    Inx,
    Iny,
    // Control flow
    Brk,
    Jmp,
    Jsr,
    Rti,
    Rts,
    // Branches
    Bcc,
    Bcs,
    Beq,
    Bmi,
    Bne,
    Bpl,
    Bvc,
    Bvs,
    // Flag manipulation
    Clc,
    Cld,
    Cli,
    Clv,
    Sec,
    Sed,
    Sei,
    // Official and unofficial no-ops
    Nop,
    // Undocumented read-modify-write combos
    Slo,
    Rla,
    Sre,
    Rra,
    Dcp,
    Isc,
    // Undocumented loads/stores
    Lax,
    Sax,
    Las,
    Sha,
    Shx,
    Shy,
    Shs,
    // Undocumented immediate ALU ops
    Anc,
    Asr,
    Arr,
    Sbx,
    Xaa,
    // Halt
    Jam,
}

/// One dispatch table entry: what to do and how to fetch the operand.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Op {
    pub(crate) mnemonic: Mnemonic,
    pub(crate) mode: Addressing,
}

impl Op {
    pub(crate) const fn new(mnemonic: Mnemonic, mode: Addressing) -> Self {
        Self { mnemonic, mode }
    }
}
