//! MOS 6502 CPU core (the console variant: no decimal arithmetic).
//!
//! The core executes one whole instruction per [`Cpu::step`] and reports
//! its cycle cost from a fixed per-opcode table plus the page-cross and
//! branch penalties observed during execution. Dispatch fans out over a
//! static 256-entry lookup table; there is no runtime polymorphism
//! anywhere in the hot path.
//!
//! Interrupts are entered between instructions by the driver calling
//! [`Cpu::nmi`] / [`Cpu::irq`]; the core itself never samples interrupt
//! lines mid-instruction.

pub mod addressing;
mod cycle;
mod instruction;
mod lookup;
mod status;

use crate::{
    bus::Bus,
    cpu::{
        addressing::Addressing,
        cycle::CYCLE_TABLE,
        instruction::{Mnemonic, Op},
        lookup::LOOKUP_TABLE,
        status::Status,
    },
    error::Error,
    memory::cpu as cpu_mem,
};

/// Cycles consumed by an NMI or IRQ entry sequence.
const INTERRUPT_CYCLES: u32 = 7;

/// Opcode metadata for disassembly and trace output.
#[derive(Debug, Clone)]
pub struct OpcodeMeta {
    pub mnemonic: String,
    pub addressing: Addressing,
    /// Instruction length in bytes, opcode included.
    pub len: u16,
}

/// Describes a raw opcode byte without executing it.
pub fn opcode_meta(opcode: u8) -> OpcodeMeta {
    let Op { mnemonic, mode } = LOOKUP_TABLE[opcode as usize];
    OpcodeMeta {
        mnemonic: format!("{mnemonic:?}").to_uppercase(),
        addressing: mode,
        len: 1 + mode.operand_len(),
    }
}

/// Read-only register view for tracing and debuggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpuSnapshot {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub p: u8,
}

pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    /// Stack pointer; the stack itself lives in page 1 and `s` wraps mod 256.
    s: u8,
    p: Status,
    pc: u16,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            p: Status::after_reset(),
            pc: 0,
        }
    }

    /// Reset sequence: registers cleared, SP to `$FD`, interrupts disabled,
    /// PC loaded from the reset vector.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = 0xFD;
        self.p = Status::after_reset();
        self.pc = u16::from_le_bytes([
            bus.peek(cpu_mem::RESET_VECTOR_LO),
            bus.peek(cpu_mem::RESET_VECTOR_HI),
        ]);
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.pc,
            a: self.a,
            x: self.x,
            y: self.y,
            s: self.s,
            p: self.p.bits(),
        }
    }

    /// True while the I flag suppresses maskable interrupts.
    pub fn interrupt_disabled(&self) -> bool {
        self.p.interrupt_disabled()
    }

    /// Non-maskable interrupt entry. The status copy pushed for hardware
    /// interrupts carries B clear.
    pub fn nmi<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.enter_interrupt(bus, cpu_mem::NMI_VECTOR_LO);
        INTERRUPT_CYCLES
    }

    /// Maskable interrupt entry. The caller is responsible for honouring
    /// the I flag before dispatching.
    pub fn irq<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.enter_interrupt(bus, cpu_mem::IRQ_VECTOR_LO);
        INTERRUPT_CYCLES
    }

    fn enter_interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);
        let pushed = (self.p - Status::BREAK) | Status::UNUSED;
        self.push(bus, pushed.bits());
        self.p.insert(Status::INTERRUPT);
        self.pc = bus.read_word(vector);
    }

    /// Executes one instruction and returns its cycle cost.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Error> {
        let opcode_pc = self.pc;
        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);

        let Op { mnemonic, mode } = LOOKUP_TABLE[opcode as usize];

        let mut page_crossed = false;
        let mut branch_extra = 0u32;

        match mnemonic {
            // Loads -------------------------------------------------------
            Mnemonic::Lda => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a = value;
                self.p.set_zn(value);
            }
            Mnemonic::Ldx => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.x = value;
                self.p.set_zn(value);
            }
            Mnemonic::Ldy => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.y = value;
                self.p.set_zn(value);
            }
            Mnemonic::Lax => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a = value;
                self.x = value;
                self.p.set_zn(value);
            }

            // Stores ------------------------------------------------------
            Mnemonic::Sta => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.a);
            }
            Mnemonic::Stx => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.x);
            }
            Mnemonic::Sty => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.y);
            }
            Mnemonic::Sax => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.a & self.x);
            }

            // Transfers ---------------------------------------------------
            Mnemonic::Tax => {
                self.x = self.a;
                self.p.set_zn(self.x);
            }
            Mnemonic::Tay => {
                self.y = self.a;
                self.p.set_zn(self.y);
            }
            Mnemonic::Tsx => {
                self.x = self.s;
                self.p.set_zn(self.x);
            }
            Mnemonic::Txa => {
                self.a = self.x;
                self.p.set_zn(self.a);
            }
            Mnemonic::Txs => self.s = self.x,
            Mnemonic::Tya => {
                self.a = self.y;
                self.p.set_zn(self.a);
            }

            // Stack -------------------------------------------------------
            Mnemonic::Pha => self.push(bus, self.a),
            Mnemonic::Php => {
                // Software pushes always carry B and the unused bit set.
                let pushed = self.p | Status::BREAK | Status::UNUSED;
                self.push(bus, pushed.bits());
            }
            Mnemonic::Pla => {
                self.a = self.pull(bus);
                self.p.set_zn(self.a);
            }
            Mnemonic::Plp => {
                let value = self.pull(bus);
                self.p = Status::restore_from_stack(value);
            }

            // Shifts and rotates -----------------------------------------
            Mnemonic::Asl => self.shift_op(bus, mode, Self::asl),
            Mnemonic::Lsr => self.shift_op(bus, mode, Self::lsr),
            Mnemonic::Rol => self.shift_op(bus, mode, Self::rol),
            Mnemonic::Ror => self.shift_op(bus, mode, Self::ror),

            // Logic -------------------------------------------------------
            Mnemonic::And => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a &= value;
                self.p.set_zn(self.a);
            }
            Mnemonic::Ora => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a |= value;
                self.p.set_zn(self.a);
            }
            Mnemonic::Eor => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a ^= value;
                self.p.set_zn(self.a);
            }
            Mnemonic::Bit => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.p.set(Status::ZERO, self.a & value == 0);
                self.p.set(Status::NEGATIVE, value & 0x80 != 0);
                self.p.set(Status::OVERFLOW, value & 0x40 != 0);
            }

            // Arithmetic --------------------------------------------------
            Mnemonic::Adc => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.adc(value);
            }
            Mnemonic::Sbc => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.adc(value ^ 0xFF);
            }
            Mnemonic::Cmp => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.compare(self.a, value);
            }
            Mnemonic::Cpx => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.compare(self.x, value);
            }
            Mnemonic::Cpy => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.compare(self.y, value);
            }

            // Increments and decrements ----------------------------------
            Mnemonic::Inc => {
                self.rmw(bus, mode, |cpu, value| {
                    let result = value.wrapping_add(1);
                    cpu.p.set_zn(result);
                    result
                });
            }
            Mnemonic::Dec => {
                self.rmw(bus, mode, |cpu, value| {
                    let result = value.wrapping_sub(1);
                    cpu.p.set_zn(result);
                    result
                });
            }
            Mnemonic::Inx => {
                self.x = self.x.wrapping_add(1);
                self.p.set_zn(self.x);
            }
            Mnemonic::Iny => {
                self.y = self.y.wrapping_add(1);
                self.p.set_zn(self.y);
            }
            Mnemonic::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.p.set_zn(self.x);
            }
            Mnemonic::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.p.set_zn(self.y);
            }

            // Control flow ------------------------------------------------
            Mnemonic::Jmp => {
                let (addr, _) = self.operand_addr(bus, mode);
                self.pc = addr;
            }
            Mnemonic::Jsr => {
                let target = bus.read_word(self.pc);
                // Return address pushed is the address of the last operand
                // byte; RTS adds one on the way back.
                let ret = self.pc.wrapping_add(1);
                self.push(bus, (ret >> 8) as u8);
                self.push(bus, ret as u8);
                self.pc = target;
            }
            Mnemonic::Rts => {
                let lo = self.pull(bus);
                let hi = self.pull(bus);
                self.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
            }
            Mnemonic::Rti => {
                let flags = self.pull(bus);
                self.p = Status::restore_from_stack(flags);
                let lo = self.pull(bus);
                let hi = self.pull(bus);
                self.pc = u16::from_le_bytes([lo, hi]);
            }
            Mnemonic::Brk => {
                // BRK skips a signature byte before pushing state.
                self.pc = self.pc.wrapping_add(1);
                self.push(bus, (self.pc >> 8) as u8);
                self.push(bus, self.pc as u8);
                let pushed = self.p | Status::BREAK | Status::UNUSED;
                self.push(bus, pushed.bits());
                self.p.insert(Status::INTERRUPT);
                self.pc = bus.read_word(cpu_mem::IRQ_VECTOR_LO);
            }

            // Branches ----------------------------------------------------
            Mnemonic::Bcc => branch_extra = self.branch(bus, !self.p.contains(Status::CARRY)),
            Mnemonic::Bcs => branch_extra = self.branch(bus, self.p.contains(Status::CARRY)),
            Mnemonic::Bne => branch_extra = self.branch(bus, !self.p.contains(Status::ZERO)),
            Mnemonic::Beq => branch_extra = self.branch(bus, self.p.contains(Status::ZERO)),
            Mnemonic::Bpl => branch_extra = self.branch(bus, !self.p.contains(Status::NEGATIVE)),
            Mnemonic::Bmi => branch_extra = self.branch(bus, self.p.contains(Status::NEGATIVE)),
            Mnemonic::Bvc => branch_extra = self.branch(bus, !self.p.contains(Status::OVERFLOW)),
            Mnemonic::Bvs => branch_extra = self.branch(bus, self.p.contains(Status::OVERFLOW)),

            // Flag manipulation ------------------------------------------
            Mnemonic::Clc => self.p.remove(Status::CARRY),
            Mnemonic::Sec => self.p.insert(Status::CARRY),
            Mnemonic::Cli => self.p.remove(Status::INTERRUPT),
            Mnemonic::Sei => self.p.insert(Status::INTERRUPT),
            Mnemonic::Clv => self.p.remove(Status::OVERFLOW),
            Mnemonic::Cld => self.p.remove(Status::DECIMAL),
            Mnemonic::Sed => self.p.insert(Status::DECIMAL),

            // No-ops, official and otherwise -----------------------------
            Mnemonic::Nop => {
                if mode != Addressing::Implied {
                    // Unofficial NOPs still perform their operand read.
                    self.read_operand(bus, mode, &mut page_crossed);
                }
            }

            // Undocumented read-modify-write combos ----------------------
            Mnemonic::Slo => {
                let result = self.rmw(bus, mode, Self::asl);
                self.a |= result;
                self.p.set_zn(self.a);
            }
            Mnemonic::Rla => {
                let result = self.rmw(bus, mode, Self::rol);
                self.a &= result;
                self.p.set_zn(self.a);
            }
            Mnemonic::Sre => {
                let result = self.rmw(bus, mode, Self::lsr);
                self.a ^= result;
                self.p.set_zn(self.a);
            }
            Mnemonic::Rra => {
                let result = self.rmw(bus, mode, Self::ror);
                self.adc(result);
            }
            Mnemonic::Dcp => {
                let result = self.rmw(bus, mode, |_, value| value.wrapping_sub(1));
                self.compare(self.a, result);
            }
            Mnemonic::Isc => {
                let result = self.rmw(bus, mode, |_, value| value.wrapping_add(1));
                self.adc(result ^ 0xFF);
            }

            // Undocumented immediate ALU ops -----------------------------
            Mnemonic::Anc => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a &= value;
                self.p.set_zn(self.a);
                self.p.set_carry(self.a & 0x80 != 0);
            }
            Mnemonic::Asr => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a &= value;
                self.a = self.lsr(self.a);
            }
            Mnemonic::Arr => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                let carry_in = u8::from(self.p.carry()) << 7;
                let result = ((self.a & value) >> 1) | carry_in;
                self.a = result;
                self.p.set_zn(result);
                self.p.set_carry(result & 0x40 != 0);
                self.p.set(
                    Status::OVERFLOW,
                    ((result >> 6) ^ (result >> 5)) & 1 != 0,
                );
            }
            Mnemonic::Sbx => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                let base = self.a & self.x;
                self.p.set_carry(base >= value);
                self.x = base.wrapping_sub(value);
                self.p.set_zn(self.x);
            }
            Mnemonic::Xaa => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                self.a = (self.a | 0xEE) & self.x & value;
                self.p.set_zn(self.a);
            }

            // Undocumented loads/stores with the high-byte quirk ---------
            Mnemonic::Las => {
                let value = self.read_operand(bus, mode, &mut page_crossed);
                let result = value & self.s;
                self.a = result;
                self.x = result;
                self.s = result;
                self.p.set_zn(result);
            }
            Mnemonic::Sha => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.a & self.x & ((addr >> 8) as u8).wrapping_add(1));
            }
            Mnemonic::Shx => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.x & ((addr >> 8) as u8).wrapping_add(1));
            }
            Mnemonic::Shy => {
                let (addr, _) = self.operand_addr(bus, mode);
                bus.write(addr, self.y & ((addr >> 8) as u8).wrapping_add(1));
            }
            Mnemonic::Shs => {
                let (addr, _) = self.operand_addr(bus, mode);
                self.s = self.a & self.x;
                bus.write(addr, self.s & ((addr >> 8) as u8).wrapping_add(1));
            }

            // Halt --------------------------------------------------------
            Mnemonic::Jam => {
                tracing::debug!(opcode, pc = opcode_pc, "CPU jammed");
                return Err(Error::CpuJam {
                    opcode,
                    pc: opcode_pc,
                });
            }
        }

        Ok(CYCLE_TABLE[opcode as usize].total(page_crossed, branch_extra))
    }

    // =====================================================================
    // Operand resolution
    // =====================================================================

    /// Resolves the effective address for a memory-operand mode, advancing
    /// PC past the operand bytes. The second value reports whether an
    /// indexed mode crossed a page boundary.
    fn operand_addr<B: Bus>(&mut self, bus: &mut B, mode: Addressing) -> (u16, bool) {
        match mode {
            Addressing::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (addr, false)
            }
            Addressing::ZeroPage => (u16::from(self.fetch(bus)), false),
            Addressing::ZeroPageX => {
                let base = self.fetch(bus);
                (u16::from(base.wrapping_add(self.x)), false)
            }
            Addressing::ZeroPageY => {
                let base = self.fetch(bus);
                (u16::from(base.wrapping_add(self.y)), false)
            }
            Addressing::Absolute => (self.fetch_word(bus), false),
            Addressing::AbsoluteX => {
                let base = self.fetch_word(bus);
                let addr = base.wrapping_add(u16::from(self.x));
                (addr, page_differs(base, addr))
            }
            Addressing::AbsoluteY => {
                let base = self.fetch_word(bus);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, page_differs(base, addr))
            }
            Addressing::Indirect => {
                // JMP ($xxFF) wraps within the pointer's page instead of
                // carrying into the next one.
                let ptr = self.fetch_word(bus);
                let lo = bus.read(ptr);
                let hi_addr = (ptr & 0xFF00) | u16::from((ptr as u8).wrapping_add(1));
                let hi = bus.read(hi_addr);
                (u16::from_le_bytes([lo, hi]), false)
            }
            Addressing::IndirectX => {
                let zp = self.fetch(bus).wrapping_add(self.x);
                let lo = bus.read(u16::from(zp));
                let hi = bus.read(u16::from(zp.wrapping_add(1)));
                (u16::from_le_bytes([lo, hi]), false)
            }
            Addressing::IndirectY => {
                let zp = self.fetch(bus);
                let lo = bus.read(u16::from(zp));
                let hi = bus.read(u16::from(zp.wrapping_add(1)));
                let base = u16::from_le_bytes([lo, hi]);
                let addr = base.wrapping_add(u16::from(self.y));
                (addr, page_differs(base, addr))
            }
            Addressing::Implied | Addressing::Accumulator | Addressing::Relative => {
                unreachable!("mode {mode:?} carries no memory operand")
            }
        }
    }

    /// Reads the operand value, accumulating the page-cross penalty.
    fn read_operand<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: Addressing,
        page_crossed: &mut bool,
    ) -> u8 {
        let (addr, crossed) = self.operand_addr(bus, mode);
        *page_crossed |= crossed;
        bus.read(addr)
    }

    #[inline]
    fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    #[inline]
    fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    // =====================================================================
    // Shared operation bodies
    // =====================================================================

    /// Binary-mode add with carry; SBC feeds the one's complement through
    /// the same adder. The decimal flag is deliberately ignored.
    fn adc(&mut self, operand: u8) {
        let sum = u16::from(self.a) + u16::from(operand) + u16::from(self.p.carry());
        let result = sum as u8;
        self.p.set_carry(sum > 0xFF);
        self.p.set(
            Status::OVERFLOW,
            (!(self.a ^ operand) & (self.a ^ result)) & 0x80 != 0,
        );
        self.a = result;
        self.p.set_zn(result);
    }

    fn compare(&mut self, register: u8, operand: u8) {
        self.p.set_carry(register >= operand);
        self.p.set_zn(register.wrapping_sub(operand));
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.p.set_carry(value & 0x80 != 0);
        let result = value << 1;
        self.p.set_zn(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.p.set_carry(value & 0x01 != 0);
        let result = value >> 1;
        self.p.set_zn(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.p.carry());
        self.p.set_carry(value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.p.set_zn(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.p.carry()) << 7;
        self.p.set_carry(value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.p.set_zn(result);
        result
    }

    /// Applies a shift/rotate either to the accumulator or as a
    /// read-modify-write on memory, depending on the addressing mode.
    fn shift_op<B: Bus>(&mut self, bus: &mut B, mode: Addressing, op: fn(&mut Self, u8) -> u8) {
        if mode == Addressing::Accumulator {
            self.a = op(self, self.a);
        } else {
            self.rmw(bus, mode, op);
        }
    }

    /// Read-modify-write: like the hardware, the unmodified value is
    /// written back before the result. Serial-protocol mappers depend on
    /// seeing that double write.
    fn rmw<B: Bus>(&mut self, bus: &mut B, mode: Addressing, op: fn(&mut Self, u8) -> u8) -> u8 {
        let (addr, _) = self.operand_addr(bus, mode);
        let value = bus.read(addr);
        bus.write(addr, value);
        let result = op(self, value);
        bus.write(addr, result);
        result
    }

    /// Takes (or skips) a branch. Returns the extra cycles: one for a taken
    /// branch, two when the target is on a different page. The displacement
    /// is relative to the byte after the operand.
    fn branch<B: Bus>(&mut self, bus: &mut B, condition: bool) -> u32 {
        let displacement = self.fetch(bus) as i8;
        if !condition {
            return 0;
        }
        let target = self.pc.wrapping_add_signed(i16::from(displacement));
        let extra = 1 + u32::from(page_differs(self.pc, target));
        self.pc = target;
        extra
    }

    // =====================================================================
    // Stack
    // =====================================================================

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write(cpu_mem::STACK_PAGE_START | u16::from(self.s), value);
        self.s = self.s.wrapping_sub(1);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.s = self.s.wrapping_add(1);
        bus.read(cpu_mem::STACK_PAGE_START | u16::from(self.s))
    }
}

#[inline]
fn page_differs(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
