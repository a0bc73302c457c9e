use bitflags::bitflags;

bitflags! {
    /// The 6502 processor status register (`P`).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N V _ B D I Z C
    /// ```
    /// Bit 5 has no storage on the real chip and always reads back as 1;
    /// bit 4 (`B`) only exists in the copies pushed to the stack. The
    /// decimal flag is stored but has no effect on arithmetic here, matching
    /// the console's CPU.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct Status: u8 {
        /// Carry (C): carry out of bit 7, or no borrow on subtraction.
        const CARRY     = 0b0000_0001;
        /// Zero (Z): last result was zero.
        const ZERO      = 0b0000_0010;
        /// Interrupt disable (I): maskable interrupts suppressed while set.
        const INTERRUPT = 0b0000_0100;
        /// Decimal (D): stored for compatibility, ignored by ADC/SBC.
        const DECIMAL   = 0b0000_1000;
        /// Break (B): only meaningful in stack copies of the register.
        const BREAK     = 0b0001_0000;
        /// Unused bit 5, always set when the register is observed.
        const UNUSED    = 0b0010_0000;
        /// Overflow (V): signed arithmetic overflow.
        const OVERFLOW  = 0b0100_0000;
        /// Negative (N): bit 7 of the last result.
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Status {
    /// State after a reset: interrupts disabled, unused bit set.
    pub(crate) fn after_reset() -> Self {
        Status::INTERRUPT | Status::UNUSED
    }

    /// Updates Z and N from a result byte.
    #[inline]
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    #[inline]
    pub(crate) fn set_carry(&mut self, value: bool) {
        self.set(Status::CARRY, value);
    }

    #[inline]
    pub(crate) fn carry(&self) -> bool {
        self.contains(Status::CARRY)
    }

    #[inline]
    pub(crate) fn interrupt_disabled(&self) -> bool {
        self.contains(Status::INTERRUPT)
    }

    /// Restores the register from a byte pulled off the stack: the stack
    /// copy's B bit is discarded and the unused bit reads as 1.
    #[inline]
    pub(crate) fn restore_from_stack(value: u8) -> Self {
        let mut status = Status::from_bits_truncate(value);
        status.remove(Status::BREAK);
        status.insert(Status::UNUSED);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zn_updates_track_the_result() {
        let mut p = Status::empty();
        p.set_zn(0);
        assert!(p.contains(Status::ZERO));
        assert!(!p.contains(Status::NEGATIVE));

        p.set_zn(0x80);
        assert!(!p.contains(Status::ZERO));
        assert!(p.contains(Status::NEGATIVE));
    }

    #[test]
    fn stack_restore_ignores_break_and_forces_unused() {
        let p = Status::restore_from_stack(0xFF);
        assert!(!p.contains(Status::BREAK));
        assert!(p.contains(Status::UNUSED));
        assert!(p.contains(Status::NEGATIVE));

        let p = Status::restore_from_stack(0x00);
        assert!(p.contains(Status::UNUSED));
    }
}
