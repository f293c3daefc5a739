use super::{Cpu, CpuFlags};

/// Packed BCD byte to its decimal value. Non-decimal nibbles are taken at
/// face value (0x1A reads as 20).
fn bcd_to_decimal(val: u8) -> u8 {
    (val >> 4) * 10 + (val & 0x0F)
}

/// Decimal value 0..=99 to packed BCD.
fn decimal_to_bcd(val: u8) -> u8 {
    ((val / 10) << 4) | (val % 10)
}

impl Cpu {
    pub(crate) fn update_zero_negative(&mut self, val: u8) {
        self.status.set(CpuFlags::ZERO, val == 0);
        self.status.set(CpuFlags::NEGATIVE, val & 0x80 != 0);
    }

    fn carry_in(&self) -> u8 {
        self.status.contains(CpuFlags::CARRY) as u8
    }

    /// Binary A + val + C. Sets C, V, Z, N and returns the 8-bit sum without
    /// storing it.
    fn add_binary(&mut self, val: u8) -> u8 {
        let sum = self.a as u16 + val as u16 + self.carry_in() as u16;
        let result = sum as u8;
        self.status.set(CpuFlags::CARRY, sum > 0xFF);
        self.status.set(
            CpuFlags::OVERFLOW,
            (self.a ^ result) & (val ^ result) & 0x80 != 0,
        );
        self.update_zero_negative(result);
        result
    }

    pub(crate) fn adc(&mut self, val: u8) {
        if !self.status.contains(CpuFlags::DECIMAL) {
            self.a = self.add_binary(val);
            return;
        }

        // N, V and Z keep the binary pattern; only A and C are decimal.
        let carry = self.carry_in();
        self.add_binary(val);
        let sum = bcd_to_decimal(self.a) as u16 + bcd_to_decimal(val) as u16 + carry as u16;
        self.status.set(CpuFlags::CARRY, sum > 99);
        self.a = decimal_to_bcd((sum % 100) as u8);
    }

    pub(crate) fn sbc(&mut self, val: u8) {
        if !self.status.contains(CpuFlags::DECIMAL) {
            // Subtraction is addition of the one's complement; C acts as
            // not-borrow.
            self.a = self.add_binary(!val);
            return;
        }

        let borrow = 1 - self.carry_in() as i16;
        self.add_binary(!val);
        let diff = bcd_to_decimal(self.a) as i16 - bcd_to_decimal(val) as i16 - borrow;
        self.status.set(CpuFlags::CARRY, diff >= 0);
        self.a = decimal_to_bcd(diff.rem_euclid(100) as u8);
    }

    /// CMP/CPX/CPY: reg - val without storing. V is untouched.
    pub(crate) fn compare(&mut self, reg: u8, val: u8) {
        let sum = reg as u16 + (!val) as u16 + 1;
        self.status.set(CpuFlags::CARRY, sum > 0xFF);
        self.update_zero_negative(sum as u8);
    }

    pub(crate) fn bit(&mut self, val: u8) {
        self.status.set(CpuFlags::ZERO, self.a & val == 0);
        self.status.set(CpuFlags::OVERFLOW, val & 0x40 != 0);
        self.status.set(CpuFlags::NEGATIVE, val & 0x80 != 0);
    }

    pub(crate) fn asl(&mut self, val: u8) -> u8 {
        let result = val << 1;
        self.status.set(CpuFlags::CARRY, val & 0x80 != 0);
        self.update_zero_negative(result);
        result
    }

    pub(crate) fn lsr(&mut self, val: u8) -> u8 {
        let result = val >> 1;
        self.status.set(CpuFlags::CARRY, val & 0x01 != 0);
        self.update_zero_negative(result);
        result
    }

    pub(crate) fn rol(&mut self, val: u8) -> u8 {
        let result = (val << 1) | self.carry_in();
        self.status.set(CpuFlags::CARRY, val & 0x80 != 0);
        self.update_zero_negative(result);
        result
    }

    pub(crate) fn ror(&mut self, val: u8) -> u8 {
        let result = (val >> 1) | (self.carry_in() << 7);
        self.status.set(CpuFlags::CARRY, val & 0x01 != 0);
        self.update_zero_negative(result);
        result
    }
}
