use crate::bus::Bus;
use super::addressing::{AddressingMode, Operand};
use super::{Cpu, CpuError, Decoded};

impl Decoded {
    /// Assembler-style operand text, e.g. `$12F0,X` or `#$05`.
    pub fn operand_text(&self) -> String {
        let b1 = self.bytes[1];
        let word = u16::from_le_bytes([self.bytes[1], self.bytes[2]]);
        match self.info.mode {
            AddressingMode::Immediate => format!("#${:02X}", b1),
            AddressingMode::ZeroPage => format!("${:02X}", b1),
            AddressingMode::ZeroPageX => format!("${:02X},X", b1),
            AddressingMode::ZeroPageY => format!("${:02X},Y", b1),
            AddressingMode::Absolute => format!("${:04X}", word),
            AddressingMode::AbsoluteX => format!("${:04X},X", word),
            AddressingMode::AbsoluteY => format!("${:04X},Y", word),
            AddressingMode::Indirect => format!("(${:04X})", word),
            AddressingMode::IndirectX => format!("(${:02X},X)", b1),
            AddressingMode::IndirectY => format!("(${:02X}),Y", b1),
            AddressingMode::Relative => {
                let next = self.pc.wrapping_add(2);
                format!("${:04X}", next.wrapping_add(b1 as i8 as u16))
            }
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Implied => String::new(),
        }
    }

    pub fn hex_bytes(&self) -> String {
        match self.info.bytes {
            1 => format!("{:02X}      ", self.bytes[0]),
            2 => format!("{:02X} {:02X}   ", self.bytes[0], self.bytes[1]),
            _ => format!("{:02X} {:02X} {:02X}", self.bytes[0], self.bytes[1], self.bytes[2]),
        }
    }

    pub fn disassemble(&self) -> String {
        format!(
            "{:04X}  {}  {} {}",
            self.pc,
            self.hex_bytes(),
            self.info.op.mnemonic(),
            self.operand_text()
        )
    }
}

impl Cpu {
    fn register_text(&self) -> String {
        format!(
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} NV-BDIZC:{:08b}",
            self.a,
            self.x,
            self.y,
            self.status.bits(),
            self.sp,
            self.status.bits(),
        )
    }

    /// Trace line for the instruction at PC, before it runs.
    /// Format: "C000  4C F5 C5  JMP $C5F5     A:00 X:00 Y:00 P:20 SP:FF NV-BDIZC:00100000  CYC:0"
    pub fn trace(&self, bus: &Bus) -> Result<String, CpuError> {
        let decoded = self.decode(bus)?;
        Ok(format!(
            "{:28}  {}  CYC:{}",
            decoded.disassemble(),
            self.register_text(),
            self.cycles
        ))
    }

    /// Trace line for an instruction that has just retired: what ran, where
    /// its operand was, what it cost and the registers it left behind.
    pub fn retired_line(&self, decoded: &Decoded) -> String {
        let effective = match decoded.resolved.operand {
            Operand::Address(addr) => format!("@${:04X}", addr),
            _ => String::new(),
        };
        format!(
            "{:28} [{:<12}] {:6} cyc:{}  {}",
            decoded.disassemble(),
            decoded.info.mode.name(),
            effective,
            decoded.total_cycles(),
            self.register_text()
        )
    }
}
