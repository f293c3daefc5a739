use crate::bus::Bus;
use super::Cpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
    Implied,
    Accumulator,
}

impl AddressingMode {
    /// Total instruction length in bytes, opcode included.
    pub const fn instruction_len(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zeropage",
            AddressingMode::ZeroPageX => "zeropage,X",
            AddressingMode::ZeroPageY => "zeropage,Y",
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute,X",
            AddressingMode::AbsoluteY => "absolute,Y",
            AddressingMode::Indirect => "indirect",
            AddressingMode::IndirectX => "(indirect,X)",
            AddressingMode::IndirectY => "(indirect),Y",
            AddressingMode::Relative => "relative",
            AddressingMode::Implied => "implied",
            AddressingMode::Accumulator => "accumulator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand (implied instructions).
    None,
    /// The accumulator itself.
    Accumulator,
    /// Effective address. Immediate operands resolve to the address of the
    /// operand byte.
    Address(u16),
    /// Signed branch displacement, applied to the address after the branch.
    Relative(i8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    /// Indexed base and effective address sit on different pages.
    pub page_crossed: bool,
}

impl Resolved {
    fn plain(operand: Operand) -> Self {
        Resolved {
            operand,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, addr: u16) -> Self {
        Resolved {
            operand: Operand::Address(addr),
            page_crossed: pages_differ(base, addr),
        }
    }
}

pub fn pages_differ(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Resolve the operand of the instruction at `cpu.pc`. Reads memory only; no
/// register or memory state changes.
pub fn resolve(cpu: &Cpu, bus: &Bus, mode: AddressingMode) -> Resolved {
    let arg = cpu.pc.wrapping_add(1);
    match mode {
        AddressingMode::Immediate => Resolved::plain(Operand::Address(arg)),
        AddressingMode::ZeroPage => Resolved::plain(Operand::Address(bus.read(arg) as u16)),
        AddressingMode::ZeroPageX => {
            let addr = bus.read(arg).wrapping_add(cpu.x);
            Resolved::plain(Operand::Address(addr as u16))
        }
        AddressingMode::ZeroPageY => {
            let addr = bus.read(arg).wrapping_add(cpu.y);
            Resolved::plain(Operand::Address(addr as u16))
        }
        AddressingMode::Absolute => Resolved::plain(Operand::Address(bus.read_u16(arg))),
        AddressingMode::AbsoluteX => {
            let base = bus.read_u16(arg);
            Resolved::indexed(base, base.wrapping_add(cpu.x as u16))
        }
        AddressingMode::AbsoluteY => {
            let base = bus.read_u16(arg);
            Resolved::indexed(base, base.wrapping_add(cpu.y as u16))
        }
        AddressingMode::Indirect => {
            let ptr = bus.read_u16(arg);
            let lo = bus.read(ptr) as u16;
            // The high byte never carries out of the pointer's page.
            let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
            let hi = bus.read(hi_addr) as u16;
            Resolved::plain(Operand::Address((hi << 8) | lo))
        }
        AddressingMode::IndirectX => {
            let ptr = bus.read(arg).wrapping_add(cpu.x);
            Resolved::plain(Operand::Address(zero_page_pointer(bus, ptr)))
        }
        AddressingMode::IndirectY => {
            let base = zero_page_pointer(bus, bus.read(arg));
            Resolved::indexed(base, base.wrapping_add(cpu.y as u16))
        }
        AddressingMode::Relative => Resolved::plain(Operand::Relative(bus.read(arg) as i8)),
        AddressingMode::Implied => Resolved::plain(Operand::None),
        AddressingMode::Accumulator => Resolved::plain(Operand::Accumulator),
    }
}

/// Word stored in zero page at `ptr`, high byte wrapping within page 0.
fn zero_page_pointer(bus: &Bus, ptr: u8) -> u16 {
    let lo = bus.read(ptr as u16) as u16;
    let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
