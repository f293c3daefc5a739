pub mod opcodes;
pub mod addressing;
pub mod alu;
pub mod execute;
pub mod trace;

use std::fmt;

use bitflags::bitflags;
use crate::bus::Bus;
use addressing::{Operand, Resolved};
use opcodes::{Op, OpInfo};

pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuFlags: u8 {
        const CARRY     = 0b0000_0001;
        const ZERO      = 0b0000_0010;
        const IRQ_DIS   = 0b0000_0100;
        const DECIMAL   = 0b0000_1000;
        const BREAK     = 0b0001_0000;
        const UNUSED    = 0b0010_0000;
        const OVERFLOW  = 0b0100_0000;
        const NEGATIVE  = 0b1000_0000;
    }
}

/// Which chip is being modelled. The two differ only in where the stack
/// lives and in how the Break flag behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Full 6502: stack in page 1, Break follows BRK.
    #[default]
    Mos6502,
    /// Pin-reduced 6507: no interrupt lines, Break held at 1, stack addressed
    /// by SP directly in page 0.
    Mos6507,
}

impl Variant {
    pub fn stack_addr(self, sp: u8) -> u16 {
        match self {
            Variant::Mos6502 => 0x0100 | sp as u16,
            Variant::Mos6507 => sp as u16,
        }
    }

    fn initial_status(self) -> CpuFlags {
        match self {
            Variant::Mos6502 => CpuFlags::UNUSED,
            Variant::Mos6507 => CpuFlags::UNUSED | CpuFlags::BREAK,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Mos6502 => write!(f, "6502"),
            Variant::Mos6507 => write!(f, "6507"),
        }
    }
}

/// Fatal interpreter conditions. Neither is a guest-program error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    UnimplementedOpcode { opcode: u8, pc: u16 },
    UnusedFlagCleared { pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnimplementedOpcode { opcode, pc } => {
                write!(f, "Opcode {:02X} at ${:04X} is not implemented", opcode, pc)
            }
            CpuError::UnusedFlagCleared { pc } => {
                write!(f, "Internal error: unused status bit cleared after ${:04X}", pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

/// An instruction whose operand has been resolved and whose cost is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub pc: u16,
    pub info: &'static OpInfo,
    /// Raw instruction bytes; only the first `info.bytes` are meaningful.
    pub bytes: [u8; 3],
    pub resolved: Resolved,
    pub extra_cycles: u8,
}

impl Decoded {
    pub fn opcode(&self) -> u8 {
        self.info.opcode
    }

    pub fn total_cycles(&self) -> u8 {
        self.info.cycles + self.extra_cycles
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The instruction is still consuming cycles; nothing has changed yet.
    Busy { elapsed: u8, total: u8 },
    /// The instruction took effect on this tick.
    Retired(Decoded),
}

#[derive(Clone)]
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: CpuFlags,
    pub variant: Variant,
    /// Total clock ticks consumed since initialize.
    pub cycles: u64,
    ticks_elapsed: u8,
    extra_cycles: u8,
    in_flight: Option<Decoded>,
    halted: Option<CpuError>,
}

impl Cpu {
    pub fn new(variant: Variant) -> Self {
        let mut cpu = Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: CpuFlags::UNUSED,
            variant,
            cycles: 0,
            ticks_elapsed: 1,
            extra_cycles: 0,
            in_flight: None,
            halted: None,
        };
        cpu.initialize();
        cpu
    }

    /// Zero every register and drop any in-flight instruction.
    pub fn initialize(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0;
        self.pc = 0;
        self.status = self.variant.initial_status();
        self.cycles = 0;
        self.clear_progress();
        self.halted = None;
    }

    /// Load PC from the reset vector (or `pc_override`) and set SP to $FF.
    pub fn reset(&mut self, bus: &Bus, pc_override: Option<u16>) {
        self.pc = pc_override.unwrap_or_else(|| bus.read_u16(RESET_VECTOR));
        self.sp = 0xFF;
        self.clear_progress();
        self.halted = None;
    }

    fn clear_progress(&mut self) {
        self.ticks_elapsed = 1;
        self.extra_cycles = 0;
        self.in_flight = None;
    }

    pub fn flag(&self, flag: CpuFlags) -> bool {
        self.status.contains(flag)
    }

    pub fn set_flag(&mut self, flag: CpuFlags, on: bool) {
        self.status.set(flag, on);
    }

    /// Status byte as it would be pushed: Break and bit 5 forced on.
    pub fn status_byte(&self) -> u8 {
        self.status.bits() | (CpuFlags::BREAK | CpuFlags::UNUSED).bits()
    }

    /// Status byte as pulled by PLP/RTI: bits 4 and 5 keep their current value.
    pub fn set_status_byte(&mut self, val: u8) {
        let held = CpuFlags::BREAK | CpuFlags::UNUSED;
        self.status = (CpuFlags::from_bits_truncate(val) - held) | (self.status & held);
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ticks consumed so far by the in-flight instruction (1 when idle).
    pub fn ticks_elapsed(&self) -> u8 {
        self.ticks_elapsed
    }

    pub fn in_flight(&self) -> Option<&Decoded> {
        self.in_flight.as_ref()
    }

    pub fn halted(&self) -> Option<CpuError> {
        self.halted
    }

    pub(crate) fn push(&mut self, bus: &mut Bus, val: u8) {
        bus.write(self.variant.stack_addr(self.sp), val);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(self.variant.stack_addr(self.sp))
    }

    pub(crate) fn push_u16(&mut self, bus: &mut Bus, val: u16) {
        self.push(bus, (val >> 8) as u8);
        self.push(bus, val as u8);
    }

    pub(crate) fn pull_u16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.pull(bus) as u16;
        let hi = self.pull(bus) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn branch_taken(&self, op: Op) -> bool {
        match op {
            Op::Bcc => !self.flag(CpuFlags::CARRY),
            Op::Bcs => self.flag(CpuFlags::CARRY),
            Op::Beq => self.flag(CpuFlags::ZERO),
            Op::Bne => !self.flag(CpuFlags::ZERO),
            Op::Bmi => self.flag(CpuFlags::NEGATIVE),
            Op::Bpl => !self.flag(CpuFlags::NEGATIVE),
            Op::Bvs => self.flag(CpuFlags::OVERFLOW),
            Op::Bvc => !self.flag(CpuFlags::OVERFLOW),
            _ => false,
        }
    }

    /// Fetch and resolve the instruction at PC and fix its cycle cost.
    /// Memory and registers are only read.
    pub fn decode(&self, bus: &Bus) -> Result<Decoded, CpuError> {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = opcodes::lookup(opcode).ok_or(CpuError::UnimplementedOpcode { opcode, pc })?;
        let resolved = addressing::resolve(self, bus, info.mode);

        let mut extra = 0;
        if resolved.page_crossed && info.op.pays_page_penalty() {
            extra += 1;
        }
        if let Operand::Relative(offset) = resolved.operand {
            if self.branch_taken(info.op) {
                let next = pc.wrapping_add(info.bytes as u16);
                let target = next.wrapping_add(offset as u16);
                extra += if addressing::pages_differ(next, target) { 2 } else { 1 };
            }
        }

        Ok(Decoded {
            pc,
            info,
            bytes: [opcode, bus.read(pc.wrapping_add(1)), bus.read(pc.wrapping_add(2))],
            resolved,
            extra_cycles: extra,
        })
    }

    /// Advance one clock cycle. The instruction's whole effect lands on its
    /// final tick; earlier ticks only count.
    pub fn tick(&mut self, bus: &mut Bus) -> Result<Tick, CpuError> {
        if let Some(err) = self.halted {
            return Err(err);
        }

        let decoded = match self.in_flight {
            Some(decoded) => decoded,
            None => {
                let decoded = self.decode(bus).map_err(|e| self.halt(e))?;
                self.extra_cycles = decoded.extra_cycles;
                self.in_flight = Some(decoded);
                decoded
            }
        };

        self.cycles += 1;
        let total = decoded.info.cycles + self.extra_cycles;
        if self.ticks_elapsed < total {
            self.ticks_elapsed += 1;
            return Ok(Tick::Busy {
                elapsed: self.ticks_elapsed,
                total,
            });
        }

        self.execute(bus, &decoded);
        self.clear_progress();

        if !self.status.contains(CpuFlags::UNUSED) {
            return Err(self.halt(CpuError::UnusedFlagCleared { pc: decoded.pc }));
        }
        Ok(Tick::Retired(decoded))
    }

    /// Run the current instruction to retirement and return its cycle cost.
    pub fn step(&mut self, bus: &mut Bus) -> Result<u8, CpuError> {
        loop {
            if let Tick::Retired(decoded) = self.tick(bus)? {
                return Ok(decoded.total_cycles());
            }
        }
    }

    fn halt(&mut self, err: CpuError) -> CpuError {
        log::error!("{}", err);
        self.halted = Some(err);
        self.clear_progress();
        err
    }
}
