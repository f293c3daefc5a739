use log::{debug, info};

use crate::bus::{Bus, ImageError};
use crate::config::Config;
use crate::cpu::{Cpu, CpuError, CpuFlags, Tick, Variant};

/// Point-in-time copy of everything a host display or debugger shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: CpuFlags,
    /// Opcode in flight, or the one at PC when idle.
    pub opcode: u8,
    pub ticks_elapsed: u8,
    pub cycles: u64,
}

impl Snapshot {
    pub fn flag(&self, flag: CpuFlags) -> bool {
        self.status.contains(flag)
    }
}

/// What a single host tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    Paused,
    Busy,
    Retired { pc: u16, opcode: u8 },
}

/// The interpreter context: CPU state, memory and host configuration.
pub struct Machine {
    pub cpu: Cpu,
    pub bus: Bus,
    pub config: Config,
}

impl Machine {
    pub fn new(config: Config) -> Self {
        Machine {
            cpu: Cpu::new(config.variant),
            bus: Bus::new(),
            config,
        }
    }

    pub fn variant(&self) -> Variant {
        self.cpu.variant
    }

    /// Zero memory and registers; set the unused bit and Break per variant.
    pub fn initialize(&mut self) {
        self.bus.clear();
        self.cpu.variant = self.config.variant;
        self.cpu.initialize();
        info!("Initialized {} core", self.cpu.variant);
    }

    pub fn load_image(&mut self, image: &[u8]) -> Result<(), ImageError> {
        self.bus.load_image(image)?;
        info!("Loaded {} byte image", image.len());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&self.bus, self.config.pc_override);
        info!("Reset: PC=${:04X} SP=${:02X}", self.cpu.pc, self.cpu.sp);
    }

    /// Advance one clock cycle unless paused.
    pub fn tick(&mut self) -> Result<TickResult, CpuError> {
        if self.config.paused {
            return Ok(TickResult::Paused);
        }
        match self.cpu.tick(&mut self.bus)? {
            Tick::Busy { .. } => Ok(TickResult::Busy),
            Tick::Retired(decoded) => {
                if self.config.debug {
                    debug!("{}", self.cpu.retired_line(&decoded));
                }
                Ok(TickResult::Retired {
                    pc: decoded.pc,
                    opcode: decoded.opcode(),
                })
            }
        }
    }

    /// Run the current instruction to retirement regardless of pause and
    /// return the ticks that took.
    pub fn step(&mut self) -> Result<u8, CpuError> {
        let mut cycles = 0;
        loop {
            cycles += 1;
            if let Tick::Retired(decoded) = self.cpu.tick(&mut self.bus)? {
                if self.config.debug {
                    debug!("{}", self.cpu.retired_line(&decoded));
                }
                return Ok(cycles);
            }
        }
    }

    /// Run until an instruction leaves PC where it was (a jump or branch to
    /// itself) and return that address. Stops with `Ok(None)` once
    /// `max_cycles` have elapsed.
    pub fn run_until_trap(&mut self, max_cycles: u64) -> Result<Option<u16>, CpuError> {
        let limit = self.cpu.cycles.saturating_add(max_cycles);
        while self.cpu.cycles < limit {
            let pc = self.cpu.pc;
            self.step()?;
            if self.cpu.pc == pc {
                info!("Trapped at ${:04X} after {} cycles", pc, self.cpu.cycles);
                return Ok(Some(pc));
            }
        }
        Ok(None)
    }

    pub fn snapshot(&self) -> Snapshot {
        let opcode = match self.cpu.in_flight() {
            Some(decoded) => decoded.opcode(),
            None => self.bus.read(self.cpu.pc),
        };
        Snapshot {
            pc: self.cpu.pc,
            sp: self.cpu.sp,
            a: self.cpu.a,
            x: self.cpu.x,
            y: self.cpu.y,
            status: self.cpu.status,
            opcode,
            ticks_elapsed: self.cpu.ticks_elapsed(),
            cycles: self.cpu.cycles,
        }
    }

    pub fn memory(&self) -> &[u8] {
        self.bus.as_slice()
    }
}
