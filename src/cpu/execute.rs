use crate::bus::Bus;
use super::addressing::Operand;
use super::opcodes::Op;
use super::{Cpu, CpuFlags, Decoded, IRQ_VECTOR};

impl Cpu {
    fn read_operand(&self, bus: &Bus, operand: Operand) -> u8 {
        match operand {
            Operand::Accumulator => self.a,
            Operand::Address(addr) => bus.read(addr),
            Operand::None | Operand::Relative(_) => 0,
        }
    }

    fn write_operand(&mut self, bus: &mut Bus, operand: Operand, val: u8) {
        match operand {
            Operand::Accumulator => self.a = val,
            Operand::Address(addr) => bus.write(addr, val),
            Operand::None | Operand::Relative(_) => {}
        }
    }

    /// Apply the full effect of a decoded instruction, PC included.
    pub(crate) fn execute(&mut self, bus: &mut Bus, decoded: &Decoded) {
        let operand = decoded.resolved.operand;
        let next_pc = decoded.pc.wrapping_add(decoded.info.bytes as u16);
        self.pc = next_pc;

        match decoded.info.op {
            // === Loads / stores ===
            Op::Lda => {
                self.a = self.read_operand(bus, operand);
                self.update_zero_negative(self.a);
            }
            Op::Ldx => {
                self.x = self.read_operand(bus, operand);
                self.update_zero_negative(self.x);
            }
            Op::Ldy => {
                self.y = self.read_operand(bus, operand);
                self.update_zero_negative(self.y);
            }
            Op::Sta => self.write_operand(bus, operand, self.a),
            Op::Stx => self.write_operand(bus, operand, self.x),
            Op::Sty => self.write_operand(bus, operand, self.y),

            // === Arithmetic ===
            Op::Adc => {
                let val = self.read_operand(bus, operand);
                self.adc(val);
            }
            Op::Sbc => {
                let val = self.read_operand(bus, operand);
                self.sbc(val);
            }

            // === Logical ===
            Op::And => {
                self.a &= self.read_operand(bus, operand);
                self.update_zero_negative(self.a);
            }
            Op::Ora => {
                self.a |= self.read_operand(bus, operand);
                self.update_zero_negative(self.a);
            }
            Op::Eor => {
                self.a ^= self.read_operand(bus, operand);
                self.update_zero_negative(self.a);
            }
            Op::Bit => {
                let val = self.read_operand(bus, operand);
                self.bit(val);
            }

            // === Compare ===
            Op::Cmp => {
                let val = self.read_operand(bus, operand);
                self.compare(self.a, val);
            }
            Op::Cpx => {
                let val = self.read_operand(bus, operand);
                self.compare(self.x, val);
            }
            Op::Cpy => {
                let val = self.read_operand(bus, operand);
                self.compare(self.y, val);
            }

            // === Increment / decrement ===
            Op::Inc => {
                let val = self.read_operand(bus, operand).wrapping_add(1);
                self.write_operand(bus, operand, val);
                self.update_zero_negative(val);
            }
            Op::Dec => {
                let val = self.read_operand(bus, operand).wrapping_sub(1);
                self.write_operand(bus, operand, val);
                self.update_zero_negative(val);
            }
            Op::Inx => { self.x = self.x.wrapping_add(1); self.update_zero_negative(self.x); }
            Op::Iny => { self.y = self.y.wrapping_add(1); self.update_zero_negative(self.y); }
            Op::Dex => { self.x = self.x.wrapping_sub(1); self.update_zero_negative(self.x); }
            Op::Dey => { self.y = self.y.wrapping_sub(1); self.update_zero_negative(self.y); }

            // === Shifts / rotates (accumulator or memory) ===
            Op::Asl => {
                let val = self.read_operand(bus, operand);
                let result = self.asl(val);
                self.write_operand(bus, operand, result);
            }
            Op::Lsr => {
                let val = self.read_operand(bus, operand);
                let result = self.lsr(val);
                self.write_operand(bus, operand, result);
            }
            Op::Rol => {
                let val = self.read_operand(bus, operand);
                let result = self.rol(val);
                self.write_operand(bus, operand, result);
            }
            Op::Ror => {
                let val = self.read_operand(bus, operand);
                let result = self.ror(val);
                self.write_operand(bus, operand, result);
            }

            // === Transfers ===
            Op::Tax => { self.x = self.a; self.update_zero_negative(self.x); }
            Op::Tay => { self.y = self.a; self.update_zero_negative(self.y); }
            Op::Tsx => { self.x = self.sp; self.update_zero_negative(self.x); }
            Op::Txa => { self.a = self.x; self.update_zero_negative(self.a); }
            Op::Tya => { self.a = self.y; self.update_zero_negative(self.a); }
            Op::Txs => self.sp = self.x,

            // === Stack ===
            Op::Pha => {
                let a = self.a;
                self.push(bus, a);
            }
            Op::Php => {
                let flags = self.status_byte();
                self.push(bus, flags);
            }
            Op::Pla => {
                self.a = self.pull(bus);
                self.update_zero_negative(self.a);
            }
            Op::Plp => {
                let flags = self.pull(bus);
                self.set_status_byte(flags);
            }

            // === Control transfer ===
            Op::Jmp => {
                if let Operand::Address(target) = operand {
                    self.pc = target;
                }
            }
            Op::Jsr => {
                // Return address minus one: the last byte of the JSR itself.
                self.push_u16(bus, next_pc.wrapping_sub(1));
                if let Operand::Address(target) = operand {
                    self.pc = target;
                }
            }
            Op::Rts => {
                self.pc = self.pull_u16(bus).wrapping_add(1);
            }
            Op::Brk => {
                // BRK skips the padding byte after it.
                self.push_u16(bus, decoded.pc.wrapping_add(2));
                let flags = self.status_byte();
                self.push(bus, flags);
                self.status.insert(CpuFlags::BREAK | CpuFlags::IRQ_DIS);
                self.pc = bus.read_u16(IRQ_VECTOR);
            }
            Op::Rti => {
                let flags = self.pull(bus);
                self.set_status_byte(flags);
                self.pc = self.pull_u16(bus);
            }

            // === Flags ===
            Op::Clc => self.status.remove(CpuFlags::CARRY),
            Op::Sec => self.status.insert(CpuFlags::CARRY),
            Op::Cli => self.status.remove(CpuFlags::IRQ_DIS),
            Op::Sei => self.status.insert(CpuFlags::IRQ_DIS),
            Op::Cld => self.status.remove(CpuFlags::DECIMAL),
            Op::Sed => self.status.insert(CpuFlags::DECIMAL),
            Op::Clv => self.status.remove(CpuFlags::OVERFLOW),

            // === Branches ===
            Op::Bcc | Op::Bcs | Op::Beq | Op::Bne | Op::Bmi | Op::Bpl | Op::Bvc | Op::Bvs => {
                if let Operand::Relative(offset) = operand {
                    if self.branch_taken(decoded.info.op) {
                        self.pc = next_pc.wrapping_add(offset as u16);
                    }
                }
            }

            Op::Nop => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu::{Cpu, CpuFlags, Variant};

    const ORIGIN: u16 = 0x0600;

    fn load(variant: Variant, program: &[u8]) -> (Cpu, Bus) {
        let mut bus = Bus::new();
        bus.load(ORIGIN, program);
        let mut cpu = Cpu::new(variant);
        cpu.reset(&bus, Some(ORIGIN));
        (cpu, bus)
    }

    fn run(cpu: &mut Cpu, bus: &mut Bus, instructions: usize) -> Vec<u8> {
        (0..instructions).map(|_| cpu.step(bus).unwrap()).collect()
    }

    #[test]
    fn test_loads_set_zero_negative() {
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0xA9, 0x00, 0xA2, 0x80, 0xA0, 0x01]);
        run(&mut cpu, &mut bus, 1);
        assert!(cpu.flag(CpuFlags::ZERO));
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.flag(CpuFlags::NEGATIVE));
        assert!(!cpu.flag(CpuFlags::ZERO));
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.y, 0x01);
        assert!(!cpu.flag(CpuFlags::NEGATIVE));
    }

    #[test]
    fn test_stores_leave_flags() {
        // LDA #$80; STA $10; STX $11; STY $0300
        let (mut cpu, mut bus) =
            load(Variant::Mos6502, &[0xA9, 0x80, 0x85, 0x10, 0x86, 0x11, 0x8C, 0x00, 0x03]);
        cpu.x = 0x00;
        cpu.y = 0x7E;
        run(&mut cpu, &mut bus, 2);
        let flags = cpu.status;
        run(&mut cpu, &mut bus, 2);
        assert_eq!(bus.read(0x0010), 0x80);
        assert_eq!(bus.read(0x0011), 0x00);
        assert_eq!(bus.read(0x0300), 0x7E);
        assert_eq!(cpu.status, flags);
    }

    #[test]
    fn test_pha_pla_round_trip() {
        // LDA #$00 ; PHA ; LDA #$FF ; SEC ; SED ; PLA
        let (mut cpu, mut bus) =
            load(Variant::Mos6502, &[0xA9, 0x00, 0x48, 0xA9, 0xFF, 0x38, 0xF8, 0x68]);
        cpu.status.insert(CpuFlags::OVERFLOW | CpuFlags::IRQ_DIS);
        let cycles = run(&mut cpu, &mut bus, 6);
        assert_eq!(cycles, vec![2, 3, 2, 2, 2, 4]);
        assert_eq!(cpu.a, 0x00);
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(bus.read(0x01FF), 0x00);
        assert!(cpu.flag(CpuFlags::ZERO));
        assert!(!cpu.flag(CpuFlags::NEGATIVE));
        assert!(cpu.flag(CpuFlags::CARRY));
        assert!(cpu.flag(CpuFlags::DECIMAL));
        assert!(cpu.flag(CpuFlags::OVERFLOW));
        assert!(cpu.flag(CpuFlags::IRQ_DIS));
    }

    #[test]
    fn test_php_plp() {
        // SEC ; PHP ; CLC ; PLP
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0x38, 0x08, 0x18, 0x28]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(bus.read(0x01FF), 0x31);
        run(&mut cpu, &mut bus, 1);
        assert!(!cpu.flag(CpuFlags::CARRY));
        run(&mut cpu, &mut bus, 1);
        assert!(cpu.flag(CpuFlags::CARRY));
        // Break was pushed set but is not restored.
        assert!(!cpu.flag(CpuFlags::BREAK));
        assert!(cpu.flag(CpuFlags::UNUSED));
    }

    #[test]
    fn test_6507_stack_in_zero_page() {
        // LDA #$42 ; PHA
        let (mut cpu, mut bus) = load(Variant::Mos6507, &[0xA9, 0x42, 0x48]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(bus.read(0x00FF), 0x42);
        assert_eq!(bus.read(0x01FF), 0x00);
        assert_eq!(cpu.sp, 0xFE);
    }

    #[test]
    fn test_jsr_rts_round_trip() {
        // $0600: JSR $0610 ; $0603: LDX #$01 ... $0610: LDA #$07 ; RTS
        let mut program = vec![0x20, 0x10, 0x06, 0xA2, 0x01];
        program.resize(0x10, 0xEA);
        program.extend_from_slice(&[0xA9, 0x07, 0x60]);
        let (mut cpu, mut bus) = load(Variant::Mos6502, &program);

        assert_eq!(run(&mut cpu, &mut bus, 1), vec![6]);
        assert_eq!(cpu.pc, 0x0610);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(bus.read(0x01FF), 0x06);
        assert_eq!(bus.read(0x01FE), 0x02);

        assert_eq!(run(&mut cpu, &mut bus, 2), vec![2, 6]);
        assert_eq!(cpu.pc, 0x0603);
        assert_eq!(cpu.sp, 0xFF);
        run(&mut cpu, &mut bus, 1);
        assert_eq!((cpu.a, cpu.x), (0x07, 0x01));
    }

    #[test]
    fn test_brk_rti() {
        // $0600: BRK ; pad ; $0602: NOP   handler at $0700: RTI
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0x00, 0xFF, 0xEA]);
        bus.load(0x0700, &[0x40]);
        bus.write(0xFFFE, 0x00);
        bus.write(0xFFFF, 0x07);
        cpu.status.insert(CpuFlags::CARRY);

        assert_eq!(run(&mut cpu, &mut bus, 1), vec![7]);
        assert_eq!(cpu.pc, 0x0700);
        assert_eq!(bus.read(0x01FF), 0x06);
        assert_eq!(bus.read(0x01FE), 0x02);
        assert_eq!(bus.read(0x01FD), 0x31);
        assert!(cpu.flag(CpuFlags::IRQ_DIS));
        assert!(cpu.flag(CpuFlags::BREAK));

        assert_eq!(run(&mut cpu, &mut bus, 1), vec![6]);
        assert_eq!(cpu.pc, 0x0602);
        assert_eq!(cpu.sp, 0xFF);
        assert!(cpu.flag(CpuFlags::CARRY));
        assert!(!cpu.flag(CpuFlags::IRQ_DIS));
        assert!(cpu.flag(CpuFlags::UNUSED));
    }

    #[test]
    fn test_jmp_absolute_and_indirect() {
        // JMP $0610 ; at $0610: JMP ($07FF)
        let mut program = vec![0x4C, 0x10, 0x06];
        program.resize(0x10, 0xEA);
        program.extend_from_slice(&[0x6C, 0xFF, 0x07]);
        let (mut cpu, mut bus) = load(Variant::Mos6502, &program);
        bus.write(0x07FF, 0x34);
        bus.write(0x0700, 0x12);
        bus.write(0x0800, 0x99);

        assert_eq!(run(&mut cpu, &mut bus, 1), vec![3]);
        assert_eq!(cpu.pc, 0x0610);
        assert_eq!(run(&mut cpu, &mut bus, 1), vec![5]);
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn test_branch_not_taken_costs_two() {
        // SEC ; BCC +4
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0x38, 0x90, 0x04]);
        assert_eq!(run(&mut cpu, &mut bus, 2), vec![2, 2]);
        assert_eq!(cpu.pc, 0x0603);
    }

    #[test]
    fn test_branch_taken_same_page_costs_three() {
        // CLC ; BCC +4
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0x18, 0x90, 0x04]);
        assert_eq!(run(&mut cpu, &mut bus, 2), vec![2, 3]);
        assert_eq!(cpu.pc, 0x0607);
    }

    #[test]
    fn test_branch_taken_backwards() {
        // LDX #$03 ; DEX ; BNE -3
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);
        let cycles = run(&mut cpu, &mut bus, 7);
        assert_eq!(cycles, vec![2, 2, 3, 2, 3, 2, 2]);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.pc, 0x0605);
    }

    #[test]
    fn test_branch_taken_across_page_costs_four() {
        let mut bus = Bus::new();
        // $06F0: BEQ +$10 -> $0702
        bus.load(0x06F0, &[0xF0, 0x10]);
        let mut cpu = Cpu::new(Variant::Mos6502);
        cpu.reset(&bus, Some(0x06F0));
        cpu.status.insert(CpuFlags::ZERO);
        assert_eq!(cpu.step(&mut bus), Ok(4));
        assert_eq!(cpu.pc, 0x0702);
    }

    #[test]
    fn test_page_penalty_on_reads_only() {
        // LDA $06F0,X ; STA $06F0,X ; INC $06F0,X  with X = $20
        let (mut cpu, mut bus) = load(
            Variant::Mos6502,
            &[0xBD, 0xF0, 0x06, 0x9D, 0xF0, 0x06, 0xFE, 0xF0, 0x06],
        );
        cpu.x = 0x20;
        assert_eq!(run(&mut cpu, &mut bus, 3), vec![5, 5, 7]);

        let (mut cpu, mut bus) = load(
            Variant::Mos6502,
            &[0xBD, 0x00, 0x06, 0x9D, 0x00, 0x06, 0xFE, 0x00, 0x06],
        );
        cpu.x = 0x20;
        assert_eq!(run(&mut cpu, &mut bus, 3), vec![4, 5, 7]);
    }

    #[test]
    fn test_indirect_y_penalty() {
        // LDA ($10),Y ; STA ($10),Y
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0xB1, 0x10, 0x91, 0x10]);
        bus.write(0x0010, 0xFF);
        bus.write(0x0011, 0x02);
        bus.write(0x0300, 0x5A);
        cpu.y = 0x01;
        assert_eq!(run(&mut cpu, &mut bus, 2), vec![6, 6]);
        assert_eq!(cpu.a, 0x5A);
    }

    #[test]
    fn test_adc_program() {
        // CLC ; LDA #$50 ; ADC #$50
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0x18, 0xA9, 0x50, 0x69, 0x50]);
        run(&mut cpu, &mut bus, 3);
        assert_eq!(cpu.a, 0xA0);
        assert!(cpu.flag(CpuFlags::OVERFLOW));
        assert!(cpu.flag(CpuFlags::NEGATIVE));
        assert!(!cpu.flag(CpuFlags::CARRY));
    }

    #[test]
    fn test_decimal_adc_program() {
        // SED ; CLC ; LDA #$05 ; ADC #$05 ; SBC #$01
        let (mut cpu, mut bus) =
            load(Variant::Mos6502, &[0xF8, 0x18, 0xA9, 0x05, 0x69, 0x05, 0xE9, 0x01]);
        run(&mut cpu, &mut bus, 4);
        assert_eq!(cpu.a, 0x10);
        assert!(!cpu.flag(CpuFlags::CARRY));
        // Carry clear means borrow: 10 - 1 - 1
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0x08);
        assert!(cpu.flag(CpuFlags::CARRY));
    }

    #[test]
    fn test_logical_ops() {
        // LDA #$F0 ; AND #$3C ; ORA #$01 ; EOR #$FF
        let (mut cpu, mut bus) =
            load(Variant::Mos6502, &[0xA9, 0xF0, 0x29, 0x3C, 0x09, 0x01, 0x49, 0xFF]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a, 0x30);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0x31);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0xCE);
        assert!(cpu.flag(CpuFlags::NEGATIVE));
    }

    #[test]
    fn test_bit_zero_page() {
        // LDA #$0F ; BIT $20
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0xA9, 0x0F, 0x24, 0x20]);
        bus.write(0x0020, 0xF0);
        assert_eq!(run(&mut cpu, &mut bus, 2), vec![2, 3]);
        assert!(cpu.flag(CpuFlags::ZERO));
        assert!(cpu.flag(CpuFlags::NEGATIVE));
        assert!(cpu.flag(CpuFlags::OVERFLOW));
        assert_eq!(cpu.a, 0x0F);
    }

    #[test]
    fn test_compare_ops() {
        // LDX #$10 ; CPX #$10 ; LDY #$05 ; CPY #$06 ; LDA #$80 ; CMP #$7F
        let (mut cpu, mut bus) = load(
            Variant::Mos6502,
            &[0xA2, 0x10, 0xE0, 0x10, 0xA0, 0x05, 0xC0, 0x06, 0xA9, 0x80, 0xC9, 0x7F],
        );
        run(&mut cpu, &mut bus, 2);
        assert!(cpu.flag(CpuFlags::ZERO) && cpu.flag(CpuFlags::CARRY));
        run(&mut cpu, &mut bus, 2);
        assert!(!cpu.flag(CpuFlags::CARRY));
        assert!(cpu.flag(CpuFlags::NEGATIVE));
        run(&mut cpu, &mut bus, 2);
        assert!(cpu.flag(CpuFlags::CARRY));
        assert!(!cpu.flag(CpuFlags::ZERO));
        assert_eq!(cpu.a, 0x80);
    }

    #[test]
    fn test_register_increments_wrap() {
        // INX ; INY ; DEX ; DEY ; DEY
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0xE8, 0xC8, 0xCA, 0x88, 0x88]);
        cpu.x = 0xFF;
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.x, 0x00);
        assert!(cpu.flag(CpuFlags::ZERO));
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.y, 0x01);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.x, 0xFF);
        assert!(cpu.flag(CpuFlags::NEGATIVE));
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.y, 0xFF);
    }

    #[test]
    fn test_memory_inc_dec() {
        // INC $40 ; DEC $41
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0xE6, 0x40, 0xC6, 0x41]);
        bus.write(0x0040, 0xFF);
        bus.write(0x0041, 0x01);
        assert_eq!(run(&mut cpu, &mut bus, 2), vec![5, 5]);
        assert_eq!(bus.read(0x0040), 0x00);
        assert_eq!(bus.read(0x0041), 0x00);
        assert!(cpu.flag(CpuFlags::ZERO));
    }

    #[test]
    fn test_shift_accumulator_and_memory() {
        // ASL A ; LSR $30 ; ROL A ; ROR $31
        let (mut cpu, mut bus) = load(Variant::Mos6502, &[0x0A, 0x46, 0x30, 0x2A, 0x66, 0x31]);
        cpu.a = 0x81;
        bus.write(0x0030, 0x03);
        bus.write(0x0031, 0x02);
        assert_eq!(run(&mut cpu, &mut bus, 1), vec![2]);
        assert_eq!(cpu.a, 0x02);
        assert!(cpu.flag(CpuFlags::CARRY));
        run(&mut cpu, &mut bus, 1);
        assert_eq!(bus.read(0x0030), 0x01);
        assert!(cpu.flag(CpuFlags::CARRY));
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0x05);
        assert!(!cpu.flag(CpuFlags::CARRY));
        run(&mut cpu, &mut bus, 1);
        assert_eq!(bus.read(0x0031), 0x01);
        assert!(!cpu.flag(CpuFlags::CARRY));
    }

    #[test]
    fn test_transfers() {
        // LDA #$80 ; TAX ; TAY ; LDX #$00 ; TXS ; TSX ; TYA
        let (mut cpu, mut bus) =
            load(Variant::Mos6502, &[0xA9, 0x80, 0xAA, 0xA8, 0xA2, 0x00, 0x9A, 0xBA, 0x98]);
        run(&mut cpu, &mut bus, 3);
        assert_eq!((cpu.x, cpu.y), (0x80, 0x80));
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.sp, 0x00);
        // TXS leaves flags alone
        assert!(cpu.flag(CpuFlags::ZERO));
        cpu.x = 0x55;
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.x, 0x00);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.flag(CpuFlags::NEGATIVE));
    }

    #[test]
    fn test_flag_instructions() {
        // SEC ; SED ; SEI ; CLC ; CLD ; CLI ; CLV
        let (mut cpu, mut bus) =
            load(Variant::Mos6502, &[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
        run(&mut cpu, &mut bus, 3);
        assert!(cpu.flag(CpuFlags::CARRY | CpuFlags::DECIMAL | CpuFlags::IRQ_DIS));
        cpu.status.insert(CpuFlags::OVERFLOW);
        run(&mut cpu, &mut bus, 4);
        assert_eq!(cpu.status, CpuFlags::UNUSED);
        assert_eq!(cpu.pc, 0x0607);
    }

    #[test]
    fn test_6507_brk_keeps_break() {
        let (mut cpu, mut bus) = load(Variant::Mos6507, &[0x00, 0x00]);
        bus.write(0xFFFE, 0x00);
        bus.write(0xFFFF, 0x07);
        bus.write(0x0700, 0x40);
        run(&mut cpu, &mut bus, 2);
        assert!(cpu.flag(CpuFlags::BREAK));
        assert_eq!(cpu.pc, 0x0602);
        assert_eq!(cpu.sp, 0xFF);
    }
}
