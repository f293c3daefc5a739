use super::addressing::AddressingMode;
use super::addressing::AddressingMode::*;

/// Documented 6502 mnemonics. Handlers match on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Op {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Adc => "ADC", Op::And => "AND", Op::Asl => "ASL", Op::Bcc => "BCC",
            Op::Bcs => "BCS", Op::Beq => "BEQ", Op::Bit => "BIT", Op::Bmi => "BMI",
            Op::Bne => "BNE", Op::Bpl => "BPL", Op::Brk => "BRK", Op::Bvc => "BVC",
            Op::Bvs => "BVS", Op::Clc => "CLC", Op::Cld => "CLD", Op::Cli => "CLI",
            Op::Clv => "CLV", Op::Cmp => "CMP", Op::Cpx => "CPX", Op::Cpy => "CPY",
            Op::Dec => "DEC", Op::Dex => "DEX", Op::Dey => "DEY", Op::Eor => "EOR",
            Op::Inc => "INC", Op::Inx => "INX", Op::Iny => "INY", Op::Jmp => "JMP",
            Op::Jsr => "JSR", Op::Lda => "LDA", Op::Ldx => "LDX", Op::Ldy => "LDY",
            Op::Lsr => "LSR", Op::Nop => "NOP", Op::Ora => "ORA", Op::Pha => "PHA",
            Op::Php => "PHP", Op::Pla => "PLA", Op::Plp => "PLP", Op::Rol => "ROL",
            Op::Ror => "ROR", Op::Rti => "RTI", Op::Rts => "RTS", Op::Sbc => "SBC",
            Op::Sec => "SEC", Op::Sed => "SED", Op::Sei => "SEI", Op::Sta => "STA",
            Op::Stx => "STX", Op::Sty => "STY", Op::Tax => "TAX", Op::Tay => "TAY",
            Op::Tsx => "TSX", Op::Txa => "TXA", Op::Txs => "TXS", Op::Tya => "TYA",
        }
    }

    /// Read instructions pay +1 when indexed addressing crosses a page.
    /// Stores and read-modify-write forms always take their fixed worst case.
    pub fn pays_page_penalty(self) -> bool {
        matches!(
            self,
            Op::Adc
                | Op::And
                | Op::Cmp
                | Op::Eor
                | Op::Lda
                | Op::Ldx
                | Op::Ldy
                | Op::Ora
                | Op::Sbc
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpInfo {
    pub opcode: u8,
    pub op: Op,
    pub mode: AddressingMode,
    pub bytes: u8,
    pub cycles: u8,
}

const fn op(opcode: u8, op: Op, mode: AddressingMode, cycles: u8) -> OpInfo {
    OpInfo {
        opcode,
        op,
        mode,
        bytes: mode.instruction_len(),
        cycles,
    }
}

const DEFINED: [OpInfo; 151] = [
    // Loads
    op(0xA9, Op::Lda, Immediate, 2),
    op(0xA5, Op::Lda, ZeroPage, 3),
    op(0xB5, Op::Lda, ZeroPageX, 4),
    op(0xAD, Op::Lda, Absolute, 4),
    op(0xBD, Op::Lda, AbsoluteX, 4),
    op(0xB9, Op::Lda, AbsoluteY, 4),
    op(0xA1, Op::Lda, IndirectX, 6),
    op(0xB1, Op::Lda, IndirectY, 5),
    op(0xA2, Op::Ldx, Immediate, 2),
    op(0xA6, Op::Ldx, ZeroPage, 3),
    op(0xB6, Op::Ldx, ZeroPageY, 4),
    op(0xAE, Op::Ldx, Absolute, 4),
    op(0xBE, Op::Ldx, AbsoluteY, 4),
    op(0xA0, Op::Ldy, Immediate, 2),
    op(0xA4, Op::Ldy, ZeroPage, 3),
    op(0xB4, Op::Ldy, ZeroPageX, 4),
    op(0xAC, Op::Ldy, Absolute, 4),
    op(0xBC, Op::Ldy, AbsoluteX, 4),
    // Stores
    op(0x85, Op::Sta, ZeroPage, 3),
    op(0x95, Op::Sta, ZeroPageX, 4),
    op(0x8D, Op::Sta, Absolute, 4),
    op(0x9D, Op::Sta, AbsoluteX, 5),
    op(0x99, Op::Sta, AbsoluteY, 5),
    op(0x81, Op::Sta, IndirectX, 6),
    op(0x91, Op::Sta, IndirectY, 6),
    op(0x86, Op::Stx, ZeroPage, 3),
    op(0x96, Op::Stx, ZeroPageY, 4),
    op(0x8E, Op::Stx, Absolute, 4),
    op(0x84, Op::Sty, ZeroPage, 3),
    op(0x94, Op::Sty, ZeroPageX, 4),
    op(0x8C, Op::Sty, Absolute, 4),
    // Arithmetic
    op(0x69, Op::Adc, Immediate, 2),
    op(0x65, Op::Adc, ZeroPage, 3),
    op(0x75, Op::Adc, ZeroPageX, 4),
    op(0x6D, Op::Adc, Absolute, 4),
    op(0x7D, Op::Adc, AbsoluteX, 4),
    op(0x79, Op::Adc, AbsoluteY, 4),
    op(0x61, Op::Adc, IndirectX, 6),
    op(0x71, Op::Adc, IndirectY, 5),
    op(0xE9, Op::Sbc, Immediate, 2),
    op(0xE5, Op::Sbc, ZeroPage, 3),
    op(0xF5, Op::Sbc, ZeroPageX, 4),
    op(0xED, Op::Sbc, Absolute, 4),
    op(0xFD, Op::Sbc, AbsoluteX, 4),
    op(0xF9, Op::Sbc, AbsoluteY, 4),
    op(0xE1, Op::Sbc, IndirectX, 6),
    op(0xF1, Op::Sbc, IndirectY, 5),
    // Logical
    op(0x29, Op::And, Immediate, 2),
    op(0x25, Op::And, ZeroPage, 3),
    op(0x35, Op::And, ZeroPageX, 4),
    op(0x2D, Op::And, Absolute, 4),
    op(0x3D, Op::And, AbsoluteX, 4),
    op(0x39, Op::And, AbsoluteY, 4),
    op(0x21, Op::And, IndirectX, 6),
    op(0x31, Op::And, IndirectY, 5),
    op(0x09, Op::Ora, Immediate, 2),
    op(0x05, Op::Ora, ZeroPage, 3),
    op(0x15, Op::Ora, ZeroPageX, 4),
    op(0x0D, Op::Ora, Absolute, 4),
    op(0x1D, Op::Ora, AbsoluteX, 4),
    op(0x19, Op::Ora, AbsoluteY, 4),
    op(0x01, Op::Ora, IndirectX, 6),
    op(0x11, Op::Ora, IndirectY, 5),
    op(0x49, Op::Eor, Immediate, 2),
    op(0x45, Op::Eor, ZeroPage, 3),
    op(0x55, Op::Eor, ZeroPageX, 4),
    op(0x4D, Op::Eor, Absolute, 4),
    op(0x5D, Op::Eor, AbsoluteX, 4),
    op(0x59, Op::Eor, AbsoluteY, 4),
    op(0x41, Op::Eor, IndirectX, 6),
    op(0x51, Op::Eor, IndirectY, 5),
    op(0x24, Op::Bit, ZeroPage, 3),
    op(0x2C, Op::Bit, Absolute, 4),
    // Compare
    op(0xC9, Op::Cmp, Immediate, 2),
    op(0xC5, Op::Cmp, ZeroPage, 3),
    op(0xD5, Op::Cmp, ZeroPageX, 4),
    op(0xCD, Op::Cmp, Absolute, 4),
    op(0xDD, Op::Cmp, AbsoluteX, 4),
    op(0xD9, Op::Cmp, AbsoluteY, 4),
    op(0xC1, Op::Cmp, IndirectX, 6),
    op(0xD1, Op::Cmp, IndirectY, 5),
    op(0xE0, Op::Cpx, Immediate, 2),
    op(0xE4, Op::Cpx, ZeroPage, 3),
    op(0xEC, Op::Cpx, Absolute, 4),
    op(0xC0, Op::Cpy, Immediate, 2),
    op(0xC4, Op::Cpy, ZeroPage, 3),
    op(0xCC, Op::Cpy, Absolute, 4),
    // Increment / decrement
    op(0xE6, Op::Inc, ZeroPage, 5),
    op(0xF6, Op::Inc, ZeroPageX, 6),
    op(0xEE, Op::Inc, Absolute, 6),
    op(0xFE, Op::Inc, AbsoluteX, 7),
    op(0xC6, Op::Dec, ZeroPage, 5),
    op(0xD6, Op::Dec, ZeroPageX, 6),
    op(0xCE, Op::Dec, Absolute, 6),
    op(0xDE, Op::Dec, AbsoluteX, 7),
    op(0xE8, Op::Inx, Implied, 2),
    op(0xC8, Op::Iny, Implied, 2),
    op(0xCA, Op::Dex, Implied, 2),
    op(0x88, Op::Dey, Implied, 2),
    // Shifts and rotates
    op(0x0A, Op::Asl, Accumulator, 2),
    op(0x06, Op::Asl, ZeroPage, 5),
    op(0x16, Op::Asl, ZeroPageX, 6),
    op(0x0E, Op::Asl, Absolute, 6),
    op(0x1E, Op::Asl, AbsoluteX, 7),
    op(0x4A, Op::Lsr, Accumulator, 2),
    op(0x46, Op::Lsr, ZeroPage, 5),
    op(0x56, Op::Lsr, ZeroPageX, 6),
    op(0x4E, Op::Lsr, Absolute, 6),
    op(0x5E, Op::Lsr, AbsoluteX, 7),
    op(0x2A, Op::Rol, Accumulator, 2),
    op(0x26, Op::Rol, ZeroPage, 5),
    op(0x36, Op::Rol, ZeroPageX, 6),
    op(0x2E, Op::Rol, Absolute, 6),
    op(0x3E, Op::Rol, AbsoluteX, 7),
    op(0x6A, Op::Ror, Accumulator, 2),
    op(0x66, Op::Ror, ZeroPage, 5),
    op(0x76, Op::Ror, ZeroPageX, 6),
    op(0x6E, Op::Ror, Absolute, 6),
    op(0x7E, Op::Ror, AbsoluteX, 7),
    // Transfers
    op(0xAA, Op::Tax, Implied, 2),
    op(0x8A, Op::Txa, Implied, 2),
    op(0xA8, Op::Tay, Implied, 2),
    op(0x98, Op::Tya, Implied, 2),
    op(0xBA, Op::Tsx, Implied, 2),
    op(0x9A, Op::Txs, Implied, 2),
    // Stack
    op(0x48, Op::Pha, Implied, 3),
    op(0x08, Op::Php, Implied, 3),
    op(0x68, Op::Pla, Implied, 4),
    op(0x28, Op::Plp, Implied, 4),
    // Control transfer
    op(0x4C, Op::Jmp, Absolute, 3),
    op(0x6C, Op::Jmp, Indirect, 5),
    op(0x20, Op::Jsr, Absolute, 6),
    op(0x60, Op::Rts, Implied, 6),
    op(0x00, Op::Brk, Implied, 7),
    op(0x40, Op::Rti, Implied, 6),
    // Flags
    op(0x18, Op::Clc, Implied, 2),
    op(0x38, Op::Sec, Implied, 2),
    op(0x58, Op::Cli, Implied, 2),
    op(0x78, Op::Sei, Implied, 2),
    op(0xD8, Op::Cld, Implied, 2),
    op(0xF8, Op::Sed, Implied, 2),
    op(0xB8, Op::Clv, Implied, 2),
    // Branches
    op(0x90, Op::Bcc, Relative, 2),
    op(0xB0, Op::Bcs, Relative, 2),
    op(0xF0, Op::Beq, Relative, 2),
    op(0xD0, Op::Bne, Relative, 2),
    op(0x10, Op::Bpl, Relative, 2),
    op(0x30, Op::Bmi, Relative, 2),
    op(0x50, Op::Bvc, Relative, 2),
    op(0x70, Op::Bvs, Relative, 2),
    op(0xEA, Op::Nop, Implied, 2),
];

const fn build_table() -> [Option<OpInfo>; 256] {
    let mut table: [Option<OpInfo>; 256] = [None; 256];
    let mut i = 0;
    while i < DEFINED.len() {
        table[DEFINED[i].opcode as usize] = Some(DEFINED[i]);
        i += 1;
    }
    table
}

/// Opcode byte -> descriptor. `None` marks an opcode the interpreter does
/// not implement.
pub static OPCODES: [Option<OpInfo>; 256] = build_table();

pub fn lookup(opcode: u8) -> Option<&'static OpInfo> {
    OPCODES[opcode as usize].as_ref()
}
