//! Control signal generation.
//!
//! An instruction's behavior in the later pipeline stages is determined
//! once, at decode, from a fixed per-opcode signal table. The stages
//! consult only these signals; they never re-inspect the opcode.

use crate::isa::Opcode;

/// Control signals produced by the decode stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Destination register comes from `rd` rather than `rt`.
    pub reg_dst: bool,
    /// ALU operand B is the immediate rather than the `rt` value.
    pub alu_src: bool,
    /// Write-back value comes from memory rather than the ALU.
    pub mem_to_reg: bool,
    /// Instruction writes a destination register.
    pub reg_write: bool,
    /// Instruction reads data memory.
    pub mem_read: bool,
    /// Instruction writes data memory.
    pub mem_write: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
}

impl ControlSignals {
    /// Signal table, consulted once per instruction at decode.
    pub fn decode(opcode: Opcode) -> Self {
        match opcode {
            Opcode::Add | Opcode::Sub => Self {
                reg_dst: true,
                reg_write: true,
                ..Self::default()
            },
            Opcode::Lw => Self {
                alu_src: true,
                mem_to_reg: true,
                reg_write: true,
                mem_read: true,
                ..Self::default()
            },
            Opcode::Sw => Self {
                alu_src: true,
                mem_write: true,
                ..Self::default()
            },
            Opcode::Beq => Self {
                branch: true,
                ..Self::default()
            },
        }
    }

    /// Signals displayed for the execute stage:
    /// RegDst, ALUSrc, MemToReg, RegWrite, MemRead, MemWrite, Branch.
    pub fn ex_bits(&self) -> String {
        [
            self.reg_dst,
            self.alu_src,
            self.mem_to_reg,
            self.reg_write,
            self.mem_read,
            self.mem_write,
            self.branch,
        ]
        .iter()
        .map(|&b| bit(b))
        .collect()
    }

    /// Signals displayed for the memory stage:
    /// MemToReg, RegWrite, MemRead, MemWrite.
    pub fn mem_bits(&self) -> String {
        [self.mem_to_reg, self.reg_write, self.mem_read, self.mem_write]
            .iter()
            .map(|&b| bit(b))
            .collect()
    }

    /// Signals displayed for the write-back stage: RegWrite, MemToReg.
    pub fn wb_bits(&self) -> String {
        [self.reg_write, self.mem_to_reg].iter().map(|&b| bit(b)).collect()
    }
}

fn bit(b: bool) -> char {
    if b { '1' } else { '0' }
}
