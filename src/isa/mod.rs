//! Instruction set definitions.
//!
//! The simulated machine executes a five-instruction subset: `add`, `sub`,
//! `lw`, `sw`, and `beq`. Instructions are carried through the pipeline
//! fully decoded; there is no binary encoding.

use std::fmt;

/// Operation performed by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// Register addition: `rd = rs + rt`.
    Add,
    /// Register subtraction: `rd = rs - rt`.
    Sub,
    /// Load word: `rt = mem[rs + imm]`.
    Lw,
    /// Store word: `mem[rs + imm] = rt`.
    Sw,
    /// Branch if equal: taken when `rs == rt`.
    Beq,
}

impl Opcode {
    /// Assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Lw => "lw",
            Opcode::Sw => "sw",
            Opcode::Beq => "beq",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A fully decoded instruction.
///
/// `index` is the instruction's position in the loaded program and doubles
/// as its address for branch target arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    /// First source register.
    pub rs: usize,
    /// Second source register; also the destination for `lw` and the
    /// store value for `sw`.
    pub rt: usize,
    /// Destination register for R-type instructions.
    pub rd: Option<usize>,
    /// Sign-extended immediate: byte offset for `lw`/`sw`, instruction
    /// offset for `beq`.
    pub imm: i64,
    /// Position of the instruction in the program.
    pub index: usize,
}

impl Instruction {
    /// Whether the instruction reads `rt` as a source operand.
    ///
    /// `lw` is the only opcode that does not: its `rt` is the destination.
    pub fn reads_rt(&self) -> bool {
        !matches!(self.opcode, Opcode::Lw)
    }
}
