//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch carries at most one in-flight instruction; an empty latch
//! is a bubble. Latches are drained oldest-first within a cycle so that
//! every stage observes the contents its upstream neighbor produced in
//! the previous cycle.

use crate::core::control::ControlSignals;
use crate::isa::Instruction;

/// Contents of the IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug)]
pub struct IfIdBundle {
    pub inst: Instruction,
    /// Decode refused to issue this instruction last cycle and is holding
    /// it for another attempt.
    pub stalled: bool,
}

/// Contents of the ID/EX latch (Decode to Execute).
#[derive(Clone, Copy, Debug)]
pub struct IdExBundle {
    pub inst: Instruction,
    pub ctrl: ControlSignals,
    /// `rs` value read from the register file at decode.
    pub rs_val: i64,
    /// `rt` value read from the register file at decode.
    pub rt_val: i64,
    /// Resolved destination register, when the instruction writes one.
    pub dest: Option<usize>,
}

/// Contents of the EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug)]
pub struct ExMemBundle {
    pub inst: Instruction,
    pub ctrl: ControlSignals,
    /// ALU output; the effective address for loads and stores.
    pub alu_result: i64,
    /// Value to be stored, after forwarding.
    pub store_val: i64,
    pub dest: Option<usize>,
}

/// Contents of the MEM/WB latch (Memory to Write-back).
#[derive(Clone, Copy, Debug)]
pub struct MemWbBundle {
    pub inst: Instruction,
    pub ctrl: ControlSignals,
    pub alu_result: i64,
    /// Word loaded from memory; zero for non-loads.
    pub loaded_value: i64,
    pub dest: Option<usize>,
}
